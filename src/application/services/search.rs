//! Fuzzy lookup over loaded entities for autocomplete consumers

use crate::domain::entities::{CprActor, CprSkill, Model};

/// Anything with a display name the fuzzy filter can match against.
pub trait Named {
    fn display_name(&self) -> &str;
}

impl Named for Model {
    fn display_name(&self) -> &str {
        &self.name
    }
}

impl Named for CprActor {
    fn display_name(&self) -> &str {
        self.name()
    }
}

impl Named for CprSkill {
    fn display_name(&self) -> &str {
        self.name()
    }
}

/// Lazy, case-insensitive substring match over a collection's display
/// names. Preserves the source iteration order and never materializes
/// the collection; rerun it with a new query for a fresh pass over the
/// same snapshot.
pub fn find_matching<'a, T, I>(source: I, query: &str) -> impl Iterator<Item = &'a T>
where
    T: Named + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let needle = query.to_lowercase();
    source
        .into_iter()
        .filter(move |entry| entry.display_name().to_lowercase().contains(&needle))
}

/// Narrow an actor collection to player characters, for autocomplete
/// contexts that should not offer mooks.
pub fn player_characters<'a, I>(actors: I) -> impl Iterator<Item = &'a CprActor>
where
    I: IntoIterator<Item = &'a CprActor>,
{
    actors.into_iter().filter(|actor| actor.is_player_character())
}
