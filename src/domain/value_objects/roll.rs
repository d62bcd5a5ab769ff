//! Dice rolls and the Cyberpunk RED skill-check mechanic

use std::fmt;

use rand::rngs::OsRng;
use rand::Rng;

/// Die size used for skill checks.
pub const CHECK_DIE_SIZE: u32 = 10;

/// Source of die faces. Injected into the roll engine so checks are
/// reproducible under test with a scripted face sequence.
pub trait DieSource {
    /// Draw one face, uniform in `1..=size`.
    fn roll(&mut self, size: u32) -> i32;
}

/// Production die source backed by the operating system's CSPRNG.
#[derive(Debug, Default)]
pub struct SecureDice;

impl DieSource for SecureDice {
    fn roll(&mut self, size: u32) -> i32 {
        OsRng.gen_range(1..=size as i32)
    }
}

/// Scripted die source yielding a fixed face sequence.
#[derive(Debug)]
pub struct FixedDice {
    faces: std::vec::IntoIter<i32>,
}

impl FixedDice {
    pub fn new(faces: impl IntoIterator<Item = i32>) -> Self {
        Self {
            faces: faces.into_iter().collect::<Vec<_>>().into_iter(),
        }
    }
}

impl DieSource for FixedDice {
    fn roll(&mut self, _size: u32) -> i32 {
        self.faces.next().expect("FixedDice ran out of faces")
    }
}

/// Outcome of a dice computation: the faces rolled (bonus dice already
/// signed) plus labeled modifiers. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roll {
    dice: Vec<i32>,
    modifiers: Vec<(String, i32)>,
}

impl Roll {
    /// Modifier labels must be unique; order is preserved for display.
    pub fn new(dice: Vec<i32>, modifiers: Vec<(String, i32)>) -> Self {
        debug_assert!(
            modifiers
                .iter()
                .enumerate()
                .all(|(i, (label, _))| !modifiers[..i].iter().any(|(l, _)| l == label)),
            "duplicate modifier label"
        );
        Self { dice, modifiers }
    }

    pub fn dice(&self) -> &[i32] {
        &self.dice
    }

    pub fn modifiers(&self) -> &[(String, i32)] {
        &self.modifiers
    }

    /// Total: sum of dice plus sum of modifier values.
    pub fn value(&self) -> i32 {
        let dice: i32 = self.dice.iter().sum();
        let modifiers: i32 = self.modifiers.iter().map(|(_, v)| v).sum();
        dice + modifiers
    }
}

impl fmt::Display for Roll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .dice
            .iter()
            .map(|die| format!("<{die}>"))
            .chain(
                self.modifiers
                    .iter()
                    .map(|(label, value)| format!("{value} ({label})")),
            )
            .collect();
        f.write_str(&parts.join(" + "))
    }
}

/// Roll a skill check: one d10, exploding on the extremes.
///
/// A first face of 1 is a critical failure and draws a second d10
/// recorded as a negative bonus die; a 10 is a critical success and
/// draws a second d10 recorded positive. The caller's manual modifier,
/// when present, is listed before the skill base.
pub fn roll_check(dice: &mut dyn DieSource, base: i32, modifier: Option<i32>) -> Roll {
    let first = dice.roll(CHECK_DIE_SIZE);
    let mut faces = vec![first];
    if first == 1 {
        faces.push(-dice.roll(CHECK_DIE_SIZE));
    } else if first == CHECK_DIE_SIZE as i32 {
        faces.push(dice.roll(CHECK_DIE_SIZE));
    }

    let mut modifiers = Vec::new();
    if let Some(value) = modifier {
        modifiers.push(("modifier".to_string(), value));
    }
    modifiers.push(("skill base".to_string(), base));
    Roll::new(faces, modifiers)
}
