//! Actor entity - Cyberpunk RED character or mook with its owned items

use std::collections::HashMap;

use serde::Deserialize;
use tracing::debug;

use crate::domain::entities::{recognize, CprKind, CprSkill, CprStat, Model, ModelError};

/// Actor type tags the Cyberpunk RED system ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CprActorType {
    /// Player character with a full stat block.
    Character,
    /// GM-run NPC.
    Mook,
}

impl CprActorType {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "character" => Some(CprActorType::Character),
            "mook" => Some(CprActorType::Mook),
            _ => None,
        }
    }
}

/// Shape of an actor record's `system` payload, reduced to what the
/// specialization needs.
#[derive(Debug, Clone, Deserialize)]
struct ActorSystem {
    stats: HashMap<CprStat, StatValue>,
}

#[derive(Debug, Clone, Deserialize)]
struct StatValue {
    value: i32,
}

/// An actor specialized from a generic record: owns its item records
/// and a skill map derived from them at construction time.
///
/// Immutable after construction; a reload produces replacement
/// instances rather than mutating existing ones.
#[derive(Debug, Clone)]
pub struct CprActor {
    model: Model,
    items: Vec<Model>,
    skills: HashMap<String, CprSkill>,
    stats: HashMap<CprStat, i32>,
}

impl CprActor {
    /// Recognizer: is this record a Cyberpunk RED actor?
    pub fn is_actor(model: &Model) -> bool {
        recognize(model) == CprKind::Actor
    }

    /// Recognizer narrowed to player characters.
    pub fn is_character(model: &Model) -> bool {
        CprActor::is_actor(model) && CprActorType::from_tag(&model.kind) == Some(CprActorType::Character)
    }

    /// Specialize an actor record. Items recognized as skills become
    /// entries in the skill map, keyed by item id; anything else
    /// (weapons, gear, malformed skills) is kept as a raw item only.
    pub fn from_model(mut model: Model) -> Result<Self, ModelError> {
        let system: ActorSystem =
            serde_json::from_value(model.system.clone()).map_err(|source| {
                ModelError::MalformedSystem {
                    id: model.id.clone(),
                    kind: "actor",
                    source,
                }
            })?;
        let stats: HashMap<CprStat, i32> = system
            .stats
            .into_iter()
            .map(|(stat, v)| (stat, v.value))
            .collect();

        let items = std::mem::take(&mut model.items);
        let mut skills = HashMap::new();
        for item in &items {
            if !CprSkill::is_skill(item) {
                continue;
            }
            match Self::build_skill(&model.id, item.clone(), &stats) {
                Ok(skill) => {
                    skills.insert(skill.id().to_string(), skill);
                }
                Err(e) => {
                    debug!(actor = %model.id, item = %item.id, "excluding skill item: {e}");
                }
            }
        }

        Ok(Self {
            model,
            items,
            skills,
            stats,
        })
    }

    fn build_skill(
        actor_id: &str,
        item: Model,
        stats: &HashMap<CprStat, i32>,
    ) -> Result<CprSkill, ModelError> {
        // Peek at the governing stat before full construction so a
        // missing attribute reports the actor, not a serde error.
        #[derive(Deserialize)]
        struct StatRef {
            stat: CprStat,
        }
        let stat_ref: StatRef =
            serde_json::from_value(item.system.clone()).map_err(|source| {
                ModelError::MalformedSystem {
                    id: item.id.clone(),
                    kind: "skill",
                    source,
                }
            })?;
        let stat_value = stats.get(&stat_ref.stat).copied().ok_or(ModelError::MissingStat {
            id: actor_id.to_string(),
            stat: stat_ref.stat,
        })?;
        CprSkill::from_model(item, stat_value)
    }

    pub fn id(&self) -> &str {
        &self.model.id
    }

    pub fn name(&self) -> &str {
        &self.model.name
    }

    /// Generic record fields this actor was built from.
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// All owned item records, in database order.
    pub fn items(&self) -> &[Model] {
        &self.items
    }

    /// Rollable skills, keyed by item id.
    pub fn skills(&self) -> &HashMap<String, CprSkill> {
        &self.skills
    }

    pub fn skill(&self, id: &str) -> Option<&CprSkill> {
        self.skills.get(id)
    }

    /// Attribute value from the actor's stat block.
    pub fn stat(&self, stat: CprStat) -> Option<i32> {
        self.stats.get(&stat).copied()
    }

    /// Derived from the type tag: `character` records are player
    /// characters, `mook` records are not.
    pub fn is_player_character(&self) -> bool {
        CprActorType::from_tag(&self.model.kind) == Some(CprActorType::Character)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor_json(kind: &str, items: &str) -> String {
        format!(
            r#"{{"_id":"actor1","_stats":{{"systemId":"cyberpunk-red-core"}},
                 "name":"Johnny","type":"{kind}","img":"tokens/johnny.png",
                 "system":{{"stats":{{"ref":{{"value":8}},"cool":{{"value":6}},"tech":{{"value":4}}}}}},
                 "flags":{{}},"items":[{items}]}}"#
        )
    }

    fn skill_item(id: &str, name: &str, level: i32, stat: &str) -> String {
        format!(
            r#"{{"_id":"{id}","_stats":{{"systemId":"cyberpunk-red-core"}},
                 "name":"{name}","type":"skill","img":"icons/skill.svg",
                 "system":{{"level":{level},"stat":"{stat}"}},"flags":{{}}}}"#
        )
    }

    fn weapon_item(id: &str) -> String {
        format!(
            r#"{{"_id":"{id}","_stats":{{"systemId":"cyberpunk-red-core"}},
                 "name":"Militech Pistol","type":"weapon","img":"icons/gun.png",
                 "system":{{}},"flags":{{}}}}"#
        )
    }

    #[test]
    fn skill_map_keys_are_exactly_recognized_skill_items() {
        let items = [
            skill_item("sk-handgun", "Handgun", 5, "ref"),
            weapon_item("wp-pistol"),
            skill_item("sk-persuade", "Persuasion", 3, "cool"),
        ]
        .join(",");
        let model: Model = serde_json::from_str(&actor_json("character", &items)).unwrap();
        let actor = CprActor::from_model(model).unwrap();

        let mut keys: Vec<_> = actor.skills().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["sk-handgun", "sk-persuade"]);
        // The raw items list keeps everything, in database order.
        assert_eq!(actor.items().len(), 3);
        assert_eq!(actor.items()[1].id, "wp-pistol");
    }

    #[test]
    fn skill_resolves_owning_actors_attribute() {
        let items = skill_item("sk-handgun", "Handgun", 5, "ref");
        let model: Model = serde_json::from_str(&actor_json("character", &items)).unwrap();
        let actor = CprActor::from_model(model).unwrap();
        let skill = actor.skill("sk-handgun").unwrap();
        assert_eq!(skill.base(), 13); // level 5 + REF 8
    }

    #[test]
    fn skill_with_unknown_attribute_is_excluded() {
        // Actor stat block has no "emp" entry.
        let items = skill_item("sk-empathy", "Human Perception", 2, "emp");
        let model: Model = serde_json::from_str(&actor_json("character", &items)).unwrap();
        let actor = CprActor::from_model(model).unwrap();
        assert!(actor.skills().is_empty());
        assert_eq!(actor.items().len(), 1);
    }

    #[test]
    fn player_character_flag_follows_type_tag() {
        let pc: Model = serde_json::from_str(&actor_json("character", "")).unwrap();
        let mook: Model = serde_json::from_str(&actor_json("mook", "")).unwrap();
        assert!(CprActor::from_model(pc).unwrap().is_player_character());
        assert!(!CprActor::from_model(mook).unwrap().is_player_character());
    }

    #[test]
    fn recognizers_check_system_and_type() {
        let actor: Model = serde_json::from_str(&actor_json("mook", "")).unwrap();
        assert!(CprActor::is_actor(&actor));
        assert!(!CprActor::is_character(&actor));

        let mut foreign = actor.clone();
        foreign.stats.system_id = "dnd5e".to_string();
        assert!(!CprActor::is_actor(&foreign));
    }

    #[test]
    fn malformed_stat_block_is_an_error() {
        let json = r#"{"_id":"a2","_stats":{"systemId":"cyberpunk-red-core"},
            "name":"Broken","type":"character","img":"x.png",
            "system":{"stats":"nope"},"flags":{}}"#;
        let model: Model = serde_json::from_str(json).unwrap();
        assert!(matches!(
            CprActor::from_model(model),
            Err(ModelError::MalformedSystem { kind: "actor", .. })
        ));
    }
}
