//! Skill entity - rollable Cyberpunk RED skill owned by an actor

use std::fmt;

use serde::Deserialize;

use crate::domain::entities::{recognize, CprKind, Model, ModelError};
use crate::domain::value_objects::{roll_check, DieSource, Roll};

/// The ten Cyberpunk RED attributes a skill can be governed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CprStat {
    Int,
    Ref,
    Dex,
    Tech,
    Cool,
    Will,
    Luck,
    Move,
    Body,
    Emp,
}

impl fmt::Display for CprStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            CprStat::Int => "int",
            CprStat::Ref => "ref",
            CprStat::Dex => "dex",
            CprStat::Tech => "tech",
            CprStat::Cool => "cool",
            CprStat::Will => "will",
            CprStat::Luck => "luck",
            CprStat::Move => "move",
            CprStat::Body => "body",
            CprStat::Emp => "emp",
        };
        f.write_str(tag)
    }
}

/// Shape of a skill record's `system` payload.
#[derive(Debug, Clone, Deserialize)]
struct SkillSystem {
    level: i32,
    stat: CprStat,
}

/// A rollable skill, specialized from a generic item record.
///
/// The governing attribute's value is resolved once from the owning
/// actor at construction time; it is a snapshot, not a live link.
#[derive(Debug, Clone)]
pub struct CprSkill {
    model: Model,
    /// Trained skill level.
    pub level: i32,
    /// Attribute governing this skill.
    pub stat: CprStat,
    stat_value: i32,
}

impl CprSkill {
    /// Recognizer: is this record a Cyberpunk RED skill item?
    pub fn is_skill(model: &Model) -> bool {
        recognize(model) == CprKind::Skill
    }

    /// Specialize a skill record, resolving the governing attribute to
    /// `stat_value` (supplied by the owning actor).
    pub fn from_model(model: Model, stat_value: i32) -> Result<Self, ModelError> {
        let system: SkillSystem =
            serde_json::from_value(model.system.clone()).map_err(|source| {
                ModelError::MalformedSystem {
                    id: model.id.clone(),
                    kind: "skill",
                    source,
                }
            })?;
        Ok(Self {
            model,
            level: system.level,
            stat: system.stat,
            stat_value,
        })
    }

    pub fn id(&self) -> &str {
        &self.model.id
    }

    pub fn name(&self) -> &str {
        &self.model.name
    }

    /// Generic record fields this skill was built from.
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Effective check base: trained level plus the governing attribute.
    pub fn base(&self) -> i32 {
        self.level + self.stat_value
    }

    /// Roll a check against this skill, optionally applying a manual
    /// modifier supplied by the caller.
    pub fn roll(&self, dice: &mut dyn DieSource, modifier: Option<i32>) -> Roll {
        roll_check(dice, self.base(), modifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::FixedDice;

    fn skill_model(level: i32, stat: &str) -> Model {
        serde_json::from_str(&format!(
            r#"{{"_id":"sk1","_stats":{{"systemId":"cyberpunk-red-core"}},
                 "name":"Handgun","type":"skill","img":"icons/skill.svg",
                 "system":{{"level":{level},"stat":"{stat}","category":"rangedweaponskills"}},
                 "flags":{{}}}}"#
        ))
        .unwrap()
    }

    #[test]
    fn derives_base_from_level_and_attribute() {
        let skill = CprSkill::from_model(skill_model(4, "ref"), 6).unwrap();
        assert_eq!(skill.level, 4);
        assert_eq!(skill.stat, CprStat::Ref);
        assert_eq!(skill.base(), 10);
    }

    #[test]
    fn malformed_payload_is_rejected() {
        let mut model = skill_model(2, "cool");
        model.system = serde_json::json!({"level": "not a number"});
        let err = CprSkill::from_model(model, 3).unwrap_err();
        assert!(matches!(err, ModelError::MalformedSystem { kind: "skill", .. }));
    }

    #[test]
    fn roll_includes_skill_base_and_modifier() {
        let skill = CprSkill::from_model(skill_model(3, "dex"), 5).unwrap();
        let mut dice = FixedDice::new([4]);
        let roll = skill.roll(&mut dice, Some(-2));
        // 4 (die) + 8 (skill base) - 2 (modifier)
        assert_eq!(roll.value(), 10);
    }
}
