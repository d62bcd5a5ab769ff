//! Domain entities - Database records and their typed specializations

mod actor;
mod model;
mod skill;

pub use actor::{CprActor, CprActorType};
pub use model::{Model, ModelStats};
pub use skill::{CprSkill, CprStat};

/// Game system identifier carried by every Cyberpunk RED record.
pub const CPR_SYSTEM_ID: &str = "cyberpunk-red-core";

/// Entity kinds the Cyberpunk RED system recognizes in a database record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CprKind {
    Actor,
    Skill,
    /// Belongs to another game system or an unsupported entity type.
    Other,
}

/// Classify a generic record by game system and type tag.
pub fn recognize(model: &Model) -> CprKind {
    if model.stats.system_id != CPR_SYSTEM_ID {
        return CprKind::Other;
    }
    if CprActorType::from_tag(&model.kind).is_some() {
        CprKind::Actor
    } else if model.kind == "skill" {
        CprKind::Skill
    } else {
        CprKind::Other
    }
}

/// Errors raised while specializing a generic record.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("record {id} carries a malformed {kind} payload: {source}")]
    MalformedSystem {
        id: String,
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("actor {id} has no {stat} attribute")]
    MissingStat { id: String, stat: CprStat },
}
