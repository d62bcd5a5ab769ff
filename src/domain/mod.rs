//! Domain layer - Core game-data types with no external dependencies
//!
//! This layer contains:
//! - Entities: the generic database Model and the Cyberpunk RED
//!   specializations (actor, skill)
//! - Value Objects: dice rolls and the skill-check roll mechanic

pub mod entities;
pub mod value_objects;
