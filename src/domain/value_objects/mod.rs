//! Value objects - Immutable objects defined by their attributes

mod roll;

pub use roll::{roll_check, DieSource, FixedDice, Roll, SecureDice, CHECK_DIE_SIZE};
