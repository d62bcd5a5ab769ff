//! Application services - Use case implementations
//!
//! The game data service owns the loaded actor cache and asset
//! resolution; the search module provides the lazy fuzzy filter used
//! for autocomplete.

pub mod game_data_service;
pub mod search;

pub use game_data_service::GameDataService;
pub use search::{find_matching, player_characters, Named};
