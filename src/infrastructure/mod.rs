//! Infrastructure layer - External adapters and implementations
//!
//! This layer contains:
//! - Config: application configuration from the environment
//! - Database: line-delimited JSON database loader
//! - Assets: image URL resolution and the svg2png cache

pub mod assets;
pub mod config;
pub mod database;
