//! Foundry Core - Game data service for Foundry VTT actor databases
//!
//! Loads a Cyberpunk RED actor database from a line-delimited JSON
//! store, builds typed actors with their rollable skills, computes
//! skill-check rolls, and resolves image assets through the svg2png
//! cache. Front-end collaborators (command handlers, autocomplete)
//! consume the application services; the binary target validates a
//! configured data store.

pub mod application;
pub mod domain;
pub mod infrastructure;
