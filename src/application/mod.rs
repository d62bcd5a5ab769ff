//! Application layer - Use case services over the domain

pub mod services;
