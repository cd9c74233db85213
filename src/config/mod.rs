/// Application settings from badge.toml and the environment
pub mod app;

/// Database configuration and connection management
pub mod database;

/// Seed data loading from seed.toml
pub mod seed;

pub use app::{AppConfig, BadgeConfig, ServerConfig, load_app_configuration};
