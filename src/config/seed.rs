//! Seed data loading from seed.toml
//!
//! The seed file describes the settings singleton and a list of partners with their
//! certification attempts. It is applied on start-up by [`crate::core::seed`].
//! Timestamps are RFC 3339 strings (quoted in TOML).

use crate::errors::{Error, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire seed.toml file
#[derive(Debug, Deserialize, Default)]
pub struct SeedConfig {
    /// Badge settings singleton, left untouched when absent
    #[serde(default)]
    pub settings: Option<SettingsSeed>,
    /// Partners to create if no partner with the same company name exists
    #[serde(default)]
    pub partners: Vec<PartnerSeed>,
}

/// Seed values for the certification settings singleton
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SettingsSeed {
    /// Tooltip template
    pub badge_hover_text: Option<String>,
    /// Light theme badge image
    pub badge_light_url: Option<String>,
    /// Dark theme badge image
    pub badge_dark_url: Option<String>,
    /// Badge image alt text
    pub badge_alt_text: Option<String>,
}

/// Seed values for a single partner
#[derive(Debug, Deserialize, Clone)]
pub struct PartnerSeed {
    /// Company display name, used as the idempotency key
    pub company_name: String,
    /// Whether the partner is certified
    #[serde(default)]
    pub is_certified: bool,
    /// When the certification was granted
    pub certified_at: Option<DateTime<Utc>>,
    /// When the certification lapses
    pub certification_expires_at: Option<DateTime<Utc>>,
    /// Registered website
    pub website: Option<String>,
    /// Landing page the badge links to
    pub partner_landing_url: Option<String>,
    /// Completed exam attempts
    #[serde(default)]
    pub attempts: Vec<AttemptSeed>,
}

/// Seed values for one certification attempt
#[derive(Debug, Deserialize, Clone)]
pub struct AttemptSeed {
    /// Score in the 0-100 range
    pub score: f64,
    /// Whether the attempt passed
    pub passed: bool,
    /// Submission time, defaults to the time of seeding
    pub completed_at: Option<DateTime<Utc>>,
}

/// Loads seed data from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_seed<P: AsRef<Path>>(path: P) -> Result<SeedConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read seed file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse seed file: {e}"),
    })
}
