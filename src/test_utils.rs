//! Shared test utilities for the badge service.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::partner::{self, NewPartner},
    entities,
    errors::Result,
};
use chrono::{DateTime, TimeZone, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use tracing_subscriber::EnvFilter;

/// Routes `tracing` output through the test harness. Safe to call repeatedly.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Midnight UTC on the given date.
///
/// # Panics
/// Panics on an impossible date; test inputs are literals.
#[allow(clippy::unwrap_used)]
pub fn utc(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).single().unwrap()
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    init_test_tracing();
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates an uncertified test partner with no website or landing page.
pub async fn create_test_partner(
    db: &DatabaseConnection,
    company_name: &str,
) -> Result<entities::partner::Model> {
    partner::create_partner(
        db,
        NewPartner {
            company_name: company_name.to_string(),
            ..Default::default()
        },
    )
    .await
}

/// Creates a certified partner, certified on 2026-01-01, with the given expiry.
pub async fn create_certified_partner(
    db: &DatabaseConnection,
    company_name: &str,
    expires_at: Option<DateTime<Utc>>,
) -> Result<entities::partner::Model> {
    let created = create_test_partner(db, company_name).await?;
    partner::set_certification(db, created.id, true, Some(utc(2026, 1, 1)), expires_at).await
}

/// Sets the registered website of a partner.
pub async fn set_test_website(
    db: &DatabaseConnection,
    partner_id: i64,
    website: &str,
) -> Result<entities::partner::Model> {
    let model = entities::partner::ActiveModel {
        id: Set(partner_id),
        website: Set(Some(website.to_string())),
        ..Default::default()
    };
    model.update(db).await.map_err(Into::into)
}

/// Records a test attempt completed on 2026-01-01.
pub async fn create_test_attempt(
    db: &DatabaseConnection,
    partner_id: i64,
    score: f64,
    passed: bool,
) -> Result<entities::certification_attempt::Model> {
    partner::record_attempt(db, partner_id, score, passed, utc(2026, 1, 1)).await
}

/// Sets up a test database with one uncertified partner.
/// Returns (db, partner) for common test scenarios.
pub async fn setup_with_partner() -> Result<(DatabaseConnection, entities::partner::Model)> {
    let db = setup_test_db().await?;
    let partner = create_test_partner(&db, "Test Partner").await?;
    Ok((db, partner))
}
