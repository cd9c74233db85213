//! Database configuration module for the badge service.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema always matches the Rust structs without hand-written SQL. Creation is
//! idempotent and runs on every start-up.

use crate::entities::{CertificationAttempt, CertificationSettings, Partner};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::{debug, info};

const DEFAULT_DATABASE_URL: &str = "sqlite://partner_badge.sqlite?mode=rwc";

/// Gets the database URL from the `DATABASE_URL` environment variable or returns the
/// default local `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by [`get_database_url`].
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    debug!("Connecting to database at {}", database_url);
    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates all tables that do not exist yet from the entity definitions.
///
/// Partners are created before attempts so the foreign key target exists.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut partner_table = schema.create_table_from_entity(Partner);
    let mut attempt_table = schema.create_table_from_entity(CertificationAttempt);
    let mut settings_table = schema.create_table_from_entity(CertificationSettings);

    partner_table.if_not_exists();
    attempt_table.if_not_exists();
    settings_table.if_not_exists();

    db.execute(builder.build(&partner_table)).await?;
    db.execute(builder.build(&attempt_table)).await?;
    db.execute(builder.build(&settings_table)).await?;

    info!("Database tables ensured.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        certification_attempt::Model as AttemptModel,
        certification_settings::Model as SettingsModel, partner::Model as PartnerModel,
    };
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<PartnerModel> = Partner::find().limit(1).all(&db).await?;
        let _: Vec<AttemptModel> = CertificationAttempt::find().limit(1).all(&db).await?;
        let _: Vec<SettingsModel> = CertificationSettings::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }
}
