//! Database seeding from seed.toml.
//!
//! Seeding runs inside one transaction. Partners are keyed by company name: an
//! existing partner is skipped, never overwritten. The settings singleton is
//! replaced whenever the seed file carries a `[settings]` table.

use crate::{
    config::seed::{PartnerSeed, SeedConfig},
    core::{
        partner::{self, NewPartner},
        settings::{self, SettingsUpdate},
    },
    errors::Result,
};
use chrono::Utc;
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use tracing::{debug, info, warn};

/// Outcome of a seeding run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedSummary {
    /// Partners inserted by this run
    pub partners_created: usize,
    /// Partners that already existed and were left alone
    pub partners_skipped: usize,
    /// Attempts inserted for newly created partners
    pub attempts_created: usize,
    /// Whether the settings singleton was written
    pub settings_written: bool,
}

/// Applies a seed configuration to the database.
pub async fn seed_database(db: &DatabaseConnection, seed: &SeedConfig) -> Result<SeedSummary> {
    info!(
        "Starting to seed database. Found {} partner configurations.",
        seed.partners.len()
    );
    let txn = db.begin().await?;
    let mut summary = SeedSummary::default();

    if let Some(settings_seed) = &seed.settings {
        settings::upsert_settings(
            &txn,
            SettingsUpdate {
                badge_hover_text: settings_seed.badge_hover_text.clone(),
                badge_light_url: settings_seed.badge_light_url.clone(),
                badge_dark_url: settings_seed.badge_dark_url.clone(),
                badge_alt_text: settings_seed.badge_alt_text.clone(),
            },
        )
        .await?;
        summary.settings_written = true;
    }

    for partner_seed in &seed.partners {
        if partner::get_partner_by_company_name(&txn, partner_seed.company_name.trim())
            .await?
            .is_some()
        {
            warn!(
                "Partner '{}' already exists. Skipping.",
                partner_seed.company_name
            );
            summary.partners_skipped += 1;
            continue;
        }

        summary.attempts_created += seed_partner(&txn, partner_seed).await?;
        summary.partners_created += 1;
    }

    txn.commit().await?;
    info!(
        created = summary.partners_created,
        skipped = summary.partners_skipped,
        attempts = summary.attempts_created,
        "Seeding complete"
    );
    Ok(summary)
}

/// Inserts one partner with its certification state and attempts, returning the
/// number of attempts inserted.
async fn seed_partner<C>(db: &C, partner_seed: &PartnerSeed) -> Result<usize>
where
    C: ConnectionTrait,
{
    debug!("Inserting partner '{}'", partner_seed.company_name);
    let created = partner::create_partner(
        db,
        NewPartner {
            company_name: partner_seed.company_name.clone(),
            website: partner_seed.website.clone(),
            partner_landing_url: partner_seed.partner_landing_url.clone(),
        },
    )
    .await?;

    if partner_seed.is_certified
        || partner_seed.certified_at.is_some()
        || partner_seed.certification_expires_at.is_some()
    {
        partner::set_certification(
            db,
            created.id,
            partner_seed.is_certified,
            partner_seed.certified_at,
            partner_seed.certification_expires_at,
        )
        .await?;
    }

    for attempt in &partner_seed.attempts {
        partner::record_attempt(
            db,
            created.id,
            attempt.score,
            attempt.passed,
            attempt.completed_at.unwrap_or_else(Utc::now),
        )
        .await?;
    }

    Ok(partner_seed.attempts.len())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::errors::Error;
    use crate::test_utils::*;

    const SEED: &str = r#"
        [settings]
        badge_hover_text = "{partnerName} ({score})"
        badge_light_url = "https://cdn.test/light.png"

        [[partners]]
        company_name = "Acme"
        is_certified = true
        certified_at = "2026-01-15T00:00:00Z"
        certification_expires_at = "2027-01-15T00:00:00Z"

        [[partners.attempts]]
        score = 55.0
        passed = false

        [[partners.attempts]]
        score = 93.0
        passed = true

        [[partners]]
        company_name = "Globex"
    "#;

    #[tokio::test]
    async fn test_seed_database() -> Result<()> {
        let db = setup_test_db().await?;
        let seed: SeedConfig = toml::from_str(SEED).unwrap();

        let summary = seed_database(&db, &seed).await?;
        assert_eq!(
            summary,
            SeedSummary {
                partners_created: 2,
                partners_skipped: 0,
                attempts_created: 2,
                settings_written: true,
            }
        );

        let acme = partner::get_partner_by_company_name(&db, "Acme")
            .await?
            .unwrap();
        assert!(acme.is_certified);
        assert_eq!(acme.certification_expires_at, Some(utc(2027, 1, 15)));
        let best = partner::get_best_passing_attempt(&db, acme.id).await?.unwrap();
        assert_eq!(best.score, 93.0);

        let stored = settings::get_settings(&db).await?.unwrap();
        assert_eq!(
            stored.badge_light_url.as_deref(),
            Some("https://cdn.test/light.png")
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_database_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        let seed: SeedConfig = toml::from_str(SEED).unwrap();

        seed_database(&db, &seed).await?;
        let second = seed_database(&db, &seed).await?;
        assert_eq!(second.partners_created, 0);
        assert_eq!(second.partners_skipped, 2);
        assert_eq!(second.attempts_created, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_rolls_back_on_invalid_attempt() -> Result<()> {
        let db = setup_test_db().await?;
        let seed: SeedConfig = toml::from_str(
            r#"
            [[partners]]
            company_name = "Broken"

            [[partners.attempts]]
            score = 140.0
            passed = true
            "#,
        )
        .unwrap();

        let result = seed_database(&db, &seed).await;
        assert!(matches!(result, Err(Error::InvalidScore { .. })));
        assert!(
            partner::get_partner_by_company_name(&db, "Broken")
                .await?
                .is_none()
        );
        Ok(())
    }
}
