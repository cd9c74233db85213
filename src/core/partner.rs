//! Partner and certification attempt queries.
//!
//! The read side (`get_partner_by_id`, `get_best_passing_attempt`) backs the badge
//! resolver. The write side exists for seeding and tests; grading and admin edits
//! happen in other systems.

use crate::{
    entities::{CertificationAttempt, Partner, certification_attempt, partner},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Fields needed to register a partner.
#[derive(Debug, Clone, Default)]
pub struct NewPartner {
    /// Company display name
    pub company_name: String,
    /// Registered website
    pub website: Option<String>,
    /// Landing page the badge links to
    pub partner_landing_url: Option<String>,
}

/// Finds a partner by its unique ID.
pub async fn get_partner_by_id<C>(db: &C, partner_id: i64) -> Result<Option<partner::Model>>
where
    C: ConnectionTrait,
{
    Partner::find_by_id(partner_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a partner by exact company name.
pub async fn get_partner_by_company_name<C>(
    db: &C,
    company_name: &str,
) -> Result<Option<partner::Model>>
where
    C: ConnectionTrait,
{
    Partner::find()
        .filter(partner::Column::CompanyName.eq(company_name))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Returns the partner's highest-scoring passed attempt, if any.
///
/// When several passed attempts share the top score, which one is returned is
/// unspecified.
pub async fn get_best_passing_attempt<C>(
    db: &C,
    partner_id: i64,
) -> Result<Option<certification_attempt::Model>>
where
    C: ConnectionTrait,
{
    CertificationAttempt::find()
        .filter(certification_attempt::Column::PartnerId.eq(partner_id))
        .filter(certification_attempt::Column::Passed.eq(true))
        .order_by_desc(certification_attempt::Column::Score)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates an uncertified partner after validating the company name.
pub async fn create_partner<C>(db: &C, new_partner: NewPartner) -> Result<partner::Model>
where
    C: ConnectionTrait,
{
    let company_name = new_partner.company_name.trim();
    if company_name.is_empty() {
        return Err(Error::Config {
            message: "Partner company name cannot be empty".to_string(),
        });
    }

    let partner = partner::ActiveModel {
        company_name: Set(company_name.to_string()),
        is_certified: Set(false),
        certified_at: Set(None),
        certification_expires_at: Set(None),
        website: Set(new_partner.website),
        partner_landing_url: Set(new_partner.partner_landing_url),
        ..Default::default()
    };

    let result = partner.insert(db).await?;
    Ok(result)
}

/// Overwrites the certification state of a partner.
pub async fn set_certification<C>(
    db: &C,
    partner_id: i64,
    is_certified: bool,
    certified_at: Option<DateTime<Utc>>,
    expires_at: Option<DateTime<Utc>>,
) -> Result<partner::Model>
where
    C: ConnectionTrait,
{
    let partner = get_partner_by_id(db, partner_id)
        .await?
        .ok_or_else(|| Error::partner_not_found(partner_id))?;

    let mut active_model: partner::ActiveModel = partner.into();
    active_model.is_certified = Set(is_certified);
    active_model.certified_at = Set(certified_at);
    active_model.certification_expires_at = Set(expires_at);
    active_model.update(db).await.map_err(Into::into)
}

/// Records a completed exam attempt for an existing partner.
///
/// # Errors
/// Returns an error if:
/// - The score is not a finite number between 0 and 100
/// - The partner does not exist
/// - The database insert fails
pub async fn record_attempt<C>(
    db: &C,
    partner_id: i64,
    score: f64,
    passed: bool,
    completed_at: DateTime<Utc>,
) -> Result<certification_attempt::Model>
where
    C: ConnectionTrait,
{
    if !score.is_finite() || !(0.0..=100.0).contains(&score) {
        return Err(Error::InvalidScore { score });
    }

    if get_partner_by_id(db, partner_id).await?.is_none() {
        return Err(Error::partner_not_found(partner_id));
    }

    let attempt = certification_attempt::ActiveModel {
        partner_id: Set(partner_id),
        score: Set(score),
        passed: Set(passed),
        completed_at: Set(completed_at),
        ..Default::default()
    };

    let result = attempt.insert(db).await?;
    Ok(result)
}
