//! Partner entity - The certification-relevant subset of a partner record.
//!
//! Certification fields are written by exam grading and admin tooling elsewhere;
//! the badge service only reads them.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Partner database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "partners")]
pub struct Model {
    /// Unique identifier for the partner
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name of the partner company
    pub company_name: String,
    /// Whether the partner currently holds a certification
    pub is_certified: bool,
    /// When the certification was granted
    pub certified_at: Option<DateTimeUtc>,
    /// When the certification lapses, None for certifications that never expire
    pub certification_expires_at: Option<DateTimeUtc>,
    /// Partner's registered website, used for the embed domain check
    pub website: Option<String>,
    /// Partner's public landing page the badge links to
    pub partner_landing_url: Option<String>,
}

/// Defines relationships between Partner and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One partner has many certification attempts
    #[sea_orm(has_many = "super::certification_attempt::Entity")]
    CertificationAttempts,
}

impl Related<super::certification_attempt::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CertificationAttempts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
