//! Certification attempt entity - One completed exam submission by a partner.
//!
//! Each attempt has a `partner_id`, a `score` in the 0-100 range, a `passed` flag
//! and the `completed_at` timestamp.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Certification attempt database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "certification_attempts")]
pub struct Model {
    /// Unique identifier for the attempt
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the partner who took the exam
    pub partner_id: i64,
    /// Exam score as a percentage
    pub score: f64,
    /// Whether the attempt met the pass mark
    pub passed: bool,
    /// When the exam was submitted
    pub completed_at: DateTimeUtc,
}

/// Defines relationships between `CertificationAttempt` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each attempt belongs to one partner
    #[sea_orm(
        belongs_to = "super::partner::Entity",
        from = "Column::PartnerId",
        to = "super::partner::Column::Id"
    )]
    Partner,
}

impl Related<super::partner::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Partner.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
