//! Certification settings entity - Global singleton holding badge presentation settings.
//! The row may be missing entirely; every field then falls back to a built-in default.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Certification settings database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "certification_settings")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Tooltip template with `{partnerName}`, `{expirationDate}` and `{score}` placeholders
    pub badge_hover_text: Option<String>,
    /// Badge image for light backgrounds
    pub badge_light_url: Option<String>,
    /// Badge image for dark backgrounds
    pub badge_dark_url: Option<String>,
    /// Alt text for the badge image
    pub badge_alt_text: Option<String>,
    /// When the settings were last modified
    pub updated_at: DateTimeUtc,
}

/// `CertificationSettings` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
