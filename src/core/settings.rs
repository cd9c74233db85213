//! Certification settings singleton.
//!
//! The settings row is optional. Readers treat a missing row as "every field unset";
//! the only writer in this crate is the seeder.

use crate::{
    entities::{CertificationSettings, certification_settings},
    errors::Result,
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::debug;

/// Values written to the settings singleton.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsUpdate {
    /// Tooltip template
    pub badge_hover_text: Option<String>,
    /// Light theme badge image
    pub badge_light_url: Option<String>,
    /// Dark theme badge image
    pub badge_dark_url: Option<String>,
    /// Badge image alt text
    pub badge_alt_text: Option<String>,
}

/// Retrieves the settings singleton, or `None` if it was never written.
///
/// Should several rows exist, the one with the lowest id wins.
pub async fn get_settings<C>(db: &C) -> Result<Option<certification_settings::Model>>
where
    C: ConnectionTrait,
{
    CertificationSettings::find()
        .order_by_asc(certification_settings::Column::Id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates or replaces the settings singleton.
pub async fn upsert_settings<C>(
    db: &C,
    update: SettingsUpdate,
) -> Result<certification_settings::Model>
where
    C: ConnectionTrait,
{
    let now = Utc::now();

    if let Some(existing) = get_settings(db).await? {
        debug!("Updating certification settings row {}", existing.id);
        let mut active_model: certification_settings::ActiveModel = existing.into();
        active_model.badge_hover_text = Set(update.badge_hover_text);
        active_model.badge_light_url = Set(update.badge_light_url);
        active_model.badge_dark_url = Set(update.badge_dark_url);
        active_model.badge_alt_text = Set(update.badge_alt_text);
        active_model.updated_at = Set(now);
        active_model.update(db).await.map_err(Into::into)
    } else {
        debug!("Creating certification settings row");
        let new_settings = certification_settings::ActiveModel {
            badge_hover_text: Set(update.badge_hover_text),
            badge_light_url: Set(update.badge_light_url),
            badge_dark_url: Set(update.badge_dark_url),
            badge_alt_text: Set(update.badge_alt_text),
            updated_at: Set(now),
            ..Default::default()
        };
        new_settings.insert(db).await.map_err(Into::into)
    }
}
