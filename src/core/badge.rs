//! Badge state resolution.
//!
//! Turns a partner's stored certification state, their best passing attempt, and the
//! settings singleton into a [`BadgeDescriptor`] that every output format renders.
//! Validity depends only on the certification flag and the expiry date; attempts only
//! contribute the displayed score.

use crate::{
    core::{partner, settings, template::render_template},
    entities::{certification_attempt, certification_settings, partner as partner_entity},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::ConnectionTrait;
use serde::Serialize;
use std::fmt::Write;
use tracing::{debug, instrument, warn};

/// Hover text used when no template is configured.
pub const DEFAULT_HOVER_TEMPLATE: &str =
    "{partnerName} is a certified partner. Valid until: {expirationDate}. Score: {score}";
/// Image alt text used when none is configured.
pub const DEFAULT_ALT_TEXT: &str = "Certified Partner Badge";
/// Placeholder value for a missing expiry date or score.
pub const NOT_AVAILABLE: &str = "N/A";

const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%d";

/// Badge colour scheme requested by the embedding page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Badge for light backgrounds
    #[default]
    Light,
    /// Badge for dark backgrounds
    Dark,
}

impl Theme {
    /// Parses the `theme` query value. Anything other than `dark` means light.
    #[must_use]
    pub fn from_query(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("dark") => Self::Dark,
            _ => Self::Light,
        }
    }

    /// Picks the configured image for this theme. There is no fallback between themes.
    #[must_use]
    pub fn badge_url(self, settings: Option<&certification_settings::Model>) -> Option<String> {
        let settings = settings?;
        match self {
            Self::Light => settings.badge_light_url.clone(),
            Self::Dark => settings.badge_dark_url.clone(),
        }
        .filter(|url| !url.trim().is_empty())
    }
}

/// Everything needed to display or verify a partner's badge.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeDescriptor {
    /// Partner primary key
    pub partner_id: i64,
    /// Company display name
    pub partner_name: String,
    /// Stored certification flag
    pub is_certified: bool,
    /// Certified and not expired
    pub is_valid: bool,
    /// Expiry date is set and in the past
    pub is_expired: bool,
    /// When the certification was granted
    pub certified_at: Option<DateTime<Utc>>,
    /// When the certification lapses
    pub expires_at: Option<DateTime<Utc>>,
    /// Highest score among passed attempts
    pub best_score: Option<f64>,
    /// Badge image for the requested theme
    pub badge_url: Option<String>,
    /// Rendered tooltip text
    pub hover_text: String,
    /// Image alt text
    pub alt_text: String,
    /// Partner landing page
    pub landing_url: Option<String>,
    /// Partner registered website
    pub website: Option<String>,
}

/// Returns whether a certification with the given expiry has lapsed at `now`.
#[must_use]
pub fn is_expired(expires_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    expires_at.is_some_and(|expires_at| expires_at < now)
}

/// Returns whether a certification is currently valid.
#[must_use]
pub fn is_valid(is_certified: bool, expires_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    is_certified && !is_expired(expires_at, now)
}

/// Formats a score as a rounded integer percentage, e.g. `87%`.
#[must_use]
pub fn format_score(score: Option<f64>) -> String {
    score.map_or_else(
        || NOT_AVAILABLE.to_string(),
        |score| format!("{:.0}%", score.round()),
    )
}

/// Formats an expiry date with a `chrono` format string.
///
/// An invalid format string falls back to ISO dates instead of failing the request.
#[must_use]
pub fn format_expiration(expires_at: Option<DateTime<Utc>>, date_format: &str) -> String {
    let Some(expires_at) = expires_at else {
        return NOT_AVAILABLE.to_string();
    };

    let mut formatted = String::new();
    if write!(formatted, "{}", expires_at.format(date_format)).is_err() {
        warn!("Invalid date format {:?}, using {}", date_format, FALLBACK_DATE_FORMAT);
        return expires_at.format(FALLBACK_DATE_FORMAT).to_string();
    }
    formatted
}

/// Builds the descriptor from already-loaded records.
#[must_use]
pub fn build_descriptor(
    partner: partner_entity::Model,
    best_attempt: Option<&certification_attempt::Model>,
    settings: Option<&certification_settings::Model>,
    theme: Theme,
    date_format: &str,
    now: DateTime<Utc>,
) -> BadgeDescriptor {
    let expires_at = partner.certification_expires_at;
    let best_score = best_attempt.map(|attempt| attempt.score);

    let template = settings
        .and_then(|s| s.badge_hover_text.as_deref())
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(DEFAULT_HOVER_TEMPLATE);
    let expiration = format_expiration(expires_at, date_format);
    let score = format_score(best_score);
    let hover_text = render_template(
        template,
        &[
            ("partnerName", partner.company_name.as_str()),
            ("expirationDate", expiration.as_str()),
            ("score", score.as_str()),
        ],
    );

    let alt_text = settings
        .and_then(|s| s.badge_alt_text.clone())
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ALT_TEXT.to_string());

    BadgeDescriptor {
        partner_id: partner.id,
        partner_name: partner.company_name,
        is_certified: partner.is_certified,
        is_valid: is_valid(partner.is_certified, expires_at, now),
        is_expired: is_expired(expires_at, now),
        certified_at: partner.certified_at,
        expires_at,
        best_score,
        badge_url: theme.badge_url(settings),
        hover_text,
        alt_text,
        landing_url: partner.partner_landing_url,
        website: partner.website,
    }
}

/// Loads a partner's badge state.
///
/// # Errors
/// Returns [`Error::PartnerNotFound`] if no partner has this id, or a database error.
#[instrument(skip(db, date_format))]
pub async fn resolve_badge<C>(
    db: &C,
    partner_id: i64,
    theme: Theme,
    date_format: &str,
    now: DateTime<Utc>,
) -> Result<BadgeDescriptor>
where
    C: ConnectionTrait,
{
    let partner = partner::get_partner_by_id(db, partner_id)
        .await?
        .ok_or_else(|| Error::partner_not_found(partner_id))?;
    let best_attempt = partner::get_best_passing_attempt(db, partner_id).await?;
    let settings = settings::get_settings(db).await?;

    let descriptor = build_descriptor(
        partner,
        best_attempt.as_ref(),
        settings.as_ref(),
        theme,
        date_format,
        now,
    );
    debug!(
        is_valid = descriptor.is_valid,
        is_expired = descriptor.is_expired,
        "Resolved badge"
    );
    Ok(descriptor)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::settings::{SettingsUpdate, upsert_settings};
    use crate::test_utils::*;
    use chrono::Duration;

    const DATE_FORMAT: &str = "%Y-%m-%d";

    fn settings_with(
        hover: Option<&str>,
        light: Option<&str>,
        dark: Option<&str>,
    ) -> certification_settings::Model {
        certification_settings::Model {
            id: 1,
            badge_hover_text: hover.map(str::to_string),
            badge_light_url: light.map(str::to_string),
            badge_dark_url: dark.map(str::to_string),
            badge_alt_text: None,
            updated_at: utc(2026, 1, 1),
        }
    }

    fn partner_model(
        is_certified: bool,
        expires_at: Option<DateTime<Utc>>,
    ) -> partner_entity::Model {
        partner_entity::Model {
            id: 7,
            company_name: "Acme".to_string(),
            is_certified,
            certified_at: is_certified.then(|| utc(2026, 1, 1)),
            certification_expires_at: expires_at,
            website: Some("https://acme.test".to_string()),
            partner_landing_url: None,
        }
    }

    #[test]
    fn test_uncertified_is_never_valid() {
        let now = utc(2026, 6, 1);
        for expires_at in [None, Some(now - Duration::days(1)), Some(now + Duration::days(1))] {
            assert!(!is_valid(false, expires_at, now));
        }
    }

    #[test]
    fn test_certified_past_expiry_is_expired() {
        let now = utc(2026, 6, 1);
        let expires_at = Some(now - Duration::seconds(1));
        assert!(is_expired(expires_at, now));
        assert!(!is_valid(true, expires_at, now));
    }

    #[test]
    fn test_certified_without_or_future_expiry_is_valid() {
        let now = utc(2026, 6, 1);
        assert!(is_valid(true, None, now));
        assert!(is_valid(true, Some(now + Duration::days(30)), now));
        // Expiring exactly now is not yet expired.
        assert!(is_valid(true, Some(now), now));
    }

    #[test]
    fn test_theme_from_query() {
        assert_eq!(Theme::from_query(None), Theme::Light);
        assert_eq!(Theme::from_query(Some("dark")), Theme::Dark);
        assert_eq!(Theme::from_query(Some("DARK")), Theme::Dark);
        assert_eq!(Theme::from_query(Some("light")), Theme::Light);
        assert_eq!(Theme::from_query(Some("purple")), Theme::Light);
    }

    #[test]
    fn test_dark_theme_does_not_fall_back_to_light() {
        let settings = settings_with(None, Some("https://cdn.test/light.png"), None);
        assert_eq!(Theme::Dark.badge_url(Some(&settings)), None);
        assert_eq!(
            Theme::Light.badge_url(Some(&settings)).as_deref(),
            Some("https://cdn.test/light.png")
        );
        assert_eq!(Theme::Light.badge_url(None), None);
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(None), "N/A");
        assert_eq!(format_score(Some(86.6)), "87%");
        assert_eq!(format_score(Some(72.5)), "73%");
        assert_eq!(format_score(Some(100.0)), "100%");
    }

    #[test]
    fn test_format_expiration() {
        assert_eq!(format_expiration(None, DATE_FORMAT), "N/A");
        assert_eq!(
            format_expiration(Some(utc(2027, 3, 9)), "%B %-d, %Y"),
            "March 9, 2027"
        );
    }

    #[test]
    fn test_hover_text_uses_na_for_missing_values() {
        let settings = settings_with(
            Some("{partnerName} | {expirationDate} | {score}"),
            None,
            None,
        );
        let descriptor = build_descriptor(
            partner_model(true, None),
            None,
            Some(&settings),
            Theme::Light,
            DATE_FORMAT,
            utc(2026, 6, 1),
        );
        assert_eq!(descriptor.hover_text, "Acme | N/A | N/A");
        assert!(descriptor.is_valid);
        assert!(descriptor.best_score.is_none());
    }

    #[test]
    fn test_defaults_without_settings() {
        let attempt = certification_attempt::Model {
            id: 1,
            partner_id: 7,
            score: 91.2,
            passed: true,
            completed_at: utc(2026, 1, 1),
        };
        let descriptor = build_descriptor(
            partner_model(true, Some(utc(2027, 1, 1))),
            Some(&attempt),
            None,
            Theme::Dark,
            DATE_FORMAT,
            utc(2026, 6, 1),
        );
        assert_eq!(
            descriptor.hover_text,
            "Acme is a certified partner. Valid until: 2027-01-01. Score: 91%"
        );
        assert_eq!(descriptor.alt_text, DEFAULT_ALT_TEXT);
        assert!(descriptor.badge_url.is_none());
        assert_eq!(descriptor.best_score, Some(91.2));
    }

    #[test]
    fn test_descriptor_json_shape() {
        let descriptor = build_descriptor(
            partner_model(false, None),
            None,
            None,
            Theme::Light,
            DATE_FORMAT,
            utc(2026, 6, 1),
        );
        let json = serde_json::to_value(&descriptor).unwrap();
        for key in [
            "partnerId",
            "partnerName",
            "isCertified",
            "isValid",
            "isExpired",
            "certifiedAt",
            "expiresAt",
            "bestScore",
            "badgeUrl",
            "hoverText",
            "altText",
            "landingUrl",
            "website",
        ] {
            assert!(json.get(key).is_some(), "missing key {key}");
        }
        assert!(json["badgeUrl"].is_null());
        assert_eq!(json["partnerId"], 7);
    }

    #[tokio::test]
    async fn test_resolve_badge_integration() -> Result<()> {
        let db = setup_test_db().await?;
        let now = utc(2026, 6, 1);
        let partner = create_certified_partner(&db, "Acme", Some(utc(2027, 1, 1))).await?;
        create_test_attempt(&db, partner.id, 64.0, false).await?;
        create_test_attempt(&db, partner.id, 82.0, true).await?;
        create_test_attempt(&db, partner.id, 90.0, true).await?;
        upsert_settings(
            &db,
            SettingsUpdate {
                badge_hover_text: Some("{partnerName} scored {score}".to_string()),
                badge_dark_url: Some("https://cdn.test/dark.png".to_string()),
                badge_alt_text: Some("Acme badge".to_string()),
                ..Default::default()
            },
        )
        .await?;

        let descriptor = resolve_badge(&db, partner.id, Theme::Dark, DATE_FORMAT, now).await?;
        assert!(descriptor.is_certified);
        assert!(descriptor.is_valid);
        assert!(!descriptor.is_expired);
        assert_eq!(descriptor.best_score, Some(90.0));
        assert_eq!(descriptor.hover_text, "Acme scored 90%");
        assert_eq!(descriptor.alt_text, "Acme badge");
        assert_eq!(descriptor.badge_url.as_deref(), Some("https://cdn.test/dark.png"));

        let light = resolve_badge(&db, partner.id, Theme::Light, DATE_FORMAT, now).await?;
        assert!(light.badge_url.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_resolve_badge_expired_partner() -> Result<()> {
        let db = setup_test_db().await?;
        let partner = create_certified_partner(&db, "Lapsed", Some(utc(2026, 1, 1))).await?;

        let descriptor =
            resolve_badge(&db, partner.id, Theme::Light, DATE_FORMAT, utc(2026, 6, 1)).await?;
        assert!(descriptor.is_certified);
        assert!(descriptor.is_expired);
        assert!(!descriptor.is_valid);
        Ok(())
    }

    #[tokio::test]
    async fn test_resolve_badge_unknown_partner() -> Result<()> {
        let db = setup_test_db().await?;
        let result = resolve_badge(&db, 404, Theme::Light, DATE_FORMAT, utc(2026, 6, 1)).await;
        assert!(matches!(result, Err(Error::PartnerNotFound { .. })));
        Ok(())
    }
}
