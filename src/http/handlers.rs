//! Badge endpoint handlers.

use super::{AppState, with_badge_data_headers, with_badge_page_headers};
use crate::{
    core::{
        badge::{Theme, resolve_badge},
        domain::domain_matches,
    },
    errors::{Error, Result},
    render::{page, script},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use chrono::Utc;
use serde::Deserialize;
use std::borrow::Cow;
use tracing::{debug, instrument};

const JAVASCRIPT_CONTENT_TYPE: &str = "application/javascript; charset=utf-8";

/// Output form of `/badge-data`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BadgeFormat {
    /// The badge descriptor as JSON
    #[default]
    Json,
    /// The embeddable script
    Script,
}

impl BadgeFormat {
    /// Parses the `format` query value. Anything other than `js` means JSON.
    #[must_use]
    pub fn from_query(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("js") => Self::Script,
            _ => Self::Json,
        }
    }
}

/// Query string of `/badge-data`.
#[derive(Debug, Default, Deserialize)]
pub struct BadgeDataQuery {
    /// `json` (default) or `js`
    pub format: Option<String>,
    /// `light` (default) or `dark`
    pub theme: Option<String>,
}

/// Query string of `/badge-page`.
#[derive(Debug, Default, Deserialize)]
pub struct BadgePageQuery {
    /// `light` (default) or `dark`
    pub theme: Option<String>,
}

/// Parses a path partner id. Ids that are not integers cannot exist, so they are
/// reported as not found rather than as a bad request.
pub fn parse_partner_id(raw: &str) -> Result<i64> {
    raw.trim()
        .parse()
        .map_err(|_| Error::partner_not_found(raw))
}

/// A present header is always returned, decoded lossily, so a Referer with raw
/// UTF-8 still counts as sent and never falls through to Origin.
fn header_str(headers: &HeaderMap, name: header::HeaderName) -> Option<Cow<'_, str>> {
    headers
        .get(name)
        .map(|value| String::from_utf8_lossy(value.as_bytes()))
}

/// `GET /badge-data/:partner_id` - JSON descriptor or embeddable script.
#[instrument(skip(state, headers))]
pub async fn badge_data_handler(
    State(state): State<AppState>,
    Path(partner_id): Path<String>,
    query: Option<Query<BadgeDataQuery>>,
    headers: HeaderMap,
) -> Result<Response> {
    let query = query.map(|Query(q)| q).unwrap_or_default();
    let partner_id = parse_partner_id(&partner_id)?;
    let theme = Theme::from_query(query.theme.as_deref());
    let descriptor = resolve_badge(
        &state.database,
        partner_id,
        theme,
        &state.config.badge.date_format,
        Utc::now(),
    )
    .await?;

    let response = match BadgeFormat::from_query(query.format.as_deref()) {
        BadgeFormat::Json => Json(descriptor).into_response(),
        BadgeFormat::Script => {
            let domain_ok = domain_matches(
                descriptor.website.as_deref(),
                header_str(&headers, header::REFERER).as_deref(),
                header_str(&headers, header::ORIGIN).as_deref(),
            );
            let effective_valid = descriptor.is_valid && domain_ok;
            debug!(
                is_valid = descriptor.is_valid,
                domain_ok, effective_valid, "Rendering embed script"
            );

            let body =
                script::render_embed_script(&descriptor, effective_valid, &state.config.badge)?;
            (
                [(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static(JAVASCRIPT_CONTENT_TYPE),
                )],
                body,
            )
                .into_response()
        }
    };

    Ok(with_badge_data_headers(response))
}

/// `GET /badge-page/:partner_id` - standalone HTML badge for iframes.
#[instrument(skip(state))]
pub async fn badge_page_handler(
    State(state): State<AppState>,
    Path(partner_id): Path<String>,
    query: Option<Query<BadgePageQuery>>,
) -> Response {
    let query = query.map(|Query(q)| q).unwrap_or_default();
    let theme = Theme::from_query(query.theme.as_deref());
    let resolved = match parse_partner_id(&partner_id) {
        Ok(id) => {
            resolve_badge(
                &state.database,
                id,
                theme,
                &state.config.badge.date_format,
                Utc::now(),
            )
            .await
        }
        Err(e) => Err(e),
    };

    let response = match resolved {
        Ok(descriptor) => {
            Html(page::render_badge_page(&descriptor, &state.config.badge)).into_response()
        }
        Err(Error::PartnerNotFound { .. }) => {
            (StatusCode::NOT_FOUND, Html(page::render_not_found_page())).into_response()
        }
        Err(e) => e.into_response(),
    };

    with_badge_page_headers(response)
}

/// `GET /healthz` - liveness probe.
pub async fn healthz_handler() -> &'static str {
    "ok"
}
