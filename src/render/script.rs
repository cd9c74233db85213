//! Embeddable badge script.
//!
//! The generated script finds its own `<script>` element and inserts the badge right
//! after it. Partner-derived values travel as one JSON object literal passed to a
//! fixed function body, so nothing from the database is ever spliced into code.

use super::{image_style, landing_href, text_badge_style, text_label, tooltip_text};
use crate::{config::BadgeConfig, core::badge::BadgeDescriptor, errors::Result};
use serde::Serialize;

const SCRIPT_BODY: &str = include_str!("badge_embed.js");

/// Data consumed by the client-side badge builder.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EmbedPayload<'a> {
    href: &'a str,
    image_url: Option<&'a str>,
    alt_text: &'a str,
    image_style: String,
    label: &'a str,
    label_style: String,
    tooltip: &'a str,
    valid: bool,
}

/// Renders the embeddable script.
///
/// `effective_valid` is the certification validity after the embed domain check;
/// when false the badge is desaturated and the tooltip shows the expired message.
pub fn render_embed_script(
    descriptor: &BadgeDescriptor,
    effective_valid: bool,
    config: &BadgeConfig,
) -> Result<String> {
    let payload = EmbedPayload {
        href: landing_href(descriptor, &config.default_landing_url),
        image_url: descriptor.badge_url.as_deref(),
        alt_text: &descriptor.alt_text,
        image_style: image_style(effective_valid),
        label: text_label(effective_valid),
        label_style: text_badge_style(effective_valid),
        tooltip: tooltip_text(descriptor, effective_valid, &config.expired_text),
        valid: effective_valid,
    };

    // `</` cannot close an enclosing script element if the output is ever inlined.
    let payload = serde_json::to_string(&payload)?.replace("</", "<\\/");

    Ok(format!("(function (badge) {{\n{SCRIPT_BODY}}})({payload});\n"))
}
