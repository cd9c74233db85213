//! Standalone badge page for `<iframe>` embedding.
//!
//! The document carries all of its styling, loads nothing else, and reflects the
//! stored validity (no domain check: the page is addressed by partner id).

use super::{escape_html, image_style, landing_href, text_badge_style, text_label, tooltip_text};
use crate::{config::BadgeConfig, core::badge::BadgeDescriptor};

const TOOLTIP_STYLE: &str = "position:absolute;left:50%;top:100%;transform:translateX(-50%);\
margin-top:6px;padding:6px 10px;border-radius:4px;background:#212121;color:#ffffff;\
font:12px/1.4 -apple-system,BlinkMacSystemFont,'Segoe UI',Helvetica,Arial,sans-serif;\
width:max-content;max-width:240px;text-align:center;z-index:10;pointer-events:none;";

/// Renders the full badge document.
#[must_use]
pub fn render_badge_page(descriptor: &BadgeDescriptor, config: &BadgeConfig) -> String {
    let valid = descriptor.is_valid;
    let href = escape_html(landing_href(descriptor, &config.default_landing_url));
    let tooltip = escape_html(tooltip_text(descriptor, valid, &config.expired_text));
    let alt = escape_html(&descriptor.alt_text);
    let title = escape_html(&descriptor.partner_name);

    let badge = descriptor.badge_url.as_deref().map_or_else(
        || {
            format!(
                r#"<span style="{style}">{label}</span>"#,
                style = text_badge_style(valid),
                label = text_label(valid),
            )
        },
        |url| {
            format!(
                r#"<img src="{src}" alt="{alt}" style="{style}">"#,
                src = escape_html(url),
                style = image_style(valid),
            )
        },
    );

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<meta name="robots" content="noindex">
<title>{title} - {alt}</title>
<style>
.badge .badge-tooltip {{ visibility: hidden; opacity: 0; transition: opacity .15s; }}
.badge:hover .badge-tooltip {{ visibility: visible; opacity: 1; }}
</style>
</head>
<body style="margin:0;padding:8px;background:transparent;">
<div class="badge" style="position:relative;display:inline-block;" data-valid="{valid}">
<a href="{href}" target="_blank" rel="noopener noreferrer" style="display:inline-block;text-decoration:none;">{badge}</a>
<span class="badge-tooltip" role="tooltip" style="{TOOLTIP_STYLE}">{tooltip}</span>
</div>
</body>
</html>
"#
    )
}

/// Renders the page served for unknown partners.
#[must_use]
pub fn render_not_found_page() -> String {
    r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="robots" content="noindex">
<title>Badge not found</title>
</head>
<body style="margin:0;padding:8px;background:transparent;font:13px/1.4 -apple-system,BlinkMacSystemFont,'Segoe UI',Helvetica,Arial,sans-serif;color:#616161;">
<p style="margin:0;">Badge not found.</p>
</body>
</html>
"#
    .to_string()
}
