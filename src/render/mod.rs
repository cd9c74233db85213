//! Badge renderers - the embeddable script and the standalone iframe page.
//!
//! The JSON form needs no renderer; the HTTP layer serializes the descriptor directly.

/// Standalone HTML badge page for iframe embedding
pub mod page;
/// Self-contained script that draws the badge into a foreign page
pub mod script;

use crate::core::badge::BadgeDescriptor;
use url::Url;

/// Text badge label for a valid certification
pub const VALID_LABEL: &str = "Certified Partner";
/// Text badge label for an expired or otherwise invalid certification
pub const EXPIRED_LABEL: &str = "Certification Expired";

const VALID_COLOR: &str = "#2e7d32";
const EXPIRED_COLOR: &str = "#9e9e9e";

/// Base style of the badge image.
const IMAGE_STYLE: &str = "display:block;max-width:100%;height:auto;border:0;";
/// Added to the image style when the badge is not valid.
const INVALID_IMAGE_STYLE: &str =
    "filter:grayscale(100%);-webkit-filter:grayscale(100%);opacity:0.5;";

/// Inline style for the badge image.
#[must_use]
pub fn image_style(valid: bool) -> String {
    if valid {
        IMAGE_STYLE.to_string()
    } else {
        format!("{IMAGE_STYLE}{INVALID_IMAGE_STYLE}")
    }
}

/// Label of the text badge shown when no image is configured.
#[must_use]
pub const fn text_label(valid: bool) -> &'static str {
    if valid { VALID_LABEL } else { EXPIRED_LABEL }
}

/// Inline style of the text badge shown when no image is configured.
#[must_use]
pub fn text_badge_style(valid: bool) -> String {
    let background = if valid { VALID_COLOR } else { EXPIRED_COLOR };
    format!(
        "display:inline-block;padding:6px 12px;border-radius:4px;background:{background};\
         color:#ffffff;font:600 13px/1.4 -apple-system,BlinkMacSystemFont,'Segoe UI',\
         Helvetica,Arial,sans-serif;white-space:nowrap;"
    )
}

/// Tooltip text: the rendered hover text, or `expired_text` for invalid badges.
#[must_use]
pub fn tooltip_text<'a>(
    descriptor: &'a BadgeDescriptor,
    valid: bool,
    expired_text: &'a str,
) -> &'a str {
    if valid {
        &descriptor.hover_text
    } else {
        expired_text
    }
}

/// Where the badge links: the partner's landing page, or `default_url`.
///
/// Only absolute `http`/`https` landing URLs are linked.
#[must_use]
pub fn landing_href<'a>(descriptor: &'a BadgeDescriptor, default_url: &'a str) -> &'a str {
    descriptor
        .landing_url
        .as_deref()
        .map(str::trim)
        .filter(|url| is_web_url(url))
        .unwrap_or(default_url)
}

fn is_web_url(raw: &str) -> bool {
    Url::parse(raw).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}

/// Escapes HTML special characters in a string.
#[must_use]
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
