//! Embed domain check for the script badge.
//!
//! A best-effort nudge against a badge snippet copied onto somebody else's site. It is
//! not an access control: whenever the check cannot be performed it allows the badge.

use tracing::debug;
use url::Url;

/// Returns whether the page requesting the badge plausibly belongs to the partner.
///
/// The requesting page is taken from `referer`, or from `origin` when there is no
/// referer. Hostnames are compared with a leading `www.` removed, and match when
/// either contains the other, which covers subdomains in both directions.
///
/// Returns `true` when the partner has no website, when no requesting host is known,
/// or when either URL fails to parse.
#[must_use]
pub fn domain_matches(website: Option<&str>, referer: Option<&str>, origin: Option<&str>) -> bool {
    let Some(website) = non_empty(website) else {
        return true;
    };

    let partner_host = match host_of(website) {
        Ok(Some(host)) => host,
        Ok(None) => return true,
        Err(e) => {
            debug!("Unparseable partner website {:?}: {}", website, e);
            return true;
        }
    };

    let Some(requesting_url) = non_empty(referer).or_else(|| non_empty(origin)) else {
        return true;
    };

    let requesting_host = match host_of(requesting_url) {
        Ok(Some(host)) => host,
        Ok(None) => return true,
        Err(e) => {
            debug!("Unparseable requesting url {:?}: {}", requesting_url, e);
            return true;
        }
    };

    let matched =
        partner_host.contains(&requesting_host) || requesting_host.contains(&partner_host);
    if !matched {
        debug!(
            partner_host = %partner_host,
            requesting_host = %requesting_host,
            "Badge requested from a foreign domain"
        );
    }
    matched
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Hostname of `raw` with any leading `www.` removed.
fn host_of(raw: &str) -> Result<Option<String>, url::ParseError> {
    let url = Url::parse(raw)?;
    Ok(url
        .host_str()
        .map(|host| host.strip_prefix("www.").unwrap_or(host).to_string())
        .filter(|host| !host.is_empty()))
}
