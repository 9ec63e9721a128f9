use serde::Serialize;
use tracing::{debug, trace};
use url::{Host, Url};

use super::suffix::SuffixList;

/// A raw URL decomposed into the parts every extractor works from.
///
/// Built by [`normalize`] / [`normalize_with`]. Unparseable input yields
/// `ParsedUrl::default()`, where every field is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedUrl {
    /// Trimmed input with `http://` prepended when no scheme was present
    pub normalized: String,
    pub scheme: String,
    /// Authority as written (userinfo and port included), lower-cased
    pub netloc: String,
    pub host: String,
    pub registered_domain: String,
    pub core_domain: String,
    pub subdomain: String,
    pub suffix: String,
    pub path: String,
    pub decoded_path: String,
    pub query: String,
    pub is_ip: bool,
}

impl ParsedUrl {
    /// True when parsing failed or the input was blank
    pub fn is_empty(&self) -> bool {
        self.host.is_empty()
    }
}

/// Authority, path and query exactly as they appear in the text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawComponents<'a> {
    pub netloc: &'a str,
    pub path: &'a str,
    pub query: &'a str,
}

/// Trims `raw` and prepends `http://` unless it already carries an
/// `http://` or `https://` prefix (case-insensitive).
pub fn ensure_scheme(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    }
}

/// Splits `text` into netloc, path and query without any re-encoding.
///
/// Text without `://` has no authority; everything before `?` is path.
pub fn split_components(text: &str) -> RawComponents<'_> {
    let without_fragment = text.split('#').next().unwrap_or_default();
    let (netloc, rest) = match without_fragment.find("://") {
        Some(idx) => {
            let after = &without_fragment[idx + 3..];
            let end = after.find(|c: char| c == '/' || c == '?').unwrap_or(after.len());
            (&after[..end], &after[end..])
        }
        None => ("", without_fragment),
    };
    let (path, query) = match rest.split_once('?') {
        Some((path, query)) => (path, query),
        None => (rest, ""),
    };
    RawComponents {
        netloc,
        path,
        query,
    }
}

/// Normalizes `raw` against the embedded public suffix list.
pub fn normalize(raw: &str) -> ParsedUrl {
    normalize_with(raw, SuffixList::embedded())
}

/// Normalizes `raw` against `suffixes`. Never fails: any parse problem
/// produces the all-empty [`ParsedUrl`].
pub fn normalize_with(raw: &str, suffixes: &SuffixList) -> ParsedUrl {
    match try_normalize(raw, suffixes) {
        Some(parsed) => parsed,
        None => {
            debug!("Could not normalize URL: {:?}", raw);
            ParsedUrl::default()
        }
    }
}

/// Host in Unicode form; `url` hands back punycode for IDN labels.
fn unicode_host(domain: &str) -> String {
    let domain = domain.trim_end_matches('.');
    let (decoded, result) = idna::domain_to_unicode(domain);
    match result {
        Ok(()) => decoded.to_lowercase(),
        Err(_) => {
            trace!("Keeping ASCII form of undecodable host {}", domain);
            domain.to_lowercase()
        }
    }
}

fn try_normalize(raw: &str, suffixes: &SuffixList) -> Option<ParsedUrl> {
    let normalized = ensure_scheme(raw);
    if normalized.is_empty() {
        return None;
    }

    let url = Url::parse(&normalized).ok()?;
    let (host, is_ip) = match url.host()? {
        Host::Domain(domain) => (unicode_host(domain), false),
        Host::Ipv4(addr) => (addr.to_string(), true),
        Host::Ipv6(addr) => (addr.to_string(), true),
    };
    if host.is_empty() {
        return None;
    }

    let parts = if is_ip {
        Default::default()
    } else {
        suffixes.split(&host)
    };
    let components = split_components(&normalized);
    let decoded_path = urlencoding::decode(components.path)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| components.path.to_string());

    let parsed = ParsedUrl {
        scheme: url.scheme().to_string(),
        netloc: components.netloc.to_lowercase(),
        registered_domain: parts.registered(),
        core_domain: parts.core,
        subdomain: parts.subdomain,
        suffix: parts.suffix,
        path: components.path.to_string(),
        decoded_path,
        query: components.query.to_string(),
        host,
        is_ip,
        normalized,
    };
    trace!(
        "Normalized {} -> registered={} core={} subdomain={}",
        parsed.normalized,
        parsed.registered_domain,
        parsed.core_domain,
        parsed.subdomain
    );
    Some(parsed)
}
