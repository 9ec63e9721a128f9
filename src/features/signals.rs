//! Signal computations shared by the versioned extractors, plus the
//! standalone raw-URL helpers built on them.

use std::collections::HashSet;

use crate::reference::{tables, ReferenceData};
use crate::url_parser::{normalize_with, shannon_entropy, tokenize_path, ParsedUrl, SuffixList};

/// Whitelist membership of the parsed domain. Requires a registered domain.
pub(crate) fn is_domain_whitelisted(parsed: &ParsedUrl, reference: &ReferenceData) -> bool {
    !parsed.registered_domain.is_empty()
        && reference.is_whitelisted(&parsed.registered_domain, &parsed.host)
}

/// Subdomain with dots removed, as scored by the host-entropy signals
pub(crate) fn cleaned_subdomain(parsed: &ParsedUrl) -> String {
    parsed.subdomain.to_lowercase().replace('.', "")
}

/// Weighted suspicious-token density of the path, smoothed by depth.
pub(crate) fn token_density_for(parsed: &ParsedUrl, reference: &ReferenceData) -> f64 {
    let path_tokens = tokenize_path(&parsed.path);
    let total = path_tokens.tokens.len();
    if total == 0 {
        return 0.0;
    }

    let weight_sum = reference.suspicious_weight_sum(&parsed.path.to_lowercase());
    if weight_sum <= 0.0 {
        return 0.0;
    }

    let depth = path_tokens.depth as f64;
    let denominator = depth + reference.weights().token_density_k;
    if denominator <= 0.0 {
        return 0.0;
    }
    (weight_sum / total as f64) * (depth / denominator)
}

/// True when a TLD-like token appears in the domain label, the subdomain
/// or the path without being the URL's real suffix.
pub(crate) fn fake_tld_hit<S: AsRef<str>>(parsed: &ParsedUrl, fake_tokens: &[S]) -> bool {
    let host = parsed.host.to_lowercase();
    let path = parsed.path.to_lowercase();
    let suffix = parsed.suffix.as_str();
    let domain = parsed.core_domain.as_str();

    let registered_tail = format!(".{}.{}", domain, suffix);
    let suffix_tail = format!(".{}", suffix);
    let prefix = if !domain.is_empty() && host.ends_with(&registered_tail) {
        &host[..host.len() - registered_tail.len()]
    } else if !suffix.is_empty() && host.ends_with(&suffix_tail) {
        &host[..host.len() - suffix_tail.len()]
    } else {
        host.as_str()
    };

    let domain_tokens: Vec<&str> = domain
        .split(|c: char| c == '-' || c == '.')
        .filter(|t| !t.is_empty())
        .collect();

    fake_tokens.iter().any(|fake| {
        let fake: &str = fake.as_ref();
        fake != suffix
            && (domain_tokens.contains(&fake)
                || prefix.split('.').any(|t| t == fake)
                || prefix.split('-').any(|t| t == fake)
                || path.split('/').any(|t| t == fake)
                || path.split('-').any(|t| t == fake))
    })
}

/// `P / (P + 1)` for `P` distinct query keys, blank values included.
pub(crate) fn param_count_boost(query: &str) -> f64 {
    let keys: HashSet<String> = url::form_urlencoded::parse(query.as_bytes())
        .map(|(key, _)| key.into_owned())
        .collect();
    let count = keys.len() as f64;
    if count > 0.0 {
        count / (count + 1.0)
    } else {
        0.0
    }
}

/// Normalized, length-weighted entropy of the subdomain, zero below four
/// characters.
pub(crate) fn weighted_host_entropy(parsed: &ParsedUrl) -> f64 {
    let sub = cleaned_subdomain(parsed);
    let length = sub.chars().count();
    if length < 4 {
        return 0.0;
    }
    let entropy_norm = (shannon_entropy(&sub) / 4.0).min(1.0);
    let length_factor = if length < 12 {
        length as f64 / 12.0
    } else {
        1.0
    };
    (entropy_norm * length_factor).clamp(0.0, 1.0)
}

/// `1` when the URL's domain is whitelisted (exact or parent domain).
pub fn domain_whitelist_score(url: &str, reference: &ReferenceData) -> u8 {
    let parsed = normalize_with(url, reference.suffixes());
    u8::from(is_domain_whitelisted(&parsed, reference))
}

/// Risk weight of the URL's public suffix; `0.0` for unknown suffixes and
/// globally neutral domains.
pub fn tld_risk_weight(url: &str, reference: &ReferenceData) -> f64 {
    let parsed = normalize_with(url, reference.suffixes());
    if parsed.is_empty() {
        return 0.0;
    }
    reference.tld_risk_for(&parsed)
}

/// Depth-smoothed suspicious-token density of the URL's path.
pub fn token_density(url: &str, reference: &ReferenceData) -> f64 {
    let parsed = normalize_with(url, reference.suffixes());
    token_density_for(&parsed, reference)
}

/// `1` when a TLD string is used as a token outside the real suffix,
/// e.g. `bbva.es-login.com`.
pub fn fake_tld_in_subdomain_or_path(url: &str) -> u8 {
    let parsed = normalize_with(url, SuffixList::embedded());
    if parsed.is_empty() {
        return 0;
    }
    u8::from(fake_tld_hit(&parsed, tables::FAKE_TLD_TOKENS))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> ReferenceData {
        ReferenceData::builder()
            .with_whitelist(["bbva.es"])
            .with_brands(["bbva"])
            .build()
    }

    #[test]
    fn test_fake_tld_detection() {
        assert_eq!(fake_tld_in_subdomain_or_path("https://bbva.es-login.com"), 1);
        assert_eq!(fake_tld_in_subdomain_or_path("https://clientes.bbva.es"), 0);
        assert_eq!(fake_tld_in_subdomain_or_path("https://secure.example.com/es/login"), 1);
        assert_eq!(fake_tld_in_subdomain_or_path(""), 0);
    }

    #[test]
    fn test_token_density_formula() {
        let reference = reference();
        let density = token_density("http://bbva.es-login.com/verificacion/pago", &reference);
        assert!((density - 0.875).abs() < 1e-12);
        assert_eq!(token_density("http://bbva.es/", &reference), 0.0);
        assert_eq!(token_density("http://bbva.es/inicio", &reference), 0.0);
    }

    #[test]
    fn test_token_density_uses_configured_k() {
        let reference = ReferenceData::builder()
            .with_weights(crate::reference::Weights {
                token_density_k: 0.0,
                ..Default::default()
            })
            .build();
        let density = token_density("http://x.com/pago", &reference);
        assert!((density - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_domain_whitelist_score() {
        let reference = reference();
        assert_eq!(domain_whitelist_score("https://bbva.es/login", &reference), 1);
        assert_eq!(domain_whitelist_score("www.bbva.es", &reference), 1);
        assert_eq!(domain_whitelist_score("https://bbva.es.example.com", &reference), 0);
        assert_eq!(domain_whitelist_score("", &reference), 0);
    }

    #[test]
    fn test_tld_risk_weight_unknown_is_zero() {
        let reference = reference();
        assert_eq!(tld_risk_weight("https://example.zz", &reference), 0.0);
        assert_eq!(tld_risk_weight("https://example.shop", &reference), 2.5);
        assert_eq!(tld_risk_weight("https://example.ru", &reference), 3.0);
        assert_eq!(tld_risk_weight("not a url at all", &reference), 0.0);
    }

    #[test]
    fn test_param_count_boost() {
        assert_eq!(param_count_boost(""), 0.0);
        assert_eq!(param_count_boost("a=1"), 0.5);
        assert!((param_count_boost("a=1&b=&a=2") - 2.0 / 3.0).abs() < 1e-12);
    }
}
