use std::collections::HashSet;

use tracing::trace;

use super::schema::FeatureSchema;
use super::vector::{FeatureValue, FeatureVector};
use super::FeatureExtractor;
use crate::reference::{DomainSet, ReferenceData};
use crate::url_parser::{normalize_with, shannon_entropy, split_tokens, ParsedUrl};

const ACTION_TOKENS: &[&str] = &[
    "verificar", "verify", "sms", "codigo", "clave", "paquete", "envio", "aduanas", "pago",
    "login", "clientes", "portal", "seguridad", "actualizar", "confirmar", "acceso",
];

const SUSPICIOUS_TOKENS: &[&str] = &[
    "php", "html", "index", "view", "principal", "confirmacion", "3d", "no-back-button", "asset",
    "secure",
];

const TRUSTED_TOKENS: &[&str] = &[
    "clientes", "empresas", "banca", "seguridad", "login", "soporte", "help", "status", "docs",
    "faq", "particulares", "personas", "area-cliente", "portal",
];

const FREE_HOSTING_SUFFIXES: &[&str] = &[
    "webcindario.com",
    "rf.gd",
    "000webhostapp.com",
    "blogspot.com",
    "sites.google.com",
    "web.app",
    "godaddysites.com",
    "replit.app",
    "tempsite.link",
    "github.io",
    "wixsite.com",
    "pages.dev",
];

const OAUTH_HOST_SUFFIXES: &[&str] = &[
    "login.microsoftonline.com",
    "accounts.google.com",
    "auth0.com",
    "okta.com",
    "id.atlassian.com",
    "appleid.apple.com",
];

const OAUTH_PATH_TOKENS: &[&str] = &[
    "authorize", "oauth", "callback", "redirect_uri", "signin", "sso", "login",
];

const TLD_HIGH_RISK: &[&str] = &["live", "xyz", "top", "monster", "cyou", "tk", "gq", "ml", "shop"];
const TLD_MID_RISK: &[&str] = &["app", "online", "site", "click", "link", "icu", "me", "info"];

const PATH_WORD_SEPARATORS: [char; 7] = ['-', '_', '/', '.', '?', '=', '&'];

fn host_matches(host: &str, suffix: &str) -> bool {
    host == suffix
        || host
            .strip_suffix(suffix)
            .map_or(false, |rest| rest.ends_with('.'))
}

/// Graded whitelist match on the full host: 1.0 exact, 0.6 subdomain.
pub fn whitelist_strength(host: &str, whitelist: &DomainSet) -> f64 {
    if host.is_empty() {
        0.0
    } else if whitelist.contains(host) {
        1.0
    } else if whitelist.matches_host(host) {
        0.6
    } else {
        0.0
    }
}

/// Tiered TLD risk: 1.0 for the high tier, 0.6 for the mid tier.
pub fn tiered_tld_risk(suffix: &str) -> f64 {
    if TLD_HIGH_RISK.contains(&suffix) {
        1.0
    } else if TLD_MID_RISK.contains(&suffix) {
        0.6
    } else {
        0.0
    }
}

/// Fifteen-feature variant with graded whitelist strength, tiered TLD risk
/// and relief for OAuth login flows on identity providers.
#[derive(Debug, Clone, Copy, Default)]
pub struct V2ExtendedExtractor;

impl V2ExtendedExtractor {
    fn compute(&self, parsed: &ParsedUrl, reference: &ReferenceData) -> Vec<FeatureValue> {
        let host = parsed.host.as_str();
        let domain = if parsed.core_domain.is_empty() {
            host
        } else {
            parsed.core_domain.as_str()
        };
        let domain_length = domain.chars().count() as f64;
        let domain_entropy = shannon_entropy(domain);
        let strength = whitelist_strength(host, reference.whitelist());

        let is_http = if parsed.scheme == "http" { 1.0 } else { 0.0 };

        let sub_clean = parsed.subdomain.replace('.', "");
        let host_entropy = if sub_clean.chars().count() < 3 {
            0.0
        } else {
            shannon_entropy(&sub_clean)
        };

        let free_hosting = FREE_HOSTING_SUFFIXES.iter().any(|s| host_matches(host, s));
        let free_hosting_score = if free_hosting { 1.0 } else { 0.0 };
        let entropy_norm = (domain_entropy / 4.5).clamp(0.0, 1.0);

        let path = parsed.path.to_lowercase();
        let words = split_tokens(&path, &PATH_WORD_SEPARATORS);
        let total_words = words.len().max(1) as f64;
        let action_hits = words
            .iter()
            .filter(|w| ACTION_TOKENS.contains(&w.as_str()))
            .count() as f64;
        let suspicious = words.iter().any(|w| SUSPICIOUS_TOKENS.contains(&w.as_str()));
        let trusted = words.iter().any(|w| TRUSTED_TOKENS.contains(&w.as_str()));
        let trusted_path_penalty = if strength >= 0.6 || !trusted { 0.0 } else { 1.0 };

        let keys: HashSet<String> = url::form_urlencoded::parse(parsed.query.as_bytes())
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, _)| key.into_owned())
            .collect();
        let segments = parsed.path.split('/').filter(|s| !s.is_empty()).count();
        let param_count_boost = keys.len() as f64 / segments.max(1) as f64;

        let oauth_host = OAUTH_HOST_SUFFIXES.iter().any(|s| host_matches(host, s));
        let oauth_path = OAUTH_PATH_TOKENS.iter().any(|t| path.contains(t));

        vec![
            FeatureValue::Float(domain_length),
            FeatureValue::Float(domain_entropy),
            FeatureValue::Float(domain_length * domain_entropy),
            FeatureValue::Float(tiered_tld_risk(&parsed.suffix)),
            FeatureValue::Float(host_entropy),
            FeatureValue::Float(param_count_boost),
            FeatureValue::Float(action_hits / total_words),
            FeatureValue::flag(trusted),
            FeatureValue::Float(trusted_path_penalty),
            FeatureValue::flag(suspicious),
            FeatureValue::Float(strength),
            FeatureValue::Float(is_http * (1.0 - strength)),
            FeatureValue::Float(free_hosting_score),
            FeatureValue::Float(free_hosting_score * entropy_norm * (1.0 - strength)),
            FeatureValue::flag(oauth_host && oauth_path),
        ]
    }
}

impl FeatureExtractor for V2ExtendedExtractor {
    fn schema(&self) -> FeatureSchema {
        FeatureSchema::V2Extended
    }

    fn default_vector(&self) -> FeatureVector {
        let values = FeatureSchema::V2Extended
            .feature_names()
            .iter()
            .map(|name| match *name {
                "trusted_path_token" | "suspicious_path_token" | "oauth_like_relief" => {
                    FeatureValue::Int(0)
                }
                _ => FeatureValue::Float(0.0),
            })
            .collect();
        FeatureVector::degraded(FeatureSchema::V2Extended, values)
    }

    fn extract(&self, url: &str, reference: &ReferenceData) -> FeatureVector {
        let parsed = normalize_with(url, reference.suffixes());
        if parsed.is_empty() {
            trace!("v2-extended default vector for {:?}", url);
            return self.default_vector();
        }
        FeatureVector::new(FeatureSchema::V2Extended, self.compute(&parsed, reference))
    }
}
