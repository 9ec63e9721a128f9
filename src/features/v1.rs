use tracing::trace;

use super::schema::FeatureSchema;
use super::vector::{FeatureValue, FeatureVector};
use super::FeatureExtractor;
use crate::reference::ReferenceData;
use crate::url_parser::{normalize_with, shannon_entropy, ParsedUrl};

/// Free-hosting markers matched inside the registered domain
pub const V1_FREE_HOSTINGS: &[&str] = &[
    "webcindario.com",
    "000webhostapp.com",
    "rf.gd",
    "hol.es",
    "biz.nf",
    "blogspot.com",
    "wordpress.com",
    "weebly.com",
    "wix.com",
    "web.app",
    "firebaseapp.com",
    "sites.google.com",
    "godaddysites.com",
    "ead.me",
    "ucoz.net",
    "tk",
    "ml",
    "ga",
    "cf",
    "gq",
];

/// Ten lexical features; `tld_group` is categorical.
#[derive(Debug, Clone, Copy, Default)]
pub struct V1Extractor;

impl V1Extractor {
    fn compute(&self, parsed: &ParsedUrl, reference: &ReferenceData) -> Vec<FeatureValue> {
        let url = parsed.normalized.as_str();
        let path = parsed.path.to_lowercase();
        let core = parsed.core_domain.as_str();
        let registered = parsed.registered_domain.to_lowercase();

        let num_params = if parsed.query.is_empty() {
            0
        } else {
            parsed.query.split('&').count() as i64
        };
        let trusted = reference
            .trusted_tokens()
            .iter()
            .any(|t| path.contains(t.as_str()));
        let suspicious = reference
            .suspicious_tokens()
            .iter()
            .any(|t| path.contains(t.as_str()));
        let free_hosting = V1_FREE_HOSTINGS.iter().any(|h| registered.contains(h));
        let tld_group = match parsed.suffix.as_str() {
            "es" => "es",
            "com" => "com",
            _ => "otros",
        };

        vec![
            FeatureValue::Int(core.chars().count() as i64),
            FeatureValue::Float(shannon_entropy(core)),
            FeatureValue::Int(num_params),
            FeatureValue::flag(trusted),
            FeatureValue::flag(url.contains('%')),
            FeatureValue::flag(url.contains('=')),
            FeatureValue::flag(suspicious),
            FeatureValue::flag(free_hosting),
            FeatureValue::flag(url.starts_with("https")),
            FeatureValue::Category(tld_group),
        ]
    }
}

impl FeatureExtractor for V1Extractor {
    fn schema(&self) -> FeatureSchema {
        FeatureSchema::V1
    }

    fn default_vector(&self) -> FeatureVector {
        let mut values = vec![FeatureValue::Int(0); FeatureSchema::V1.arity()];
        values[1] = FeatureValue::Float(0.0);
        values[9] = FeatureValue::Category("otros");
        FeatureVector::degraded(FeatureSchema::V1, values)
    }

    fn extract(&self, url: &str, reference: &ReferenceData) -> FeatureVector {
        let parsed = normalize_with(url, reference.suffixes());
        if parsed.is_empty() {
            trace!("v1 default vector for {:?}", url);
            return self.default_vector();
        }
        FeatureVector::new(FeatureSchema::V1, self.compute(&parsed, reference))
    }
}
