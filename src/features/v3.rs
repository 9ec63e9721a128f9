use tracing::trace;

use super::schema::FeatureSchema;
use super::signals::{cleaned_subdomain, is_domain_whitelisted};
use super::vector::{FeatureValue, FeatureVector};
use super::FeatureExtractor;
use crate::reference::ReferenceData;
use crate::url_parser::{
    last_path_segment, normalize_with, shannon_entropy, split_tokens, ParsedUrl,
    SEGMENT_SEPARATORS,
};

/// Seven-feature contract consumed by the v3 model.
#[derive(Debug, Clone, Copy, Default)]
pub struct V3Extractor;

impl V3Extractor {
    /// Entropy-heavy blend (0.78 / 0.22), damped below ten characters and
    /// compressed with a 0.55 power. Whitelisted domains score zero.
    pub fn domain_complexity(parsed: &ParsedUrl, whitelisted: bool) -> f64 {
        if whitelisted || parsed.registered_domain.is_empty() {
            return 0.0;
        }
        let length = parsed.registered_domain.chars().count() as f64;
        let entropy = shannon_entropy(&parsed.core_domain);

        let norm_length = (length / 18.0).min(1.0);
        let norm_entropy = (entropy / 3.8).min(1.0);
        let mut raw = 0.78 * norm_entropy + 0.22 * norm_length;
        if length < 10.0 {
            raw *= 0.35;
        }
        raw.powf(0.55).clamp(0.0, 1.0)
    }

    /// Raw subdomain entropy, zero below four characters
    fn host_entropy(parsed: &ParsedUrl) -> f64 {
        let sub = cleaned_subdomain(parsed);
        if sub.chars().count() < 4 {
            0.0
        } else {
            shannon_entropy(&sub)
        }
    }

    fn infra_risk(parsed: &ParsedUrl, reference: &ReferenceData) -> f64 {
        let weights = reference.weights();
        let http = if parsed.scheme == "http" {
            weights.http_weight
        } else {
            0.0
        };
        let free = if reference
            .free_hosting()
            .iter()
            .any(|h| *h == parsed.registered_domain)
        {
            weights.free_hosting_weight
        } else {
            0.0
        };
        http + reference.tld_risk_for(parsed) + free
    }

    fn brand_in_path(parsed: &ParsedUrl, reference: &ReferenceData, whitelisted: bool) -> bool {
        if whitelisted {
            return false;
        }
        let segment = last_path_segment(&parsed.path);
        split_tokens(&segment, &SEGMENT_SEPARATORS)
            .iter()
            .any(|token| reference.is_brand(token))
    }

    fn compute(&self, parsed: &ParsedUrl, reference: &ReferenceData) -> Vec<FeatureValue> {
        let whitelisted = is_domain_whitelisted(parsed, reference);
        vec![
            FeatureValue::Float(Self::domain_complexity(parsed, whitelisted)),
            FeatureValue::flag(whitelisted),
            FeatureValue::Int(i64::from(reference.trusted_token_context(parsed))),
            FeatureValue::Float(Self::host_entropy(parsed)),
            FeatureValue::Float(Self::infra_risk(parsed, reference)),
            FeatureValue::flag(Self::brand_in_path(parsed, reference, whitelisted)),
            FeatureValue::flag(reference.is_brand(&parsed.core_domain)),
        ]
    }
}

impl FeatureExtractor for V3Extractor {
    fn schema(&self) -> FeatureSchema {
        FeatureSchema::V3
    }

    fn default_vector(&self) -> FeatureVector {
        FeatureVector::degraded(
            FeatureSchema::V3,
            vec![
                FeatureValue::Float(0.0),
                FeatureValue::Int(0),
                FeatureValue::Int(-1),
                FeatureValue::Float(0.0),
                FeatureValue::Float(0.0),
                FeatureValue::Int(0),
                FeatureValue::Int(0),
            ],
        )
    }

    fn extract(&self, url: &str, reference: &ReferenceData) -> FeatureVector {
        let parsed = normalize_with(url, reference.suffixes());
        if parsed.is_empty() {
            trace!("v3 default vector for {:?}", url);
            return self.default_vector();
        }
        FeatureVector::new(FeatureSchema::V3, self.compute(&parsed, reference))
    }
}
