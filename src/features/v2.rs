use tracing::{debug, trace};

use super::schema::FeatureSchema;
use super::signals::{
    fake_tld_hit, is_domain_whitelisted, param_count_boost, token_density_for,
    weighted_host_entropy,
};
use super::vector::{FeatureValue, FeatureVector};
use super::FeatureExtractor;
use crate::reference::ReferenceData;
use crate::url_parser::{normalize_with, shannon_entropy, ParsedUrl};

/// Position of `trusted_token_context` in the v2 vector
const TRUSTED_CONTEXT_IDX: usize = 5;

/// Nine numeric features built around domain complexity, infrastructure
/// risk and path token density.
#[derive(Debug, Clone, Copy, Default)]
pub struct V2Extractor;

impl V2Extractor {
    /// Blend of normalized entropy (0.65) and length (0.35); short domains
    /// are damped and whitelisted domains score zero.
    pub fn domain_complexity(parsed: &ParsedUrl, whitelisted: bool) -> f64 {
        if whitelisted {
            return 0.0;
        }
        let length = parsed.registered_domain.chars().count() as f64;
        let entropy = shannon_entropy(&parsed.core_domain);

        let norm_length = (length / 20.0).clamp(0.0, 1.0);
        let norm_entropy = (entropy / 4.0).clamp(0.0, 1.0);
        let mut raw = 0.65 * norm_entropy + 0.35 * norm_length;
        if length < 10.0 {
            raw *= 0.55;
        }
        raw.clamp(0.0, 1.0)
    }

    fn infra_risk(parsed: &ParsedUrl, reference: &ReferenceData) -> f64 {
        let weights = reference.weights();
        let http = if parsed.scheme == "http" {
            weights.http_weight
        } else {
            0.0
        };
        let free = if reference.mentions_free_hosting(&parsed.netloc) {
            weights.free_hosting_weight
        } else {
            0.0
        };
        http + reference.tld_risk_for(parsed) + free
    }

    /// Registered `.es` domain serving well-known CMS paths
    fn is_compromised_es(parsed: &ParsedUrl, reference: &ReferenceData) -> bool {
        let path = parsed.path.to_lowercase();
        parsed.registered_domain.ends_with(".es")
            && reference
                .compromise_patterns()
                .iter()
                .any(|p| path.contains(p.as_str()))
    }

    fn compromised_vector() -> Vec<FeatureValue> {
        let mut values = vec![FeatureValue::Float(0.0); FeatureSchema::V2.arity()];
        values[2] = FeatureValue::Float(1.0);
        values
    }

    fn compute(&self, parsed: &ParsedUrl, reference: &ReferenceData) -> Vec<FeatureValue> {
        if Self::is_compromised_es(parsed, reference) {
            debug!("Compromised .es host override for {}", parsed.host);
            return Self::compromised_vector();
        }

        let whitelisted = is_domain_whitelisted(parsed, reference);
        let path = parsed.path.to_lowercase();
        let suspicious = reference
            .suspicious_tokens()
            .iter()
            .any(|t| path.contains(t.as_str()));

        [
            Self::domain_complexity(parsed, whitelisted),
            weighted_host_entropy(parsed),
            f64::from(u8::from(whitelisted)),
            f64::from(u8::from(suspicious)),
            token_density_for(parsed, reference),
            f64::from(reference.trusted_token_context(parsed)),
            Self::infra_risk(parsed, reference),
            f64::from(u8::from(fake_tld_hit(parsed, reference.fake_tld_tokens()))),
            param_count_boost(&parsed.query),
        ]
        .into_iter()
        .map(FeatureValue::Float)
        .collect()
    }
}

impl FeatureExtractor for V2Extractor {
    fn schema(&self) -> FeatureSchema {
        FeatureSchema::V2
    }

    fn default_vector(&self) -> FeatureVector {
        let mut values = vec![FeatureValue::Float(0.0); FeatureSchema::V2.arity()];
        values[TRUSTED_CONTEXT_IDX] = FeatureValue::Float(-1.0);
        FeatureVector::degraded(FeatureSchema::V2, values)
    }

    fn extract(&self, url: &str, reference: &ReferenceData) -> FeatureVector {
        let parsed = normalize_with(url, reference.suffixes());
        if parsed.is_empty() {
            trace!("v2 default vector for {:?}", url);
            return self.default_vector();
        }
        FeatureVector::new(FeatureSchema::V2, self.compute(&parsed, reference))
    }
}
