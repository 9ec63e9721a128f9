//! Versioned URL feature extractors.
//!
//! Each schema has its own extractor behind [`FeatureExtractor`]. Every
//! extractor is total: blank or unparseable input yields the schema's
//! default vector, flagged as degraded, with the contractual length.

pub mod schema;
pub mod signals;
pub mod v1;
pub mod v2;
pub mod v2_extended;
pub mod v3;
pub mod vector;

use crate::reference::ReferenceData;

pub use schema::{
    validate_columns, FeatureSchema, FEATURES_V1, FEATURES_V2, FEATURES_V2_EXTENDED, FEATURES_V3,
};
pub use signals::{domain_whitelist_score, fake_tld_in_subdomain_or_path, tld_risk_weight, token_density};
pub use v1::V1Extractor;
pub use v2::V2Extractor;
pub use v2_extended::V2ExtendedExtractor;
pub use v3::V3Extractor;
pub use vector::{FeatureValue, FeatureVector};

/// A pure mapping from a raw URL to one schema's feature vector.
pub trait FeatureExtractor: Send + Sync {
    fn schema(&self) -> FeatureSchema;

    /// The vector returned when extraction cannot proceed
    fn default_vector(&self) -> FeatureVector;

    /// Never fails; the result always has `schema().arity()` values.
    fn extract(&self, url: &str, reference: &ReferenceData) -> FeatureVector;
}

impl FeatureSchema {
    /// Extractor implementing this schema
    pub fn extractor(self) -> &'static dyn FeatureExtractor {
        match self {
            Self::V1 => &V1Extractor,
            Self::V2 => &V2Extractor,
            Self::V2Extended => &V2ExtendedExtractor,
            Self::V3 => &V3Extractor,
        }
    }
}

/// Extracts `url` with the extractor selected by `schema`.
pub fn extract_features(schema: FeatureSchema, url: &str, reference: &ReferenceData) -> FeatureVector {
    schema.extractor().extract(url, reference)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_schema_keeps_its_arity_on_garbage() {
        let reference = ReferenceData::builder()
            .with_whitelist(["bbva.es"])
            .with_brands(["bbva"])
            .build();
        let inputs = ["", "   ", "http://", "::::", "javascript:alert(1)", "ñ", "https://bbva.es"];
        for schema in FeatureSchema::ALL {
            for input in inputs {
                let features = extract_features(schema, input, &reference);
                assert_eq!(features.len(), schema.arity(), "{schema} on {input:?}");
                assert_eq!(features.schema, schema);
            }
        }
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let reference = ReferenceData::builder()
            .with_whitelist(["bbva.es"])
            .with_brands(["bbva"])
            .build();
        for schema in FeatureSchema::ALL {
            let first = extract_features(schema, "http://bbva.es-login.com/pago?x=1", &reference);
            let second = extract_features(schema, "http://bbva.es-login.com/pago?x=1", &reference);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_default_vectors_are_flagged() {
        for schema in FeatureSchema::ALL {
            let default = schema.extractor().default_vector();
            assert!(default.degraded);
            assert_eq!(default.len(), schema.arity());
        }
    }
}
