use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{PhishError, Result};

pub const FEATURES_V1: [&str; 10] = [
    "domain_length",
    "domain_entropy",
    "num_params",
    "trusted_path_token",
    "contains_percent",
    "contains_equal",
    "suspicious_path_token",
    "free_hosting",
    "protocol",
    "tld_group",
];

pub const FEATURES_V2: [&str; 9] = [
    "domain_complexity",
    "host_entropy",
    "domain_whitelist_score",
    "suspicious_path_token",
    "token_density",
    "trusted_token_context",
    "infra_risk",
    "fake_tld_in_subdomain_or_path",
    "param_count_boost",
];

pub const FEATURES_V2_EXTENDED: [&str; 15] = [
    "domain_length",
    "domain_entropy",
    "domain_complexity",
    "tld_risk_weight",
    "host_entropy",
    "param_count_boost",
    "token_density",
    "trusted_path_token",
    "trusted_path_penalty",
    "suspicious_path_token",
    "whitelist_strength",
    "protocol_context_penalty",
    "free_hosting_score",
    "free_hosting_weighted",
    "oauth_like_relief",
];

pub const FEATURES_V3: [&str; 7] = [
    "domain_complexity",
    "domain_whitelist",
    "trusted_token_context",
    "host_entropy",
    "infra_risk",
    "brand_in_path",
    "brand_match_flag",
];

/// Version tag selecting a feature contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeatureSchema {
    V1,
    V2,
    V2Extended,
    V3,
}

impl FeatureSchema {
    pub const ALL: [FeatureSchema; 4] = [Self::V1, Self::V2, Self::V2Extended, Self::V3];

    /// Column names in contractual order
    pub fn feature_names(self) -> &'static [&'static str] {
        match self {
            Self::V1 => &FEATURES_V1,
            Self::V2 => &FEATURES_V2,
            Self::V2Extended => &FEATURES_V2_EXTENDED,
            Self::V3 => &FEATURES_V3,
        }
    }

    pub fn arity(self) -> usize {
        self.feature_names().len()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::V1 => "v1",
            Self::V2 => "v2",
            Self::V2Extended => "v2-extended",
            Self::V3 => "v3",
        }
    }
}

impl std::fmt::Display for FeatureSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order-sensitive equality between observed and expected column lists.
pub fn validate_columns<O, E>(observed: &[O], expected: &[E]) -> Result<()>
where
    O: AsRef<str>,
    E: AsRef<str>,
{
    let same = observed.len() == expected.len()
        && observed
            .iter()
            .zip(expected)
            .all(|(o, e)| o.as_ref() == e.as_ref());
    if same {
        return Ok(());
    }
    Err(PhishError::SchemaMismatch {
        expected: expected.iter().map(|e| e.as_ref().to_string()).collect(),
        observed: observed.iter().map(|o| o.as_ref().to_string()).collect(),
    })
}
