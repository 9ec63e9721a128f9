//! Phishing risk features and heuristic scores for URLs aimed at Spanish
//! users and brands.

pub mod batch;
pub mod config;
pub mod error;
pub mod features;
pub mod reference;
pub mod scoring;
pub mod url_parser;
pub mod utils;

pub use error::{PhishError, Result};
pub use features::{extract_features, FeatureExtractor, FeatureSchema, FeatureVector};
pub use reference::{load_reference_data, ReferenceData};
pub use scoring::{score_url, ScoreResult, ScorerVersion};
