//! Rule-based phishing scorers.
//!
//! Each scorer walks a fixed, ordered rule list and accumulates points and
//! signal tags. Rules are additive; several can fire on one URL.

pub mod fuzzy;
pub mod lexicon;
pub mod v1;
pub mod v2;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::url_parser::split_components;

pub use v1::score_url_v1;
pub use v2::score_url_v2;

/// Minimum fuzzy similarity counted as a match
pub const FUZZY_THRESHOLD: f64 = 80.0;

/// Integer score plus the tags of every rule that fired, in firing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScoreResult {
    pub score: i32,
    pub signals: Vec<String>,
}

impl ScoreResult {
    pub fn push(&mut self, delta: i32, signal: impl Into<String>) {
        self.score += delta;
        self.signals.push(signal.into());
    }

    /// Signals joined with `;`
    pub fn joined(&self) -> String {
        self.signals.join(";")
    }

    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.score)
    }
}

/// Priority band used to split scored batches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    High,
    Medium,
    Low,
}

impl ScoreBand {
    pub const ALL: [ScoreBand; 3] = [Self::High, Self::Medium, Self::Low];

    /// High at 7 and above, Low at 4 and below, Medium in between
    pub fn from_score(score: i32) -> Self {
        if score >= 7 {
            Self::High
        } else if score > 4 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Suffix of the per-band output file
    pub fn file_suffix(self) -> &'static str {
        match self {
            Self::High => "score_gt7",
            Self::Medium => "score_4to7",
            Self::Low => "score_le4",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScorerVersion {
    V1,
    V2,
}

impl ScorerVersion {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::V1 => "v1",
            Self::V2 => "v2",
        }
    }
}

impl std::fmt::Display for ScorerVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scores `url` with the selected rule set.
pub fn score_url(version: ScorerVersion, url: &str, whitelist: &[String]) -> ScoreResult {
    match version {
        ScorerVersion::V1 => score_url_v1(url, whitelist),
        ScorerVersion::V2 => score_url_v2(url, whitelist),
    }
}

/// Lower-cased URL text and its raw components, as seen by the rules.
///
/// No scheme is inferred: text without `://` has an empty netloc and is
/// all path, so host rules stay silent on scheme-less input.
#[derive(Debug, Clone, Default)]
pub(crate) struct ScoringInput {
    pub url_low: String,
    pub netloc: String,
    pub path: String,
    pub query: String,
}

impl ScoringInput {
    pub fn new(url: &str) -> Self {
        let url_low = url.trim().to_lowercase();
        let components = split_components(&url_low);
        Self {
            netloc: components.netloc.to_string(),
            path: components.path.to_string(),
            query: components.query.to_string(),
            url_low,
        }
    }

    /// Second-to-last host label, or the whole netloc without dots
    pub fn core(&self) -> &str {
        let labels: Vec<&str> = self.netloc.split('.').collect();
        if labels.len() >= 2 {
            labels[labels.len() - 2]
        } else {
            &self.netloc
        }
    }

    /// Labels before the last two
    pub fn subdomain(&self) -> String {
        let labels: Vec<&str> = self.netloc.split('.').collect();
        if labels.len() > 2 {
            labels[..labels.len() - 2].join(".")
        } else {
            String::new()
        }
    }
}

pub(crate) fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_bands() {
        assert_eq!(ScoreBand::from_score(12), ScoreBand::High);
        assert_eq!(ScoreBand::from_score(7), ScoreBand::High);
        assert_eq!(ScoreBand::from_score(6), ScoreBand::Medium);
        assert_eq!(ScoreBand::from_score(5), ScoreBand::Medium);
        assert_eq!(ScoreBand::from_score(4), ScoreBand::Low);
        assert_eq!(ScoreBand::from_score(-3), ScoreBand::Low);
    }

    #[test]
    fn test_scoring_input_components() {
        let input = ScoringInput::new("  HTTPS://Login.BBVA.es-secure.com/Pago?X=1 ");
        assert_eq!(input.url_low, "https://login.bbva.es-secure.com/pago?x=1");
        assert_eq!(input.netloc, "login.bbva.es-secure.com");
        assert_eq!(input.core(), "es-secure");
        assert_eq!(input.subdomain(), "login.bbva");
        assert_eq!(input.path, "/pago");
        assert_eq!(input.query, "x=1");
    }

    #[test]
    fn test_core_without_dots() {
        let input = ScoringInput::new("http://localhost/x");
        assert_eq!(input.core(), "localhost");
        assert!(input.subdomain().is_empty());
    }

    #[test]
    fn test_scheme_less_input_has_no_netloc() {
        let input = ScoringInput::new(" Bit.ly/Correos-ES?x=1 ");
        assert_eq!(input.netloc, "");
        assert_eq!(input.core(), "");
        assert_eq!(input.path, "bit.ly/correos-es");
        assert_eq!(input.query, "x=1");
    }

    #[test]
    fn test_result_join() {
        let mut result = ScoreResult::default();
        result.push(2, "a");
        result.push(-1, "b");
        assert_eq!(result.score, 1);
        assert_eq!(result.joined(), "a;b");
    }
}
