//! Lookup tables shared by every extractor and scorer.
//!
//! A [`ReferenceData`] is built once per run and only read afterwards; it
//! is `Send + Sync` and is shared across batch workers behind an `Arc`.

pub mod loader;
pub mod tables;

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::url_parser::{ParsedUrl, SuffixList};

pub use loader::{load_reference_data, read_domain_column, ReferencePaths};

/// Ordered, de-duplicated set of lower-case domain strings.
#[derive(Debug, Clone, Default)]
pub struct DomainSet {
    entries: Vec<String>,
    index: HashSet<String>,
}

impl DomainSet {
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for item in items {
            set.insert(item.as_ref());
        }
        set
    }

    fn insert(&mut self, item: &str) {
        let item = item.trim().to_lowercase();
        if !item.is_empty() && self.index.insert(item.clone()) {
            self.entries.push(item);
        }
    }

    pub fn contains(&self, item: &str) -> bool {
        self.index.contains(item)
    }

    /// True when `host` equals an entry or is a subdomain of one.
    pub fn matches_host(&self, host: &str) -> bool {
        let mut rest = host;
        loop {
            if rest.is_empty() {
                return false;
            }
            if self.index.contains(rest) {
                return true;
            }
            match rest.find('.') {
                Some(idx) => rest = &rest[idx + 1..],
                None => return false,
            }
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Tunable numeric weights used by the infra and density signals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    /// Smoothing constant K in `depth / (depth + K)`
    pub token_density_k: f64,
    pub http_weight: f64,
    pub free_hosting_weight: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            token_density_k: 2.0,
            http_weight: 0.30,
            free_hosting_weight: 1.0,
        }
    }
}

/// Immutable reference snapshot passed into every extraction call.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    whitelist: DomainSet,
    brands: DomainSet,
    neutral_domains: DomainSet,
    suspicious_token_weights: Vec<(String, f64)>,
    suspicious_tokens: Vec<String>,
    trusted_tokens: Vec<String>,
    tld_risk: HashMap<String, f64>,
    free_hosting: Vec<String>,
    fake_tld_tokens: Vec<String>,
    compromise_patterns: Vec<String>,
    weights: Weights,
    suffixes: SuffixList,
}

impl ReferenceData {
    pub fn builder() -> ReferenceDataBuilder {
        ReferenceDataBuilder::default()
    }

    pub fn whitelist(&self) -> &DomainSet {
        &self.whitelist
    }

    pub fn brands(&self) -> &DomainSet {
        &self.brands
    }

    pub fn neutral_domains(&self) -> &DomainSet {
        &self.neutral_domains
    }

    pub fn suspicious_token_weights(&self) -> &[(String, f64)] {
        &self.suspicious_token_weights
    }

    pub fn suspicious_tokens(&self) -> &[String] {
        &self.suspicious_tokens
    }

    pub fn trusted_tokens(&self) -> &[String] {
        &self.trusted_tokens
    }

    pub fn tld_risk_table(&self) -> &HashMap<String, f64> {
        &self.tld_risk
    }

    pub fn free_hosting(&self) -> &[String] {
        &self.free_hosting
    }

    pub fn fake_tld_tokens(&self) -> &[String] {
        &self.fake_tld_tokens
    }

    pub fn compromise_patterns(&self) -> &[String] {
        &self.compromise_patterns
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    pub fn suffixes(&self) -> &SuffixList {
        &self.suffixes
    }

    /// Exact match on the registered domain, or `host` at or below a
    /// whitelisted domain.
    pub fn is_whitelisted(&self, registered: &str, host: &str) -> bool {
        (!registered.is_empty() && self.whitelist.contains(registered))
            || self.whitelist.matches_host(host)
    }

    pub fn is_brand(&self, core: &str) -> bool {
        !core.is_empty() && self.brands.contains(core)
    }

    pub fn is_neutral(&self, parsed: &ParsedUrl) -> bool {
        (!parsed.registered_domain.is_empty()
            && self.neutral_domains.contains(&parsed.registered_domain))
            || self.neutral_domains.matches_host(&parsed.host)
    }

    /// Risk weight for a public suffix, `0.0` when the suffix is unknown.
    pub fn tld_risk(&self, suffix: &str) -> f64 {
        self.tld_risk.get(suffix).copied().unwrap_or(0.0)
    }

    /// Suffix risk with globally neutral domains forced to `0.0`.
    pub fn tld_risk_for(&self, parsed: &ParsedUrl) -> f64 {
        if self.is_neutral(parsed) {
            0.0
        } else {
            self.tld_risk(&parsed.suffix)
        }
    }

    /// True when any free-hosting marker occurs inside `text`.
    pub fn mentions_free_hosting(&self, text: &str) -> bool {
        self.free_hosting.iter().any(|h| text.contains(h.as_str()))
    }

    /// Sum of weights of every weighted token occurring in `text`.
    pub fn suspicious_weight_sum(&self, text: &str) -> f64 {
        self.suspicious_token_weights
            .iter()
            .filter(|(token, _)| text.contains(token.as_str()))
            .map(|(_, weight)| weight)
            .sum()
    }

    /// +1 whitelisted, 0 brand match without whitelist, -1 otherwise.
    pub fn trusted_token_context(&self, parsed: &ParsedUrl) -> i8 {
        if self.is_whitelisted(&parsed.registered_domain, &parsed.host) {
            1
        } else if self.is_brand(&parsed.core_domain) {
            0
        } else {
            -1
        }
    }
}

/// Builds a [`ReferenceData`], starting from the built-in tables.
#[derive(Debug, Clone, Default)]
pub struct ReferenceDataBuilder {
    whitelist: Vec<String>,
    brands: Vec<String>,
    neutral_domains: Vec<String>,
    weights: Weights,
    suffixes: Option<SuffixList>,
}

impl ReferenceDataBuilder {
    pub fn with_whitelist<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.whitelist = domains.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_brands<I, S>(mut self, brands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.brands = brands.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_neutral_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.neutral_domains = domains.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_weights(mut self, weights: Weights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_suffixes(mut self, suffixes: SuffixList) -> Self {
        self.suffixes = Some(suffixes);
        self
    }

    pub fn build(self) -> ReferenceData {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        ReferenceData {
            whitelist: DomainSet::new(&self.whitelist),
            brands: DomainSet::new(&self.brands),
            neutral_domains: DomainSet::new(&self.neutral_domains),
            suspicious_token_weights: tables::SUSPICIOUS_TOKENS_WEIGHT
                .iter()
                .map(|(token, weight)| (token.to_string(), *weight))
                .collect(),
            suspicious_tokens: owned(tables::SUSPICIOUS_TOKENS),
            trusted_tokens: owned(tables::TRUSTED_TOKENS),
            tld_risk: tables::TLD_RISK.clone(),
            free_hosting: owned(tables::FREE_HOSTING),
            fake_tld_tokens: owned(tables::FAKE_TLD_TOKENS),
            compromise_patterns: owned(tables::INFRA_COMPROMISE_PATTERNS),
            weights: self.weights,
            suffixes: self
                .suffixes
                .unwrap_or_else(|| SuffixList::embedded().clone()),
        }
    }
}
