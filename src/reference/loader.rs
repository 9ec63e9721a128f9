use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{ReferenceData, Weights};
use crate::error::{PhishError, Result};
use crate::url_parser::{normalize_with, SuffixList};

/// Header names recognised as the domain column, in priority order
const DOMAIN_HEADERS: [&str; 4] = ["domain", "dominio", "url", "host"];

/// Locations of the reference CSV files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferencePaths {
    pub whitelist: PathBuf,
    pub brands: PathBuf,
    pub neutral_domains: Option<PathBuf>,
    /// Replaces the embedded ICANN suffix data
    pub public_suffix_list: Option<PathBuf>,
}

impl Default for ReferencePaths {
    fn default() -> Self {
        Self {
            whitelist: PathBuf::from("data/whitelist.csv"),
            brands: PathBuf::from("data/dominios_espanyoles.csv"),
            neutral_domains: Some(PathBuf::from("data/global_neutral_domains.csv")),
            public_suffix_list: None,
        }
    }
}

/// Loads every reference file named in `paths`.
///
/// Whitelist entries are reduced to their registered domain and brand
/// entries to their core domain. A missing file or an empty whitelist or
/// brand set aborts with an error naming the file.
pub fn load_reference_data(paths: &ReferencePaths, weights: Weights) -> Result<ReferenceData> {
    let suffixes = match &paths.public_suffix_list {
        Some(path) => SuffixList::from_file(path)?,
        None => SuffixList::embedded().clone(),
    };

    let whitelist: Vec<String> = read_domain_column(&paths.whitelist, "whitelist")?
        .into_iter()
        .filter_map(|entry| registered_or_skip(&entry, &suffixes))
        .collect();
    if whitelist.is_empty() {
        return Err(PhishError::EmptyReference {
            name: "whitelist",
            path: paths.whitelist.clone(),
        });
    }

    let brands: Vec<String> = read_domain_column(&paths.brands, "brands")?
        .into_iter()
        .filter_map(|entry| {
            let core = normalize_with(&entry, &suffixes).core_domain;
            if core.is_empty() {
                debug!("Skipping brand entry without core domain: {}", entry);
                None
            } else {
                Some(core)
            }
        })
        .collect();
    if brands.is_empty() {
        return Err(PhishError::EmptyReference {
            name: "brands",
            path: paths.brands.clone(),
        });
    }

    let neutral_domains = match &paths.neutral_domains {
        Some(path) => read_domain_column(path, "neutral_domains")?,
        None => Vec::new(),
    };

    let reference = ReferenceData::builder()
        .with_whitelist(whitelist)
        .with_brands(brands)
        .with_neutral_domains(neutral_domains)
        .with_weights(weights)
        .with_suffixes(suffixes)
        .build();

    info!(
        "Reference data loaded: {} whitelisted domains, {} brands, {} neutral domains",
        reference.whitelist().len(),
        reference.brands().len(),
        reference.neutral_domains().len()
    );
    Ok(reference)
}

fn registered_or_skip(entry: &str, suffixes: &SuffixList) -> Option<String> {
    let registered = normalize_with(entry, suffixes).registered_domain;
    if registered.is_empty() {
        debug!("Skipping whitelist entry without registered domain: {}", entry);
        None
    } else {
        Some(registered)
    }
}

/// Reads the domain column of a reference CSV as trimmed lower-case strings.
///
/// The column is the first header among `domain`, `dominio`, `url`, `host`,
/// else the first column. A first row whose first cell contains a dot is
/// treated as data (header-less file). Unreadable rows are skipped.
pub fn read_domain_column(path: &Path, name: &'static str) -> Result<Vec<String>> {
    if !path.is_file() {
        return Err(PhishError::MissingFile {
            name,
            path: path.to_path_buf(),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut column = 0usize;
    let mut values = Vec::new();
    let mut skipped = 0usize;

    for (row, record) in reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                warn!("Skipping malformed row {} in {}: {}", row + 1, path.display(), e);
                skipped += 1;
                continue;
            }
        };

        if row == 0 {
            let header_match = record.iter().position(|cell| {
                DOMAIN_HEADERS.contains(&cell.to_lowercase().as_str())
            });
            if let Some(idx) = header_match {
                column = idx;
                continue;
            }
            if !record.get(0).map_or(false, |cell| cell.contains('.')) {
                // header row without a recognised name
                continue;
            }
        }

        match record.get(column) {
            Some(cell) if !cell.trim().is_empty() => values.push(cell.trim().to_lowercase()),
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!("Skipped {} unusable rows in {}", skipped, path.display());
    }
    debug!("Read {} {} entries from {}", values.len(), name, path.display());
    Ok(values)
}
