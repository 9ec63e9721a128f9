use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::features::FeatureSchema;

/// Provenance record of one batch extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMetadata {
    pub run_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub schema: FeatureSchema,
    pub features: Vec<String>,
    pub rows_in: usize,
    pub rows_out: usize,
    /// Rows filled with the schema defaults
    pub degraded_rows: usize,
    /// Rows whose worker task failed; also counted as degraded
    pub failed_rows: usize,
    /// Input records the CSV reader could not decode
    pub unreadable_rows: usize,
    pub expected_columns: Option<Vec<String>>,
    pub observed_columns: Vec<String>,
    /// SHA-256 of input, output and reference files, keyed by role
    pub checksums: BTreeMap<String, String>,
    pub whitelist_size: usize,
    pub brand_count: usize,
}

impl RunMetadata {
    pub fn new(schema: FeatureSchema) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            schema,
            features: schema.feature_names().iter().map(|n| n.to_string()).collect(),
            rows_in: 0,
            rows_out: 0,
            degraded_rows: 0,
            failed_rows: 0,
            unreadable_rows: 0,
            expected_columns: None,
            observed_columns: Vec::new(),
            checksums: BTreeMap::new(),
            whitelist_size: 0,
            brand_count: 0,
        }
    }

    /// Writes pretty JSON to `path`
    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_lists_schema_features() {
        let meta = RunMetadata::new(FeatureSchema::V3);
        assert_eq!(meta.features.len(), 7);
        assert_eq!(meta.features[0], "domain_complexity");
        assert_eq!(meta.rows_in, 0);
    }

    #[test]
    fn test_json_file() {
        let path = std::env::temp_dir().join(format!("meta_{}.json", Uuid::new_v4()));
        let mut meta = RunMetadata::new(FeatureSchema::V2Extended);
        meta.rows_in = 3;
        meta.checksums.insert("input".to_string(), "abc".to_string());
        meta.write(&path).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"schema\": \"v2-extended\""));
        assert_eq!(RunMetadata::read(&path).unwrap(), meta);
        fs::remove_file(&path).ok();
    }
}
