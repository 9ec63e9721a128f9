//! CSV batch driver.
//!
//! Rows are processed in ordered chunks on blocking worker tasks that share
//! one `Arc<ReferenceData>`. Chunk results are joined in submission order,
//! so output rows always line up with input rows.

pub mod csv_io;
pub mod metadata;

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::CHUNK_SIZE;
use crate::error::Result;
use crate::features::{validate_columns, FeatureSchema, FeatureVector};
use crate::reference::{ReferenceData, ReferencePaths};
use crate::scoring::{score_url, ScoreBand, ScoreResult, ScorerVersion};
use crate::utils::{dedupe_key, sha256_file};

pub use csv_io::{read_url_table, write_table, UrlTable, URL_COLUMN};
pub use metadata::RunMetadata;

/// Columns appended by batch scoring, in order
pub const SCORE_COLUMNS: [&str; 4] = ["score_total", "signals_detected", "score_band", "scoring_version"];

/// A batch feature-extraction request
#[derive(Debug, Clone)]
pub struct ExtractionJob {
    pub schema: FeatureSchema,
    pub input: PathBuf,
    pub output: PathBuf,
    /// Where to write the run metadata JSON, if anywhere
    pub metadata: Option<PathBuf>,
    /// Required input header, checked in order before processing
    pub expected_columns: Option<Vec<String>>,
}

/// A batch scoring request
#[derive(Debug, Clone)]
pub struct ScoringJob {
    pub version: ScorerVersion,
    pub input: PathBuf,
    pub output: PathBuf,
    pub dedupe: bool,
    /// Also write one file per score band next to `output`
    pub split_bands: bool,
}

/// Counts reported after a scoring run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoringSummary {
    pub rows_in: usize,
    pub rows_out: usize,
    pub duplicates_dropped: usize,
    pub unreadable_rows: usize,
    pub failed_rows: usize,
    pub band_counts: BTreeMap<String, usize>,
    pub band_files: Vec<PathBuf>,
}

/// Feature vectors of one batch, in input order
#[derive(Debug, Clone)]
pub struct ExtractedBatch {
    pub vectors: Vec<FeatureVector>,
    pub failed: usize,
}

impl ExtractedBatch {
    pub fn degraded(&self) -> usize {
        self.vectors.iter().filter(|v| v.degraded).count()
    }
}

/// Score results of one batch, in input order
#[derive(Debug, Clone)]
pub struct ScoredBatch {
    pub results: Vec<ScoreResult>,
    pub failed: usize,
}

/// Runs extractors and scorers over URL batches.
#[derive(Debug, Clone)]
pub struct BatchRunner {
    reference: Arc<ReferenceData>,
    reference_paths: Option<ReferencePaths>,
    chunk_size: usize,
}

impl BatchRunner {
    pub fn new(reference: Arc<ReferenceData>) -> Self {
        Self {
            reference,
            reference_paths: None,
            chunk_size: CHUNK_SIZE,
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Reference files to checksum into run metadata
    pub fn with_reference_paths(mut self, paths: ReferencePaths) -> Self {
        self.reference_paths = Some(paths);
        self
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    /// Applies `work` to every URL on blocking tasks, one per chunk.
    ///
    /// A chunk whose task fails yields `None` for each of its rows.
    async fn map_chunks<T, F>(&self, urls: &[String], work: F) -> Vec<Option<T>>
    where
        T: Send + 'static,
        F: Fn(&ReferenceData, &str) -> T + Send + Sync + 'static,
    {
        let work = Arc::new(work);
        let chunks: Vec<Vec<String>> = urls.chunks(self.chunk_size).map(<[String]>::to_vec).collect();
        let sizes: Vec<usize> = chunks.iter().map(Vec::len).collect();

        let handles = chunks.into_iter().map(|chunk| {
            let reference = Arc::clone(&self.reference);
            let work = Arc::clone(&work);
            tokio::task::spawn_blocking(move || {
                chunk
                    .iter()
                    .map(|url| work(&reference, url))
                    .collect::<Vec<T>>()
            })
        });

        let mut output = Vec::with_capacity(urls.len());
        for (index, (joined, size)) in join_all(handles).await.into_iter().zip(sizes).enumerate() {
            match joined {
                Ok(values) => output.extend(values.into_iter().map(Some)),
                Err(e) => {
                    warn!("Batch chunk {} failed ({} rows): {}", index, size, e);
                    output.extend((0..size).map(|_| None));
                }
            }
        }
        output
    }

    /// Extracts `schema` features for every URL.
    pub async fn extract_all(&self, schema: FeatureSchema, urls: &[String]) -> ExtractedBatch {
        let results = self
            .map_chunks(urls, move |reference, url| schema.extractor().extract(url, reference))
            .await;

        let extractor = schema.extractor();
        let mut failed = 0;
        let vectors = results
            .into_iter()
            .map(|result| {
                result.unwrap_or_else(|| {
                    failed += 1;
                    extractor.default_vector()
                })
            })
            .collect();
        ExtractedBatch { vectors, failed }
    }

    /// Scores every URL against the loaded whitelist.
    pub async fn score_all(&self, version: ScorerVersion, urls: &[String]) -> ScoredBatch {
        let results = self
            .map_chunks(urls, move |reference, url| {
                score_url(version, url, reference.whitelist().as_slice())
            })
            .await;

        let mut failed = 0;
        let results = results
            .into_iter()
            .map(|result| {
                result.unwrap_or_else(|| {
                    failed += 1;
                    ScoreResult::default()
                })
            })
            .collect();
        ScoredBatch { results, failed }
    }

    /// Reads the input table, appends the schema's feature columns and
    /// writes the output. Column problems abort before anything is written.
    pub async fn run_extraction(&self, job: &ExtractionJob) -> Result<RunMetadata> {
        let start = Instant::now();
        let table = read_url_table(&job.input)?;
        if let Some(expected) = &job.expected_columns {
            validate_columns(&table.headers, expected)?;
        }

        let feature_names = job.schema.feature_names();
        let header: Vec<String> = table
            .headers
            .iter()
            .cloned()
            .chain(feature_names.iter().map(|n| n.to_string()))
            .collect();
        // Input columns may not shadow a feature column
        let expected_header: Vec<&str> = table
            .headers
            .iter()
            .map(String::as_str)
            .filter(|name| !feature_names.contains(name))
            .chain(feature_names.iter().copied())
            .collect();
        validate_columns(&header, &expected_header)?;

        let batch = self.extract_all(job.schema, &table.urls()).await;
        let rows: Vec<Vec<String>> = table
            .rows
            .iter()
            .zip(&batch.vectors)
            .map(|(row, vector)| {
                let mut out = row.clone();
                out.extend(vector.to_record());
                out
            })
            .collect();
        write_table(&job.output, &header, &rows)?;

        let mut meta = RunMetadata::new(job.schema);
        meta.rows_in = table.len();
        meta.rows_out = rows.len();
        meta.degraded_rows = batch.degraded();
        meta.failed_rows = batch.failed;
        meta.unreadable_rows = table.unreadable;
        meta.expected_columns = job.expected_columns.clone();
        meta.observed_columns = table.headers.clone();
        meta.whitelist_size = self.reference.whitelist().len();
        meta.brand_count = self.reference.brands().len();
        meta.checksums = self.checksums(&job.input, &job.output)?;

        if let Some(path) = &job.metadata {
            meta.write(path)?;
            debug!("Run metadata written to {}", path.display());
        }

        info!(
            "Extracted {} rows with {} in {:?} ({} degraded, {} failed, {} unreadable)",
            meta.rows_out,
            job.schema,
            start.elapsed(),
            meta.degraded_rows,
            meta.failed_rows,
            meta.unreadable_rows
        );
        Ok(meta)
    }

    /// Scores the input table, appending score, signals, band and version.
    pub async fn run_scoring(&self, job: &ScoringJob) -> Result<ScoringSummary> {
        let start = Instant::now();
        let table = read_url_table(&job.input)?;
        let rows_in = table.len();

        let rows = if job.dedupe {
            dedupe_rows(table.rows, table.url_index)
        } else {
            table.rows
        };
        let urls: Vec<String> = rows
            .iter()
            .map(|row| row.get(table.url_index).cloned().unwrap_or_default())
            .collect();

        let batch = self.score_all(job.version, &urls).await;

        let header: Vec<String> = table
            .headers
            .iter()
            .cloned()
            .chain(SCORE_COLUMNS.iter().map(|c| c.to_string()))
            .collect();

        let mut summary = ScoringSummary {
            rows_in,
            rows_out: rows.len(),
            duplicates_dropped: rows_in - rows.len(),
            unreadable_rows: table.unreadable,
            failed_rows: batch.failed,
            ..Default::default()
        };

        let mut banded: Vec<(ScoreBand, Vec<String>)> = Vec::with_capacity(rows.len());
        for (row, result) in rows.into_iter().zip(&batch.results) {
            let band = result.band();
            *summary.band_counts.entry(band.as_str().to_string()).or_insert(0) += 1;
            let mut out = row;
            out.push(result.score.to_string());
            out.push(result.joined());
            out.push(band.as_str().to_string());
            out.push(job.version.as_str().to_string());
            banded.push((band, out));
        }

        let all_rows: Vec<&Vec<String>> = banded.iter().map(|(_, row)| row).collect();
        write_table(&job.output, &header, &all_rows)?;

        if job.split_bands {
            for band in ScoreBand::ALL {
                let path = band_path(&job.output, band);
                let band_rows: Vec<&Vec<String>> = banded
                    .iter()
                    .filter(|(b, _)| *b == band)
                    .map(|(_, row)| row)
                    .collect();
                write_table(&path, &header, &band_rows)?;
                summary.band_files.push(path);
            }
        }

        info!(
            "Scored {} rows with {} in {:?} ({} duplicates dropped, {} failed, {} unreadable)",
            summary.rows_out,
            job.version,
            start.elapsed(),
            summary.duplicates_dropped,
            summary.failed_rows,
            summary.unreadable_rows
        );
        Ok(summary)
    }

    fn checksums(&self, input: &Path, output: &Path) -> Result<BTreeMap<String, String>> {
        let mut sums = BTreeMap::new();
        sums.insert("input".to_string(), sha256_file(input)?);
        sums.insert("output".to_string(), sha256_file(output)?);
        if let Some(paths) = &self.reference_paths {
            sums.insert("whitelist".to_string(), sha256_file(&paths.whitelist)?);
            sums.insert("brands".to_string(), sha256_file(&paths.brands)?);
            if let Some(path) = &paths.neutral_domains {
                sums.insert("neutral_domains".to_string(), sha256_file(path)?);
            }
            if let Some(path) = &paths.public_suffix_list {
                sums.insert("public_suffix_list".to_string(), sha256_file(path)?);
            }
        }
        Ok(sums)
    }
}

/// Keeps the first row for each normalized URL.
pub fn dedupe_rows(rows: Vec<Vec<String>>, url_index: usize) -> Vec<Vec<String>> {
    let mut seen = HashSet::new();
    rows.into_iter()
        .filter(|row| {
            let url = row.get(url_index).map(String::as_str).unwrap_or_default();
            seen.insert(dedupe_key(url))
        })
        .collect()
}

/// `{stem}_{band suffix}.csv` beside `output`
pub fn band_path(output: &Path, band: ScoreBand) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "scored".to_string());
    output.with_file_name(format!("{}_{}.csv", stem, band.file_suffix()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_dedupe_keeps_first_occurrence() {
        let rows = vec![
            row(&["1", "https://bbva.es/"]),
            row(&["2", "HTTPS://BBVA.ES"]),
            row(&["3", "https://bbva.es/login"]),
        ];
        let kept = dedupe_rows(rows, 1);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0][0], "1");
        assert_eq!(kept[1][0], "3");
    }

    #[test]
    fn test_band_path() {
        let path = band_path(Path::new("out/scored.csv"), ScoreBand::High);
        assert_eq!(path, PathBuf::from("out/scored_score_gt7.csv"));
        let path = band_path(Path::new("scored.csv"), ScoreBand::Low);
        assert_eq!(path, PathBuf::from("scored_score_le4.csv"));
    }

    #[tokio::test]
    async fn test_chunking_preserves_order() {
        let reference = Arc::new(
            ReferenceData::builder()
                .with_whitelist(["bbva.es"])
                .with_brands(["bbva"])
                .build(),
        );
        let runner = BatchRunner::new(reference).with_chunk_size(2);
        let urls: Vec<String> = (0..7).map(|i| format!("https://site{}.xyz/", i)).collect();
        let batch = runner.extract_all(FeatureSchema::V1, &urls).await;
        assert_eq!(batch.vectors.len(), 7);
        assert_eq!(batch.failed, 0);

        let expected: Vec<FeatureVector> = urls
            .iter()
            .map(|u| FeatureSchema::V1.extractor().extract(u, runner.reference()))
            .collect();
        assert_eq!(batch.vectors, expected);
    }

    #[tokio::test]
    async fn test_blank_urls_are_degraded_not_failed() {
        let reference = Arc::new(ReferenceData::builder().build());
        let runner = BatchRunner::new(reference);
        let urls = vec![String::new(), "   ".to_string()];
        let batch = runner.extract_all(FeatureSchema::V3, &urls).await;
        assert_eq!(batch.failed, 0);
        assert_eq!(batch.degraded(), 2);
    }
}
