use std::path::PathBuf;

use phish_scoring::reference::{load_reference_data, ReferenceData, ReferencePaths, Weights};

pub fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

pub fn reference_paths() -> ReferencePaths {
    let dir = data_dir();
    ReferencePaths {
        whitelist: dir.join("whitelist.csv"),
        brands: dir.join("dominios_espanyoles.csv"),
        neutral_domains: Some(dir.join("global_neutral_domains.csv")),
        public_suffix_list: None,
    }
}

pub fn shipped_reference() -> ReferenceData {
    load_reference_data(&reference_paths(), Weights::default()).expect("shipped reference data")
}

pub fn temp_path(prefix: &str, extension: &str) -> PathBuf {
    std::env::temp_dir().join(format!("{}_{}.{}", prefix, uuid::Uuid::new_v4(), extension))
}
