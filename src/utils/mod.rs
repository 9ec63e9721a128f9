pub mod checksum;
pub mod logger;

pub use checksum::sha256_file;
pub use logger::init_logger;

/// Batch de-duplication key: trimmed, lower-cased, no trailing `/`
pub fn dedupe_key(url: &str) -> String {
    url.trim().to_lowercase().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedupe_key() {
        assert_eq!(dedupe_key("  HTTPS://BBVA.es/ "), "https://bbva.es");
        assert_eq!(dedupe_key("https://bbva.es//"), "https://bbva.es");
        assert_eq!(dedupe_key("https://bbva.es/login"), "https://bbva.es/login");
    }
}
