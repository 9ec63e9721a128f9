use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use publicsuffix::{List, Psl};
use tracing::{debug, info};

use crate::error::{PhishError, Result};

const EMBEDDED_LIST: &str = include_str!("../../data/public_suffix_list.dat");

static EMBEDDED: Lazy<SuffixList> = Lazy::new(|| {
    SuffixList::parse(EMBEDDED_LIST).expect("embedded public suffix list must parse")
});

/// Host split into its public-suffix-aware parts
///
/// `www.clientes.bbva.com.es` becomes subdomain `www.clientes`, core `bbva`
/// and suffix `com.es`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainParts {
    pub subdomain: String,
    pub core: String,
    pub suffix: String,
}

impl DomainParts {
    /// Core domain plus suffix, or empty when either half is missing
    pub fn registered(&self) -> String {
        if self.core.is_empty() || self.suffix.is_empty() {
            String::new()
        } else {
            format!("{}.{}", self.core, self.suffix)
        }
    }
}

/// Shared handle on a parsed public suffix list
#[derive(Clone)]
pub struct SuffixList {
    list: Arc<List>,
}

impl std::fmt::Debug for SuffixList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuffixList").finish_non_exhaustive()
    }
}

impl SuffixList {
    /// Parses list text in the publicsuffix.org `.dat` format
    pub fn parse(text: &str) -> Result<Self> {
        let list: List = text
            .parse()
            .map_err(|e: publicsuffix::Error| PhishError::SuffixList(e.to_string()))?;
        Ok(Self {
            list: Arc::new(list),
        })
    }

    /// Loads a list from disk in place of the embedded ICANN section
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(PhishError::MissingFile {
                name: "public_suffix_list",
                path: path.to_path_buf(),
            });
        }
        let text = std::fs::read_to_string(path)?;
        let list = Self::parse(&text)?;
        info!("Loaded public suffix list from {}", path.display());
        Ok(list)
    }

    /// The list compiled into the binary
    pub fn embedded() -> &'static SuffixList {
        &EMBEDDED
    }

    /// Splits a host name into subdomain, core domain and suffix.
    ///
    /// Hosts not covered by any rule take their last label as suffix.
    /// A host that is itself a suffix yields an empty core.
    pub fn split(&self, host: &str) -> DomainParts {
        let host = host.trim().trim_end_matches('.').to_ascii_lowercase();
        if host.is_empty() {
            return DomainParts::default();
        }

        let suffix = match self.list.suffix(host.as_bytes()) {
            Some(suffix) => String::from_utf8_lossy(suffix.as_bytes()).into_owned(),
            None => {
                debug!("No suffix rule matched host, using last label: {}", host);
                host.rsplit('.').next().unwrap_or_default().to_string()
            }
        };

        if suffix.len() >= host.len() {
            return DomainParts {
                suffix,
                ..DomainParts::default()
            };
        }

        let rest = &host[..host.len() - suffix.len() - 1];
        let (subdomain, core) = match rest.rfind('.') {
            Some(idx) => (rest[..idx].to_string(), rest[idx + 1..].to_string()),
            None => (String::new(), rest.to_string()),
        };

        DomainParts {
            subdomain,
            core,
            suffix,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_simple_domain() {
        let parts = SuffixList::embedded().split("bbva.es");
        assert_eq!(parts.core, "bbva");
        assert_eq!(parts.suffix, "es");
        assert!(parts.subdomain.is_empty());
        assert_eq!(parts.registered(), "bbva.es");
    }

    #[test]
    fn test_split_compound_suffix() {
        let parts = SuffixList::embedded().split("www.clientes.bbva.com.es");
        assert_eq!(parts.subdomain, "www.clientes");
        assert_eq!(parts.core, "bbva");
        assert_eq!(parts.suffix, "com.es");

        let parts = SuffixList::embedded().split("example.co.uk");
        assert_eq!(parts.registered(), "example.co.uk");
    }

    #[test]
    fn test_split_country_second_level_domains() {
        let list = SuffixList::embedded();
        for (host, core, suffix) in [
            ("tienda.com.pk", "tienda", "com.pk"),
            ("shop.co.th", "shop", "co.th"),
            ("banco.com.ar", "banco", "com.ar"),
            ("pagos.gob.mx", "pagos", "gob.mx"),
            ("sede.agenciatributaria.gob.es", "agenciatributaria", "gob.es"),
        ] {
            let parts = list.split(host);
            assert_eq!(parts.core, core, "{}", host);
            assert_eq!(parts.suffix, suffix, "{}", host);
        }
    }

    #[test]
    fn test_split_bare_suffix_has_no_core() {
        let parts = SuffixList::embedded().split("com");
        assert!(parts.core.is_empty());
        assert!(parts.registered().is_empty());
    }

    #[test]
    fn test_split_empty_host() {
        assert_eq!(SuffixList::embedded().split("  "), DomainParts::default());
    }

    #[test]
    fn test_custom_list_overrides_rules() {
        let list = SuffixList::parse("// test\nes\ngob.es\n").unwrap();
        let parts = list.split("sede.agenciatributaria.gob.es");
        assert_eq!(parts.suffix, "gob.es");
        assert_eq!(parts.core, "agenciatributaria");
        assert_eq!(parts.subdomain, "sede");
    }
}
