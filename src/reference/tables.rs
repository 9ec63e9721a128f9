use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Path substrings and their weights for `token_density`, in lookup order
pub const SUSPICIOUS_TOKENS_WEIGHT: &[(&str, f64)] = &[
    // actions
    ("verificar", 1.0),
    ("confirmar", 1.5),
    ("recibir", 1.0),
    ("actualizar", 1.0),
    ("acceso", 1.0),
    ("login", 0.8),
    ("clientes", 1.0),
    ("sms", 1.0),
    ("pago", 1.5),
    ("seguridad", 1.0),
    // logistics
    ("paquete", 1.2),
    ("aduanas", 1.2),
    ("envio", 1.2),
    ("tracking", 1.0),
    // payments
    ("tarjeta", 1.5),
    ("pin", 1.2),
    ("token", 1.0),
    ("banca", 1.0),
    // 3-D Secure flows
    ("verificacion", 2.0),
    ("3d", 3.0),
    ("3d-secure", 3.0),
    ("no-back-button", 3.0),
];

/// Cheap gTLDs and hosting suffixes with popularity-based risk
pub const COMMON_PHISH_TLDS: &[(&str, f64)] = &[
    ("app", 2.0),
    ("live", 3.0),
    ("shop", 2.5),
    ("xyz", 2.0),
    ("top", 2.0),
    ("online", 2.0),
    ("site", 2.0),
    ("space", 1.5),
    ("info", 1.5),
    ("icu", 1.5),
    ("web.app", 3.0),
    ("repl.co", 3.0),
    ("tempsite.link", 3.0),
    ("rf.gd", 3.0),
];

pub const HIGH_RISK_TLDS: &[&str] = &["ru", "su", "by", "cn", "hk", "kp", "vn"];
pub const HIGH_RISK_TLD_WEIGHT: f64 = 3.0;

pub const SAFE_TLDS: &[&str] = &["es", "com", "org", "net", "eu"];

/// TLD strings that, found as tokens outside the real suffix, suggest a
/// visual deception such as `bbva.es-login.com`
pub const FAKE_TLD_TOKENS: &[&str] = &[
    "es", "com", "net", "org", "eu", "app", "shop", "online", "site", "store", "cloud", "tech",
    "pro", "email", "support", "info", "ru", "cn", "su", "by", "tk", "ml",
];

pub const FREE_HOSTING: &[&str] = &[
    "000webhost",
    "blogspot",
    "wixsite",
    "weebly",
    "repl.co",
    "web.app",
    "tempsite.link",
    "rf.gd",
    "myfreesites.net",
    "freenom.com",
    "freenom.net",
    "awardspace",
    "infinityfree",
    "byethost",
    "heliohost",
    "googlesites",
];

pub const TRUSTED_TOKENS: &[&str] = &["login", "clientes", "empresas", "banca", "seguridad"];

pub const SUSPICIOUS_TOKENS: &[&str] = &["php", "html", "index", "view", "principal"];

/// CMS paths that mark a legitimate host as compromised
pub const INFRA_COMPROMISE_PATTERNS: &[&str] = &[
    "/wp-",
    "/plugins",
    "/themes",
    "/includes",
    "/css/",
    "/js/",
    "/vendor/phpunit",
];

/// TLD risk table: common phishing TLDs, overwritten by the high-risk
/// TLDs at a fixed weight, overwritten by the safe TLDs at zero.
pub static TLD_RISK: Lazy<HashMap<String, f64>> =
    Lazy::new(|| build_tld_risk(COMMON_PHISH_TLDS, HIGH_RISK_TLDS, SAFE_TLDS));

/// Merges the three tables in order; a later table wins on a shared TLD.
pub fn build_tld_risk(
    common: &[(&str, f64)],
    high_risk: &[&str],
    safe: &[&str],
) -> HashMap<String, f64> {
    let mut risk: HashMap<String, f64> = common
        .iter()
        .map(|(tld, weight)| (tld.to_string(), *weight))
        .collect();
    for tld in high_risk {
        risk.insert(tld.to_string(), HIGH_RISK_TLD_WEIGHT);
    }
    for tld in safe {
        risk.insert(tld.to_string(), 0.0);
    }
    risk
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tld_risk_merge_order() {
        assert_eq!(TLD_RISK.get("live"), Some(&3.0));
        assert_eq!(TLD_RISK.get("ru"), Some(&3.0));
        assert_eq!(TLD_RISK.get("es"), Some(&0.0));
        assert_eq!(TLD_RISK.get("com"), Some(&0.0));
        assert_eq!(TLD_RISK.get("unknown"), None);
        assert_eq!(
            TLD_RISK.len(),
            COMMON_PHISH_TLDS.len() + HIGH_RISK_TLDS.len() + SAFE_TLDS.len()
        );
    }

    #[test]
    fn test_tld_risk_later_tables_win() {
        let risk = build_tld_risk(
            &[("xyz", 1.5), ("ru", 0.5), ("es", 2.0)],
            &["ru", "es"],
            &["es"],
        );
        assert_eq!(risk.len(), 3);
        assert_eq!(risk["xyz"], 1.5);
        assert_eq!(risk["ru"], HIGH_RISK_TLD_WEIGHT);
        assert_eq!(risk["es"], 0.0);
    }
}
