use rapidfuzz::fuzz;

/// Normalized Indel similarity in `0.0..=100.0`.
///
/// Two empty strings are identical.
pub fn ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 100.0;
    }
    fuzz::ratio(a.chars(), b.chars()) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_identity_and_disjoint() {
        assert_eq!(ratio("bbva", "bbva"), 100.0);
        assert_eq!(ratio("", ""), 100.0);
        assert_eq!(ratio("abc", ""), 0.0);
        assert_eq!(ratio("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_ratio_typosquat() {
        let sim = ratio("santandr", "santander");
        assert_eq!(format!("{:.0}", sim), "94");
        assert!(sim >= 80.0);
        assert!(ratio("bbva-clientes", "bbva") < 80.0);
    }

    #[test]
    fn test_ratio_is_symmetric() {
        assert_eq!(ratio("correos", "corre0s"), ratio("corre0s", "correos"));
    }

    #[test]
    fn test_ratio_counts_characters_not_bytes() {
        assert_eq!(format!("{:.0}", ratio("correós", "correos")), "86");
    }
}
