mod common;

#[cfg(test)]
mod tests {
    use super::common::shipped_reference;
    use phish_scoring::scoring::{score_url, score_url_v1, score_url_v2, ScoreBand, ScorerVersion};

    #[test]
    fn test_v1_global_lookalike_is_not_negative() {
        let result = score_url_v1("https://soporte-netflx.com/", &[]);
        assert!(result.score >= 0);
        assert_eq!(result.joined(), result.signals.join(";"));
    }

    #[test]
    fn test_v2_with_shipped_whitelist() {
        let reference = shipped_reference();
        let whitelist = reference.whitelist().as_slice();

        let result = score_url_v2("https://bbva.es-login.com/sms", whitelist);
        assert_eq!(result.score, 14);
        assert_eq!(result.band(), ScoreBand::High);
        assert!(result.signals.contains(&"spanish_whitelist_match:bbva.es".to_string()));

        let result = score_url_v2("https://santandr.com/", whitelist);
        assert_eq!(result.score, 2);
        assert_eq!(result.signals, vec!["fuzzy_whitelist_match:santander.es:94"]);
        assert_eq!(result.band(), ScoreBand::Low);
    }

    #[test]
    fn test_version_dispatch() {
        let url = "http://pagamento-itau.com.br/acesso";
        assert_eq!(score_url(ScorerVersion::V1, url, &[]).score, -7);
        assert_eq!(score_url(ScorerVersion::V2, url, &[]).score, -5);
    }

    #[test]
    fn test_scores_are_stable() {
        let reference = shipped_reference();
        let whitelist = reference.whitelist().as_slice();
        for url in ["https://modifica-tu-entrega.es/", "bit.ly/correos-es", ""] {
            for version in [ScorerVersion::V1, ScorerVersion::V2] {
                assert_eq!(score_url(version, url, whitelist), score_url(version, url, whitelist));
            }
        }
    }

    #[test]
    fn test_empty_input_scores_zero() {
        for version in [ScorerVersion::V1, ScorerVersion::V2] {
            let result = score_url(version, "   ", &[]);
            assert_eq!(result.score, 0);
            assert!(result.signals.is_empty());
        }
    }
}
