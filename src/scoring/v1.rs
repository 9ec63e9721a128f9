use tracing::trace;

use super::fuzzy::ratio;
use super::lexicon::*;
use super::{contains_any, ScoreResult, ScoringInput, FUZZY_THRESHOLD};

/// First-generation Spanish campaign scorer.
///
/// `whitelist` holds lower-case legitimate domains; each is matched as a
/// substring first and then fuzzily against the URL's core label.
pub fn score_url_v1(url: &str, whitelist: &[String]) -> ScoreResult {
    let input = ScoringInput::new(url);
    let url_low = input.url_low.as_str();
    let netloc = input.netloc.as_str();
    let core = input.core();
    let mut result = ScoreResult::default();

    for kw in V1_POSITIVE_KEYWORDS {
        if url_low.contains(kw) {
            result.push(1, format!("has_kw:{}", kw));
        }
    }

    for marker in SPANISH_MARKERS {
        if url_low.contains(marker) {
            let delta = if *marker == ".es" { 2 } else { 1 };
            result.push(delta, format!("spanish_marker:{}", marker));
        }
    }

    for brand in V1_SPANISH_BRANDS {
        if url_low.contains(brand) {
            result.push(1, format!("spanish_brand:{}", brand));
        }
    }

    for hosting in V1_SPANISH_HOSTINGS {
        if url_low.contains(hosting) {
            result.push(2, format!("spanish_hosting:{}", hosting));
        }
    }

    if url_low.contains(".com.es") {
        result.push(2, "tld_combo_com_es");
    }

    if let Some(found) = ACTION_DELIVERY_REGEX.find(url_low) {
        result.push(2, format!("action_delivery:{}", found.as_str()));
    }

    if contains_any(url_low, V1_SUSPICIOUS_HOSTERS) && contains_any(url_low, V1_DELIVERY_TOKENS) {
        result.push(2, "susp_hoster_plus_delivery");
    }

    if url_low.contains(".es") {
        let generic_hits = V1_GENERIC_TOKENS
            .iter()
            .filter(|tok| url_low.contains(*tok))
            .count();
        if generic_hits >= 2 {
            result.push(3, "generic_service_combo_es");
        }
        if contains_any(url_low, V1_BANKING_TOKENS) {
            result.push(3, "banking_combo_es");
        }
        if contains_any(url_low, V1_INSTITUTIONAL_TOKENS)
            || contains_any(url_low, V1_PROFESSIONAL_TOKENS)
        {
            result.push(3, "institutional_professional_es");
        }
        if contains_any(url_low, V1_ECOMMERCE_TOKENS) {
            result.push(2, "ecommerce_combo_es");
        }
    }

    for legit in whitelist {
        if url_low.contains(legit.as_str()) {
            result.push(2, format!("spanish_whitelist_match:{}", legit));
            break;
        }
        let base = legit.split('.').next().unwrap_or_default();
        let sim = ratio(core, base);
        if sim >= FUZZY_THRESHOLD {
            result.push(2, format!("fuzzy_whitelist_match:{}:{:.0}", legit, sim));
            break;
        }
    }

    let has_brand = contains_any(url_low, V1_SPANISH_BRANDS);
    if has_brand && contains_any(url_low, V1_BRAND_CONTEXT_TOKENS) {
        result.push(2, "brand_plus_spanish_token");
    }

    let subdomain = input.subdomain();
    if !subdomain.is_empty() && contains_any(&subdomain, V1_SPANISH_BRANDS) {
        result.push(2, "brand_in_subdomain");
    }

    if contains_any(netloc, V1_SHORTENERS)
        && V1_SHORTENER_TOKENS
            .iter()
            .any(|tok| input.path.contains(tok) || input.query.contains(tok))
    {
        result.push(2, "shortener_spain");
    }

    if has_brand && contains_any(netloc, V1_GLOBAL_TLDS) && !netloc.contains(".es") {
        result.push(1, "brand_global_tld_boost");
    }

    for tld in LATAM_TLDS {
        if url_low.ends_with(tld) || url_low.contains(&format!("{}/", tld)) {
            result.push(-2, format!("latam_tld:{}", tld));
        }
    }

    for kw in V1_PORTUGUESE_TOKENS {
        if url_low.contains(kw) {
            result.push(-2, format!("pt_kw:{}", kw));
        }
    }

    for brand in LATAM_BRANDS {
        if url_low.contains(brand) {
            result.push(-1, format!("latam_brand:{}", brand));
        }
    }

    for brand in V1_SPANISH_BRANDS {
        let sim = ratio(core, brand);
        if sim >= FUZZY_THRESHOLD {
            result.push(2, format!("fuzzy_brand_match:{}:{:.0}", brand, sim));
            break;
        }
    }

    trace!("score_v1 {} -> {}", url_low, result.score);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_lookalike_without_spanish_context() {
        let result = score_url_v1("https://soporte-netflx.com/", &[]);
        assert_eq!(result.score, 0);
        assert_eq!(result.joined(), "");
    }

    #[test]
    fn test_brand_with_spanish_tokens() {
        let whitelist = vec!["bbva.es".to_string()];
        let result = score_url_v1("http://bbva-clientes.es/login", &whitelist);
        assert_eq!(result.score, 9);
        assert_eq!(
            result.joined(),
            "has_kw:cliente;spanish_marker:.es;spanish_brand:bbva;generic_service_combo_es;brand_plus_spanish_token"
        );
    }

    #[test]
    fn test_action_delivery_phrase() {
        let result = score_url_v1("https://modifica-tu-entrega.example.net/", &[]);
        assert!(result.signals.contains(&"action_delivery:modifica-tu-entrega".to_string()));
    }

    #[test]
    fn test_action_delivery_ignores_percent_encoded_text() {
        let result = score_url_v1("https://example.net/actualizar-env%C3%ADo", &[]);
        assert_eq!(result.score, 0);
        assert!(result.signals.is_empty());

        let result = score_url_v1("https://example.net/actualizar-envío", &[]);
        assert_eq!(result.signals, vec!["action_delivery:actualizar-envío"]);
        assert_eq!(result.score, 2);
    }

    #[test]
    fn test_scheme_less_input_skips_host_rules() {
        let result = score_url_v1("bit.ly/correos-es", &[]);
        assert_eq!(result.score, 3);
        assert_eq!(result.joined(), "spanish_brand:correos;brand_plus_spanish_token");

        let result = score_url_v1("https://bit.ly/correos-es", &[]);
        assert_eq!(result.score, 5);
        assert!(result.signals.contains(&"shortener_spain".to_string()));
    }

    #[test]
    fn test_latam_penalties_accumulate() {
        let result = score_url_v1("http://pagamento-itau.com.br/acesso", &[]);
        assert_eq!(
            result.signals,
            vec!["latam_tld:.br", "pt_kw:pagamento", "pt_kw:acesso", "latam_brand:itau"]
        );
        assert_eq!(result.score, -7);
    }

    #[test]
    fn test_fuzzy_whitelist_stops_at_first_hit() {
        let whitelist = vec!["santander.es".to_string(), "santandr.es".to_string()];
        let result = score_url_v1("https://santandr.com/", &whitelist);
        assert_eq!(
            result.signals.iter().filter(|s| s.contains("whitelist_match")).count(),
            1
        );
        assert!(result.signals.contains(&"fuzzy_whitelist_match:santander.es:94".to_string()));
        assert!(result.signals.contains(&"fuzzy_brand_match:santander:94".to_string()));
    }
}
