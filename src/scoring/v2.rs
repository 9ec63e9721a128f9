use tracing::trace;

use super::fuzzy::ratio;
use super::lexicon::*;
use super::{contains_any, ScoreResult, ScoringInput, FUZZY_THRESHOLD};

/// Second-generation scorer: adds brand/token context combos, path
/// verification tokens, infrastructure signals and false-positive
/// handling for the `ing` brand and hacked `.es` sites.
pub fn score_url_v2(url: &str, whitelist: &[String]) -> ScoreResult {
    let input = ScoringInput::new(url);
    let url_low = input.url_low.as_str();
    let netloc = input.netloc.as_str();
    let path = input.path.as_str();
    let core = input.core();
    let mut result = ScoreResult::default();

    // Spanish brands and vocabulary
    let mut has_brand = false;
    for brand in V2_SPANISH_BRANDS {
        if url_low.contains(brand) {
            result.push(1, format!("spanish_brand:{}", brand));
            has_brand = true;
        }
    }

    let mut spanish_tokens = 0usize;
    for token in V2_SPANISH_TOKENS {
        if url_low.contains(token) {
            result.push(1, format!("spanish_token:{}", token));
            spanish_tokens += 1;
        }
    }

    for marker in SPANISH_MARKERS {
        if url_low.contains(marker) {
            let delta = if *marker == ".es" { 2 } else { 1 };
            result.push(delta, format!("spanish_marker:{}", marker));
        }
    }

    for hosting in V2_SPANISH_HOSTINGS {
        if netloc.contains(hosting) {
            result.push(2, format!("spanish_hosting:{}", hosting));
        }
    }

    // Context combinations
    if has_brand && spanish_tokens >= 1 {
        result.push(3, "brand_and_spanish_token_boost");
    }

    if let Some(brand) = V2_SPANISH_BRANDS
        .iter()
        .find(|b| path.contains(**b) && !netloc.contains(**b))
    {
        result.push(2, format!("brand_in_path:{}", brand));
    }

    if let Some(token) = V2_VERIFICATION_TOKENS.iter().find(|t| path.contains(**t)) {
        result.push(2, format!("path_verification_tokens:{}", token));
    }

    let subdomain = input.subdomain();
    if !subdomain.is_empty() && contains_any(&subdomain, V2_SPANISH_BRANDS) {
        result.push(2, "brand_in_subdomain");
    }

    let has_es_in_netloc = netloc.contains(".es");
    if has_brand
        && V2_GLOBAL_TLDS.iter().any(|tld| netloc.ends_with(tld))
        && !has_es_in_netloc
    {
        result.push(2, "brand_global_tld_boost");
    }

    if V2_RISKY_TLDS.iter().any(|tld| netloc.ends_with(tld)) {
        result.push(1, "tld_riesgo_alto");
        if has_brand && spanish_tokens >= 1 {
            result.push(2, "foreign_tld_but_es_context");
        }
    }

    if contains_any(netloc, V2_SUSPICIOUS_HOSTS) {
        result.push(1, "suspicious_host");
    }

    if INGRESS_REGEX.is_match(netloc) {
        result.push(2, "host_ingress_pattern");
    }

    if contains_any(netloc, V2_SHORTENERS)
        && V2_SHORTENER_TOKENS
            .iter()
            .any(|tok| path.contains(tok) || input.query.contains(tok))
    {
        result.push(2, "shortener_spain");
    }

    // Penalties
    if let Some(tld) = LATAM_TLDS.iter().find(|tld| netloc.ends_with(**tld)) {
        result.push(-2, format!("latam_tld:{}", tld));
    }

    if let Some(token) = V2_PORTUGUESE_TOKENS.iter().find(|t| url_low.contains(**t)) {
        result.push(-2, format!("pt_kw:{}", token));
    }

    if let Some(brand) = LATAM_BRANDS.iter().find(|b| url_low.contains(**b)) {
        result.push(-1, format!("latam_brand:{}", brand));
    }

    if has_brand && contains_any(url_low, V2_ENGLISH_TOKENS) && spanish_tokens <= 1 {
        result.push(-1, "english_term_in_path");
    }

    if is_ing_false_positive(url_low, netloc, path) {
        result.push(-2, "ing_false_positive");
        if spanish_tokens >= 1 {
            result.push(2, "ing_path_exception");
        }
    }

    if has_es_in_netloc && COMPROMISED_PATH_REGEX.is_match(path) {
        result.push(-5, "compromised_host_es");
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

    trace!("score_v2 {} -> {}", url_low, result.score);
    result
}

/// `ing` embedded in a longer word, with no host label equal to `ing` and
/// no legitimate ING spelling anywhere in the URL.
fn is_ing_false_positive(url_low: &str, netloc: &str, path: &str) -> bool {
    if !url_low.contains("ing") {
        return false;
    }
    let brand_label = netloc.split('.').any(|label| label == "ing");
    if brand_label || ING_LEGIT_REGEX.is_match(url_low) {
        return false;
    }
    let text = format!("{}{}", netloc, path);
    text.split(|c: char| matches!(c, '-' | '/' | '.' | '_'))
        .any(|token| ING_EMBEDDED_REGEX.is_match(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn whitelist(domains: &[&str]) -> Vec<String> {
        domains.iter().map(|d| d.to_string()).collect()
    }

    #[test]
    fn test_brand_subdomain_with_fake_es() {
        let result = score_url_v2("https://bbva.es-login.com/sms", &whitelist(&["bbva.es"]));
        assert_eq!(result.score, 14);
        assert_eq!(
            result.joined(),
            "spanish_brand:bbva;spanish_token:login;spanish_token:sms;spanish_marker:.es;\
             brand_and_spanish_token_boost;path_verification_tokens:sms;brand_in_subdomain;\
             spanish_whitelist_match:bbva.es"
        );
    }

    #[test]
    fn test_latam_penalties_break_after_first() {
        let result = score_url_v2("http://pagamento-itau.com.br/acesso", &[]);
        assert_eq!(result.score, -5);
        assert_eq!(result.joined(), "latam_tld:.br;pt_kw:pagamento;latam_brand:itau");
    }

    #[test]
    fn test_fuzzy_whitelist_match() {
        let result = score_url_v2("https://santandr.com/", &whitelist(&["santander.es"]));
        assert_eq!(result.score, 2);
        assert_eq!(result.joined(), "fuzzy_whitelist_match:santander.es:94");
    }

    #[test]
    fn test_compromised_es_host() {
        let result = score_url_v2("https://panaderia.es/wp-content/uploads/x.zip", &[]);
        assert!(result.signals.contains(&"compromised_host_es".to_string()));
    }

    #[test]
    fn test_ing_false_positive() {
        let result = score_url_v2("https://hiringindia.com/jobs", &[]);
        assert!(result.signals.contains(&"ing_false_positive".to_string()));
        assert!(!result.signals.contains(&"ing_path_exception".to_string()));
        assert!(result.signals.contains(&"spanish_brand:ing".to_string()));
    }

    #[test]
    fn test_real_ing_host_is_not_false_positive() {
        let result = score_url_v2("https://ing.es/clientes", &[]);
        assert!(!result.signals.contains(&"ing_false_positive".to_string()));
    }

    #[test]
    fn test_ingress_host_and_risky_tld() {
        let result = score_url_v2("https://ingress-a1b2.ewp.live/correos/paquete", &[]);
        assert!(result.signals.contains(&"host_ingress_pattern".to_string()));
        assert!(result.signals.contains(&"tld_riesgo_alto".to_string()));
        assert!(result.signals.contains(&"foreign_tld_but_es_context".to_string()));
        assert!(result.signals.contains(&"brand_in_path:correos".to_string()));
    }
}
