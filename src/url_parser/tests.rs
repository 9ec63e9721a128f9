use crate::url_parser::{
    ensure_scheme, last_path_segment, normalize, shannon_entropy, split_components,
    split_tokens, tokenize_path, ParsedUrl, SEGMENT_SEPARATORS,
};

// Normalizer
#[test]
fn test_normalize_full_url() {
    let parsed = normalize("https://www.clientes.bbva.es/login?step=1");
    assert_eq!(parsed.scheme, "https");
    assert_eq!(parsed.host, "www.clientes.bbva.es");
    assert_eq!(parsed.registered_domain, "bbva.es");
    assert_eq!(parsed.core_domain, "bbva");
    assert_eq!(parsed.subdomain, "www.clientes");
    assert_eq!(parsed.suffix, "es");
    assert_eq!(parsed.path, "/login");
    assert_eq!(parsed.query, "step=1");
    assert!(!parsed.is_ip);
}

#[test]
fn test_normalize_bare_domain_gets_http() {
    let parsed = normalize("  bbva.es/acceso  ");
    assert_eq!(parsed.normalized, "http://bbva.es/acceso");
    assert_eq!(parsed.scheme, "http");
    assert_eq!(parsed.registered_domain, "bbva.es");
    assert_eq!(parsed.path, "/acceso");
}

#[test]
fn test_normalize_keeps_uppercase_scheme() {
    assert_eq!(ensure_scheme("HTTPS://Example.com"), "HTTPS://Example.com");
    let parsed = normalize("HTTPS://Example.COM/Path");
    assert_eq!(parsed.scheme, "https");
    assert_eq!(parsed.host, "example.com");
    assert_eq!(parsed.path, "/Path");
}

#[test]
fn test_normalize_never_panics_on_garbage() {
    for raw in ["", "   ", "http://", "::::", "http://[::1", "%%%", "ñandú 💥"] {
        let parsed = normalize(raw);
        if parsed.is_empty() {
            assert_eq!(parsed, ParsedUrl::default());
        }
    }
    assert_eq!(normalize(""), ParsedUrl::default());
    assert_eq!(normalize("http://"), ParsedUrl::default());
}

#[test]
fn test_normalize_ip_host() {
    let parsed = normalize("http://192.168.1.1/login");
    assert!(parsed.is_ip);
    assert_eq!(parsed.host, "192.168.1.1");
    assert!(parsed.registered_domain.is_empty());
    assert!(parsed.core_domain.is_empty());
}

#[test]
fn test_normalize_netloc_keeps_port() {
    let parsed = normalize("http://User@Portal.Example.com:8080/x");
    assert_eq!(parsed.netloc, "user@portal.example.com:8080");
    assert_eq!(parsed.host, "portal.example.com");
}

#[test]
fn test_normalize_idn_host_stays_unicode() {
    let parsed = normalize("https://correós.es/envio");
    assert_eq!(parsed.host, "correós.es");
    assert_eq!(parsed.registered_domain, "correós.es");
    assert_eq!(parsed.core_domain, "correós");
    assert_eq!(parsed.suffix, "es");

    let parsed = normalize("https://xn--corres-fxa.es/envio");
    assert_eq!(parsed.core_domain, "correós");
}

#[test]
fn test_normalize_country_second_level_suffixes() {
    let parsed = normalize("https://tienda.com.pk/pago");
    assert_eq!(parsed.registered_domain, "tienda.com.pk");
    assert_eq!(parsed.core_domain, "tienda");

    let parsed = normalize("http://login.shop.co.th");
    assert_eq!(parsed.registered_domain, "shop.co.th");
    assert_eq!(parsed.subdomain, "login");
    assert_eq!(parsed.suffix, "co.th");
}

#[test]
fn test_decoded_path() {
    let parsed = normalize("https://correos.example.com/env%C3%ADo%20paquete");
    assert_eq!(parsed.path, "/env%C3%ADo%20paquete");
    assert_eq!(parsed.decoded_path, "/envío paquete");
}

#[test]
fn test_split_components_raw() {
    let parts = split_components("http://a.com/b/c?x=1&y=2#frag");
    assert_eq!(parts.netloc, "a.com");
    assert_eq!(parts.path, "/b/c");
    assert_eq!(parts.query, "x=1&y=2");

    let parts = split_components("http://a.com?x=1");
    assert_eq!(parts.netloc, "a.com");
    assert_eq!(parts.path, "");
    assert_eq!(parts.query, "x=1");
}

// Entropy
#[test]
fn test_entropy_reference_values() {
    assert_eq!(shannon_entropy(""), 0.0);
    assert_eq!(shannon_entropy("   "), 0.0);
    assert_eq!(shannon_entropy("aaaa"), 0.0);
    assert_eq!(shannon_entropy("ab"), 1.0);
    assert_eq!(shannon_entropy("clientes"), 2.75);
}

#[test]
fn test_entropy_is_deterministic() {
    let a = shannon_entropy("bbva-seguro");
    let b = shannon_entropy("bbva-seguro");
    assert_eq!(a.to_bits(), b.to_bits());
}

// Tokenizer
#[test]
fn test_tokenize_path_depth_is_structural() {
    let tokens = tokenize_path("/Verificacion-Datos/pago_tarjeta.php");
    assert_eq!(
        tokens.tokens,
        vec!["verificacion", "datos", "pago", "tarjeta", "php"]
    );
    assert_eq!(tokens.depth, 2);
}

#[test]
fn test_tokenize_path_encoded_space() {
    let tokens = tokenize_path("/mi%20cuenta");
    assert_eq!(tokens.tokens, vec!["mi", "cuenta"]);
    assert_eq!(tokens.depth, 1);
}

#[test]
fn test_tokenize_empty_path() {
    let tokens = tokenize_path("");
    assert!(tokens.tokens.is_empty());
    assert_eq!(tokens.depth, 0);
    assert_eq!(tokenize_path("/").depth, 0);
}

#[test]
fn test_last_segment_tokens() {
    assert_eq!(last_path_segment("/a/b/BBVA-login/"), "bbva-login");
    assert_eq!(last_path_segment(""), "");
    assert_eq!(
        split_tokens("bbva-login.php?x=1%20", &SEGMENT_SEPARATORS),
        vec!["bbva", "login", "php", "x", "1", "20"]
    );
}
