//! Word lists and patterns for the heuristic scorers. List order is
//! significant: signals are emitted in the order entries appear.

use once_cell::sync::Lazy;
use regex::Regex;

pub const SPANISH_MARKERS: &[&str] = &[".es", "+34", "€"];

pub const LATAM_TLDS: &[&str] = &[
    ".co", ".mx", ".cl", ".ar", ".br", ".pe", ".ec", ".uy", ".py", ".bo", ".sv", ".hn", ".cr",
    ".gt", ".do",
];

pub const LATAM_BRANDS: &[&str] = &["banrural", "pichincha", "itau", "bradesco", "yape", "daviplata"];

// v1

pub const V1_POSITIVE_KEYWORDS: &[&str] = &[
    "multa",
    "pago",
    "verificación",
    "cliente",
    "acceso",
    "seguridad",
    "confirmación",
    "factura",
    "tarjeta",
];

pub const V1_SPANISH_BRANDS: &[&str] = &[
    // banking
    "bbva", "santander", "caixabank", "bankia", "bankinter", "openbank", "evo", "abanca",
    "unicaja", "kutxabank", "cajarural", "ing", "imaginbank",
    // telecom
    "movistar", "orange", "jazztel", "yoigo", "masmovil", "lowi", "pepephone",
    // parcel delivery
    "correos", "mrw", "seur", "gls", "nacex", "dhl", "envialia",
    // energy
    "iberdrola", "endesa", "naturgy", "repsol", "totalenergies",
    // retail
    "elcorteingles", "zara", "aliexpress", "amazon", "carrefour", "mediamarkt", "pccomponentes",
    // public administration
    "dgt", "aeat", "seg-social", "sede", "mapfre", "fnmt", "redsara", "catastro", "interior",
    // hosting
    "ionos", "dinahosting", "hostalia", "cdmon",
];

pub const V1_SPANISH_HOSTINGS: &[&str] = &["webcindario", "rf.gd"];

pub const V1_GENERIC_TOKENS: &[&str] = &[
    "servicio", "soporte", "atencion", "cliente", "usuarios", "ayuda", "asistencia", "cuenta",
    "acceso", "inicio", "login", "sesion", "datos", "perfil", "portal", "seguridad",
    "verificacion", "confirmacion", "actualizacion", "validacion", "auth", "clave", "codigo",
    "envio", "entrega", "paquete", "pedido", "multa", "factura", "notificacion", "aviso", "gob",
    "oficial", "tramite", "tramites", "agencia", "impuestos", "certificado",
];

pub const V1_BANKING_TOKENS: &[&str] = &[
    "banco", "banca", "bank", "banking", "transferencia", "tarjeta", "pin", "clave", "codigo",
    "validacion", "firma", "token", "sms", "autenticacion", "movimientos", "saldo",
    "oficinavirtual", "bancamovil", "appbanco", "bancadigital", "acceso", "usuarios",
    "verificacion", "serviciocliente", "soportecliente",
];

pub const V1_INSTITUTIONAL_TOKENS: &[&str] = &[
    "ayuntamiento", "gob", "gobierno", "agencia", "tramite", "tramites", "oficial", "certificado",
    "seg-social", "catastro", "impuestos", "tributos", "dgt", "hacienda", "dni", "salud",
    "sanidad",
];

pub const V1_PROFESSIONAL_TOKENS: &[&str] = &[
    "asesoria", "gestoria", "abogado", "despacho", "consultoria", "contable", "laboral", "fiscal",
    "bufete", "notaria",
];

pub const V1_ECOMMERCE_TOKENS: &[&str] = &[
    "pedido", "pedidos", "compra", "compras", "factura", "facturas", "recibo", "recibos",
    "abonado", "tarifa", "tarifas", "servicios", "renovar", "renovacion", "contrato",
    "suscripcion", "envio", "entrega", "paquete", "envios", "devolucion",
];

pub const V1_GLOBAL_TLDS: &[&str] = &[".com", ".app", ".net", ".org", ".io", ".web.app", ".dev"];

pub const V1_DELIVERY_TOKENS: &[&str] = &["entrega", "envio", "envío", "pedido", "paquete"];

pub const V1_SUSPICIOUS_HOSTERS: &[&str] = &[
    "github.io",
    "forms.app",
    "pages.dev",
    "pages.github",
    "netlify.app",
    "webflow.io",
];

pub const V1_BRAND_CONTEXT_TOKENS: &[&str] = &[
    "ayuda", "cliente", "esapp", "es", "spain", "movil", "ayuntamiento", "paqueteria", "paquete",
    "envio", "entrega",
];

pub const V1_SHORTENERS: &[&str] = &["l.ead.me", "bit.ly", "t.co", "tinyurl.com", "ow.ly", "is.gd"];

pub const V1_SHORTENER_TOKENS: &[&str] = &[
    "spain", "es", "dgt", "bbva", "correos", "ing", "santander", "caixabank",
];

pub const V1_PORTUGUESE_TOKENS: &[&str] = &["pagamento", "fatura", "acesso", "faturas"];

/// Action verb, optional possessive, delivery noun, joined by separators
pub static ACTION_DELIVERY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(modifica|modificar|actualiza|actualizar|cambia|cambiar|reprograma|reprogramar|ajusta|ajustar|corrige|corregir)[-_%2d]*(tu|mi|su)?[-_%2d]*(entrega|envio|envío|pedido|paquete)",
    )
    .unwrap()
});

// v2

pub const V2_SPANISH_BRANDS: &[&str] = &[
    "santander", "bbva", "caixabank", "bankinter", "ing", "unicaja", "correos", "aeat", "dgt",
    "ionos", "orange", "movistar", "mapfre", "seg-social", "gobierno", "dhl", "seur", "bbvaabank",
];

pub const V2_SPANISH_TOKENS: &[&str] = &[
    "cliente", "clientes", "tarjeta", "pago", "pagos", "factura", "facturas", "multa", "acceso",
    "login", "entrada", "inicio", "sesion", "seguridad", "confirmacion", "verificacion", "envio",
    "entrega", "paquete", "paquetes", "pedido", "pedidos", "datos", "perfil", "cuenta", "cuentas",
    "portal", "notificacion", "notificaciones", "aviso", "mensajeria", "mensaje", "mensajes",
    "actualizacion", "renovar", "renovacion", "certificado", "usuario", "usuarios", "banco",
    "banca", "oficina", "oficinavirtual", "movil", "bancamovil", "suscripcion", "compra",
    "compras", "recibo", "recibos", "gob", "oficial", "tramite", "tramites", "agencia",
    "impuestos", "dni", "salud", "sanidad", "seg-social", "particulares", "forma", "espera",
    "recibir", "codigo", "clave", "sms", "pin", "verificacion", "token", "firma", "validacion",
];

pub const V2_VERIFICATION_TOKENS: &[&str] = &[
    "sms",
    "codigo",
    "pin",
    "verificacion",
    "clave",
    "token",
    "pin",
    "dni",
    "recibir",
    "espera",
    "forma",
    "codigo_incorrecta",
    "codigo_incorrecto",
];

pub const V2_SPANISH_HOSTINGS: &[&str] = &[
    "webcindario",
    "rf.gd",
    "tempurl.host",
    "10web.site",
    "freewebhostmost.com",
    "preview-domain.com",
    "codeanyapp.com",
    "fsthosting.com",
    "cprapid.com",
    "suportededicado.net",
    "page.link",
    "firebaseapp.com",
    "web.app",
    "appspot.com",
    "pages.dev",
    "weebly.com",
];

pub const V2_RISKY_TLDS: &[&str] = &[
    ".xyz", ".top", ".shop", ".bond", ".info", ".vip", ".cc", ".online", ".lol", ".site", ".casa",
    ".cloud", ".live", ".host", ".support", ".review", ".link", ".app", ".dev", ".ml", ".tk",
    ".ga", ".cf",
];

pub const V2_GLOBAL_TLDS: &[&str] = &[".com", ".net", ".org", ".app", ".dev"];

pub const V2_SUSPICIOUS_HOSTS: &[&str] = &[
    "fsthosting",
    "codeanyapp",
    "preview-domain",
    "cprapid",
    "suportededicado",
];

pub const V2_SHORTENERS: &[&str] = &[
    "l.ead.me",
    "bit.ly",
    "t.co",
    "tinyurl.com",
    "ow.ly",
    "is.gd",
    "page.link",
];

pub const V2_SHORTENER_TOKENS: &[&str] = &[
    "es", "spain", "bbva", "correos", "ing", "santander", "caixabank",
];

pub const V2_PORTUGUESE_TOKENS: &[&str] = &[
    "pagamento", "fatura", "faturas", "acesso", "conta", "cliente-pt",
];

pub const V2_ENGLISH_TOKENS: &[&str] = &[
    "reset", "secure", "security", "details", "update", "validation", "validate", "online",
    "account", "user", "users", "customer", "customers", "payees", "authorize", "authorization",
    "login", "access", "confirm", "payment", "invoice", "billing", "statement", "service",
    "services", "support", "details", "sessions", "portal",
];

/// Automated campaign hosts on `*.ewp.live`
pub static INGRESS_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"ingress-[a-z0-9]+\.ewp\.live").unwrap());

/// Legitimate ING references: `ing.`, `ing-`, `ingbank`, `ingdirect`, ...
pub static ING_LEGIT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bing(\.|-|bank|direct|es|\.es)\b").unwrap());

/// `ing` embedded inside a longer word, e.g. `hiringindia`
pub static ING_EMBEDDED_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z]+ing[a-z]+").unwrap());

/// CMS and webmail paths seen on hacked legitimate sites
pub static COMPROMISED_PATH_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(wp-|plugins|themes|includes|vendor/phpunit|css/|js/|webmail)").unwrap()
});
