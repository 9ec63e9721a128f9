use criterion::{black_box, criterion_group, criterion_main, Criterion};

use phish_scoring::features::{extract_features, FeatureSchema};
use phish_scoring::reference::ReferenceData;
use phish_scoring::scoring::{score_url, ScorerVersion};

const URLS: [&str; 6] = [
    "https://clientes.bbva.es/login",
    "http://bbva.es-login.com/sms?id=1&ref=abc",
    "https://correos-envio.xyz/paquete/entrega/modifica-tu-entrega",
    "https://santandr.com/",
    "http://pagamento-itau.com.br/acesso",
    "not a url",
];

fn reference() -> ReferenceData {
    ReferenceData::builder()
        .with_whitelist(["bbva.es", "santander.es", "correos.es"])
        .with_brands(["bbva", "santander", "correos"])
        .with_neutral_domains(["google.com"])
        .build()
}

fn bench_extractors(c: &mut Criterion) {
    let reference = reference();
    let mut group = c.benchmark_group("extract");
    for schema in FeatureSchema::ALL {
        group.bench_function(schema.as_str(), |b| {
            b.iter(|| {
                for url in URLS {
                    black_box(extract_features(schema, black_box(url), &reference));
                }
            })
        });
    }
    group.finish();
}

fn bench_scorers(c: &mut Criterion) {
    let reference = reference();
    let whitelist = reference.whitelist().as_slice();
    let mut group = c.benchmark_group("score");
    for version in [ScorerVersion::V1, ScorerVersion::V2] {
        group.bench_function(version.as_str(), |b| {
            b.iter(|| {
                for url in URLS {
                    black_box(score_url(version, black_box(url), whitelist));
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_extractors, bench_scorers);
criterion_main!(benches);
