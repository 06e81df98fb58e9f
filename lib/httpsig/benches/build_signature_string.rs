use criterion::{criterion_group, criterion_main, Criterion};
use httpsig::RequestContent;
use std::hint::black_box;

const HEADERS: &[&str] = &[
    "(request-target)",
    "host",
    "date",
    "content-type",
    "digest",
    "content-length",
];

fn build_signature_string(c: &mut Criterion) {
    let content = RequestContent::builder()
        .request_target("GET", "/foo?param=value&pet=dog")
        .header("Host", "example.com")
        .header("Date", "Sun, 05 Jan 2014 21:31:40 GMT")
        .header("Content-Type", "application/json")
        .header(
            "Digest",
            "SHA-256=X48E9qOokqqrvdts8nOJRJN3OWDUoyWxBf7kbu9DBPE=",
        )
        .header("Content-Length", "18")
        .build()
        .unwrap();

    c.bench_function("build_signature_string", |b| {
        b.iter(|| black_box(&content).signing_string(black_box(HEADERS)));
    });
}

criterion_group!(benches, build_signature_string);
criterion_main!(benches);
