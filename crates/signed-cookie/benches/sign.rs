use criterion::{black_box, criterion_group, criterion_main, Criterion};
use signed_cookie::{InMemoryCookieJar, SignedCookieSigner};

pub fn criterion_benchmark(c: &mut Criterion) {
    let signer =
        SignedCookieSigner::new("example.com", "/", "9999999999", [0u8; 32], "sha256").unwrap();
    let value = "a".repeat(256);

    c.bench_function("sign_sha256_256b", |b| {
        b.iter(|| signer.sign(black_box(&value)))
    });

    let jar = InMemoryCookieJar::new();
    signer.set_cookie(&jar, "session", &value).unwrap();

    c.bench_function("is_valid_sha256_256b", |b| {
        b.iter(|| signer.is_valid(&jar, black_box("session"), black_box(&value)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
