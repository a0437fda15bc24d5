use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use serde_json::json;
use sitegate_auth::{WebhookConfig, WebhookEvent, WebhookHandler, WebhookSecret, sign, verify};
use sitegate_core::TrustedDomain;

const HEADER: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9";

fn bench_verify(c: &mut Criterion) {
    let secret = WebhookSecret::from("benchmark-secret");
    let mut group = c.benchmark_group("verify");

    for payload_len in [32usize, 512, 4096] {
        let payload = "a".repeat(payload_len);
        let token = sign(HEADER, &payload, &secret);

        group.throughput(Throughput::Bytes(token.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(payload_len), &token, |b, token| {
            b.iter(|| verify(black_box(token), black_box(&secret)))
        });
    }

    group.finish();
}

fn bench_handle(c: &mut Criterion) {
    let secret = WebhookSecret::from("benchmark-secret");
    let handler = WebhookHandler::new(
        WebhookConfig::new(TrustedDomain::new("ghost.org").unwrap()).with_secret(secret.clone()),
    );
    let token = sign(HEADER, "eyJpc3MiOiJpZGVudGl0eSJ9", &secret);
    let body = json!({
        "user": {
            "email": "x@ghost.org",
            "user_metadata": { "full_name": "X" },
            "app_metadata": { "provider": "email", "roles": ["editor"] },
        }
    })
    .to_string();

    c.bench_function("handle_grant", |b| {
        b.iter(|| {
            let event = WebhookEvent::new(Some(&token), body.as_bytes());
            handler.handle(black_box(&event))
        })
    });
}

criterion_group!(benches, bench_verify, bench_handle);
criterion_main!(benches);
