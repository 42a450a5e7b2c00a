use criterion::{criterion_group, criterion_main};

mod asset;

criterion_group!(
    benches,
    asset::bench_post_metric,
    asset::bench_post_metrics_batch,
    http::bench_encode_request,
    http::bench_read_response
);
criterion_main!(benches);
