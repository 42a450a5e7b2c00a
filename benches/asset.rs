use criterion::{BatchSize, Criterion, Throughput};
use liveintersect::asset::{Asset, Metric, MetricValue, post_metric, post_metrics};
use liveintersect::config::AssetConfig;
use liveintersect::network::error::Error as NetworkError;
use liveintersect::network::{Close, Connect, Connection, Read, Write};
use rand::Rng;

const OK_RESPONSE: &[u8] = b"HTTP/1.1 200 OK\r\nContent-Length: 15\r\n\r\n{\"status\":\"OK\"}";

/// Answers every request with [`OK_RESPONSE`] without touching a socket.
pub struct LoopbackNetwork;

pub struct LoopbackConnection {
    read_pos: usize,
}

impl Read for LoopbackConnection {
    type Error = ();
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let remaining = &OK_RESPONSE[self.read_pos..];
        let len = buf.len().min(remaining.len());
        buf[..len].copy_from_slice(&remaining[..len]);
        self.read_pos += len;
        Ok(len)
    }
}

impl Write for LoopbackConnection {
    type Error = ();
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl Close for LoopbackConnection {
    type Error = ();
    fn close(self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl Connection for LoopbackConnection {}

impl Connect for LoopbackNetwork {
    type Connection = LoopbackConnection;
    type Error = NetworkError;
    fn connect(&mut self, _remote: &str) -> Result<Self::Connection, Self::Error> {
        Ok(LoopbackConnection { read_pos: 0 })
    }
}

fn setup_asset() -> Asset<LoopbackNetwork> {
    let config = AssetConfig::new("http://sandbox.liveintersect.com/", "bench-key", "BENCH-1", "bench")
        .expect("Failed to build config");
    Asset::new(LoopbackNetwork, config)
        .expect("Failed to create asset")
        .with_login("1", "bench-login")
        .expect("Failed to set login")
}

fn random_reading(rng: &mut impl Rng) -> String {
    format!("{:.1}C", rng.gen_range(-20.0..120.0))
}

pub fn bench_post_metric(c: &mut Criterion) {
    let mut group = c.benchmark_group("post_metric");
    group.throughput(Throughput::Elements(1));
    group.bench_function("post_metric", |b| {
        let mut rng = rand::thread_rng();
        b.iter_batched_ref(
            || (setup_asset(), random_reading(&mut rng)),
            |(asset, value)| {
                post_metric(asset, "temp", value).expect("Failed to post metric");
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

pub fn bench_post_metrics_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("post_metrics_batch");
    group.throughput(Throughput::Elements(8));
    group.bench_function("post_metrics_batch", |b| {
        let mut rng = rand::thread_rng();
        b.iter_batched_ref(
            || {
                let readings: Vec<String> = (0..8).map(|_| random_reading(&mut rng)).collect();
                (setup_asset(), readings)
            },
            |(asset, readings)| {
                let values: Vec<MetricValue> =
                    readings.iter().map(|r| MetricValue::new(r)).collect();
                post_metrics(asset, &[Metric::new("temp", &values)])
                    .expect("Failed to post metrics");
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}
