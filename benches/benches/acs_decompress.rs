//! Benchmark suite for the ACS bit-stream decompressor
//!
//! Measures literal-heavy and back-reference-heavy workloads across several
//! output sizes.
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use msagent_benches::{literal_payload, run_payload, sizes};
use msagent_types::file::acs::decompress::decompress;
use std::hint::black_box;

fn bench_literals(c: &mut Criterion) {
	let mut group = c.benchmark_group("acs_decompress_literals");

	for (name, target_len) in
		[("small", sizes::SMALL), ("frame", sizes::FRAME), ("large", sizes::LARGE)]
	{
		let payload = literal_payload(target_len);
		group.throughput(Throughput::Bytes(target_len as u64));
		group.bench_with_input(BenchmarkId::new("decompress", name), &payload, |b, payload| {
			b.iter(|| {
				let result = decompress(black_box(payload), target_len);
				black_box(result)
			});
		});
	}

	group.finish();
}

fn bench_runs(c: &mut Criterion) {
	let mut group = c.benchmark_group("acs_decompress_runs");

	for (name, target_len) in
		[("small", sizes::SMALL), ("frame", sizes::FRAME), ("large", sizes::LARGE)]
	{
		let payload = run_payload(target_len);
		group.throughput(Throughput::Bytes(target_len as u64));
		group.bench_with_input(BenchmarkId::new("decompress", name), &payload, |b, payload| {
			b.iter(|| {
				let result = decompress(black_box(payload), target_len);
				black_box(result)
			});
		});
	}

	group.finish();
}

criterion_group!(benches, bench_literals, bench_runs);
criterion_main!(benches);
