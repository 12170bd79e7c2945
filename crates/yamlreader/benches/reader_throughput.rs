//! Benchmark – `yamlreader::Reader` over each source shape
#![allow(missing_docs)]

use std::{io::Cursor, time::Duration};

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use yamlreader::{Input, Reader, ReaderOptions, SENTINEL};

/// Produce a deterministic YAML-ish document of at least `target_len` bytes,
/// mixing ASCII, multi-byte characters and CRLF line ends so that decoding,
/// validation and line accounting are all exercised.
fn make_yaml_payload(target_len: usize) -> String {
    let mut s = String::with_capacity(target_len + 64);
    let mut i = 0usize;
    while s.len() < target_len {
        s.push_str(&format!("key_{i}: «välue» {i}\r\n"));
        i += 1;
    }
    s
}

/// Consume the whole input one scanner-sized step at a time and return the
/// number of line breaks seen, so the work cannot be optimised away.
fn run_reader(mut reader: Reader<'_>) -> usize {
    loop {
        if reader.peek(0).unwrap() == SENTINEL {
            return reader.line();
        }
        let step = reader.prefix(4).unwrap().chars().count().min(4);
        reader.forward(step).unwrap();
    }
}

fn bench_reader(c: &mut Criterion) {
    let payload = make_yaml_payload(256 * 1024);

    let mut group = c.benchmark_group("reader");
    group.throughput(Throughput::Bytes(payload.len() as u64));

    group.bench_function("text", |b| {
        b.iter(|| black_box(run_reader(Reader::from_text(black_box(&payload)).unwrap())));
    });

    for &chunk_size in &[64usize, 4_096, 65_536] {
        let options = ReaderOptions {
            chunk_size,
            ..Default::default()
        };
        group.bench_with_input(BenchmarkId::new("bytes", chunk_size), &options, |b, o| {
            b.iter(|| {
                let input = Input::Bytes(black_box(payload.as_bytes()));
                black_box(run_reader(Reader::new(input, o.clone()).unwrap()))
            });
        });
        group.bench_with_input(BenchmarkId::new("handle", chunk_size), &options, |b, o| {
            b.iter(|| {
                let input = Input::Handle(Box::new(Cursor::new(black_box(payload.as_bytes()))));
                black_box(run_reader(Reader::new(input, o.clone()).unwrap()))
            });
        });
    }
    group.finish();
}

fn criterion() -> Criterion {
    let mut c = Criterion::default();
    if cfg!(feature = "bench-fast") {
        c = c
            .warm_up_time(Duration::from_millis(10))
            .measurement_time(Duration::from_millis(100))
            .sample_size(10);
    } else {
        c = c
            .warm_up_time(Duration::from_secs(3))
            .measurement_time(Duration::from_secs(10));
    }
    c
}

criterion_group! { name = benches; config = criterion(); targets = bench_reader }
criterion_main!(benches);
