//! Hex codec benchmarks using Criterion.
//!
//! Covers the conversions on the per-field hot path: byte encoding for the
//! common identifier widths, quantity parsing in both radixes, and the
//! arbitrary-precision decimal-to-hex amount conversion.

#![allow(clippy::cast_possible_truncation)] // Acceptable: intentional byte wrapping in test data

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use evmwire_core::hex::{
    bytes_to_hex, bytes_to_hex_fixed, bytes_to_quantity_hex, decimal_string_to_hex, hex_to_bytes,
    numberish_to_u64,
};
use std::hint::black_box;

/// Benchmark byte-to-hex encoding for the wire's common field widths
fn bench_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("hex_encoding");

    // address, hash, bloom filter, large calldata
    let sizes: [usize; 4] = [20, 32, 256, 1024];

    for size in &sizes {
        let data: Vec<u8> = (0..*size).map(|i| i as u8).collect();
        group.throughput(Throughput::Bytes(*size as u64));

        group.bench_with_input(BenchmarkId::new("bytes_to_hex", size), &data, |b, data| {
            b.iter(|| bytes_to_hex(black_box(data)));
        });
    }

    let r_component: [u8; 28] = [0xAB; 28];
    group.bench_function("bytes_to_hex_fixed_32", |b| {
        b.iter(|| bytes_to_hex_fixed(black_box(&r_component), 32));
    });

    let v: [u8; 2] = [0x01, 0xc8];
    group.bench_function("bytes_to_quantity_hex", |b| {
        b.iter(|| bytes_to_quantity_hex(black_box(&v)));
    });

    group.finish();
}

/// Benchmark hex decoding for the same widths
fn bench_decoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("hex_decoding");

    let sizes: [usize; 4] = [20, 32, 256, 1024];

    for size in &sizes {
        let data: Vec<u8> = (0..*size).map(|i| i as u8).collect();
        let encoded = bytes_to_hex(&data);
        group.throughput(Throughput::Bytes(*size as u64));

        group.bench_with_input(BenchmarkId::new("hex_to_bytes", size), &encoded, |b, s| {
            b.iter(|| hex_to_bytes(black_box(s)));
        });
    }

    group.finish();
}

/// Benchmark numeric parsing in both wire radixes
fn bench_numberish(c: &mut Criterion) {
    let mut group = c.benchmark_group("numberish");

    group.bench_function("numberish_to_u64_hex", |b| {
        b.iter(|| numberish_to_u64(black_box("0x14d7e10")));
    });

    group.bench_function("numberish_to_u64_decimal", |b| {
        b.iter(|| numberish_to_u64(black_box("21854736")));
    });

    group.finish();
}

/// Benchmark amount conversion, including values past 2^64
fn bench_amounts(c: &mut Criterion) {
    let mut group = c.benchmark_group("amounts");

    group.bench_function("decimal_string_to_hex_small", |b| {
        b.iter(|| decimal_string_to_hex(black_box("1000000000")));
    });

    group.bench_function("decimal_string_to_hex_wei", |b| {
        b.iter(|| decimal_string_to_hex(black_box("340282366920938463463374607431768211456")));
    });

    group.bench_function("decimal_string_to_hex_passthrough", |b| {
        b.iter(|| decimal_string_to_hex(black_box("0x56bc75e2d63100000")));
    });

    group.finish();
}

criterion_group!(benches, bench_encoding, bench_decoding, bench_numberish, bench_amounts);

criterion_main!(benches);
