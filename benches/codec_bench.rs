// In benches/codec_bench.rs

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use permalink_codec::kernels::CoordinateCodec;
use permalink_codec::{
    decode_features, decode_geometry, encode_features, encode_geometry, CodecConfig, Color,
    Feature, Fill, Geometry, Stroke, Style,
};

// --- Mock Data Generation ---

/// A wavy line of `n` vertices in projected metres, the kind of track a
/// permalink usually carries.
fn generate_track(n: usize) -> Vec<[f64; 2]> {
    (0..n)
        .map(|i| {
            let t = i as f64;
            [1_000_000.0 + t * 12.5, 6_000_000.0 + (t / 7.0).sin() * 350.0]
        })
        .collect()
}

/// A mixed collection of styled, attributed features.
fn generate_features(n: usize) -> Vec<Feature> {
    let style = Style {
        fill: Some(Fill::new(Color::rgb(0x33, 0x99, 0xcc))),
        stroke: Some(Stroke::new(Color::rgb(0, 0, 0), 2.0)),
        ..Style::default()
    };
    (0..n)
        .map(|i| {
            let geometry = match i % 3 {
                0 => Geometry::point(i as f64 * 100.0, i as f64 * -50.0),
                1 => Geometry::line_string(&generate_track(32)),
                _ => Geometry::polygon(&[generate_track(24)]),
            };
            Feature::new(geometry)
                .with_property("name", format!("feature {}", i))
                .with_property("kind", "survey")
                .with_style(style.clone())
        })
        .collect()
}

// --- Benchmark Suite ---

const TRACK_VERTICES: usize = 4096;
const COLLECTION_SIZE: usize = 256;

fn bench_coordinate_kernel(c: &mut Criterion) {
    let flat: Vec<f64> = generate_track(TRACK_VERTICES).into_iter().flatten().collect();
    let encoded = CoordinateCodec::new(1.0).encode(&flat, 2, 0, flat.len());

    let mut group = c.benchmark_group("Coordinate Delta Kernel");
    group.throughput(criterion::Throughput::Elements(TRACK_VERTICES as u64));
    group.bench_function("Encode", |b| {
        b.iter(|| {
            let mut codec = CoordinateCodec::new(1.0);
            black_box(codec.encode(black_box(&flat), 2, 0, flat.len()))
        })
    });
    group.bench_function("Decode", |b| {
        b.iter(|| {
            let mut codec = CoordinateCodec::new(1.0);
            black_box(codec.decode(black_box(&encoded)))
        })
    });
    group.finish();
}

fn bench_grammars(c: &mut Criterion) {
    let config = CodecConfig::default();
    let line = Geometry::line_string(&generate_track(TRACK_VERTICES));
    let features = generate_features(COLLECTION_SIZE);

    let encoded_line = encode_geometry(&line, &config).unwrap();
    let encoded_features = encode_features(&features, &config).unwrap();

    let mut group = c.benchmark_group("Permalink Grammars");
    group.bench_function("Encode Geometry [LineString]", |b| {
        b.iter(|| black_box(encode_geometry(black_box(&line), &config)))
    });
    group.bench_function("Decode Geometry [LineString]", |b| {
        b.iter(|| black_box(decode_geometry(black_box(&encoded_line), &config)))
    });
    group.bench_function("Encode Features [Mixed]", |b| {
        b.iter(|| black_box(encode_features(black_box(&features), &config)))
    });
    group.bench_function("Decode Features [Mixed]", |b| {
        b.iter(|| black_box(decode_features(black_box(&encoded_features), &config)))
    });
    group.finish();
}

criterion_group!(benches, bench_coordinate_kernel, bench_grammars);
criterion_main!(benches);
