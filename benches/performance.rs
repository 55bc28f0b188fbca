// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Performance benchmarks for pitchfit
//!
//! Run with: cargo bench
//!
//! These benchmarks measure:
//! - Table optimization for growing source sets
//! - Pitch projection throughput
//! - Pitch name parsing

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use pitchfit::{parse_pitch, Chord, FitOptions, Note, Pitch, PitchFitter, Scale, ScaleType};

/// Benchmark optimization against a diatonic scale
fn bench_optimize(c: &mut Criterion) {
    let mut group = c.benchmark_group("optimize");
    let scale = Scale::new(Note::C, ScaleType::Major);
    let options = FitOptions::default();

    for size in [2usize, 6, 12].iter() {
        let sources: Vec<Pitch> = (0..*size as Pitch).map(|i| 60 + i * 7).collect();
        group.bench_with_input(BenchmarkId::new("scale", size), &sources, |b, sources| {
            b.iter(|| PitchFitter::new(black_box(sources.iter().copied()), &scale, &options))
        });
    }

    let chord = Chord::parse("G7").expect("valid chord");
    let sources: Vec<Pitch> = (60..72).collect();
    group.bench_function("chord_chromatic", |b| {
        b.iter(|| PitchFitter::new(black_box(sources.iter().copied()), &chord, &options))
    });

    group.finish();
}

/// Benchmark projecting pitches through a fitted table
fn bench_fit_pitch(c: &mut Criterion) {
    let scale = Scale::new(Note::D, ScaleType::Dorian);
    let fitter = PitchFitter::new([61, 63, 66, 68, 70], &scale, &FitOptions::default());

    c.bench_function("fit_pitch_128", |b| {
        b.iter(|| {
            let mut sum = 0;
            for p in 0..128 {
                sum += fitter.fit_pitch(black_box(p));
            }
            black_box(sum)
        })
    });
}

/// Benchmark pitch name parsing
fn bench_parse_pitch(c: &mut Criterion) {
    let names = ["C4", "F#3", "Bb-1", "ebb2", "G9", "A"];

    c.bench_function("parse_pitch", |b| {
        b.iter(|| {
            for name in names.iter() {
                black_box(parse_pitch(black_box(name)).ok());
            }
        })
    });
}

criterion_group!(benches, bench_optimize, bench_fit_pitch, bench_parse_pitch);
criterion_main!(benches);
