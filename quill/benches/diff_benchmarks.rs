use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use quill::ErrorCounting;
use quill::diff::{classify_chars, count_errors_chars};
use quill::math::{Consistency, accuracy_chars, live_accuracy_chars};

fn code_of_len(len: usize) -> Vec<char> {
    "fn main() {\n    let x = vec![1, 2, 3];\n    println!(\"{x:?}\");\n}\n"
        .chars()
        .cycle()
        .take(len)
        .collect()
}

// Same length as the target, with every 7th character wrong
fn typed_with_mistakes(target: &[char]) -> Vec<char> {
    target
        .iter()
        .enumerate()
        .map(|(i, &c)| if i % 7 == 0 { '#' } else { c })
        .collect()
}

fn benchmark_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");

    for len in [100, 1_000, 10_000] {
        let target = code_of_len(len);
        let typed = typed_with_mistakes(&target);
        let half = &typed[..len / 2];

        group.bench_with_input(
            BenchmarkId::new("complete", format!("{len}chars")),
            &(&target, &typed),
            |b, (target, typed)| b.iter(|| classify_chars(black_box(target), black_box(typed))),
        );

        group.bench_with_input(
            BenchmarkId::new("half_typed", format!("{len}chars")),
            &(&target, half),
            |b, (target, typed)| b.iter(|| classify_chars(black_box(target), black_box(typed))),
        );
    }

    group.finish();
}

fn benchmark_count_errors(c: &mut Criterion) {
    let mut group = c.benchmark_group("count_errors");

    for len in [100, 1_000, 10_000] {
        let target = code_of_len(len);
        let typed = typed_with_mistakes(&target);

        for counting in [ErrorCounting::Overrun, ErrorCounting::LengthDelta] {
            group.bench_with_input(
                BenchmarkId::new(counting.to_string(), format!("{len}chars")),
                &(&target, &typed),
                |b, (target, typed)| {
                    b.iter(|| count_errors_chars(black_box(target), black_box(typed), counting))
                },
            );
        }
    }

    group.finish();
}

fn benchmark_accuracy(c: &mut Criterion) {
    let mut group = c.benchmark_group("accuracy");

    let target = code_of_len(5_000);
    let typed = typed_with_mistakes(&target);

    group.bench_function("final", |b| {
        b.iter(|| accuracy_chars(black_box(&target), black_box(&typed)))
    });
    group.bench_function("live", |b| {
        b.iter(|| live_accuracy_chars(black_box(&target), black_box(&typed[..2_500])))
    });

    group.finish();
}

fn benchmark_consistency(c: &mut Criterion) {
    let mut group = c.benchmark_group("consistency");

    for count in [10, 100, 1_000] {
        let samples: Vec<f64> = (0..count).map(|i| 60.0 + (i % 13) as f64).collect();

        group.bench_with_input(BenchmarkId::new("calculate", count), &samples, |b, samples| {
            b.iter(|| Consistency::calculate(black_box(samples)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_classify,
    benchmark_count_errors,
    benchmark_accuracy,
    benchmark_consistency
);
criterion_main!(benches);
