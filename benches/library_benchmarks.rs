//! # Tunebook Performance Benchmarks
//!
//! Benchmarks for the sorted library and the playback queue.
//!
//! ```bash
//! cargo bench
//! cargo bench library
//! ```

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use std::hint::black_box;
use tunebook::library::SortedLibrary;
use tunebook::queue::PlaybackQueue;
use tunebook::track::{Track, TrackDuration};

fn make_tracks(count: usize) -> Vec<Track> {
    (0..count)
        .map(|i| {
            Track::new(
                format!("Title {:05}", (i * 7919) % count),
                format!("Artist {}", i % 17),
                format!("Album {}", i % 31),
                TrackDuration::from_secs((i % 600) as u64),
                Vec::new(),
            )
        })
        .collect()
}

fn benchmark_library(c: &mut Criterion) {
    let mut group = c.benchmark_group("library");

    for size in [100, 1_000, 5_000].iter() {
        group.bench_with_input(BenchmarkId::new("insert_all", size), size, |b, &size| {
            b.iter_batched(
                || make_tracks(size),
                |tracks| black_box(SortedLibrary::from_tracks(tracks)),
                BatchSize::SmallInput,
            );
        });

        let library = SortedLibrary::from_tracks(make_tracks(*size));
        let probe = format!("title {:05}", size / 2);
        group.bench_with_input(BenchmarkId::new("find_exact", size), &probe, |b, probe| {
            b.iter(|| black_box(library.find_exact(probe)));
        });
        group.bench_with_input(
            BenchmarkId::new("find_all_by_title", size),
            &probe,
            |b, probe| {
                b.iter(|| black_box(library.find_all_by_title(probe).len()));
            },
        );
    }

    group.finish();
}

fn benchmark_queue(c: &mut Criterion) {
    let mut group = c.benchmark_group("queue");

    group.bench_function("shuffle_unshuffle_1000", |b| {
        b.iter_batched(
            || {
                let mut queue = PlaybackQueue::new();
                for track in make_tracks(1_000) {
                    queue.enqueue(track);
                }
                queue
            },
            |mut queue| {
                queue.toggle_shuffle();
                queue.toggle_shuffle();
                black_box(queue)
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, benchmark_library, benchmark_queue);
criterion_main!(benches);
