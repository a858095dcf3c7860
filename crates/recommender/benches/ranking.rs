//! Benchmarks for similarity ranking
//!
//! Run with: cargo bench --package recommender
//!
//! Ranks a 2,000-movie synthetic catalog, roughly the size of a real
//! movie metadata dump.

use catalog::Catalog;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use recommender::{candidate_pool, filter_and_take, RecommendationEngine, SessionSeenSet};
use similarity::SimilarityMatrix;
use std::sync::Arc;

const MOVIES: usize = 2_000;

fn build_test_data() -> (Arc<Catalog>, SimilarityMatrix) {
    let mut catalog = Catalog::new();
    for i in 0..MOVIES {
        catalog.push_movie(i as u32, format!("Movie {}", i), "");
    }

    let scores = (0..MOVIES * MOVIES)
        .map(|k| (k.wrapping_mul(2_654_435_761) % 1_000) as f32 / 1_000.0)
        .collect();
    let matrix = SimilarityMatrix::new(MOVIES, MOVIES, scores).expect("valid synthetic matrix");

    (Arc::new(catalog), matrix)
}

fn bench_recommend(c: &mut Criterion) {
    let (catalog, matrix) = build_test_data();
    let engine = RecommendationEngine::new(catalog);

    c.bench_function("recommend_top_5", |b| {
        b.iter(|| {
            let result = engine.recommend(black_box("Movie 1234"), &matrix, black_box(5));
            black_box(result)
        })
    });
}

fn bench_round_step(c: &mut Criterion) {
    let (catalog, matrix) = build_test_data();
    let engine = RecommendationEngine::new(catalog);

    c.bench_function("candidates_and_dedup", |b| {
        b.iter(|| {
            let mut seen = SessionSeenSet::new();
            let ranked = engine
                .candidates(black_box("Movie 42"), &matrix, candidate_pool(5))
                .expect("known title");
            black_box(filter_and_take(ranked, &mut seen, 5))
        })
    });
}

criterion_group!(benches, bench_recommend, bench_round_step);
criterion_main!(benches);
