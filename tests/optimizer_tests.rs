mod common;

use common::{params, PANGRAM};
use keyevolve::error::KeyEvolveError;
use keyevolve::keyboard::Layout;
use keyevolve::optimizer::{OptimizationOptions, Optimizer};
use keyevolve::scorer::evaluate;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

fn options(population_size: usize, generations: usize) -> OptimizationOptions {
    OptimizationOptions {
        population_size,
        generations,
        mutation_rate: 0.1,
        ..OptimizationOptions::default()
    }
}

fn optimizer(corpus: &str, opts: OptimizationOptions) -> Optimizer {
    Optimizer::new(Arc::from(corpus), params(), opts)
}

fn no_progress(_: usize, _: f64, _: &Layout) {}

#[test]
fn test_best_score_never_regresses() {
    let opt = optimizer(PANGRAM, options(6, 15));
    let result = opt.run(&Layout::standard(), Some(1), no_progress).unwrap();

    assert_eq!(result.history.len(), 16);
    for pair in result.history.windows(2) {
        assert!(pair[1] <= pair[0], "best score went up: {:?}", pair);
    }
    assert_eq!(result.score, *result.history.last().unwrap());
}

#[test]
fn test_reported_score_matches_layout() {
    let opt = optimizer(PANGRAM, options(4, 5));
    let result = opt.run(&Layout::standard(), Some(2), no_progress).unwrap();
    let rescored = evaluate(&result.layout, PANGRAM, result.layout.home_keys(), &params()).unwrap();
    assert_eq!(result.score, rescored);
}

#[test]
fn test_zero_generations_only_initializes() {
    let calls = AtomicUsize::new(0);
    let opt = optimizer(PANGRAM, options(3, 0));
    let result = opt
        .run(&Layout::standard(), Some(3), |generation: usize, _: f64, _: &Layout| {
            assert_eq!(generation, 0);
            calls.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
    assert_eq!(result.history.len(), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_progress_reported_every_generation() {
    let seen = Mutex::new(Vec::new());
    let opt = optimizer(PANGRAM, options(2, 4));
    let result = opt
        .run(&Layout::standard(), Some(4), |generation: usize, best: f64, _: &Layout| {
            seen.lock().unwrap().push((generation, best));
        })
        .unwrap();

    let seen = seen.into_inner().unwrap();
    assert_eq!(seen.iter().map(|s| s.0).collect::<Vec<_>>(), vec![0, 1, 2, 3, 4]);
    assert_eq!(seen.iter().map(|s| s.1).collect::<Vec<_>>(), result.history);
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let mut opts = options(5, 8);
    opts.optimize_shape = true;
    opts.optimize_shift_plane = true;
    let opt = optimizer(PANGRAM, opts);

    let a = opt.run(&Layout::standard(), Some(1234), no_progress).unwrap();
    let b = opt.run(&Layout::standard(), Some(1234), no_progress).unwrap();
    assert_eq!(a.score, b.score);
    assert_eq!(a.layout, b.layout);
    assert_eq!(a.history, b.history);
}

#[test]
fn test_empty_corpus_scores_zero() {
    let opt = optimizer("", options(3, 2));
    let result = opt.run(&Layout::standard(), Some(5), no_progress).unwrap();
    assert_eq!(result.score, 0.0);
    assert!(result.history.iter().all(|&s| s == 0.0));
}

#[test]
fn test_first_member_wins_ties() {
    // Every layout costs zero on an empty corpus, so the first initial member is kept.
    let opts = options(4, 3);
    let opt = optimizer("", opts.clone());
    let result = opt.run(&Layout::standard(), Some(6), no_progress).unwrap();

    let mut rng = fastrand::Rng::with_seed(6);
    let base = Layout::standard();
    let first = keyevolve::optimizer::random_layout(
        &mut rng,
        &base,
        base.shape(),
        &base.home_coordinates().unwrap(),
        &keyevolve::optimizer::GenerationOptions::default(),
    )
    .unwrap();
    assert_eq!(result.layout, first);
}

#[test]
fn test_search_layouts_keep_every_key() {
    let opt = optimizer(PANGRAM, options(4, 6));
    let base = Layout::standard();
    let result = opt.run(&base, Some(8), no_progress).unwrap();
    assert_eq!(common::sorted(result.layout.unshifted_keys()), common::sorted(base.unshifted_keys()));
    assert_eq!(common::sorted(result.layout.shifted_keys()), common::sorted(base.shifted_keys()));
}

#[test]
fn test_empty_population_rejected() {
    let opt = optimizer(PANGRAM, options(0, 1));
    let err = opt.run(&Layout::standard(), None, no_progress).unwrap_err();
    assert!(matches!(err, KeyEvolveError::Config(_)));
}

#[test]
fn test_bad_rate_rejected() {
    let mut opts = options(2, 1);
    opts.mutation_rate = 2.0;
    let opt = optimizer(PANGRAM, opts);
    assert!(matches!(
        opt.run(&Layout::standard(), None, no_progress),
        Err(KeyEvolveError::Config(_))
    ));
}

#[test]
fn test_evaluate_population_keeps_order() {
    let opt = optimizer(PANGRAM, options(1, 0));
    let layouts: Vec<Layout> = keyevolve::layouts::get_all_layouts().into_values().collect();
    let population = opt.evaluate_population(layouts.clone()).unwrap();
    for (layout, candidate) in layouts.iter().zip(&population) {
        assert_eq!(&candidate.layout, layout);
        assert_eq!(
            candidate.score,
            evaluate(layout, PANGRAM, layout.home_keys(), &params()).unwrap()
        );
    }
}
