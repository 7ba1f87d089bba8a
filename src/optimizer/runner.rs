use crate::config::{Config, PhysicsParams};
use crate::error::{KeResult, KeyEvolveError};
use crate::keyboard::Layout;
use crate::optimizer::mutation::{self, GenerationOptions, MutationMode};
use crate::scorer;
use rayon::prelude::*;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationOptions {
    pub population_size: usize,
    pub generations: usize,
    pub mutation_rate: f64,
    pub optimize_shift_plane: bool,
    pub optimize_shape: bool,
    pub shape_retry_limit: usize,
}

impl From<&Config> for OptimizationOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            population_size: cfg.search.population_size,
            generations: cfg.search.generations,
            mutation_rate: cfg.search.mutation_rate,
            optimize_shift_plane: cfg.search.optimize_shift_plane,
            optimize_shape: cfg.search.optimize_shape,
            shape_retry_limit: cfg.search.shape_retry_limit,
        }
    }
}

impl Default for OptimizationOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl OptimizationOptions {
    fn generation_options(&self, mode: MutationMode) -> GenerationOptions {
        GenerationOptions {
            mode,
            optimize_shift_plane: self.optimize_shift_plane,
            optimize_shape: self.optimize_shape,
            shape_retry_limit: self.shape_retry_limit,
        }
    }
}

/// A population member and its typing cost.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub layout: Layout,
    pub score: f64,
}

pub type Population = Vec<Candidate>;

#[derive(Debug, Clone)]
pub struct OptimizationResult {
    pub score: f64,
    pub layout: Layout,
    /// Best score after the initial evaluation and after every generation.
    pub history: Vec<f64>,
}

/// Receives the best-so-far state after every evaluation round.
pub trait ProgressCallback: Send + Sync {
    fn on_progress(&self, generation: usize, best_score: f64, best_layout: &Layout);
}

impl<F> ProgressCallback for F
where
    F: Fn(usize, f64, &Layout) + Send + Sync,
{
    fn on_progress(&self, generation: usize, best_score: f64, best_layout: &Layout) {
        self(generation, best_score, best_layout)
    }
}

/// Mutation-only population search over layouts.
///
/// Every member is mutated independently each generation; there is no
/// selection or crossover. The best layout ever evaluated is kept aside, so
/// the reported score never gets worse as generations pass.
pub struct Optimizer {
    corpus: Arc<str>,
    physics: PhysicsParams,
    options: OptimizationOptions,
}

impl Optimizer {
    pub fn new(corpus: Arc<str>, physics: PhysicsParams, options: OptimizationOptions) -> Self {
        Self {
            corpus,
            physics,
            options,
        }
    }

    pub fn run<CB: ProgressCallback>(
        &self,
        base: &Layout,
        seed: Option<u64>,
        callback: CB,
    ) -> KeResult<OptimizationResult> {
        let opts = &self.options;
        if opts.population_size == 0 {
            return Err(KeyEvolveError::Config(
                "population_size must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&opts.mutation_rate) {
            return Err(KeyEvolveError::Config(format!(
                "mutation_rate must be within [0, 1], got {}",
                opts.mutation_rate
            )));
        }

        let mut rng = match seed {
            Some(s) => fastrand::Rng::with_seed(s),
            None => fastrand::Rng::new(),
        };

        info!(
            "Searching: {} layouts x {} generations (rate {}, shape: {}, shift plane: {})",
            opts.population_size,
            opts.generations,
            opts.mutation_rate,
            opts.optimize_shape,
            opts.optimize_shift_plane
        );
        let start_time = Instant::now();

        // 1. Init
        let shape = base.shape().to_vec();
        let home_coords = base.home_coordinates()?;
        let init_opts = opts.generation_options(MutationMode::FullShuffle);
        let layouts = (0..opts.population_size)
            .map(|_| mutation::random_layout(&mut rng, base, &shape, &home_coords, &init_opts))
            .collect::<KeResult<Vec<_>>>()?;

        // 2. Evaluate
        let mut population = self.evaluate_population(layouts)?;
        let mut best = population[0].clone();
        track_best(&mut best, &population);
        let mut history = Vec::with_capacity(opts.generations + 1);
        history.push(best.score);
        callback.on_progress(0, best.score, &best.layout);

        // 3. Mutate -> Evaluate
        let mutate_opts = opts.generation_options(MutationMode::Rate(opts.mutation_rate));
        for generation in 1..=opts.generations {
            let layouts = population
                .iter()
                .map(|c| mutation::mutate_with(&mut rng, &c.layout, &mutate_opts))
                .collect::<KeResult<Vec<_>>>()?;
            population = self.evaluate_population(layouts)?;

            if track_best(&mut best, &population) {
                debug!("Gen {:5} | New best: {}", generation, best.score);
            }
            history.push(best.score);
            callback.on_progress(generation, best.score, &best.layout);
        }

        info!(
            "Search finished in {:.2}s. Best: {}",
            start_time.elapsed().as_secs_f32(),
            best.score
        );

        Ok(OptimizationResult {
            score: best.score,
            layout: best.layout,
            history,
        })
    }

    /// Scores every layout against the corpus. Any failure aborts the round.
    pub fn evaluate_population(&self, layouts: Vec<Layout>) -> KeResult<Population> {
        let corpus: &str = &self.corpus;
        layouts
            .into_par_iter()
            .map(|layout| -> KeResult<Candidate> {
                let score = scorer::evaluate(&layout, corpus, layout.home_keys(), &self.physics)?;
                Ok(Candidate { layout, score })
            })
            .collect()
    }
}

/// Strict-minimum update; earlier members win ties. Returns true on improvement.
fn track_best(best: &mut Candidate, population: &[Candidate]) -> bool {
    let mut improved = false;
    for c in population {
        if c.score < best.score {
            *best = c.clone();
            improved = true;
        }
    }
    improved
}
