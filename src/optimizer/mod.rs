pub mod mutation;
pub mod runner;

pub use self::mutation::{mutate, random_layout, random_shape, GenerationOptions, MutationMode};
pub use self::runner::{
    Candidate, OptimizationOptions, OptimizationResult, Optimizer, Population, ProgressCallback,
};
