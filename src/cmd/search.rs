use crate::reports;
use clap::Args;
use keyevolve::config::Config;
use keyevolve::error::KeResult;
use keyevolve::keyboard::Layout;
use keyevolve::optimizer::{OptimizationOptions, Optimizer};
use keyevolve::scorer;
use std::sync::Arc;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    #[command(flatten)]
    pub config: Config,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    /// Also print the shifted plane of the result.
    #[arg(long, default_value_t = false)]
    pub show_shift: bool,
}

pub fn run(args: &SearchArgs, config: &Config, corpus: Arc<str>) -> KeResult<()> {
    let base = config.defs.resolve_base_layout()?;
    let baseline = scorer::evaluate(&base, &corpus, base.home_keys(), &config.physics)?;
    info!("📏 Baseline ({}): {}", config.defs.base_name(), baseline);

    let options = OptimizationOptions::from(config);
    let report_interval = (options.generations / 10).max(1);
    let optimizer = Optimizer::new(corpus, config.physics.clone(), options);

    let result = optimizer.run(
        &base,
        args.seed,
        |generation: usize, best: f64, _: &Layout| {
            if generation % report_interval == 0 {
                info!("Gen {:5} | Best: {}", generation, best);
            }
        },
    )?;

    println!("\n=== 🏆 FINAL RESULT ===");
    println!("Score: {}", result.score);
    println!("Baseline: {}", baseline);
    reports::print_layout("OPTIMIZED", &result.layout, args.show_shift);
    Ok(())
}
