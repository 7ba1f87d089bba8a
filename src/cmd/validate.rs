use crate::reports;
use clap::Args;
use keyevolve::config::Config;
use keyevolve::error::KeResult;
use keyevolve::keyboard::Layout;
use keyevolve::layouts::KnownLayout;
use keyevolve::scorer;
use strum::IntoEnumIterator;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub config: Config,

    /// Only score catalog layouts whose name contains this text.
    #[arg(short, long)]
    pub layout: Option<String>,
}

fn matches_filter(name: &str, filter: Option<&str>) -> bool {
    filter.map_or(true, |f| name.to_lowercase().contains(&f.to_lowercase()))
}

pub fn run(args: &ValidateArgs, config: &Config, corpus: &str) -> KeResult<()> {
    let filter = args.layout.as_deref();
    let mut candidates: Vec<(String, Layout)> = Vec::new();

    info!("🔎 === LAYOUT AUDIT === 🔎");
    if let Some(keys) = &config.defs.home_keys {
        info!("Home keys overridden with '{}'", keys);
    }
    for known in KnownLayout::iter() {
        let name = known.to_string();
        if matches_filter(&name, filter) {
            candidates.push((name, config.defs.apply_home_keys(known.layout())?));
        }
    }
    if config.defs.layout_file.is_some() {
        let name = config.defs.base_name().to_string();
        if matches_filter(&name, filter) {
            candidates.push((name, config.defs.resolve_base_layout()?));
        }
    }

    let mut results = Vec::with_capacity(candidates.len());
    for (name, layout) in candidates {
        reports::print_layout(&name, &layout, false);
        let details = scorer::evaluate_detailed(&layout, corpus, layout.home_keys(), &config.physics)?;
        results.push((name, details));
    }

    results.sort_by(|a, b| a.1.cost.total_cmp(&b.1.cost));
    reports::print_scoring_report(&results);
    Ok(())
}
