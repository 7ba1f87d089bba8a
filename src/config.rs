use crate::error::{KeResult, KeyEvolveError};
use crate::keyboard::Layout;
use crate::layouts::KnownLayout;
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub search: SearchParams,
    #[command(flatten)]
    pub physics: PhysicsParams,
    #[command(flatten)]
    pub defs: LayoutDefinitions,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchParams {
    #[arg(long, default_value_t = 32)]
    pub population_size: usize,
    #[arg(long, default_value_t = 200)]
    pub generations: usize,
    #[arg(long, default_value_t = 0.05)]
    pub mutation_rate: f64,
    #[arg(long, default_value_t = false)]
    pub optimize_shift_plane: bool,
    #[arg(long, default_value_t = false)]
    pub optimize_shape: bool,
    #[arg(long, default_value_t = 10_000)]
    pub shape_retry_limit: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            population_size: 32,
            generations: 200,
            mutation_rate: 0.05,
            optimize_shift_plane: false,
            optimize_shape: false,
            shape_retry_limit: 10_000,
        }
    }
}

/// Tuning constants of the distance model.
#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PhysicsParams {
    /// Decimal digits kept when rounding distances and costs.
    #[arg(long, default_value_t = 5)]
    pub precision_digits: u32,
    /// Extra horizontal stagger added per row below the second.
    #[arg(long, default_value_t = 0.3)]
    pub stagger_offset: f64,
    /// Horizontal offset applied to every row below the first.
    #[arg(long, default_value_t = 0.5)]
    pub row_offset: f64,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            precision_digits: 5,
            stagger_offset: 0.3,
            row_offset: 0.5,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutDefinitions {
    #[arg(long, default_value = "qwerty")]
    pub base_layout: String,
    /// JSON layout file (rows, home keys, optional shape); replaces `base_layout`.
    #[arg(long)]
    pub layout_file: Option<String>,
    /// Overrides the base layout's home keys, e.g. "asdfjkl;".
    #[arg(long)]
    pub home_keys: Option<String>,
}

impl Default for LayoutDefinitions {
    fn default() -> Self {
        Self {
            base_layout: "qwerty".to_string(),
            layout_file: None,
            home_keys: None,
        }
    }
}

impl PhysicsParams {
    /// Rounds `value` to `precision_digits` decimal places.
    #[inline(always)]
    pub fn round(&self, value: f64) -> f64 {
        let factor = 10f64.powi(self.precision_digits as i32);
        (value * factor).round() / factor
    }
}

impl LayoutDefinitions {
    pub fn get_known_layout(&self) -> KeResult<KnownLayout> {
        KnownLayout::from_str(self.base_layout.trim()).map_err(|_| {
            KeyEvolveError::Config(format!("Unknown base layout '{}'", self.base_layout))
        })
    }

    /// Name the base layout is reported under.
    pub fn base_name(&self) -> &str {
        self.layout_file.as_deref().unwrap_or(&self.base_layout)
    }

    /// Base layout with the configured home keys applied.
    pub fn resolve_base_layout(&self) -> KeResult<Layout> {
        let layout = match &self.layout_file {
            Some(path) => Layout::load_from_file(path)?,
            None => self.get_known_layout()?.layout(),
        };
        self.apply_home_keys(layout)
    }

    /// Applies the `home_keys` override, if any, to `layout`.
    pub fn apply_home_keys(&self, layout: Layout) -> KeResult<Layout> {
        match &self.home_keys {
            Some(keys) => layout.with_home_keys(keys.chars().collect()),
            None => Ok(layout),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> KeResult<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn validate(&self) -> KeResult<()> {
        if self.search.population_size == 0 {
            return Err(KeyEvolveError::Config(
                "population_size must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.search.mutation_rate) {
            return Err(KeyEvolveError::Config(format!(
                "mutation_rate must be within [0, 1], got {}",
                self.search.mutation_rate
            )));
        }
        if self.search.shape_retry_limit == 0 {
            return Err(KeyEvolveError::Config(
                "shape_retry_limit must be at least 1".to_string(),
            ));
        }
        if self.physics.precision_digits > 15 {
            return Err(KeyEvolveError::Config(format!(
                "precision_digits above 15 exceeds f64 precision, got {}",
                self.physics.precision_digits
            )));
        }
        if !self.physics.stagger_offset.is_finite() || !self.physics.row_offset.is_finite() {
            return Err(KeyEvolveError::Config(
                "stagger offsets must be finite".to_string(),
            ));
        }
        if self.defs.layout_file.is_none() {
            self.defs.get_known_layout()?;
        }
        Ok(())
    }

    /// Copies values given explicitly on the command line over `self`.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($section:ident . $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$section.$field = cli.$section.$field.clone();
                }
            };
        }

        update_if_present!(search.population_size);
        update_if_present!(search.generations);
        update_if_present!(search.mutation_rate);
        update_if_present!(search.optimize_shift_plane);
        update_if_present!(search.optimize_shape);
        update_if_present!(search.shape_retry_limit);

        update_if_present!(physics.precision_digits);
        update_if_present!(physics.stagger_offset);
        update_if_present!(physics.row_offset);

        update_if_present!(defs.base_layout);
        update_if_present!(defs.layout_file);
        update_if_present!(defs.home_keys);
    }
}
