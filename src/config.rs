use std::path::PathBuf;

use log::LevelFilter;

use crate::percentile::PercentileKind;
use crate::presentation::LabelStyle;

const DEFAULT_DATA_DIR: &str = "Data Fbref";

/// Runtime settings read from the environment (`.env` files included).
#[derive(Debug, Clone, PartialEq)]
pub struct PizzaConfig {
    pub data_dir: PathBuf,
    pub label_style: LabelStyle,
    pub percentile_kind: PercentileKind,
    pub log_level: LevelFilter,
}

impl Default for PizzaConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            label_style: LabelStyle::default(),
            percentile_kind: PercentileKind::default(),
            log_level: LevelFilter::Warn,
        }
    }
}

impl PizzaConfig {
    /// Loads `.env.local` then `.env`, then reads `PIZZA_*` variables.
    pub fn from_env() -> Self {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::from_filename(".env");
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Unset or unparseable values keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let data_dir = lookup("PIZZA_DATA_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);
        let label_style = lookup("PIZZA_LABEL_STYLE")
            .and_then(|v| LabelStyle::from_name(&v))
            .unwrap_or(defaults.label_style);
        let percentile_kind = lookup("PIZZA_PERCENTILE_KIND")
            .and_then(|v| PercentileKind::from_name(&v))
            .unwrap_or(defaults.percentile_kind);
        let log_level = lookup("PIZZA_LOG")
            .and_then(|v| v.trim().parse::<LevelFilter>().ok())
            .unwrap_or(defaults.log_level);
        Self {
            data_dir,
            label_style,
            percentile_kind,
            log_level,
        }
    }
}
