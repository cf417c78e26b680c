//! Engine configuration
//!
//! Thresholds and horizons for all three planners, loaded from TOML.
//!
//! ## Configuration Resolution
//!
//! 1. An explicit path (`--config`), which must exist
//! 2. The user override at `~/.config/finpath/engine.toml`
//! 3. Embedded defaults (compiled into binary)
//!
//! Keys missing from a file keep their default values.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::budget::{AnalyzerConfig, OverspendThreshold};
use crate::debt::{HybridMetric, SimulatorConfig};
use crate::error::{Error, Result};
use crate::goals::PlannerConfig;

/// Embedded default config (compiled into binary)
pub const DEFAULT_CONFIG: &str = include_str!("../../../config/engine.toml");

/// Settings for every planner, passed explicitly to each call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub analyzer: AnalyzerConfig,
    pub simulator: SimulatorConfig,
    pub planner: PlannerConfig,
}

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Embedded,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Embedded => write!(f, "built-in defaults"),
        }
    }
}

impl EngineConfig {
    /// Resolve and load configuration, see the module docs for precedence
    pub fn load(explicit: Option<&Path>) -> Result<(Self, ConfigSource)> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            return Ok((Self::from_file(path)?, ConfigSource::File(path.to_path_buf())));
        }

        if let Some(path) = default_config_path() {
            if path.exists() {
                let config = Self::from_file(&path)?;
                return Ok((config, ConfigSource::File(path)));
            }
        }

        Ok((parse_config(DEFAULT_CONFIG)?, ConfigSource::Embedded))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "Loading engine config");
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        parse_config(&content)
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("finpath").join("engine.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    budget: Option<RawBudget>,
    debt: Option<RawDebt>,
    goals: Option<RawGoals>,
}

#[derive(Debug, Deserialize)]
struct RawBudget {
    overspend_percent: Option<RawDecimal>,
    overspend_absolute: Option<i64>,
    trend_percent: Option<RawDecimal>,
    trend_min_periods: Option<usize>,
    anomaly_sigma: Option<RawDecimal>,
    anomaly_min_samples: Option<usize>,
    savings_min_percent: Option<RawDecimal>,
}

#[derive(Debug, Deserialize)]
struct RawDebt {
    horizon_months: Option<u32>,
    hybrid_metric: Option<String>,
    compare_baseline: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct RawGoals {
    horizon_months: Option<u32>,
}

/// TOML has no decimal type; accept integers, floats, or quoted strings
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDecimal {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl RawDecimal {
    fn into_decimal(self, key: &str) -> Result<Decimal> {
        let parsed = match self {
            RawDecimal::Integer(i) => return Ok(Decimal::from(i)),
            RawDecimal::Float(f) => Decimal::from_str(&f.to_string()),
            RawDecimal::Text(s) => Decimal::from_str(s.trim()),
        };
        parsed.map_err(|e| Error::Config(format!("Invalid number for {}: {}", key, e)))
    }
}

/// Parse config from TOML content
pub fn parse_config(content: &str) -> Result<EngineConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = EngineConfig::default();

    if let Some(budget) = raw.budget {
        let analyzer = &mut config.analyzer;
        match (budget.overspend_percent, budget.overspend_absolute) {
            (Some(_), Some(_)) => {
                return Err(Error::Config(
                    "Set overspend_percent or overspend_absolute, not both".to_string(),
                ))
            }
            (Some(percent), None) => {
                analyzer.overspend =
                    OverspendThreshold::PercentOverPrior(percent.into_decimal("overspend_percent")?)
            }
            (None, Some(limit)) => analyzer.overspend = OverspendThreshold::Absolute(limit),
            (None, None) => {}
        }
        if let Some(percent) = budget.trend_percent {
            analyzer.trend_percent = percent.into_decimal("trend_percent")?;
        }
        if let Some(span) = budget.trend_min_periods {
            analyzer.trend_min_periods = span;
        }
        if let Some(sigma) = budget.anomaly_sigma {
            analyzer.anomaly_sigma = sigma.into_decimal("anomaly_sigma")?;
        }
        if let Some(samples) = budget.anomaly_min_samples {
            analyzer.anomaly_min_samples = samples;
        }
        if let Some(percent) = budget.savings_min_percent {
            analyzer.savings_min_percent = percent.into_decimal("savings_min_percent")?;
        }
    }

    if let Some(debt) = raw.debt {
        if let Some(horizon) = debt.horizon_months {
            config.simulator.horizon_months = horizon;
        }
        if let Some(metric) = debt.hybrid_metric {
            config.simulator.hybrid_metric = HybridMetric::from_str(&metric).map_err(Error::Config)?;
        }
        if let Some(baseline) = debt.compare_baseline {
            config.simulator.compare_baseline = baseline;
        }
    }

    if let Some(goals) = raw.goals {
        if let Some(horizon) = goals.horizon_months {
            config.planner.horizon_months = horizon;
        }
    }

    validate(&config)?;
    Ok(config)
}

fn validate(config: &EngineConfig) -> Result<()> {
    let analyzer = &config.analyzer;
    let problem = if matches!(analyzer.overspend, OverspendThreshold::PercentOverPrior(p) if p < Decimal::ZERO)
    {
        Some("overspend_percent must not be negative")
    } else if matches!(analyzer.overspend, OverspendThreshold::Absolute(limit) if limit < 0) {
        Some("overspend_absolute must not be negative")
    } else if analyzer.trend_percent < Decimal::ZERO {
        Some("trend_percent must not be negative")
    } else if analyzer.trend_min_periods < 2 {
        Some("trend_min_periods must be at least 2")
    } else if analyzer.anomaly_sigma <= Decimal::ZERO {
        Some("anomaly_sigma must be positive")
    } else if analyzer.anomaly_min_samples < 2 {
        Some("anomaly_min_samples must be at least 2")
    } else if config.simulator.horizon_months == 0 {
        Some("debt horizon_months must be positive")
    } else if config.planner.horizon_months == 0 {
        Some("goals horizon_months must be positive")
    } else {
        None
    };

    match problem {
        Some(message) => Err(Error::Config(message.to_string())),
        None => Ok(()),
    }
}
