// Configuration loading and parsing (comparison.toml, dictionaries.toml).

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::dataset::Stat;
use crate::dictionary::Dictionaries;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub dataset: DatasetConfig,
    pub normalization: NormalizationConfig,
    pub ui: UiConfig,
    pub dictionaries: Dictionaries,
}

// ---------------------------------------------------------------------------
// comparison.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire comparison.toml file.
#[derive(Debug, Clone, Deserialize)]
struct ComparisonFile {
    dataset: DatasetConfig,
    normalization: NormalizationConfig,
    ui: UiConfig,
}

/// Where the season CSV comes from. When `url` is set the dataset is fetched
/// over HTTP at startup; otherwise `path` is read from disk.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetConfig {
    pub path: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// Per-statistic normalization caps and the shared radar axis maximum.
/// These are policy constants, not derived values; tune them per season.
#[derive(Debug, Clone, Deserialize)]
pub struct NormalizationConfig {
    pub radar_max: f64,
    pub points: f64,
    pub goals: f64,
    pub assists: f64,
    pub points_per_game: f64,
    pub even_strength_points: f64,
    pub power_play_points: f64,
    pub penalty_minutes: f64,
    pub plus_minus: PlusMinusRange,
}

/// Plus/Minus is signed, so it gets a domain range instead of a cap.
#[derive(Debug, Clone, Deserialize)]
pub struct PlusMinusRange {
    pub min: f64,
    pub max: f64,
}

impl NormalizationConfig {
    /// The cap for a capped statistic; `None` for Plus/Minus, which is
    /// rescaled from its domain range instead.
    pub fn cap(&self, stat: Stat) -> Option<f64> {
        match stat {
            Stat::Points => Some(self.points),
            Stat::Goals => Some(self.goals),
            Stat::Assists => Some(self.assists),
            Stat::PlusMinus => None,
            Stat::PointsPerGame => Some(self.points_per_game),
            Stat::EvenStrengthPoints => Some(self.even_strength_points),
            Stat::PowerPlayPoints => Some(self.power_play_points),
            Stat::PenaltyMinutes => Some(self.penalty_minutes),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    /// Pause before an optional slot's keystrokes re-filter the dropdown.
    pub debounce_ms: u64,
    /// How many dataset players the suggestion dropdown offers.
    pub dropdown_limit: usize,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/comparison.toml` and
/// `config/dictionaries.toml`, relative to the given `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy
/// defaults. Prefer `load_config()` which handles default initialization.
pub(crate) fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    // --- comparison.toml (required) ---
    let comparison_path = config_dir.join("comparison.toml");
    let comparison_text = read_file(&comparison_path)?;
    let comparison_file: ComparisonFile =
        toml::from_str(&comparison_text).map_err(|e| ConfigError::ParseError {
            path: comparison_path.clone(),
            source: e,
        })?;

    // --- dictionaries.toml (required) ---
    let dictionaries_path = config_dir.join("dictionaries.toml");
    let dictionaries_text = read_file(&dictionaries_path)?;
    let dictionaries: Dictionaries =
        toml::from_str(&dictionaries_text).map_err(|e| ConfigError::ParseError {
            path: dictionaries_path.clone(),
            source: e,
        })?;

    let config = Config {
        dataset: comparison_file.dataset,
        normalization: comparison_file.normalization,
        ui: comparison_file.ui,
        dictionaries,
    };

    validate(&config)?;

    Ok(config)
}

/// Ensure all config files exist by copying missing ones from `defaults/`.
/// Returns the list of files that were copied. Skips `.example` files.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let mut copied = Vec::new();

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };

        // Skip .example template files
        if file_name.to_str().is_some_and(|n| n.ends_with(".example")) {
            continue;
        }
        let target = config_dir.join(file_name);

        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
        {
            Ok(mut dest) => {
                let content = std::fs::read(&path).map_err(|e| ConfigError::DefaultsCopyError {
                    message: format!("failed to read {}: {e}", path.display()),
                })?;
                std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                    ConfigError::DefaultsCopyError {
                        message: format!("failed to write {}: {e}", target.display()),
                    }
                })?;
                copied.push(target);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                // File already exists in config/, keep the user's copy
            }
            Err(e) => {
                return Err(ConfigError::DefaultsCopyError {
                    message: format!("failed to create {}: {e}", target.display()),
                });
            }
        }
    }

    Ok(copied)
}

/// Convenience wrapper: loads config relative to the current working
/// directory, copying default config files first.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.dataset.path.trim().is_empty() && config.dataset.url.is_none() {
        return Err(ConfigError::ValidationError {
            field: "dataset.path".into(),
            message: "must be set when no dataset.url is configured".into(),
        });
    }

    let n = &config.normalization;
    if n.radar_max <= 0.0 {
        return Err(ConfigError::ValidationError {
            field: "normalization.radar_max".into(),
            message: format!("must be > 0, got {}", n.radar_max),
        });
    }

    let cap_fields: &[(&str, f64)] = &[
        ("normalization.points", n.points),
        ("normalization.goals", n.goals),
        ("normalization.assists", n.assists),
        ("normalization.points_per_game", n.points_per_game),
        ("normalization.even_strength_points", n.even_strength_points),
        ("normalization.power_play_points", n.power_play_points),
        ("normalization.penalty_minutes", n.penalty_minutes),
    ];
    for (name, val) in cap_fields {
        if *val <= 0.0 {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: format!("must be > 0, got {val}"),
            });
        }
    }

    if n.plus_minus.min >= n.plus_minus.max {
        return Err(ConfigError::ValidationError {
            field: "normalization.plus_minus".into(),
            message: format!(
                "min must be less than max, got {}..{}",
                n.plus_minus.min, n.plus_minus.max
            ),
        });
    }

    if config.ui.dropdown_limit == 0 {
        return Err(ConfigError::ValidationError {
            field: "ui.dropdown_limit".into(),
            message: "must be > 0".into(),
        });
    }

    if config.dictionaries.teams.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "teams".into(),
            message: "team dictionary must not be empty".into(),
        });
    }
    if config.dictionaries.positions.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "positions".into(),
            message: "position dictionary must not be empty".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
