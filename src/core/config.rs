//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.sieve/config.toml` unless `--config` points elsewhere.
//! If missing on first run, a commented-out default is generated so users can
//! discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::chip::IdentifierPool;
use crate::core::drag::{DEFAULT_DISTANCE_THRESHOLD, DEFAULT_ROW_TOLERANCE, DragConfig};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SieveConfig {
    #[serde(default)]
    pub drag: DragSection,
    #[serde(default)]
    pub display: DisplaySection,
    #[serde(default)]
    pub chips: ChipsSection,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DragSection {
    pub distance_threshold: Option<f64>,
    pub row_tolerance: Option<f64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DisplaySection {
    pub cell_width: Option<f64>,
    pub cell_height: Option<f64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ChipsSection {
    pub identifiers: Option<Vec<String>>,
    pub initial: Option<Vec<String>>,
}

// ============================================================================
// Defaults
// ============================================================================

/// Geometry units per terminal column.
pub const DEFAULT_CELL_WIDTH: f64 = 16.0;
/// Geometry units per terminal row.
pub const DEFAULT_CELL_HEIGHT: f64 = 32.0;

pub const DEFAULT_IDENTIFIERS: &[&str] = &[
    "pizza",
    "chocolateCake",
    "sushi",
    "hamburger",
    "pasta",
    "iceCream",
    "tacos",
    "applePie",
    "chickenNuggets",
    "frenchFries",
    "mediterraneanSeaBassWithLemonButterSauce",
    "pacificNorthwestSalmonWithFreshHerbs",
    "tuscanWhiteBeanSoupWithPancetta",
    "chickenAlfredoPastaWithBroccoli",
    "newEnglandClamChowderWithBacon",
    "chocolateLavaCakeWithVanillaIceCream",
    "beefWellingtonWithMushroomDuxelles",
    "southernFriedChickenWithGravy",
    "spaghettiCarbonaraWithPancettaAndParmesan",
    "chickenTikkaMasalaWithBasmatiRice",
];

pub const DEFAULT_INITIAL: &[&str] = &[
    "chocolateCake",
    "AND",
    "frenchFries",
    "OR",
    "(",
    "iceCream",
    "AND",
    "tuscanWhiteBeanSoupWithPancetta",
    ")",
];

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub drag: DragConfig,
    pub cell_width: f64,
    pub cell_height: f64,
    pub identifiers: Vec<String>,
    pub initial: Vec<String>,
}

impl ResolvedConfig {
    pub fn identifier_pool(&self) -> IdentifierPool {
        IdentifierPool::from_labels(&self.identifiers)
    }
}

/// Overrides taken from the command line (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub distance_threshold: Option<f64>,
    pub row_tolerance: Option<f64>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.sieve/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".sieve").join("config.toml"))
}

/// Load config from `path`, or from `~/.sieve/config.toml` when `None`.
///
/// If the default file doesn't exist, generates a commented-out default and
/// returns `SieveConfig::default()`. An explicit path that doesn't exist is an
/// error. A malformed file returns `ConfigError::Parse`.
pub fn load_config(path: Option<&Path>) -> Result<SieveConfig, ConfigError> {
    if let Some(explicit) = path {
        return read_config(explicit);
    }

    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(SieveConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(SieveConfig::default());
    }

    read_config(&path)
}

fn read_config(path: &Path) -> Result<SieveConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config = parse_config(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

pub fn parse_config(contents: &str) -> Result<SieveConfig, ConfigError> {
    toml::from_str(contents).map_err(ConfigError::Parse)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Sieve Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [drag]
# distance_threshold = 10.0   # Or SIEVE_DRAG_THRESHOLD; travel before the insertion point moves
# row_tolerance = 30.0        # Or SIEVE_ROW_TOLERANCE; slack above/below a row of chips

# [display]
# cell_width = 16.0           # Geometry units per terminal column
# cell_height = 32.0          # Geometry units per terminal row

# [chips]
# identifiers = ["pizza", "sushi", "tacos"]
# initial = ["pizza", "AND", "(", "sushi", "OR", "tacos", ")"]
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &SieveConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Drag threshold: CLI → env → config → default
    let distance_threshold = cli
        .distance_threshold
        .or_else(|| env_f64("SIEVE_DRAG_THRESHOLD"))
        .or(config.drag.distance_threshold)
        .unwrap_or(DEFAULT_DISTANCE_THRESHOLD);

    // Row tolerance: CLI → env → config → default
    let row_tolerance = cli
        .row_tolerance
        .or_else(|| env_f64("SIEVE_ROW_TOLERANCE"))
        .or(config.drag.row_tolerance)
        .unwrap_or(DEFAULT_ROW_TOLERANCE);

    let identifiers = config
        .chips
        .identifiers
        .clone()
        .unwrap_or_else(|| to_strings(DEFAULT_IDENTIFIERS));
    let initial = config
        .chips
        .initial
        .clone()
        .unwrap_or_else(|| to_strings(DEFAULT_INITIAL));

    ResolvedConfig {
        drag: DragConfig {
            distance_threshold,
            row_tolerance,
        },
        cell_width: positive_or(config.display.cell_width, DEFAULT_CELL_WIDTH),
        cell_height: positive_or(config.display.cell_height, DEFAULT_CELL_HEIGHT),
        identifiers,
        initial,
    }
}

fn env_f64(name: &str) -> Option<f64> {
    let raw = std::env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {}={:?}: not a number", name, raw);
            None
        }
    }
}

fn positive_or(value: Option<f64>, default: f64) -> f64 {
    match value {
        Some(v) if v > 0.0 => v,
        Some(v) => {
            warn!("Ignoring non-positive cell size {}", v);
            default
        }
        None => default,
    }
}

fn to_strings(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|s| s.to_string()).collect()
}
