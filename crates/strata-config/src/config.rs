//! Configuration structs with sensible defaults and RON persistence.

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Accepted sea levels: at least 8 blocks of ocean floor below, and 64 blocks
/// of headroom above inside a 256-block world.
pub const SEA_LEVEL_RANGE: RangeInclusive<u32> = 8..=192;

/// Top-level generator configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// World identity and preview extent.
    pub world: WorldConfig,
    /// Terrain shaping multipliers.
    pub generator: GeneratorPreset,
    /// Worker pool sizing.
    pub workers: WorkerConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// World identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    /// World seed.
    pub seed: u64,
    /// Radius, in chunks, of the square generated around the origin by the demo.
    pub radius: u32,
}

/// Terrain shaping parameters supplied at generator construction.
///
/// Every multiplier is relative to the built-in tuning, so `1.0` reproduces
/// the default world.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneratorPreset {
    /// Y of the water surface.
    pub sea_level: u32,
    /// Scales the horizontal extent of biomes and of river bends.
    pub biome_size: f64,
    /// Higher values place rivers closer together.
    pub river_frequency: f64,
    /// Widens river valleys.
    pub river_size: f64,
    /// Chance multiplier for a lake basin per cell. `0.0` disables lakes.
    pub lake_frequency: f64,
    /// Lake basin radius multiplier.
    pub lake_size: f64,
    /// Multiplies world coordinates before they reach terrain noise.
    pub coordinate_scale: f64,
    /// Stretches terrain vertically around the sea level.
    pub height_scale: f64,
}

/// Worker pool configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorkerConfig {
    /// Worker thread count; `0` means one per logical CPU (minus one).
    pub threads: usize,
    /// Maximum queued plus running requests before submissions are rejected.
    pub max_in_flight: usize,
    /// Capacity of the finished-chunk channel.
    pub result_capacity: usize,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Directory for JSON log files; defaults to `<config dir>/logs`.
    pub log_dir: Option<PathBuf>,
}

// --- Default implementations ---

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 356_556_635,
            radius: 4,
        }
    }
}

impl Default for GeneratorPreset {
    fn default() -> Self {
        Self {
            sea_level: 64,
            biome_size: 1.0,
            river_frequency: 1.0,
            river_size: 1.0,
            lake_frequency: 1.0,
            lake_size: 1.0,
            coordinate_scale: 1.0,
            height_scale: 1.0,
        }
    }
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            threads: 0,
            max_in_flight: 256,
            result_capacity: 256,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}

// --- Validation ---

impl GeneratorPreset {
    /// Checks that every value is usable by the generator.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidPreset`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !SEA_LEVEL_RANGE.contains(&self.sea_level) {
            return Err(ConfigError::InvalidPreset {
                field: "sea_level",
                reason: format!(
                    "must be within {}..={}, got {}",
                    SEA_LEVEL_RANGE.start(),
                    SEA_LEVEL_RANGE.end(),
                    self.sea_level
                ),
            });
        }

        let positive = [
            ("biome_size", self.biome_size),
            ("river_frequency", self.river_frequency),
            ("river_size", self.river_size),
            ("lake_size", self.lake_size),
            ("coordinate_scale", self.coordinate_scale),
            ("height_scale", self.height_scale),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidPreset {
                    field,
                    reason: format!("must be finite and greater than zero, got {value}"),
                });
            }
        }

        if !self.lake_frequency.is_finite() || self.lake_frequency < 0.0 {
            return Err(ConfigError::InvalidPreset {
                field: "lake_frequency",
                reason: format!(
                    "must be finite and not negative, got {}",
                    self.lake_frequency
                ),
            });
        }

        Ok(())
    }
}

// --- Load / Save / Reload ---

/// Default location of `config.ron`: `<platform config dir>/strata`.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("strata"))
}

/// Name of the settings file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

impl Config {
    /// Loads `config.ron` from `config_dir`, writing the defaults there first
    /// if the file does not exist yet.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            let config = read_config(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            return Ok(config);
        }

        let config = Config::default();
        config.save(config_dir)?;
        log::info!("Created default config at {}", config_path.display());
        Ok(config)
    }

    /// Writes `config.ron` into `config_dir`, creating the directory if needed.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let write_error = |source| ConfigError::Write {
            path: config_path.clone(),
            source,
        };

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .enumerate_arrays(false);
        let serialized = ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Encode)?;

        std::fs::create_dir_all(config_dir).map_err(write_error)?;
        std::fs::write(&config_path, serialized).map_err(write_error)
    }

    /// Re-reads `config.ron`; `Some` only when it differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let fresh = read_config(&config_dir.join(CONFIG_FILE_NAME))?;
        if &fresh == self {
            return Ok(None);
        }
        log::info!("Config reloaded with changes");
        Ok(Some(fresh))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("sea_level: 64"));
        assert!(ron_str.contains("seed: 356556635"));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(world: (seed: 7), debug: ())";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.world.seed, 7);
        assert_eq!(config.world.radius, WorldConfig::default().radius);
        assert_eq!(config.generator, GeneratorPreset::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_default_preset_is_valid() {
        assert!(GeneratorPreset::default().validate().is_ok());
    }

    #[test]
    fn test_zero_scale_rejected() {
        let preset = GeneratorPreset {
            coordinate_scale: 0.0,
            ..GeneratorPreset::default()
        };
        match preset.validate() {
            Err(ConfigError::InvalidPreset { field, .. }) => assert_eq!(field, "coordinate_scale"),
            other => panic!("Expected InvalidPreset, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_and_nan_rejected() {
        let negative = GeneratorPreset {
            river_size: -1.0,
            ..GeneratorPreset::default()
        };
        assert!(negative.validate().is_err());

        let nan = GeneratorPreset {
            biome_size: f64::NAN,
            ..GeneratorPreset::default()
        };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_lakes_can_be_disabled() {
        let preset = GeneratorPreset {
            lake_frequency: 0.0,
            ..GeneratorPreset::default()
        };
        assert!(preset.validate().is_ok());
    }

    #[test]
    fn test_sea_level_bounds() {
        for (sea_level, ok) in [(7, false), (8, true), (192, true), (193, false)] {
            let preset = GeneratorPreset {
                sea_level,
                ..GeneratorPreset::default()
            };
            assert_eq!(preset.validate().is_ok(), ok, "sea_level {sea_level}");
        }
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.world.seed = 42;
        config.generator.river_frequency = 2.5;
        config.debug.log_dir = Some(PathBuf::from("/tmp/strata-logs"));

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join("config.ron").exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.generator.sea_level = 80;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.map(|c| c.generator.sea_level), Some(80));
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let result: Result<Config, _> = ron::from_str("{{not valid}}");
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "(world: (seed: \"x\"))").unwrap();
        match Config::load_or_create(dir.path()) {
            Err(ConfigError::Parse { path, .. }) => assert!(path.ends_with(CONFIG_FILE_NAME)),
            other => panic!("Expected Parse error, got {other:?}"),
        }
    }
}
