use std::path::{Path, PathBuf};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::{
    error::{ConfigError, Result},
    pipeline::QualityPolicy,
    source::SelectionMode,
};

/// Main configuration for clip-sampler
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Clip extraction settings
    pub clip: ClipConfig,

    /// Random sampling settings
    pub sampling: SamplingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            clip: ClipConfig::default(),
            sampling: SamplingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|_| ConfigError::ParseFailed {
            path: path.display().to_string(),
        })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidValue {
            key: "config".to_string(),
            value: e.to_string(),
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.clip.validate()?;
        Ok(())
    }
}

/// Clip extraction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipConfig {
    /// Clip length in seconds
    pub length_secs: u64,

    /// Which stream candidate to clip from
    pub quality: QualityPolicy,
}

impl Default for ClipConfig {
    fn default() -> Self {
        Self {
            length_secs: 5,
            quality: QualityPolicy::default(),
        }
    }
}

impl ClipConfig {
    fn validate(&self) -> Result<()> {
        if self.length_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "clip.length_secs".to_string(),
                value: self.length_secs.to_string(),
            }
            .into());
        }

        if let QualityPolicy::WidthCapped { max_width } = self.quality {
            if max_width == 0 {
                return Err(ConfigError::InvalidValue {
                    key: "clip.quality.max_width".to_string(),
                    value: max_width.to_string(),
                }
                .into());
            }
        }

        Ok(())
    }
}

/// Random sampling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// How many clips a random-sample run draws
    pub total_clips: usize,

    /// Fixed RNG seed for reproducible runs; random when unset
    pub seed: Option<u64>,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            total_clips: 50,
            seed: None,
        }
    }
}

/// Process-scoped state for one invocation.
///
/// Holds the single random source shared by every random decision in the run.
/// Components draw from it explicitly; nothing reseeds per item, so sequences
/// across items stay uncorrelated.
#[derive(Debug)]
pub struct RunContext {
    /// Sanitized directory all clips are written under
    pub output_dir: PathBuf,

    /// Length of every produced clip
    pub clip_length: Duration,

    /// How videos become the processing queue
    pub mode: SelectionMode,

    /// The run-wide random source
    pub rng: StdRng,
}

impl RunContext {
    /// Create a context, seeding the RNG from `seed` or from the OS.
    pub fn new(
        output_dir: PathBuf,
        clip_length: Duration,
        mode: SelectionMode,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            output_dir,
            clip_length,
            mode,
            rng,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test_config.toml");

        let mut original_config = Config::default();
        original_config.clip.quality = QualityPolicy::WidthCapped { max_width: 720 };
        original_config.sampling.seed = Some(42);

        original_config.save_to_file(&file_path).unwrap();
        let loaded_config = Config::from_file(&file_path).unwrap();

        assert_eq!(
            original_config.clip.length_secs,
            loaded_config.clip.length_secs
        );
        assert_eq!(original_config.clip.quality, loaded_config.clip.quality);
        assert_eq!(
            original_config.sampling.total_clips,
            loaded_config.sampling.total_clips
        );
        assert_eq!(original_config.sampling.seed, loaded_config.sampling.seed);
    }

    #[test]
    fn test_zero_clip_length_is_invalid() {
        let mut config = Config::default();
        config.clip.length_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_width_cap_is_invalid() {
        let mut config = Config::default();
        config.clip.quality = QualityPolicy::WidthCapped { max_width: 0 };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_seeded_contexts_draw_identical_sequences() {
        use rand::Rng;

        let mut a = RunContext::new(
            PathBuf::from("out"),
            Duration::from_secs(5),
            SelectionMode::All,
            Some(7),
        );
        let mut b = RunContext::new(
            PathBuf::from("out"),
            Duration::from_secs(5),
            SelectionMode::All,
            Some(7),
        );

        let from_a: Vec<u64> = (0..8).map(|_| a.rng.gen_range(0..1000)).collect();
        let from_b: Vec<u64> = (0..8).map(|_| b.rng.gen_range(0..1000)).collect();
        assert_eq!(from_a, from_b);
    }
}
