//! Configuration loading and typed config structures for the puzzle engine.
//!
//! The configuration lives in `puzzle-config.yaml`. Every section is
//! optional; missing keys fall back to the defaults below, so an empty file
//! (or no file at all) yields a playable setup.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Environment variable overriding [`SessionConfig::scenario`].
pub const SCENARIO_ENV: &str = "PUZZLE_SCENARIO";

/// Environment variable overriding [`SessionConfig::scenario_path`].
pub const SCENARIO_PATH_ENV: &str = "PUZZLE_SCENARIO_PATH";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level puzzle configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PuzzleConfig {
    /// Points awarded on level completion.
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// When twists fire on their own.
    #[serde(default)]
    pub twists: TwistConfig,

    /// Speech side-channel settings.
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Which scenario to play and how.
    #[serde(default)]
    pub session: SessionConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PuzzleConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values for the session:
    /// - `PUZZLE_SCENARIO` overrides `session.scenario`
    /// - `PUZZLE_SCENARIO_PATH` overrides `session.scenario_path`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse_yaml(&contents)?;
        config.session.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string, with environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config = Self::parse_yaml(yaml)?;
        config.session.apply_env_overrides();
        Ok(config)
    }

    fn parse_yaml(yaml: &str) -> Result<Self, ConfigError> {
        // serde_yml reads an empty document as unit, not as an empty map.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }
}

/// Scoring configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScoringConfig {
    /// Base points for completing any level.
    #[serde(default = "default_level_completion_reward")]
    pub level_completion_reward: u64,

    /// Extra points when a twist is still active at completion.
    #[serde(default = "default_twist_engagement_bonus")]
    pub twist_engagement_bonus: u64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            level_completion_reward: default_level_completion_reward(),
            twist_engagement_bonus: default_twist_engagement_bonus(),
        }
    }
}

/// How twists are fired without an explicit `TriggerTwist` intent.
///
/// The policy is evaluated after every applied placement. Whatever the
/// policy, a level attempt sees at most one twist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TriggerPolicy {
    /// Twists only fire through explicit intents.
    #[default]
    Never,
    /// Fire the level's first twist once `count` placements were made.
    AfterPlacements {
        /// Placements required before the twist fires.
        count: u32,
    },
    /// Roll for a random twist from the level's pool after each placement.
    Random {
        /// Chance per placement, in percent (0-100).
        chance_percent: u32,
        /// Placements required before rolling starts.
        #[serde(default)]
        min_placements: u32,
    },
}

/// Twist configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TwistConfig {
    /// Automatic trigger policy.
    #[serde(default)]
    pub trigger: TriggerPolicy,

    /// Seed for the random policy, for reproducible sessions.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for TwistConfig {
    fn default() -> Self {
        Self {
            trigger: TriggerPolicy::default(),
            seed: default_seed(),
        }
    }
}

/// Speech side-channel configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SpeechConfig {
    /// Whether narration is spoken unless forced.
    #[serde(default = "default_true")]
    pub voice_enabled: bool,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            voice_enabled: true,
        }
    }
}

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionConfig {
    /// Built-in scenario id, used when no scenario file is given.
    #[serde(default = "default_scenario")]
    pub scenario: String,

    /// Optional scenario file (`.json`, `.yaml`, `.yml`).
    #[serde(default)]
    pub scenario_path: Option<PathBuf>,

    /// Start with the accessibility presentation switched on.
    #[serde(default)]
    pub accessibility_mode: bool,
}

impl SessionConfig {
    /// Override session values with environment variables when set.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(
            std::env::var(SCENARIO_ENV).ok(),
            std::env::var(SCENARIO_PATH_ENV).ok(),
        );
    }

    /// Override session values with explicit values when present.
    pub fn apply_overrides(&mut self, scenario: Option<String>, scenario_path: Option<String>) {
        if let Some(val) = scenario.filter(|v| !v.is_empty()) {
            self.scenario = val;
        }
        if let Some(val) = scenario_path.filter(|v| !v.is_empty()) {
            self.scenario_path = Some(PathBuf::from(val));
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            scenario: default_scenario(),
            scenario_path: None,
            accessibility_mode: false,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error) used when `RUST_LOG`
    /// is not set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable logs.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

const fn default_level_completion_reward() -> u64 {
    100
}

const fn default_twist_engagement_bonus() -> u64 {
    50
}

const fn default_seed() -> u64 {
    42
}

fn default_scenario() -> String {
    "home".to_owned()
}

fn default_log_level() -> String {
    "info".to_owned()
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = PuzzleConfig::default();
        assert_eq!(config.scoring.level_completion_reward, 100);
        assert_eq!(config.scoring.twist_engagement_bonus, 50);
        assert_eq!(config.twists.trigger, TriggerPolicy::Never);
        assert!(config.speech.voice_enabled);
        assert_eq!(config.session.scenario, "home");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
scoring:
  level_completion_reward: 200
  twist_engagement_bonus: 75

twists:
  trigger:
    mode: random
    chance_percent: 30
    min_placements: 2
  seed: 7

speech:
  voice_enabled: false

session:
  scenario: "city"
  scenario_path: "scenarios/city.yaml"
  accessibility_mode: true

logging:
  level: "debug"
  json: true
"#;

        let config = PuzzleConfig::parse_yaml(yaml).unwrap();

        assert_eq!(config.scoring.level_completion_reward, 200);
        assert_eq!(config.scoring.twist_engagement_bonus, 75);
        assert_eq!(
            config.twists.trigger,
            TriggerPolicy::Random {
                chance_percent: 30,
                min_placements: 2
            }
        );
        assert_eq!(config.twists.seed, 7);
        assert!(!config.speech.voice_enabled);
        assert_eq!(config.session.scenario, "city");
        assert_eq!(
            config.session.scenario_path,
            Some(PathBuf::from("scenarios/city.yaml"))
        );
        assert!(config.session.accessibility_mode);
        assert!(config.logging.json);
    }

    #[test]
    fn parse_after_placements_policy() {
        let yaml = "twists:\n  trigger:\n    mode: after_placements\n    count: 3\n";
        let config = PuzzleConfig::parse_yaml(yaml).unwrap();
        assert_eq!(
            config.twists.trigger,
            TriggerPolicy::AfterPlacements { count: 3 }
        );
        // Untouched sections keep their defaults.
        assert_eq!(config.scoring, ScoringConfig::default());
    }

    #[test]
    fn parse_empty_yaml() {
        let config = PuzzleConfig::parse_yaml("");
        assert_eq!(config.ok(), Some(PuzzleConfig::default()));
    }

    #[test]
    fn overrides_replace_non_empty_values_only() {
        let mut session = SessionConfig::default();
        session.apply_overrides(Some(String::new()), None);
        assert_eq!(session.scenario, "home");

        session.apply_overrides(Some("city".to_owned()), Some("x.json".to_owned()));
        assert_eq!(session.scenario, "city");
        assert_eq!(session.scenario_path, Some(PathBuf::from("x.json")));
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("puzzle-config.yaml");
        if path.exists() {
            let config = PuzzleConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
