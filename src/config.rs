// Configuration module for reading Snake.toml
// Holds appearance metadata and the knobs of the safety and selection stages

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::types::{Direction, InfoResponse};

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub info: InfoConfig,
    pub safety: SafetyConfig,
    pub selection: SelectionConfig,
    pub debug: DebugConfig,
}

/// Appearance and identity returned by GET /
#[derive(Debug, Deserialize, Clone)]
pub struct InfoConfig {
    pub apiversion: String,
    pub author: String,
    pub color: String,
    pub head: String,
    pub tail: String,
}

impl InfoConfig {
    pub fn to_response(&self) -> InfoResponse {
        InfoResponse {
            apiversion: self.apiversion.clone(),
            author: self.author.clone(),
            color: self.color.clone(),
            head: self.head.clone(),
            tail: self.tail.clone(),
        }
    }
}

/// How a possible head-to-head collision with an opponent is judged
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HeadToHeadPolicy {
    /// Only cells currently covered by an opponent's body block a move
    Ignore,
    /// Cells an opponent's head can reach next turn are unsafe unless we are strictly longer
    LongerWins,
}

/// Safety filter constants
#[derive(Debug, Deserialize, Clone)]
pub struct SafetyConfig {
    pub head_to_head: HeadToHeadPolicy,
    pub opponent_tail_vacates: bool,
}

/// Policy used to pick among safe moves
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    Random,
    NearestFood,
}

/// Move selection constants
#[derive(Debug, Deserialize, Clone)]
pub struct SelectionConfig {
    pub policy: SelectionPolicy,
    pub fallback_move: Direction,
    pub avoid_hazards: bool,
    #[serde(default)]
    pub fallback_shout: Option<String>,
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Snake.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Snake.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Snake.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Snake.toml
    pub fn default_hardcoded() -> Self {
        Config {
            info: InfoConfig {
                apiversion: "1".to_string(),
                author: "".to_string(),
                color: "#888888".to_string(),
                head: "default".to_string(),
                tail: "default".to_string(),
            },
            safety: SafetyConfig {
                head_to_head: HeadToHeadPolicy::LongerWins,
                opponent_tail_vacates: false,
            },
            selection: SelectionConfig {
                policy: SelectionPolicy::Random,
                fallback_move: Direction::Down,
                avoid_hazards: true,
                fallback_shout: None,
                rng_seed: None,
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "battlesnake_debug.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            log::warn!("Could not load Snake.toml ({}), using hardcoded defaults", e);
            Self::default_hardcoded()
        })
    }
}
