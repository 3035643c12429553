//! # Agent Configuration
//!
//! JSON configuration for agents, so a session can be described in a file
//! or an inline string instead of code.
//!
//! ```rust
//! use headsup_holdem::arena::agent::ConfigAgentGenerator;
//!
//! // From inline JSON
//! let generator = ConfigAgentGenerator::from_json(r#"{"type": "fish"}"#).unwrap();
//!
//! // Tries a file first, then falls back to inline JSON
//! let generator = ConfigAgentGenerator::from_str_or_file(r#"{"type": "folding"}"#).unwrap();
//! ```
//!
//! ## Supported Agent Types
//!
//! - `folding` - Always folds
//! - `fish` - Always checks or calls
//! - `shark` - Range charts preflop and continuation bets on the flop
//!
//! ### Shark Agent
//!
//! Every field is optional. `ranges` is a path to a range table JSON file
//! (see [`RangeTables`]), and the sizing fields override the defaults in
//! [`SharkSizing`].
//!
//! ```json
//! {
//!   "type": "shark",
//!   "ranges": "ranges/tight.json",
//!   "seed": 42,
//!   "open_mult": 3.0,
//!   "bet_pct": 0.5
//! }
//! ```

use std::{io::ErrorKind, path::Path, path::PathBuf, sync::Arc};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::arena::agent::{
    AgentGenerator, FishAgentGenerator, FoldingAgentGenerator, SharkAgentGenerator, SharkSizing,
};
use crate::arena::{Agent, GameState};
use crate::holdem::{RangeTables, RangeTablesError};

/// Configuration for different agent types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentConfig {
    /// Agent that always folds
    Folding,
    /// Agent that always checks or calls
    Fish,
    /// Range chart agent
    Shark {
        /// Range table JSON file. The built in tables are used when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        ranges: Option<PathBuf>,
        /// Seed for the agents' rngs. Fresh entropy when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        seed: Option<u64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        open_mult: Option<f32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        oop_raise_mult: Option<f32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        ip_raise_mult: Option<f32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        bet_pct: Option<f32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        push_fold_depth: Option<f32>,
    },
}

/// Errors that can occur during agent configuration
#[derive(Debug, Error)]
pub enum AgentConfigError {
    /// A sizing value that can't be used to size a bet
    #[error("Invalid sizing {field}: {value}")]
    InvalidSizing { field: &'static str, value: f32 },

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The range tables named by the config couldn't be loaded
    #[error("Range table error: {0}")]
    RangeTables(#[from] RangeTablesError),
}

impl AgentConfig {
    /// Validate that the configuration is correct
    pub fn validate(&self) -> Result<(), AgentConfigError> {
        if let AgentConfig::Shark {
            open_mult,
            oop_raise_mult,
            ip_raise_mult,
            bet_pct,
            push_fold_depth,
            ..
        } = self
        {
            validate_positive("open_mult", *open_mult)?;
            validate_positive("oop_raise_mult", *oop_raise_mult)?;
            validate_positive("ip_raise_mult", *ip_raise_mult)?;
            validate_positive("bet_pct", *bet_pct)?;
            if let Some(depth) = push_fold_depth.filter(|d| !d.is_finite() || *d < 0.0) {
                return Err(AgentConfigError::InvalidSizing {
                    field: "push_fold_depth",
                    value: depth,
                });
            }
        }
        Ok(())
    }

    /// The sizing a shark built from this config plays with.
    pub fn sizing(&self) -> SharkSizing {
        let mut sizing = SharkSizing::default();
        if let AgentConfig::Shark {
            open_mult,
            oop_raise_mult,
            ip_raise_mult,
            bet_pct,
            push_fold_depth,
            ..
        } = self
        {
            sizing.open_mult = open_mult.unwrap_or(sizing.open_mult);
            sizing.oop_raise_mult = oop_raise_mult.unwrap_or(sizing.oop_raise_mult);
            sizing.ip_raise_mult = ip_raise_mult.unwrap_or(sizing.ip_raise_mult);
            sizing.bet_pct = bet_pct.unwrap_or(sizing.bet_pct);
            sizing.push_fold_depth = push_fold_depth.unwrap_or(sizing.push_fold_depth);
        }
        sizing
    }
}

fn validate_positive(field: &'static str, value: Option<f32>) -> Result<(), AgentConfigError> {
    match value {
        Some(v) if !v.is_finite() || v <= 0.0 => {
            Err(AgentConfigError::InvalidSizing { field, value: v })
        }
        _ => Ok(()),
    }
}

/// Agent generator that creates agents from configuration
#[derive(Debug)]
pub struct ConfigAgentGenerator {
    config: AgentConfig,
    shark: Option<SharkAgentGenerator>,
}

impl ConfigAgentGenerator {
    /// Create a new generator from a validated config. Range tables are
    /// loaded here, once.
    pub fn new(config: AgentConfig) -> Result<Self, AgentConfigError> {
        config.validate()?;
        let shark = match &config {
            AgentConfig::Shark { ranges, seed, .. } => {
                let tables = match ranges {
                    Some(path) => RangeTables::from_file(path)?,
                    None => RangeTables::default(),
                };
                let mut generator =
                    SharkAgentGenerator::new(Arc::new(tables)).with_sizing(config.sizing());
                if let Some(seed) = seed {
                    generator = generator.with_seed(*seed);
                }
                Some(generator)
            }
            _ => None,
        };
        Ok(Self { config, shark })
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Create from a JSON string
    pub fn from_json(json: &str) -> Result<Self, AgentConfigError> {
        let config: AgentConfig = serde_json::from_str(json)?;
        Self::new(config)
    }

    /// Create from a file path
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AgentConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Try to parse as file path first, then as inline JSON
    pub fn from_str_or_file(input: &str) -> Result<Self, AgentConfigError> {
        match Self::from_file(input) {
            Ok(generator) => Ok(generator),
            Err(AgentConfigError::IoError(err)) if err.kind() == ErrorKind::NotFound => {
                Self::from_json(input)
            }
            Err(err) => Err(err),
        }
    }
}

impl AgentGenerator for ConfigAgentGenerator {
    fn generate(&self, player_idx: usize, game_state: &GameState) -> Box<dyn Agent> {
        match (&self.config, &self.shark) {
            (AgentConfig::Shark { .. }, Some(shark)) => shark.generate(player_idx, game_state),
            (AgentConfig::Fish, _) => FishAgentGenerator::new().generate(player_idx, game_state),
            _ => FoldingAgentGenerator::new().generate(player_idx, game_state),
        }
    }
}
