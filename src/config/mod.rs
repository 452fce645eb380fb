// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration system for chordsmith.
//!
//! This module provides data structures for loading backend settings and
//! session files (a key plus chord slots) from YAML.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::progression::{ProgressionSnapshot, ProgressionStore, DEFAULT_KEY};

/// Environment variable naming a settings file
pub const CONFIG_ENV: &str = "CHORDSMITH_CONFIG";

/// Root settings file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Text generation backend settings
    #[serde(default)]
    pub llm: LlmConfig,
    /// Key for new sessions
    #[serde(default = "default_key")]
    pub default_key: String,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        Self::from_yaml(&contents)
    }

    /// Load from an explicit path, else from `CHORDSMITH_CONFIG`, else defaults
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match std::env::var(CONFIG_ENV) {
            Ok(env_path) if !env_path.trim().is_empty() => Self::load(env_path),
            _ => Ok(Self::default()),
        }
    }

    /// Parse settings from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse YAML configuration")
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize configuration to YAML")
    }

    /// Save settings to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = self.to_yaml()?;
        fs::write(path.as_ref(), yaml)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            llm: LlmConfig::default(),
            default_key: default_key(),
        }
    }
}

fn default_key() -> String {
    DEFAULT_KEY.to_string()
}

/// Text generation backend configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LlmConfig {
    /// Base URL of an OpenAI-compatible API
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,
    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Attempts the CLI makes before giving up (1 = no retry)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}
fn default_model() -> String {
    "gpt-4o-mini".to_string()
}
fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}
fn default_temperature() -> f64 {
    0.7
}
fn default_timeout_secs() -> u64 {
    60
}
fn default_max_attempts() -> u32 {
    1
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
            max_attempts: default_max_attempts(),
        }
    }
}

/// Session file: a key and its chord slots (`null` for empty)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgressionFile {
    /// Tonal center
    #[serde(default = "default_key")]
    pub key: String,
    /// Chord slots in order
    #[serde(default)]
    pub chords: Vec<Option<String>>,
}

impl ProgressionFile {
    /// Load a session from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read session file: {:?}", path.as_ref()))?;
        Self::from_yaml(&contents)
    }

    /// Parse a session from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse session YAML")
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize session to YAML")
    }

    /// Save session to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = self.to_yaml()?;
        fs::write(path.as_ref(), yaml)
            .with_context(|| format!("Failed to write session file: {:?}", path.as_ref()))
    }

    /// Replay the session into a fresh store
    pub fn to_store(&self) -> Result<ProgressionStore> {
        let mut store = ProgressionStore::with_key(self.key.clone());
        for (position, slot) in self.chords.iter().enumerate() {
            store.add_slot(None)?;
            if let Some(chord) = slot {
                store.add_chord(position, chord.clone())?;
            }
        }
        Ok(store)
    }
}

impl From<ProgressionSnapshot> for ProgressionFile {
    fn from(snapshot: ProgressionSnapshot) -> Self {
        Self {
            key: snapshot.key,
            chords: snapshot.chords,
        }
    }
}
