//! Configuration loading and parsing.
//!
//! Parses `moveset.toml` (or an override path provided by the binary):
//!
//! ```toml
//! [input]
//! buffered_input_expire = 0.05
//! queued_input_expire = 0.5
//!
//! [[moves]]
//! name = "hadouken"
//! keystrokes = ["Down", "Forward", "A"]
//! ```
//!
//! A missing or malformed file yields defaults so a bad edit never keeps the
//! binary from starting. Timings are sanitized at load time. Move entries stay
//! as raw strings until `Config::move_definitions` resolves them, which is
//! strict: an unknown keystroke name is an error naming the move.

use anyhow::{Context, Result, bail};
use core_keystroke::Keystroke;
use core_moves::MoveDefinition;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "moveset.toml";

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct InputConfig {
    #[serde(default = "InputConfig::default_buffered_input_expire")]
    pub buffered_input_expire: f64,
    #[serde(default = "InputConfig::default_queued_input_expire")]
    pub queued_input_expire: f64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            buffered_input_expire: Self::default_buffered_input_expire(),
            queued_input_expire: Self::default_queued_input_expire(),
        }
    }
}

impl InputConfig {
    const fn default_buffered_input_expire() -> f64 {
        0.05
    }
    const fn default_queued_input_expire() -> f64 {
        0.5
    }

    /// Negative or non-finite values fall back to their defaults, and the queue
    /// window is never shorter than the buffer window.
    pub fn clamped(&self) -> Self {
        let buffered = non_negative_or(
            self.buffered_input_expire,
            Self::default_buffered_input_expire(),
        );
        let queued = non_negative_or(self.queued_input_expire, Self::default_queued_input_expire())
            .max(buffered);
        Self {
            buffered_input_expire: buffered,
            queued_input_expire: queued,
        }
    }
}

fn non_negative_or(value: f64, default: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        default
    }
}

/// One `[[moves]]` table as written in the file.
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct MoveEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub keystrokes: Vec<String>,
}

impl MoveEntry {
    pub fn to_definition(&self) -> Result<MoveDefinition> {
        if self.name.trim().is_empty() {
            bail!("move entry has an empty name");
        }
        if self.keystrokes.is_empty() {
            bail!("move `{}` has no keystrokes", self.name);
        }
        let keystrokes = self
            .keystrokes
            .iter()
            .map(|k| k.parse::<Keystroke>())
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("move `{}`", self.name))?;
        Ok(MoveDefinition::new(self.name.clone(), keystrokes))
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub moves: Vec<MoveEntry>,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // file contents as read (optional)
    pub file: ConfigFile,    // parsed (or default) data, timings sanitized
}

impl Config {
    /// Resolve every `[[moves]]` entry, failing on the first invalid one.
    pub fn move_definitions(&self) -> Result<Vec<MoveDefinition>> {
        self.file.moves.iter().map(MoveEntry::to_definition).collect()
    }
}

/// Best-effort config path following platform conventions (XDG / AppData Roaming).
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("moveset").join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(mut file) => {
            let clamped = file.input.clamped();
            if clamped != file.input {
                info!(
                    target: "config",
                    raw_buffered = file.input.buffered_input_expire,
                    raw_queued = file.input.queued_input_expire,
                    buffered = clamped.buffered_input_expire,
                    queued = clamped.queued_input_expire,
                    "timings_clamped"
                );
                file.input = clamped;
            }
            Ok(Config {
                raw: Some(content),
                file,
            })
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed");
            Ok(Config::default())
        }
    }
}

#[derive(Debug, Deserialize)]
struct MoveListFile {
    #[serde(default)]
    moves: Vec<MoveEntry>,
}

/// Strictly load a standalone move-list file containing only `[[moves]]` tables.
pub fn load_move_list(path: &Path) -> Result<Vec<MoveDefinition>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading move list {}", path.display()))?;
    let file: MoveListFile = toml::from_str(&content)
        .with_context(|| format!("parsing move list {}", path.display()))?;
    let definitions = file
        .moves
        .iter()
        .map(MoveEntry::to_definition)
        .collect::<Result<Vec<_>>>()
        .with_context(|| format!("in move list {}", path.display()))?;
    info!(target: "config", path = %path.display(), count = definitions.len(), "move_list_loaded");
    Ok(definitions)
}
