//! Replay scripts: timed controller frames in TOML.
//!
//! ```toml
//! [[frame]]
//! time = 0.0
//! asserted = ["Down"]
//!
//! [[frame]]
//! time = 0.1
//! flipped = true
//! asserted = ["Forward", "A"]
//! ```

use anyhow::{Context, Result, bail};
use core_keystroke::Keystroke;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct ScriptFile {
    #[serde(default, rename = "frame")]
    frames: Vec<RawFrame>,
}

#[derive(Debug, Deserialize)]
struct RawFrame {
    time: f64,
    #[serde(default)]
    flipped: bool,
    #[serde(default)]
    asserted: Vec<String>,
}

/// One controller tick with keystrokes already resolved for facing.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub time: f64,
    pub flipped: bool,
    pub asserted: Vec<Keystroke>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Script {
    pub frames: Vec<Frame>,
}

impl Script {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("in script {}", path.display()))
    }

    /// Frame times must be finite and never decrease; they drive the clock.
    pub fn parse(content: &str) -> Result<Self> {
        let file: ScriptFile = toml::from_str(content).context("parsing script")?;
        let mut frames = Vec::with_capacity(file.frames.len());
        let mut last = f64::NEG_INFINITY;
        for (i, raw) in file.frames.into_iter().enumerate() {
            if !raw.time.is_finite() {
                bail!("frame {i}: time must be finite");
            }
            if raw.time < last {
                bail!("frame {i}: time {} is earlier than previous frame ({last})", raw.time);
            }
            last = raw.time;
            let asserted = raw
                .asserted
                .iter()
                .map(|k| k.parse::<Keystroke>())
                .collect::<Result<Vec<_>, _>>()
                .with_context(|| format!("frame {i}"))?;
            frames.push(Frame {
                time: raw.time,
                flipped: raw.flipped,
                asserted,
            });
        }
        Ok(Self { frames })
    }
}
