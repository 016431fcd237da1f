use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{ConfigPatch, MarqueeConfig};
use crate::error::MarqueeError;

const DEFAULT_CONFIG: &str = include_str!("../../assets/default_config.toml");

/// Overrides that apply once the viewport is at least `min_width` wide.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub min_width: u32,
    #[serde(flatten)]
    pub patch: ConfigPatch,
}

/// Caller-supplied options, exactly as written in a config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarqueeOptions {
    #[serde(flatten)]
    pub patch: ConfigPatch,
    #[serde(default)]
    pub breakpoints: Vec<Breakpoint>,
}

impl MarqueeOptions {
    pub fn from_toml_str(s: &str) -> Result<Self, MarqueeError> {
        Ok(toml::from_str(s)?)
    }

    pub fn config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("~/.config"));
        base.join("smooth_marquee").join("config.toml")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_toml_str(&contents).with_context(|| format!("parsing {}", path.display()))
    }

    /// Load the user config, writing the bundled default on first run.
    /// Parse failures fall back to the default with a warning.
    pub fn load_or_default() -> Self {
        let path = Self::config_path();
        if path.exists() {
            match Self::load(&path) {
                Ok(options) => return options,
                Err(e) => log::warn!("Failed to load marquee options: {e:#}"),
            }
        } else {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = std::fs::write(&path, DEFAULT_CONFIG);
        }
        Self::from_toml_str(DEFAULT_CONFIG).unwrap_or_default()
    }
}

/// The outcome of resolving options against a viewport width.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    /// Index into the sorted breakpoint list.
    pub breakpoint: Option<usize>,
    pub min_width: Option<u32>,
    pub config: MarqueeConfig,
}

/// Validated base configuration plus breakpoints sorted by width.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    base: MarqueeConfig,
    breakpoints: Vec<Breakpoint>,
}

impl Settings {
    pub fn new(options: MarqueeOptions) -> Result<Self, MarqueeError> {
        let base = MarqueeConfig::default().patched(&options.patch).validated()?;
        let mut breakpoints = options.breakpoints;
        // stable: equal widths keep declaration order, so the later one wins
        breakpoints.sort_by_key(|bp| bp.min_width);
        for bp in &breakpoints {
            base.clone().patched(&bp.patch).validated()?;
        }
        Ok(Self { base, breakpoints })
    }

    pub fn base(&self) -> &MarqueeConfig {
        &self.base
    }

    pub fn breakpoints(&self) -> &[Breakpoint] {
        &self.breakpoints
    }

    pub fn active_breakpoint(&self, viewport_width: f32) -> Option<usize> {
        self.breakpoints.iter().rposition(|bp| bp.min_width as f32 <= viewport_width)
    }

    pub fn resolve(&self, viewport_width: f32) -> Result<Resolved, MarqueeError> {
        let breakpoint = self.active_breakpoint(viewport_width);
        let config = match breakpoint {
            Some(i) => self.base.clone().patched(&self.breakpoints[i].patch).validated()?,
            None => self.base.clone(),
        };
        Ok(Resolved {
            breakpoint,
            min_width: breakpoint.map(|i| self.breakpoints[i].min_width),
            config,
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self { base: MarqueeConfig::default(), breakpoints: Vec::new() }
    }
}
