//! TOML configuration with built-in defaults.
//!
//! Every section and field is optional; anything left out keeps its default.
//! Command-line flags are applied on top with [`Config::apply_cli`].

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use realms_core::diag::{DiagnosticState, Palette};
use realms_core::hud::{HudLayout, HudState, MAX_COUNTER_DIGITS, MAX_PIPS};
use realms_core::input::Button;
use realms_core::video::{Color, MIN_SURFACES, Rgba8};
use serde::Deserialize;

use crate::cli::Cli;
use crate::error::FrontendError;

const APP_DIR: &str = "shattered-realms";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub display: DisplayConfig,
    pub input: InputConfig,
    pub diagnostic: DiagnosticConfig,
    pub hud: HudConfig,
    pub debug: DebugConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Integer window scale over the native 320×240.
    pub scale: u32,
    pub vsync: bool,
    /// Swap-chain surfaces.
    pub buffers: usize,
    pub title: String,
    /// Frames of boot screen shown before the loop starts.
    pub boot_frames: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            scale: 3,
            vsync: true,
            buffers: 2,
            title: "Shattered Realms".to_string(),
            boot_frames: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    /// Button that cycles the background palette.
    pub cycle_button: String,
    /// Accept the keyboard as a controller.
    pub keyboard: bool,
    /// Button name -> SDL scancode name overrides.
    pub keys: BTreeMap<String, String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            cycle_button: "start".to_string(),
            keyboard: true,
            keys: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiagnosticConfig {
    /// `#rrggbb` or `#rrggbbaa` literals, converted to the surface depth.
    pub palette: Vec<String>,
    pub start_index: usize,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        Self {
            palette: ["#000000", "#0000ff", "#00ff00", "#ff0000", "#ffff00"]
                .map(String::from)
                .to_vec(),
            start_index: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HudConfig {
    pub max_pips: u32,
    pub currency_digits: usize,
    /// Initial values until gameplay takes over.
    pub health: u32,
    pub currency: u32,
}

impl Default for HudConfig {
    fn default() -> Self {
        let layout = HudLayout::default();
        let state = HudState::default();
        Self {
            max_pips: layout.max_pips,
            currency_digits: layout.currency_digits,
            health: state.health,
            currency: state.currency,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DebugConfig {
    pub show_fps: bool,
    /// `tracing` filter directive; `RUST_LOG` takes precedence.
    pub log_level: String,
    pub screenshot_dir: Option<PathBuf>,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            show_fps: false,
            log_level: "info".to_string(),
            screenshot_dir: None,
        }
    }
}

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    Defaults,
    File(PathBuf),
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Defaults => f.write_str("built-in defaults"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

pub struct LoadedConfig {
    pub config: Config,
    pub source: ConfigSource,
}

/// `<config dir>/shattered-realms/config.toml`, if the platform has one.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

impl Config {
    /// Load from `explicit` (must exist) or from the default location (may be
    /// absent, in which case defaults are used). Values are checked by
    /// [`Config::validate`] once command-line overrides are applied.
    pub fn load(explicit: Option<&Path>) -> Result<LoadedConfig, FrontendError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match default_path() {
                Some(path) if path.is_file() => path,
                _ => {
                    return Ok(LoadedConfig {
                        config: Config::default(),
                        source: ConfigSource::Defaults,
                    });
                }
            },
        };

        let text = std::fs::read_to_string(&path).map_err(|source| FrontendError::ConfigRead {
            path: path.clone(),
            source,
        })?;
        let config = Self::from_toml_str(&text).map_err(|source| FrontendError::ConfigParse {
            path: path.clone(),
            source,
        })?;
        Ok(LoadedConfig {
            config,
            source: ConfigSource::File(path),
        })
    }

    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Check values serde cannot express as types.
    pub fn validate(&self) -> Result<(), FrontendError> {
        if self.display.scale == 0 {
            return Err(FrontendError::InvalidConfig(
                "display.scale must be at least 1".to_string(),
            ));
        }
        if self.display.buffers < MIN_SURFACES {
            return Err(FrontendError::InvalidConfig(format!(
                "display.buffers must be at least {MIN_SURFACES}"
            )));
        }
        if self.hud.max_pips > MAX_PIPS {
            return Err(FrontendError::InvalidConfig(format!(
                "hud.max_pips must be at most {MAX_PIPS}"
            )));
        }
        if self.hud.currency_digits > MAX_COUNTER_DIGITS {
            return Err(FrontendError::InvalidConfig(format!(
                "hud.currency_digits must be at most {MAX_COUNTER_DIGITS}"
            )));
        }
        self.palette()?;
        self.cycle_button()?;
        Ok(())
    }

    /// Apply command-line overrides.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(scale) = cli.scale {
            self.display.scale = scale;
        }
        if cli.show_fps {
            self.debug.show_fps = true;
        }
        if let Some(level) = &cli.log_level {
            self.debug.log_level = level.clone();
        }
    }

    pub fn palette(&self) -> Result<Palette, FrontendError> {
        let colors = self
            .diagnostic
            .palette
            .iter()
            .map(|lit| {
                Rgba8::parse_hex(lit)
                    .map(Color::from_rgba8)
                    .ok_or_else(|| FrontendError::InvalidColor(lit.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Palette::new(colors)?)
    }

    pub fn cycle_button(&self) -> Result<Button, FrontendError> {
        Ok(self.input.cycle_button.parse::<Button>()?)
    }

    pub fn diagnostic_state(&self) -> Result<DiagnosticState, FrontendError> {
        Ok(DiagnosticState::with_start_index(
            self.palette()?,
            self.cycle_button()?,
            self.diagnostic.start_index,
        )?)
    }

    pub fn hud_layout(&self) -> HudLayout {
        HudLayout {
            max_pips: self.hud.max_pips,
            currency_digits: self.hud.currency_digits,
        }
    }

    pub fn hud_state(&self) -> HudState {
        HudState {
            health: self.hud.health,
            currency: self.hud.currency,
        }
    }

    /// Directory for F12 screenshots; the working directory by default.
    pub fn screenshot_dir(&self) -> PathBuf {
        self.debug
            .screenshot_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
