//! Demo Configuration
//!
//! Settings are read from a JSON file and then overridden by command line
//! flags. Every field has a default, so a partial file or no file at all is fine.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::gui::MenuStyle;

const CONFIG_DIR: &str = "overlay_menu";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl From<ConfigFileError> for String {
    fn from(error: ConfigFileError) -> Self {
        error.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            width: 800,
            height: 600,
            title: "Overlay Menu Example".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,

    /// Frame rate cap; the clock advances 1/fps seconds per frame
    pub fps: u32,

    /// `trace`, `debug`, `info`, `warn` or `error`
    pub log_level: String,

    /// Let OS key auto-repeat drive menu navigation
    pub key_repeat: bool,

    /// Replaces the built-in main menu style
    pub main_menu_style: Option<MenuStyle>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            window: WindowConfig::default(),
            fps: 60,
            log_level: "info".to_string(),
            key_repeat: false,
            main_menu_style: None,
        }
    }
}

impl AppConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigFileError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| ConfigFileError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `<config dir>/overlay_menu/config.json`, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Explicit path must load; the default path is only used when it exists
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigFileError> {
        match explicit {
            Some(path) => AppConfig::load_from_file(path),
            None => match AppConfig::default_path() {
                Some(path) if path.exists() => AppConfig::load_from_file(path),
                _ => Ok(AppConfig::default()),
            },
        }
    }

    pub fn apply_args(&mut self, args: &Args) {
        if let Some(fps) = args.fps {
            self.fps = fps;
        }
        if let Some(width) = args.width {
            self.window.width = width;
        }
        if let Some(height) = args.height {
            self.window.height = height;
        }
        if let Some(level) = &args.log_level {
            self.log_level = level.clone();
        }
    }

    /// Seconds per frame; a zero fps is treated as 1
    pub fn frame_time(&self) -> f64 {
        1.0 / f64::from(self.fps.max(1))
    }
}

/// Command line options of the demo
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "overlay-menu-demo", about = "Timer clock with an in-game overlay menu")]
pub struct Args {
    /// JSON config file (defaults to the user config dir when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub fps: Option<u32>,

    /// Window width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    #[arg(long)]
    pub log_level: Option<String>,
}
