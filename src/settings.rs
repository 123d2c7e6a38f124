//! Tool settings persisted between sessions.
//!
//! The file holds a single `[tools]` section:
//!
//! ```ini
//! [tools]
//! stroke_color_rgba = 16711935
//! fill_color_rgba = 4294902015
//! line_width = 1.7
//! ```
//!
//! Colors are packed `0xRRGGBBAA` integers written in decimal. The layout is
//! plain INI and also valid TOML, so it is read and written with `toml`.
//! Only that common subset of INI is accepted: `key: value` lines and `;`
//! comments are not TOML and fail to load with [`ConfigError::Parse`].

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::{GREEN, YELLOW};

pub const CONFIG_FILE_NAME: &str = "shapedit.ini";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine the user config directory")]
    NoConfigDir,
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Stroke color, fill color and line width used for new shapes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolSettings {
    pub stroke_color_rgba: u32,
    pub fill_color_rgba: u32,
    pub line_width: f64,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            stroke_color_rgba: GREEN,
            fill_color_rgba: YELLOW,
            line_width: 1.7,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct SettingsFile {
    tools: ToolSettings,
}

impl ToolSettings {
    /// `shapedit.ini` inside the platform config directory.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Read settings from `path`, or the defaults when the file is absent.
    ///
    /// A file missing the section or any of the three keys is an error; no
    /// defaults are merged in.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", path.display());
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: SettingsFile = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        info!("Loaded config from {}", path.display());
        Ok(file.tools)
    }

    /// Write settings to `path`, replacing any existing file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let text = toml::to_string(&SettingsFile { tools: *self })?;
        fs::write(path, text).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    pub fn log_values(&self) {
        debug!("{:>20} = {}", "stroke_color_rgba", self.stroke_color_rgba);
        debug!("{:>20} = {}", "fill_color_rgba", self.fill_color_rgba);
        debug!("{:>20} = {}", "line_width", self.line_width);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let settings = ToolSettings::load(&dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(settings.stroke_color_rgba, 0x00FF_00FF);
        assert_eq!(settings.fill_color_rgba, 0xFFFF_00FF);
        assert_eq!(settings.line_width, 1.7);
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        let settings = ToolSettings {
            stroke_color_rgba: 0x1234_5678,
            fill_color_rgba: u32::MAX,
            line_width: 3.3,
        };
        settings.save(&path).unwrap();
        assert_eq!(ToolSettings::load(&path).unwrap(), settings);
    }

    #[test]
    fn saved_file_is_section_plus_key_value_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        ToolSettings::default().save(&path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
        assert_eq!(
            lines,
            vec![
                "[tools]",
                "stroke_color_rgba = 16711935",
                "fill_color_rgba = 4294902015",
                "line_width = 1.7",
            ]
        );
    }

    #[test]
    fn save_overwrites_and_creates_parent_dir() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "garbage that is not a config").unwrap();

        let settings = ToolSettings {
            line_width: 0.1,
            ..ToolSettings::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(ToolSettings::load(&path).unwrap(), settings);

        let fresh = dir.path().join("a").join("b").join(CONFIG_FILE_NAME);
        settings.save(&fresh).unwrap();
        assert!(fresh.exists());
    }

    #[test]
    fn missing_key_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[tools]\nstroke_color_rgba = 1\nline_width = 2.0\n").unwrap();

        let err = ToolSettings::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "{err}");
        assert!(err.to_string().contains("failed to parse"));
    }

    #[test]
    fn missing_section_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "stroke_color_rgba = 1\n").unwrap();
        assert!(matches!(
            ToolSettings::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn reads_files_written_with_integer_width() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            "\n[tools]\nstroke_color_rgba = 255\nfill_color_rgba = 4294902015\nline_width = 2\n\n",
        )
        .unwrap();

        let settings = ToolSettings::load(&path).unwrap();
        assert_eq!(settings.stroke_color_rgba, 255);
        assert_eq!(settings.line_width, 2.0);
    }

    #[test]
    fn ini_only_syntax_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        for contents in [
            "[tools]\nstroke_color_rgba: 255\nfill_color_rgba: 255\nline_width: 1.0\n",
            "; saved settings\n[tools]\nstroke_color_rgba = 255\nfill_color_rgba = 255\nline_width = 1.0\n",
        ] {
            fs::write(&path, contents).unwrap();
            assert!(
                matches!(ToolSettings::load(&path), Err(ConfigError::Parse { .. })),
                "{contents:?} should not parse"
            );
        }
    }
}
