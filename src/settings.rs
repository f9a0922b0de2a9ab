//! Runtime settings.
//!
//! Settings are read from a JSON file. Every field is optional; anything missing keeps the
//! built-in default, so an absent file simply reproduces the stock 800x600 "Learn OpenGL" window.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    abs::TextureOptions,
    error::{Error, Result},
};

/// File name searched for in the working directory and the user config directory.
pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Learn OpenGL".to_string(),
            width: 800,
            height: 600,
            vsync: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window: WindowSettings,
    pub vertex_shader: PathBuf,
    pub fragment_shader: PathBuf,
    pub texture: PathBuf,
    pub texture_options: TextureOptions,
    /// RGBA background colour.
    pub clear_colour: [f32; 4],
    /// Start in wireframe polygon mode.
    pub wireframe: bool,
    /// Minimum level logged, e.g. `"info"` or `"debug"`.
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window: WindowSettings::default(),
            vertex_shader: PathBuf::from("shaders/vertexShader.vert"),
            fragment_shader: PathBuf::from("shaders/fragmentShader.frag"),
            texture: PathBuf::from("textures/metalbox_full.png"),
            texture_options: TextureOptions::default(),
            clear_colour: [0.2, 0.3, 0.3, 1.0],
            wireframe: false,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Parses settings from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        serde_json::from_str(&text).map_err(|source| Error::Settings {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads settings from an explicit file or the first existing candidate.
    ///
    /// An explicitly requested file must exist. Without one, the candidates are tried in order
    /// (normally [`search_paths`]) and the defaults are used when none exists. The second value
    /// is the file the settings came from.
    pub fn load(
        explicit: Option<&Path>,
        candidates: &[PathBuf],
    ) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::from_file(path)?, Some(path.to_path_buf())));
        }
        match candidates.iter().find(|path| path.is_file()) {
            Some(path) => Ok((Self::from_file(path)?, Some(path.clone()))),
            None => Ok((Self::default(), None)),
        }
    }

    /// Rebases relative asset paths onto `dir`.
    ///
    /// Used for settings files outside the working directory so their asset paths resolve
    /// next to the file.
    pub fn resolve_relative_to(&mut self, dir: &Path) {
        for path in [
            &mut self.vertex_shader,
            &mut self.fragment_shader,
            &mut self.texture,
        ] {
            if path.is_relative() {
                *path = dir.join(&*path);
            }
        }
    }
}

/// Locations checked for a settings file when none is given explicitly.
pub fn search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(SETTINGS_FILE)];
    if let Some(config) = dirs::config_dir() {
        paths.push(config.join("learn-opengl").join(SETTINGS_FILE));
    }
    paths
}
