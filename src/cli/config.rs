//! Booth profiles.

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::scene::SceneConfig;

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Font family for sticker glyphs.
    pub font: Option<String>,
    #[serde(default)]
    pub booth: SceneConfig,
    #[serde(default)]
    pub catalog: Catalog,
}

impl Config {
    pub const FILE_NAME: &'static str = "booth.toml";

    /// Loads a named profile from the config folder, or `./booth.toml` when
    /// no name is given. Without a local file the built-in defaults apply.
    pub fn find(name: Option<&str>) -> Result<Self> {
        match name {
            Some(name) => {
                let mut path = Self::config_folder()?;
                path.push(name);
                path.push(Self::FILE_NAME);
                Self::open(&path)
            }
            None => {
                let path = PathBuf::from(".").join(Self::FILE_NAME);
                if path.exists() {
                    Self::open(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn open(path: &impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::config_open(path, e))?;
        Self::parse(&content).map_err(|e| Error::config_deser(path, e))
    }

    /// Without a `background` in `[booth]`, sessions start on the first
    /// catalog frame.
    pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(content)?;
        let table: toml::Table = content.parse()?;
        let has_background = table
            .get("booth")
            .and_then(|booth| booth.get("background"))
            .is_some();
        if !has_background {
            config.booth.background = config.catalog.default_background();
        }
        Ok(config)
    }

    #[cfg(target_os = "windows")]
    fn config_folder() -> Result<PathBuf> {
        let home = std::env::var("APPDATA").map_err(|_| Error::no_env_variable("APPDATA"))?;
        let mut home = PathBuf::from(home);
        home.push("photomata");
        Ok(home)
    }

    #[cfg(not(target_os = "windows"))]
    fn config_folder() -> Result<PathBuf> {
        let home = std::env::var("HOME").map_err(|_| Error::no_env_variable("HOME"))?;
        let mut home = PathBuf::from(home);
        home.push(".photomata");
        Ok(home)
    }
}
