//! Settings for assembling the standard container stack
//!
//! ```toml
//! [archive]
//! file_name = "scene.pkg"
//! load = "buffered"
//! on_invalid = "skip"
//!
//! [assets]
//! dir = "/opt/wallpaper_engine/assets"
//! ```

use crate::archive::LoadStrategy;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Asset roots tried under `$HOME` when no explicit directory is configured
pub const DEFAULT_SEARCH_PATHS: &[&str] = &[
    ".steam/steam/steamapps/common/wallpaper_engine/assets",
    ".local/share/Steam/steamapps/common/wallpaper_engine/assets",
];

/// What to do when a wallpaper ships an archive that cannot be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidArchivePolicy {
    /// Abort assembly with the parse error
    #[default]
    Fail,
    /// Log it and continue with directory layers only
    Skip,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    pub file_name: String,
    pub load: LoadStrategy,
    pub on_invalid: InvalidArchivePolicy,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            file_name: "scene.pkg".to_string(),
            load: LoadStrategy::default(),
            on_invalid: InvalidArchivePolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsDirConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
    pub search_paths: Vec<String>,
}

impl Default for AssetsDirConfig {
    fn default() -> Self {
        Self {
            dir: None,
            search_paths: DEFAULT_SEARCH_PATHS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    pub archive: ArchiveConfig,
    pub assets: AssetsDirConfig,
}

impl AssetsConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AssetError;

    #[test]
    fn test_defaults() {
        let config = AssetsConfig::default();
        assert_eq!(config.archive.file_name, "scene.pkg");
        assert_eq!(config.archive.load, LoadStrategy::Mapped);
        assert_eq!(config.archive.on_invalid, InvalidArchivePolicy::Fail);
        assert_eq!(config.assets.dir, None);
        assert_eq!(config.assets.search_paths.len(), 2);
    }

    #[test]
    fn test_partial_toml() {
        let config = AssetsConfig::from_toml_str(
            r#"
            [archive]
            load = "buffered"
            on_invalid = "skip"

            [assets]
            dir = "/opt/assets"
            "#,
        )
        .unwrap();

        assert_eq!(config.archive.file_name, "scene.pkg");
        assert_eq!(config.archive.load, LoadStrategy::Buffered);
        assert_eq!(config.archive.on_invalid, InvalidArchivePolicy::Skip);
        assert_eq!(config.assets.dir, Some(PathBuf::from("/opt/assets")));
        assert_eq!(config.assets.search_paths, AssetsDirConfig::default().search_paths);
    }

    #[test]
    fn test_empty_and_invalid() {
        assert_eq!(AssetsConfig::from_toml_str("").unwrap(), AssetsConfig::default());

        let result = AssetsConfig::from_toml_str("[archive]\nload = \"lazy\"\n");
        assert!(matches!(result, Err(AssetError::TomlError(_))));
    }

    #[test]
    fn test_toml_roundtrip_from_file() {
        let mut config = AssetsConfig::default();
        config.archive.file_name = "gifscene.pkg".to_string();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("assets.toml");
        std::fs::write(&path, config.to_toml_string().unwrap()).unwrap();

        assert_eq!(AssetsConfig::load(&path).unwrap(), config);
    }
}
