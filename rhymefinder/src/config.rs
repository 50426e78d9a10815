/// Front-end configuration that extends the base `Config` from core.
///
/// This configuration includes:
/// - All search options from `rhymefinder_core::Config` (flattened via serde)
/// - Where the category dictionaries live and their file extension
/// - An optional display limit per result list
///
/// # Example
///
/// ```rust
/// use rhymefinder::FinderConfig;
///
/// let config = FinderConfig::from_toml_str(r#"
///     dictionary_dir = "dic"
///     highlight = ["verb"]
///     limit = 20
/// "#).unwrap();
/// assert_eq!(config.limit, Some(20));
/// assert_eq!(config.base().highlight, vec!["verb"]);
/// ```
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Extension appended to each category name to form its file name.
pub const DEFAULT_EXTENSION: &str = ".dic";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FinderConfig {
    /// Base search options (highlight, exclude, form separator)
    #[serde(flatten)]
    pub base: rhymefinder_core::Config,

    /// Directory holding one `<category><extension>` file per category
    pub dictionary_dir: PathBuf,

    /// Category file extension, including the dot
    pub extension: String,

    /// Maximum hits shown per list; results are never truncated in core
    pub limit: Option<usize>,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            base: rhymefinder_core::Config::default(),
            dictionary_dir: PathBuf::from("dic"),
            extension: DEFAULT_EXTENSION.to_string(),
            limit: None,
        }
    }
}

impl FinderConfig {
    /// Convert this config into the base search config.
    pub fn into_base(self) -> rhymefinder_core::Config {
        self.base
    }

    /// Get a reference to the base config
    pub fn base(&self) -> &rhymefinder_core::Config {
        &self.base
    }

    /// Get a mutable reference to the base config
    pub fn base_mut(&mut self) -> &mut rhymefinder_core::Config {
        &mut self.base
    }

    /// Load configuration from a TOML file. Relative dictionary paths are
    /// resolved against the file's directory.
    pub fn load_toml<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let mut config = Self::from_toml_str(&content)
            .with_context(|| format!("parse config {}", path.display()))?;
        if config.dictionary_dir.is_relative() {
            if let Some(parent) = path.parent() {
                config.dictionary_dir = parent.join(&config.dictionary_dir);
            }
        }
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        let content = self.to_toml_string()?;
        std::fs::write(path, content)
            .with_context(|| format!("write config {}", path.display()))?;
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
