//! rhymefinder-core
//!
//! Phonetic rhyme search over a Japanese vocabulary, shared by the
//! `rhymefinder` front end.
//!
//! Readings and queries are tokenized into morae (consonant, vowel, stress).
//! Words are indexed in a forward and a reverse trie keyed on vowel class,
//! and results are ranked by a consonant-cluster distance.
//!
//! Public API:
//! - `Mora`, `Consonant`, `Vowel` - the phonetic unit and its distance
//! - `kana` - reading and pattern tokenizer
//! - `CategoryMask` - 32-bit vocabulary category set
//! - `Word` - one lexicon entry
//! - `MoraIndex` - forward/reverse vowel tries
//! - `Lexicon` - immutable word set with the four rhyme queries
//! - `Config` - search configuration
use anyhow::Context;
use serde::{Deserialize, Serialize};

pub mod mora;
pub use mora::{Consonant, Mora, Vowel};

pub mod kana;

pub mod category;
pub use category::{CategoryMask, CATEGORY_NAMES, USER_CATEGORY};

pub mod error;
pub use error::{CategoryError, QueryError, TokenizeError};

pub mod word;
pub use word::{Word, FORM_SEPARATOR};

pub mod trie;
pub use trie::MoraIndex;

pub mod lexicon;
pub use lexicon::{Exclusion, Hit, Lexicon, LexiconBuilder, MatchKind};

/// Search options that do not depend on where the vocabulary comes from.
///
/// Front ends embed this with `#[serde(flatten)]` and add their own fields.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Category names (or group aliases such as `verb`) whose hits are marked.
    pub highlight: Vec<String>,

    /// Exclusion pattern in the query language; hits containing any of its
    /// morae are dropped. Empty disables the filter.
    pub exclude: String,

    /// Separator placed between a word's orthographic forms when displayed.
    pub form_separator: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            highlight: vec![],
            exclude: String::new(),
            form_separator: FORM_SEPARATOR.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("parse config {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;
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

    /// Category mask for the `highlight` names, `None` when nothing is
    /// highlighted.
    pub fn highlight_mask(&self) -> Result<Option<CategoryMask>, CategoryError> {
        let mask = CategoryMask::from_names(&self.highlight)?;
        Ok((!mask.is_empty()).then_some(mask))
    }

    /// Parse the `exclude` pattern.
    pub fn exclusion(&self) -> Result<Exclusion, QueryError> {
        Exclusion::parse(&self.exclude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = Config::default();
        let text = config.to_toml_string().unwrap();
        assert_eq!(Config::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config = Config::from_toml_str("exclude = \"ん\"").unwrap();
        assert_eq!(config.form_separator, FORM_SEPARATOR);
        assert!(config.highlight.is_empty());
        assert_eq!(config.exclusion().unwrap().morae().len(), 1);
    }

    #[test]
    fn highlight_mask_resolves_names() {
        let mut config = Config::default();
        assert_eq!(config.highlight_mask(), Ok(None));
        config.highlight = vec!["verb".into(), "連体詞".into()];
        assert_eq!(
            config.highlight_mask(),
            Ok(Some(CategoryMask::VERB | CategoryMask::ADNOMINAL))
        );
        config.highlight.push("nope".into());
        assert_eq!(
            config.highlight_mask(),
            Err(CategoryError::UnknownCategory("nope".to_string()))
        );
    }

    #[test]
    fn bad_exclusion_is_reported() {
        let config = Config {
            exclude: "かx".into(),
            ..Config::default()
        };
        assert_eq!(
            config.exclusion(),
            Err(QueryError::InvalidQuerySymbol {
                symbol: 'x',
                position: 1
            })
        );
    }
}
