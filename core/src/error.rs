//! Error types for tokenization and querying.

use thiserror::Error;

/// Failure while turning text into morae.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizeError {
    /// A character outside the kana tables and the query mini-language.
    /// `position` is the 0-based character index in the normalized text.
    #[error("unsupported symbol '{symbol}' at position {position}")]
    UnsupportedSymbol { symbol: char, position: usize },
}

/// A category name that is neither a category nor a group alias.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CategoryError {
    #[error("unknown category '{0}'")]
    UnknownCategory(String),
}

/// Failure of a lexicon query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("invalid query symbol '{symbol}' at position {position}")]
    InvalidQuerySymbol { symbol: char, position: usize },
}

impl From<TokenizeError> for QueryError {
    fn from(err: TokenizeError) -> Self {
        match err {
            TokenizeError::UnsupportedSymbol { symbol, position } => {
                QueryError::InvalidQuerySymbol { symbol, position }
            }
        }
    }
}
