//! Lexicon entries.

use crate::category::CategoryMask;
use crate::kana;
use crate::mora::Mora;
use serde::Serialize;
use std::cmp::Ordering;

/// Separator used when orthographic forms are shown as one string.
pub const FORM_SEPARATOR: &str = "、";

/// One vocabulary entry: a reading within one category, all spellings seen
/// for it, and its mora sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Word {
    category: CategoryMask,
    reading: String,
    forms: Vec<String>,
    mora: Vec<Mora>,
}

impl Word {
    /// Build an entry. Forms are sorted and deduplicated; the reading is
    /// normalized and tokenized once.
    ///
    /// A reading that does not tokenize, or that tokenizes to pattern morae
    /// (wildcards, stress), gets an empty mora sequence.
    pub fn new<R, I, S>(category: CategoryMask, reading: R, forms: I) -> Self
    where
        R: AsRef<str>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let reading = kana::normalize(reading.as_ref());
        let mut forms: Vec<String> = forms.into_iter().map(Into::into).collect();
        forms.sort();
        forms.dedup();

        let mora = match kana::tokenize(&reading) {
            Ok(mora) if mora.iter().any(Mora::is_pattern) => {
                tracing::warn!(
                    reading = %reading,
                    "dictionary reading contains pattern symbols; entry will never match"
                );
                Vec::new()
            }
            Ok(mora) => mora,
            Err(err) => {
                tracing::warn!(
                    reading = %reading,
                    error = %err,
                    "dictionary reading does not tokenize; entry will never match"
                );
                Vec::new()
            }
        };

        Self {
            category,
            reading,
            forms,
            mora,
        }
    }

    pub fn category(&self) -> CategoryMask {
        self.category
    }

    pub fn reading(&self) -> &str {
        &self.reading
    }

    pub fn forms(&self) -> &[String] {
        &self.forms
    }

    /// Forms joined with [`FORM_SEPARATOR`].
    pub fn joined_forms(&self) -> String {
        self.forms.join(FORM_SEPARATOR)
    }

    pub fn mora(&self) -> &[Mora] {
        &self.mora
    }

    /// Lexicon order: by reading, then by category bit.
    pub fn lexicon_cmp(&self, other: &Word) -> Ordering {
        self.reading
            .cmp(&other.reading)
            .then(self.category.cmp(&other.category))
    }

    /// Summed distance over the fully aligned sequence; `None` when the
    /// lengths differ.
    pub fn distance_exact(&self, query: &[Mora]) -> Option<u32> {
        if query.len() != self.mora.len() {
            return None;
        }
        Some(aligned_distance(query, &self.mora))
    }

    /// Summed distance over the leading `query.len()` morae.
    pub fn distance_prefix(&self, query: &[Mora]) -> Option<u32> {
        let head = self.mora.get(..query.len())?;
        Some(aligned_distance(query, head))
    }

    /// Summed distance over the trailing `query.len()` morae.
    pub fn distance_suffix(&self, query: &[Mora]) -> Option<u32> {
        let start = self.mora.len().checked_sub(query.len())?;
        Some(aligned_distance(query, &self.mora[start..]))
    }

    /// Same length and every position wildcard-equal.
    pub fn matches_exact(&self, query: &[Mora]) -> bool {
        query.len() == self.mora.len() && all_match(query, &self.mora)
    }

    /// Strictly longer than the query and wildcard-equal at the head.
    pub fn matches_prefix(&self, query: &[Mora]) -> bool {
        query.len() < self.mora.len() && all_match(query, &self.mora[..query.len()])
    }

    /// Strictly longer than the query and wildcard-equal at the tail.
    pub fn matches_suffix(&self, query: &[Mora]) -> bool {
        query.len() < self.mora.len()
            && all_match(query, &self.mora[self.mora.len() - query.len()..])
    }

    /// Strictly longer than the query and vowel-compatible at the tail; the
    /// condition the reverse trie retrieves by.
    pub fn rhymes_suffix(&self, query: &[Mora]) -> bool {
        query.len() < self.mora.len()
            && query
                .iter()
                .zip(&self.mora[self.mora.len() - query.len()..])
                .all(|(q, w)| q.vowel().matches(w.vowel()))
    }

    /// The query embeds as an ordered, not necessarily contiguous,
    /// subsequence of this word, and the word is neither too short nor an
    /// end-rhyme of the query.
    pub fn matches_interior(&self, query: &[Mora]) -> bool {
        if query.len() >= self.mora.len() || self.rhymes_suffix(query) {
            return false;
        }
        let mut rest = self.mora.iter();
        query.iter().all(|q| rest.any(|w| q.matches(w)))
    }

    /// True when any of `morae` matches any mora of this word.
    pub fn contains_any(&self, morae: &[Mora]) -> bool {
        morae
            .iter()
            .any(|x| self.mora.iter().any(|w| x.matches(w)))
    }
}

fn aligned_distance(query: &[Mora], word: &[Mora]) -> u32 {
    query
        .iter()
        .zip(word)
        .fold(0u32, |acc, (q, w)| acc.saturating_add(q.distance(w)))
}

fn all_match(query: &[Mora], word: &[Mora]) -> bool {
    query.iter().zip(word).all(|(q, w)| q.matches(w))
}
