//! Immutable lexicon and the four rhyme queries.
//!
//! A `Lexicon` is built once through [`LexiconBuilder`] and never changes
//! afterwards, so it can be shared across threads and queried concurrently.
//!
//! Query kinds:
//! - exact (rhyme): same length, vowel path equal position by position;
//! - prefix (alliteration): strictly longer words sharing the leading vowels;
//! - suffix (end-rhyme): strictly longer words sharing the trailing vowels;
//! - interior (echo): the query embedded as an ordered subsequence, excluding
//!   end-rhymes. Served by a linear scan.
//!
//! The first three are ranked by summed mora distance; ties keep lexicon
//! (reading) order. Interior results are returned in lexicon order.

use crate::category::CategoryMask;
use crate::error::QueryError;
use crate::kana;
use crate::mora::Mora;
use crate::trie::MoraIndex;
use crate::word::Word;
use ahash::AHashMap;
use serde::Serialize;
use std::fmt;

/// The four query kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Exact,
    Prefix,
    Suffix,
    Interior,
}

impl MatchKind {
    pub const ALL: [MatchKind; 4] = [
        MatchKind::Exact,
        MatchKind::Prefix,
        MatchKind::Suffix,
        MatchKind::Interior,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MatchKind::Exact => "rhyme",
            MatchKind::Prefix => "alliteration",
            MatchKind::Suffix => "end-rhyme",
            MatchKind::Interior => "interior",
        }
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One query result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hit<'a> {
    pub word: &'a Word,
    /// Ranking distance; `None` for interior matches.
    pub distance: Option<u32>,
    /// The word belongs to one of the caller's highlighted categories.
    pub highlighted: bool,
}

/// Morae that disqualify a hit wherever they occur in its word.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Exclusion {
    morae: Vec<Mora>,
}

impl Exclusion {
    pub fn new(morae: Vec<Mora>) -> Self {
        Self { morae }
    }

    /// Parse an exclusion list written in the query language.
    pub fn parse(text: &str) -> Result<Self, QueryError> {
        Ok(Self::new(kana::tokenize_query(text)?))
    }

    pub fn is_empty(&self) -> bool {
        self.morae.is_empty()
    }

    pub fn morae(&self) -> &[Mora] {
        &self.morae
    }

    pub fn admits(&self, word: &Word) -> bool {
        !word.contains_any(&self.morae)
    }

    /// Drop every hit whose word contains an excluded mora.
    pub fn retain(&self, hits: &mut Vec<Hit<'_>>) {
        if !self.is_empty() {
            hits.retain(|hit| self.admits(hit.word));
        }
    }
}

/// Collects category entries and builds a [`Lexicon`].
///
/// Forms added for the same (category, reading) pair are merged. Readings
/// are compared after normalization, so width variants and surrounding
/// whitespace fold into one entry.
#[derive(Debug, Default)]
pub struct LexiconBuilder {
    entries: AHashMap<(CategoryMask, String), Vec<String>>,
}

impl LexiconBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one reading with its spellings.
    pub fn add<R, I, S>(&mut self, category: CategoryMask, reading: R, forms: I) -> &mut Self
    where
        R: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let reading = kana::normalize(&reading.into());
        self.entries
            .entry((category, reading))
            .or_default()
            .extend(forms.into_iter().map(Into::into));
        self
    }

    /// Add every (reading, forms) entry decoded from one category source.
    pub fn add_category<I, R, F, S>(&mut self, category: CategoryMask, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = (R, F)>,
        R: Into<String>,
        F: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for (reading, forms) in entries {
            self.add(category, reading, forms);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tokenize every reading, sort by reading and index the result.
    pub fn build(self) -> Lexicon {
        let mut words: Vec<Word> = self
            .entries
            .into_iter()
            .map(|((category, reading), forms)| Word::new(category, reading, forms))
            .collect();
        words.sort_by(Word::lexicon_cmp);
        let index = MoraIndex::build(&words);
        tracing::debug!(
            words = words.len(),
            trie_nodes = index.node_count(),
            "built lexicon"
        );
        Lexicon { words, index }
    }
}

/// Read-only word array with its trie index.
#[derive(Debug)]
pub struct Lexicon {
    words: Vec<Word>,
    index: MoraIndex,
}

impl Lexicon {
    pub fn builder() -> LexiconBuilder {
        LexiconBuilder::new()
    }

    /// Words in lexicon order.
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words with the query's length whose vowels match position by position.
    pub fn exact_match(
        &self,
        query: &str,
        highlight: Option<CategoryMask>,
    ) -> Result<Vec<Hit<'_>>, QueryError> {
        Ok(self.exact_match_mora(&kana::tokenize_query(query)?, highlight))
    }

    /// Strictly longer words sharing the query's leading vowels.
    pub fn prefix_match(
        &self,
        query: &str,
        highlight: Option<CategoryMask>,
    ) -> Result<Vec<Hit<'_>>, QueryError> {
        Ok(self.prefix_match_mora(&kana::tokenize_query(query)?, highlight))
    }

    /// Strictly longer words sharing the query's trailing vowels.
    pub fn suffix_match(
        &self,
        query: &str,
        highlight: Option<CategoryMask>,
    ) -> Result<Vec<Hit<'_>>, QueryError> {
        Ok(self.suffix_match_mora(&kana::tokenize_query(query)?, highlight))
    }

    /// Words containing the query as an ordered subsequence, end-rhymes
    /// excluded. Unranked.
    pub fn interior_match(
        &self,
        query: &str,
        highlight: Option<CategoryMask>,
    ) -> Result<Vec<Hit<'_>>, QueryError> {
        Ok(self.interior_match_mora(&kana::tokenize_query(query)?, highlight))
    }

    /// Dispatch on `kind` with an already tokenized query.
    pub fn match_mora(
        &self,
        kind: MatchKind,
        query: &[Mora],
        highlight: Option<CategoryMask>,
    ) -> Vec<Hit<'_>> {
        match kind {
            MatchKind::Exact => self.exact_match_mora(query, highlight),
            MatchKind::Prefix => self.prefix_match_mora(query, highlight),
            MatchKind::Suffix => self.suffix_match_mora(query, highlight),
            MatchKind::Interior => self.interior_match_mora(query, highlight),
        }
    }

    pub fn exact_match_mora(
        &self,
        query: &[Mora],
        highlight: Option<CategoryMask>,
    ) -> Vec<Hit<'_>> {
        if query.is_empty() {
            return Vec::new();
        }
        self.rank(self.index.exact(query), highlight, |w| w.distance_exact(query))
    }

    pub fn prefix_match_mora(
        &self,
        query: &[Mora],
        highlight: Option<CategoryMask>,
    ) -> Vec<Hit<'_>> {
        if query.is_empty() {
            return Vec::new();
        }
        self.rank(self.index.prefix(query), highlight, |w| w.distance_prefix(query))
    }

    pub fn suffix_match_mora(
        &self,
        query: &[Mora],
        highlight: Option<CategoryMask>,
    ) -> Vec<Hit<'_>> {
        if query.is_empty() {
            return Vec::new();
        }
        self.rank(self.index.suffix(query), highlight, |w| w.distance_suffix(query))
    }

    pub fn interior_match_mora(
        &self,
        query: &[Mora],
        highlight: Option<CategoryMask>,
    ) -> Vec<Hit<'_>> {
        if query.is_empty() {
            return Vec::new();
        }
        self.words
            .iter()
            .filter(|w| w.matches_interior(query))
            .map(|word| Hit {
                word,
                distance: None,
                highlighted: is_highlighted(word, highlight),
            })
            .collect()
    }

    /// Turn trie candidates into hits sorted by ascending distance. Indices
    /// are put back into lexicon order first so that equal distances keep
    /// reading order through the stable sort.
    fn rank<F>(
        &self,
        mut ids: Vec<usize>,
        highlight: Option<CategoryMask>,
        distance: F,
    ) -> Vec<Hit<'_>>
    where
        F: Fn(&Word) -> Option<u32>,
    {
        ids.sort_unstable();
        let mut hits: Vec<Hit<'_>> = ids
            .into_iter()
            .map(|i| {
                let word = &self.words[i];
                Hit {
                    word,
                    distance: distance(word),
                    highlighted: is_highlighted(word, highlight),
                }
            })
            .collect();
        hits.sort_by_key(|hit| hit.distance.unwrap_or(u32::MAX));
        hits
    }
}

fn is_highlighted(word: &Word, highlight: Option<CategoryMask>) -> bool {
    highlight.map_or(false, |mask| word.category().intersects(mask))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn readings(hits: &[Hit<'_>]) -> Vec<String> {
        hits.iter().map(|h| h.word.reading().to_string()).collect()
    }

    fn sample() -> Lexicon {
        let mut b = Lexicon::builder();
        b.add_category(
            CategoryMask::NOUN,
            vec![
                ("カ", vec!["蚊"]),
                ("カク", vec!["角", "核"]),
                ("サク", vec!["柵"]),
                ("マク", vec!["幕"]),
                ("タマゴヤキ", vec!["卵焼き"]),
            ],
        );
        b.add(CategoryMask::VERB, "カク", ["書く"]);
        b.add(CategoryMask::NOUN, "カク", ["格"]);
        b.build()
    }

    #[test]
    fn builder_merges_forms_per_category() {
        let lx = sample();
        assert_eq!(lx.len(), 6);
        let kaku: Vec<&Word> = lx.words().iter().filter(|w| w.reading() == "カク").collect();
        assert_eq!(kaku.len(), 2);
        assert_eq!(kaku[0].category(), CategoryMask::NOUN);
        assert_eq!(kaku[0].forms(), &["核", "格", "角"]);
        assert_eq!(kaku[1].category(), CategoryMask::VERB);
    }

    #[test]
    fn builder_merges_width_and_whitespace_variants() {
        let mut b = Lexicon::builder();
        b.add(CategoryMask::NOUN, "カク", ["角"])
            .add(CategoryMask::NOUN, "ｶｸ", ["核"])
            .add(CategoryMask::NOUN, "カク ", ["格"]);
        assert_eq!(b.len(), 1);
        let lx = b.build();
        assert_eq!(lx.len(), 1);
        assert_eq!(lx.words()[0].reading(), "カク");
        assert_eq!(lx.words()[0].forms(), &["核", "格", "角"]);
        assert_eq!(readings(&lx.exact_match("かく", None).unwrap()), vec!["カク"]);
    }

    #[test]
    fn words_are_sorted_by_reading() {
        let lx = sample();
        let rs: Vec<&str> = lx.words().iter().map(Word::reading).collect();
        let mut sorted = rs.clone();
        sorted.sort();
        assert_eq!(rs, sorted);
    }

    #[test]
    fn exact_returns_same_length_only() {
        let lx = sample();
        let hits = lx.exact_match("カ", None).unwrap();
        assert_eq!(readings(&hits), vec!["カ"]);
        assert_eq!(hits[0].distance, Some(0));
    }

    #[test]
    fn exact_ranks_by_consonant_distance() {
        let lx = sample();
        let hits = lx.exact_match("カク", None).unwrap();
        // カク twice (noun, verb) at 0, then サク (k/s = 2), マク (k/m = 3)
        assert_eq!(readings(&hits), vec!["カク", "カク", "サク", "マク"]);
        let d: Vec<_> = hits.iter().map(|h| h.distance).collect();
        assert_eq!(d, vec![Some(0), Some(0), Some(2), Some(3)]);
    }

    #[test]
    fn prefix_excludes_exact_length() {
        let lx = sample();
        // ties keep reading order; タ (k/t = 1) ranks before サ and マ
        let expected = vec!["カク", "カク", "タマゴヤキ", "サク", "マク"];
        assert_eq!(readings(&lx.prefix_match("カ", None).unwrap()), expected);
        assert_eq!(readings(&lx.prefix_match("k", None).unwrap()), expected);
    }

    #[test]
    fn suffix_aligns_from_the_tail() {
        let lx = sample();
        let hits = lx.suffix_match("u", None).unwrap();
        assert_eq!(readings(&hits), vec!["カク", "カク", "サク", "マク"]);
        assert!(hits.iter().all(|h| h.distance == Some(0)));
        let hits = lx.suffix_match("ク", None).unwrap();
        assert!(hits.iter().all(|h| h.distance == Some(0)));
    }

    #[test]
    fn interior_skips_end_rhymes() {
        let lx = sample();
        let hits = lx.interior_match("マヤ", None).unwrap();
        assert_eq!(readings(&hits), vec!["タマゴヤキ"]);
        assert_eq!(hits[0].distance, None);
        assert!(lx.interior_match("ヤキ", None).unwrap().is_empty());
    }

    #[test]
    fn invalid_and_empty_queries() {
        let lx = sample();
        assert_eq!(
            lx.exact_match("ゃ", None),
            Err(QueryError::InvalidQuerySymbol { symbol: 'ゃ', position: 0 })
        );
        for kind in MatchKind::ALL {
            assert!(lx.match_mora(kind, &[], None).is_empty());
        }
        assert!(lx.prefix_match("  ", None).unwrap().is_empty());
    }

    #[test]
    fn highlight_marks_matching_categories() {
        let lx = sample();
        let hits = lx.exact_match("カク", Some(CategoryMask::VERB)).unwrap();
        let marked: Vec<_> = hits
            .iter()
            .filter(|h| h.highlighted)
            .map(|h| h.word.category())
            .collect();
        assert_eq!(marked, vec![CategoryMask::VERB]);
        assert!(lx.exact_match("カク", None).unwrap().iter().all(|h| !h.highlighted));
    }

    #[test]
    fn exclusion_drops_words_containing_a_mora() {
        let lx = sample();
        let mut hits = lx.prefix_match("カ", None).unwrap();
        Exclusion::parse("サ").unwrap().retain(&mut hits);
        assert_eq!(readings(&hits), vec!["カク", "カク", "タマゴヤキ", "マク"]);
        Exclusion::parse("o").unwrap().retain(&mut hits);
        assert_eq!(readings(&hits), vec!["カク", "カク", "マク"]);
        assert!(Exclusion::parse("").unwrap().is_empty());
        assert!(Exclusion::parse("x").is_err());
    }

    #[test]
    fn stress_survives_a_vowel_wildcard() {
        let lx = sample();
        let hits = lx.prefix_match("か'-", None).unwrap();
        assert_eq!(readings(&hits), vec!["カク", "カク", "タマゴヤキ", "サク", "マク"]);
        let d: Vec<_> = hits.iter().map(|h| h.distance).collect();
        assert_eq!(d, vec![Some(0), Some(0), Some(2), Some(4), Some(6)]);
    }

    #[test]
    fn extreme_stress_saturates_instead_of_overflowing() {
        use crate::mora::{Consonant, Vowel};
        let lx = sample();
        let ka = Mora::with_stress(Consonant::K, Vowel::A, u32::MAX);
        let hits = lx.exact_match_mora(&[ka], None);
        assert_eq!(readings(&hits), vec!["カ"]);
        assert_eq!(hits[0].distance, Some(0));

        let ma = Mora::with_stress(Consonant::M, Vowel::A, u32::MAX);
        let hits = lx.prefix_match_mora(&[ma, ma], None);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].word.reading(), "タマゴヤキ");
        assert_eq!(hits[0].distance, Some(u32::MAX));
    }

    #[test]
    fn lexicon_is_shareable_across_threads() {
        fn assert_sync<T: Send + Sync>() {}
        assert_sync::<Lexicon>();
    }
}
