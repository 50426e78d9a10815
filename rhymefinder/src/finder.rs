//! Runs the four rhyme queries for one input.

use anyhow::Context;
use rhymefinder_core::{
    kana, CategoryMask, Config, Exclusion, Hit, Lexicon, MatchKind, Mora, QueryError,
};
use std::sync::mpsc;

/// A loaded lexicon plus the display filters applied to every query.
#[derive(Debug)]
pub struct RhymeFinder {
    lexicon: Lexicon,
    highlight: Option<CategoryMask>,
    exclusion: Exclusion,
}

impl RhymeFinder {
    pub fn new(lexicon: Lexicon) -> Self {
        Self {
            lexicon,
            highlight: None,
            exclusion: Exclusion::default(),
        }
    }

    /// Build a finder whose highlight and exclusion come from `config`.
    pub fn from_config(lexicon: Lexicon, config: &Config) -> anyhow::Result<Self> {
        let highlight = config
            .highlight_mask()
            .context("invalid highlight setting")?;
        let exclusion = config
            .exclusion()
            .with_context(|| format!("invalid exclude pattern '{}'", config.exclude))?;
        Ok(Self {
            lexicon,
            highlight,
            exclusion,
        })
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn highlight(&self) -> Option<CategoryMask> {
        self.highlight
    }

    pub fn set_highlight(&mut self, highlight: Option<CategoryMask>) {
        self.highlight = highlight;
    }

    pub fn exclusion(&self) -> &Exclusion {
        &self.exclusion
    }

    pub fn set_exclusion(&mut self, exclusion: Exclusion) {
        self.exclusion = exclusion;
    }

    /// Tokenize `query` once, run every query kind on its own scoped thread
    /// and hand each filtered result set to `sink` as soon as it is ready.
    /// Sets arrive in completion order. Returns the query's morae.
    pub fn find_each<'a, F>(&'a self, query: &str, mut sink: F) -> Result<Vec<Mora>, QueryError>
    where
        F: FnMut(MatchKind, Vec<Hit<'a>>),
    {
        let mora = kana::tokenize_query(query)?;
        if mora.is_empty() {
            return Ok(mora);
        }
        tracing::debug!(query, morae = mora.len(), "running rhyme queries");

        let lexicon = &self.lexicon;
        let exclusion = &self.exclusion;
        let highlight = self.highlight;
        let query_mora = mora.as_slice();
        std::thread::scope(|scope| {
            let (tx, rx) = mpsc::channel();
            for kind in MatchKind::ALL {
                let tx = tx.clone();
                scope.spawn(move || {
                    let mut hits = lexicon.match_mora(kind, query_mora, highlight);
                    exclusion.retain(&mut hits);
                    // the receiver is drained below, so send cannot fail
                    let _ = tx.send((kind, hits));
                });
            }
            drop(tx);
            for (kind, hits) in rx {
                sink(kind, hits);
            }
        });
        Ok(mora)
    }

    /// Run every query kind and collect the results.
    pub fn find(&self, query: &str) -> Result<Findings<'_>, QueryError> {
        let mut findings = Findings {
            query: query.trim().to_string(),
            ..Findings::default()
        };
        let mora = self.find_each(query, |kind, hits| *findings.get_mut(kind) = hits)?;
        findings.mora = mora;
        Ok(findings)
    }
}

/// Results of one [`RhymeFinder::find`] call.
#[derive(Debug, Default)]
pub struct Findings<'a> {
    pub query: String,
    pub mora: Vec<Mora>,
    pub exact: Vec<Hit<'a>>,
    pub prefix: Vec<Hit<'a>>,
    pub suffix: Vec<Hit<'a>>,
    pub interior: Vec<Hit<'a>>,
}

impl<'a> Findings<'a> {
    pub fn get(&self, kind: MatchKind) -> &[Hit<'a>] {
        match kind {
            MatchKind::Exact => &self.exact,
            MatchKind::Prefix => &self.prefix,
            MatchKind::Suffix => &self.suffix,
            MatchKind::Interior => &self.interior,
        }
    }

    fn get_mut(&mut self, kind: MatchKind) -> &mut Vec<Hit<'a>> {
        match kind {
            MatchKind::Exact => &mut self.exact,
            MatchKind::Prefix => &mut self.prefix,
            MatchKind::Suffix => &mut self.suffix,
            MatchKind::Interior => &mut self.interior,
        }
    }

    /// Result lists in display order.
    pub fn iter(&self) -> impl Iterator<Item = (MatchKind, &[Hit<'a>])> + '_ {
        MatchKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }

    pub fn total(&self) -> usize {
        self.iter().map(|(_, hits)| hits.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
