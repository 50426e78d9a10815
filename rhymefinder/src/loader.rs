//! Category dictionary loading.
//!
//! Each category is a plain text file named after its entry in
//! [`CATEGORY_NAMES`]. One entry per line: `reading form`, separated by
//! whitespace. Repeated readings collect all of their forms.

use ahash::AHashMap;
use anyhow::{bail, Context, Result};
use rhymefinder_core::{CategoryMask, Lexicon, LexiconBuilder, CATEGORY_NAMES};
use std::path::{Path, PathBuf};

/// Decode one category source into reading → forms. Malformed lines are
/// skipped with a warning naming `origin` and the 1-based line number.
pub fn parse_category_source(text: &str, origin: &str) -> AHashMap<String, Vec<String>> {
    let mut entries: AHashMap<String, Vec<String>> = AHashMap::new();
    for (ln, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        let [reading, form] = fields[..] else {
            tracing::warn!(
                file = origin,
                line = ln + 1,
                content = line,
                "malformed dictionary line"
            );
            continue;
        };
        entries
            .entry(reading.to_string())
            .or_default()
            .push(form.to_string());
    }
    entries
}

/// Path of the source file for one category.
pub fn category_path(dir: &Path, name: &str, extension: &str) -> PathBuf {
    dir.join(format!("{name}{extension}"))
}

/// Read every category file under `dir` into `builder`. Returns the number
/// of category files that were read.
pub fn load_categories(
    builder: &mut LexiconBuilder,
    dir: &Path,
    extension: &str,
) -> Result<usize> {
    if !dir.is_dir() {
        bail!("dictionary directory {} does not exist", dir.display());
    }
    let mut loaded = 0;
    for (bit, name) in CATEGORY_NAMES.iter().enumerate() {
        let Some(category) = CategoryMask::single(bit) else {
            continue;
        };
        let path = category_path(dir, name, extension);
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(
                    file = %path.display(),
                    error = %err,
                    "could not open dictionary file"
                );
                continue;
            }
        };
        let entries = parse_category_source(&text, &path.display().to_string());
        tracing::debug!(category = *name, readings = entries.len(), "loaded category");
        builder.add_category(category, entries);
        loaded += 1;
    }
    Ok(loaded)
}

/// Build a lexicon from the category files under `dir`.
pub fn load_dictionary(dir: &Path, extension: &str) -> Result<Lexicon> {
    let mut builder = Lexicon::builder();
    let loaded = load_categories(&mut builder, dir, extension)
        .with_context(|| format!("load dictionary from {}", dir.display()))?;
    let lexicon = builder.build();
    tracing::info!(categories = loaded, words = lexicon.len(), "dictionary ready");
    Ok(lexicon)
}
