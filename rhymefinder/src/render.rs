//! Text and JSON output for [`Findings`].

use crate::finder::Findings;
use rhymefinder_core::{Hit, MatchKind, Mora};
use serde_json::{json, Value};
use std::fmt::Write;

/// Marker in front of hits from a highlighted category.
pub const HIGHLIGHT_MARK: char = '*';

fn mora_labels(mora: &[Mora]) -> Vec<String> {
    mora.iter().map(Mora::to_string).collect()
}

fn shown<'h, 'a>(hits: &'h [Hit<'a>], limit: Option<usize>) -> &'h [Hit<'a>] {
    match limit {
        Some(n) if n < hits.len() => &hits[..n],
        _ => hits,
    }
}

/// Plain text, one section per query kind:
///
/// ```text
/// query: かく (ka kM)
/// == rhyme (2) ==
/// * かく    書く、描く  0
///   さく    柵          2
/// ```
pub fn render_text(findings: &Findings<'_>, limit: Option<usize>, separator: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "query: {} ({})",
        findings.query,
        mora_labels(&findings.mora).join(" ")
    );
    for (kind, hits) in findings.iter() {
        let _ = writeln!(out, "== {} ({}) ==", kind, hits.len());
        if hits.is_empty() {
            out.push_str("  (no matches)\n");
            continue;
        }
        for hit in shown(hits, limit) {
            let mark = if hit.highlighted { HIGHLIGHT_MARK } else { ' ' };
            let _ = write!(
                out,
                "{mark} {}\t{}",
                hit.word.reading(),
                hit.word.forms().join(separator)
            );
            if let Some(distance) = hit.distance {
                let _ = write!(out, "\t{distance}");
            }
            out.push('\n');
        }
        let hidden = hits.len() - shown(hits, limit).len();
        if hidden > 0 {
            let _ = writeln!(out, "  ... {hidden} more");
        }
    }
    out
}

fn hit_json(hit: &Hit<'_>, separator: &str) -> Value {
    json!({
        "reading": hit.word.reading(),
        "forms": hit.word.forms().join(separator),
        "mora": mora_labels(hit.word.mora()),
        "category": hit.word.category().bits(),
        "categories": hit.word.category().names().collect::<Vec<_>>(),
        "distance": hit.distance,
        "highlighted": hit.highlighted,
    })
}

/// JSON object with the query, its morae and one array per query kind.
pub fn render_json(findings: &Findings<'_>, limit: Option<usize>, separator: &str) -> Value {
    let mut results = serde_json::Map::new();
    for (kind, hits) in findings.iter() {
        let list: Vec<Value> = shown(hits, limit)
            .iter()
            .map(|hit| hit_json(hit, separator))
            .collect();
        results.insert(kind_key(kind).to_string(), Value::Array(list));
    }
    json!({
        "query": findings.query,
        "mora": mora_labels(&findings.mora),
        "total": findings.total(),
        "results": results,
    })
}

fn kind_key(kind: MatchKind) -> &'static str {
    match kind {
        MatchKind::Exact => "exact",
        MatchKind::Prefix => "prefix",
        MatchKind::Suffix => "suffix",
        MatchKind::Interior => "interior",
    }
}
