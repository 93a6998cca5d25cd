//! One-line rendering of retrieval hits for CLI and debug output.

use rag_store::RagHit;

use crate::cfg::{SOURCE_PLACEHOLDER, SOURCE_WIDTH};

/// Formats one hit as `"{rank:02}. [score {score:.3}]  {snippet}"`.
///
/// `rank` is 1-based. The snippet is the passage text on a single line,
/// shortened to [`SOURCE_WIDTH`] characters.
pub fn fmt_source(rank: usize, hit: &RagHit) -> String {
    let snippet = shorten(&hit.text.replace('\n', " "), SOURCE_WIDTH, SOURCE_PLACEHOLDER);
    format!("{rank:02}. [score {:.3}]  {snippet}", hit.score)
}

/// Formats every hit in order, ranks starting at 1.
pub fn fmt_sources(hits: &[RagHit]) -> Vec<String> {
    hits.iter()
        .enumerate()
        .map(|(i, h)| fmt_source(i + 1, h))
        .collect()
}

/// Collapses whitespace and, if the result is wider than `width` characters,
/// keeps as many whole words as fit together with `placeholder`.
///
/// When not even the first word fits, only the placeholder is returned.
pub fn shorten(text: &str, width: usize, placeholder: &str) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    let collapsed = words.join(" ");
    if collapsed.chars().count() <= width {
        return collapsed;
    }

    let budget = width.saturating_sub(placeholder.chars().count());
    let mut out = String::new();
    let mut len = 0usize;
    for w in words {
        let wlen = w.chars().count();
        let next = if out.is_empty() { wlen } else { len + 1 + wlen };
        if next > budget {
            break;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(w);
        len = next;
    }
    out.push_str(placeholder);
    out
}
