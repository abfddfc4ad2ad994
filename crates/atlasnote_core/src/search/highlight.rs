//! Match-span highlighting for search results.
//!
//! Core returns spans over the original text instead of markup; callers
//! decide how to escape and decorate. [`highlight`] is a plain-text
//! convenience for callers that only need marker splicing.

use crate::search::SearchPattern;

/// Byte range `[start, end)` of one match within the source text.
///
/// Both offsets fall on `char` boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightSpan {
    pub start: usize,
    pub end: usize,
}

/// Marker pair spliced around each match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightMarker<'a> {
    pub open: &'a str,
    pub close: &'a str,
}

impl Default for HighlightMarker<'_> {
    fn default() -> Self {
        Self {
            open: "[",
            close: "]",
        }
    }
}

/// Finds every case-insensitive occurrence of `query` in `text`, left to
/// right. Matches do not overlap: scanning resumes after each match.
///
/// Returns an empty list for an empty query.
pub fn find_highlights(text: &str, query: &str) -> Vec<HighlightSpan> {
    let Some(pattern) = SearchPattern::new(query) else {
        return Vec::new();
    };

    pattern
        .find_ranges(text)
        .into_iter()
        .map(|(start, end)| HighlightSpan { start, end })
        .collect()
}

/// Wraps each match of `query` in `text` with the default `[`/`]` marker.
pub fn highlight(text: &str, query: &str) -> String {
    highlight_with(text, query, HighlightMarker::default())
}

/// Wraps each match of `query` in `text` with `marker`.
///
/// The original casing of matched text is preserved.
pub fn highlight_with(text: &str, query: &str, marker: HighlightMarker<'_>) -> String {
    let spans = find_highlights(text, query);
    if spans.is_empty() {
        return text.to_string();
    }

    let extra = spans.len() * (marker.open.len() + marker.close.len());
    let mut out = String::with_capacity(text.len() + extra);
    let mut cursor = 0;
    for span in spans {
        out.push_str(&text[cursor..span.start]);
        out.push_str(marker.open);
        out.push_str(&text[span.start..span.end]);
        out.push_str(marker.close);
        cursor = span.end;
    }
    out.push_str(&text[cursor..]);
    out
}
