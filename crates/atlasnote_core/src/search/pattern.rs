//! Case-insensitive literal matcher shared by query and highlight.

use log::warn;
use regex::{Regex, RegexBuilder};

const PATTERN_SIZE_LIMIT: usize = 1 << 20;

/// Compiled search text.
///
/// User text is escaped before compilation, so regex metacharacters match
/// literally.
#[derive(Debug, Clone)]
pub struct SearchPattern {
    matcher: Matcher,
}

#[derive(Debug, Clone)]
enum Matcher {
    CaseInsensitive(Regex),
    /// Lowercased query chars, for queries too large to compile.
    Folded(Vec<char>),
}

impl SearchPattern {
    /// Compiles `query`. Returns `None` for an empty query, which means
    /// "no text restriction".
    pub fn new(query: &str) -> Option<Self> {
        if query.is_empty() {
            return None;
        }

        let matcher = match RegexBuilder::new(&regex::escape(query))
            .case_insensitive(true)
            .size_limit(PATTERN_SIZE_LIMIT)
            .build()
        {
            Ok(regex) => Matcher::CaseInsensitive(regex),
            Err(err) => {
                warn!(
                    "event=search_pattern module=search status=warn query_len={} fallback=folded error={}",
                    query.len(),
                    err
                );
                Matcher::Folded(query.chars().flat_map(char::to_lowercase).collect())
            }
        };

        Some(Self { matcher })
    }

    /// Whether `text` contains at least one match.
    pub fn is_match(&self, text: &str) -> bool {
        match &self.matcher {
            Matcher::CaseInsensitive(regex) => regex.is_match(text),
            Matcher::Folded(needle) => folded_find(text, needle, 0).is_some(),
        }
    }

    /// Byte ranges of non-overlapping matches, left to right.
    pub fn find_ranges(&self, text: &str) -> Vec<(usize, usize)> {
        match &self.matcher {
            Matcher::CaseInsensitive(regex) => regex
                .find_iter(text)
                .map(|found| (found.start(), found.end()))
                .collect(),
            Matcher::Folded(needle) => {
                let mut ranges = Vec::new();
                let mut from = 0;
                while let Some((start, end)) = folded_find(text, needle, from) {
                    ranges.push((start, end));
                    from = end;
                }
                ranges
            }
        }
    }
}

/// First match of the lowercased `needle` in `text` at or after byte `from`.
///
/// Matches start and end on whole source chars so the returned byte range
/// always slices `text` cleanly.
fn folded_find(text: &str, needle: &[char], from: usize) -> Option<(usize, usize)> {
    if needle.is_empty() {
        return None;
    }
    // (byte offset of the source char, folded char)
    let folded: Vec<(usize, char)> = text[from..]
        .char_indices()
        .flat_map(|(offset, ch)| ch.to_lowercase().map(move |low| (from + offset, low)))
        .collect();
    let starts_char = |index: usize| index == 0 || folded[index - 1].0 != folded[index].0;

    (0..folded.len())
        .filter(|&index| starts_char(index))
        .find_map(|index| {
            let end = index + needle.len();
            if end > folded.len() || (end < folded.len() && !starts_char(end)) {
                return None;
            }
            let matches = folded[index..end]
                .iter()
                .zip(needle)
                .all(|((_, low), expected)| low == expected);
            matches.then(|| {
                let end_byte = folded.get(end).map_or(text.len(), |(offset, _)| *offset);
                (folded[index].0, end_byte)
            })
        })
}
