//! Terminal rendering for notes and stats.
//!
//! Note text is untrusted: control characters are escaped before anything
//! reaches the terminal, and only the highlight markers emit escapes.

use atlasnote_core::{format_relative_age, find_highlights, HighlightMarker, Note, NoteStats};
use chrono::{DateTime, Local};
use std::fmt::Write;

const ANSI_MARKER: HighlightMarker<'static> = HighlightMarker {
    open: "\x1b[1;33m",
    close: "\x1b[0m",
};

const PLAIN_MARKER: HighlightMarker<'static> = HighlightMarker {
    open: "[",
    close: "]",
};

pub fn marker(color: bool) -> HighlightMarker<'static> {
    if color {
        ANSI_MARKER
    } else {
        PLAIN_MARKER
    }
}

pub fn note_block(
    note: &Note,
    search: &str,
    now: &DateTime<Local>,
    marker: HighlightMarker<'_>,
) -> String {
    let mut out = String::new();
    let pin = if note.is_pinned { " (pinned)" } else { "" };
    let _ = writeln!(
        out,
        "{}{pin}  [{}]",
        marked(&note.title, search, marker, false),
        note.category
    );
    let _ = writeln!(out, "  id: {}", note.id);
    for line in marked(&note.content, search, marker, true).lines() {
        let _ = writeln!(out, "  | {line}");
    }
    let created = note.created_at.with_timezone(&Local);
    let _ = write!(out, "  Created: {}", format_relative_age(&created, now));
    if note.is_edited() {
        let updated = note.updated_at.with_timezone(&Local);
        let _ = write!(out, "  Updated: {}", format_relative_age(&updated, now));
    }
    out.push('\n');
    out
}

/// Escapes `text` and wraps each match of `search` in `marker`.
fn marked(text: &str, search: &str, marker: HighlightMarker<'_>, keep_newlines: bool) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for span in find_highlights(text, search) {
        push_escaped(&mut out, &text[cursor..span.start], keep_newlines);
        out.push_str(marker.open);
        push_escaped(&mut out, &text[span.start..span.end], keep_newlines);
        out.push_str(marker.close);
        cursor = span.end;
    }
    push_escaped(&mut out, &text[cursor..], keep_newlines);
    out
}

fn push_escaped(out: &mut String, segment: &str, keep_newlines: bool) {
    for ch in segment.chars() {
        if ch == '\t' || (keep_newlines && ch == '\n') || !ch.is_control() {
            out.push(ch);
        } else {
            out.extend(ch.escape_default());
        }
    }
}

pub fn stats_block(stats: &NoteStats) -> String {
    let mut out = format!("Total: {}\nPinned: {}\n", stats.total, stats.pinned);
    for (category, count) in &stats.per_category {
        let _ = writeln!(out, "{category}: {count}");
    }
    out
}
