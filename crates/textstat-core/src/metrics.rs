//! Text metrics: words, characters, sentences, paragraphs, and reading time.
//!
//! Every function here is pure and total. Any `&str` is valid input,
//! including the empty string, and the result is always a non-negative
//! integer. Nothing is cached between calls.

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Reading rate used for the reading-time estimate, in words per minute.
pub const READING_WPM: u32 = 225;

/// A run of sentence terminators counts as one boundary.
static TERMINATOR_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("valid regex"));

/// Paragraphs are separated by one or more newlines.
static NEWLINE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n+").expect("valid regex"));

/// The five statistics derived from one text value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TextStats {
    /// Number of whitespace-separated tokens.
    pub words: usize,
    /// Number of characters, whitespace included.
    pub characters: usize,
    /// Number of sentence terminator runs.
    pub sentences: usize,
    /// Number of non-blank newline-separated segments.
    pub paragraphs: usize,
    /// Estimated reading time in whole seconds.
    pub reading_time_seconds: u64,
}

impl TextStats {
    /// Compute all statistics at the default reading rate.
    pub fn from_text(text: &str) -> Self {
        Self::compute(text, READING_WPM)
    }

    /// Compute all statistics at the given reading rate.
    ///
    /// A rate of zero falls back to [`READING_WPM`].
    #[tracing::instrument(level = "trace", skip(text), fields(text_len = text.len()))]
    pub fn compute(text: &str, wpm: u32) -> Self {
        let words = word_count(text);
        Self {
            words,
            characters: character_count(text),
            sentences: sentence_count(text),
            paragraphs: paragraph_count(text),
            reading_time_seconds: reading_time_seconds_at(words, wpm),
        }
    }

    /// Reading time in its display form, e.g. `"60s"`.
    pub fn reading_time_display(&self) -> String {
        format_reading_time(self.reading_time_seconds)
    }
}

/// Whitespace as text editors and browsers treat it.
///
/// This is the ECMAScript `\s` class: ASCII whitespace, the Unicode space
/// separators, the line and paragraph separators, and the byte-order mark.
/// U+0085 (next line) is not whitespace here.
pub const fn is_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// Count whitespace-separated tokens.
///
/// Runs of mixed whitespace (spaces, tabs, newlines) collapse into a single
/// delimiter, so `"a  b\tc\nd"` has four words.
pub fn word_count(text: &str) -> usize {
    text.split(is_whitespace)
        .filter(|token| !token.is_empty())
        .count()
}

/// Count characters in the raw text, whitespace included.
pub fn character_count(text: &str) -> usize {
    text.chars().count()
}

/// Count maximal runs of `.`, `!` and `?`.
///
/// `"Wait..."` and `"What?!"` are one sentence each. Text without any
/// terminator has zero sentences, even when it is not empty.
pub fn sentence_count(text: &str) -> usize {
    TERMINATOR_RUN.find_iter(text).count()
}

/// Count newline-separated segments that are non-empty after trimming.
pub fn paragraph_count(text: &str) -> usize {
    NEWLINE_RUN
        .split(text)
        .filter(|segment| !segment.chars().all(is_whitespace))
        .count()
}

/// Estimated reading time in seconds at [`READING_WPM`].
pub fn reading_time_seconds(words: usize) -> u64 {
    reading_time_seconds_at(words, READING_WPM)
}

/// Estimated reading time in seconds at `wpm` words per minute.
///
/// Rounds half away from zero. Zero words is always zero seconds.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn reading_time_seconds_at(words: usize, wpm: u32) -> u64 {
    if words == 0 {
        return 0;
    }
    let wpm = if wpm == 0 { READING_WPM } else { wpm };
    let seconds = (words as f64 / f64::from(wpm)) * 60.0;
    seconds.round() as u64
}

/// Render a reading time the way the display shows it.
pub fn format_reading_time(seconds: u64) -> String {
    format!("{seconds}s")
}
