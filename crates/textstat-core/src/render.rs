//! Rendering statistics into injected display sinks.
//!
//! The host owns its display surfaces and hands them to [`render`] on every
//! edit; nothing here keeps a reference to them between calls.

use serde::Serialize;

use crate::metrics::TextStats;

/// A single display surface that shows one value.
pub trait StatSink {
    /// Replace the displayed value.
    fn set_text(&mut self, value: &str);
}

impl StatSink for String {
    fn set_text(&mut self, value: &str) {
        self.clear();
        self.push_str(value);
    }
}

/// The five sinks a host provides, one per statistic.
pub struct StatSinks<'a> {
    /// Shows the word count.
    pub words: &'a mut dyn StatSink,
    /// Shows the character count.
    pub characters: &'a mut dyn StatSink,
    /// Shows the sentence count.
    pub sentences: &'a mut dyn StatSink,
    /// Shows the paragraph count.
    pub paragraphs: &'a mut dyn StatSink,
    /// Shows the reading time, e.g. `"60s"`.
    pub reading_time: &'a mut dyn StatSink,
}

/// Write each statistic into its sink.
pub fn render(stats: &TextStats, sinks: &mut StatSinks<'_>) {
    sinks.words.set_text(&stats.words.to_string());
    sinks.characters.set_text(&stats.characters.to_string());
    sinks.sentences.set_text(&stats.sentences.to_string());
    sinks.paragraphs.set_text(&stats.paragraphs.to_string());
    sinks.reading_time.set_text(&stats.reading_time_display());
}

/// An in-memory set of sinks, one string per statistic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatPanel {
    /// Rendered word count.
    pub words: String,
    /// Rendered character count.
    pub characters: String,
    /// Rendered sentence count.
    pub sentences: String,
    /// Rendered paragraph count.
    pub paragraphs: String,
    /// Rendered reading time.
    pub reading_time: String,
}

impl StatPanel {
    /// Borrow every field as a sink.
    pub fn sinks(&mut self) -> StatSinks<'_> {
        StatSinks {
            words: &mut self.words,
            characters: &mut self.characters,
            sentences: &mut self.sentences,
            paragraphs: &mut self.paragraphs,
            reading_time: &mut self.reading_time,
        }
    }

    /// Render `stats` into this panel.
    pub fn show(&mut self, stats: &TextStats) {
        render(stats, &mut self.sinks());
    }

    /// Label/value pairs in display order.
    pub fn rows(&self) -> [(&'static str, &str); 5] {
        [
            ("Words", self.words.as_str()),
            ("Characters", self.characters.as_str()),
            ("Sentences", self.sentences.as_str()),
            ("Paragraphs", self.paragraphs.as_str()),
            ("Reading time", self.reading_time.as_str()),
        ]
    }
}
