//! Editing session: the current text and the actions a host wires to it.
//!
//! A [`Session`] owns the text being edited. Each edit replaces it,
//! recomputes the statistics, and renders them into whatever sinks the host
//! passes in. Copying goes through a [`ClipboardChain`] and leaves the
//! statistics alone.

use crate::clipboard::{ClipboardBackend, ClipboardChain, CopyOutcome};
use crate::metrics::{READING_WPM, TextStats};
use crate::render::{StatSinks, render};

/// Current text plus the reading rate used to derive its statistics.
#[derive(Debug, Clone)]
pub struct Session {
    text: String,
    wpm: u32,
    stats: TextStats,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(READING_WPM)
    }
}

impl Session {
    /// Start an empty session.
    pub fn new(wpm: u32) -> Self {
        Self {
            text: String::new(),
            wpm,
            stats: TextStats::default(),
        }
    }

    /// The current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Statistics of the current text as of the last edit.
    pub const fn stats(&self) -> TextStats {
        self.stats
    }

    /// Replace the text and re-render.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn edit(&mut self, text: impl Into<String>, sinks: &mut StatSinks<'_>) -> TextStats {
        self.text = text.into();
        tracing::trace!(text_len = self.text.len(), "text replaced");
        self.refresh(sinks)
    }

    /// Append one line of input as a single edit.
    ///
    /// Lines after the first are joined with `\n`.
    pub fn append_line(&mut self, line: &str, sinks: &mut StatSinks<'_>) -> TextStats {
        let mut text = std::mem::take(&mut self.text);
        if !text.is_empty() {
            text.push('\n');
        }
        text.push_str(line);
        self.edit(text, sinks)
    }

    /// Reset to empty text and re-render.
    pub fn clear(&mut self, sinks: &mut StatSinks<'_>) -> TextStats {
        tracing::debug!("clearing session text");
        self.edit(String::new(), sinks)
    }

    /// Send the current text to the clipboard.
    pub fn copy<P, F>(&self, chain: &mut ClipboardChain<P, F>) -> CopyOutcome
    where
        P: ClipboardBackend,
        F: ClipboardBackend,
    {
        chain.copy(&self.text)
    }

    fn refresh(&mut self, sinks: &mut StatSinks<'_>) -> TextStats {
        self.stats = TextStats::compute(&self.text, self.wpm);
        render(&self.stats, sinks);
        self.stats
    }
}
