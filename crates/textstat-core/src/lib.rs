//! Core library for textstat.
//!
//! Computes live text statistics (words, characters, sentences, paragraphs,
//! and reading time) and provides the pieces a host needs to show them.
//!
//! # Modules
//!
//! - [`metrics`] - Pure text-metric functions and [`TextStats`]
//! - [`render`] - Writing statistics into injected display sinks
//! - [`session`] - Current text plus edit, clear, and copy actions
//! - [`clipboard`] - Clipboard backends and the copy fallback chain
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use textstat_core::TextStats;
//!
//! let stats = TextStats::from_text("Hi! How are you? Fine.");
//! assert_eq!(stats.words, 5);
//! assert_eq!(stats.sentences, 3);
//! ```
#![deny(unsafe_code)]

pub mod clipboard;
pub mod config;
pub mod error;
pub mod metrics;
pub mod render;
pub mod session;

pub use clipboard::{ClipboardBackend, ClipboardChain, CopyOutcome};
pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use error::{ClipboardError, ConfigError, ConfigResult, InputError, InputResult};
pub use metrics::{READING_WPM, TextStats};
pub use render::{StatPanel, StatSink, StatSinks, render};
pub use session::Session;

/// Default maximum input size: 5 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;

/// Reject input larger than `limit` bytes.
///
/// `source_name` names the input in the error (a path, `stdin`, or a tool name).
pub fn check_input_size(source_name: &str, size: usize, limit: Option<usize>) -> InputResult<()> {
    match limit {
        Some(limit) if size > limit => Err(InputError::TooLarge {
            source_name: source_name.to_string(),
            size,
            limit,
        }),
        _ => Ok(()),
    }
}
