//! Clipboard copy with a single fallback attempt.
//!
//! A [`ClipboardChain`] tries its primary backend, then its fallback backend
//! once, and reports which of them succeeded as a [`CopyOutcome`]. Hosts
//! match on the outcome to decide what to tell the user.

use serde::Serialize;

use crate::error::ClipboardError;

/// Something that can place text on a clipboard.
pub trait ClipboardBackend {
    /// Short name used in logs and failure messages.
    fn name(&self) -> &str;

    /// Replace the clipboard contents with `text`.
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Result of a copy through a [`ClipboardChain`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum CopyOutcome {
    /// The primary backend accepted the text.
    Success,
    /// The primary backend failed and the fallback accepted the text.
    FallbackSuccess,
    /// Both backends failed.
    Failed(String),
}

impl CopyOutcome {
    /// Whether the text reached the clipboard.
    pub const fn is_copied(&self) -> bool {
        matches!(self, Self::Success | Self::FallbackSuccess)
    }
}

/// A primary clipboard backend with one fallback.
pub struct ClipboardChain<P, F> {
    primary: P,
    fallback: F,
}

impl<P: ClipboardBackend, F: ClipboardBackend> ClipboardChain<P, F> {
    /// Build a chain from a primary and a fallback backend.
    pub const fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }

    /// The backend tried first.
    pub const fn primary(&self) -> &P {
        &self.primary
    }

    /// The backend tried when the primary fails.
    pub const fn fallback(&self) -> &F {
        &self.fallback
    }

    /// Copy `text`, trying the fallback at most once.
    #[tracing::instrument(skip_all, fields(text_len = text.len(), primary = self.primary.name()))]
    pub fn copy(&mut self, text: &str) -> CopyOutcome {
        let primary_err = match self.primary.set_text(text) {
            Ok(()) => {
                tracing::debug!("copied with primary clipboard backend");
                return CopyOutcome::Success;
            }
            Err(e) => e,
        };
        tracing::warn!(error = %primary_err, fallback = self.fallback.name(), "primary clipboard backend failed");

        match self.fallback.set_text(text) {
            Ok(()) => {
                tracing::debug!("copied with fallback clipboard backend");
                CopyOutcome::FallbackSuccess
            }
            Err(fallback_err) => {
                tracing::warn!(error = %fallback_err, "fallback clipboard backend failed");
                CopyOutcome::Failed(format!("{primary_err}; {fallback_err}"))
            }
        }
    }
}

/// A backend that keeps the copied text in memory.
///
/// Useful for hosts without a system clipboard and for tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    /// Text most recently copied, if any.
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl ClipboardBackend for MemoryClipboard {
    fn name(&self) -> &str {
        "memory"
    }

    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// A backend that never works.
#[derive(Debug, Clone)]
pub struct UnavailableClipboard {
    reason: String,
}

impl UnavailableClipboard {
    /// Create a backend that always fails with `reason`.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl ClipboardBackend for UnavailableClipboard {
    fn name(&self) -> &str {
        "unavailable"
    }

    fn set_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable(self.reason.clone()))
    }
}

impl<B: ClipboardBackend + ?Sized> ClipboardBackend for Box<B> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        (**self).set_text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fails the first `failures` calls, then succeeds.
    struct FlakyClipboard {
        failures: usize,
        calls: usize,
    }

    impl ClipboardBackend for FlakyClipboard {
        fn name(&self) -> &str {
            "flaky"
        }

        fn set_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
            self.calls += 1;
            if self.calls <= self.failures {
                Err(ClipboardError::Backend {
                    backend: "flaky".to_string(),
                    message: "busy".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn primary_success() {
        let mut chain = ClipboardChain::new(MemoryClipboard::default(), MemoryClipboard::default());
        assert_eq!(chain.copy("hello"), CopyOutcome::Success);
        assert_eq!(chain.primary.contents(), Some("hello"));
        assert_eq!(chain.fallback.contents(), None);
    }

    #[test]
    fn fallback_success() {
        let mut chain = ClipboardChain::new(
            UnavailableClipboard::new("no display"),
            MemoryClipboard::default(),
        );
        assert_eq!(chain.copy("hello"), CopyOutcome::FallbackSuccess);
        assert_eq!(chain.fallback.contents(), Some("hello"));
    }

    #[test]
    fn both_fail_reports_both_reasons() {
        let mut chain = ClipboardChain::new(
            UnavailableClipboard::new("no display"),
            UnavailableClipboard::new("no command"),
        );
        let outcome = chain.copy("hello");
        let CopyOutcome::Failed(reason) = &outcome else {
            panic!("expected failure, got {outcome:?}");
        };
        assert!(reason.contains("no display"));
        assert!(reason.contains("no command"));
        assert!(!outcome.is_copied());
    }

    #[test]
    fn fallback_is_tried_only_once() {
        let mut chain = ClipboardChain::new(
            UnavailableClipboard::new("no display"),
            FlakyClipboard {
                failures: 1,
                calls: 0,
            },
        );
        assert!(matches!(chain.copy("x"), CopyOutcome::Failed(_)));
        assert_eq!(chain.fallback.calls, 1);
        // The next copy is a fresh attempt and the fallback has recovered.
        assert_eq!(chain.copy("x"), CopyOutcome::FallbackSuccess);
        assert_eq!(chain.fallback.calls, 2);
    }

    #[test]
    fn empty_text_is_copied() {
        let mut chain = ClipboardChain::new(MemoryClipboard::default(), MemoryClipboard::default());
        assert_eq!(chain.copy(""), CopyOutcome::Success);
        assert_eq!(chain.primary.contents(), Some(""));
    }

    #[test]
    fn boxed_backends_work_in_a_chain() {
        let primary: Box<dyn ClipboardBackend> = Box::new(UnavailableClipboard::new("nope"));
        let fallback: Box<dyn ClipboardBackend> = Box::new(MemoryClipboard::default());
        let mut chain = ClipboardChain::new(primary, fallback);
        assert_eq!(chain.copy("boxed"), CopyOutcome::FallbackSuccess);
    }

    #[test]
    fn outcome_serializes_with_tag() {
        let json = serde_json::to_value(CopyOutcome::Failed("both failed".into())).unwrap();
        assert_eq!(json["outcome"], "failed");
        assert_eq!(json["reason"], "both failed");
        let json = serde_json::to_value(CopyOutcome::FallbackSuccess).unwrap();
        assert_eq!(json["outcome"], "fallback_success");
    }
}
