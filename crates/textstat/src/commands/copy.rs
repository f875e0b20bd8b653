//! Copy command: send text to the system clipboard.

use std::io::Write;

use anyhow::bail;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use textstat_core::{ClipboardBackend, ClipboardChain, CopyOutcome};
use tracing::{debug, instrument};

use super::read_input;
use crate::system_clipboard::oneshot_chain;

/// Arguments for the `copy` subcommand.
#[derive(Args, Debug, Default)]
pub struct CopyArgs {
    /// File to copy (`-` or omitted reads stdin).
    pub file: Option<Utf8PathBuf>,
}

/// Copy the input text, falling back to a second clipboard backend if needed.
#[instrument(name = "cmd_copy", skip_all, fields(file = ?args.file))]
pub fn cmd_copy(
    args: CopyArgs,
    global_json: bool,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    let text = read_input(args.file.as_deref(), max_input_bytes)?;
    debug!(text_len = text.len(), "executing copy command");

    run_copy(
        &text,
        &mut oneshot_chain(),
        global_json,
        &mut std::io::stdout().lock(),
    )
}

/// Copy `text` through `chain` and report the outcome to `out`.
///
/// A failed copy is returned as an error after any JSON output is written.
pub fn run_copy<W, P, F>(
    text: &str,
    chain: &mut ClipboardChain<P, F>,
    json: bool,
    out: &mut W,
) -> anyhow::Result<()>
where
    W: Write,
    P: ClipboardBackend,
    F: ClipboardBackend,
{
    let outcome = chain.copy(text);

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&outcome)?)?;
    }

    match outcome {
        CopyOutcome::Success | CopyOutcome::FallbackSuccess if json => Ok(()),
        CopyOutcome::Success => {
            writeln!(out, "{} {} characters", "Copied".green(), text.chars().count())?;
            Ok(())
        }
        CopyOutcome::FallbackSuccess => {
            writeln!(
                out,
                "{} {} characters {}",
                "Copied".green(),
                text.chars().count(),
                "(via fallback clipboard)".dimmed()
            )?;
            Ok(())
        }
        CopyOutcome::Failed(reason) => bail!("unable to copy to clipboard: {reason}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use textstat_core::clipboard::{MemoryClipboard, UnavailableClipboard};

    fn copy_with<P, F>(chain: &mut ClipboardChain<P, F>, json: bool) -> (anyhow::Result<()>, String)
    where
        P: ClipboardBackend,
        F: ClipboardBackend,
    {
        let mut out = Vec::new();
        let result = run_copy("héllo", chain, json, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn primary_success_reports_character_count() {
        let mut chain = ClipboardChain::new(MemoryClipboard::default(), MemoryClipboard::default());
        let (result, out) = copy_with(&mut chain, false);

        assert!(result.is_ok());
        assert!(out.contains("Copied"));
        assert!(out.contains("5 characters"));
        assert!(!out.contains("fallback"));
        assert_eq!(chain.primary().contents(), Some("héllo"));
    }

    #[test]
    fn fallback_success_is_noted() {
        let mut chain = ClipboardChain::new(
            UnavailableClipboard::new("no display"),
            MemoryClipboard::default(),
        );
        let (result, out) = copy_with(&mut chain, false);

        assert!(result.is_ok());
        assert!(out.contains("via fallback clipboard"));
        assert_eq!(chain.fallback().contents(), Some("héllo"));
    }

    #[test]
    fn failure_is_an_error_naming_both_backends() {
        let mut chain = ClipboardChain::new(
            UnavailableClipboard::new("no display"),
            UnavailableClipboard::new("no program"),
        );
        let (result, out) = copy_with(&mut chain, false);

        let err = result.unwrap_err().to_string();
        assert!(err.starts_with("unable to copy to clipboard:"));
        assert!(err.contains("no display"));
        assert!(err.contains("no program"));
        assert!(out.is_empty());
    }

    #[test]
    fn json_success_prints_only_the_outcome() {
        let mut chain = ClipboardChain::new(
            UnavailableClipboard::new("no display"),
            MemoryClipboard::default(),
        );
        let (result, out) = copy_with(&mut chain, true);

        assert!(result.is_ok());
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["outcome"], "fallback_success");
    }

    #[test]
    fn json_failure_prints_outcome_then_errors() {
        let mut chain = ClipboardChain::new(
            UnavailableClipboard::new("no display"),
            UnavailableClipboard::new("no program"),
        );
        let (result, out) = copy_with(&mut chain, true);

        assert!(result.is_err());
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["outcome"], "failed");
        assert!(json["reason"].as_str().unwrap().contains("no program"));
    }
}
