//! Live command: an interactive editing session over stdin.
//!
//! Each input line is an edit that appends to the text; the statistics are
//! re-rendered after every edit. Lines starting with `:` are actions.

use std::io::{BufRead, IsTerminal, Write};

use clap::Args;
use textstat_core::{ClipboardBackend, ClipboardChain, CopyOutcome, Session, StatPanel, TextStats};
use tracing::{debug, instrument, warn};

use crate::system_clipboard::session_chain;

const HELP: &str = "Type text; every line updates the counts. Actions: :clear, :copy, :quit";

/// Arguments for the `live` subcommand.
#[derive(Args, Debug, Default)]
pub struct LiveArgs {
    /// Reading rate in words per minute (overrides config).
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub wpm: Option<u32>,
}

/// One parsed line of live input.
#[derive(Debug, PartialEq, Eq)]
enum Event<'a> {
    Text(&'a str),
    Clear,
    Copy,
    Quit,
}

impl<'a> Event<'a> {
    fn parse(line: &'a str) -> Self {
        match line.trim_end() {
            ":clear" => Self::Clear,
            ":copy" => Self::Copy,
            ":quit" | ":q" => Self::Quit,
            _ => Self::Text(line),
        }
    }
}

/// Run an interactive session on stdin/stdout.
#[instrument(name = "cmd_live", skip_all)]
pub fn cmd_live(
    args: LiveArgs,
    global_json: bool,
    config_wpm: u32,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    let wpm = args.wpm.unwrap_or(config_wpm);
    debug!(wpm, json_output = global_json, "executing live command");

    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        eprintln!("{HELP}");
    }

    let mut session = Session::new(wpm);
    let mut chain = session_chain();
    run_live(
        stdin.lock(),
        &mut std::io::stdout().lock(),
        &mut std::io::stderr().lock(),
        &mut session,
        &mut chain,
        LiveOptions {
            json: global_json,
            max_input_bytes,
        },
    )
}

/// Output and limit settings for [`run_live`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LiveOptions {
    /// Emit one JSON object per update instead of a text line.
    pub json: bool,
    /// Stop accepting text once the session would exceed this many bytes.
    pub max_input_bytes: Option<usize>,
}

/// Drive a session from `input` until EOF or `:quit`.
///
/// Statistics go to `out`; notices (copy failures, rejected input) go to `notices`.
pub fn run_live<R, W, N, P, F>(
    input: R,
    out: &mut W,
    notices: &mut N,
    session: &mut Session,
    chain: &mut ClipboardChain<P, F>,
    options: LiveOptions,
) -> anyhow::Result<()>
where
    R: BufRead,
    W: Write,
    N: Write,
    P: ClipboardBackend,
    F: ClipboardBackend,
{
    let mut panel = StatPanel::default();
    let stats = session.clear(&mut panel.sinks());
    write_update(out, &panel, &stats, options.json)?;

    for line in input.lines() {
        let line = line?;
        match Event::parse(&line) {
            Event::Quit => break,
            Event::Clear => {
                let stats = session.clear(&mut panel.sinks());
                write_update(out, &panel, &stats, options.json)?;
            }
            Event::Copy => match session.copy(chain) {
                CopyOutcome::Success => writeln!(notices, "copied")?,
                CopyOutcome::FallbackSuccess => {
                    writeln!(notices, "copied (via fallback clipboard)")?;
                }
                CopyOutcome::Failed(reason) => {
                    warn!(%reason, "copy failed");
                    writeln!(notices, "unable to copy to clipboard: {reason}")?;
                }
            },
            Event::Text(text) => {
                let separator = usize::from(!session.text().is_empty());
                let next_len = session.text().len() + separator + text.len();
                if let Some(limit) = options.max_input_bytes
                    && next_len > limit
                {
                    writeln!(notices, "input limit of {limit} bytes reached; line ignored")?;
                    continue;
                }
                let stats = session.append_line(text, &mut panel.sinks());
                write_update(out, &panel, &stats, options.json)?;
            }
        }
    }

    out.flush()?;
    Ok(())
}

fn write_update<W: Write>(
    out: &mut W,
    panel: &StatPanel,
    stats: &TextStats,
    json: bool,
) -> anyhow::Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string(stats)?)?;
    } else {
        let line = panel
            .rows()
            .iter()
            .map(|(label, value)| format!("{}: {value}", label.to_lowercase()))
            .collect::<Vec<_>>()
            .join(" | ");
        writeln!(out, "{line}")?;
    }
    Ok(())
}
