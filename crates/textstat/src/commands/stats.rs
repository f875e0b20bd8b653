//! Stats command: the five text statistics for a file or stdin.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use textstat_core::{StatPanel, TextStats};
use tracing::{debug, instrument};

use super::read_input;

/// Arguments for the `stats` subcommand.
#[derive(Args, Debug, Default)]
pub struct StatsArgs {
    /// File to analyze (`-` or omitted reads stdin).
    pub file: Option<Utf8PathBuf>,

    /// Reading rate in words per minute (overrides config).
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub wpm: Option<u32>,
}

/// Compute and print statistics for the input text.
#[instrument(name = "cmd_stats", skip_all, fields(file = ?args.file))]
pub fn cmd_stats(
    args: StatsArgs,
    global_json: bool,
    config_wpm: u32,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    let wpm = args.wpm.unwrap_or(config_wpm);
    debug!(wpm, json_output = global_json, "executing stats command");

    let text = read_input(args.file.as_deref(), max_input_bytes)?;
    let stats = TextStats::compute(&text, wpm);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        let mut panel = StatPanel::default();
        panel.show(&stats);
        print_panel(&panel);
    }

    Ok(())
}

/// Print a rendered panel as aligned label/value rows.
pub fn print_panel(panel: &StatPanel) {
    for (label, value) in panel.rows() {
        println!("{:>12}  {}", label.dimmed(), value.bold());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_from_file_succeeds() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "One two. Three!").unwrap();
        let args = StatsArgs {
            file: Some(Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap()),
            wpm: None,
        };
        assert!(cmd_stats(args, true, 225, None).is_ok());
    }

    #[test]
    fn stats_rejects_oversized_file() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "far too long for the limit").unwrap();
        let args = StatsArgs {
            file: Some(Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap()),
            wpm: None,
        };
        assert!(cmd_stats(args, false, 225, Some(4)).is_err());
    }
}
