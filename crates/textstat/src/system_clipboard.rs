//! Clipboard backends for the host system.
//!
//! The primary backend talks to the OS clipboard through `arboard`. The
//! fallback pipes the text into a platform clipboard program (`pbcopy`,
//! `clip`, `wl-copy`, `xclip`, or `xsel`).

use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};

use textstat_core::{ClipboardBackend, ClipboardChain, ClipboardError};

/// A clipboard chain over boxed backends.
pub type SystemChain = ClipboardChain<Box<dyn ClipboardBackend>, Box<dyn ClipboardBackend>>;

/// Chain for a long-running session: system clipboard, then a clipboard program.
///
/// The system clipboard handle is kept for the life of the chain, so copied
/// text stays available while the session runs.
pub fn session_chain() -> SystemChain {
    ClipboardChain::new(
        system_backend(false),
        Box::new(CommandClipboard::for_platform()),
    )
}

/// Chain for a copy that must outlive the process.
///
/// On Linux the X11 and Wayland clipboards belong to a running process. The
/// clipboard programs fork to keep serving the text, so they go first; the
/// system backend then blocks until another program takes the selection.
pub fn oneshot_chain() -> SystemChain {
    if cfg!(target_os = "linux") {
        ClipboardChain::new(
            Box::new(CommandClipboard::for_platform()),
            system_backend(true),
        )
    } else {
        session_chain()
    }
}

#[cfg(feature = "clipboard")]
fn system_backend(hold_until_replaced: bool) -> Box<dyn ClipboardBackend> {
    Box::new(ArboardClipboard {
        clipboard: None,
        hold_until_replaced,
    })
}

#[cfg(not(feature = "clipboard"))]
fn system_backend(_hold_until_replaced: bool) -> Box<dyn ClipboardBackend> {
    Box::new(textstat_core::clipboard::UnavailableClipboard::new(
        "built without the `clipboard` feature",
    ))
}

/// The OS clipboard via `arboard`.
#[cfg(feature = "clipboard")]
pub struct ArboardClipboard {
    clipboard: Option<arboard::Clipboard>,
    #[cfg_attr(not(target_os = "linux"), allow(dead_code))]
    hold_until_replaced: bool,
}

#[cfg(feature = "clipboard")]
impl ArboardClipboard {
    fn write(&self, clipboard: &mut arboard::Clipboard, text: &str) -> Result<(), arboard::Error> {
        #[cfg(target_os = "linux")]
        {
            if self.hold_until_replaced {
                use arboard::SetExtLinux;
                tracing::debug!("holding clipboard selection until it is replaced");
                return clipboard.set().wait().text(text.to_owned());
            }
        }
        clipboard.set_text(text.to_owned())
    }
}

#[cfg(feature = "clipboard")]
impl ClipboardBackend for ArboardClipboard {
    fn name(&self) -> &str {
        "system"
    }

    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard = match self.clipboard.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new().map_err(|e| match e {
                arboard::Error::ClipboardNotSupported => {
                    ClipboardError::Unavailable("no system clipboard".to_string())
                }
                other => ClipboardError::Backend {
                    backend: self.name().to_string(),
                    message: other.to_string(),
                },
            })?,
        };
        let result = self.write(&mut clipboard, text);
        self.clipboard = Some(clipboard);
        result.map_err(|e| ClipboardError::Backend {
            backend: self.name().to_string(),
            message: e.to_string(),
        })
    }
}

/// A clipboard program that reads the text on stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardProgram {
    /// Executable name.
    pub program: String,
    /// Arguments that make it copy stdin to the clipboard.
    pub args: Vec<String>,
}

impl ClipboardProgram {
    /// Describe a program and its arguments.
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Copies by piping text into the first clipboard program that can be started.
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    candidates: Vec<ClipboardProgram>,
}

impl CommandClipboard {
    /// Use an explicit list of programs, tried in order.
    pub const fn new(candidates: Vec<ClipboardProgram>) -> Self {
        Self { candidates }
    }

    /// The usual clipboard programs for the current platform.
    pub fn for_platform() -> Self {
        let candidates = if cfg!(target_os = "macos") {
            vec![ClipboardProgram::new("pbcopy", &[])]
        } else if cfg!(windows) {
            vec![ClipboardProgram::new("clip", &[])]
        } else {
            let mut programs = Vec::new();
            if std::env::var_os("WAYLAND_DISPLAY").is_some() {
                programs.push(ClipboardProgram::new("wl-copy", &[]));
            }
            programs.push(ClipboardProgram::new("xclip", &["-selection", "clipboard"]));
            programs.push(ClipboardProgram::new("xsel", &["--clipboard", "--input"]));
            programs
        };
        Self::new(candidates)
    }

    /// Pipe `text` into `program`. `Ok(false)` means the program is not installed.
    fn run(program: &ClipboardProgram, text: &str) -> Result<bool, ClipboardError> {
        let backend_err = |message: String| ClipboardError::Backend {
            backend: program.program.clone(),
            message,
        };

        let spawned = Command::new(&program.program)
            .args(&program.args)
            .stdin(Stdio::piped())
            // xclip and wl-copy fork a server that keeps inherited pipes open,
            // so nothing but stdin may be a pipe.
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        let mut child = match spawned {
            Ok(child) => child,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(backend_err(e.to_string())),
        };

        if let Some(mut stdin) = child.stdin.take()
            && let Err(e) = stdin.write_all(text.as_bytes())
        {
            drop(stdin);
            // Reap the child so it does not linger as a zombie.
            let _ = child.kill();
            let _ = child.wait();
            return Err(backend_err(e.to_string()));
        }

        let status = child.wait().map_err(|e| backend_err(e.to_string()))?;
        if status.success() {
            Ok(true)
        } else {
            Err(backend_err(status.to_string()))
        }
    }
}

impl ClipboardBackend for CommandClipboard {
    fn name(&self) -> &str {
        "command"
    }

    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        // A missing program is skipped; any other failure is final.
        for program in &self.candidates {
            if Self::run(program, text)? {
                tracing::debug!(program = %program.program, "copied with clipboard program");
                return Ok(());
            }
            tracing::debug!(program = %program.program, "clipboard program not found");
        }
        Err(ClipboardError::Unavailable(
            "no clipboard program found".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_candidate_list_is_unavailable() {
        let mut backend = CommandClipboard::new(Vec::new());
        let err = backend.set_text("text").unwrap_err();
        assert!(matches!(err, ClipboardError::Unavailable(_)));
    }

    #[test]
    fn missing_programs_are_skipped() {
        let mut backend = CommandClipboard::new(vec![ClipboardProgram::new(
            "textstat-definitely-not-a-real-program",
            &[],
        )]);
        let err = backend.set_text("text").unwrap_err();
        assert!(err.to_string().contains("no clipboard program found"));
    }

    #[test]
    fn session_chain_tries_system_clipboard_first() {
        let chain = session_chain();
        assert_eq!(chain.fallback().name(), "command");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn oneshot_chain_prefers_clipboard_programs_on_linux() {
        let chain = oneshot_chain();
        assert_eq!(chain.primary().name(), "command");
    }

    #[test]
    fn platform_candidates_are_not_empty() {
        assert!(!CommandClipboard::for_platform().candidates.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn program_receiving_stdin_succeeds() {
        // `cat` reads stdin to completion and exits 0.
        let mut backend = CommandClipboard::new(vec![ClipboardProgram::new("cat", &[])]);
        assert!(backend.set_text("copied").is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn failing_program_reports_status() {
        let mut backend = CommandClipboard::new(vec![ClipboardProgram::new("false", &[])]);
        let err = backend.set_text("copied").unwrap_err();
        assert!(matches!(err, ClipboardError::Backend { ref backend, .. } if backend == "false"));
    }

    #[cfg(unix)]
    #[test]
    fn program_that_ignores_stdin_is_reaped_and_reported() {
        // `true` exits without reading, so a large write hits a closed pipe.
        let mut backend = CommandClipboard::new(vec![ClipboardProgram::new("true", &[])]);
        let text = "x".repeat(4 * 1024 * 1024);
        let err = backend.set_text(&text).unwrap_err();
        assert!(matches!(err, ClipboardError::Backend { ref backend, .. } if backend == "true"));
    }
}
