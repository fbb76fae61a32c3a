//! Operation reporting
//!
//! Operations announce progress through a `ReportSink` instead of printing
//! directly, so the same run can render as human text or as NDJSON for
//! CI/automation consumption.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;

use crossterm::style::Stylize;

use crate::ui::{diff, theme};

/// One user-visible moment in a compare or deploy run.
#[derive(Debug, Clone)]
pub enum Report {
    /// Compare started; the File Cabinet download is about to run
    DownloadStarted { document: PathBuf },
    /// Captured output of the external CLI (shown in verbose mode)
    ToolOutput { output: String },
    /// Local and server copies are both on disk and ready to diff
    Diff {
        document: PathBuf,
        remote_copy: PathBuf,
        local: String,
        remote: String,
    },
    /// The downloaded copy was retained (`--keep`)
    RemoteCopyKept { path: PathBuf },
    /// Compare finished; the local file is unchanged
    CompareFinished { document: PathBuf },
    /// Deploy skipped: the file is not under `src/Objects/`
    ObjectSkipped { document: PathBuf },
    /// Deploy started; the object is being staged
    StagingStarted { document: PathBuf },
    /// The narrowed manifest that scopes the deploy (`--dry-run`)
    ScopedManifest { content: String },
    /// Deploy finished and the manifest was restored
    DeployFinished { document: PathBuf },
    /// Operation failed; `message` carries the displayable error
    Failed {
        command: String,
        message: String,
    },
}

/// Where reports go.
pub trait ReportSink {
    fn emit(&self, report: Report);
}

fn basename(path: &PathBuf) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Human-readable sink: icons and colors on stdout, failures on stderr.
pub struct TextSink {
    color: bool,
    verbose: u8,
}

impl TextSink {
    pub fn new(color: bool, verbose: u8) -> Self {
        Self { color, verbose }
    }

    /// Color on iff stdout is a terminal and no NO_COLOR-style override.
    pub fn auto(verbose: u8) -> Self {
        use is_terminal::IsTerminal;

        let color = io::stdout().is_terminal()
            && std::env::var_os("CABINET_NO_COLOR").is_none()
            && std::env::var_os("NO_COLOR").is_none();
        Self::new(color, verbose)
    }

    fn paint(&self, s: &str, color: crossterm::style::Color) -> String {
        if self.color {
            format!("{}", s.with(color))
        } else {
            s.to_string()
        }
    }
}

impl ReportSink for TextSink {
    fn emit(&self, report: Report) {
        match report {
            Report::DownloadStarted { document } => {
                println!(
                    "{} Downloading {} from the NetSuite File Cabinet...",
                    theme::icons::REMOTE,
                    basename(&document)
                );
            }
            Report::ToolOutput { output } => {
                if self.verbose >= 1 && !output.is_empty() {
                    print!("{}", self.paint(&output, theme::colors::DIM));
                    if !output.ends_with('\n') {
                        println!();
                    }
                }
            }
            Report::Diff {
                document,
                local,
                remote,
                ..
            } => {
                println!(
                    "{} {} local ⇄ FileCabinet",
                    theme::icons::DIFF,
                    basename(&document)
                );
                print!(
                    "{}",
                    diff::render_remote_diff(&basename(&document), &local, &remote, self.color)
                );
            }
            Report::RemoteCopyKept { path } => {
                println!(
                    "{} File Cabinet copy kept at {}",
                    theme::icons::ARROW,
                    path.display()
                );
            }
            Report::CompareFinished { document } => {
                println!(
                    "{} {} unchanged on disk",
                    self.paint(theme::icons::SUCCESS, theme::colors::SUCCESS),
                    basename(&document)
                );
            }
            Report::ObjectSkipped { document } => {
                // Quiet by default: not-an-object is a no-op, not an error.
                if self.verbose >= 1 {
                    println!(
                        "{} {} is not under src/Objects/ - nothing to deploy",
                        theme::icons::SKIP,
                        document.display()
                    );
                }
            }
            Report::StagingStarted { document } => {
                println!(
                    "{} Staging {} for a single-object deploy...",
                    theme::icons::DEPLOY,
                    basename(&document)
                );
            }
            Report::ScopedManifest { content } => {
                println!("{} scoped deploy.xml:", theme::icons::ARROW);
                print!("{}", self.paint(&content, theme::colors::DIM));
            }
            Report::DeployFinished { document } => {
                println!(
                    "{} Deployed {} (manifest restored)",
                    self.paint(theme::icons::SUCCESS, theme::colors::SUCCESS),
                    basename(&document)
                );
            }
            Report::Failed { message, .. } => {
                eprintln!(
                    "{} {}",
                    self.paint(theme::icons::ERROR, theme::colors::ERROR),
                    message
                );
            }
        }
    }
}

/// NDJSON sink: one JSON object per event on stdout.
pub struct JsonSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonSink {
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Sink writing to a custom writer (for testing)
    #[allow(dead_code)]
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

impl ReportSink for JsonSink {
    fn emit(&self, report: Report) {
        let json = match report {
            Report::DownloadStarted { document } => serde_json::json!({
                "event": "download_start",
                "command": "compare",
                "document": document.display().to_string(),
            }),
            Report::ToolOutput { output } => serde_json::json!({
                "event": "tool_output",
                "output": output,
            }),
            Report::Diff {
                document,
                remote_copy,
                local,
                remote,
            } => serde_json::json!({
                "event": "diff",
                "command": "compare",
                "document": document.display().to_string(),
                "remote_copy": remote_copy.display().to_string(),
                "unified_diff": diff::render_remote_diff(
                    &basename(&document), &local, &remote, false,
                ),
            }),
            Report::RemoteCopyKept { path } => serde_json::json!({
                "event": "remote_copy_kept",
                "command": "compare",
                "path": path.display().to_string(),
            }),
            Report::CompareFinished { document } => serde_json::json!({
                "event": "finished",
                "command": "compare",
                "document": document.display().to_string(),
            }),
            Report::ObjectSkipped { document } => serde_json::json!({
                "event": "skipped",
                "command": "deploy-object",
                "document": document.display().to_string(),
                "reason": "not under src/Objects/",
            }),
            Report::StagingStarted { document } => serde_json::json!({
                "event": "staging_start",
                "command": "deploy-object",
                "document": document.display().to_string(),
            }),
            Report::ScopedManifest { content } => serde_json::json!({
                "event": "scoped_manifest",
                "command": "deploy-object",
                "content": content,
            }),
            Report::DeployFinished { document } => serde_json::json!({
                "event": "finished",
                "command": "deploy-object",
                "document": document.display().to_string(),
            }),
            Report::Failed { command, message } => serde_json::json!({
                "event": "failed",
                "command": command,
                "message": message,
            }),
        };
        self.write_event(json);
    }
}
