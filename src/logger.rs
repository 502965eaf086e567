use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cell::RefCell;
use std::io::Write;
use std::path::Path;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Controls which status lines get written and how.
#[derive(Clone, Copy, Debug)]
pub struct ReportConfig {
    pub verbose: bool,
    pub output_format: OutputFormat,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            verbose: true,
            output_format: OutputFormat::Text,
        }
    }
}

/// Per-batch outcome counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub removed: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.removed + self.skipped + self.failed
    }
}

#[derive(Serialize)]
struct JsonEvent<'a> {
    #[serde(rename = "type")]
    event_type: &'a str,
    message: String,
    timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<serde_json::Value>,
}

/// Writes per-file status lines to a sink. OK/SKIP/summary lines respect
/// `verbose`, errors are always written.
pub struct Reporter {
    config: ReportConfig,
    sink: RefCell<Box<dyn Write>>,
}

impl Reporter {
    pub fn new(config: ReportConfig) -> Self {
        Self::with_sink(config, Box::new(std::io::stdout()))
    }

    pub fn with_sink(config: ReportConfig, sink: Box<dyn Write>) -> Self {
        Self {
            config,
            sink: RefCell::new(sink),
        }
    }

    pub fn config(&self) -> ReportConfig {
        self.config
    }

    pub fn removed(&self, path: &Path) {
        if !self.config.verbose {
            return;
        }
        let data = serde_json::json!({ "path": path.display().to_string() });
        self.output(
            "ok",
            &format!("Removed year tag from: {}", path.display()),
            Some(data),
        );
    }

    pub fn skipped(&self, path: &Path) {
        if !self.config.verbose {
            return;
        }
        let data = serde_json::json!({ "path": path.display().to_string() });
        self.output(
            "skip",
            &format!("No year tag found in: {}", path.display()),
            Some(data),
        );
    }

    pub fn error(&self, path: &Path, error: &dyn std::fmt::Display) {
        let data = serde_json::json!({
            "path": path.display().to_string(),
            "error": error.to_string()
        });
        self.output(
            "error",
            &format!("Cannot process {}: {}", path.display(), error),
            Some(data),
        );
    }

    pub fn summary(&self, summary: &BatchSummary) {
        if !self.config.verbose {
            return;
        }
        let data = serde_json::json!({
            "files": summary.total(),
            "removed": summary.removed,
            "skipped": summary.skipped,
            "failed": summary.failed
        });
        self.output(
            "done",
            &format!(
                "{} files: {} removed, {} skipped, {} failed",
                summary.total(),
                summary.removed,
                summary.skipped,
                summary.failed
            ),
            Some(data),
        );
    }

    fn output(&self, event_type: &str, message: &str, data: Option<serde_json::Value>) {
        let line = match self.config.output_format {
            OutputFormat::Json => {
                let event = JsonEvent {
                    event_type,
                    message: message.to_string(),
                    timestamp: Utc::now(),
                    data,
                };
                match serde_json::to_string(&event) {
                    Ok(json) => json,
                    Err(_) => return,
                }
            }
            OutputFormat::Text => {
                let prefix = match event_type {
                    "ok" => "[OK]",
                    "skip" => "[SKIP]",
                    "error" => "[ERROR]",
                    "done" => "[DONE]",
                    _ => "[INFO]",
                };
                format!("{} {}", prefix, message)
            }
        };

        // a broken sink must not interrupt tag processing
        let mut sink = self.sink.borrow_mut();
        let _ = writeln!(sink, "{}", line);
        let _ = sink.flush();
    }
}
