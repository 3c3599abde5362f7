//! Optional session log mirroring the on-screen transcript.
//!
//! When a log file is configured (CLI flag or config), every rendered
//! transcript line is appended to it verbatim, with a `## Session started`
//! marker at the top of each session.

use chrono::Local;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};

pub struct LoggingState {
    file_path: Option<String>,
    is_active: bool,
}

impl LoggingState {
    /// A log file given at startup enables logging immediately.
    pub fn new(log_file: Option<String>) -> Result<Self, Box<dyn std::error::Error>> {
        let logging = LoggingState {
            is_active: log_file.is_some(),
            file_path: log_file,
        };

        if logging.is_active {
            logging.test_file_access(logging.file_path.as_ref().unwrap())?;
        }

        Ok(logging)
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Writes the session marker; call once before the first logged line.
    pub fn begin_session(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.log_line(&format!(
            "## Session started {}",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        ))
    }

    /// Appends one transcript line (plus a blank spacer) to the log file.
    /// A no-op when logging is inactive.
    pub fn log_line(&self, content: &str) -> Result<(), Box<dyn std::error::Error>> {
        if !self.is_active {
            return Ok(());
        }
        let file_path = match &self.file_path {
            Some(path) => path,
            None => return Ok(()),
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(file_path)?;
        let mut writer = BufWriter::new(file);

        for line in content.lines() {
            writeln!(writer, "{line}")?;
        }
        writeln!(writer)?;

        writer.flush()?;
        Ok(())
    }

    fn test_file_access(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.flush()?;
        Ok(())
    }
}
