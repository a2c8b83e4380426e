//! User-facing status output.
//!
//! Every line goes to stdout and is flushed immediately, since it interleaves
//! with output from child git processes. Styling is decided once per process
//! through [`LogStyle`] and threaded to every caller by reference.

use std::io::{IsTerminal, Write};

use chrono::Local;
use colored::{Color, Colorize};

/// Marker repeated once per indentation level.
const INDENT_MARKER: &str = "...";

const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Process-wide output configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogStyle {
    /// Emit ANSI bold/color escapes.
    pub color: bool,
    /// Prefix lines with `[YYYY/MM/DD HH:MM:SS]`.
    pub timestamps: bool,
}

impl LogStyle {
    /// Color only when stdout is a terminal and `NO_COLOR` is unset.
    pub fn detect() -> Self {
        let color = std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
        Self {
            color,
            timestamps: true,
        }
    }
}

impl Default for LogStyle {
    fn default() -> Self {
        Self::detect()
    }
}

/// Per-line options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLine {
    pub bold: bool,
    pub color: Option<Color>,
    pub timestamp: bool,
    pub indent: usize,
}

impl Default for LogLine {
    fn default() -> Self {
        Self {
            bold: false,
            color: None,
            timestamp: true,
            indent: 0,
        }
    }
}

impl LogLine {
    pub fn error() -> Self {
        Self {
            bold: true,
            color: Some(Color::Red),
            ..Self::default()
        }
    }

    pub fn warning() -> Self {
        Self {
            bold: true,
            color: Some(Color::Yellow),
            ..Self::default()
        }
    }

    pub fn indented(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}

/// Timestamp in the format used by log lines and commit messages.
pub fn timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

#[derive(Debug, Clone, Copy)]
pub struct Logger {
    style: LogStyle,
}

impl Logger {
    pub fn new(style: LogStyle) -> Self {
        Self { style }
    }

    /// Build the full line for `message` without printing it.
    pub fn format_line(&self, message: &str, line: LogLine) -> String {
        let mut out = String::new();
        if self.style.timestamps && line.timestamp {
            out.push_str(&format!("[{}] ", timestamp()));
        }
        out.push_str(&INDENT_MARKER.repeat(line.indent));

        if !self.style.color || (!line.bold && line.color.is_none()) {
            out.push_str(message);
            return out;
        }

        let mut styled = message.normal();
        if let Some(color) = line.color {
            styled = styled.color(color);
        }
        if line.bold {
            styled = styled.bold();
        }
        out.push_str(&styled.to_string());
        out
    }

    pub fn log_with(&self, message: &str, line: LogLine) {
        let text = self.format_line(message, line);
        let mut stdout = std::io::stdout().lock();
        // A closed stdout must not abort the sync.
        let _ = writeln!(stdout, "{text}");
        let _ = stdout.flush();
    }

    pub fn info(&self, message: &str) {
        self.log_with(message, LogLine::default());
    }

    pub fn warn(&self, message: &str) {
        self.log_with(message, LogLine::warning());
    }

    pub fn error(&self, message: &str) {
        self.log_with(message, LogLine::error());
    }

    /// Report `message` as an error and terminate with exit status 1.
    pub fn fatal(&self, message: &str) -> ! {
        self.error(message);
        std::process::exit(1)
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogStyle::default())
    }
}
