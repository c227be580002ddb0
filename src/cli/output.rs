//! Colored terminal output.

use anstyle::{AnsiColor, Color, Style};
use std::io::{self, IsTerminal, Write};

const GREEN: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green)));
const YELLOW: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow)));
const RED: Style = Style::new().bold().fg_color(Some(Color::Ansi(AnsiColor::Red)));
const CYAN: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan)));
const HEADER: Style = Style::new().bold().underline();

/// Writes user-facing messages, honoring verbose and quiet modes.
///
/// Colors are only emitted when the target stream is a terminal.
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
}

impl OutputManager {
    /// Creates an output manager. `quiet` wins over `verbose`.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose: verbose && !quiet,
            quiet,
        }
    }

    /// Whether non-error output is suppressed.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Detail shown only with `--verbose`.
    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if !self.verbose {
            return Ok(());
        }
        write_styled(&mut io::stdout(), Style::new().dimmed(), "", message)
    }

    /// Progress line (`→ message`).
    pub fn progress(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        write_styled(&mut io::stdout(), CYAN, "→ ", message)
    }

    /// Success line (`✓ message`).
    pub fn success(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        write_styled(&mut io::stdout(), GREEN, "✓ ", message)
    }

    /// Warning line on stderr.
    pub fn warn(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        write_styled(&mut io::stderr(), YELLOW, "⚠ ", message)
    }

    /// Error line on stderr. Shown even in quiet mode.
    pub fn error(&self, message: &str) -> io::Result<()> {
        write_styled(&mut io::stderr(), RED, "✗ ", message)
    }

    /// Section header.
    pub fn section(&self, title: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut out = io::stdout();
        writeln!(out)?;
        write_styled(&mut out, HEADER, "", title)
    }

    /// Indented plain line.
    pub fn indent(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(io::stdout(), "  {message}")
    }

    /// Recovery hint under an error, on stderr. Shown even in quiet mode.
    pub fn hint(&self, message: &str) -> io::Result<()> {
        writeln!(io::stderr(), "  hint: {message}")
    }
}

fn write_styled<W: Write + IsTerminal>(out: &mut W, style: Style, prefix: &str, message: &str) -> io::Result<()> {
    if out.is_terminal() {
        writeln!(out, "{style}{prefix}{message}{style:#}")
    } else {
        writeln!(out, "{prefix}{message}")
    }
}
