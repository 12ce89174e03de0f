//! Colored status lines on stdout

use std::io::{self, Write};

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Prints short colored progress and summary messages.
pub struct StatusPrinter {
    stdout: StandardStream,
}

impl StatusPrinter {
    pub fn new(use_color: bool) -> Self {
        Self {
            stdout: StandardStream::stdout(color_choice(use_color)),
        }
    }

    /// Print to stderr instead, keeping stdout free for machine-readable output.
    pub fn to_stderr(use_color: bool) -> Self {
        Self {
            stdout: StandardStream::stderr(color_choice(use_color)),
        }
    }

    /// A step in progress, e.g. "Scanning directory structure..."
    pub fn step(&mut self, message: &str) -> io::Result<()> {
        self.line(Color::Cyan, false, message)
    }

    /// Extra detail after a step.
    pub fn info(&mut self, message: &str) -> io::Result<()> {
        self.line(Color::Cyan, false, &format!("ℹ {}", message))
    }

    pub fn success(&mut self, message: &str) -> io::Result<()> {
        self.line(Color::Green, true, &format!("✓ {}", message))
    }

    pub fn warning(&mut self, message: &str) -> io::Result<()> {
        self.line(Color::Yellow, false, message)
    }

    fn line(&mut self, color: Color, bold: bool, message: &str) -> io::Result<()> {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(color)).set_bold(bold);
        self.stdout.set_color(&spec)?;
        write!(self.stdout, "{}", message)?;
        self.stdout.reset()?;
        writeln!(self.stdout)
    }
}

fn color_choice(use_color: bool) -> ColorChoice {
    if use_color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}
