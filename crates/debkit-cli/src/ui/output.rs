//! Status-line output for commands.
//!
//! Informational lines go to stdout and are dropped in quiet mode; warnings
//! and errors go to stderr and are always shown.

use super::theme::Theme;
use crossterm::style::Stylize;
use debkit_core::Reporter;

#[derive(Debug, Clone)]
pub struct Output {
    theme: Theme,
    quiet: bool,
}

impl Output {
    pub fn new(quiet: bool) -> Self {
        Self {
            theme: Theme::default(),
            quiet,
        }
    }

    /// Print a plain line unless quiet.
    pub fn plain(&self, msg: &str) {
        if !self.quiet {
            println!("{msg}");
        }
    }
}

impl Reporter for Output {
    fn info(&self, msg: &str) {
        if !self.quiet {
            println!(
                "  {} {}",
                self.theme.icons.info.with(self.theme.colors.info),
                msg
            );
        }
    }

    fn success(&self, msg: &str) {
        println!(
            "{} {}",
            self.theme.icons.success.with(self.theme.colors.success),
            msg.with(self.theme.colors.success)
        );
    }

    fn warning(&self, msg: &str) {
        eprintln!(
            "{} {}",
            self.theme.icons.warning.with(self.theme.colors.warning),
            msg.with(self.theme.colors.warning)
        );
    }

    fn error(&self, msg: &str) {
        eprintln!(
            "{} {}",
            self.theme.icons.error.with(self.theme.colors.error),
            msg.with(self.theme.colors.error)
        );
    }
}
