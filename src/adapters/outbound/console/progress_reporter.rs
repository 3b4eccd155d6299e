use crate::ports::outbound::ProgressReporter;
use owo_colors::OwoColorize;
use std::io::IsTerminal;

/// StderrProgressReporter adapter for reporting progress to stderr
///
/// Writes to stderr so the rendered views on stdout stay clean. Colors are
/// used only when stderr is a terminal.
pub struct StderrProgressReporter {
    use_color: bool,
    quiet: bool,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self {
            use_color: std::io::stderr().is_terminal(),
            quiet: false,
        }
    }

    /// Suppresses everything but warnings
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    fn stage_line(&self, current: usize, total: usize, message: &str) -> String {
        let counter = format!("[{}/{}]", current, total);
        if self.use_color {
            format!("{} {}", counter.dimmed(), message)
        } else {
            format!("{} {}", counter, message)
        }
    }

    fn warning_line(&self, message: &str) -> String {
        if self.use_color {
            message.yellow().to_string()
        } else {
            message.to_string()
        }
    }

    fn completion_line(&self, message: &str) -> String {
        if self.use_color {
            message.green().bold().to_string()
        } else {
            message.to_string()
        }
    }
}

impl Default for StderrProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for StderrProgressReporter {
    fn report(&self, message: &str) {
        if !self.quiet {
            eprintln!("   {}", message);
        }
    }

    fn report_stage(&self, current: usize, total: usize, message: &str) {
        if !self.quiet {
            eprintln!("{}", self.stage_line(current, total, message));
        }
    }

    fn report_warning(&self, message: &str) {
        eprintln!("{}", self.warning_line(message));
    }

    fn report_completion(&self, message: &str) {
        if !self.quiet {
            eprintln!("{}", self.completion_line(message));
        }
    }
}
