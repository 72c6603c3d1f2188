use crate::ports::outbound::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::cell::RefCell;

/// StderrProgressReporter adapter for reporting progress to stderr
///
/// This adapter implements the ProgressReporter port, writing progress
/// information to stderr so it doesn't interfere with the resolved
/// classpath printed on stdout. Uses indicatif for the per-descriptor bar.
pub struct StderrProgressReporter {
    progress_bar: RefCell<Option<ProgressBar>>,
    quiet: bool,
}

impl StderrProgressReporter {
    pub fn new() -> Self {
        Self {
            progress_bar: RefCell::new(None),
            quiet: false,
        }
    }

    /// Suppresses informational messages; errors are still printed
    pub fn quiet() -> Self {
        Self {
            progress_bar: RefCell::new(None),
            quiet: true,
        }
    }

    fn get_or_create_progress_bar(&self, total: usize) -> Option<ProgressBar> {
        let mut pb_option = self.progress_bar.borrow_mut();
        if let Some(pb) = pb_option.as_ref() {
            pb.set_length(total as u64);
            return Some(pb.clone());
        }

        let style = ProgressStyle::default_bar()
            .template("   {spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} - {msg}")
            .ok()?
            .progress_chars("=>-");
        let pb = ProgressBar::new(total as u64);
        pb.set_style(style);
        *pb_option = Some(pb.clone());
        Some(pb)
    }

    fn finish_progress_bar(&self) {
        if let Some(pb) = self.progress_bar.borrow_mut().take() {
            pb.finish_and_clear();
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
        if self.quiet {
            return;
        }
        match self.progress_bar.borrow().as_ref() {
            Some(pb) => pb.println(message),
            None => eprintln!("{}", message),
        }
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        if self.quiet {
            return;
        }
        if let Some(pb) = self.get_or_create_progress_bar(total) {
            pb.set_position(current as u64);
            if let Some(msg) = message {
                pb.set_message(msg.to_string());
            }
        }
    }

    fn report_error(&self, message: &str) {
        self.finish_progress_bar();
        eprintln!("{}", message.yellow());
    }

    fn report_completion(&self, message: &str) {
        self.finish_progress_bar();
        if self.quiet {
            return;
        }
        eprintln!("{}", message.green());
    }
}
