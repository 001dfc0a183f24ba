use crate::component::timelapse_builder::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use std::cell::OnceCell;

/// 終端機進度條，第一次回報時才依總數建立
#[derive(Default)]
pub struct TerminalProgress {
    bar: OnceCell<ProgressBar>,
}

impl TerminalProgress {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn create_bar(total: usize, label: &str) -> ProgressBar {
        let progress_bar = ProgressBar::new(total as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
                .expect("Invalid progress bar template")
                .progress_chars("#>-"),
        );
        progress_bar.set_message(label.to_string());
        progress_bar
    }
}

impl ProgressReporter for TerminalProgress {
    fn report(&self, current: usize, total: usize, label: &str) {
        let progress_bar = self.bar.get_or_init(|| Self::create_bar(total, label));
        progress_bar.set_position(current as u64);
        if current >= total {
            progress_bar.finish();
        }
    }
}

impl Drop for TerminalProgress {
    fn drop(&mut self) {
        if let Some(progress_bar) = self.bar.get() {
            if !progress_bar.is_finished() {
                progress_bar.abandon();
            }
        }
    }
}
