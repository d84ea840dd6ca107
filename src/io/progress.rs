//! Terminal progress display for collapse runs

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use crate::io::visitor::{CellVisit, Visitor};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{msg}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} cells"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Visitor advancing a progress bar once per collapsed cell
pub struct ProgressManager {
    bar: ProgressBar,
    collapsed: u64,
}

impl ProgressManager {
    /// Create a progress display for a grid of `cells` cells
    pub fn new(cells: usize, label: &str) -> Self {
        let bar = ProgressBar::new(cells as u64);
        bar.set_style(PROGRESS_STYLE.clone());
        bar.set_message(label.to_string());

        Self { bar, collapsed: 0 }
    }

    /// Create a progress display that draws nowhere
    pub fn hidden(cells: usize) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_length(cells as u64);

        Self { bar, collapsed: 0 }
    }

    /// Cells collapsed since the last reset
    pub const fn collapsed(&self) -> u64 {
        self.collapsed
    }

    /// Mark the current run as finished
    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }

    /// Mark the current run as failed and remove the bar
    pub fn abandon(&self, message: &str) {
        self.bar.abandon_with_message(message.to_string());
    }
}

impl<T> Visitor<T> for ProgressManager {
    fn before_visit(&mut self) {
        self.collapsed = 0;
        self.bar.reset();
    }

    fn visit(&mut self, cell: CellVisit<'_, T>) {
        if cell.value.is_some() {
            self.collapsed += 1;
            self.bar.set_position(self.collapsed);
        }
    }
}
