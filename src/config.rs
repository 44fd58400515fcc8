//! Runtime configuration shared by the library and the binary.

use std::time::Duration;

/// Rows per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Page sizes offered by the page-size selector.
pub const PAGE_SIZE_OPTIONS: &[usize] = &[5, 10, 15, 20, 50];

/// Simulated fetch time before the model grid leaves `Loading`.
pub const DEFAULT_LOAD_DELAY: Duration = Duration::from_secs(5);

/// UI refresh interval.
pub const DEFAULT_TICK_RATE: Duration = Duration::from_millis(250);

/// Grid configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridConfig {
    pub page_size: usize,
    pub load_delay: Duration,
    pub tick_rate: Duration,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            load_delay: DEFAULT_LOAD_DELAY,
            tick_rate: DEFAULT_TICK_RATE,
        }
    }
}

/// Next larger page-size option, or the largest one.
pub fn next_page_size(current: usize) -> usize {
    PAGE_SIZE_OPTIONS
        .iter()
        .copied()
        .find(|&size| size > current)
        .unwrap_or(PAGE_SIZE_OPTIONS[PAGE_SIZE_OPTIONS.len() - 1])
}

/// Next smaller page-size option, or the smallest one.
pub fn prev_page_size(current: usize) -> usize {
    PAGE_SIZE_OPTIONS
        .iter()
        .rev()
        .copied()
        .find(|&size| size < current)
        .unwrap_or(PAGE_SIZE_OPTIONS[0])
}
