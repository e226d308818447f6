use std::num::NonZeroUsize;

const DEFAULT_WINDOW: NonZeroUsize = NonZeroUsize::new(3).unwrap();
const DEFAULT_TOP: NonZeroUsize = NonZeroUsize::new(3).unwrap();

/// Sizes of the bounded reducers.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Number of consecutive events in the least-sum window (K).
    pub window: NonZeroUsize,
    /// Number of entries kept in the ranking (N).
    pub top: NonZeroUsize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            top: DEFAULT_TOP,
        }
    }
}

impl ReportConfig {
    pub fn new(window: NonZeroUsize, top: NonZeroUsize) -> Self {
        Self { window, top }
    }
}
