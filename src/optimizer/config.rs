//! Sub-path optimizer configuration.

use crate::permutation::MAX_WINDOW_LENGTH;

/// Configuration for a [`SubPathOptimizer`](super::SubPathOptimizer).
///
/// # Examples
///
/// ```
/// use u_windowopt::optimizer::OptimizerConfig;
///
/// let config = OptimizerConfig::new(6).with_max_window_length(8);
/// assert!(config.validate().is_ok());
///
/// let too_long = OptimizerConfig::new(9).with_max_window_length(8);
/// assert!(too_long.validate().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct OptimizerConfig {
    /// Number of interior positions `L` reordered per call.
    pub window_length: usize,

    /// Upper bound accepted for `window_length`.
    ///
    /// Work per call grows as `L!`; lower this to cap latency.
    pub max_window_length: usize,

    /// Leave positions whose node does not change untouched on write-back.
    pub skip_unchanged: bool,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            window_length: 5,
            max_window_length: MAX_WINDOW_LENGTH,
            skip_unchanged: true,
        }
    }
}

impl OptimizerConfig {
    /// Default configuration for windows of `window_length` interior nodes.
    pub fn new(window_length: usize) -> Self {
        Self {
            window_length,
            ..Self::default()
        }
    }

    pub fn with_window_length(mut self, n: usize) -> Self {
        self.window_length = n;
        self
    }

    pub fn with_max_window_length(mut self, n: usize) -> Self {
        self.max_window_length = n;
        self
    }

    pub fn with_skip_unchanged(mut self, skip: bool) -> Self {
        self.skip_unchanged = skip;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_window_length > MAX_WINDOW_LENGTH {
            return Err(format!(
                "max_window_length must be at most {MAX_WINDOW_LENGTH}, got {}",
                self.max_window_length
            ));
        }
        if self.window_length == 0 {
            return Err("window_length must be positive".into());
        }
        if self.window_length > self.max_window_length {
            return Err(format!(
                "window_length {} exceeds max_window_length {}",
                self.window_length, self.max_window_length
            ));
        }
        Ok(())
    }
}
