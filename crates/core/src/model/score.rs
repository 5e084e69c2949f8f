use std::fmt;

/// Completion score as a percentage of the batch answered correctly.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Score(f64);

impl Score {
    /// `correct / total * 100`, or `None` for an empty batch.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_counts(correct: usize, total: usize) -> Option<Self> {
        if total == 0 {
            return None;
        }
        Some(Self(correct as f64 * 100.0 / total as f64))
    }

    #[must_use]
    pub fn percentage(self) -> f64 {
        self.0
    }

    #[must_use]
    pub fn meets(self, threshold: f64) -> bool {
        self.0 >= threshold
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}
