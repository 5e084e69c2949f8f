/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    /// Zero-based index of the current exercise; equals `total` once finished.
    pub position: usize,
    pub remaining: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub is_finished: bool,
}

impl SessionProgress {
    /// Exercises verified so far.
    #[must_use]
    pub fn answered(&self) -> usize {
        self.correct + self.incorrect
    }
}
