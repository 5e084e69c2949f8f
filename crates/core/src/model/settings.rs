use thiserror::Error;

/// Upper bound on exercises per batch.
pub const DEFAULT_BATCH_SIZE: usize = 15;

/// Exercise category read for every level.
pub const DEFAULT_CATEGORY: &str = "Completar Frases";

/// Scores at or above this percentage get a "high" message.
pub const DEFAULT_HIGH_SCORE_THRESHOLD: f64 = 70.0;

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum QuizSettingsError {
    #[error("batch size must be > 0")]
    InvalidBatchSize,

    #[error("exercise category cannot be empty")]
    EmptyCategory,

    #[error("high score threshold must be within 0..=100, got {0}")]
    InvalidThreshold(f64),
}

/// Validated quiz configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSettings {
    batch_size: usize,
    category: String,
    high_score_threshold: f64,
}

#[derive(Debug, Clone, Default)]
pub struct QuizSettingsDraft {
    pub batch_size: Option<usize>,
    pub category: Option<String>,
    pub high_score_threshold: Option<f64>,
}

impl QuizSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill unset fields with defaults and validate the result.
    ///
    /// # Errors
    ///
    /// Returns `QuizSettingsError` for a zero batch size, a blank category, or
    /// a threshold outside `0..=100`.
    pub fn validate(self) -> Result<QuizSettings, QuizSettingsError> {
        let batch_size = self.batch_size.unwrap_or(DEFAULT_BATCH_SIZE);
        if batch_size == 0 {
            return Err(QuizSettingsError::InvalidBatchSize);
        }

        let category = match self.category {
            Some(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Err(QuizSettingsError::EmptyCategory);
                }
                trimmed.to_owned()
            }
            None => DEFAULT_CATEGORY.to_owned(),
        };

        let high_score_threshold = self
            .high_score_threshold
            .unwrap_or(DEFAULT_HIGH_SCORE_THRESHOLD);
        if !(0.0..=100.0).contains(&high_score_threshold) {
            return Err(QuizSettingsError::InvalidThreshold(high_score_threshold));
        }

        Ok(QuizSettings {
            batch_size,
            category,
            high_score_threshold,
        })
    }
}

impl QuizSettings {
    #[must_use]
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn high_score_threshold(&self) -> f64 {
        self.high_score_threshold
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            category: DEFAULT_CATEGORY.to_owned(),
            high_score_threshold: DEFAULT_HIGH_SCORE_THRESHOLD,
        }
    }
}
