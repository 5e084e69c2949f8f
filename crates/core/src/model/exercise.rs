use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::answer::answers_match;
use crate::model::ids::GrammarType;

/// Every exercise is shown with exactly this many choices.
pub const OPTIONS_PER_EXERCISE: usize = 4;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExerciseError {
    #[error("exercise {prompt:?} has {found} options, expected {expected}")]
    IncompleteOptions {
        prompt: String,
        expected: usize,
        found: usize,
    },
}

//
// ─── RECORD ────────────────────────────────────────────────────────────────────
//

/// A fill-in-the-blank exercise as supplied by the data source.
///
/// Records are read-only to the quiz. They are not validated on load; a
/// malformed record is reported when it is about to be shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseRecord {
    pub prompt: String,
    pub grammar_type: GrammarType,
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl ExerciseRecord {
    #[must_use]
    pub fn new(
        prompt: impl Into<String>,
        grammar_type: impl Into<GrammarType>,
        options: impl IntoIterator<Item = impl Into<String>>,
        correct_answer: impl Into<String>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            grammar_type: grammar_type.into(),
            options: options.into_iter().map(Into::into).collect(),
            correct_answer: correct_answer.into(),
        }
    }

    /// Returns true when some option matches the correct answer.
    #[must_use]
    pub fn has_matching_option(&self) -> bool {
        self.options
            .iter()
            .any(|option| answers_match(option, &self.correct_answer))
    }
}

//
// ─── BATCH ENTRY ───────────────────────────────────────────────────────────────
//

/// An exercise selected into a batch, with its option order fixed for the
/// lifetime of that batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchExercise {
    record: ExerciseRecord,
    shuffled_options: Vec<String>,
}

impl BatchExercise {
    /// Shuffle the record's options once and pin the resulting order.
    pub fn shuffle_from<R: Rng + ?Sized>(record: ExerciseRecord, rng: &mut R) -> Self {
        let mut shuffled_options = record.options.clone();
        shuffled_options.shuffle(rng);
        Self {
            record,
            shuffled_options,
        }
    }

    /// Keep the supplied order as-is. Useful for deterministic fixtures.
    #[must_use]
    pub fn in_supplied_order(record: ExerciseRecord) -> Self {
        let shuffled_options = record.options.clone();
        Self {
            record,
            shuffled_options,
        }
    }

    #[must_use]
    pub fn record(&self) -> &ExerciseRecord {
        &self.record
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.record.prompt
    }

    #[must_use]
    pub fn grammar_type(&self) -> &GrammarType {
        &self.record.grammar_type
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.record.correct_answer
    }

    #[must_use]
    pub fn shuffled_options(&self) -> &[String] {
        &self.shuffled_options
    }

    #[must_use]
    pub fn has_option(&self, option: &str) -> bool {
        self.shuffled_options.iter().any(|o| o == option)
    }

    /// Verify the exercise can be displayed.
    ///
    /// # Errors
    ///
    /// Returns `ExerciseError::IncompleteOptions` unless exactly
    /// [`OPTIONS_PER_EXERCISE`] options are present.
    pub fn ensure_complete(&self) -> Result<(), ExerciseError> {
        let found = self.shuffled_options.len();
        if found != OPTIONS_PER_EXERCISE {
            return Err(ExerciseError::IncompleteOptions {
                prompt: self.record.prompt.clone(),
                expected: OPTIONS_PER_EXERCISE,
                found,
            });
        }
        Ok(())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
