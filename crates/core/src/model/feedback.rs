use std::borrow::Cow;
use std::fmt;

use crate::model::ids::GrammarType;

/// Shown when an answer is checked before any option was chosen.
pub const SELECT_OPTION_PROMPT: &str = "Please select an option before checking.";

pub const CORRECT_MESSAGE: &str = "Correct!";

/// Content of the feedback slot for the current exercise.
///
/// A tip replaces whatever verdict was shown; choosing another option clears
/// the slot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Feedback {
    #[default]
    Empty,
    SelectionRequired,
    Correct,
    Incorrect {
        correct_answer: String,
    },
    Tip {
        grammar_type: GrammarType,
        text: String,
    },
}

impl Feedback {
    /// Text for the feedback slot. Empty when nothing is shown.
    #[must_use]
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Feedback::Empty => Cow::Borrowed(""),
            Feedback::SelectionRequired => Cow::Borrowed(SELECT_OPTION_PROMPT),
            Feedback::Correct => Cow::Borrowed(CORRECT_MESSAGE),
            Feedback::Incorrect { correct_answer } => {
                Cow::Owned(format!("Incorrect. Correct answer: {correct_answer}"))
            }
            Feedback::Tip { text, .. } => Cow::Borrowed(text),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Feedback::Empty)
    }

    #[must_use]
    pub fn is_tip(&self) -> bool {
        matches!(self, Feedback::Tip { .. })
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}
