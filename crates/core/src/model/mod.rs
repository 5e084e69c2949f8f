mod answer;
mod exercise;
mod feedback;
mod ids;
mod motivation;
mod score;
mod settings;
mod tip;

pub use answer::answers_match;
pub use exercise::{BatchExercise, ExerciseError, ExerciseRecord, OPTIONS_PER_EXERCISE};
pub use feedback::{CORRECT_MESSAGE, Feedback, SELECT_OPTION_PROMPT};
pub use ids::{GrammarType, LevelId, SessionKey};
pub use motivation::{MessageTier, MotivationalMessages};
pub use score::Score;
pub use settings::{
    DEFAULT_BATCH_SIZE, DEFAULT_CATEGORY, DEFAULT_HIGH_SCORE_THRESHOLD, QuizSettings,
    QuizSettingsDraft, QuizSettingsError,
};
pub use tip::{FALLBACK_TIP, GrammarTips};
