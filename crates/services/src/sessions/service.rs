use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use std::borrow::Cow;
use std::fmt;

use quiz_core::model::{
    BatchExercise, ExerciseRecord, Feedback, GrammarTips, LevelId, Score, answers_match,
};

use super::plan::BatchBuilder;
use super::progress::SessionProgress;
use crate::error::SessionError;

//
// ─── OUTCOMES ──────────────────────────────────────────────────────────────────
//

/// What `select_option` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    Selected,
    /// The current exercise was already verified; the pick is unchanged.
    Locked,
    /// The batch is exhausted; there is nothing to select.
    Finished,
}

/// What `check_answer` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    Correct,
    Incorrect,
    /// No option chosen yet. Feedback asks for a selection.
    SelectionRequired,
    AlreadyAnswered,
    Finished,
}

/// What `advance` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Moved to the exercise at this zero-based position.
    Next(usize),
    /// Left the last exercise; the batch is now finished.
    Completed,
    AlreadyFinished,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One quiz attempt over a batch of exercises for a single level.
///
/// Each exercise moves from unanswered, through an optional selection, to
/// verified. Tips overlay the feedback slot at any point. The batch finishes
/// only by advancing past the last exercise, and stays finished until a new
/// session replaces this one.
pub struct ExerciseSession {
    level: LevelId,
    batch: Vec<BatchExercise>,
    cursor: usize,
    selected_option: Option<String>,
    answered: bool,
    feedback: Feedback,
    correct_count: usize,
    incorrect_count: usize,
    finished: bool,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
}

impl ExerciseSession {
    /// Sample a fresh batch from `pool` and start at its first exercise.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if `pool` has no exercises.
    pub fn initialize<R: Rng + ?Sized>(
        level: LevelId,
        pool: &[ExerciseRecord],
        builder: BatchBuilder,
        rng: &mut R,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        if pool.is_empty() {
            return Err(SessionError::Empty(level));
        }
        let plan = builder.build(pool, rng);
        tracing::debug!(
            %level,
            batch = plan.total(),
            pool = plan.pool_size,
            "initialized exercise batch"
        );
        Self::from_batch(level, plan.exercises, started_at)
    }

    /// Start a session over an already prepared batch, keeping its order.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` if `batch` is empty.
    pub fn from_batch(
        level: LevelId,
        batch: Vec<BatchExercise>,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        if batch.is_empty() {
            return Err(SessionError::Empty(level));
        }

        Ok(Self {
            level,
            batch,
            cursor: 0,
            selected_option: None,
            answered: false,
            feedback: Feedback::Empty,
            correct_count: 0,
            incorrect_count: 0,
            finished: false,
            started_at,
            finished_at: None,
        })
    }

    //
    // ─── TRANSITIONS ───────────────────────────────────────────────────────────
    //

    /// Choose an option for the current exercise.
    ///
    /// Clears any feedback or tip. Ignored once the exercise is verified.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::UnknownOption` if `option` is not one of the
    /// current exercise's options. The state is left untouched.
    pub fn select_option(&mut self, option: &str) -> Result<SelectOutcome, SessionError> {
        if self.answered {
            return Ok(SelectOutcome::Locked);
        }
        let Some(exercise) = self.current_exercise() else {
            return Ok(SelectOutcome::Finished);
        };
        if !exercise.has_option(option) {
            return Err(SessionError::UnknownOption(option.to_owned()));
        }

        self.selected_option = Some(option.to_owned());
        self.feedback = Feedback::Empty;
        Ok(SelectOutcome::Selected)
    }

    /// Verify the current selection against the exercise's correct answer.
    ///
    /// Counts at most once per exercise: after a correct or incorrect verdict
    /// the call is ignored until `advance`.
    pub fn check_answer(&mut self) -> CheckOutcome {
        if self.answered {
            return CheckOutcome::AlreadyAnswered;
        }
        let Some(exercise) = self.batch.get(self.cursor) else {
            return CheckOutcome::Finished;
        };
        let Some(selected) = self.selected_option.as_deref() else {
            self.feedback = Feedback::SelectionRequired;
            return CheckOutcome::SelectionRequired;
        };

        let outcome = if answers_match(selected, exercise.correct_answer()) {
            self.correct_count += 1;
            self.feedback = Feedback::Correct;
            CheckOutcome::Correct
        } else {
            self.incorrect_count += 1;
            self.feedback = Feedback::Incorrect {
                correct_answer: exercise.correct_answer().to_owned(),
            };
            CheckOutcome::Incorrect
        };
        self.answered = true;

        tracing::debug!(
            level = %self.level,
            position = self.cursor,
            ?outcome,
            "checked answer"
        );
        outcome
    }

    /// Show the grammar tip for the current exercise in the feedback slot.
    ///
    /// Returns the tip text, or `None` once the batch is finished. Repeated
    /// calls are allowed; hosts usually hide the trigger while a tip is shown.
    pub fn show_tip(&mut self, tips: &GrammarTips) -> Option<&str> {
        let exercise = self.batch.get(self.cursor)?;
        let grammar_type = exercise.grammar_type().clone();
        let text = tips.lookup(&grammar_type).to_owned();
        self.feedback = Feedback::Tip { grammar_type, text };

        match &self.feedback {
            Feedback::Tip { text, .. } => Some(text.as_str()),
            _ => None,
        }
    }

    /// Move to the next exercise, or finish the batch after the last one.
    ///
    /// Verification is not required here; hosts only offer the trigger after
    /// an answer is checked. `now` is recorded as the finish time.
    pub fn advance(&mut self, now: DateTime<Utc>) -> AdvanceOutcome {
        if self.finished {
            return AdvanceOutcome::AlreadyFinished;
        }
        self.reset_exercise_state();

        if self.cursor + 1 < self.batch.len() {
            self.cursor += 1;
            return AdvanceOutcome::Next(self.cursor);
        }

        self.cursor = self.batch.len();
        self.finished = true;
        self.finished_at = Some(now);
        tracing::info!(
            level = %self.level,
            correct = self.correct_count,
            incorrect = self.incorrect_count,
            total = self.batch.len(),
            "exercise batch finished"
        );
        AdvanceOutcome::Completed
    }

    fn reset_exercise_state(&mut self) {
        self.selected_option = None;
        self.answered = false;
        self.feedback = Feedback::Empty;
    }

    //
    // ─── QUERIES ───────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn level(&self) -> &LevelId {
        &self.level
    }

    #[must_use]
    pub fn batch(&self) -> &[BatchExercise] {
        &self.batch
    }

    /// Number of exercises in the batch.
    #[must_use]
    pub fn total(&self) -> usize {
        self.batch.len()
    }

    /// Zero-based position; equals `total()` once finished.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn current_exercise(&self) -> Option<&BatchExercise> {
        self.batch.get(self.cursor)
    }

    /// The current exercise, verified to be displayable.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Finished` after the last exercise and
    /// `SessionError::DataIntegrity` if the exercise lacks four options.
    pub fn current_checked(&self) -> Result<&BatchExercise, SessionError> {
        let exercise = self.current_exercise().ok_or(SessionError::Finished)?;
        if let Err(err) = exercise.ensure_complete() {
            tracing::warn!(level = %self.level, position = self.cursor, %err, "malformed exercise");
            return Err(err.into());
        }
        Ok(exercise)
    }

    #[must_use]
    pub fn selected_option(&self) -> Option<&str> {
        self.selected_option.as_deref()
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.answered
    }

    #[must_use]
    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    #[must_use]
    pub fn feedback_text(&self) -> Cow<'_, str> {
        self.feedback.text()
    }

    #[must_use]
    pub fn is_tip_shown(&self) -> bool {
        self.feedback.is_tip()
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    #[must_use]
    pub fn incorrect_count(&self) -> usize {
        self.incorrect_count
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    /// Time from start to finish, once finished.
    #[must_use]
    pub fn elapsed(&self) -> Option<Duration> {
        self.finished_at.map(|end| end - self.started_at)
    }

    /// Percentage of the batch answered correctly.
    #[must_use]
    pub fn score(&self) -> Option<Score> {
        Score::from_counts(self.correct_count, self.batch.len())
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            total: self.batch.len(),
            position: self.cursor,
            remaining: self.batch.len().saturating_sub(self.cursor),
            correct: self.correct_count,
            incorrect: self.incorrect_count,
            is_finished: self.finished,
        }
    }
}

impl fmt::Debug for ExerciseSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExerciseSession")
            .field("level", &self.level)
            .field("batch_len", &self.batch.len())
            .field("cursor", &self.cursor)
            .field("answered", &self.answered)
            .field("correct_count", &self.correct_count)
            .field("incorrect_count", &self.incorrect_count)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{CORRECT_MESSAGE, FALLBACK_TIP, GrammarType, SELECT_OPTION_PROMPT};
    use quiz_core::time::{fixed_clock, fixed_now};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn record(i: usize) -> ExerciseRecord {
        ExerciseRecord::new(
            format!("Exercise {i}: he ___ fast."),
            "Present Simple",
            ["runs", "run", "running", "ran"],
            "runs",
        )
    }

    fn pool(n: usize) -> Vec<ExerciseRecord> {
        (0..n).map(record).collect()
    }

    fn session_over(n: usize) -> ExerciseSession {
        let batch = pool(n).into_iter().map(BatchExercise::in_supplied_order).collect();
        ExerciseSession::from_batch(LevelId::new("A1"), batch, fixed_now()).unwrap()
    }

    #[test]
    fn initialize_samples_up_to_fifteen() {
        let mut rng = StdRng::seed_from_u64(42);
        let session = ExerciseSession::initialize(
            LevelId::new("A1"),
            &pool(20),
            BatchBuilder::default(),
            &mut rng,
            fixed_now(),
        )
        .unwrap();

        assert_eq!(session.total(), 15);
        assert_eq!(session.cursor(), 0);
        assert_eq!(session.selected_option(), None);
        assert!(!session.is_answered());
        assert_eq!(session.feedback_text(), "");
        assert!(!session.is_tip_shown());
        assert_eq!(session.correct_count(), 0);
        assert_eq!(session.incorrect_count(), 0);
        assert!(!session.is_finished());
    }

    #[test]
    fn initialize_rejects_empty_pool() {
        let mut rng = StdRng::seed_from_u64(42);
        let err = ExerciseSession::initialize(
            LevelId::new("B2"),
            &[],
            BatchBuilder::default(),
            &mut rng,
            fixed_now(),
        )
        .unwrap_err();
        assert!(matches!(err, SessionError::Empty(_)));
        assert!(err.is_configuration());
    }

    #[test]
    fn correct_answer_counts_once_then_advance_resets() {
        let mut session = session_over(3);

        assert_eq!(session.select_option("runs").unwrap(), SelectOutcome::Selected);
        assert_eq!(session.check_answer(), CheckOutcome::Correct);
        assert_eq!(session.feedback_text(), CORRECT_MESSAGE);
        assert_eq!(session.correct_count(), 1);
        assert!(session.is_answered());

        assert_eq!(session.check_answer(), CheckOutcome::AlreadyAnswered);
        assert_eq!(session.correct_count(), 1);
        assert_eq!(session.incorrect_count(), 0);
        assert_eq!(session.feedback_text(), CORRECT_MESSAGE);

        assert_eq!(session.advance(fixed_now()), AdvanceOutcome::Next(1));
        assert_eq!(session.selected_option(), None);
        assert!(!session.is_answered());
        assert!(session.feedback().is_empty());
    }

    #[test]
    fn wrong_answer_reveals_correct_one() {
        let mut session = session_over(2);
        session.select_option("ran").unwrap();

        assert_eq!(session.check_answer(), CheckOutcome::Incorrect);
        assert_eq!(session.incorrect_count(), 1);
        assert_eq!(session.feedback_text(), "Incorrect. Correct answer: runs");
    }

    #[test]
    fn check_without_selection_only_prompts() {
        let mut session = session_over(2);

        assert_eq!(session.check_answer(), CheckOutcome::SelectionRequired);
        assert_eq!(session.feedback_text(), SELECT_OPTION_PROMPT);
        assert!(!session.is_answered());
        assert_eq!(session.correct_count() + session.incorrect_count(), 0);
    }

    #[test]
    fn selection_can_change_until_verified() {
        let mut session = session_over(2);
        session.select_option("run").unwrap();
        session.check_answer();
        assert_eq!(session.selected_option(), Some("run"));

        assert_eq!(session.select_option("runs").unwrap(), SelectOutcome::Locked);
        assert_eq!(session.selected_option(), Some("run"));

        let mut fresh = session_over(2);
        fresh.select_option("run").unwrap();
        fresh.check_answer();
        fresh.advance(fixed_now());
        fresh.select_option("ran").unwrap();
        fresh.select_option("runs").unwrap();
        assert_eq!(fresh.selected_option(), Some("runs"));
    }

    #[test]
    fn selecting_clears_tip_and_prompt() {
        let mut session = session_over(1);
        session.check_answer();
        assert_eq!(session.feedback_text(), SELECT_OPTION_PROMPT);

        session.show_tip(&GrammarTips::new());
        assert!(session.is_tip_shown());

        session.select_option("run").unwrap();
        assert!(!session.is_tip_shown());
        assert!(session.feedback().is_empty());
    }

    #[test]
    fn unknown_option_is_rejected_without_change() {
        let mut session = session_over(1);
        session.select_option("run").unwrap();

        let err = session.select_option("walks").unwrap_err();
        assert!(matches!(err, SessionError::UnknownOption(ref o) if o == "walks"));
        assert_eq!(session.selected_option(), Some("run"));
    }

    #[test]
    fn missing_tip_uses_fallback_and_leaves_counters() {
        let mut session = session_over(1);
        let tips: GrammarTips = [("Past Simple", "Add -ed.")].into_iter().collect();

        let shown = session.show_tip(&tips).map(str::to_owned);
        assert_eq!(shown.as_deref(), Some(FALLBACK_TIP));
        assert_eq!(session.feedback_text(), FALLBACK_TIP);
        assert!(session.is_tip_shown());
        assert!(!session.is_answered());
        assert_eq!(session.correct_count() + session.incorrect_count(), 0);
    }

    #[test]
    fn tip_after_verdict_keeps_answered_state() {
        let mut session = session_over(1);
        let tips: GrammarTips = [("Present Simple", "Add -s for he/she/it.")]
            .into_iter()
            .collect();

        session.select_option("runs").unwrap();
        session.check_answer();
        session.show_tip(&tips);

        assert!(session.is_answered());
        assert_eq!(session.selected_option(), Some("runs"));
        assert_eq!(
            session.feedback(),
            &Feedback::Tip {
                grammar_type: GrammarType::new("Present Simple"),
                text: "Add -s for he/she/it.".into(),
            }
        );
        assert_eq!(session.check_answer(), CheckOutcome::AlreadyAnswered);
        assert_eq!(session.correct_count(), 1);
    }

    #[test]
    fn advancing_len_times_finishes_and_stays() {
        let mut session = session_over(4);
        for _ in 0..3 {
            assert!(matches!(session.advance(fixed_now()), AdvanceOutcome::Next(_)));
            assert!(!session.is_finished());
        }
        assert_eq!(session.advance(fixed_now()), AdvanceOutcome::Completed);
        assert!(session.is_finished());
        assert_eq!(session.cursor(), 4);
        assert!(session.current_exercise().is_none());

        assert_eq!(session.advance(fixed_now()), AdvanceOutcome::AlreadyFinished);
        assert_eq!(session.cursor(), 4);
    }

    #[test]
    fn finished_session_ignores_per_exercise_triggers() {
        let mut session = session_over(1);
        session.advance(fixed_now());

        assert_eq!(session.select_option("runs").unwrap(), SelectOutcome::Finished);
        assert_eq!(session.check_answer(), CheckOutcome::Finished);
        assert_eq!(session.show_tip(&GrammarTips::new()), None);
        assert!(matches!(session.current_checked(), Err(SessionError::Finished)));
    }

    #[test]
    fn counters_never_exceed_processed_exercises() {
        let mut session = session_over(5);
        let picks = ["runs", "ran", "runs", "run", "runs"];

        for (i, pick) in picks.iter().enumerate() {
            let before = session.correct_count() + session.incorrect_count();
            session.check_answer();
            session.select_option(pick).unwrap();
            session.check_answer();
            session.check_answer();
            let after = session.correct_count() + session.incorrect_count();

            assert_eq!(after, before + 1);
            assert!(after <= i + 1);
            assert!(after <= session.total());
            session.advance(fixed_now());
        }

        assert!(session.is_finished());
        assert_eq!(session.correct_count(), 3);
        assert_eq!(session.incorrect_count(), 2);
        assert_eq!(session.score().unwrap().percentage(), 60.0);
    }

    #[test]
    fn malformed_exercise_fails_integrity_check() {
        let mut short = record(0);
        short.options.truncate(3);
        let session = ExerciseSession::from_batch(
            LevelId::new("A1"),
            vec![BatchExercise::in_supplied_order(short)],
            fixed_now(),
        )
        .unwrap();

        let err = session.current_checked().unwrap_err();
        assert!(matches!(err, SessionError::DataIntegrity(_)));
    }

    #[test]
    fn answers_compare_case_insensitively_with_trimmed_selection() {
        let record = ExerciseRecord::new(
            "I ___ tired.",
            "Verb To Be",
            [" Am ", "is", "are", "be"],
            "am",
        );
        let mut session = ExerciseSession::from_batch(
            LevelId::new("A1"),
            vec![BatchExercise::in_supplied_order(record)],
            fixed_now(),
        )
        .unwrap();

        session.select_option(" Am ").unwrap();
        assert_eq!(session.check_answer(), CheckOutcome::Correct);
    }

    #[test]
    fn elapsed_is_measured_from_start_to_finish() {
        let mut clock = fixed_clock();
        let mut session = session_over(1);
        assert_eq!(session.elapsed(), None);

        clock.advance(Duration::minutes(4));
        session.advance(clock.now());
        assert_eq!(session.finished_at(), Some(clock.now()));
        assert_eq!(session.elapsed(), Some(Duration::minutes(4)));

        // A second advance must not move the finish time.
        clock.advance(Duration::minutes(1));
        session.advance(clock.now());
        assert_eq!(session.elapsed(), Some(Duration::minutes(4)));
    }
}
