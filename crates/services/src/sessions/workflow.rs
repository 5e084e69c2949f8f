use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::{Arc, Mutex, MutexGuard};

use quiz_core::model::{LevelId, MotivationalMessages, QuizSettings};
use storage::{ExerciseRepository, GrammarTipRepository, Storage};

use super::plan::BatchBuilder;
use super::queries::SessionQueries;
use super::service::{AdvanceOutcome, ExerciseSession};
use super::summary::CompletionSummary;
use crate::Clock;
use crate::error::SessionError;

/// Orchestrates batch initialization, tips and completion against storage.
///
/// Owns the time source, the shared random source and the repositories; the
/// session it hands out stays a plain value owned by the caller.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    settings: QuizSettings,
    messages: Arc<MotivationalMessages>,
    exercises: Arc<dyn ExerciseRepository>,
    tips: Arc<dyn GrammarTipRepository>,
    rng: Arc<Mutex<StdRng>>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(
        clock: Clock,
        exercises: Arc<dyn ExerciseRepository>,
        tips: Arc<dyn GrammarTipRepository>,
    ) -> Self {
        Self {
            clock,
            settings: QuizSettings::default(),
            messages: Arc::new(MotivationalMessages::default()),
            exercises,
            tips,
            rng: Arc::new(Mutex::new(StdRng::from_os_rng())),
        }
    }

    #[must_use]
    pub fn from_storage(clock: Clock, storage: &Storage) -> Self {
        Self::new(clock, Arc::clone(&storage.exercises), Arc::clone(&storage.tips))
    }

    /// Make sampling, shuffling and message choice reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Arc::new(Mutex::new(StdRng::seed_from_u64(seed)));
        self
    }

    #[must_use]
    pub fn with_settings(mut self, settings: QuizSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn with_messages(mut self, messages: MotivationalMessages) -> Self {
        self.messages = Arc::new(messages);
        self
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    /// Levels offered by the data source, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` on repository failures.
    pub async fn list_levels(&self) -> Result<Vec<LevelId>, SessionError> {
        SessionQueries::list_levels(self.exercises.as_ref()).await
    }

    /// Start a new session with a freshly sampled batch for `level`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error (`UnknownLevel`, `MissingCategory`,
    /// `Empty`) when no batch can be built, or `SessionError::Storage`.
    pub async fn start_session(&self, level: &LevelId) -> Result<ExerciseSession, SessionError> {
        let pool =
            SessionQueries::load_pool(self.exercises.as_ref(), level, self.settings.category())
                .await?;
        let builder = BatchBuilder::new(self.settings.batch_size());
        let started_at = self.clock.now();

        let mut rng = self.lock_rng()?;
        let session =
            ExerciseSession::initialize(level.clone(), &pool, builder, &mut *rng, started_at)?;
        tracing::info!(%level, exercises = session.total(), "session started");
        Ok(session)
    }

    /// Make sure `current` holds a session for `level`.
    ///
    /// A session for the same level is kept as-is, finished or not. Returns
    /// true when a new batch was initialized.
    ///
    /// # Errors
    ///
    /// Propagates `start_session` errors; `current` is unchanged on error.
    pub async fn ensure_level(
        &self,
        current: &mut Option<ExerciseSession>,
        level: &LevelId,
    ) -> Result<bool, SessionError> {
        if current.as_ref().is_some_and(|session| session.level() == level) {
            return Ok(false);
        }
        let session = self.start_session(level).await?;
        *current = Some(session);
        Ok(true)
    }

    /// Replace `session` with a fresh batch for the same level.
    ///
    /// # Errors
    ///
    /// Propagates `start_session` errors; `session` is unchanged on error.
    pub async fn restart(&self, session: &mut ExerciseSession) -> Result<(), SessionError> {
        let level = session.level().clone();
        *session = self.start_session(&level).await?;
        Ok(())
    }

    /// Load the tip mapping and show the current exercise's tip.
    ///
    /// Returns the tip text, or `None` once the batch is finished.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` when tips cannot be loaded.
    pub async fn show_tip(&self, session: &mut ExerciseSession) -> Result<Option<String>, SessionError> {
        let tips = SessionQueries::load_tips(self.tips.as_ref()).await?;
        Ok(session.show_tip(&tips).map(str::to_owned))
    }

    /// Advance `session`, stamping the finish time from this service's clock.
    pub fn advance(&self, session: &mut ExerciseSession) -> AdvanceOutcome {
        session.advance(self.clock.now())
    }

    /// Completion summary with a motivational message, once finished.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::LockPoisoned` if the random source is unusable.
    pub fn summarize(&self, session: &ExerciseSession) -> Result<Option<CompletionSummary>, SessionError> {
        if !session.is_finished() {
            return Ok(None);
        }
        let mut rng = self.lock_rng()?;
        Ok(CompletionSummary::from_session(
            session,
            &self.messages,
            self.settings.high_score_threshold(),
            &mut *rng,
        ))
    }

    fn lock_rng(&self) -> Result<MutexGuard<'_, StdRng>, SessionError> {
        self.rng
            .lock()
            .map_err(|e| SessionError::LockPoisoned(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{ExerciseRecord, QuizSettingsDraft};
    use quiz_core::time::{fixed_clock, fixed_now};
    use storage::InMemoryRepository;

    const CATEGORY: &str = "Completar Frases";

    fn record(i: usize) -> ExerciseRecord {
        ExerciseRecord::new(
            format!("Line {i}: she ___ here."),
            "Verb To Be",
            ["is", "are", "am", "be"],
            "is",
        )
    }

    fn service_with(levels: &[(&str, usize)]) -> QuizLoopService {
        let repo = InMemoryRepository::new();
        for (level, count) in levels {
            repo.insert_exercises(LevelId::new(*level), CATEGORY, (0..*count).map(record))
                .unwrap();
        }
        repo.insert_tip("Verb To Be", "am / is / are").unwrap();
        let repo = Arc::new(repo);
        QuizLoopService::new(fixed_clock(), repo.clone(), repo).with_seed(17)
    }

    #[tokio::test]
    async fn start_session_caps_batch_and_stamps_start() {
        let service = service_with(&[("A1", 20)]);
        let session = service.start_session(&LevelId::new("A1")).await.unwrap();

        assert_eq!(session.total(), 15);
        assert_eq!(session.started_at(), fixed_now());
    }

    #[tokio::test]
    async fn ensure_level_reinitializes_only_on_change() {
        let service = service_with(&[("A1", 5), ("B2", 3)]);
        let mut current = None;

        assert!(service.ensure_level(&mut current, &LevelId::new("A1")).await.unwrap());
        current.as_mut().unwrap().advance(fixed_now());
        assert!(!service.ensure_level(&mut current, &LevelId::new("A1")).await.unwrap());
        assert_eq!(current.as_ref().unwrap().cursor(), 1);

        assert!(service.ensure_level(&mut current, &LevelId::new("B2")).await.unwrap());
        let session = current.unwrap();
        assert_eq!(session.level(), &LevelId::new("B2"));
        assert_eq!(session.total(), 3);
        assert_eq!(session.cursor(), 0);
    }

    #[tokio::test]
    async fn failed_level_change_keeps_current_session() {
        let service = service_with(&[("A1", 5)]);
        let mut current = None;
        service.ensure_level(&mut current, &LevelId::new("A1")).await.unwrap();

        let err = service
            .ensure_level(&mut current, &LevelId::new("C2"))
            .await
            .unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(current.unwrap().level(), &LevelId::new("A1"));
    }

    #[tokio::test]
    async fn restart_resets_counters_and_cursor() {
        let service = service_with(&[("A1", 4)]);
        let mut session = service.start_session(&LevelId::new("A1")).await.unwrap();
        session.select_option("is").unwrap();
        session.check_answer();
        service.advance(&mut session);

        service.restart(&mut session).await.unwrap();
        assert_eq!(session.cursor(), 0);
        assert_eq!(session.correct_count(), 0);
        assert_eq!(session.total(), 4);
    }

    #[tokio::test]
    async fn tip_comes_from_repository() {
        let service = service_with(&[("A1", 2)]);
        let mut session = service.start_session(&LevelId::new("A1")).await.unwrap();

        let tip = service.show_tip(&mut session).await.unwrap();
        assert_eq!(tip.as_deref(), Some("am / is / are"));
        assert!(session.is_tip_shown());
    }

    #[tokio::test]
    async fn summary_only_after_finish() {
        let service = service_with(&[("A1", 2)]);
        let mut session = service.start_session(&LevelId::new("A1")).await.unwrap();
        assert!(service.summarize(&session).unwrap().is_none());

        while !session.is_finished() {
            session.select_option("is").unwrap();
            session.check_answer();
            service.advance(&mut session);
        }

        let summary = service.summarize(&session).unwrap().unwrap();
        assert_eq!(summary.correct, 2);
        assert_eq!(summary.score.unwrap().percentage(), 100.0);
        assert!(summary.message.is_some());
    }

    #[tokio::test]
    async fn custom_category_and_batch_size_are_honored() {
        let repo = InMemoryRepository::new();
        repo.insert_exercises(LevelId::new("A1"), "Gaps", (0..10).map(record))
            .unwrap();
        let repo = Arc::new(repo);
        let settings = QuizSettingsDraft {
            batch_size: Some(4),
            category: Some("Gaps".into()),
            ..QuizSettingsDraft::default()
        }
        .validate()
        .unwrap();
        let service = QuizLoopService::new(fixed_clock(), repo.clone(), repo)
            .with_settings(settings)
            .with_seed(1);

        let session = service.start_session(&LevelId::new("A1")).await.unwrap();
        assert_eq!(session.total(), 4);
    }
}
