use quiz_core::model::{ExerciseRecord, GrammarTips, LevelId};
use storage::{ExerciseRepository, GrammarTipRepository};

use crate::error::SessionError;

/// Storage-backed lookups used by the workflow.
pub(crate) struct SessionQueries;

impl SessionQueries {
    /// Load the exercise pool for `level`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::UnknownLevel` or `SessionError::MissingCategory`
    /// when the lookup misses, `SessionError::Empty` when the category holds
    /// no exercises, and `SessionError::Storage` for other failures.
    pub async fn load_pool(
        exercises: &dyn ExerciseRepository,
        level: &LevelId,
        category: &str,
    ) -> Result<Vec<ExerciseRecord>, SessionError> {
        let pool = exercises.list_exercises(level, category).await?;
        if pool.is_empty() {
            tracing::warn!(%level, category, "exercise category is empty");
            return Err(SessionError::Empty(level.clone()));
        }
        Ok(pool)
    }

    /// # Errors
    ///
    /// Returns `SessionError::Storage` when the tip source cannot be read.
    pub async fn load_tips(tips: &dyn GrammarTipRepository) -> Result<GrammarTips, SessionError> {
        Ok(tips.grammar_tips().await?)
    }

    /// # Errors
    ///
    /// Returns `SessionError::Storage` when the data source cannot be read.
    pub async fn list_levels(exercises: &dyn ExerciseRepository) -> Result<Vec<LevelId>, SessionError> {
        Ok(exercises.list_levels().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::InMemoryRepository;

    #[tokio::test]
    async fn empty_category_is_a_configuration_error() {
        let repo = InMemoryRepository::new();
        repo.insert_exercises(LevelId::new("C1"), "Completar Frases", Vec::<ExerciseRecord>::new())
            .unwrap();

        let err = SessionQueries::load_pool(&repo, &LevelId::new("C1"), "Completar Frases")
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::Empty(_)));
        assert!(err.is_configuration());
    }

    #[tokio::test]
    async fn missing_level_maps_to_unknown_level() {
        let repo = InMemoryRepository::new();
        let err = SessionQueries::load_pool(&repo, &LevelId::new("A1"), "Completar Frases")
            .await
            .unwrap_err();
        assert!(matches!(err, SessionError::UnknownLevel(_)));
    }

    struct Unreachable;

    #[async_trait::async_trait]
    impl GrammarTipRepository for Unreachable {
        async fn grammar_tips(&self) -> Result<GrammarTips, storage::StorageError> {
            Err(storage::StorageError::Io("catalog offline".into()))
        }
    }

    #[tokio::test]
    async fn tip_source_failure_is_not_a_configuration_error() {
        let err = SessionQueries::load_tips(&Unreachable).await.unwrap_err();
        assert!(matches!(err, SessionError::Storage(_)));
        assert!(!err.is_configuration());
    }
}
