use async_trait::async_trait;
use quiz_core::model::{ExerciseRecord, GrammarTips, LevelId};
use std::path::Path;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::catalog::ExerciseCatalog;
use crate::json::JsonCatalogRepository;
use crate::sample::sample_catalog;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("level {0} not found")]
    LevelNotFound(LevelId),

    #[error("level {level} has no category {category:?}")]
    CategoryNotFound { level: LevelId, category: String },

    #[error("connection error: {0}")]
    Connection(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Read access to the exercise data source.
#[async_trait]
pub trait ExerciseRepository: Send + Sync {
    /// List level identifiers in display order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the data source cannot be read.
    async fn list_levels(&self) -> Result<Vec<LevelId>, StorageError>;

    /// Fetch every exercise stored under `category` for `level`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::LevelNotFound` or `StorageError::CategoryNotFound`
    /// when the lookup misses, or other storage errors.
    async fn list_exercises(
        &self,
        level: &LevelId,
        category: &str,
    ) -> Result<Vec<ExerciseRecord>, StorageError>;
}

/// Read access to the grammar tip mapping.
#[async_trait]
pub trait GrammarTipRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the data source cannot be read.
    async fn grammar_tips(&self) -> Result<GrammarTips, StorageError>;
}

/// Simple in-memory repository for tests and the built-in sample catalog.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    catalog: Arc<Mutex<ExerciseCatalog>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::from_catalog(ExerciseCatalog::new())
    }

    #[must_use]
    pub fn from_catalog(catalog: ExerciseCatalog) -> Self {
        Self {
            catalog: Arc::new(Mutex::new(catalog)),
        }
    }

    /// Add exercises under a level and category.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn insert_exercises(
        &self,
        level: LevelId,
        category: &str,
        records: impl IntoIterator<Item = ExerciseRecord>,
    ) -> Result<(), StorageError> {
        let mut guard = self
            .catalog
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert_exercises(level, category, records);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn insert_tip(&self, grammar_type: &str, tip: &str) -> Result<(), StorageError> {
        let mut guard = self
            .catalog
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.grammar_tips.insert(grammar_type, tip);
        Ok(())
    }
}

#[async_trait]
impl ExerciseRepository for InMemoryRepository {
    async fn list_levels(&self) -> Result<Vec<LevelId>, StorageError> {
        let guard = self
            .catalog
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.level_ids())
    }

    async fn list_exercises(
        &self,
        level: &LevelId,
        category: &str,
    ) -> Result<Vec<ExerciseRecord>, StorageError> {
        let guard = self
            .catalog
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.exercises(level, category).map(<[_]>::to_vec)
    }
}

#[async_trait]
impl GrammarTipRepository for InMemoryRepository {
    async fn grammar_tips(&self) -> Result<GrammarTips, StorageError> {
        let guard = self
            .catalog
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.grammar_tips.clone())
    }
}

/// Exercise and tip repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub exercises: Arc<dyn ExerciseRepository>,
    pub tips: Arc<dyn GrammarTipRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_repository(InMemoryRepository::new())
    }

    /// Storage over the built-in sample catalog.
    #[must_use]
    pub fn sample() -> Self {
        Self::from_repository(InMemoryRepository::from_catalog(sample_catalog()))
    }

    /// Load a JSON catalog file.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` or `StorageError::Serialization` when the
    /// file cannot be read or parsed.
    pub async fn json(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let repo = JsonCatalogRepository::load(path).await?;
        Ok(Self::from_repository(repo))
    }

    fn from_repository<R>(repo: R) -> Self
    where
        R: ExerciseRepository + GrammarTipRepository + Clone + 'static,
    {
        let exercises: Arc<dyn ExerciseRepository> = Arc::new(repo.clone());
        let tips: Arc<dyn GrammarTipRepository> = Arc::new(repo);
        Self { exercises, tips }
    }
}
