use async_trait::async_trait;
use quiz_core::model::{ExerciseRecord, GrammarTips, LevelId};
use std::path::Path;
use std::sync::Arc;

use crate::catalog::{CatalogIssue, ExerciseCatalog};
use crate::repository::{ExerciseRepository, GrammarTipRepository, StorageError};

/// Read-only repository over a JSON catalog file loaded once at startup.
#[derive(Clone)]
pub struct JsonCatalogRepository {
    catalog: Arc<ExerciseCatalog>,
}

impl JsonCatalogRepository {
    /// Read and parse the catalog at `path`.
    ///
    /// Records with the wrong option count or an answer that matches no option
    /// are kept, but logged.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the file cannot be read and
    /// `StorageError::Serialization` if it is not a valid catalog.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| StorageError::Io(format!("{}: {e}", path.display())))?;
        let catalog = parse_catalog(&raw)?;

        for issue in catalog.audit() {
            log_issue(path, &issue);
        }
        tracing::debug!(
            path = %path.display(),
            levels = catalog.levels.len(),
            tips = catalog.grammar_tips.len(),
            "loaded exercise catalog"
        );

        Ok(Self {
            catalog: Arc::new(catalog),
        })
    }

    #[must_use]
    pub fn catalog(&self) -> &ExerciseCatalog {
        &self.catalog
    }
}

/// Parse a catalog document.
///
/// # Errors
///
/// Returns `StorageError::Serialization` for malformed JSON.
pub fn parse_catalog(raw: &str) -> Result<ExerciseCatalog, StorageError> {
    serde_json::from_str(raw).map_err(|e| StorageError::Serialization(e.to_string()))
}

/// Write `catalog` as pretty-printed JSON, creating parent directories.
///
/// # Errors
///
/// Returns `StorageError::Serialization` or `StorageError::Io` on failure.
pub async fn save_catalog(path: impl AsRef<Path>, catalog: &ExerciseCatalog) -> Result<(), StorageError> {
    let path = path.as_ref();
    let body = serde_json::to_string_pretty(catalog)
        .map_err(|e| StorageError::Serialization(e.to_string()))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| StorageError::Io(format!("{}: {e}", parent.display())))?;
    }
    tokio::fs::write(path, body)
        .await
        .map_err(|e| StorageError::Io(format!("{}: {e}", path.display())))
}

fn log_issue(path: &Path, issue: &CatalogIssue) {
    match issue {
        CatalogIssue::WrongOptionCount {
            level,
            category,
            index,
            found,
        } => tracing::warn!(
            path = %path.display(),
            %level,
            category = category.as_str(),
            index,
            found,
            "exercise does not have four options"
        ),
        CatalogIssue::AnswerNotAmongOptions {
            level,
            category,
            index,
        } => tracing::warn!(
            path = %path.display(),
            %level,
            category = category.as_str(),
            index,
            "correct answer matches none of the options"
        ),
        CatalogIssue::DuplicateLevel { level, position } => tracing::warn!(
            path = %path.display(),
            %level,
            position,
            "level id repeats an earlier level and is unreachable"
        ),
    }
}

#[async_trait]
impl ExerciseRepository for JsonCatalogRepository {
    async fn list_levels(&self) -> Result<Vec<LevelId>, StorageError> {
        Ok(self.catalog.level_ids())
    }

    async fn list_exercises(
        &self,
        level: &LevelId,
        category: &str,
    ) -> Result<Vec<ExerciseRecord>, StorageError> {
        self.catalog.exercises(level, category).map(<[_]>::to_vec)
    }
}

#[async_trait]
impl GrammarTipRepository for JsonCatalogRepository {
    async fn grammar_tips(&self) -> Result<GrammarTips, StorageError> {
        Ok(self.catalog.grammar_tips.clone())
    }
}
