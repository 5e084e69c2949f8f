use quiz_core::model::{ExerciseRecord, GrammarTips, LevelId, OPTIONS_PER_EXERCISE};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::repository::StorageError;

/// Exercises for one level, grouped by category name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogLevel {
    pub id: LevelId,
    #[serde(default)]
    pub categories: BTreeMap<String, Vec<ExerciseRecord>>,
}

/// Whole exercise data source: ordered levels plus the grammar tip mapping.
///
/// Level order is preserved as given; it is the order offered to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseCatalog {
    #[serde(default)]
    pub levels: Vec<CatalogLevel>,
    #[serde(default)]
    pub grammar_tips: GrammarTips,
}

/// Catalog content that will not display or score as expected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogIssue {
    /// A level whose id was already used; lookups only reach the first one.
    DuplicateLevel {
        level: LevelId,
        position: usize,
    },
    WrongOptionCount {
        level: LevelId,
        category: String,
        index: usize,
        found: usize,
    },
    AnswerNotAmongOptions {
        level: LevelId,
        category: String,
        index: usize,
    },
}

impl ExerciseCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn level_ids(&self) -> Vec<LevelId> {
        self.levels.iter().map(|level| level.id.clone()).collect()
    }

    #[must_use]
    pub fn level(&self, id: &LevelId) -> Option<&CatalogLevel> {
        self.levels.iter().find(|level| &level.id == id)
    }

    /// Exercises stored under `category` for `level`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::LevelNotFound` for an unknown level and
    /// `StorageError::CategoryNotFound` when the level lacks the category.
    pub fn exercises(&self, level: &LevelId, category: &str) -> Result<&[ExerciseRecord], StorageError> {
        let found = self
            .level(level)
            .ok_or_else(|| StorageError::LevelNotFound(level.clone()))?;
        found
            .categories
            .get(category)
            .map(Vec::as_slice)
            .ok_or_else(|| StorageError::CategoryNotFound {
                level: level.clone(),
                category: category.to_owned(),
            })
    }

    /// Append records to a level's category, creating both when missing.
    pub fn insert_exercises(
        &mut self,
        level: LevelId,
        category: impl Into<String>,
        records: impl IntoIterator<Item = ExerciseRecord>,
    ) {
        let index = match self.levels.iter().position(|l| l.id == level) {
            Some(index) => index,
            None => {
                self.levels.push(CatalogLevel {
                    id: level,
                    categories: BTreeMap::new(),
                });
                self.levels.len() - 1
            }
        };
        self.levels[index]
            .categories
            .entry(category.into())
            .or_default()
            .extend(records);
    }

    /// Scan every record for shape problems without rejecting anything.
    #[must_use]
    pub fn audit(&self) -> Vec<CatalogIssue> {
        let mut issues = Vec::new();
        let mut seen = HashSet::new();
        for (position, level) in self.levels.iter().enumerate() {
            if !seen.insert(&level.id) {
                issues.push(CatalogIssue::DuplicateLevel {
                    level: level.id.clone(),
                    position,
                });
            }
            for (category, records) in &level.categories {
                for (index, record) in records.iter().enumerate() {
                    if record.options.len() != OPTIONS_PER_EXERCISE {
                        issues.push(CatalogIssue::WrongOptionCount {
                            level: level.id.clone(),
                            category: category.clone(),
                            index,
                            found: record.options.len(),
                        });
                    }
                    if !record.has_matching_option() {
                        issues.push(CatalogIssue::AnswerNotAmongOptions {
                            level: level.id.clone(),
                            category: category.clone(),
                            index,
                        });
                    }
                }
            }
        }
        issues
    }
}
