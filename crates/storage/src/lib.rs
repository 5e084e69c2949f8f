#![forbid(unsafe_code)]

pub mod catalog;
pub mod json;
pub mod repository;
pub mod sample;

pub use catalog::{CatalogIssue, CatalogLevel, ExerciseCatalog};
pub use repository::{ExerciseRepository, GrammarTipRepository, InMemoryRepository, Storage, StorageError};
