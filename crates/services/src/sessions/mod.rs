mod plan;
mod progress;
mod queries;
mod registry;
mod service;
mod summary;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use plan::{BatchBuilder, BatchPlan};
pub use progress::SessionProgress;
pub use registry::SessionRegistry;
pub use service::{AdvanceOutcome, CheckOutcome, ExerciseSession, SelectOutcome};
pub use summary::CompletionSummary;
pub use workflow::QuizLoopService;
