use rand::Rng;
use rand::seq::SliceRandom;

use quiz_core::model::{BatchExercise, DEFAULT_BATCH_SIZE, ExerciseRecord};

/// Selection result for a batch build.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchPlan {
    pub exercises: Vec<BatchExercise>,
    /// Size of the pool the batch was drawn from.
    pub pool_size: usize,
}

impl BatchPlan {
    #[must_use]
    pub fn total(&self) -> usize {
        self.exercises.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }
}

/// Draws a batch from an exercise pool.
///
/// Records are sampled without replacement in random order, and each sampled
/// record gets its own option permutation.
#[derive(Debug, Clone, Copy)]
pub struct BatchBuilder {
    batch_size: usize,
}

impl Default for BatchBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_BATCH_SIZE)
    }
}

impl BatchBuilder {
    #[must_use]
    pub fn new(batch_size: usize) -> Self {
        Self { batch_size }
    }

    /// Build a batch of `min(batch_size, pool.len())` exercises.
    pub fn build<R: Rng + ?Sized>(&self, pool: &[ExerciseRecord], rng: &mut R) -> BatchPlan {
        let take = self.batch_size.min(pool.len());

        let mut candidates: Vec<&ExerciseRecord> = pool.iter().collect();
        let (sampled, _) = candidates.partial_shuffle(rng, take);

        let exercises = sampled
            .iter()
            .map(|record| BatchExercise::shuffle_from((*record).clone(), rng))
            .collect();

        BatchPlan {
            exercises,
            pool_size: pool.len(),
        }
    }
}
