use chrono::Duration;
use rand::Rng;

use quiz_core::model::{LevelId, MotivationalMessages, Score};

use super::service::ExerciseSession;

/// Presentation-agnostic result of a finished batch.
///
/// No pre-formatted strings beyond the chosen motivational message; the host
/// decides how to show the score and elapsed time.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionSummary {
    pub level: LevelId,
    pub total: usize,
    pub correct: usize,
    pub incorrect: usize,
    /// `None` when the batch held no exercises.
    pub score: Option<Score>,
    pub message: Option<String>,
    pub elapsed: Option<Duration>,
}

impl CompletionSummary {
    /// Summarize `session` once it is finished; `None` while it is in progress.
    pub fn from_session<R: Rng + ?Sized>(
        session: &ExerciseSession,
        messages: &MotivationalMessages,
        high_score_threshold: f64,
        rng: &mut R,
    ) -> Option<Self> {
        if !session.is_finished() {
            return None;
        }

        let score = session.score();
        let message = score
            .and_then(|score| messages.pick(score, high_score_threshold, rng))
            .map(str::to_owned);

        Some(Self {
            level: session.level().clone(),
            total: session.total(),
            correct: session.correct_count(),
            incorrect: session.incorrect_count(),
            score,
            message,
            elapsed: session.elapsed(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{BatchExercise, ExerciseRecord};
    use quiz_core::time::fixed_now;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn finished_session(correct: usize, total: usize) -> ExerciseSession {
        let batch = (0..total)
            .map(|i| {
                BatchExercise::in_supplied_order(ExerciseRecord::new(
                    format!("Q{i} ___"),
                    "Articles",
                    ["a", "an", "the", "some"],
                    "a",
                ))
            })
            .collect();
        let mut session = ExerciseSession::from_batch(LevelId::new("A1"), batch, fixed_now()).unwrap();
        for i in 0..total {
            let pick = if i < correct { "a" } else { "the" };
            session.select_option(pick).unwrap();
            session.check_answer();
            session.advance(fixed_now());
        }
        session
    }

    #[test]
    fn in_progress_session_has_no_summary() {
        let batch = vec![BatchExercise::in_supplied_order(ExerciseRecord::new(
            "Q ___",
            "Articles",
            ["a", "an", "the", "some"],
            "a",
        ))];
        let session = ExerciseSession::from_batch(LevelId::new("A1"), batch, fixed_now()).unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        let summary =
            CompletionSummary::from_session(&session, &MotivationalMessages::default(), 70.0, &mut rng);
        assert!(summary.is_none());
    }

    #[test]
    fn seventy_percent_gets_high_message() {
        let session = finished_session(7, 10);
        let messages = MotivationalMessages::default();
        let mut rng = StdRng::seed_from_u64(9);

        let summary = CompletionSummary::from_session(&session, &messages, 70.0, &mut rng).unwrap();
        assert_eq!(summary.score.unwrap().percentage(), 70.0);
        assert_eq!(summary.correct, 7);
        assert_eq!(summary.incorrect, 3);
        let message = summary.message.unwrap();
        assert!(messages.high.contains(&message));
    }

    #[test]
    fn sixty_percent_gets_low_message() {
        let session = finished_session(6, 10);
        let messages = MotivationalMessages::default();
        let mut rng = StdRng::seed_from_u64(9);

        let summary = CompletionSummary::from_session(&session, &messages, 70.0, &mut rng).unwrap();
        assert_eq!(summary.score.unwrap().percentage(), 60.0);
        let message = summary.message.unwrap();
        assert!(messages.low.contains(&message));
    }
}
