use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::model::score::Score;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageTier {
    High,
    Low,
}

impl MessageTier {
    #[must_use]
    pub fn for_score(score: Score, threshold: f64) -> Self {
        if score.meets(threshold) {
            Self::High
        } else {
            Self::Low
        }
    }
}

/// Encouragement shown on the completion screen, split by score tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotivationalMessages {
    pub high: Vec<String>,
    pub low: Vec<String>,
}

impl MotivationalMessages {
    #[must_use]
    pub fn new(
        high: impl IntoIterator<Item = impl Into<String>>,
        low: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            high: high.into_iter().map(Into::into).collect(),
            low: low.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn tier(&self, tier: MessageTier) -> &[String] {
        match tier {
            MessageTier::High => &self.high,
            MessageTier::Low => &self.low,
        }
    }

    /// Pick a message uniformly from the tier `score` falls into.
    ///
    /// Returns `None` only when that tier has no messages.
    pub fn pick<R: Rng + ?Sized>(&self, score: Score, threshold: f64, rng: &mut R) -> Option<&str> {
        self.tier(MessageTier::for_score(score, threshold))
            .choose(rng)
            .map(String::as_str)
    }
}

impl Default for MotivationalMessages {
    fn default() -> Self {
        Self::new(
            [
                "Fantastic job! Your dedication is truly paying off. Keep up the excellent work!",
                "Outstanding! You're making great progress and mastering these concepts. Celebrate your success!",
                "Brilliant! Your hard work shines through. The sky's the limit for your English skills!",
                "Exceptional performance! You're clearly committed to fluency. Keep pushing forward!",
            ],
            [
                "Every mistake is a lesson in disguise. Keep practicing, and you'll see amazing improvement!",
                "Don't give up! Learning a language is a journey, not a race. Your effort will lead to success.",
                "You're making progress, even if it feels slow. Consistency is key! Keep learning and growing.",
                "Stay positive! Challenges are opportunities to grow. Keep reviewing and challenging yourself. You've got this!",
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn seventy_percent_draws_from_high_set() {
        let messages = MotivationalMessages::default();
        let mut rng = StdRng::seed_from_u64(1);
        let score = Score::from_counts(7, 10).unwrap();

        for _ in 0..20 {
            let picked = messages.pick(score, 70.0, &mut rng).unwrap();
            assert!(messages.high.iter().any(|m| m == picked));
        }
    }

    #[test]
    fn sixty_percent_draws_from_low_set() {
        let messages = MotivationalMessages::default();
        let mut rng = StdRng::seed_from_u64(2);
        let score = Score::from_counts(6, 10).unwrap();

        for _ in 0..20 {
            let picked = messages.pick(score, 70.0, &mut rng).unwrap();
            assert!(messages.low.iter().any(|m| m == picked));
        }
    }

    #[test]
    fn empty_tier_yields_nothing() {
        let messages = MotivationalMessages::new(Vec::<String>::new(), ["keep going"]);
        let mut rng = StdRng::seed_from_u64(3);
        let score = Score::from_counts(10, 10).unwrap();
        assert_eq!(messages.pick(score, 70.0, &mut rng), None);
    }
}
