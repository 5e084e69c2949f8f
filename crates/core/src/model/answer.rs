/// Compare a chosen option with the expected answer.
///
/// Whitespace around the selection is ignored and letter case never matters.
/// The expected answer is used verbatim apart from case.
#[must_use]
pub fn answers_match(selected: &str, correct: &str) -> bool {
    selected.trim().to_lowercase() == correct.to_lowercase()
}
