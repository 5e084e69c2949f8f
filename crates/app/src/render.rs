//! Plain-text projections of session state. Nothing here mutates a session.

use std::fmt::Write as _;

use chrono::Duration;
use quiz_core::model::{BatchExercise, ExerciseError, Feedback, LevelId};
use services::{CompletionSummary, ExerciseSession, SessionProgress};

const RULE: &str = "----------------------------------------";

pub const NO_SESSION: &str = "No level loaded. Type `levels` to list them or `l <level>` to start one.";

pub fn exercise_view(
    session: &ExerciseSession,
    exercise: &BatchExercise,
    category: &str,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Level: {} - {category}", session.level());
    let _ = writeln!(out, "Grammar type: {}", exercise.grammar_type());
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Complete the sentence:");
    let _ = writeln!(out, "    {}", exercise.prompt());
    let _ = writeln!(out);

    let selected = session.selected_option();
    for (position, option) in exercise.shuffled_options().iter().enumerate() {
        let marker = if selected == Some(option.as_str()) { '>' } else { ' ' };
        let _ = writeln!(out, "  {marker} {}) {option}", position + 1);
    }

    if let Some(line) = feedback_line(session.feedback()) {
        let _ = writeln!(out);
        let _ = writeln!(out, "{line}");
    }

    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "{}", progress_line(&session.progress()));
    let _ = writeln!(out, "{}", results_line(&session.progress()));
    let _ = write!(out, "{}", commands_line(session));
    out
}

/// Shown in place of an exercise whose options are malformed.
pub fn integrity_view(session: &ExerciseSession, error: &ExerciseError) -> String {
    format!(
        "Level: {}\nError: {error}. Check the exercise catalog.\n{}\n\
         Commands: [r] restart  [l <level>] change level  [q] quit",
        session.level(),
        progress_line(&session.progress()),
    )
}

/// Shown instead of exercises after a level change the catalog cannot serve.
pub fn blocked_view(reason: &str) -> String {
    format!(
        "Error: {reason}\nNo exercises are shown for this level.\n\
         Commands: [l <level>] change level  [levels]  [r] restart  [q] quit"
    )
}

fn feedback_line(feedback: &Feedback) -> Option<String> {
    match feedback {
        Feedback::Empty => None,
        Feedback::Tip { grammar_type, text } => Some(format!("Tip ({grammar_type}): {text}")),
        other => Some(format!("Feedback: {other}")),
    }
}

#[must_use]
pub fn progress_line(progress: &SessionProgress) -> String {
    let shown = (progress.position + 1).min(progress.total);
    format!(
        "Exercise {shown} of {} | Correct: {} | Incorrect: {}",
        progress.total, progress.correct, progress.incorrect
    )
}

#[must_use]
pub fn results_line(progress: &SessionProgress) -> String {
    if progress.answered() == 0 {
        return "Start answering to see your results!".to_owned();
    }
    let answered = progress.answered();
    format!(
        "Results so far: {} of {answered} correct",
        progress.correct
    )
}

/// Commands that make sense for the current state.
///
/// Check needs a selection, next needs a verified answer, and the tip is
/// hidden while shown.
#[must_use]
pub fn commands_line(session: &ExerciseSession) -> String {
    let mut commands = Vec::new();
    if session.is_finished() {
        commands.extend(["[r] restart", "[l <level>] change level", "[levels]", "[q] quit"]);
        return format!("Commands: {}", commands.join("  "));
    }
    if !session.is_answered() {
        commands.push("[1-4] select");
        if session.selected_option().is_some() {
            commands.push("[c] check");
        }
    }
    if !session.is_tip_shown() {
        commands.push("[t] tip");
    }
    if session.is_answered() {
        commands.push("[n] next");
    }
    commands.extend(["[r] restart", "[l <level>] change level", "[q] quit"]);
    format!("Commands: {}", commands.join("  "))
}

pub fn completion_view(summary: &CompletionSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Congratulations! You completed every exercise for level {}.",
        summary.level
    );
    match summary.score {
        Some(score) => {
            let _ = writeln!(out, "Final score: {score}");
            let _ = writeln!(
                out,
                "Correct: {} | Incorrect: {} | Total: {}",
                summary.correct, summary.incorrect, summary.total
            );
            if let Some(message) = &summary.message {
                let _ = writeln!(out, "{RULE}");
                let _ = writeln!(out, "Keep going!");
                let _ = writeln!(out, "{message}");
            }
        }
        None => {
            let _ = writeln!(out, "No exercises were answered at this level.");
        }
    }
    if let Some(elapsed) = summary.elapsed {
        let _ = writeln!(out, "Time: {}", format_elapsed(elapsed));
    }
    let _ = writeln!(out, "{RULE}");
    let _ = write!(
        out,
        "To continue, pick another level with `l <level>` or restart this one with `r`."
    );
    out
}

pub fn levels_view(levels: &[LevelId], current: Option<&LevelId>) -> String {
    if levels.is_empty() {
        return "The exercise catalog has no levels.".to_owned();
    }
    let listed: Vec<String> = levels
        .iter()
        .map(|level| {
            if Some(level) == current {
                format!("[{level}]")
            } else {
                level.to_string()
            }
        })
        .collect();
    format!("Levels: {}", listed.join(" "))
}

pub const HELP: &str = "\
1-4          select an option
c            check the selected answer
t            show a grammar tip
n            next exercise
r            restart this level with a new batch
l <level>    switch level
levels       list levels
q            quit";

fn format_elapsed(elapsed: Duration) -> String {
    let seconds = elapsed.num_seconds().max(0);
    let (minutes, seconds) = (seconds / 60, seconds % 60);
    if minutes > 0 {
        format!("{minutes}m {seconds:02}s")
    } else {
        format!("{seconds}s")
    }
}
