//! Terminal host: maps typed intents onto the session triggers.

use quiz_core::model::LevelId;
use services::{
    AdvanceOutcome, CompletionSummary, ExerciseSession, QuizLoopService, SelectOutcome, SessionError,
};

use crate::input::Intent;
use crate::render;

const FINISHED_NOTICE: &str = "This level is complete. Restart with `r` or pick another level.";
const LOCKED_NOTICE: &str = "Answer already checked. Type `n` for the next exercise.";
const TIP_SHOWN_NOTICE: &str = "The tip is already shown.";
const UNCHECKED_NOTICE: &str = "Check your answer before moving on.";
const BLOCKED_NOTICE: &str = "Pick an available level with `l <level>` or restart with `r` to continue.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Owns the one active session of a terminal user.
pub struct QuizHost {
    service: QuizLoopService,
    session: Option<ExerciseSession>,
    summary: Option<CompletionSummary>,
    /// Set after a level change the data source cannot serve. Exercises stay
    /// hidden until a valid level change or restart; the session is kept.
    blocked: Option<String>,
    notice: Option<String>,
}

impl QuizHost {
    #[must_use]
    pub fn new(service: QuizLoopService) -> Self {
        Self {
            service,
            session: None,
            summary: None,
            blocked: None,
            notice: None,
        }
    }

    #[must_use]
    pub fn session(&self) -> Option<&ExerciseSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn is_blocked(&self) -> bool {
        self.blocked.is_some()
    }

    /// Load `level`, keeping the current session when the level is unchanged.
    ///
    /// # Errors
    ///
    /// Configuration errors block exercise display but keep the current
    /// session, so switching back to its level resumes it.
    pub async fn open_level(&mut self, level: &LevelId) -> Result<(), SessionError> {
        match self.service.ensure_level(&mut self.session, level).await {
            Ok(reinitialized) => {
                if reinitialized {
                    self.summary = None;
                }
                self.blocked = None;
                Ok(())
            }
            Err(err) => {
                if err.is_configuration() {
                    self.blocked = Some(err.to_string());
                }
                Err(err)
            }
        }
    }

    pub async fn handle(&mut self, intent: Intent) -> Flow {
        if intent == Intent::Quit {
            return Flow::Quit;
        }
        if let Err(err) = self.apply(intent).await {
            tracing::debug!(error = %err, "intent rejected");
            self.notice = Some(format!("Error: {err}"));
        }
        Flow::Continue
    }

    /// Show a message above the next screen.
    pub fn notify(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    async fn apply(&mut self, intent: Intent) -> Result<(), SessionError> {
        match intent {
            Intent::Quit => Ok(()),
            Intent::Help => {
                self.notify(render::HELP);
                Ok(())
            }
            Intent::ListLevels => {
                let levels = self.service.list_levels().await?;
                let current = self.session.as_ref().map(ExerciseSession::level);
                self.notice = Some(render::levels_view(&levels, current));
                Ok(())
            }
            Intent::ChangeLevel(level) => match self.open_level(&level).await {
                // Rendered by the blocked view.
                Err(err) if err.is_configuration() => Ok(()),
                other => other,
            },
            Intent::Restart => {
                let Some(session) = self.session.as_mut() else {
                    self.notice = Some(render::NO_SESSION.to_owned());
                    return Ok(());
                };
                self.service.restart(session).await?;
                self.summary = None;
                self.blocked = None;
                Ok(())
            }
            Intent::Select(position) => {
                let Some(session) =
                    active_session(&mut self.session, self.blocked.is_some(), &mut self.notice)
                else {
                    return Ok(());
                };
                let Some(option) = session
                    .current_checked()?
                    .shuffled_options()
                    .get(position)
                    .cloned()
                else {
                    return Ok(());
                };
                if session.select_option(&option)? == SelectOutcome::Locked {
                    self.notice = Some(LOCKED_NOTICE.to_owned());
                }
                Ok(())
            }
            Intent::Check => {
                let Some(session) =
                    active_session(&mut self.session, self.blocked.is_some(), &mut self.notice)
                else {
                    return Ok(());
                };
                session.current_checked()?;
                session.check_answer();
                Ok(())
            }
            Intent::Tip => {
                let Some(session) =
                    active_session(&mut self.session, self.blocked.is_some(), &mut self.notice)
                else {
                    return Ok(());
                };
                if session.is_tip_shown() {
                    self.notice = Some(TIP_SHOWN_NOTICE.to_owned());
                    return Ok(());
                }
                session.current_checked()?;
                self.service.show_tip(session).await?;
                Ok(())
            }
            Intent::Next => {
                let Some(session) =
                    active_session(&mut self.session, self.blocked.is_some(), &mut self.notice)
                else {
                    return Ok(());
                };
                if !session.is_answered() {
                    self.notice = Some(UNCHECKED_NOTICE.to_owned());
                    return Ok(());
                }
                if self.service.advance(session) == AdvanceOutcome::Completed {
                    self.summary = self.service.summarize(session)?;
                    tracing::info!(
                        level = %session.level(),
                        correct = session.correct_count(),
                        "level completed"
                    );
                }
                Ok(())
            }
        }
    }

    /// Render the current state, consuming any pending notice.
    pub fn screen(&mut self) -> String {
        let mut out = String::new();
        if let Some(notice) = self.notice.take() {
            out.push_str(&notice);
            out.push_str("\n\n");
        }

        if let Some(reason) = &self.blocked {
            out.push_str(&render::blocked_view(reason));
            return out;
        }

        let body = match &self.session {
            None => render::NO_SESSION.to_owned(),
            Some(session) if session.is_finished() => match &self.summary {
                Some(summary) => render::completion_view(summary),
                None => render::commands_line(session),
            },
            Some(session) => match session.current_checked() {
                Ok(exercise) => {
                    render::exercise_view(session, exercise, self.service.settings().category())
                }
                Err(SessionError::DataIntegrity(err)) => render::integrity_view(session, &err),
                Err(err) => format!("Error: {err}"),
            },
        };
        out.push_str(&body);
        out
    }
}

/// The in-progress session, or `None` after posting why there is none.
fn active_session<'a>(
    session: &'a mut Option<ExerciseSession>,
    blocked: bool,
    notice: &mut Option<String>,
) -> Option<&'a mut ExerciseSession> {
    if blocked {
        *notice = Some(BLOCKED_NOTICE.to_owned());
        return None;
    }
    match session.as_mut() {
        None => {
            *notice = Some(render::NO_SESSION.to_owned());
            None
        }
        Some(session) if session.is_finished() => {
            *notice = Some(FINISHED_NOTICE.to_owned());
            None
        }
        Some(session) => Some(session),
    }
}
