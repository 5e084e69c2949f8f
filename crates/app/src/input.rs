//! Line commands typed at the quiz prompt.

use std::fmt;

use quiz_core::model::{LevelId, OPTIONS_PER_EXERCISE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Zero-based option position on screen.
    Select(usize),
    Check,
    Tip,
    Next,
    Restart,
    ChangeLevel(LevelId),
    ListLevels,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    Empty,
    MissingLevel,
    OptionOutOfRange(usize),
    Unknown(String),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::Empty => write!(f, "type a command, or h for help"),
            InputError::MissingLevel => write!(f, "l requires a level, e.g. `l A2`"),
            InputError::OptionOutOfRange(n) => {
                write!(f, "option {n} does not exist, pick 1-{OPTIONS_PER_EXERCISE}")
            }
            InputError::Unknown(raw) => write!(f, "unknown command: {raw}"),
        }
    }
}

impl std::error::Error for InputError {}

pub fn parse_intent(line: &str) -> Result<Intent, InputError> {
    let line = line.trim();
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Err(InputError::Empty);
    };

    if let Ok(number) = head.parse::<usize>() {
        if parts.next().is_some() {
            return Err(InputError::Unknown(line.to_owned()));
        }
        return match number {
            1..=OPTIONS_PER_EXERCISE => Ok(Intent::Select(number - 1)),
            _ => Err(InputError::OptionOutOfRange(number)),
        };
    }

    let intent = match head.to_lowercase().as_str() {
        "c" | "check" => Intent::Check,
        "t" | "tip" => Intent::Tip,
        "n" | "next" => Intent::Next,
        "r" | "restart" => Intent::Restart,
        "levels" => Intent::ListLevels,
        "h" | "help" | "?" => Intent::Help,
        "q" | "quit" | "exit" => Intent::Quit,
        "l" | "level" => {
            let level = parts.next().ok_or(InputError::MissingLevel)?;
            Intent::ChangeLevel(LevelId::new(level))
        }
        _ => return Err(InputError::Unknown(line.to_owned())),
    };

    if parts.next().is_some() {
        return Err(InputError::Unknown(line.to_owned()));
    }
    Ok(intent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_select_zero_based_options() {
        assert_eq!(parse_intent("1"), Ok(Intent::Select(0)));
        assert_eq!(parse_intent(" 4 "), Ok(Intent::Select(3)));
        assert_eq!(parse_intent("5"), Err(InputError::OptionOutOfRange(5)));
        assert_eq!(parse_intent("0"), Err(InputError::OptionOutOfRange(0)));
    }

    #[test]
    fn letter_commands() {
        assert_eq!(parse_intent("c"), Ok(Intent::Check));
        assert_eq!(parse_intent("T"), Ok(Intent::Tip));
        assert_eq!(parse_intent("next"), Ok(Intent::Next));
        assert_eq!(parse_intent("r"), Ok(Intent::Restart));
        assert_eq!(parse_intent("levels"), Ok(Intent::ListLevels));
        assert_eq!(parse_intent("q"), Ok(Intent::Quit));
    }

    #[test]
    fn level_change_needs_an_argument() {
        assert_eq!(
            parse_intent("l b1"),
            Ok(Intent::ChangeLevel(LevelId::new("b1")))
        );
        assert_eq!(parse_intent("l"), Err(InputError::MissingLevel));
    }

    #[test]
    fn rejects_blank_and_trailing_garbage() {
        assert_eq!(parse_intent("   "), Err(InputError::Empty));
        assert!(matches!(parse_intent("c now"), Err(InputError::Unknown(_))));
        assert!(matches!(parse_intent("xyz"), Err(InputError::Unknown(_))));
    }
}
