//! Keyboard chords and the editor actions they trigger.

use super::markup::Markup;
use std::fmt;
use std::str::FromStr;

/// An editor action reachable from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    NewNote,
    Save,
    FocusSearch,
    ClearFilters,
    Format(Markup),
}

/// Which field has keyboard focus when a chord is pressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    Content,
    Search,
    #[default]
    Other,
}

/// A parsed key chord such as `ctrl+s` or `escape`.
///
/// `ctrl`, `cmd` and `meta` are interchangeable as the command modifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyChord {
    command: bool,
    key: String,
}

/// Error returned when parsing an invalid chord string.
#[derive(Debug, Clone)]
pub struct ParseChordError(String);

impl fmt::Display for ParseChordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseChordError {}

impl FromStr for KeyChord {
    type Err = ParseChordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        let mut parts: Vec<&str> = normalized.split('+').map(str::trim).collect();
        let key = match parts.pop() {
            Some(key) if !key.is_empty() => key.to_string(),
            _ => return Err(ParseChordError(format!("invalid key chord '{}'", s))),
        };

        let mut command = false;
        for modifier in parts {
            match modifier {
                "ctrl" | "control" | "cmd" | "meta" | "super" => command = true,
                other => {
                    return Err(ParseChordError(format!(
                        "unknown modifier '{}' in '{}'",
                        other, s
                    )));
                }
            }
        }

        let key = match key.as_str() {
            "esc" => "escape".to_string(),
            _ => key,
        };

        Ok(Self { command, key })
    }
}

impl KeyChord {
    /// Resolves the chord to an action given the focused field.
    ///
    /// Formatting chords only apply while the content field is focused;
    /// escape only clears the search term and category filter while the
    /// search field is focused.
    pub fn action(&self, focus: Focus) -> Option<Action> {
        if !self.command {
            return match (self.key.as_str(), focus) {
                ("escape", Focus::Search) => Some(Action::ClearFilters),
                _ => None,
            };
        }

        match (self.key.as_str(), focus) {
            ("n", _) => Some(Action::NewNote),
            ("s", _) => Some(Action::Save),
            ("f", _) => Some(Action::FocusSearch),
            ("b", Focus::Content) => Some(Action::Format(Markup::Bold)),
            ("i", Focus::Content) => Some(Action::Format(Markup::Italic)),
            ("u", Focus::Content) => Some(Action::Format(Markup::Underline)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chord(s: &str) -> KeyChord {
        s.parse().unwrap()
    }

    #[test]
    fn command_chords_resolve_anywhere() {
        assert_eq!(chord("ctrl+n").action(Focus::Other), Some(Action::NewNote));
        assert_eq!(chord("Cmd+S").action(Focus::Content), Some(Action::Save));
        assert_eq!(chord("meta + f").action(Focus::Search), Some(Action::FocusSearch));
    }

    #[test]
    fn formatting_requires_content_focus() {
        assert_eq!(
            chord("ctrl+b").action(Focus::Content),
            Some(Action::Format(Markup::Bold))
        );
        assert_eq!(chord("ctrl+b").action(Focus::Other), None);
        assert_eq!(
            chord("ctrl+u").action(Focus::Content),
            Some(Action::Format(Markup::Underline))
        );
    }

    #[test]
    fn escape_clears_only_from_search() {
        assert_eq!(chord("esc").action(Focus::Search), Some(Action::ClearFilters));
        assert_eq!(chord("escape").action(Focus::Content), None);
    }

    #[test]
    fn plain_letters_do_nothing() {
        assert_eq!(chord("s").action(Focus::Content), None);
    }

    #[test]
    fn unknown_modifier_is_rejected() {
        let err = "hyper+s".parse::<KeyChord>().unwrap_err();
        assert!(err.to_string().contains("unknown modifier 'hyper'"));
    }

    #[test]
    fn empty_chord_is_rejected() {
        assert!("ctrl+".parse::<KeyChord>().is_err());
        assert!("".parse::<KeyChord>().is_err());
    }
}
