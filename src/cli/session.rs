use std::str::FromStr;

use tracing::{debug, warn};

use crate::model::store::TodoStore;
use crate::model::todo::{ParseModeError, TodoId, ViewMode};

/// Error type for session commands
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("{0} needs an argument")]
    MissingArgument(&'static str),
    #[error("invalid id: {0}")]
    InvalidId(String),
    #[error(transparent)]
    InvalidMode(#[from] ParseModeError),
    #[error("{action} is disabled: {reason}")]
    Disabled {
        action: &'static str,
        reason: &'static str,
    },
}

/// One line of session input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Add { text: String, done: bool },
    Toggle(TodoId),
    Remove(TodoId),
    Mode(ViewMode),
    Search(String),
    CompleteAll,
    RemoveAll,
    List,
    Status,
}

impl Action {
    /// Parse a session line. Blank lines and `#` comments yield `Ok(None)`.
    pub fn parse_line(line: &str) -> Result<Option<Action>, SessionError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        line.parse().map(Some)
    }
}

impl FromStr for Action {
    type Err = SessionError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((w, r)) => (w, r.trim()),
            None => (line, ""),
        };

        match word {
            "add" | "a" => {
                let (text, done) = match rest.strip_prefix("--done") {
                    Some(t) if t.is_empty() || t.starts_with(char::is_whitespace) => {
                        (t.trim(), true)
                    }
                    _ => (rest, false),
                };
                Ok(Action::Add {
                    text: text.to_string(),
                    done,
                })
            }
            "toggle" | "t" => Ok(Action::Toggle(parse_id("toggle", rest)?)),
            "rm" | "remove" => Ok(Action::Remove(parse_id("rm", rest)?)),
            "mode" => {
                if rest.is_empty() {
                    return Err(SessionError::MissingArgument("mode"));
                }
                Ok(Action::Mode(rest.parse()?))
            }
            "search" | "s" => Ok(Action::Search(rest.to_string())),
            "complete-all" => Ok(Action::CompleteAll),
            "remove-all" => Ok(Action::RemoveAll),
            "list" | "ls" => Ok(Action::List),
            "status" => Ok(Action::Status),
            other => Err(SessionError::UnknownCommand(other.to_string())),
        }
    }
}

fn parse_id(command: &'static str, arg: &str) -> Result<TodoId, SessionError> {
    if arg.is_empty() {
        return Err(SessionError::MissingArgument(command));
    }
    arg.parse()
        .map_err(|_| SessionError::InvalidId(arg.to_string()))
}

/// What applying an action did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Created(TodoId),
    Toggled { id: TodoId, done: bool },
    Removed(TodoId),
    /// `toggle`/`rm` named an id that is not in the list
    Missing(TodoId),
    ModeChanged(ViewMode),
    SearchChanged(String),
    Completed(usize),
    RemovedVisible(usize),
    Show,
    Status,
}

impl Outcome {
    /// Whether the visible list should be shown again after this outcome.
    pub fn shows_view(&self) -> bool {
        !matches!(self, Outcome::Status | Outcome::Missing(_))
    }

    /// Short confirmation line for interactive use
    pub fn message(&self) -> Option<String> {
        match self {
            Outcome::Created(id) => Some(format!("added {}", id)),
            Outcome::Toggled { id, done: true } => Some(format!("done {}", id)),
            Outcome::Toggled { id, done: false } => Some(format!("reopened {}", id)),
            Outcome::Removed(id) => Some(format!("removed {}", id)),
            Outcome::Missing(id) => Some(format!("no item with id {}", id)),
            Outcome::ModeChanged(mode) => Some(format!("mode: {}", mode)),
            Outcome::SearchChanged(text) => Some(format!("search: {:?}", text)),
            Outcome::Completed(n) => Some(format!("completed {}", n)),
            Outcome::RemovedVisible(n) => Some(format!("removed {}", n)),
            Outcome::Show | Outcome::Status => None,
        }
    }
}

/// Drives a [`TodoStore`] from parsed actions.
///
/// The store accepts every operation; the session is where the input
/// guards live: no empty items, no completing a list that is already
/// complete, no clearing an empty list.
#[derive(Debug, Default)]
pub struct Session {
    store: TodoStore,
}

impl Session {
    pub fn new(store: TodoStore) -> Self {
        Session { store }
    }

    pub fn store(&self) -> &TodoStore {
        &self.store
    }

    pub fn into_store(self) -> TodoStore {
        self.store
    }

    pub fn apply(&mut self, action: Action) -> Result<Outcome, SessionError> {
        debug!(?action, "apply");
        match action {
            Action::Add { text, done } => {
                if !self.store.can_create(&text) {
                    return Err(disabled("add", "text is empty"));
                }
                Ok(Outcome::Created(self.store.create_with(text, done)))
            }
            Action::Toggle(id) => Ok(match self.store.toggle(id) {
                Some(done) => Outcome::Toggled { id, done },
                None => Outcome::Missing(id),
            }),
            Action::Remove(id) => Ok(if self.store.remove(id) {
                Outcome::Removed(id)
            } else {
                Outcome::Missing(id)
            }),
            Action::Mode(mode) => {
                self.store.set_mode(mode);
                Ok(Outcome::ModeChanged(mode))
            }
            Action::Search(text) => {
                self.store.set_search_text(text.clone());
                Ok(Outcome::SearchChanged(text))
            }
            Action::CompleteAll => {
                if !self.store.can_complete_all_visible() {
                    return Err(disabled("complete-all", "every visible item is already done"));
                }
                Ok(Outcome::Completed(self.store.complete_all_visible()))
            }
            Action::RemoveAll => {
                if !self.store.can_remove_all_visible() {
                    return Err(disabled("remove-all", "nothing is listed"));
                }
                Ok(Outcome::RemovedVisible(self.store.remove_all_visible()))
            }
            Action::List => Ok(Outcome::Show),
            Action::Status => Ok(Outcome::Status),
        }
    }

    /// Parse and apply one line. Blank lines and comments yield `Ok(None)`.
    pub fn apply_line(&mut self, line: &str) -> Result<Option<Outcome>, SessionError> {
        match Action::parse_line(line)? {
            Some(action) => self.apply(action).map(Some),
            None => Ok(None),
        }
    }
}

fn disabled(action: &'static str, reason: &'static str) -> SessionError {
    warn!(action, reason, "action disabled");
    SessionError::Disabled { action, reason }
}
