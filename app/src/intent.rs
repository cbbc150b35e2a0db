//! One line of user input turned into something the session can act on.

use thiserror::Error;
use todo_core::Filter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Submit the new-todo input, optionally replacing its text first.
    Add(Option<String>),
    Toggle(usize),
    ToggleAll,
    Delete(usize),
    Edit(usize),
    /// Replace the draft of the row being edited and commit it.
    Rename(String),
    Escape,
    Filter(Filter),
    ClearCompleted,
    Dismiss,
    List,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntentError {
    #[error("nothing to do")]
    Empty,
    #[error("unknown command `{0}`, try `help`")]
    Unknown(String),
    #[error("`{0}` needs a row number")]
    MissingIndex(&'static str),
    #[error("`{0}` is not a row number")]
    BadIndex(String),
    #[error("unknown filter `{0}`, expected all, active or completed")]
    BadFilter(String),
}

pub const HELP: &str = "\
commands:
  add [title]          submit a new todo (no title resubmits the input)
  toggle <n>           flip completion of row n
  toggle-all           complete everything, or reopen everything
  delete <n>           delete row n
  edit <n>             start renaming row n
  rename <title>       save the rename (empty title deletes)
  esc                  stop renaming
  filter <mode>        all | active | completed
  clear-completed      delete every completed todo
  dismiss              hide the error message
  list                 redraw
  quit";

impl Intent {
    pub fn parse(line: &str) -> Result<Self, IntentError> {
        let line = line.trim_start();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest),
            None => (line.trim_end(), ""),
        };

        match command {
            "" => Err(IntentError::Empty),
            "a" | "add" => Ok(Intent::Add((!rest.is_empty()).then(|| rest.to_string()))),
            "t" | "toggle" => index(rest, "toggle").map(Intent::Toggle),
            "ta" | "toggle-all" => Ok(Intent::ToggleAll),
            "d" | "rm" | "delete" => index(rest, "delete").map(Intent::Delete),
            "e" | "edit" => index(rest, "edit").map(Intent::Edit),
            "r" | "rename" => Ok(Intent::Rename(rest.to_string())),
            "esc" | "escape" => Ok(Intent::Escape),
            "f" | "filter" => filter(rest.trim()).map(Intent::Filter),
            "cc" | "clear-completed" => Ok(Intent::ClearCompleted),
            "x" | "dismiss" => Ok(Intent::Dismiss),
            "l" | "ls" | "list" => Ok(Intent::List),
            "h" | "?" | "help" => Ok(Intent::Help),
            "q" | "quit" | "exit" => Ok(Intent::Quit),
            other => Err(IntentError::Unknown(other.to_string())),
        }
    }
}

/// 1-based row number.
fn index(arg: &str, command: &'static str) -> Result<usize, IntentError> {
    let arg = arg.trim();
    if arg.is_empty() {
        return Err(IntentError::MissingIndex(command));
    }
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(IntentError::BadIndex(arg.to_string())),
    }
}

fn filter(arg: &str) -> Result<Filter, IntentError> {
    match arg.to_ascii_lowercase().as_str() {
        "" | "all" => Ok(Filter::All),
        "active" => Ok(Filter::Active),
        "completed" | "done" => Ok(Filter::Completed),
        _ => Err(IntentError::BadFilter(arg.to_string())),
    }
}
