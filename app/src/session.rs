//! Glue between typed intents and the synchronizer.
//!
//! # Design
//! `Session` owns the synchronizer and the new-todo input text. It resolves
//! row numbers against the visible list, forwards intents, and consumes the
//! input-related effects itself. Whatever is left (`Send` and
//! `ScheduleErrorExpiry`) is I/O for the host loop.

use thiserror::Error;
use todo_core::{BannerTimer, Effect, ListSynchronizer, Outcome, Ticket};

use crate::intent::Intent;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("there is no row {0} in this view")]
    NoSuchRow(usize),
    #[error("nothing is being edited, use `edit <n>` first")]
    NotEditing,
    #[error("input is disabled while requests are in flight")]
    InputBusy,
}

/// What the host should do after an intent.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Reaction {
    pub effects: Vec<Effect>,
    pub show_help: bool,
    pub quit: bool,
}

impl Reaction {
    fn effects(effects: Vec<Effect>) -> Self {
        Self {
            effects,
            ..Self::default()
        }
    }
}

pub struct Session {
    sync: ListSynchronizer,
    input: String,
    input_focused: bool,
}

impl Session {
    pub fn new(sync: ListSynchronizer) -> Self {
        Self {
            sync,
            input: String::new(),
            input_focused: true,
        }
    }

    pub fn view(&self) -> &ListSynchronizer {
        &self.sync
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn input_focused(&self) -> bool {
        self.input_focused
    }

    pub fn start(&mut self) -> Vec<Effect> {
        let effects = self.sync.load();
        self.absorb(effects)
    }

    pub fn handle(&mut self, intent: Intent) -> Result<Reaction, SessionError> {
        let effects = match intent {
            Intent::Add(title) => {
                if self.sync.controls_disabled() {
                    return Err(SessionError::InputBusy);
                }
                if let Some(title) = title {
                    self.input = title;
                }
                self.sync.add(&self.input)
            }
            Intent::Toggle(n) => {
                let id = self.row_id(n)?;
                self.sync.toggle(id)
            }
            Intent::ToggleAll => self.sync.toggle_all(),
            Intent::Delete(n) => {
                let id = self.row_id(n)?;
                self.sync.delete(id)
            }
            Intent::Edit(n) => {
                let id = self.row_id(n)?;
                self.sync.begin_edit(id);
                // A loading row refuses the edit; focus stays on the input.
                if self.sync.editing().is_some() {
                    self.input_focused = false;
                }
                Vec::new()
            }
            Intent::Rename(title) => {
                if self.sync.editing().is_none() {
                    return Err(SessionError::NotEditing);
                }
                self.sync.set_edit_text(&title);
                self.input_focused = true;
                self.sync.commit_edit()
            }
            Intent::Escape => {
                self.sync.cancel_edit();
                self.input_focused = true;
                Vec::new()
            }
            Intent::Filter(filter) => {
                self.sync.set_filter(filter);
                Vec::new()
            }
            Intent::ClearCompleted => self.sync.clear_completed(),
            Intent::Dismiss => {
                self.sync.dismiss_error();
                Vec::new()
            }
            Intent::List => Vec::new(),
            Intent::Help => {
                return Ok(Reaction {
                    show_help: true,
                    ..Reaction::default()
                })
            }
            Intent::Quit => {
                return Ok(Reaction {
                    quit: true,
                    ..Reaction::default()
                })
            }
        };
        Ok(Reaction::effects(self.absorb(effects)))
    }

    pub fn settle(&mut self, ticket: Ticket, outcome: Outcome) -> Vec<Effect> {
        let effects = self.sync.settle(ticket, outcome);
        self.absorb(effects)
    }

    pub fn expire_error(&mut self, timer: BannerTimer) {
        self.sync.expire_error(timer);
    }

    fn row_id(&self, n: usize) -> Result<u64, SessionError> {
        self.sync
            .visible_todos()
            .get(n.wrapping_sub(1))
            .map(|todo| todo.id)
            .ok_or(SessionError::NoSuchRow(n))
    }

    fn absorb(&mut self, effects: Vec<Effect>) -> Vec<Effect> {
        effects
            .into_iter()
            .filter(|effect| match effect {
                Effect::ClearInput => {
                    self.input.clear();
                    false
                }
                Effect::FocusInput => {
                    self.input_focused = true;
                    false
                }
                _ => true,
            })
            .collect()
    }
}
