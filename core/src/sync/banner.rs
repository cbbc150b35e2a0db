//! Transient error banner with cancellable expiry.
//!
//! # Design
//! Every `show` bumps a generation counter and hands back a `BannerTimer`
//! stamped with it. The host sleeps for `ERROR_BANNER_TTL` and calls
//! `expire` with that timer; a stale timer (one issued before a newer
//! message) is a no-op, so each new message gets its own full window.

use std::fmt;
use std::time::Duration;

/// How long a message stays visible without a newer one replacing it.
pub const ERROR_BANNER_TTL: Duration = Duration::from_millis(3000);

/// The fixed set of user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorMessage {
    LoadFailed,
    EmptyTitle,
    AddFailed,
    DeleteFailed,
    UpdateFailed,
}

impl ErrorMessage {
    pub fn text(self) -> &'static str {
        match self {
            ErrorMessage::LoadFailed => "Unable to load todos",
            ErrorMessage::EmptyTitle => "Title should not be empty",
            ErrorMessage::AddFailed => "Unable to add a todo",
            ErrorMessage::DeleteFailed => "Unable to delete a todo",
            ErrorMessage::UpdateFailed => "Unable to update a todo",
        }
    }
}

impl fmt::Display for ErrorMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Handle for one scheduled expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BannerTimer(u64);

#[derive(Debug, Default)]
pub struct ErrorBanner {
    current: Option<ErrorMessage>,
    generation: u64,
}

impl ErrorBanner {
    pub fn current(&self) -> Option<ErrorMessage> {
        self.current
    }

    /// Replace the visible message. Timers handed out earlier go stale.
    pub fn show(&mut self, message: ErrorMessage) -> BannerTimer {
        self.generation += 1;
        self.current = Some(message);
        BannerTimer(self.generation)
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Clear the message if `timer` is still the latest one. Returns whether
    /// anything was cleared.
    pub fn expire(&mut self, timer: BannerTimer) -> bool {
        if timer.0 != self.generation || self.current.is_none() {
            return false;
        }
        self.current = None;
        true
    }
}
