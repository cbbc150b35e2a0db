//! Local list state reconciled with the outcomes of gateway calls.
//!
//! # Design
//! `ListSynchronizer` never performs I/O. Every user intent returns a list of
//! `Effect`s; `Effect::Send` carries a `Ticket` and a ready-to-execute
//! `HttpRequest`. The host runs the request and reports the outcome through
//! `settle`, in whatever order outcomes arrive. All state changes caused by
//! the network happen inside `settle`, so the host's event loop is the one
//! cooperative context that mutates the list.
//!
//! - Loading is tracked per id, so bulk operations and individual ones never
//!   share a single register.
//! - Editing and loading live in one `RowState` per todo.
//! - Entries are replaced wholesale by the server's representation.

mod banner;
mod row;


use std::collections::HashMap;

use tracing::{debug, warn};

use crate::client::TodoClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{Filter, Todo, PLACEHOLDER_ID};

pub use banner::{BannerTimer, ErrorBanner, ErrorMessage, ERROR_BANNER_TTL};
pub use row::RowState;

/// Identifies one in-flight request until it is settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(u64);

/// What the host must do on behalf of the synchronizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Execute `request` once and pass the outcome to `settle(ticket, ..)`.
    Send { ticket: Ticket, request: HttpRequest },
    /// Call `expire_error(timer)` after `ERROR_BANNER_TTL`.
    ScheduleErrorExpiry(BannerTimer),
    /// The new-todo input was persisted; clear its text.
    ClearInput,
    /// Put the cursor back into the new-todo input.
    FocusInput,
}

/// What the host observed for a request: a response of any status, or a
/// failure before a response existed.
pub type Outcome = Result<HttpResponse, ApiError>;

/// Continuation to run when a ticket settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Load,
    Add,
    Delete(u64),
    Update(u64),
    Rename(u64),
}

static IDLE: RowState = RowState::Idle;

pub struct ListSynchronizer {
    client: TodoClient,
    todos: Vec<Todo>,
    placeholder: Option<Todo>,
    adding: bool,
    loading_list: bool,
    rows: HashMap<u64, RowState>,
    filter: Filter,
    banner: ErrorBanner,
    pending: HashMap<Ticket, Pending>,
    next_ticket: u64,
}

impl ListSynchronizer {
    pub fn new(client: TodoClient) -> Self {
        Self {
            client,
            todos: Vec::new(),
            placeholder: None,
            adding: false,
            loading_list: false,
            rows: HashMap::new(),
            filter: Filter::default(),
            banner: ErrorBanner::default(),
            pending: HashMap::new(),
            next_ticket: 0,
        }
    }

    // -----------------------------------------------------------------------
    // Intents
    // -----------------------------------------------------------------------

    /// Fetch the full list. Called once when the client starts.
    pub fn load(&mut self) -> Vec<Effect> {
        self.loading_list = true;
        let request = self.client.build_list_todos();
        vec![self.dispatch(Pending::Load, request)]
    }

    pub fn add(&mut self, title: &str) -> Vec<Effect> {
        if self.adding {
            debug!("add ignored while another add is in flight");
            return Vec::new();
        }
        let title = title.trim();
        if title.is_empty() {
            return vec![self.show_error(ErrorMessage::EmptyTitle)];
        }
        let request = match self.client.build_create_todo(title, false) {
            Ok(request) => request,
            Err(err) => {
                warn!(%err, "could not build create request");
                return vec![self.show_error(ErrorMessage::AddFailed)];
            }
        };

        self.banner.clear();
        self.adding = true;
        self.placeholder = Some(Todo {
            id: PLACEHOLDER_ID,
            user_id: self.client.user_id().get(),
            title: title.to_string(),
            completed: false,
        });
        vec![self.dispatch(Pending::Add, request)]
    }

    pub fn delete(&mut self, id: u64) -> Vec<Effect> {
        if !self.begin_loading(id) {
            return Vec::new();
        }
        let request = self.client.build_delete_todo(id);
        vec![self.dispatch(Pending::Delete(id), request)]
    }

    /// One independent delete per todo that is completed right now. Each
    /// success removes only its own id.
    pub fn clear_completed(&mut self) -> Vec<Effect> {
        let ids: Vec<u64> = self
            .todos
            .iter()
            .filter(|todo| todo.completed)
            .map(|todo| todo.id)
            .collect();
        let mut effects = Vec::with_capacity(ids.len());
        for id in ids {
            effects.extend(self.delete(id));
        }
        effects
    }

    pub fn toggle(&mut self, id: u64) -> Vec<Effect> {
        let Some(todo) = self.find(id) else {
            debug!(id, "toggle of unknown todo ignored");
            return Vec::new();
        };
        let flipped = Todo {
            completed: !todo.completed,
            ..todo.clone()
        };
        self.send_update(Pending::Update(id), &flipped)
    }

    /// Mark everything active if all todos are completed, otherwise complete
    /// the ones still active.
    pub fn toggle_all(&mut self) -> Vec<Effect> {
        let target = !self.all_completed();
        let affected: Vec<Todo> = self
            .todos
            .iter()
            .filter(|todo| todo.completed != target)
            .map(|todo| Todo {
                completed: target,
                ..todo.clone()
            })
            .collect();
        let mut effects = Vec::with_capacity(affected.len());
        for todo in &affected {
            effects.extend(self.send_update(Pending::Update(todo.id), todo));
        }
        effects
    }

    /// Select a todo for renaming, seeding the draft with its trimmed title.
    pub fn begin_edit(&mut self, id: u64) {
        let Some(todo) = self.find(id) else {
            return;
        };
        if self.row_state(id).is_loading() {
            debug!(id, "edit of loading todo ignored");
            return;
        }
        let draft = todo.title.trim().to_string();
        self.cancel_edit();
        self.rows.insert(id, RowState::Editing { draft });
    }

    pub fn set_edit_text(&mut self, text: &str) {
        if let Some(RowState::Editing { draft }) = self.rows.values_mut().find(|state| state.is_editing()) {
            *draft = text.to_string();
        }
    }

    /// Leave edit mode without touching the server. Safe while requests for
    /// the row are still in flight.
    pub fn cancel_edit(&mut self) {
        self.rows.retain(|_, state| !state.is_editing());
    }

    pub fn commit_edit(&mut self) -> Vec<Effect> {
        let Some((id, draft)) = self.editing().map(|(id, draft)| (id, draft.trim().to_string())) else {
            return Vec::new();
        };
        self.cancel_edit();

        let Some(todo) = self.find(id) else {
            return Vec::new();
        };
        if todo.title.trim() == draft {
            return Vec::new();
        }
        let renamed = Todo {
            title: draft,
            ..todo.clone()
        };
        self.send_update(Pending::Rename(id), &renamed)
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    pub fn dismiss_error(&mut self) {
        self.banner.clear();
    }

    /// Host callback for `Effect::ScheduleErrorExpiry`.
    pub fn expire_error(&mut self, timer: BannerTimer) {
        if self.banner.expire(timer) {
            debug!("error banner expired");
        }
    }

    // -----------------------------------------------------------------------
    // Settlement
    // -----------------------------------------------------------------------

    /// Apply the continuation registered for `ticket`.
    pub fn settle(&mut self, ticket: Ticket, outcome: Outcome) -> Vec<Effect> {
        let Some(pending) = self.pending.remove(&ticket) else {
            warn!(?ticket, "settled a ticket that is not pending");
            return Vec::new();
        };
        match pending {
            Pending::Load => self.settle_load(outcome),
            Pending::Add => self.settle_add(outcome),
            Pending::Delete(id) => self.settle_delete(id, outcome),
            Pending::Update(id) => self.settle_update(id, outcome),
            Pending::Rename(id) => self.settle_rename(id, outcome),
        }
    }

    fn settle_load(&mut self, outcome: Outcome) -> Vec<Effect> {
        self.loading_list = false;
        match outcome.and_then(|response| self.client.parse_list_todos(response)) {
            Ok(todos) => {
                debug!(count = todos.len(), "todos loaded");
                self.todos = todos;
                Vec::new()
            }
            Err(err) => {
                warn!(%err, "unable to load todos");
                vec![self.show_error(ErrorMessage::LoadFailed)]
            }
        }
    }

    fn settle_add(&mut self, outcome: Outcome) -> Vec<Effect> {
        self.adding = false;
        self.placeholder = None;
        match outcome.and_then(|response| self.client.parse_create_todo(response)) {
            Ok(todo) => {
                debug!(id = todo.id, "todo created");
                self.upsert(todo);
                vec![Effect::ClearInput]
            }
            Err(err) => {
                warn!(%err, "unable to add a todo");
                vec![self.show_error(ErrorMessage::AddFailed), Effect::FocusInput]
            }
        }
    }

    fn settle_delete(&mut self, id: u64, outcome: Outcome) -> Vec<Effect> {
        self.rows.remove(&id);
        match outcome.and_then(|response| self.client.parse_delete_todo(response)) {
            Ok(()) => {
                debug!(id, "todo deleted");
                self.todos.retain(|todo| todo.id != id);
                Vec::new()
            }
            Err(err) => {
                warn!(id, %err, "unable to delete a todo");
                vec![self.show_error(ErrorMessage::DeleteFailed)]
            }
        }
    }

    fn settle_update(&mut self, id: u64, outcome: Outcome) -> Vec<Effect> {
        self.rows.remove(&id);
        match outcome.and_then(|response| self.client.parse_update_todo(response)) {
            Ok(updated) => {
                self.replace(id, updated);
                Vec::new()
            }
            Err(err) => {
                warn!(id, %err, "unable to update a todo");
                vec![self.show_error(ErrorMessage::UpdateFailed)]
            }
        }
    }

    fn settle_rename(&mut self, id: u64, outcome: Outcome) -> Vec<Effect> {
        self.rows.remove(&id);
        match outcome.and_then(|response| self.client.parse_update_todo(response)) {
            Ok(updated) if updated.title.trim().is_empty() => {
                debug!(id = updated.id, "renamed to empty title, deleting");
                self.delete(updated.id)
            }
            Ok(updated) => {
                self.replace(id, updated);
                Vec::new()
            }
            Err(err) => {
                warn!(id, %err, "unable to rename a todo");
                vec![self.show_error(ErrorMessage::UpdateFailed)]
            }
        }
    }

    // -----------------------------------------------------------------------
    // Derived views
    // -----------------------------------------------------------------------

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    /// Todos passing the active filter, recomputed on every call.
    pub fn visible_todos(&self) -> Vec<&Todo> {
        self.todos.iter().filter(|todo| self.filter.matches(todo)).collect()
    }

    pub fn placeholder(&self) -> Option<&Todo> {
        self.placeholder.as_ref()
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn error(&self) -> Option<ErrorMessage> {
        self.banner.current()
    }

    pub fn row_state(&self, id: u64) -> &RowState {
        self.rows.get(&id).unwrap_or(&IDLE)
    }

    /// The todo being edited and its current draft.
    pub fn editing(&self) -> Option<(u64, &str)> {
        self.rows
            .iter()
            .find_map(|(id, state)| state.draft().map(|draft| (*id, draft)))
    }

    pub fn active_count(&self) -> usize {
        self.todos.iter().filter(|todo| !todo.completed).count()
    }

    pub fn completed_count(&self) -> usize {
        self.todos.len() - self.active_count()
    }

    /// False for an empty list.
    pub fn all_completed(&self) -> bool {
        !self.todos.is_empty() && self.todos.iter().all(|todo| todo.completed)
    }

    pub fn has_completed(&self) -> bool {
        self.todos.iter().any(|todo| todo.completed)
    }

    pub fn is_adding(&self) -> bool {
        self.adding
    }

    pub fn is_loading_list(&self) -> bool {
        self.loading_list
    }

    /// Whether the new-todo input should refuse input.
    pub fn controls_disabled(&self) -> bool {
        self.loading_list || self.adding || self.rows.values().any(RowState::is_loading)
    }

    pub fn pending_requests(&self) -> usize {
        self.pending.len()
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn dispatch(&mut self, pending: Pending, request: HttpRequest) -> Effect {
        self.next_ticket += 1;
        let ticket = Ticket(self.next_ticket);
        debug!(?ticket, method = %request.method, path = %request.path, "dispatching request");
        self.pending.insert(ticket, pending);
        Effect::Send { ticket, request }
    }

    fn show_error(&mut self, message: ErrorMessage) -> Effect {
        Effect::ScheduleErrorExpiry(self.banner.show(message))
    }

    fn find(&self, id: u64) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    /// Mark `id` loading. Refuses unknown ids and rows already loading.
    fn begin_loading(&mut self, id: u64) -> bool {
        if self.find(id).is_none() {
            debug!(id, "request for unknown todo ignored");
            return false;
        }
        if self.row_state(id).is_loading() {
            debug!(id, "todo already has a request in flight");
            return false;
        }
        self.rows.insert(id, RowState::Loading);
        true
    }

    fn send_update(&mut self, pending: Pending, todo: &Todo) -> Vec<Effect> {
        if !self.begin_loading(todo.id) {
            return Vec::new();
        }
        match self.client.build_update_todo(todo) {
            Ok(request) => vec![self.dispatch(pending, request)],
            Err(err) => {
                warn!(id = todo.id, %err, "could not build update request");
                self.rows.remove(&todo.id);
                vec![self.show_error(ErrorMessage::UpdateFailed)]
            }
        }
    }

    /// Swap the entry for `id` with the server's version. A todo deleted in
    /// the meantime stays deleted.
    fn replace(&mut self, id: u64, updated: Todo) {
        if let Some(slot) = self.todos.iter_mut().find(|todo| todo.id == id) {
            *slot = updated;
        }
    }

    fn upsert(&mut self, todo: Todo) {
        match self.todos.iter_mut().find(|existing| existing.id == todo.id) {
            Some(slot) => *slot = todo,
            None => self.todos.push(todo),
        }
    }
}
