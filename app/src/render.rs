//! Plain-text rendering of the session.

use todo_core::{Filter, RowState, Todo};

use crate::session::Session;

const INPUT_PLACEHOLDER: &str = "What needs to be done?";

pub fn user_warning() -> String {
    [
        "todos",
        "",
        "No user id is configured, so there is no list to show.",
        "Pass --user-id <ID> or set TODO_USER_ID to a non-zero value.",
    ]
    .join("\n")
}

pub fn render(session: &Session) -> String {
    let view = session.view();
    let mut lines = vec!["todos".to_string()];

    let toggle_all = match (view.todos().is_empty(), view.all_completed()) {
        (true, _) => "   ",
        (false, true) => "(v)",
        (false, false) => "( )",
    };
    let input = if session.input().is_empty() {
        INPUT_PLACEHOLDER
    } else {
        session.input()
    };
    let prompt = if session.input_focused() { '>' } else { ':' };
    let mut header = format!("{toggle_all} {prompt} {input}");
    if view.controls_disabled() {
        header.push_str("  (busy)");
    }
    lines.push(header);

    if view.is_loading_list() {
        lines.push("    loading...".to_string());
    }

    for (n, todo) in view.visible_todos().into_iter().enumerate() {
        lines.push(row(Some(n + 1), todo, view.row_state(todo.id)));
    }
    if let Some(placeholder) = view.placeholder() {
        lines.push(row(None, placeholder, &RowState::Loading));
    }

    if !view.todos().is_empty() {
        lines.push(footer(view.active_count(), view.filter(), view.has_completed()));
    }

    if let Some(error) = view.error() {
        lines.push(format!("! {error}  (dismiss to hide)"));
    }
    lines.join("\n")
}

fn row(number: Option<usize>, todo: &Todo, state: &RowState) -> String {
    let number = number.map(|n| format!("{n:>3}")).unwrap_or_else(|| "   ".to_string());
    let check = if todo.completed { "[x]" } else { "[ ]" };
    match state {
        RowState::Idle => format!("{number} {check} {}", todo.title),
        RowState::Editing { draft } => format!("{number} {check} edit> {draft}"),
        RowState::Loading => format!("{number} {check} {}  ~ saving", todo.title),
    }
}

fn footer(active: usize, filter: Filter, has_completed: bool) -> String {
    let items = if active == 1 { "item" } else { "items" };
    let link = |label: &str, mode: Filter| {
        if filter == mode {
            format!("[{label}]")
        } else {
            label.to_string()
        }
    };
    let mut footer = format!(
        "{active} {items} left   {} {} {}",
        link("All", Filter::All),
        link("Active", Filter::Active),
        link("Completed", Filter::Completed),
    );
    if has_completed {
        footer.push_str("   clear-completed");
    }
    footer
}
