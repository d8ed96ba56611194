use serde::Serialize;

use crate::model::store::TodoStore;
use crate::model::todo::{Todo, TodoId, ViewMode};
use crate::util::unicode::{display_width, single_line, truncate_to_width};

/// Shown in place of the list when nothing is visible
pub const EMPTY_LIST: &str = "nothing here :(";

/// How views are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputOptions {
    pub json: bool,
    /// Maximum item text width in terminal cells; 0 disables truncation.
    pub width: usize,
}

impl Default for OutputOptions {
    fn default() -> Self {
        OutputOptions {
            json: false,
            width: 60,
        }
    }
}

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TodoJson<'a> {
    pub id: TodoId,
    pub text: &'a str,
    pub done: bool,
}

#[derive(Serialize)]
pub struct ViewJson<'a> {
    pub mode: ViewMode,
    pub search: &'a str,
    pub total: usize,
    pub items: Vec<TodoJson<'a>>,
}

#[derive(Serialize)]
pub struct StatusJson<'a> {
    pub mode: ViewMode,
    pub search: &'a str,
    pub total: usize,
    pub visible: usize,
    pub done_visible: usize,
    pub can_complete_all: bool,
    pub can_remove_all: bool,
}

pub fn todo_to_json(todo: &Todo) -> TodoJson<'_> {
    TodoJson {
        id: todo.id,
        text: &todo.text,
        done: todo.done,
    }
}

pub fn view_to_json(store: &TodoStore) -> ViewJson<'_> {
    ViewJson {
        mode: store.mode(),
        search: store.search_text(),
        total: store.len(),
        items: store.visible_list().into_iter().map(todo_to_json).collect(),
    }
}

pub fn status_to_json(store: &TodoStore) -> StatusJson<'_> {
    let summary = store.summary();
    StatusJson {
        mode: store.mode(),
        search: store.search_text(),
        total: summary.total,
        visible: summary.visible,
        done_visible: summary.done_visible,
        can_complete_all: summary.can_complete_all(),
        can_remove_all: summary.can_remove_all(),
    }
}

// ---------------------------------------------------------------------------
// Text rendering
// ---------------------------------------------------------------------------

/// `[x] 12  text` per visible item, then the count line. Ids are
/// right-aligned to the widest visible id.
pub fn render_view(store: &TodoStore, width: usize) -> String {
    let visible = store.visible_list();
    let mut lines = Vec::with_capacity(visible.len() + 1);

    if visible.is_empty() {
        lines.push(EMPTY_LIST.to_string());
    } else {
        let id_width = visible
            .iter()
            .map(|t| display_width(&t.id.to_string()))
            .max()
            .unwrap_or(1);
        for todo in &visible {
            lines.push(format!(
                "[{}] {:>id_width$}  {}",
                todo.checkbox_char(),
                todo.id,
                item_text(&todo.text, width),
            ));
        }
    }

    lines.push(count_line(store.len(), visible.len()));
    lines.join("\n")
}

pub fn render_status(store: &TodoStore) -> String {
    let summary = store.summary();
    let mut out = format!("mode: {}", store.mode());
    if store.mode() == ViewMode::Search {
        out.push_str(&format!("  search: {:?}", store.search_text()));
    }
    out.push('\n');
    out.push_str(&count_line(summary.total, summary.visible));
    out.push_str(&format!(", {} done", summary.done_visible));
    out
}

fn count_line(total: usize, visible: usize) -> String {
    format!("{} of {} items listed", visible, total)
}

fn item_text(text: &str, width: usize) -> String {
    let text = single_line(text);
    if width == 0 {
        text
    } else {
        truncate_to_width(&text, width)
    }
}

/// Render the current view per `opts`.
pub fn format_view(store: &TodoStore, opts: &OutputOptions) -> String {
    if opts.json {
        // Serializing borrowed strings and integers cannot fail
        serde_json::to_string(&view_to_json(store)).unwrap_or_default()
    } else {
        render_view(store, opts.width)
    }
}

pub fn format_status(store: &TodoStore, opts: &OutputOptions) -> String {
    if opts.json {
        serde_json::to_string(&status_to_json(store)).unwrap_or_default()
    } else {
        render_status(store)
    }
}
