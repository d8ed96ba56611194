use crate::model::config::IdPolicy;
use crate::model::todo::{Todo, TodoId};

// ---------------------------------------------------------------------------
// Id assignment
// ---------------------------------------------------------------------------

/// Pick the id for the next todo appended to `items`.
///
/// `counter` holds the next unused id for [`IdPolicy::Counter`] and is
/// advanced past whatever id is returned, so switching policies mid-list
/// never walks the counter backwards.
pub fn assign_id(items: &[Todo], policy: IdPolicy, counter: &mut TodoId) -> TodoId {
    let id = match policy {
        IdPolicy::Counter => *counter,
        IdPolicy::Length => items.len() as TodoId + 1,
    };
    *counter = (*counter).max(id + 1);
    id
}

// ---------------------------------------------------------------------------
// Single-item edits
// ---------------------------------------------------------------------------

/// Remove every item carrying `id`. Returns how many were removed.
pub fn remove_by_id(items: &mut Vec<Todo>, id: TodoId) -> usize {
    let before = items.len();
    items.retain(|t| t.id != id);
    before - items.len()
}

/// Flip `done` on the first item carrying `id`. Returns the new state, or
/// `None` when no item matched.
pub fn toggle_by_id(items: &mut [Todo], id: TodoId) -> Option<bool> {
    let todo = items.iter_mut().find(|t| t.id == id)?;
    todo.done = !todo.done;
    Some(todo.done)
}

// ---------------------------------------------------------------------------
// Bulk edits over positions
// ---------------------------------------------------------------------------

/// Mark the items at `positions` done. Positions out of range are skipped.
/// Returns how many items actually changed.
pub fn complete_at(items: &mut [Todo], positions: &[usize]) -> usize {
    let mut changed = 0;
    for &pos in positions {
        if let Some(todo) = items.get_mut(pos) {
            if !todo.done {
                todo.done = true;
                changed += 1;
            }
        }
    }
    changed
}

/// Remove the items at `positions`, keeping the rest in order.
/// Returns how many were removed.
pub fn remove_at(items: &mut Vec<Todo>, positions: &[usize]) -> usize {
    if positions.is_empty() {
        return 0;
    }
    let before = items.len();
    let mut pos = 0;
    items.retain(|_| {
        let keep = !positions.contains(&pos);
        pos += 1;
        keep
    });
    before - items.len()
}
