use serde::Serialize;

use crate::model::todo::{Todo, ViewMode};
use crate::util::casefold::FoldRule;

/// Positions in `items` that are visible for the given mode and search text,
/// in list order.
///
/// In [`ViewMode::Create`] everything is visible. In [`ViewMode::Search`] an
/// item is visible when its folded text contains the folded search text; an
/// empty search shows everything.
pub fn visible_positions(
    items: &[Todo],
    mode: ViewMode,
    search_text: &str,
    fold: FoldRule,
) -> Vec<usize> {
    if mode == ViewMode::Create || search_text.is_empty() {
        return (0..items.len()).collect();
    }

    let needle = fold.fold(search_text);
    items
        .iter()
        .enumerate()
        .filter(|(_, t)| fold.fold(&t.text).contains(&needle))
        .map(|(i, _)| i)
        .collect()
}

/// Counts shown beneath the list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Items in the store
    pub total: usize,
    /// Items in the visible list
    pub visible: usize,
    /// Visible items already done
    pub done_visible: usize,
}

impl Summary {
    pub fn from_visible<'a>(total: usize, visible: impl IntoIterator<Item = &'a Todo>) -> Self {
        let mut summary = Summary {
            total,
            ..Summary::default()
        };
        for todo in visible {
            summary.visible += 1;
            if todo.done {
                summary.done_visible += 1;
            }
        }
        summary
    }

    /// Completing the visible list only makes sense while something in it is open.
    pub fn can_complete_all(&self) -> bool {
        self.done_visible < self.visible
    }

    pub fn can_remove_all(&self) -> bool {
        self.visible > 0
    }
}
