use std::cell::OnceCell;

use tracing::debug;

use crate::model::config::{Config, IdPolicy};
use crate::model::todo::{Todo, TodoId, ViewMode};
use crate::ops::list_ops;
use crate::ops::view::{self, Summary};
use crate::util::casefold::FoldRule;

/// Owns the todo list together with the view mode and search text, and
/// derives the visible list from them.
///
/// The visible list is cached as positions into `items` and dropped by every
/// operation that can change `(items, mode, search_text)`. Guards such as
/// "nothing to remove" are exposed as queries ([`TodoStore::can_remove_all_visible`]
/// and friends) but not enforced; every operation is total.
#[derive(Debug, Clone)]
pub struct TodoStore {
    items: Vec<Todo>,
    mode: ViewMode,
    search_text: String,
    next_id: TodoId,
    id_policy: IdPolicy,
    fold: FoldRule,
    visible: OnceCell<Vec<usize>>,
}

impl Default for TodoStore {
    fn default() -> Self {
        TodoStore::new(IdPolicy::default(), FoldRule::default())
    }
}

impl TodoStore {
    pub fn new(id_policy: IdPolicy, fold: FoldRule) -> Self {
        TodoStore {
            items: Vec::new(),
            mode: ViewMode::default(),
            search_text: String::new(),
            next_id: 1,
            id_policy,
            fold,
            visible: OnceCell::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let mut store = TodoStore::new(config.ids.policy, config.search.fold);
        store.mode = config.session.start_mode;
        store
    }

    // -----------------------------------------------------------------------
    // State
    // -----------------------------------------------------------------------

    pub fn items(&self) -> &[Todo] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn id_policy(&self) -> IdPolicy {
        self.id_policy
    }

    pub fn fold_rule(&self) -> FoldRule {
        self.fold
    }

    /// First item carrying `id`
    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.items.iter().find(|t| t.id == id)
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Append an open todo. Empty text is accepted here; callers that want to
    /// refuse it should check [`TodoStore::can_create`] first.
    pub fn create(&mut self, text: impl Into<String>) -> TodoId {
        self.create_with(text, false)
    }

    pub fn create_with(&mut self, text: impl Into<String>, done: bool) -> TodoId {
        let id = list_ops::assign_id(&self.items, self.id_policy, &mut self.next_id);
        let mut todo = Todo::new(id, text);
        todo.done = done;
        debug!(id, done, text = %todo.text, "create todo");
        self.items.push(todo);
        self.invalidate();
        id
    }

    /// Remove the item carrying `id`. Missing ids are ignored.
    /// Returns whether anything was removed.
    pub fn remove(&mut self, id: TodoId) -> bool {
        let removed = list_ops::remove_by_id(&mut self.items, id);
        debug!(id, removed, "remove todo");
        if removed > 0 {
            self.invalidate();
        }
        removed > 0
    }

    /// Flip `done` on the item carrying `id`. Returns the new state, or
    /// `None` if no such item exists.
    pub fn toggle(&mut self, id: TodoId) -> Option<bool> {
        let state = list_ops::toggle_by_id(&mut self.items, id);
        debug!(id, ?state, "toggle todo");
        if state.is_some() {
            self.invalidate();
        }
        state
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        if self.mode != mode {
            debug!(from = %self.mode, to = %mode, "set mode");
            self.mode = mode;
            self.invalidate();
        }
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if self.search_text != text {
            self.search_text = text;
            self.invalidate();
        }
    }

    /// Mark every visible item done. Items outside the visible list are left
    /// alone. Returns how many items changed.
    pub fn complete_all_visible(&mut self) -> usize {
        let positions = self.visible_positions().to_vec();
        let changed = list_ops::complete_at(&mut self.items, &positions);
        debug!(visible = positions.len(), changed, "complete all visible");
        if changed > 0 {
            self.invalidate();
        }
        changed
    }

    /// Remove every visible item. Items outside the visible list are kept.
    /// Returns how many items were removed.
    pub fn remove_all_visible(&mut self) -> usize {
        let positions = self.visible_positions().to_vec();
        let removed = list_ops::remove_at(&mut self.items, &positions);
        debug!(removed, remaining = self.items.len(), "remove all visible");
        if removed > 0 {
            self.invalidate();
        }
        removed
    }

    // -----------------------------------------------------------------------
    // Derived view
    // -----------------------------------------------------------------------

    /// The items currently shown, in list order.
    pub fn visible_list(&self) -> Vec<&Todo> {
        self.visible_positions()
            .iter()
            .map(|&pos| &self.items[pos])
            .collect()
    }

    pub fn visible_len(&self) -> usize {
        self.visible_positions().len()
    }

    pub fn summary(&self) -> Summary {
        Summary::from_visible(self.items.len(), self.visible_list())
    }

    pub fn can_create(&self, text: &str) -> bool {
        !text.is_empty()
    }

    pub fn can_complete_all_visible(&self) -> bool {
        self.summary().can_complete_all()
    }

    pub fn can_remove_all_visible(&self) -> bool {
        self.summary().can_remove_all()
    }

    fn visible_positions(&self) -> &[usize] {
        self.visible.get_or_init(|| {
            view::visible_positions(&self.items, self.mode, &self.search_text, self.fold)
        })
    }

    fn invalidate(&mut self) {
        self.visible.take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store_with(texts: &[&str]) -> TodoStore {
        let mut store = TodoStore::default();
        for t in texts {
            store.create(*t);
        }
        store
    }

    fn visible_texts(store: &TodoStore) -> Vec<String> {
        store.visible_list().iter().map(|t| t.text.clone()).collect()
    }

    fn all_texts(store: &TodoStore) -> Vec<String> {
        store.items().iter().map(|t| t.text.clone()).collect()
    }

    #[test]
    fn create_assigns_sequential_ids() {
        let store = store_with(&["a", "b", "c", "d"]);
        assert_eq!(store.len(), 4);
        let ids: Vec<TodoId> = store.items().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert!(store.items().iter().all(|t| !t.done));
    }

    #[test]
    fn create_accepts_empty_text() {
        let mut store = TodoStore::default();
        store.create("");
        assert_eq!(store.len(), 1);
        assert!(!store.can_create(""));
        assert!(store.can_create("x"));
    }

    #[test]
    fn create_with_done() {
        let mut store = TodoStore::default();
        let id = store.create_with("Süt", true);
        assert_eq!(store.get(id).map(|t| t.done), Some(true));
    }

    #[test]
    fn end_to_end_single_item() {
        let mut store = TodoStore::default();
        store.create("Ekmek al");
        assert_eq!(store.items(), &[Todo::new(1, "Ekmek al")]);

        store.toggle(1);
        assert_eq!(
            store.items(),
            &[Todo {
                id: 1,
                text: "Ekmek al".into(),
                done: true
            }]
        );

        store.remove(1);
        assert!(store.is_empty());
    }

    #[test]
    fn toggle_twice_restores() {
        let mut store = store_with(&["a", "b"]);
        assert_eq!(store.toggle(2), Some(true));
        assert_eq!(store.toggle(2), Some(false));
        assert!(!store.items()[1].done);
    }

    #[test]
    fn toggle_missing_id_does_nothing() {
        let mut store = store_with(&["a"]);
        assert_eq!(store.toggle(42), None);
        assert!(!store.items()[0].done);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut store = store_with(&["a", "b", "c"]);
        assert!(store.remove(2));
        assert!(!store.remove(2));
        assert_eq!(all_texts(&store), vec!["a", "c"]);
    }

    #[test]
    fn counter_ids_never_reused() {
        let mut store = store_with(&["a", "b", "c"]);
        store.remove(1);
        let id = store.create("d");
        assert_eq!(id, 4);
        store.remove(4);
        assert_eq!(store.create("e"), 5);
    }

    #[test]
    fn length_ids_can_collide() {
        let mut store = TodoStore::new(IdPolicy::Length, FoldRule::Turkish);
        store.create("a");
        store.create("b");
        store.create("c");
        store.remove(1);
        // two items left, so the new one becomes id 3 alongside the existing 3
        assert_eq!(store.create("d"), 3);
        let ids: Vec<TodoId> = store.items().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 3, 3]);
    }

    #[test]
    fn length_ids_match_count_without_removals() {
        let mut store = TodoStore::new(IdPolicy::Length, FoldRule::Turkish);
        assert_eq!(store.create("a"), 1);
        assert_eq!(store.create("b"), 2);
    }

    #[test]
    fn create_mode_shows_everything() {
        let mut store = store_with(&["Süt", "Ekmek"]);
        store.set_search_text("süt");
        assert_eq!(visible_texts(&store), vec!["Süt", "Ekmek"]);
    }

    #[test]
    fn empty_search_shows_everything() {
        let mut store = store_with(&["Süt", "Ekmek"]);
        store.set_mode(ViewMode::Search);
        assert_eq!(visible_texts(&store), all_texts(&store));
    }

    #[test]
    fn search_filters_case_insensitively() {
        let mut store = store_with(&["Süt", "Ekmek", "SÜTLAÇ"]);
        store.set_mode(ViewMode::Search);
        store.set_search_text("süt");
        assert_eq!(visible_texts(&store), vec!["Süt", "SÜTLAÇ"]);
        assert_eq!(store.visible_len(), 2);
    }

    #[test]
    fn dotted_capital_search_depends_on_fold_rule() {
        let mut turkish = TodoStore::new(IdPolicy::Counter, FoldRule::Turkish);
        turkish.create("iş");
        turkish.set_mode(ViewMode::Search);
        turkish.set_search_text("İ");
        assert_eq!(visible_texts(&turkish), vec!["iş"]);

        let mut plain = TodoStore::new(IdPolicy::Counter, FoldRule::Default);
        plain.create("iş");
        plain.set_mode(ViewMode::Search);
        plain.set_search_text("İ");
        assert!(plain.visible_list().is_empty());
    }

    #[test]
    fn visible_list_tracks_mutations() {
        let mut store = store_with(&["Süt"]);
        store.set_mode(ViewMode::Search);
        store.set_search_text("ekmek");
        assert!(store.visible_list().is_empty());

        store.create("Ekmek");
        assert_eq!(visible_texts(&store), vec!["Ekmek"]);

        store.set_search_text("");
        assert_eq!(visible_texts(&store), vec!["Süt", "Ekmek"]);

        store.set_mode(ViewMode::Create);
        store.set_search_text("yok");
        assert_eq!(store.visible_len(), 2);
    }

    #[test]
    fn visible_list_sees_toggle() {
        let mut store = store_with(&["Süt"]);
        assert!(!store.visible_list()[0].done);
        store.toggle(1);
        assert!(store.visible_list()[0].done);
    }

    #[test]
    fn complete_all_in_create_mode() {
        let mut store = store_with(&["a", "b", "c"]);
        store.toggle(2);
        assert_eq!(store.complete_all_visible(), 2);
        assert!(store.visible_list().iter().all(|t| t.done));
        assert!(!store.can_complete_all_visible());
    }

    #[test]
    fn complete_all_leaves_hidden_items() {
        let mut store = store_with(&["Süt", "Ekmek", "Süt tozu"]);
        store.set_mode(ViewMode::Search);
        store.set_search_text("süt");
        assert_eq!(store.complete_all_visible(), 2);

        let done: Vec<bool> = store.items().iter().map(|t| t.done).collect();
        assert_eq!(done, vec![true, false, true]);
    }

    #[test]
    fn remove_all_in_search_mode() {
        let mut store = store_with(&["Süt", "Ekmek"]);
        store.set_mode(ViewMode::Search);
        store.set_search_text("süt");
        assert_eq!(store.remove_all_visible(), 1);
        assert_eq!(all_texts(&store), vec!["Ekmek"]);
        assert!(store.visible_list().is_empty());
        assert!(!store.can_remove_all_visible());
    }

    #[test]
    fn remove_all_in_create_mode_clears() {
        let mut store = store_with(&["a", "b"]);
        assert_eq!(store.remove_all_visible(), 2);
        assert!(store.is_empty());
        assert_eq!(store.remove_all_visible(), 0);
    }

    #[test]
    fn remove_all_keeps_hidden_duplicate_ids() {
        let mut store = TodoStore::new(IdPolicy::Length, FoldRule::Turkish);
        store.create("Süt");
        store.create("Ekmek");
        store.create("Peynir");
        store.remove(1);
        store.create("Çay"); // id 3 again
        store.set_mode(ViewMode::Search);
        store.set_search_text("peynir");
        assert_eq!(store.remove_all_visible(), 1);
        assert_eq!(all_texts(&store), vec!["Ekmek", "Çay"]);
    }

    #[test]
    fn guards_on_empty_store() {
        let store = TodoStore::default();
        assert!(!store.can_complete_all_visible());
        assert!(!store.can_remove_all_visible());
        assert_eq!(store.summary(), Summary::default());
    }

    #[test]
    fn summary_counts() {
        let mut store = store_with(&["Süt", "Ekmek", "Süt tozu"]);
        store.toggle(1);
        store.set_mode(ViewMode::Search);
        store.set_search_text("SÜT");
        assert_eq!(
            store.summary(),
            Summary {
                total: 3,
                visible: 2,
                done_visible: 1
            }
        );
    }

    #[test]
    fn from_config_applies_settings() {
        let mut config = Config::default();
        config.ids.policy = IdPolicy::Length;
        config.search.fold = FoldRule::Default;
        config.session.start_mode = ViewMode::Search;
        let store = TodoStore::from_config(&config);
        assert_eq!(store.id_policy(), IdPolicy::Length);
        assert_eq!(store.fold_rule(), FoldRule::Default);
        assert_eq!(store.mode(), ViewMode::Search);
    }
}
