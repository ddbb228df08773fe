//! The synchronous todo store the presentation layer talks to.
//!
//! `TodoStore` owns the list and filter outright and runs every intent through
//! [`TodoReducer`] to completion before returning. For several surfaces sharing
//! one list, use [`SharedTodoStore`] instead.

use crate::filter::Filter;
use crate::reducer::{TodoEnvironment, TodoReducer};
use crate::types::{TodoAction, TodoId, TodoItem, TodoState};
use crate::view::TodoView;
use std::sync::Arc;
use todo_widget_core::{effect::Effect, environment::SystemClock, reducer::Reducer};
use todo_widget_runtime::{Store, StoreConfig};

/// Thread-safe store for concurrent intents, backed by the runtime crate
pub type SharedTodoStore = Store<TodoState, TodoAction, TodoEnvironment, TodoReducer>;

/// Creates a [`SharedTodoStore`] with an empty list
#[must_use]
pub fn shared_store(environment: TodoEnvironment, config: StoreConfig) -> SharedTodoStore {
    Store::with_config(TodoState::new(), TodoReducer::new(), environment, config)
}

/// Single-owner todo store
///
/// All mutations are total: they never fail, and the ones that find nothing to
/// do leave state untouched.
#[derive(Debug, Clone)]
pub struct TodoStore {
    state: TodoState,
    reducer: TodoReducer,
    environment: TodoEnvironment,
}

impl TodoStore {
    /// Creates an empty store using the system clock and sequential ids
    #[must_use]
    pub fn new() -> Self {
        Self::with_environment(TodoEnvironment::new(Arc::new(SystemClock)))
    }

    /// Creates an empty store with the given environment
    #[must_use]
    pub const fn with_environment(environment: TodoEnvironment) -> Self {
        Self {
            state: TodoState::new(),
            reducer: TodoReducer::new(),
            environment,
        }
    }

    /// Runs one action through the reducer and returns the emitted events
    pub fn dispatch(&mut self, action: TodoAction) -> Vec<TodoAction> {
        self.reducer
            .reduce(&mut self.state, action, &self.environment)
            .into_iter()
            .filter_map(Effect::into_emitted)
            .collect()
    }

    /// Appends a todo with `text`
    ///
    /// Returns the new item, or `None` when `text` is empty. Ids still held by
    /// replayed items are skipped.
    pub fn add(&mut self, text: impl Into<String>) -> Option<TodoItem> {
        self.dispatch(TodoAction::AddTodo { text: text.into() })
            .into_iter()
            .find_map(|event| match event {
                TodoAction::TodoAdded { item } => Some(item),
                _ => None,
            })
    }

    /// Flips the done flag of the todo with `id`; unknown ids are ignored
    pub fn toggle(&mut self, id: TodoId) {
        self.dispatch(TodoAction::ToggleTodo { id });
    }

    /// Removes the todo with `id`; unknown ids are ignored
    pub fn delete(&mut self, id: TodoId) {
        self.dispatch(TodoAction::DeleteTodo { id });
    }

    /// Shows `filter` from now on
    pub fn set_filter(&mut self, filter: Filter) {
        self.dispatch(TodoAction::SetFilter { filter });
    }

    /// Removes every completed todo
    pub fn clear_completed(&mut self) {
        self.dispatch(TodoAction::ClearCompleted);
    }

    /// Todos matching the current filter, in insertion order
    #[must_use]
    pub fn visible_items(&self) -> Vec<&TodoItem> {
        self.state.visible_items().collect()
    }

    /// Number of todos not yet done, regardless of filter
    #[must_use]
    pub fn remaining_count(&self) -> usize {
        self.state.remaining_count()
    }

    /// True iff any todo is done, regardless of filter
    #[must_use]
    pub fn has_completed(&self) -> bool {
        self.state.has_completed()
    }

    /// Current filter
    #[must_use]
    pub const fn filter(&self) -> Filter {
        self.state.filter
    }

    /// Every todo in insertion order, ignoring the filter
    #[must_use]
    pub fn items(&self) -> &[TodoItem] {
        &self.state.todos
    }

    /// Number of todos, ignoring the filter
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.count()
    }

    /// True when the list is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.todos.is_empty()
    }

    /// Read-only access to the full state
    #[must_use]
    pub const fn state(&self) -> &TodoState {
        &self.state
    }

    /// Derives the view model for rendering
    #[must_use]
    pub fn view(&self) -> TodoView {
        TodoView::from_state(&self.state)
    }
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new()
    }
}
