//! Reducer logic for the todo list.
//!
//! Every command is checked against current state. A command that would change
//! nothing (empty text, unknown id, nothing completed) is a silent no-op: no
//! event, no error. Anything else becomes exactly one event, which is applied
//! and emitted.

use crate::filter::Filter;
use crate::types::{TodoAction, TodoId, TodoItem, TodoState};
use std::sync::Arc;
use todo_widget_core::{
    effect::Effect,
    environment::{Clock, IdGenerator, SequentialIdGenerator},
    reducer::Reducer,
    smallvec, SmallVec,
};

/// Environment dependencies for the todo reducer
#[derive(Clone)]
pub struct TodoEnvironment {
    /// Clock for creation timestamps
    pub clock: Arc<dyn Clock>,
    /// Source of item ids
    pub ids: Arc<dyn IdGenerator>,
}

impl TodoEnvironment {
    /// Creates a new `TodoEnvironment` with a fresh sequential id generator
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            ids: Arc::new(SequentialIdGenerator::new()),
        }
    }

    /// Replaces the id generator
    #[must_use]
    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }
}

impl std::fmt::Debug for TodoEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoEnvironment").finish_non_exhaustive()
    }
}

/// Reducer for the todo list
#[derive(Clone, Copy, Debug, Default)]
pub struct TodoReducer;

type Effects = SmallVec<[Effect<TodoAction>; 4]>;

impl TodoReducer {
    /// Creates a new `TodoReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn add_todo(state: &mut TodoState, text: String, env: &TodoEnvironment) -> Effects {
        if text.is_empty() {
            tracing::debug!("Ignoring AddTodo: text is empty");
            return SmallVec::new();
        }

        // Replayed items may already hold ids the generator has not handed out yet
        let attempts = state.count() + 1;
        let Some(id) = (0..attempts)
            .map(|_| TodoId::new(env.ids.next_id()))
            .find(|id| !state.exists(*id))
        else {
            tracing::error!(attempts, "Id generator kept returning live ids; add dropped");
            return SmallVec::new();
        };

        let item = TodoItem::new(id, text, env.clock.now());
        Self::emit(state, TodoAction::TodoAdded { item })
    }

    fn toggle_todo(state: &mut TodoState, id: TodoId) -> Effects {
        let Some(todo) = state.get(id) else {
            tracing::debug!(%id, "Ignoring ToggleTodo: no such todo");
            return SmallVec::new();
        };

        let done = !todo.done;
        Self::emit(state, TodoAction::TodoToggled { id, done })
    }

    fn delete_todo(state: &mut TodoState, id: TodoId) -> Effects {
        if !state.exists(id) {
            tracing::debug!(%id, "Ignoring DeleteTodo: no such todo");
            return SmallVec::new();
        }

        Self::emit(state, TodoAction::TodoDeleted { id })
    }

    fn set_filter(state: &mut TodoState, filter: Filter) -> Effects {
        Self::emit(state, TodoAction::FilterChanged { filter })
    }

    fn clear_completed(state: &mut TodoState) -> Effects {
        let ids: Vec<TodoId> = state.items_matching(Filter::Completed).map(|t| t.id).collect();
        if ids.is_empty() {
            tracing::debug!("Ignoring ClearCompleted: nothing completed");
            return SmallVec::new();
        }

        Self::emit(state, TodoAction::CompletedCleared { ids })
    }

    /// Applies `event` and returns it as the single emitted effect
    fn emit(state: &mut TodoState, event: TodoAction) -> Effects {
        Self::apply_event(state, &event);
        smallvec![Effect::Emit(event)]
    }

    /// Applies an event to state
    fn apply_event(state: &mut TodoState, action: &TodoAction) {
        tracing::debug!(event = action.name(), "Applying event");

        match action {
            TodoAction::TodoAdded { item } => {
                if item.text.is_empty() {
                    tracing::warn!(id = %item.id, "Skipping TodoAdded: text is empty");
                } else if state.exists(item.id) {
                    tracing::warn!(id = %item.id, "Skipping TodoAdded: id already present");
                } else {
                    state.todos.push(item.clone());
                }
            }
            TodoAction::TodoToggled { id, done } => {
                if let Some(todo) = state.todos.iter_mut().find(|t| t.id == *id) {
                    todo.done = *done;
                }
            }
            TodoAction::TodoDeleted { id } => {
                if let Some(index) = state.position(*id) {
                    state.todos.remove(index);
                }
            }
            TodoAction::FilterChanged { filter } => {
                state.filter = *filter;
            }
            TodoAction::CompletedCleared { ids } => {
                state.todos.retain(|t| !ids.contains(&t.id));
            }
            // Commands are not applied to state
            TodoAction::AddTodo { .. }
            | TodoAction::ToggleTodo { .. }
            | TodoAction::DeleteTodo { .. }
            | TodoAction::SetFilter { .. }
            | TodoAction::ClearCompleted => {}
        }
    }
}

impl Reducer for TodoReducer {
    type State = TodoState;
    type Action = TodoAction;
    type Environment = TodoEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Effects {
        match action {
            // ========== Commands ==========
            TodoAction::AddTodo { text } => Self::add_todo(state, text, env),
            TodoAction::ToggleTodo { id } => Self::toggle_todo(state, id),
            TodoAction::DeleteTodo { id } => Self::delete_todo(state, id),
            TodoAction::SetFilter { filter } => Self::set_filter(state, filter),
            TodoAction::ClearCompleted => Self::clear_completed(state),

            // ========== Events ==========
            TodoAction::TodoAdded { .. }
            | TodoAction::TodoToggled { .. }
            | TodoAction::TodoDeleted { .. }
            | TodoAction::FilterChanged { .. }
            | TodoAction::CompletedCleared { .. } => {
                // Replayed events are applied but not re-emitted
                Self::apply_event(state, &action);
                SmallVec::new()
            }
        }
    }
}
