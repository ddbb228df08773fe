//! Domain types for the todo widget.
//!
//! A todo list is an ordered sequence of items plus the filter the user is
//! currently looking through. Items are appended on add, flipped in place on
//! toggle, and removed on delete or clear-completed.

use crate::filter::Filter;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use todo_widget_macros::Action;

/// Unique identifier for a todo item
///
/// Ids come from a monotonic counter, so two items added back to back never
/// share one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(u64);

impl TodoId {
    /// Creates a `TodoId` from a raw counter value
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw counter value
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single todo item
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Unique identifier, never reassigned
    pub id: TodoId,
    /// Text entered by the user; never empty
    pub text: String,
    /// Whether the todo is completed
    pub done: bool,
    /// When the todo was created
    pub created_at: DateTime<Utc>,
}

impl TodoItem {
    /// Creates a new, not yet completed, todo item
    #[must_use]
    pub const fn new(id: TodoId, text: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            text,
            done: false,
            created_at,
        }
    }
}

/// State of the todo list
///
/// `todos` keeps insertion order. Only the reducer mutates it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoState {
    /// All todos in insertion order
    pub todos: Vec<TodoItem>,
    /// Filter applied to the visible list
    pub filter: Filter,
}

impl TodoState {
    /// Creates a new empty todo state showing all items
    #[must_use]
    pub const fn new() -> Self {
        Self {
            todos: Vec::new(),
            filter: Filter::All,
        }
    }

    /// Returns the number of todos, ignoring the filter
    #[must_use]
    pub fn count(&self) -> usize {
        self.todos.len()
    }

    /// Returns a todo by ID
    #[must_use]
    pub fn get(&self, id: TodoId) -> Option<&TodoItem> {
        self.todos.iter().find(|t| t.id == id)
    }

    /// Returns the position of a todo in the list
    #[must_use]
    pub fn position(&self, id: TodoId) -> Option<usize> {
        self.todos.iter().position(|t| t.id == id)
    }

    /// Checks if a todo exists
    #[must_use]
    pub fn exists(&self, id: TodoId) -> bool {
        self.position(id).is_some()
    }

    /// Todos matching `filter`, in insertion order
    pub fn items_matching(&self, filter: Filter) -> impl Iterator<Item = &TodoItem> + '_ {
        let predicate = filter.predicate();
        self.todos.iter().filter(move |t| predicate(t))
    }

    /// Todos matching the current filter, in insertion order
    ///
    /// The predicate is evaluated on every call, so an item toggled while a
    /// non-`All` filter is active drops out of (or into) the view immediately.
    pub fn visible_items(&self) -> impl Iterator<Item = &TodoItem> + '_ {
        self.items_matching(self.filter)
    }

    /// Number of todos not yet done, over the full list
    #[must_use]
    pub fn remaining_count(&self) -> usize {
        self.todos.iter().filter(|t| !t.done).count()
    }

    /// Number of todos done, over the full list
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|t| t.done).count()
    }

    /// True iff at least one todo is done
    #[must_use]
    pub fn has_completed(&self) -> bool {
        self.todos.iter().any(|t| t.done)
    }
}

/// Actions representing intents and events for the todo list
///
/// Commands are what the presentation layer sends in response to a user
/// gesture. The reducer turns each command that changes something into exactly
/// one event, applies it, and emits it. Events can also be replayed directly.
#[derive(Action, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TodoAction {
    // ========== Commands ==========
    /// Command: Add a todo with the given text
    #[command]
    AddTodo {
        /// Text of the todo; empty text is ignored
        text: String,
    },

    /// Command: Flip the done flag of a todo
    #[command]
    ToggleTodo {
        /// Todo to toggle
        id: TodoId,
    },

    /// Command: Delete a todo
    #[command]
    DeleteTodo {
        /// Todo to delete
        id: TodoId,
    },

    /// Command: Switch the visible filter
    #[command]
    SetFilter {
        /// Filter to show
        filter: Filter,
    },

    /// Command: Remove every completed todo
    #[command]
    ClearCompleted,

    // ========== Events ==========
    /// Event: Todo was appended to the list
    #[event]
    TodoAdded {
        /// The new item
        item: TodoItem,
    },

    /// Event: Todo's done flag changed
    #[event]
    TodoToggled {
        /// Todo identifier
        id: TodoId,
        /// New value of the done flag
        done: bool,
    },

    /// Event: Todo was removed
    #[event]
    TodoDeleted {
        /// Todo identifier
        id: TodoId,
    },

    /// Event: Visible filter changed
    #[event]
    FilterChanged {
        /// Filter now shown
        filter: Filter,
    },

    /// Event: Completed todos were removed
    #[event]
    CompletedCleared {
        /// Removed todos, in their former list order
        ids: Vec<TodoId>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use todo_widget_testing::test_clock;
    use todo_widget_core::environment::Clock;

    fn item(id: u64, text: &str, done: bool) -> TodoItem {
        TodoItem {
            done,
            ..TodoItem::new(TodoId::new(id), text.to_string(), test_clock().now())
        }
    }

    #[test]
    fn todo_id_display() {
        assert_eq!(TodoId::new(42).to_string(), "42");
        assert_eq!(TodoId::new(42).get(), 42);
    }

    #[test]
    fn todo_item_new() {
        let now = test_clock().now();
        let item = TodoItem::new(TodoId::new(1), "Test todo".to_string(), now);

        assert_eq!(item.id, TodoId::new(1));
        assert_eq!(item.text, "Test todo");
        assert!(!item.done);
        assert_eq!(item.created_at, now);
    }

    #[test]
    fn todo_state_counts() {
        let mut state = TodoState::new();
        assert_eq!(state.count(), 0);
        assert_eq!(state.remaining_count(), 0);
        assert!(!state.has_completed());

        state.todos.push(item(1, "A", false));
        state.todos.push(item(2, "B", true));
        state.todos.push(item(3, "C", false));

        assert_eq!(state.count(), 3);
        assert_eq!(state.remaining_count(), 2);
        assert_eq!(state.completed_count(), 1);
        assert!(state.has_completed());
        assert_eq!(state.position(TodoId::new(3)), Some(2));
        assert!(!state.exists(TodoId::new(4)));
    }

    #[test]
    fn visible_items_follow_filter() {
        let mut state = TodoState::new();
        state.todos.push(item(1, "A", false));
        state.todos.push(item(2, "B", true));

        let texts = |state: &TodoState| {
            state
                .visible_items()
                .map(|t| t.text.clone())
                .collect::<Vec<_>>()
        };

        assert_eq!(texts(&state), ["A", "B"]);
        state.filter = Filter::Active;
        assert_eq!(texts(&state), ["A"]);
        state.filter = Filter::Completed;
        assert_eq!(texts(&state), ["B"]);
        // Remaining count ignores the filter
        assert_eq!(state.remaining_count(), 1);
    }

    #[test]
    fn todo_action_is_command() {
        let action = TodoAction::AddTodo {
            text: "Test".to_string(),
        };
        assert!(action.is_command());
        assert!(!action.is_event());
        assert!(TodoAction::ClearCompleted.is_command());
    }

    #[test]
    fn todo_action_is_event() {
        let action = TodoAction::TodoDeleted { id: TodoId::new(1) };
        assert!(action.is_event());
        assert!(!action.is_command());
        assert_eq!(action.name(), "TodoDeleted");
    }

    #[test]
    fn todo_id_serializes_as_number() {
        #[allow(clippy::unwrap_used)]
        let json = serde_json::to_string(&TodoId::new(7)).unwrap();
        assert_eq!(json, "7");
    }
}
