//! Single-page todo list widget.
//!
//! The widget is a small reducer-driven state machine:
//!
//! - Add, toggle, delete and clear-completed over an ordered in-memory list
//! - An `All` / `Active` / `Completed` filter over that list
//! - A derived view model ([`TodoView`]) that any presentation layer can draw
//!
//! Intents go through [`TodoStore`] (single owner, synchronous) or
//! [`SharedTodoStore`] (several surfaces, serialized behind one lock). Both run
//! the same [`TodoReducer`].
//!
//! # Quick Start
//!
//! ```
//! use todo_widget::{Filter, TodoStore};
//!
//! let mut store = TodoStore::new();
//! let milk = store.add("Buy milk").expect("non-empty text is added");
//! store.add("Walk dog");
//! store.toggle(milk.id);
//!
//! store.set_filter(Filter::Active);
//! assert_eq!(store.visible_items().len(), 1);
//! assert_eq!(store.remaining_count(), 1);
//! assert_eq!(store.view().items_left_label, "1 item left");
//! ```

pub mod filter;
pub mod reducer;
pub mod store;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use filter::{predicate_for, Filter, ParseFilterError, Predicate};
pub use reducer::{TodoEnvironment, TodoReducer};
pub use store::{shared_store, SharedTodoStore, TodoStore};
pub use types::{TodoAction, TodoId, TodoItem, TodoState};
pub use view::{AddForm, FilterTab, ItemRow, TodoView};
