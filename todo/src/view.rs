//! View model for rendering the widget.
//!
//! Everything a presentation layer needs to draw the widget is derived here
//! from [`TodoState`], so terminal, web and test renderers agree on labels,
//! pluralization and which controls are enabled.

use crate::filter::Filter;
use crate::store::TodoStore;
use crate::types::{TodoId, TodoItem, TodoState};
use serde::Serialize;

/// Heading shown above the list
pub const HEADING: &str = "Todo List";

/// Label of the text input
pub const INPUT_LABEL: &str = "What needs to be done?";

/// Label of the clear-completed button
pub const CLEAR_COMPLETED_LABEL: &str = "Clear Completed";

/// "1 item left", "0 items left", "3 items left"
#[must_use]
pub fn items_left_label(remaining: usize) -> String {
    let noun = if remaining == 1 { "item" } else { "items" };
    format!("{remaining} {noun} left")
}

/// Label of the add button, numbered by the full list length + 1
#[must_use]
pub fn add_button_label(total: usize) -> String {
    format!("Add № {}", total + 1)
}

/// One visible row of the list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemRow {
    /// Id passed back on click or delete
    pub id: TodoId,
    /// Text shown in the row
    pub text: String,
    /// Rendered struck through when true
    pub done: bool,
}

impl From<&TodoItem> for ItemRow {
    fn from(item: &TodoItem) -> Self {
        Self {
            id: item.id,
            text: item.text.clone(),
            done: item.done,
        }
    }
}

/// One filter tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterTab {
    /// Filter selected by clicking the tab
    pub filter: Filter,
    /// Tab caption
    pub label: &'static str,
    /// True for the active filter (`aria-selected`)
    pub selected: bool,
}

/// Everything needed to draw the widget once
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodoView {
    /// Heading text
    pub heading: &'static str,
    /// Rows visible under the current filter
    pub items: Vec<ItemRow>,
    /// Label above the text input
    pub input_label: &'static str,
    /// Caption of the add button
    pub add_button_label: String,
    /// Remaining-count caption
    pub items_left_label: String,
    /// Caption of the clear-completed button
    pub clear_completed_label: &'static str,
    /// Whether clear-completed is clickable
    pub clear_completed_enabled: bool,
    /// Filter tabs in display order
    pub tabs: Vec<FilterTab>,
}

impl TodoView {
    /// Derives the view model from state
    #[must_use]
    pub fn from_state(state: &TodoState) -> Self {
        Self {
            heading: HEADING,
            items: state.visible_items().map(ItemRow::from).collect(),
            input_label: INPUT_LABEL,
            add_button_label: add_button_label(state.count()),
            items_left_label: items_left_label(state.remaining_count()),
            clear_completed_label: CLEAR_COMPLETED_LABEL,
            clear_completed_enabled: state.has_completed(),
            tabs: Filter::ALL
                .into_iter()
                .map(|filter| FilterTab {
                    filter,
                    label: filter.label(),
                    selected: filter == state.filter,
                })
                .collect(),
        }
    }

    /// The tab currently selected
    #[must_use]
    pub fn selected_tab(&self) -> Option<&FilterTab> {
        self.tabs.iter().find(|tab| tab.selected)
    }

    /// Finds a visible row by its text
    #[must_use]
    pub fn row(&self, text: &str) -> Option<&ItemRow> {
        self.items.iter().find(|row| row.text == text)
    }
}

/// The controlled text input with its submit button
///
/// Keeps the draft between keystrokes. Submitting an empty draft does nothing;
/// a successful submit clears the draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddForm {
    draft: String,
}

impl AddForm {
    /// Creates a form with an empty draft
    #[must_use]
    pub const fn new() -> Self {
        Self {
            draft: String::new(),
        }
    }

    /// Replaces the draft, as an input change event does
    pub fn input(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Current draft text
    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Submits the draft to `store`
    ///
    /// Returns the created item. The draft is cleared only when an item was
    /// created.
    pub fn submit(&mut self, store: &mut TodoStore) -> Option<TodoItem> {
        let item = store.add(self.draft.as_str())?;
        self.draft.clear();
        Some(item)
    }
}
