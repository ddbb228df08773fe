//! Filter modes and the predicates behind them.

use crate::types::TodoItem;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Which subset of the list is shown
///
/// Matched exhaustively everywhere, so a new mode cannot be added without
/// giving it a predicate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    /// Every item
    #[default]
    All,
    /// Items not yet done
    Active,
    /// Items done
    Completed,
}

/// Predicate over a todo item
pub type Predicate = fn(&TodoItem) -> bool;

/// Returns the predicate selecting items for `filter`
#[must_use]
pub fn predicate_for(filter: Filter) -> Predicate {
    match filter {
        Filter::All => |_: &TodoItem| true,
        Filter::Active => |item: &TodoItem| !item.done,
        Filter::Completed => |item: &TodoItem| item.done,
    }
}

impl Filter {
    /// Every filter, in tab order
    pub const ALL: [Self; 3] = [Self::All, Self::Active, Self::Completed];

    /// Returns the predicate selecting items for this filter
    #[must_use]
    pub fn predicate(self) -> Predicate {
        predicate_for(self)
    }

    /// True iff `item` is shown under this filter
    #[must_use]
    pub fn matches(self, item: &TodoItem) -> bool {
        predicate_for(self)(item)
    }

    /// Tab label shown to the user
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Active => "Active",
            Self::Completed => "Completed",
        }
    }

    /// Stable lowercase key, as used in serialized state
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no filter
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown filter `{0}` (expected all, active or completed)")]
pub struct ParseFilterError(String);

impl FromStr for Filter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseFilterError(s.to_string()))
    }
}
