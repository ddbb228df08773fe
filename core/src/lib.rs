//! # Todo Widget Core
//!
//! Core traits and types shared by every crate in the todo widget workspace.
//!
//! ## Core Concepts
//!
//! - **State**: Domain state owned by a single store
//! - **Action**: All possible inputs to a reducer (user intents and the events they produce)
//! - **Reducer**: Pure function `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: Descriptions of what observers should be told (not execution)
//! - **Environment**: Injected dependencies (clock, id generation)
//!
//! ## Example
//!
//! ```
//! use todo_widget_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! #[derive(Clone, Debug, Default)]
//! struct CountState {
//!     count: u32,
//! }
//!
//! #[derive(Clone, Debug, PartialEq)]
//! enum CountAction {
//!     Bump,
//!     Bumped { count: u32 },
//! }
//!
//! struct CountReducer;
//!
//! impl Reducer for CountReducer {
//!     type State = CountState;
//!     type Action = CountAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut CountState,
//!         action: CountAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<CountAction>; 4]> {
//!         match action {
//!             CountAction::Bump => {
//!                 state.count += 1;
//!                 smallvec![Effect::Emit(CountAction::Bumped { count: state.count })]
//!             }
//!             CountAction::Bumped { .. } => SmallVec::new(),
//!         }
//!     }
//! }
//!
//! let mut state = CountState::default();
//! let effects = CountReducer.reduce(&mut state, CountAction::Bump, &());
//! assert_eq!(state.count, 1);
//! assert_eq!(effects.len(), 1);
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{smallvec, SmallVec};

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`
///
/// They contain all business logic and are deterministic and testable.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Checks the action against current state
        /// 2. Updates state in place
        /// 3. Returns effect descriptions for the caller to act on
        ///
        /// # Arguments
        ///
        /// - `state`: Mutable reference to current state
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects are values returned from reducers. The caller (a store) decides what
/// to do with them; the reducer never performs I/O itself.
pub mod effect {
    /// Effect type - describes something the caller of a reducer should do
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type carried by emitted effects
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// An action (normally an event) that was applied to state and should
        /// be announced to observers. Emitted actions are never fed back into
        /// the reducer.
        Emit(Action),
    }

    impl<Action> Effect<Action> {
        /// Returns the emitted action, if this effect carries one
        #[must_use]
        pub const fn as_emitted(&self) -> Option<&Action> {
            match self {
                Effect::None => None,
                Effect::Emit(action) => Some(action),
            }
        }

        /// Consumes the effect, returning the emitted action if any
        #[must_use]
        pub fn into_emitted(self) -> Option<Action> {
            match self {
                Effect::None => None,
                Effect::Emit(action) => Some(action),
            }
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All non-deterministic inputs are abstracted behind traits and injected
/// via the Environment parameter.
pub mod environment {
    use chrono::{DateTime, Utc};
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Clock trait - abstracts time operations for testability
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    /// Source of identifiers for newly created records
    ///
    /// Implementations must never hand out the same value twice for the lifetime
    /// of the generator, regardless of how fast `next_id` is called.
    pub trait IdGenerator: Send + Sync {
        /// Returns the next identifier
        fn next_id(&self) -> u64;
    }

    /// Monotonic counter id generator
    ///
    /// Ids start at 1 and increase by one per call. Safe to share between threads.
    #[derive(Debug)]
    pub struct SequentialIdGenerator {
        next: AtomicU64,
    }

    impl SequentialIdGenerator {
        /// Creates a generator whose first id is 1
        #[must_use]
        pub const fn new() -> Self {
            Self::starting_at(1)
        }

        /// Creates a generator whose first id is `first`
        #[must_use]
        pub const fn starting_at(first: u64) -> Self {
            Self {
                next: AtomicU64::new(first),
            }
        }
    }

    impl Default for SequentialIdGenerator {
        fn default() -> Self {
            Self::new()
        }
    }

    impl IdGenerator for SequentialIdGenerator {
        fn next_id(&self) -> u64 {
            self.next.fetch_add(1, Ordering::Relaxed)
        }
    }
}
