//! # Todo Widget Runtime
//!
//! A shared, thread-safe store around any [`Reducer`].
//!
//! The synchronous stores in the domain crates own their state outright. When
//! several presentation surfaces feed intents into the same list at once, wrap
//! the reducer in this [`Store`] instead: every action is reduced while holding
//! one write lock, so intents are applied strictly one after another.
//!
//! ## Core Components
//!
//! - **Store**: Owns state behind a `RwLock` and runs the reducer
//! - **Action broadcast**: Every emitted action is published to subscribers
//! - **StoreConfig**: Runtime tuning (broadcast capacity)
//!
//! ## Example
//!
//! ```ignore
//! use todo_widget_runtime::Store;
//!
//! let store = Store::new(TodoState::new(), TodoReducer::new(), env);
//!
//! // Send an action
//! store.send(TodoAction::AddTodo { text: "Buy milk".into() }).await?;
//!
//! // Read state
//! let remaining = store.state(TodoState::remaining_count).await;
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use todo_widget_core::{effect::Effect, reducer::Reducer};
use tokio::sync::RwLock;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    ///
    /// Reducers themselves never fail; these errors come from the store's own
    /// lifecycle.
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        ///
        /// This error is returned when `send()` is called after `shutdown()`.
        #[error("Store is shutting down")]
        ShutdownInProgress,
    }
}

pub use error::StoreError;

/// Default number of emitted actions buffered per subscriber
pub const DEFAULT_BROADCAST_CAPACITY: usize = 16;

/// Configuration for Store instances
///
/// # Example
///
/// ```
/// use todo_widget_runtime::StoreConfig;
///
/// let config = StoreConfig::default().with_broadcast_capacity(256);
/// assert_eq!(config.broadcast_capacity, 256);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    /// Number of emitted actions buffered per subscriber before it lags
    pub broadcast_capacity: usize,
}

impl StoreConfig {
    /// Set the broadcast capacity
    ///
    /// A capacity of zero is raised to one, the smallest channel tokio accepts.
    #[must_use]
    pub const fn with_broadcast_capacity(mut self, capacity: usize) -> Self {
        self.broadcast_capacity = if capacity == 0 { 1 } else { capacity };
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            broadcast_capacity: DEFAULT_BROADCAST_CAPACITY,
        }
    }
}

/// Store module - The runtime for reducers
pub mod store {
    use super::{Arc, AtomicBool, Effect, Ordering, Reducer, RwLock, StoreConfig, StoreError};
    use tokio::sync::broadcast;

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock` for concurrent access)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Broadcasting of emitted actions to observers
    ///
    /// Cloning a Store is cheap and yields a handle to the same state.
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: Arc<R>,
        environment: Arc<E>,
        shutdown: Arc<AtomicBool>,
        action_broadcast: broadcast::Sender<A>,
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: Arc::clone(&self.reducer),
                environment: Arc::clone(&self.environment),
                shutdown: Arc::clone(&self.shutdown),
                action_broadcast: self.action_broadcast.clone(),
            }
        }
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
        A: Clone,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// Uses [`StoreConfig::default`].
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new Store with custom configuration
        #[must_use]
        pub fn with_config(
            initial_state: S,
            reducer: R,
            environment: E,
            config: StoreConfig,
        ) -> Self {
            let (action_broadcast, _) = broadcast::channel(config.broadcast_capacity.max(1));

            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer: Arc::new(reducer),
                environment: Arc::new(environment),
                shutdown: Arc::new(AtomicBool::new(false)),
                action_broadcast,
            }
        }

        /// Send an action to the store
        ///
        /// 1. Acquires the write lock on state
        /// 2. Calls the reducer with (state, action, environment)
        /// 3. Broadcasts every emitted action to subscribers
        ///
        /// Concurrent `send()` calls serialize on the write lock, so each
        /// action observes the state left by the previous one.
        ///
        /// # Returns
        ///
        /// The actions emitted by the reducer, in order. Empty when the action
        /// changed nothing.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<Vec<A>, StoreError> {
            if self.shutdown.load(Ordering::Acquire) {
                tracing::warn!("Rejected action: store is shutting down");
                metrics::counter!("store.shutdown.rejected_actions").increment(1);
                return Err(StoreError::ShutdownInProgress);
            }

            metrics::counter!("store.commands.total").increment(1);

            let emitted: Vec<A> = {
                let mut state = self.state.write().await;
                tracing::trace!("Acquired write lock on state");

                let start = std::time::Instant::now();
                let effects = self.reducer.reduce(&mut *state, action, &*self.environment);
                metrics::histogram!("store.reducer.duration_seconds")
                    .record(start.elapsed().as_secs_f64());

                effects.into_iter().filter_map(Effect::into_emitted).collect()
            };

            tracing::debug!(emitted = emitted.len(), "Action reduced");
            metrics::counter!("store.events.emitted").increment(emitted.len() as u64);

            for action in &emitted {
                // No subscribers is not an error
                let _ = self.action_broadcast.send(action.clone());
            }

            Ok(emitted)
        }

        /// Read the current state through a projection
        ///
        /// The closure runs under the read lock; keep it short.
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&*state)
        }

        /// Subscribe to every action emitted from now on
        ///
        /// A receiver that falls more than `broadcast_capacity` actions behind
        /// gets `RecvError::Lagged` and skips ahead.
        #[must_use]
        pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
            self.action_broadcast.subscribe()
        }

        /// Stop accepting new actions
        ///
        /// Actions already holding the write lock finish normally. Reads keep
        /// working after shutdown.
        pub fn shutdown(&self) {
            tracing::info!("Store shutting down");
            self.shutdown.store(true, Ordering::Release);
        }

        /// Returns true once [`Store::shutdown`] has been called on any handle
        #[must_use]
        pub fn is_shutting_down(&self) -> bool {
            self.shutdown.load(Ordering::Acquire)
        }
    }
}

pub use store::Store;
