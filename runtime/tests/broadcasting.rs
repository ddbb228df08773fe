//! Integration tests for Store action broadcasting and serialization of
//! concurrent senders.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use std::time::Duration;
use todo_widget_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
use todo_widget_runtime::{Store, StoreConfig};
use tokio::sync::broadcast::error::RecvError;

// ============================================================================
// Test Fixtures
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum ListAction {
    /// Append a value
    Push(u32),
    /// Remove everything
    Clear,
    /// Value appended at position
    Pushed { value: u32, position: usize },
    /// List emptied
    Cleared { removed: usize },
}

#[derive(Debug, Clone, Default)]
struct ListState {
    values: Vec<u32>,
}

#[derive(Clone)]
struct ListReducer;

impl Reducer for ListReducer {
    type State = ListState;
    type Action = ListAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            ListAction::Push(value) => {
                state.values.push(value);
                smallvec![Effect::Emit(ListAction::Pushed {
                    value,
                    position: state.values.len() - 1,
                })]
            }
            ListAction::Clear if state.values.is_empty() => SmallVec::new(),
            ListAction::Clear => {
                let removed = state.values.len();
                state.values.clear();
                smallvec![Effect::Emit(ListAction::Cleared { removed })]
            }
            ListAction::Pushed { .. } | ListAction::Cleared { .. } => SmallVec::new(),
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("todo_widget_runtime=trace")
        .with_test_writer()
        .try_init();
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn subscriber_receives_emitted_actions_in_order() {
    init_tracing();
    let store = Store::new(ListState::default(), ListReducer, ());
    let mut rx = store.subscribe_actions();

    store.send(ListAction::Push(10)).await.unwrap();
    store.send(ListAction::Push(20)).await.unwrap();
    store.send(ListAction::Clear).await.unwrap();

    assert_eq!(
        rx.recv().await.unwrap(),
        ListAction::Pushed {
            value: 10,
            position: 0
        }
    );
    assert_eq!(
        rx.recv().await.unwrap(),
        ListAction::Pushed {
            value: 20,
            position: 1
        }
    );
    assert_eq!(rx.recv().await.unwrap(), ListAction::Cleared { removed: 2 });
}

#[tokio::test]
async fn no_op_actions_are_not_broadcast() {
    let store = Store::new(ListState::default(), ListReducer, ());
    let mut rx = store.subscribe_actions();

    let emitted = store.send(ListAction::Clear).await.unwrap();
    assert!(emitted.is_empty());

    let nothing = tokio::time::timeout(Duration::from_millis(50), rx.recv()).await;
    assert!(nothing.is_err(), "expected no broadcast, got {nothing:?}");
}

#[tokio::test]
async fn initial_action_is_not_broadcast() {
    let store = Store::new(ListState::default(), ListReducer, ());
    let mut rx = store.subscribe_actions();

    store.send(ListAction::Push(1)).await.unwrap();

    let received = rx.recv().await.unwrap();
    assert!(matches!(received, ListAction::Pushed { .. }));
}

#[tokio::test]
async fn slow_subscriber_lags() {
    let config = StoreConfig::default().with_broadcast_capacity(2);
    let store = Store::with_config(ListState::default(), ListReducer, (), config);
    let mut rx = store.subscribe_actions();

    for value in 0..5 {
        store.send(ListAction::Push(value)).await.unwrap();
    }

    match rx.recv().await {
        Err(RecvError::Lagged(skipped)) => assert_eq!(skipped, 3),
        other => panic!("expected lag, got {other:?}"),
    }
}

#[tokio::test]
async fn concurrent_senders_are_serialized() {
    let store = Store::new(ListState::default(), ListReducer, ());

    let handles: Vec<_> = (0..20)
        .map(|value| {
            let store = store.clone();
            tokio::spawn(async move { store.send(ListAction::Push(value)).await })
        })
        .collect();

    let mut positions = Vec::new();
    for handle in handles {
        let emitted = handle.await.unwrap().unwrap();
        match emitted.as_slice() {
            [ListAction::Pushed { position, .. }] => positions.push(*position),
            other => panic!("unexpected emission {other:?}"),
        }
    }

    positions.sort_unstable();
    assert_eq!(positions, (0..20).collect::<Vec<_>>());
    assert_eq!(store.state(|s| s.values.len()).await, 20);
}
