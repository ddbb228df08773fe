//! Integration tests for the todo reducer running inside the shared runtime store.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use std::collections::HashSet;
use std::sync::Arc;
use todo_widget::{
    shared_store, Filter, SharedTodoStore, TodoAction, TodoEnvironment, TodoState, TodoView,
};
use todo_widget_runtime::{StoreConfig, StoreError};
use todo_widget_testing::test_clock;

fn store() -> SharedTodoStore {
    shared_store(
        TodoEnvironment::new(Arc::new(test_clock())),
        StoreConfig::default().with_broadcast_capacity(256),
    )
}

async fn add(store: &SharedTodoStore, text: &str) -> todo_widget::TodoId {
    let emitted = store
        .send(TodoAction::AddTodo {
            text: text.to_string(),
        })
        .await
        .unwrap();
    match emitted.as_slice() {
        [TodoAction::TodoAdded { item }] => item.id,
        other => panic!("expected TodoAdded, got {other:?}"),
    }
}

#[tokio::test]
async fn concurrent_adds_get_distinct_ids() {
    let store = store();

    let handles: Vec<_> = (0..50)
        .map(|n| {
            let store = store.clone();
            tokio::spawn(async move { add(&store, &format!("todo {n}")).await })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        assert!(ids.insert(handle.await.unwrap()));
    }

    assert_eq!(store.state(TodoState::count).await, 50);
    assert_eq!(store.state(TodoState::remaining_count).await, 50);
}

#[tokio::test]
async fn observers_see_every_change_in_order() {
    let store = store();
    let mut rx = store.subscribe_actions();

    let a = add(&store, "A").await;
    add(&store, "B").await;
    store.send(TodoAction::ToggleTodo { id: a }).await.unwrap();
    store
        .send(TodoAction::SetFilter {
            filter: Filter::Completed,
        })
        .await
        .unwrap();
    store.send(TodoAction::ClearCompleted).await.unwrap();

    let mut names = Vec::new();
    for _ in 0..5 {
        names.push(rx.recv().await.unwrap().name());
    }
    assert_eq!(
        names,
        [
            "TodoAdded",
            "TodoAdded",
            "TodoToggled",
            "FilterChanged",
            "CompletedCleared"
        ]
    );

    let view = store.state(TodoView::from_state).await;
    assert!(view.items.is_empty());
    assert_eq!(view.items_left_label, "1 item left");
}

#[tokio::test]
async fn no_op_intents_emit_nothing() {
    let store = store();
    let a = add(&store, "A").await;
    store.send(TodoAction::DeleteTodo { id: a }).await.unwrap();

    let again = store.send(TodoAction::DeleteTodo { id: a }).await.unwrap();
    let toggle = store.send(TodoAction::ToggleTodo { id: a }).await.unwrap();
    let empty = store
        .send(TodoAction::AddTodo {
            text: String::new(),
        })
        .await
        .unwrap();

    assert!(again.is_empty());
    assert!(toggle.is_empty());
    assert!(empty.is_empty());
    assert_eq!(store.state(TodoState::count).await, 0);
}

#[tokio::test]
async fn shutdown_rejects_intents_but_keeps_reads() {
    let store = store();
    add(&store, "A").await;

    store.shutdown();

    let result = store.send(TodoAction::ClearCompleted).await;
    assert_eq!(result, Err(StoreError::ShutdownInProgress));
    assert_eq!(store.state(TodoState::count).await, 1);
}
