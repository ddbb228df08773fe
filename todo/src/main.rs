//! Scripted demo of the todo widget.
//!
//! Plays a short user session against the single-owner store, drawing the view
//! model to the terminal after each intent, then shows two surfaces sharing one
//! list through the runtime store.

use std::sync::Arc;
use todo_widget::{
    shared_store, AddForm, Filter, TodoAction, TodoEnvironment, TodoStore, TodoView,
};
use todo_widget_core::environment::SystemClock;
use todo_widget_runtime::StoreConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_widget=debug,todo_widget_runtime=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Todo Widget Demo ===\n");

    let mut store = TodoStore::new();
    let mut form = AddForm::new();

    println!(">>> Submitting an empty form");
    form.submit(&mut store);
    draw(&store.view());

    for text in ["Buy milk", "Write documentation", "Deploy to production"] {
        println!(">>> Typing {text:?} and submitting");
        form.input(text);
        form.submit(&mut store);
    }
    draw(&store.view());

    let ids: Vec<_> = store.items().iter().map(|t| t.id).collect();

    if let Some(&milk) = ids.first() {
        println!(">>> Clicking \"Buy milk\"");
        store.toggle(milk);
        draw(&store.view());
    }

    for filter in [Filter::Active, Filter::Completed] {
        println!(">>> Clicking the {} tab", filter.label());
        store.set_filter(filter);
        draw(&store.view());
    }

    if let Some(&deploy) = ids.last() {
        println!(">>> Deleting \"Deploy to production\" (twice)");
        store.delete(deploy);
        store.delete(deploy);
    }

    println!(">>> Clicking Clear Completed, then the All tab");
    store.clear_completed();
    store.set_filter(Filter::All);
    draw(&store.view());

    println!("Final state:\n{}\n", serde_json::to_string_pretty(store.state())?);

    println!("=== Shared store: two surfaces, one list ===\n");

    let shared = shared_store(
        TodoEnvironment::new(Arc::new(SystemClock)),
        StoreConfig::default(),
    );
    let mut events = shared.subscribe_actions();

    let surfaces: Vec<_> = ["phone", "laptop"]
        .into_iter()
        .map(|surface| {
            let shared = shared.clone();
            tokio::spawn(async move {
                shared
                    .send(TodoAction::AddTodo {
                        text: format!("Added from {surface}"),
                    })
                    .await
            })
        })
        .collect();

    for surface in surfaces {
        surface.await??;
    }

    for _ in 0..2 {
        let event = events.recv().await?;
        println!("observed event: {}", event.name());
    }

    let view = shared.state(TodoView::from_state).await;
    draw(&view);

    println!("=== Demo Complete ===");
    Ok(())
}

/// Renders the view model as plain text
fn draw(view: &TodoView) {
    println!("  {}", view.heading);
    for row in &view.items {
        let mark = if row.done { "x" } else { " " };
        println!("  [{mark}] {}  (#{})", row.text, row.id);
    }
    println!("  {}  [{}]", view.input_label, view.add_button_label);

    let clear = if view.clear_completed_enabled {
        view.clear_completed_label.to_string()
    } else {
        format!("{} (disabled)", view.clear_completed_label)
    };
    println!("  {}  [{clear}]", view.items_left_label);

    let tabs: Vec<_> = view
        .tabs
        .iter()
        .map(|tab| {
            if tab.selected {
                format!("<{}>", tab.label)
            } else {
                tab.label.to_string()
            }
        })
        .collect();
    println!("  {}\n", tabs.join(" | "));
}
