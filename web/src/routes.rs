use std::collections::VecDeque;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    routing::{get, post},
    Form, Router,
};
use krill_core::{ApiClient, ContactPage, Outgoing, PostsPage, RowEvent, TodosPage};
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::warn;

use crate::render;
use crate::transport::{dispatch, Transport};

/// Shared by every handler. The todos page is a single session owned by the
/// process; requests touching it are serialised by the mutex.
#[derive(Clone)]
pub struct AppState {
    client: ApiClient,
    transport: Arc<dyn Transport>,
    todos: Arc<Mutex<TodosPage>>,
}

impl AppState {
    pub fn new(client: ApiClient, transport: Arc<dyn Transport>) -> Self {
        let todos = TodosPage::new(client.clone());
        Self {
            client,
            transport,
            todos: Arc::new(Mutex::new(todos)),
        }
    }

    /// Execute requests in order until the page stops producing follow-ups.
    async fn drive(&self, page: &mut TodosPage, outgoing: Vec<Outgoing>) {
        let mut queue = VecDeque::from(outgoing);
        while let Some(next) = queue.pop_front() {
            let result = dispatch(self.transport.clone(), next.request).await;
            queue.extend(page.complete(next.ticket, result));
        }
    }

    /// Render pass, then persist whatever it decided to save.
    async fn settle(&self, page: &mut TodosPage, mut outgoing: Vec<Outgoing>) {
        match page.settle() {
            Ok(saves) => outgoing.extend(saves),
            Err(err) => warn!(error = %err, "could not build save request"),
        }
        self.drive(page, outgoing).await;
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/contact", get(contact))
        .route("/posts", get(posts))
        .route("/todos", get(todos).post(add_todo))
        .route("/todos/show-completed", post(toggle_show_completed))
        .route("/todos/{id}/toggle", post(toggle_todo))
        .route("/todos/{id}/edit", post(edit_todo))
        .route("/todos/{id}/title", post(rename_todo))
        .route("/todos/{id}/delete", post(delete_todo))
        .with_state(state)
}

async fn home() -> Html<String> {
    Html(render::home())
}

async fn contact(State(state): State<AppState>) -> Html<String> {
    let result = dispatch(state.transport.clone(), ContactPage::request(&state.client)).await;
    let page = ContactPage::complete(&state.client, result);
    if let Some(err) = page.person.error() {
        warn!(error = err, "contact fetch failed");
    }
    Html(render::contact(&page))
}

async fn posts(State(state): State<AppState>) -> Html<String> {
    let result = dispatch(state.transport.clone(), PostsPage::request(&state.client)).await;
    let page = PostsPage::complete(&state.client, result);
    if let Some(err) = page.posts.error() {
        warn!(error = err, "posts fetch failed");
    }
    Html(render::posts(&page))
}

/// Fetch on every visit, render, then run the render pass so rows that just
/// appeared are mounted.
async fn todos(State(state): State<AppState>) -> Html<String> {
    let mut page = state.todos.lock().await;
    let fetch = page.fetch_todos();
    state.drive(&mut page, vec![fetch]).await;
    let html = render::todos(&page);
    state.settle(&mut page, Vec::new()).await;
    Html(html)
}

#[derive(Deserialize)]
struct AddForm {
    #[serde(rename = "new-todo", default)]
    new_todo: String,
}

async fn add_todo(State(state): State<AppState>, Form(form): Form<AddForm>) -> Redirect {
    let mut page = state.todos.lock().await;
    page.set_draft(form.new_todo);
    match page.submit_draft() {
        Ok(post) => state.drive(&mut page, vec![post]).await,
        Err(err) => warn!(error = %err, "could not build create request"),
    }
    Redirect::to("/todos")
}

async fn toggle_show_completed(State(state): State<AppState>) -> Redirect {
    state.todos.lock().await.toggle_show_completed();
    Redirect::to("/todos")
}

async fn toggle_todo(State(state): State<AppState>, Path(id): Path<u64>) -> Redirect {
    row_events(&state, id, vec![RowEvent::ToggleCompleted]).await
}

async fn edit_todo(State(state): State<AppState>, Path(id): Path<u64>) -> Redirect {
    row_events(&state, id, vec![RowEvent::ClickTitle]).await
}

#[derive(Deserialize)]
struct TitleForm {
    title: String,
}

/// Submitting the inline input is the edit followed by the blur.
async fn rename_todo(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Form(form): Form<TitleForm>,
) -> Redirect {
    row_events(&state, id, vec![RowEvent::EditTitle(form.title), RowEvent::Blur]).await
}

async fn delete_todo(State(state): State<AppState>, Path(id): Path<u64>) -> Redirect {
    row_events(&state, id, vec![RowEvent::Delete]).await
}

/// Apply one batch of UI events to a row, then settle the page.
async fn row_events(state: &AppState, id: u64, events: Vec<RowEvent>) -> Redirect {
    let mut page = state.todos.lock().await;
    let mut outgoing = Vec::new();
    for event in events {
        match page.row_event(id, event) {
            Ok(Some(request)) => outgoing.push(request),
            Ok(None) => {}
            Err(err) => warn!(id, error = %err, "could not build row request"),
        }
    }
    state.settle(&mut page, outgoing).await;
    Redirect::to("/todos")
}
