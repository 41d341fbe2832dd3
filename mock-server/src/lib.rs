use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: u64,
    pub title: String,
    pub completed: bool,
    pub owner: String,
}

#[derive(Deserialize)]
pub struct CreateTodo {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub owner: String,
}

/// Full replacement body. A mismatching `id` in the body is ignored; the
/// path decides which record is replaced.
#[derive(Deserialize)]
pub struct ReplaceTodo {
    pub title: String,
    pub completed: bool,
    pub owner: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub author: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
}

/// Initial contents of the backend.
#[derive(Clone, Debug)]
pub struct Seed {
    pub todos: Vec<Todo>,
    pub posts: Vec<Post>,
    pub person: Person,
}

impl Default for Seed {
    fn default() -> Self {
        Self {
            todos: Vec::new(),
            posts: Vec::new(),
            person: Person {
                name: "John Doe".to_string(),
            },
        }
    }
}

impl Seed {
    /// What a fresh json-server database ships with.
    pub fn demo() -> Self {
        Self {
            posts: vec![Post {
                id: 1,
                title: "json-server".to_string(),
                author: "typicode".to_string(),
            }],
            ..Self::default()
        }
    }
}

#[derive(Debug)]
pub struct Store {
    todos: BTreeMap<u64, Todo>,
    posts: Vec<Post>,
    person: Person,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with(Seed::default())
}

pub fn app_with(seed: Seed) -> Router {
    let store = Store {
        todos: seed.todos.into_iter().map(|todo| (todo.id, todo)).collect(),
        posts: seed.posts,
        person: seed.person,
    };
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", get(get_todo).put(replace_todo).delete(delete_todo))
        .route("/posts", get(list_posts))
        .route("/api/hello", get(hello))
        .with_state(db)
}

pub async fn run(listener: TcpListener, seed: Seed) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(seed)).await
}

async fn list_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    let store = db.read().await;
    Json(store.todos.values().cloned().collect())
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<CreateTodo>,
) -> (StatusCode, Json<Todo>) {
    let mut store = db.write().await;
    let id = store.todos.keys().next_back().map_or(1, |last| last + 1);
    let todo = Todo {
        id,
        title: input.title,
        completed: input.completed,
        owner: input.owner,
    };
    debug!(id, "created todo");
    store.todos.insert(id, todo.clone());
    (StatusCode::CREATED, Json(todo))
}

async fn get_todo(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Todo>, StatusCode> {
    let store = db.read().await;
    store.todos.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn replace_todo(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<ReplaceTodo>,
) -> Result<Json<Todo>, StatusCode> {
    let mut store = db.write().await;
    let todo = store.todos.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    *todo = Todo {
        id,
        title: input.title,
        completed: input.completed,
        owner: input.owner,
    };
    debug!(id, "replaced todo");
    Ok(Json(todo.clone()))
}

async fn delete_todo(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    let mut store = db.write().await;
    store
        .todos
        .remove(&id)
        .map(|_| Json(serde_json::json!({})))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn list_posts(State(db): State<Db>) -> Json<Vec<Post>> {
    Json(db.read().await.posts.clone())
}

async fn hello(State(db): State<Db>) -> Json<Person> {
    Json(db.read().await.person.clone())
}
