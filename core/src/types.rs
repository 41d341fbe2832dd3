//! Domain DTOs shared by every page.
//!
//! # Design
//! These types mirror the backend's JSON schema but are defined independently
//! of the mock-server crate. Integration tests catch any schema drift between
//! the two.

use serde::{Deserialize, Serialize};

/// Owner stamped on every todo created from the add form.
pub const DEFAULT_OWNER: &str = "typicode";

/// Name shown on the contact page when the backend gives none.
pub const ANONYMOUS: &str = "No name";

/// The visitor greeted on the contact page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Person {
    #[serde(default = "anonymous")]
    pub name: String,
}

impl Default for Person {
    fn default() -> Self {
        Self { name: anonymous() }
    }
}

fn anonymous() -> String {
    ANONYMOUS.to_string()
}

/// A blog post. Read-only; `id` keys the rendered list item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub author: String,
}

/// A single todo item as stored by the backend.
///
/// `id` is assigned by the backend; zero means "not yet persisted" and such
/// a todo is never sent in a PUT.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: u64,
    pub title: String,
    pub completed: bool,
    pub owner: String,
}

impl Todo {
    pub fn has_valid_id(&self) -> bool {
        self.id != 0
    }
}

/// Request payload for creating a new todo. The backend assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    pub owner: String,
}

impl NewTodo {
    /// Payload submitted by the add form: never completed, fixed owner.
    pub fn from_draft(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            completed: false,
            owner: DEFAULT_OWNER.to_string(),
        }
    }
}
