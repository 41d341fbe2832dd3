//! I/O-free core of the Krill Space front-end.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and holds the page state
//! machines that decide which requests to send. The host executes every
//! round-trip and feeds the response back, which keeps all UI behavior
//! deterministic and testable.
//!
//! # Design
//! - `ApiClient` is stateless; it holds only the base URLs from `ApiConfig`.
//! - Each backend operation is split into `build_*` and `parse_*`.
//! - `TodoRow` is the per-row viewing/editing machine; `TodosPage` owns the
//!   rows and the refetch-wins reconciliation.
//! - `ContactPage` and `PostsPage` are single-fetch views over `Loadable`.

pub mod client;
pub mod config;
pub mod error;
pub mod fetch;
pub mod http;
pub mod pages;
pub mod todo_row;
pub mod todos_page;
pub mod types;

pub use client::ApiClient;
pub use config::ApiConfig;
pub use error::ApiError;
pub use fetch::{Loadable, MutationState};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use pages::{ContactPage, PostsPage};
pub use todo_row::{RowEffect, RowEvent, RowMode, TodoRow};
pub use todos_page::{MutationFailure, Operation, Outgoing, Ticket, TodosPage};
pub use types::{NewTodo, Person, Post, Todo, DEFAULT_OWNER};
