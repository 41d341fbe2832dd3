//! Stateless HTTP request builder and response parser for the backend.
//!
//! # Design
//! `ApiClient` holds only base URLs and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the actual HTTP round-trip.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{NewTodo, Person, Post, Todo};

#[derive(Debug, Clone)]
pub struct ApiClient {
    api_url: String,
    next_api_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            api_url: config.api_url.trim_end_matches('/').to_string(),
            next_api_url: config.next_api_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn todos_url(&self) -> String {
        format!("{}/todos", self.api_url)
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        get(self.todos_url())
    }

    pub fn build_create_todo(&self, input: &NewTodo) -> Result<HttpRequest, ApiError> {
        with_json(HttpMethod::Post, self.todos_url(), input)
    }

    /// Full replacement of the stored todo, addressed by its id.
    pub fn build_update_todo(&self, todo: &Todo) -> Result<HttpRequest, ApiError> {
        with_json(HttpMethod::Put, format!("{}/{}", self.todos_url(), todo.id), todo)
    }

    pub fn build_delete_todo(&self, id: u64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            url: format!("{}/{id}", self.todos_url()),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_list_posts(&self) -> HttpRequest {
        get(format!("{}/posts", self.api_url))
    }

    pub fn build_get_person(&self) -> HttpRequest {
        get(format!("{}/api/hello", self.next_api_url))
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        decode(response)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        decode(response)
    }

    /// The page refetches after every update, so the echoed record is not
    /// decoded; only the status matters.
    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_list_posts(&self, response: HttpResponse) -> Result<Vec<Post>, ApiError> {
        decode(response)
    }

    pub fn parse_get_person(&self, response: HttpResponse) -> Result<Person, ApiError> {
        decode(response)
    }
}

fn get(url: String) -> HttpRequest {
    HttpRequest {
        method: HttpMethod::Get,
        url,
        headers: Vec::new(),
        body: None,
    }
}

fn with_json<T: Serialize>(method: HttpMethod, url: String, input: &T) -> Result<HttpRequest, ApiError> {
    let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
    Ok(HttpRequest {
        method,
        url,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    })
}

fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
