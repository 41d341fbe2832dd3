//! Read-only pages: one fetch, then render.

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::fetch::Loadable;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{Person, Post};

/// Greeting plus a message form that goes nowhere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactPage {
    pub person: Loadable<Person>,
}

impl ContactPage {
    pub fn request(client: &ApiClient) -> HttpRequest {
        client.build_get_person()
    }

    pub fn complete(client: &ApiClient, result: Result<HttpResponse, ApiError>) -> Self {
        Self {
            person: Loadable::from_result(result.and_then(|response| client.parse_get_person(response))),
        }
    }

    /// Name to greet. Falls back to the anonymous person unless the fetch
    /// succeeded.
    pub fn name(&self) -> &str {
        match &self.person {
            Loadable::Ready(person) => &person.name,
            _ => crate::types::ANONYMOUS,
        }
    }
}

/// Titles of every post, in backend order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostsPage {
    pub posts: Loadable<Vec<Post>>,
}

impl PostsPage {
    pub fn request(client: &ApiClient) -> HttpRequest {
        client.build_list_posts()
    }

    pub fn complete(client: &ApiClient, result: Result<HttpResponse, ApiError>) -> Self {
        Self {
            posts: Loadable::from_result(result.and_then(|response| client.parse_list_posts(response))),
        }
    }

    pub fn posts(&self) -> &[Post] {
        self.posts.ready().map(Vec::as_slice).unwrap_or(&[])
    }
}
