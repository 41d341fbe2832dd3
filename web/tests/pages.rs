//! End-to-end: web front-end in front of the live mock backend.
//!
//! # Design
//! The mock server runs on a random port in its own thread. The front-end is
//! driven through `tower::ServiceExt::oneshot`, with a recording transport
//! wrapped around ureq so each test can assert the exact backend traffic a
//! form post produced.

use std::sync::{Arc, Mutex};

use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use krill_core::{ApiConfig, ApiError, HttpMethod, HttpRequest, HttpResponse};
use krill_web::{app_with, Transport, UreqTransport};
use mock_server::{Post, Seed, Todo};
use tower::ServiceExt;

#[derive(Default)]
struct Recorder {
    inner: UreqTransport,
    log: Mutex<Vec<HttpRequest>>,
}

impl Recorder {
    fn take(&self) -> Vec<HttpRequest> {
        std::mem::take(&mut *self.log.lock().unwrap())
    }
}

impl Transport for Recorder {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.log.lock().unwrap().push(request.clone());
        self.inner.execute(request)
    }
}

fn start_backend(seed: Seed) -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, seed).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn front_end(seed: Seed) -> (Router, Arc<Recorder>, String) {
    let base = start_backend(seed);
    let recorder = Arc::new(Recorder::default());
    let app = app_with(&ApiConfig::single(&base), recorder.clone());
    (app, recorder, base)
}

fn todo(id: u64, title: &str, completed: bool) -> Todo {
    Todo {
        id,
        title: title.to_string(),
        completed,
        owner: "typicode".to_string(),
    }
}

async fn get_html(app: &Router, uri: &str) -> String {
    let resp = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(String::new()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn post_form(app: &Router, uri: &str, body: &str) {
    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(body.to_string())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()[header::LOCATION], "/todos");
}

fn methods(log: &[HttpRequest]) -> Vec<HttpMethod> {
    log.iter().map(|req| req.method).collect()
}

fn body_json(req: &HttpRequest) -> serde_json::Value {
    serde_json::from_str(req.body.as_deref().unwrap()).unwrap()
}

#[tokio::test]
async fn home_needs_no_backend() {
    let (app, recorder, _) = front_end(Seed::default());
    let html = get_html(&app, "/").await;
    assert!(html.contains("Krill Space"));
    assert!(recorder.take().is_empty());
}

#[tokio::test]
async fn contact_greets_backend_person() {
    let (app, recorder, base) = front_end(Seed::default());
    let html = get_html(&app, "/contact").await;
    assert!(html.contains("Hello, John Doe"));
    let log = recorder.take();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].url, format!("{base}/api/hello"));
}

#[tokio::test]
async fn empty_posts_page_has_no_items_or_error() {
    let (app, _, _) = front_end(Seed::default());
    let html = get_html(&app, "/posts").await;
    assert!(!html.contains("<li"));
    assert!(!html.contains("class=\"error\""));
}

#[tokio::test]
async fn posts_page_lists_titles() {
    let (app, _, _) = front_end(Seed {
        posts: vec![
            Post { id: 1, title: "json-server".to_string(), author: "typicode".to_string() },
            Post { id: 2, title: "second".to_string(), author: "typicode".to_string() },
        ],
        ..Seed::default()
    });
    let html = get_html(&app, "/posts").await;
    assert_eq!(html.matches("<li").count(), 2);
    assert!(html.contains(">second</li>"));
}

#[tokio::test]
async fn todos_table_hides_completed_until_toggled() {
    let (app, _, _) = front_end(Seed {
        todos: vec![todo(1, "open", false), todo(2, "done", true), todo(3, "also open", false)],
        ..Seed::default()
    });

    let html = get_html(&app, "/todos").await;
    assert_eq!(html.matches("class=\"todo-row\"").count(), 2);

    post_form(&app, "/todos/show-completed", "").await;
    let html = get_html(&app, "/todos").await;
    assert_eq!(html.matches("class=\"todo-row\"").count(), 3);
}

#[tokio::test]
async fn add_form_posts_then_refetches() {
    let (app, recorder, base) = front_end(Seed::default());
    get_html(&app, "/todos").await;
    recorder.take();

    post_form(&app, "/todos", "new-todo=Buy+milk").await;

    let log = recorder.take();
    assert_eq!(methods(&log), vec![HttpMethod::Post, HttpMethod::Get]);
    assert_eq!(log[0].url, format!("{base}/todos"));
    assert_eq!(
        body_json(&log[0]),
        serde_json::json!({"title": "Buy milk", "completed": false, "owner": "typicode"})
    );
    assert_eq!(log[1].url, format!("{base}/todos"));

    let html = get_html(&app, "/todos").await;
    assert!(html.contains(">Buy milk</button>"));
    assert!(html.contains("id=\"new-todo\" value=\"\""));
}

#[tokio::test]
async fn delete_issues_delete_then_refetch() {
    let (app, recorder, base) = front_end(Seed {
        todos: vec![todo(41, "keep", false), todo(42, "drop", false)],
        ..Seed::default()
    });
    get_html(&app, "/todos").await;
    recorder.take();

    post_form(&app, "/todos/42/delete", "").await;

    let log = recorder.take();
    assert_eq!(methods(&log), vec![HttpMethod::Delete, HttpMethod::Get]);
    assert_eq!(log[0].url, format!("{base}/todos/42"));

    let html = get_html(&app, "/todos").await;
    assert!(!html.contains("todo-row-42"));
    assert!(html.contains("todo-row-41"));
}

#[tokio::test]
async fn toggle_persists_full_record() {
    let (app, recorder, base) = front_end(Seed {
        todos: vec![todo(7, "Walk dog", false)],
        ..Seed::default()
    });
    get_html(&app, "/todos").await;
    recorder.take();

    post_form(&app, "/todos/7/toggle", "").await;

    let log = recorder.take();
    assert_eq!(methods(&log), vec![HttpMethod::Put, HttpMethod::Get]);
    assert_eq!(log[0].url, format!("{base}/todos/7"));
    assert_eq!(
        body_json(&log[0]),
        serde_json::json!({"id": 7, "title": "Walk dog", "completed": true, "owner": "typicode"})
    );

    // Completed rows are hidden by default.
    let html = get_html(&app, "/todos").await;
    assert!(!html.contains("todo-row-7"));
}

#[tokio::test]
async fn inline_edit_saves_once_on_blur() {
    let (app, recorder, _) = front_end(Seed {
        todos: vec![todo(3, "Old title", false)],
        ..Seed::default()
    });
    get_html(&app, "/todos").await;
    recorder.take();

    post_form(&app, "/todos/3/edit", "").await;
    assert!(recorder.take().is_empty(), "entering edit mode must not save");
    let html = get_html(&app, "/todos").await;
    assert!(html.contains("id=\"todo-3\" value=\"Old title\""));
    recorder.take();

    post_form(&app, "/todos/3/title", "title=New+title").await;
    let log = recorder.take();
    assert_eq!(methods(&log), vec![HttpMethod::Put, HttpMethod::Get]);
    assert_eq!(
        body_json(&log[0]),
        serde_json::json!({"id": 3, "title": "New title", "completed": false, "owner": "typicode"})
    );

    let html = get_html(&app, "/todos").await;
    assert!(html.contains(">New title</button>"));
    let puts = recorder
        .take()
        .into_iter()
        .filter(|req| req.method == HttpMethod::Put)
        .count();
    assert_eq!(puts, 0, "rendering must not save again");
}

#[tokio::test]
async fn unreachable_backend_renders_error_state() {
    let addr = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
    let app = app_with(
        &ApiConfig::single(format!("http://{addr}")),
        Arc::new(UreqTransport::new()),
    );

    let html = get_html(&app, "/todos").await;
    assert!(html.contains("class=\"error\""));
    assert!(html.contains("transport failed"));

    let html = get_html(&app, "/posts").await;
    assert!(html.contains("class=\"error\""));

    let html = get_html(&app, "/contact").await;
    assert!(html.contains("Hello, No name"));
}
