#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use jobboard::pkg::server::{router::build_routes, state::AppState};
use serde_json::{json, Value};

/// How the fake jobs service should answer.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Ok,
    /// Fail the first call with a 500, then answer normally.
    FailOnce,
    AlwaysFail,
    /// Answer after this many milliseconds.
    Slow(u64),
}

#[derive(Clone)]
struct Upstream {
    mode: Mode,
    list_calls: Arc<AtomicUsize>,
    item_calls: Arc<AtomicUsize>,
}

pub struct FakeService {
    pub base_url: String,
    pub list_calls: Arc<AtomicUsize>,
    pub item_calls: Arc<AtomicUsize>,
}

impl FakeService {
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn item_calls(&self) -> usize {
        self.item_calls.load(Ordering::SeqCst)
    }
}

pub fn job(id: &str, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "orgName": "Africa to Silicon Valley",
        "description": "Help build the platform.",
        "location": ["Addis Ababa"],
        "categories": ["Education", "IT"],
        "requiredSkills": ["Rust"],
        "responsibilities": "Write code\n\nReview code",
        "idealCandidate": "Someone curious",
        "whenAndWhere": "Remote",
        "datePosted": "2024-07-14T00:00:00.000Z",
        "deadline": "2024-08-01T00:00:00.000Z",
        "startDate": null,
        "endDate": "not a date",
        "logoUrl": "https://res.cloudinary.com/logo.png"
    })
}

async fn search(State(up): State<Upstream>) -> axum::response::Response {
    delay(&up).await;
    let n = up.list_calls.fetch_add(1, Ordering::SeqCst);
    if let Some(failure) = up.failure(n) {
        return failure;
    }
    Json(json!({
        "success": true,
        "message": "",
        "data": [job("1", "Volunteer Developer"), job("2", "Graphic Designer")],
        "errors": null,
        "count": 2
    }))
    .into_response()
}

async fn by_id(State(up): State<Upstream>, Path(id): Path<String>) -> axum::response::Response {
    delay(&up).await;
    let n = up.item_calls.fetch_add(1, Ordering::SeqCst);
    if let Some(failure) = up.failure(n) {
        return failure;
    }
    if id == "loose-metadata" {
        return Json(json!({
            "success": null,
            "message": {"text": "fetched"},
            "data": job(&id, "Loosely Wrapped"),
            "error": null,
            "errors": [],
            "count": "one"
        }))
        .into_response();
    }
    let data = match id.as_str() {
        "missing" => Value::Null,
        "bare" => json!({"id": "bare", "title": "Bare Listing", "categories": []}),
        _ => job(&id, "Volunteer Developer"),
    };
    Json(json!({"success": true, "message": "", "data": data, "errors": null, "count": 1}))
        .into_response()
}

impl Upstream {
    fn failure(&self, call: usize) -> Option<axum::response::Response> {
        match self.mode {
            Mode::AlwaysFail => Some(server_error()),
            Mode::FailOnce if call == 0 => Some(server_error()),
            _ => None,
        }
    }
}

fn server_error() -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"success": false, "message": "boom", "data": null})),
    )
        .into_response()
}

async fn delay(up: &Upstream) {
    if let Mode::Slow(ms) = up.mode {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}

pub async fn spawn_service(mode: Mode) -> FakeService {
    let up = Upstream {
        mode,
        list_calls: Arc::new(AtomicUsize::new(0)),
        item_calls: Arc::new(AtomicUsize::new(0)),
    };
    let app = Router::new()
        .route("/opportunities/search", get(search))
        .route("/opportunities/:id", get(by_id))
        .with_state(up.clone());
    let base_url = serve(app).await;
    FakeService {
        base_url,
        list_calls: up.list_calls,
        item_calls: up.item_calls,
    }
}

/// Serves `app` on an ephemeral local port and returns its base url.
pub async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}/")
}

pub fn app_state(base_url: &str, render_wait: Duration) -> AppState {
    AppState::from_parts(base_url, Duration::from_secs(5), render_wait)
        .expect("app state")
}

/// Starts the board itself in front of `service` and returns its base url.
pub async fn spawn_board(service: &FakeService, render_wait: Duration) -> String {
    serve(build_routes(app_state(&service.base_url, render_wait))).await
}
