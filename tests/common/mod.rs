//! Local stand-in for the remote meme API.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};
use std::time::Duration;
use tower_http::trace::TraceLayer;

#[derive(Clone, Default)]
pub struct ApiState {
    pub hits: Arc<AtomicUsize>,
    pub delay: Option<Duration>,
}

impl ApiState {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

pub fn wire_memes() -> Value {
    json!([
        {
            "_id": "65f0aa",
            "captions": ["Deploy on Friday", "what could go wrong"],
            "upvotes": 10,
            "downvotes": 2,
            "comments": 4,
            "topic": "devops",
            "timestamp": 1700000000000i64
        },
        {
            "_id": "65f0bb",
            "captions": [],
            "upvotes": 0,
            "downvotes": 0,
            "comments": 0,
            "topic": "misc",
            "timestamp": 1700000100000i64
        },
        {
            "_id": 7,
            "captions": ["Numeric id"],
            "upvotes": 1,
            "downvotes": 1,
            "comments": 0,
            "topic": "legacy",
            "timestamp": 0
        },
        {
            "_id": "65f0cc",
            "captions": null,
            "upvotes": null,
            "downvotes": null,
            "comments": null,
            "topic": null,
            "author": null,
            "timestamp": null
        }
    ])
}

async fn pause(state: &ApiState) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    if let Some(delay) = state.delay {
        tokio::time::sleep(delay).await;
    }
}

async fn list_memes(State(state): State<ApiState>) -> Json<Value> {
    pause(&state).await;
    Json(wire_memes())
}

async fn get_meme(State(state): State<ApiState>, Path(id): Path<String>) -> Response {
    pause(&state).await;
    let found = wire_memes().as_array().and_then(|memes| {
        memes
            .iter()
            .find(|m| m["_id"].to_string().trim_matches('"') == id)
            .cloned()
    });
    match found {
        Some(meme) => Json(json!({ "meme": meme })).into_response(),
        None => {
            let body = json!({ "error": format!("Meme not found with ID: {}", id) });
            (StatusCode::NOT_FOUND, Json(body)).into_response()
        }
    }
}

/// Router shaped like the real API.
pub fn healthy_router(state: ApiState) -> Router {
    Router::new()
        .route("/memes", get(list_memes))
        .route("/meme/{id}", get(get_meme))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Router that answers every route with HTML or a server error.
pub fn broken_router() -> Router {
    Router::new()
        .route("/memes", get(|| async { "<html>maintenance</html>" }))
        .route("/meme/{id}", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
        .layer(TraceLayer::new_for_http())
}

/// Serves `router` on an ephemeral port and returns its base URL.
pub async fn spawn_api(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}
