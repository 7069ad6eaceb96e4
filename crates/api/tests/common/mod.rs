#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use rugcat_api::config::ServerConfig;
use rugcat_api::router::build_app_router;
use rugcat_api::state::AppState;
use rugcat_core::reconcile::NewRug;
use rugcat_db::repositories::RugRepo;
use sqlx::PgPool;
use tower::ServiceExt;

/// Test `ServerConfig` with the dev CORS origin and a 30-second timeout.
pub fn test_config(public_dir: PathBuf) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        public_dir,
    }
}

/// Full application router over `pool`, with a public directory that
/// does not exist.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_public(pool, Path::new("/nonexistent/public"))
}

/// Full application router serving static files from `public_dir`.
pub fn build_test_app_with_public(pool: PgPool, public_dir: &Path) -> Router {
    let config = test_config(public_dir.to_path_buf());
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn new_rug(number: &str, name: Option<&str>, length: i64, width: i64, price: i64) -> NewRug {
    NewRug {
        rug_number: number.to_string(),
        name: name.map(str::to_string),
        length_cm: length,
        width_cm: width,
        color: None,
        price_cents: price,
        image_path: None,
    }
}

pub async fn seed(pool: &PgPool, rugs: &[NewRug]) {
    for rug in rugs {
        RugRepo::upsert(pool, rug).await.unwrap();
    }
}
