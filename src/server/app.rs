use std::sync::Arc;

use axum::extract::FromRef;
use axum::http::{header, Method, StatusCode};
use axum::middleware::map_response;
use axum::response::{IntoResponse, Response};
use axum::{routing::get, Router};
use prometheus::{Encoder, TextEncoder};
use routes::{category_router, questions_router, quizzes_router};
use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::error::ApiError;
use super::routes;
use crate::config::Settings;
use crate::db::{SqliteRepository, TriviaRepository};
use crate::quiz::{RandomSource, StdRandom};

#[derive(FromRef, Clone)]
pub struct AppState {
    repo: Arc<dyn TriviaRepository>,
    random: Arc<dyn RandomSource>,
}

impl AppState {
    pub fn new(repo: Arc<dyn TriviaRepository>, random: Arc<dyn RandomSource>) -> Self {
        Self { repo, random }
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/metrics", get(metrics))
        .merge(category_router(state.clone()))
        .merge(questions_router(state.clone()))
        .merge(quizzes_router(state))
        .fallback(|| async {
            tracing::info!("Fallback");
            ApiError::NotFound("no such route".to_owned())
        })
        .layer(map_response(method_not_allowed_envelope))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn run_server(settings: Settings, pool: SqlitePool) -> anyhow::Result<()> {
    let addr = settings.application.address();
    let state = AppState::new(
        Arc::new(SqliteRepository::new(pool)),
        Arc::new(StdRandom::from_seed(settings.quiz.seed)),
    );
    let app = build_router(state);
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("Serving on {addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("Server stopped");
    Ok(())
}

// axum answers a known path with the wrong method with an empty 405
async fn method_not_allowed_envelope(response: Response) -> Response {
    if response.status() == StatusCode::METHOD_NOT_ALLOWED {
        return ApiError::MethodNotAllowed.into_response();
    }
    response
}

async fn metrics() -> Response {
    let encoder = TextEncoder::new();
    let metrics = prometheus::gather();
    let mut buf = vec![];
    if let Err(e) = encoder.encode(&metrics, &mut buf) {
        tracing::error!("Failed to encode metrics: {e}");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    (
        [(header::CONTENT_TYPE, encoder.format_type().to_owned())],
        buf,
    )
        .into_response()
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received Ctrl+C, shutting down");
}
