pub mod diagnosis;
pub mod disease;
pub mod image;
pub mod plant;
pub mod response;
pub mod treatment;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Extension, Router,
};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::{classifier::Classifier, config::Config, error::ApiError, storage::PlaceholderStorage};

async fn health_check() -> &'static str {
    "OK"
}

/// Builds every public route with the store, classifier and storage injected
/// as request extensions.
pub fn router(db: DatabaseConnection, classifier: Arc<dyn Classifier>, config: &Config) -> Router {
    let storage = PlaceholderStorage::new(config.storage_base_url.clone());

    Router::new()
        .route("/health", get(health_check))
        .route("/plants", get(plant::list_plants))
        .route("/diseases", get(disease::list_diseases))
        .route("/diseases/:id", get(disease::get_disease))
        .route("/treatments", get(treatment::list_treatments))
        .route(
            "/diagnoses",
            get(diagnosis::list_diagnoses).post(diagnosis::create_diagnosis),
        )
        .route("/images", post(image::upload_image))
        .layer(Extension(db))
        .layer(Extension(classifier))
        .layer(Extension(storage))
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<axum::body::Body>| {
                    let matched_path = request
                        .extensions()
                        .get::<axum::extract::MatchedPath>()
                        .map(|matched| matched.as_str());

                    // "METHOD /path", e.g. "POST /diagnoses"
                    let span_name = if let Some(path) = matched_path {
                        format!("{} {}", request.method(), path)
                    } else {
                        format!("{} {}", request.method(), request.uri().path())
                    };

                    let client_ip = request
                        .headers()
                        .get("x-forwarded-for")
                        .and_then(|v| v.to_str().ok())
                        .or_else(|| {
                            request
                                .headers()
                                .get("x-real-ip")
                                .and_then(|v| v.to_str().ok())
                        })
                        .unwrap_or("unknown");

                    tracing::info_span!(
                        "request",
                        "otel.name" = span_name,
                        client_ip = client_ip,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        // Filled in by handlers
                        image_id = tracing::field::Empty,
                        diagnosis_id = tracing::field::Empty,
                        disease_id = tracing::field::Empty,
                        user_id = tracing::field::Empty,
                        error = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency = tracing::field::Empty,
                    )
                })
                .on_request(|_request: &axum::http::Request<axum::body::Body>, _span: &tracing::Span| {})
                .on_response(
                    |response: &axum::http::Response<_>, latency: std::time::Duration, span: &tracing::Span| {
                        span.record("status", tracing::field::display(response.status()));
                        span.record("latency", tracing::field::debug(latency));
                        tracing::info!("request completed");
                    },
                ),
        )
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(config.cors_allowed_origin.clone())
                .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
                .allow_headers([axum::http::header::CONTENT_TYPE]),
        )
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
}

/// Parses a client-supplied identifier, reporting `invalid` on failure.
pub(crate) fn parse_id(raw: &str, invalid: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw.trim()).map_err(|_| ApiError::validation(invalid))
}
