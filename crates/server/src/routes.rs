use axum::{
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::{metrics::encode_metrics, openapi::ApiDoc, state::AppState};

pub mod clientes;
pub mod users;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn metrics() -> (StatusCode, String) {
    encode_metrics()
}

/// Build the full application router: users pages, clientes API, ops endpoints and docs.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    // HTML pages
    let user_routes = Router::new()
        .route("/", get(users::index).post(users::index))
        .route("/signup", get(users::signup_form))
        .route("/user", get(users::user_redirect).post(users::login))
        .route("/data-processing", post(users::data_processing));

    // JSON API
    let cliente_routes = Router::new()
        .route("/clientes", get(clientes::list))
        .route("/clientes/listar", get(clientes::list))
        .route("/clientes/buscar/:dni", get(clientes::find))
        .route("/clientes/crear", post(clientes::create))
        .route("/clientes/actualizar", put(clientes::update))
        .route("/clientes/borrar/:dni", delete(clientes::delete));

    let ops = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics));

    user_routes
        .merge(cliente_routes)
        .merge(ops)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
