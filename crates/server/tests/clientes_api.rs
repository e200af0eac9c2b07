use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use server::{routes, state::AppState};
use service::auth::{HashParams, PasswordHasher};
use service::stores::Stores;

fn cors() -> tower_http::cors::CorsLayer { tower_http::cors::CorsLayer::very_permissive() }

fn hasher() -> Arc<PasswordHasher> {
    Arc::new(PasswordHasher::new(HashParams { m_cost: 1024, t_cost: 1, p_cost: 1 }).expect("hash params"))
}

fn memory_app() -> Router {
    let state = AppState::new(Stores::memory(), hasher()).expect("state");
    routes::build_router(state, cors())
}

async fn sqlite_app() -> anyhow::Result<Router> {
    let db = models::db::connect_and_migrate(&models::db::DatabaseConfig::sqlite_memory()).await?;
    let state = AppState::new(Stores::database(db), hasher())?;
    Ok(routes::build_router(state, cors()))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(v) => builder.header("content-type", "application/json").body(Body::from(serde_json::to_vec(&v)?))?,
        None => builder.body(Body::empty())?,
    };
    let resp = app.clone().oneshot(req).await?;
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, value))
}

async fn crud_flow(app: Router) -> anyhow::Result<()> {
    let ana = json!({"dni": "123", "nombre": "Ana", "apellido": "Diaz"});

    let (status, body) = send(&app, "GET", "/clientes/listar", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, body) = send(&app, "POST", "/clientes/crear", Some(ana.clone())).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, ana);

    let (status, body) = send(&app, "GET", "/clientes", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([ana]));

    let (status, body) = send(&app, "POST", "/clientes/crear", Some(json!({"dni": "123", "nombre": "Eva", "apellido": "Luna"}))).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Conflict");

    let (status, body) = send(&app, "GET", "/clientes/buscar/123", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["nombre"], "Ana");

    let (status, body) = send(&app, "GET", "/clientes/buscar/999", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not Found");

    let (status, body) = send(&app, "PUT", "/clientes/actualizar", Some(json!({"dni": "123", "nombre": "Anabel", "apellido": "Diaz"}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["nombre"], "Anabel");

    let (status, _) = send(&app, "PUT", "/clientes/actualizar", Some(json!({"dni": "999", "nombre": "Ana", "apellido": "Diaz"}))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "DELETE", "/clientes/borrar/123", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"dni": "123", "nombre": "Anabel", "apellido": "Diaz"}));

    let (status, _) = send(&app, "DELETE", "/clientes/borrar/123", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "GET", "/clientes/buscar/123", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn crud_over_memory_store() -> anyhow::Result<()> {
    crud_flow(memory_app()).await
}

#[tokio::test]
async fn crud_over_sqlite_store() -> anyhow::Result<()> {
    crud_flow(sqlite_app().await?).await
}

#[tokio::test]
async fn invalid_bodies_are_bad_requests() -> anyhow::Result<()> {
    let app = memory_app();
    for bad in [
        json!({"dni": "12", "nombre": "Ana", "apellido": "Diaz"}),
        json!({"dni": "123", "nombre": "A", "apellido": "Diaz"}),
        json!({"dni": "123", "nombre": "Ana", "apellido": "x".repeat(31)}),
        json!({"dni": "123", "nombre": "Ana"}),
    ] {
        let (status, body) = send(&app, "POST", "/clientes/crear", Some(bad)).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    let req = Request::builder()
        .method("POST")
        .uri("/clientes/crear")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))?;
    let resp = app.clone().oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, "GET", "/clientes/listar", None).await?;
    assert_eq!(body, json!([]));
    Ok(())
}

#[tokio::test]
async fn health_metrics_and_docs() -> anyhow::Result<()> {
    let app = memory_app();
    let (status, body) = send(&app, "GET", "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));

    let _ = send(&app, "GET", "/clientes/listar", None).await?;
    let resp = app.clone().oneshot(Request::builder().uri("/metrics").body(Body::empty())?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let text = String::from_utf8(to_bytes(resp.into_body(), usize::MAX).await?.to_vec())?;
    assert!(text.contains("gestor_store_operations_total"));

    let (status, doc) = send(&app, "GET", "/api-docs/openapi.json", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/clientes/crear"].is_object());
    Ok(())
}
