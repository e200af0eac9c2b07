use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use service::clientes::domain::Cliente;
use tracing::info;

use crate::{errors::JsonApiError, metrics::observe, state::AppState};

const FAMILY: &str = "clientes";

/// Cliente as it travels over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ClienteBody {
    /// exactly 3 characters
    pub dni: String,
    /// 2 to 30 characters
    pub nombre: String,
    /// 2 to 30 characters
    pub apellido: String,
}

impl From<Cliente> for ClienteBody {
    fn from(c: Cliente) -> Self {
        Self { dni: c.dni, nombre: c.nombre, apellido: c.apellido }
    }
}

impl From<ClienteBody> for Cliente {
    fn from(b: ClienteBody) -> Self {
        Self { dni: b.dni, nombre: b.nombre, apellido: b.apellido }
    }
}

#[utoipa::path(
    get, path = "/clientes/listar", tag = "clientes",
    responses(
        (status = 200, description = "All clientes", body = [ClienteBody]),
        (status = 503, description = "Store Unavailable", body = crate::errors::ErrorBody)
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ClienteBody>>, JsonApiError> {
    let all = observe(FAMILY, "list", state.clientes.list_all().await)?;
    info!(count = all.len(), "list clientes");
    Ok(Json(all.into_iter().map(ClienteBody::from).collect()))
}

#[utoipa::path(
    get, path = "/clientes/buscar/{dni}", tag = "clientes",
    params(("dni" = String, Path, description = "Cliente DNI")),
    responses(
        (status = 200, description = "OK", body = ClienteBody),
        (status = 404, description = "Not Found", body = crate::errors::ErrorBody)
    )
)]
pub async fn find(State(state): State<AppState>, Path(dni): Path<String>) -> Result<Json<ClienteBody>, JsonApiError> {
    let found = observe(FAMILY, "find", state.clientes.find(&dni).await)?;
    Ok(Json(found.into()))
}

#[utoipa::path(
    post, path = "/clientes/crear", tag = "clientes",
    request_body = ClienteBody,
    responses(
        (status = 201, description = "Created", body = ClienteBody),
        (status = 400, description = "Validation Error", body = crate::errors::ErrorBody),
        (status = 409, description = "Conflict", body = crate::errors::ErrorBody)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<ClienteBody>, JsonRejection>,
) -> Result<(StatusCode, Json<ClienteBody>), JsonApiError> {
    let Json(body) = payload?;
    let created = observe(FAMILY, "create", state.clientes.create(body.into()).await)?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

#[utoipa::path(
    put, path = "/clientes/actualizar", tag = "clientes",
    request_body = ClienteBody,
    responses(
        (status = 200, description = "Updated", body = ClienteBody),
        (status = 400, description = "Validation Error", body = crate::errors::ErrorBody),
        (status = 404, description = "Not Found", body = crate::errors::ErrorBody)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    payload: Result<Json<ClienteBody>, JsonRejection>,
) -> Result<Json<ClienteBody>, JsonApiError> {
    let Json(body) = payload?;
    let updated = observe(FAMILY, "update", state.clientes.update(body.into()).await)?;
    Ok(Json(updated.into()))
}

#[utoipa::path(
    delete, path = "/clientes/borrar/{dni}", tag = "clientes",
    params(("dni" = String, Path, description = "Cliente DNI")),
    responses(
        (status = 200, description = "Removed record", body = ClienteBody),
        (status = 404, description = "Not Found", body = crate::errors::ErrorBody)
    )
)]
pub async fn delete(State(state): State<AppState>, Path(dni): Path<String>) -> Result<Json<ClienteBody>, JsonApiError> {
    let removed = observe(FAMILY, "delete", state.clientes.delete(&dni).await)?;
    Ok(Json(removed.into()))
}
