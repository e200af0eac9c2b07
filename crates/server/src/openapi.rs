use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::clientes::list,
        crate::routes::clientes::find,
        crate::routes::clientes::create,
        crate::routes::clientes::update,
        crate::routes::clientes::delete,
    ),
    components(
        schemas(
            HealthResponse,
            crate::routes::clientes::ClienteBody,
            crate::errors::ErrorBody,
        )
    ),
    tags(
        (name = "health"),
        (name = "clientes")
    )
)]
pub struct ApiDoc;
