//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for the whole service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pokedex API",
        version = "0.1.0",
        description = "MongoDB-based REST API for managing a pokedex",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:3005", description = "Local development server")
    ),
    nest(
        (path = "/api/v2/pokemon", api = domain_pokemon::ApiDoc)
    ),
    tags(
        (name = "Pokemon", description = "Pokemon management endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;
