use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    ObjectIdPath, ValidatedJson,
    errors::responses::{
        BadRequestObjectIdResponse, BadRequestValidationResponse, ConflictResponse,
        InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::PokemonResult;
use crate::models::{CreatePokemon, Pagination, Pokemon, UpdatePokemon};
use crate::repository::PokemonRepository;
use crate::service::PokemonService;

/// OpenAPI documentation for the Pokemon API
#[derive(OpenApi)]
#[openapi(
    paths(list_pokemon, create_pokemon, get_pokemon, update_pokemon, delete_pokemon),
    components(
        schemas(Pokemon, CreatePokemon, UpdatePokemon),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestObjectIdResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Pokemon", description = "Pokemon management endpoints (MongoDB)")
    )
)]
pub struct ApiDoc;

/// Create the pokemon router with all HTTP endpoints
pub fn router<R: PokemonRepository + 'static>(service: PokemonService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_pokemon).post(create_pokemon))
        .route(
            "/{identifier}",
            get(get_pokemon).patch(update_pokemon).delete(delete_pokemon),
        )
        .with_state(shared_service)
}

/// List pokemon sorted by number
#[utoipa::path(
    get,
    path = "",
    tag = "Pokemon",
    params(Pagination),
    responses(
        (status = 200, description = "List of pokemon", body = Vec<Pokemon>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_pokemon<R: PokemonRepository>(
    State(service): State<Arc<PokemonService<R>>>,
    Query(pagination): Query<Pagination>,
) -> PokemonResult<Json<Vec<Pokemon>>> {
    let pokemon = service.find_all(pagination).await?;
    Ok(Json(pokemon))
}

/// Create a new pokemon
#[utoipa::path(
    post,
    path = "",
    tag = "Pokemon",
    request_body = CreatePokemon,
    responses(
        (status = 201, description = "Pokemon created successfully", body = Pokemon),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_pokemon<R: PokemonRepository>(
    State(service): State<Arc<PokemonService<R>>>,
    ValidatedJson(input): ValidatedJson<CreatePokemon>,
) -> PokemonResult<impl IntoResponse> {
    let pokemon = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(pokemon)))
}

/// Get a pokemon by id, name or number
#[utoipa::path(
    get,
    path = "/{identifier}",
    tag = "Pokemon",
    params(
        ("identifier" = String, Path, description = "ObjectId, name or pokedex number")
    ),
    responses(
        (status = 200, description = "Pokemon found", body = Pokemon),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_pokemon<R: PokemonRepository>(
    State(service): State<Arc<PokemonService<R>>>,
    Path(identifier): Path<String>,
) -> PokemonResult<Json<Pokemon>> {
    let pokemon = service.find_one(&identifier).await?;
    Ok(Json(pokemon))
}

/// Update a pokemon resolved by id, name or number
#[utoipa::path(
    patch,
    path = "/{identifier}",
    tag = "Pokemon",
    params(
        ("identifier" = String, Path, description = "ObjectId, name or pokedex number")
    ),
    request_body = UpdatePokemon,
    responses(
        (status = 200, description = "Pokemon updated successfully", body = Pokemon),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_pokemon<R: PokemonRepository>(
    State(service): State<Arc<PokemonService<R>>>,
    Path(identifier): Path<String>,
    ValidatedJson(patch): ValidatedJson<UpdatePokemon>,
) -> PokemonResult<Json<Pokemon>> {
    let pokemon = service.update(&identifier, patch).await?;
    Ok(Json(pokemon))
}

/// Delete a pokemon by its ObjectId
#[utoipa::path(
    delete,
    path = "/{identifier}",
    tag = "Pokemon",
    params(
        ("identifier" = String, Path, description = "ObjectId of the pokemon")
    ),
    responses(
        (status = 204, description = "Pokemon deleted successfully"),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_pokemon<R: PokemonRepository>(
    State(service): State<Arc<PokemonService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> PokemonResult<impl IntoResponse> {
    service.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
