//! Pokemon API routes
//!
//! Wires the pokemon domain to HTTP routes.

use axum::Router;
use domain_pokemon::{MongoPokemonRepository, PokemonService, handlers};
use mongodb::Database;
use std::sync::Arc;

use crate::state::AppState;

/// Create the pokemon router backed by MongoDB
pub fn router(state: &AppState) -> Router {
    let repository = MongoPokemonRepository::new(&state.db);
    let service = PokemonService::new(Arc::new(repository), state.config.default_limit);

    handlers::router(service)
}

/// Ensure the unique indexes on `name` and `no` exist.
/// Called once at startup, before the server accepts traffic.
pub async fn init_indexes(db: &Database) -> eyre::Result<()> {
    MongoPokemonRepository::new(db).create_indexes().await?;
    Ok(())
}
