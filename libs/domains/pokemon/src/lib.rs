//! Pokemon Domain
//!
//! This module provides a complete domain implementation for managing Pokemon
//! using MongoDB.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, identifier resolution
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_pokemon::{handlers, MongoPokemonRepository, PokemonService};
//! use mongodb::Client;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a MongoDB client
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("pokedex");
//!
//! // Create a repository and service (default page size 6)
//! let repository = MongoPokemonRepository::new(&db);
//! let service = PokemonService::new(Arc::new(repository), 6);
//!
//! // Create Axum router
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{PokemonError, PokemonResult};
pub use handlers::ApiDoc;
pub use models::{CreatePokemon, LookupKey, Pagination, Pokemon, UpdatePokemon};
pub use mongodb::MongoPokemonRepository;
pub use repository::{InMemoryPokemonRepository, PokemonRepository};
pub use service::PokemonService;
