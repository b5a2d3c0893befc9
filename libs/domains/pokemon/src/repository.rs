use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{PokemonError, PokemonResult};
use crate::models::{CreatePokemon, Pokemon, UpdatePokemon};

/// Repository trait for Pokemon persistence
///
/// This trait defines the data access interface for Pokemon documents.
/// Implementations can use different storage backends (MongoDB, in-memory).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PokemonRepository: Send + Sync {
    /// Insert a new document, returning it with its assigned id.
    /// Unique index violations surface as [`PokemonError::Duplicate`].
    async fn insert(&self, input: CreatePokemon) -> PokemonResult<Pokemon>;

    /// Find a document by its `no` field
    async fn find_by_no(&self, no: i64) -> PokemonResult<Option<Pokemon>>;

    /// Find a document by its store-native identifier
    async fn find_by_id(&self, id: ObjectId) -> PokemonResult<Option<Pokemon>>;

    /// Find a document by its (lowercase) `name` field
    async fn find_by_name(&self, name: &str) -> PokemonResult<Option<Pokemon>>;

    /// List documents sorted ascending by `no`, skipping `offset` and
    /// taking at most `limit`
    async fn list(&self, limit: i64, offset: u64) -> PokemonResult<Vec<Pokemon>>;

    /// Apply a partial update to the document with the given id.
    /// Only the fields present in the patch are written.
    async fn update(&self, id: &str, patch: &UpdatePokemon) -> PokemonResult<()>;

    /// Delete by store-native id; returns the number of deleted documents
    async fn delete_by_id(&self, id: ObjectId) -> PokemonResult<u64>;
}

/// In-memory implementation of PokemonRepository (for development/testing).
///
/// Replicates the store-level guarantees the service relies on: assigned
/// ObjectIds and unique `name`/`no` enforcement reported as
/// [`PokemonError::Duplicate`].
#[derive(Debug, Default, Clone)]
pub struct InMemoryPokemonRepository {
    documents: Arc<RwLock<BTreeMap<String, Pokemon>>>,
}

impl InMemoryPokemonRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn check_unique(
        documents: &BTreeMap<String, Pokemon>,
        exclude_id: Option<&str>,
        name: Option<&str>,
        no: Option<i64>,
    ) -> PokemonResult<()> {
        for doc in documents.values() {
            if exclude_id == Some(doc.id.as_str()) {
                continue;
            }
            if let Some(name) = name {
                if doc.name == name {
                    return Err(PokemonError::Duplicate(format!("{{ name: \"{}\" }}", name)));
                }
            }
            if let Some(no) = no {
                if doc.no == no {
                    return Err(PokemonError::Duplicate(format!("{{ no: {} }}", no)));
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl PokemonRepository for InMemoryPokemonRepository {
    async fn insert(&self, input: CreatePokemon) -> PokemonResult<Pokemon> {
        let mut documents = self.documents.write().await;

        Self::check_unique(&documents, None, Some(&input.name), Some(input.no))?;

        let pokemon = Pokemon {
            id: ObjectId::new().to_hex(),
            name: input.name,
            no: input.no,
            types: input.types,
        };
        documents.insert(pokemon.id.clone(), pokemon.clone());

        tracing::info!(pokemon_id = %pokemon.id, "Pokemon created");
        Ok(pokemon)
    }

    async fn find_by_no(&self, no: i64) -> PokemonResult<Option<Pokemon>> {
        let documents = self.documents.read().await;
        Ok(documents.values().find(|p| p.no == no).cloned())
    }

    async fn find_by_id(&self, id: ObjectId) -> PokemonResult<Option<Pokemon>> {
        let documents = self.documents.read().await;
        Ok(documents.get(&id.to_hex()).cloned())
    }

    async fn find_by_name(&self, name: &str) -> PokemonResult<Option<Pokemon>> {
        let documents = self.documents.read().await;
        Ok(documents.values().find(|p| p.name == name).cloned())
    }

    async fn list(&self, limit: i64, offset: u64) -> PokemonResult<Vec<Pokemon>> {
        let documents = self.documents.read().await;

        let mut result: Vec<Pokemon> = documents.values().cloned().collect();
        result.sort_by_key(|p| p.no);

        Ok(result
            .into_iter()
            .skip(offset as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn update(&self, id: &str, patch: &UpdatePokemon) -> PokemonResult<()> {
        let mut documents = self.documents.write().await;

        Self::check_unique(&documents, Some(id), patch.name.as_deref(), patch.no)?;

        let doc = documents
            .get_mut(id)
            .ok_or_else(|| PokemonError::NotFound(id.to_string()))?;
        doc.apply_update(patch);

        tracing::info!(pokemon_id = %id, "Pokemon updated");
        Ok(())
    }

    async fn delete_by_id(&self, id: ObjectId) -> PokemonResult<u64> {
        let mut documents = self.documents.write().await;
        let deleted = documents.remove(&id.to_hex()).is_some();

        if deleted {
            tracing::info!(pokemon_id = %id, "Pokemon deleted");
        }
        Ok(deleted as u64)
    }
}
