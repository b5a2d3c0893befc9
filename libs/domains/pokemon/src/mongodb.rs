use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Document, doc};
use mongodb::options::IndexOptions;
use mongodb::{Collection, Database, IndexModel};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{PokemonError, PokemonResult};
use crate::models::{CreatePokemon, Pokemon, UpdatePokemon};
use crate::repository::PokemonRepository;

const COLLECTION_NAME: &str = "pokemon";

/// Wire representation of a Pokemon document.
///
/// Kept separate from the API model so `_id` stays a native ObjectId in
/// the collection while the API exposes it as a hex string.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PokemonDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    name: String,
    no: i64,
    #[serde(rename = "type", default)]
    types: Vec<String>,
}

impl From<PokemonDocument> for Pokemon {
    fn from(doc: PokemonDocument) -> Self {
        Pokemon {
            id: doc.id.to_hex(),
            name: doc.name,
            no: doc.no,
            types: doc.types,
        }
    }
}

/// MongoDB implementation of PokemonRepository
#[derive(Debug, Clone)]
pub struct MongoPokemonRepository {
    collection: Collection<PokemonDocument>,
}

impl MongoPokemonRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(COLLECTION_NAME),
        }
    }

    /// Create the unique indexes on `name` and `no`.
    /// Called once at startup; creation is idempotent.
    #[instrument(skip(self))]
    pub async fn create_indexes(&self) -> PokemonResult<()> {
        let unique = IndexOptions::builder().unique(true).build();

        let name_index = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(unique.clone())
            .build();
        let no_index = IndexModel::builder()
            .keys(doc! { "no": 1 })
            .options(unique)
            .build();

        self.collection
            .create_indexes(vec![name_index, no_index])
            .await?;

        tracing::info!(collection = COLLECTION_NAME, "Indexes ensured");
        Ok(())
    }
}

/// Build the `$set` document for a partial update.
/// Absent fields are left untouched.
fn build_update_document(patch: &UpdatePokemon) -> Document {
    let mut set = Document::new();
    if let Some(name) = &patch.name {
        set.insert("name", name);
    }
    if let Some(no) = patch.no {
        set.insert("no", no);
    }
    if let Some(types) = &patch.types {
        set.insert("type", types.clone());
    }
    doc! { "$set": set }
}

#[async_trait]
impl PokemonRepository for MongoPokemonRepository {
    #[instrument(skip(self, input), fields(name = %input.name, no = input.no))]
    async fn insert(&self, input: CreatePokemon) -> PokemonResult<Pokemon> {
        let document = PokemonDocument {
            id: ObjectId::new(),
            name: input.name,
            no: input.no,
            types: input.types,
        };

        self.collection.insert_one(&document).await?;

        tracing::info!(pokemon_id = %document.id, "Pokemon created");
        Ok(document.into())
    }

    #[instrument(skip(self))]
    async fn find_by_no(&self, no: i64) -> PokemonResult<Option<Pokemon>> {
        let document = self.collection.find_one(doc! { "no": no }).await?;
        Ok(document.map(Into::into))
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ObjectId) -> PokemonResult<Option<Pokemon>> {
        let document = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(document.map(Into::into))
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> PokemonResult<Option<Pokemon>> {
        let document = self.collection.find_one(doc! { "name": name }).await?;
        Ok(document.map(Into::into))
    }

    #[instrument(skip(self))]
    async fn list(&self, limit: i64, offset: u64) -> PokemonResult<Vec<Pokemon>> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "no": 1 })
            .skip(offset)
            .limit(limit)
            .await?;

        let documents: Vec<PokemonDocument> = cursor.try_collect().await?;
        Ok(documents.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self, patch))]
    async fn update(&self, id: &str, patch: &UpdatePokemon) -> PokemonResult<()> {
        let object_id = ObjectId::parse_str(id)
            .map_err(|_| PokemonError::Validation(format!("\"{}\" is not a valid ObjectId", id)))?;

        self.collection
            .update_one(doc! { "_id": object_id }, build_update_document(patch))
            .await?;

        tracing::info!(pokemon_id = %id, "Pokemon updated");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: ObjectId) -> PokemonResult<u64> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;

        if result.deleted_count > 0 {
            tracing::info!(pokemon_id = %id, "Pokemon deleted");
        }
        Ok(result.deleted_count)
    }
}
