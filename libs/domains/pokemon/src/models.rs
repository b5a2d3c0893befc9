use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Pokemon entity as exposed over the API.
///
/// The store-native `_id` is surfaced as a 24-character hex string;
/// persistence-specific document mapping lives in the repository
/// implementations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Pokemon {
    /// Store-assigned identifier (24-character hex ObjectId), immutable
    pub id: String,
    /// Pokemon name, unique, always stored lowercase
    pub name: String,
    /// National Pokedex number, unique
    pub no: i64,
    /// Descriptive type tags (e.g., "electric")
    #[serde(rename = "type", default)]
    pub types: Vec<String>,
}

/// DTO for creating a new Pokemon
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreatePokemon {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = 1))]
    pub no: i64,
    #[serde(rename = "type", default)]
    pub types: Vec<String>,
}

/// DTO for partially updating an existing Pokemon
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdatePokemon {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(range(min = 1))]
    pub no: Option<i64>,
    #[serde(rename = "type")]
    pub types: Option<Vec<String>>,
}

impl UpdatePokemon {
    /// True when the patch carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.no.is_none() && self.types.is_none()
    }
}

/// Pagination query parameters for listing Pokemon.
///
/// Defaults are applied by the service: `limit` falls back to the configured
/// default page size, `offset` to 0. No upper bound is enforced.
#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema, IntoParams)]
pub struct Pagination {
    /// Maximum number of results
    pub limit: Option<i64>,
    /// Number of results to skip
    pub offset: Option<u64>,
}

impl Pokemon {
    /// Overlay a patch onto this document, patch fields winning on conflict.
    ///
    /// This is the client-side merge returned by update: the store is not
    /// re-read after the write. The caller is responsible for normalizing
    /// `patch.name` beforehand.
    pub fn apply_update(&mut self, patch: &UpdatePokemon) {
        if let Some(ref name) = patch.name {
            self.name = name.clone();
        }
        if let Some(no) = patch.no {
            self.no = no;
        }
        if let Some(ref types) = patch.types {
            self.types = types.clone();
        }
    }
}

/// A single lookup strategy for resolving a polymorphic identifier.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupKey {
    /// Match on the unique `no` field
    No(i64),
    /// Match on the store-native `_id`
    Id(ObjectId),
    /// Match on the lowercased `name` field
    Name(String),
}

impl LookupKey {
    /// Candidate interpretations of an untyped identifier, in resolution
    /// order: numeric `no`, native ObjectId, lowercased name.
    ///
    /// The name strategy is always a candidate; the first two only when the
    /// identifier is syntactically valid for them. Callers try each key in
    /// turn and stop at the first non-empty result, so later strategies run
    /// whenever earlier ones found nothing, regardless of whether their
    /// preconditions held.
    pub fn candidates(identifier: &str) -> Vec<LookupKey> {
        let mut keys = Vec::with_capacity(3);
        if let Ok(no) = identifier.parse::<i64>() {
            keys.push(LookupKey::No(no));
        }
        if let Ok(oid) = ObjectId::parse_str(identifier) {
            keys.push(LookupKey::Id(oid));
        }
        keys.push(LookupKey::Name(identifier.to_lowercase()));
        keys
    }
}
