use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{PokemonError, PokemonResult};
use crate::models::{CreatePokemon, LookupKey, Pagination, Pokemon, UpdatePokemon};
use crate::repository::PokemonRepository;

/// Service layer for Pokemon business logic
///
/// Normalizes input (names are stored lowercase), resolves the flexible
/// identifier used by the read and update paths, and applies the listing
/// defaults. Persistence is delegated to the injected repository.
pub struct PokemonService<R: PokemonRepository> {
    repository: Arc<R>,
    default_limit: i64,
}

impl<R: PokemonRepository> Clone for PokemonService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            default_limit: self.default_limit,
        }
    }
}

impl<R: PokemonRepository> PokemonService<R> {
    pub fn new(repository: Arc<R>, default_limit: i64) -> Self {
        Self {
            repository,
            default_limit,
        }
    }

    #[instrument(skip(self, input), fields(name = %input.name, no = input.no))]
    pub async fn create(&self, mut input: CreatePokemon) -> PokemonResult<Pokemon> {
        input.name = input.name.to_lowercase();
        self.repository.insert(input).await
    }

    #[instrument(skip(self))]
    pub async fn find_all(&self, pagination: Pagination) -> PokemonResult<Vec<Pokemon>> {
        let limit = pagination.limit.unwrap_or(self.default_limit);
        let offset = pagination.offset.unwrap_or(0);
        self.repository.list(limit, offset).await
    }

    /// Resolve a Pokemon by `no`, ObjectId or name, in that order.
    /// Each applicable strategy is tried until one returns a document.
    #[instrument(skip(self))]
    pub async fn find_one(&self, identifier: &str) -> PokemonResult<Pokemon> {
        for key in LookupKey::candidates(identifier) {
            let found = match key {
                LookupKey::No(no) => self.repository.find_by_no(no).await?,
                LookupKey::Id(id) => self.repository.find_by_id(id).await?,
                LookupKey::Name(name) => self.repository.find_by_name(&name).await?,
            };
            if let Some(pokemon) = found {
                return Ok(pokemon);
            }
        }
        Err(PokemonError::NotFound(identifier.to_string()))
    }

    /// Update the Pokemon matching `identifier` (same resolution as
    /// [`find_one`](Self::find_one)) and return the merged document.
    #[instrument(skip(self, patch))]
    pub async fn update(
        &self,
        identifier: &str,
        mut patch: UpdatePokemon,
    ) -> PokemonResult<Pokemon> {
        let mut existing = self.find_one(identifier).await?;

        if let Some(name) = patch.name.take() {
            patch.name = Some(name.to_lowercase());
        }

        if !patch.is_empty() {
            self.repository.update(&existing.id, &patch).await?;
        }

        existing.apply_update(&patch);
        Ok(existing)
    }

    /// Delete by store-native id only.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: ObjectId) -> PokemonResult<()> {
        let deleted = self.repository.delete_by_id(id).await?;
        if deleted == 0 {
            return Err(PokemonError::Validation(format!(
                "Pokemon with id \"{}\" not found",
                id.to_hex()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryPokemonRepository, MockPokemonRepository};

    fn service_with(
        repo: InMemoryPokemonRepository,
    ) -> PokemonService<InMemoryPokemonRepository> {
        PokemonService::new(Arc::new(repo), 6)
    }

    fn pokemon(name: &str, no: i64) -> CreatePokemon {
        CreatePokemon {
            name: name.to_string(),
            no,
            types: vec!["electric".to_string()],
        }
    }

    #[tokio::test]
    async fn test_create_lowercases_name() {
        let service = service_with(InMemoryPokemonRepository::new());

        let created = service.create(pokemon("Pikachu", 25)).await.unwrap();
        assert_eq!(created.name, "pikachu");
    }

    #[tokio::test]
    async fn test_create_duplicate_is_conflict() {
        let service = service_with(InMemoryPokemonRepository::new());
        service.create(pokemon("pikachu", 25)).await.unwrap();

        // Differs only by case, so the stored (lowercase) name collides
        let result = service.create(pokemon("PIKACHU", 26)).await;
        assert!(matches!(result, Err(PokemonError::Duplicate(_))));
    }

    #[tokio::test]
    async fn test_find_all_applies_default_limit() {
        let service = service_with(InMemoryPokemonRepository::new());
        for no in 1..=10 {
            service
                .create(pokemon(&format!("pokemon-{no}"), no))
                .await
                .unwrap();
        }

        let page = service.find_all(Pagination::default()).await.unwrap();
        assert_eq!(page.len(), 6);
        assert_eq!(page[0].no, 1);

        let page = service
            .find_all(Pagination {
                limit: Some(3),
                offset: Some(2),
            })
            .await
            .unwrap();
        let nos: Vec<i64> = page.iter().map(|p| p.no).collect();
        assert_eq!(nos, vec![3, 4, 5]);
    }

    #[tokio::test]
    async fn test_find_one_by_no() {
        let service = service_with(InMemoryPokemonRepository::new());
        service.create(pokemon("pikachu", 25)).await.unwrap();

        let found = service.find_one("25").await.unwrap();
        assert_eq!(found.name, "pikachu");
    }

    #[tokio::test]
    async fn test_find_one_by_id() {
        let service = service_with(InMemoryPokemonRepository::new());
        let created = service.create(pokemon("pikachu", 25)).await.unwrap();

        let found = service.find_one(&created.id).await.unwrap();
        assert_eq!(found.no, 25);
    }

    #[tokio::test]
    async fn test_find_one_by_name_case_insensitive() {
        let service = service_with(InMemoryPokemonRepository::new());
        service.create(pokemon("pikachu", 25)).await.unwrap();

        let found = service.find_one("Pikachu").await.unwrap();
        assert_eq!(found.no, 25);
    }

    #[tokio::test]
    async fn test_find_one_not_found_message() {
        let service = service_with(InMemoryPokemonRepository::new());

        let err = service.find_one("missingno").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Pokemon with id, name or no \"missingno\" not found"
        );
    }

    #[tokio::test]
    async fn test_find_one_numeric_miss_falls_through_to_name() {
        let service = service_with(InMemoryPokemonRepository::new());
        // A name that parses as a number, but no Pokemon has no == 404
        service.create(pokemon("404", 25)).await.unwrap();

        let found = service.find_one("404").await.unwrap();
        assert_eq!(found.name, "404");
    }

    #[tokio::test]
    async fn test_find_one_short_circuits_on_no_hit() {
        let mut repo = MockPokemonRepository::new();
        repo.expect_find_by_no().times(1).returning(|no| {
            Ok(Some(Pokemon {
                id: ObjectId::new().to_hex(),
                name: "pikachu".to_string(),
                no,
                types: vec![],
            }))
        });
        repo.expect_find_by_id().times(0);
        repo.expect_find_by_name().times(0);

        let service = PokemonService::new(Arc::new(repo), 6);
        let found = service.find_one("25").await.unwrap();
        assert_eq!(found.no, 25);
    }

    #[tokio::test]
    async fn test_update_by_no_merges_patch() {
        let service = service_with(InMemoryPokemonRepository::new());
        service.create(pokemon("pikachu", 25)).await.unwrap();

        let patch = UpdatePokemon {
            name: Some("Raichu".to_string()),
            ..Default::default()
        };
        let updated = service.update("25", patch).await.unwrap();

        assert_eq!(updated.name, "raichu");
        assert_eq!(updated.no, 25);

        let persisted = service.find_one("raichu").await.unwrap();
        assert_eq!(persisted.no, 25);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let service = service_with(InMemoryPokemonRepository::new());

        let result = service.update("25", UpdatePokemon::default()).await;
        assert!(matches!(result, Err(PokemonError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_duplicate_no_is_conflict() {
        let service = service_with(InMemoryPokemonRepository::new());
        service.create(pokemon("pikachu", 25)).await.unwrap();
        service.create(pokemon("raichu", 26)).await.unwrap();

        let patch = UpdatePokemon {
            no: Some(25),
            ..Default::default()
        };
        let result = service.update("raichu", patch).await;
        assert!(matches!(result, Err(PokemonError::Duplicate(_))));
    }

    #[tokio::test]
    async fn test_remove_existing() {
        let service = service_with(InMemoryPokemonRepository::new());
        let created = service.create(pokemon("pikachu", 25)).await.unwrap();
        let id = ObjectId::parse_str(&created.id).unwrap();

        service.remove(id).await.unwrap();
        assert!(matches!(
            service.find_one("25").await,
            Err(PokemonError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_remove_missing_reports_id() {
        let service = service_with(InMemoryPokemonRepository::new());
        let id = ObjectId::new();

        let err = service.remove(id).await.unwrap_err();
        assert!(matches!(
            err,
            PokemonError::Validation(ref msg)
                if *msg == format!("Pokemon with id \"{}\" not found", id.to_hex())
        ));
    }
}
