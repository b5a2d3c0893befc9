use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

/// MongoDB server code for a unique index violation.
const DUPLICATE_KEY_CODE: i32 = 11000;

#[derive(Debug, Error)]
pub enum PokemonError {
    /// No document matched any lookup strategy for the given identifier.
    #[error("Pokemon with id, name or no \"{0}\" not found")]
    NotFound(String),

    /// A write violated a unique index; carries the duplicated key/value
    /// fragment reported by the store.
    #[error("Pokemon already exists in db {0}")]
    Duplicate(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    /// Unclassified store failure. The message is logged server-side and
    /// never surfaced to the caller.
    #[error("Database error: {0}")]
    Database(String),
}

pub type PokemonResult<T> = Result<T, PokemonError>;

/// Convert PokemonError to AppError for standardized error responses.
///
/// Database failures are replaced with a generic message pointing at the
/// server logs; the underlying cause is logged here and not re-exposed.
impl From<PokemonError> for AppError {
    fn from(err: PokemonError) -> Self {
        match err {
            PokemonError::NotFound(identifier) => AppError::NotFound(format!(
                "Pokemon with id, name or no \"{}\" not found",
                identifier
            )),
            PokemonError::Duplicate(key_value) => {
                AppError::Conflict(format!("Pokemon already exists in db {}", key_value))
            }
            PokemonError::Validation(msg) => AppError::BadRequest(msg),
            PokemonError::Database(msg) => {
                tracing::error!("Unhandled store error: {}", msg);
                AppError::InternalServerError(
                    "Unexpected error occurred, check server logs".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for PokemonError {
    fn into_response(self) -> Response {
        // Convert to AppError for the standardized error response format
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// Classify driver errors: unique index violations become `Duplicate`,
/// everything else `Database`.
impl From<mongodb::error::Error> for PokemonError {
    fn from(err: mongodb::error::Error) -> Self {
        match duplicate_key_value(&err) {
            Some(key_value) => PokemonError::Duplicate(key_value),
            None => PokemonError::Database(err.to_string()),
        }
    }
}

/// Extract the duplicated key/value fragment from an E11000 error, if the
/// error is a duplicate-key violation at all.
fn duplicate_key_value(err: &mongodb::error::Error) -> Option<String> {
    use mongodb::error::{ErrorKind, WriteFailure};

    let message = match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(we)) if we.code == DUPLICATE_KEY_CODE => {
            &we.message
        }
        ErrorKind::Command(ce) if ce.code == DUPLICATE_KEY_CODE => &ce.message,
        _ => return None,
    };

    Some(dup_key_fragment(message).to_string())
}

/// Pull the `{ field: value }` portion out of the server's duplicate-key
/// message, e.g.
/// `E11000 duplicate key error collection: pokedex.pokemon index: name_1
/// dup key: { name: "pikachu" }` yields `{ name: "pikachu" }`.
/// Falls back to the whole message when the marker is absent.
pub(crate) fn dup_key_fragment(message: &str) -> &str {
    message
        .split_once("dup key: ")
        .map(|(_, rest)| rest.trim())
        .unwrap_or(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dup_key_fragment_extracts_key_value() {
        let message = "E11000 duplicate key error collection: pokedex.pokemon \
                       index: name_1 dup key: { name: \"pikachu\" }";
        assert_eq!(dup_key_fragment(message), "{ name: \"pikachu\" }");
    }

    #[test]
    fn test_dup_key_fragment_falls_back_to_full_message() {
        let message = "E11000 duplicate key error without the usual marker";
        assert_eq!(dup_key_fragment(message), message);
    }

    #[test]
    fn test_not_found_message_echoes_identifier() {
        let err = PokemonError::NotFound("doesnotexist".to_string());
        assert!(err.to_string().contains("doesnotexist"));
    }

    #[test]
    fn test_duplicate_message_carries_key_value() {
        let err = PokemonError::Duplicate("{ no: 25 }".to_string());
        assert!(err.to_string().contains("{ no: 25 }"));
    }
}
