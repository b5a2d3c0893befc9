//! ObjectId path parameter extractor with automatic validation.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use mongodb::bson::oid::ObjectId;

/// Extractor for MongoDB ObjectId path parameters.
///
/// Automatically parses and validates the 24-character hex identifier from
/// path parameters, returning a proper error response if invalid.
///
/// # Example
/// ```ignore
/// use axum::Router;
/// use axum::routing::delete;
/// use axum_helpers::extractors::ObjectIdPath;
///
/// async fn remove(ObjectIdPath(id): ObjectIdPath) -> String {
///     format!("Removing {}", id)
/// }
///
/// let app = Router::new().route("/pokemon/{id}", delete(remove));
/// ```
pub struct ObjectIdPath(pub ObjectId);

impl<S> FromRequestParts<S> for ObjectIdPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| e.into_response())?;

        match ObjectId::parse_str(&id) {
            Ok(oid) => Ok(ObjectIdPath(oid)),
            Err(_) => {
                Err(AppError::BadRequest(format!("Invalid ObjectId: {}", id)).into_response())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::delete;
    use axum::Router;
    use tower::ServiceExt;

    async fn handler(ObjectIdPath(id): ObjectIdPath) -> String {
        id.to_hex()
    }

    fn app() -> Router {
        Router::new().route("/{id}", delete(handler))
    }

    #[tokio::test]
    async fn test_valid_object_id_is_accepted() {
        let request = axum::http::Request::builder()
            .method("DELETE")
            .uri("/507f1f77bcf86cd799439011")
            .body(axum::body::Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_invalid_object_id_is_rejected() {
        let request = axum::http::Request::builder()
            .method("DELETE")
            .uri("/not-an-object-id")
            .body(axum::body::Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
