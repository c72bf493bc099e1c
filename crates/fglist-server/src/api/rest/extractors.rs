//! Custom extractors
//!
//! Wraps axum's JSON and path extractors so rejections use the same JSON
//! error body as [`ServerError`](crate::error::ServerError).

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        FromRequest, FromRequestParts, Path, Request,
    },
    http::{request::Parts, StatusCode},
    Json,
};
use serde_json::json;

type Rejection = (StatusCode, Json<serde_json::Value>);

fn bad_request(message: String) -> Rejection {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "error": message,
            "status": 400,
        })),
    )
}

/// Custom JSON extractor with better error messages
pub struct JsonExtractor<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for JsonExtractor<T>
where
    T: serde::de::DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Rejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(value) => Ok(Self(value.0)),
            Err(rejection) => {
                let error_message = match rejection {
                    JsonRejection::JsonDataError(err) => {
                        format!("Invalid JSON data: {}", err)
                    }
                    JsonRejection::JsonSyntaxError(err) => {
                        format!("JSON syntax error: {}", err)
                    }
                    JsonRejection::MissingJsonContentType(_) => {
                        "Missing 'Content-Type: application/json' header".to_string()
                    }
                    _ => format!("Failed to parse JSON: {}", rejection),
                };

                Err(bad_request(error_message))
            }
        }
    }
}

/// Path extractor reporting malformed segments (e.g. a non-numeric index)
/// as a JSON 400
pub struct PathExtractor<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequestParts<S> for PathExtractor<T>
where
    T: serde::de::DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = Rejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(value) => Ok(Self(value.0)),
            Err(PathRejection::FailedToDeserializePathParams(err)) => {
                Err(bad_request(format!("Invalid path parameter: {}", err.body_text())))
            }
            Err(rejection) => Err(bad_request(format!(
                "Failed to parse path: {}",
                rejection
            ))),
        }
    }
}
