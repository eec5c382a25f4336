//! Request body extraction
//!
//! Accepts JSON and URL-encoded form bodies. An empty body, or a request with
//! no recognised content type, is read as an empty payload, so creating a
//! student from a bodiless POST stores an empty record.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Body extractor for JSON or `application/x-www-form-urlencoded` payloads.
#[derive(Debug, Clone)]
pub struct Payload<T>(pub T);

#[derive(Debug, PartialEq, Eq)]
enum BodyKind {
    Json,
    Form,
    Other,
}

fn body_kind(content_type: Option<&str>) -> BodyKind {
    let Some(content_type) = content_type else {
        return BodyKind::Other;
    };
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if mime == "application/x-www-form-urlencoded" {
        BodyKind::Form
    } else if mime == "application/json" || mime.ends_with("+json") {
        BodyKind::Json
    } else {
        BodyKind::Other
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned + Default + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok());

        match body_kind(content_type) {
            BodyKind::Json => {
                let bytes = Bytes::from_request(req, state)
                    .await
                    .map_err(|rejection| ApiError::InvalidRequest(rejection.body_text()))?;
                if bytes.iter().all(u8::is_ascii_whitespace) {
                    return Ok(Payload(T::default()));
                }
                let Json(value) = Json::<T>::from_bytes(&bytes)
                    .map_err(|rejection| ApiError::InvalidRequest(rejection.body_text()))?;
                Ok(Payload(value))
            }
            BodyKind::Form => {
                let Form(value) = Form::<T>::from_request(req, state)
                    .await
                    .map_err(|rejection| ApiError::InvalidRequest(rejection.body_text()))?;
                Ok(Payload(value))
            }
            BodyKind::Other => Ok(Payload(T::default())),
        }
    }
}
