// ABOUTME: Body extractor accepting JSON or URL-encoded form payloads
// ABOUTME: Picks the decoder from the Content-Type header; failures become "Invalid request"

use axum::{
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde::de::DeserializeOwned;

use crate::response::ApiError;

/// Request body decoded as a form when sent as
/// `application/x-www-form-urlencoded`, as JSON otherwise
#[derive(Debug)]
pub struct JsonOrForm<T>(pub T);

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"))
}

impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            Form::<T>::from_request(req, state)
                .await
                .map(|Form(value)| JsonOrForm(value))
                .map_err(|_| ApiError::invalid_request())
        } else {
            Json::<T>::from_request(req, state)
                .await
                .map(|Json(value)| JsonOrForm(value))
                .map_err(|_| ApiError::invalid_request())
        }
    }
}
