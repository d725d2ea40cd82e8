use axum::{
    body::{Body, Bytes},
    extract::{FromRequest, Request, rejection::JsonRejection},
    Json,
};

use crate::error::AppError;

/// `Json<T>` whose rejections use the service's `{error}` envelope with a
/// 400 status instead of axum's plain-text 4xx responses.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::Validation(rejection.body_text())),
        }
    }
}

/// Partial-update body. An empty body is an empty patch, with or without a
/// JSON content type; anything else is decoded like [`JsonBody`].
#[derive(Debug)]
pub struct PatchBody<T>(pub T);

impl<S, T> FromRequest<S> for PatchBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    T: Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = req.into_parts();
        let bytes = Bytes::from_request(Request::from_parts(parts.clone(), body), state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }

        let req = Request::from_parts(parts, Body::from(bytes));
        let JsonBody(value) = JsonBody::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}
