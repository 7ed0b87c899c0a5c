//! Request extractors
//!
//! Wrappers around axum's `Json`, `Path` and `Query` whose rejections are
//! rendered through the failure envelope as 400 "Invalid parameter".

use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use crate::error::app_error::AppError;

const INVALID_PARAM: &str = "Invalid parameter";

/// JSON リクエストボディ
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

/// パスパラメータ
#[derive(Debug, Clone, Copy, Default)]
pub struct PathParam<T>(pub T);

/// クエリパラメータ
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryParam<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::bad_request(INVALID_PARAM).with_source(rejection)),
        }
    }
}

impl<T, S> FromRequestParts<S> for PathParam<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::bad_request(INVALID_PARAM).with_source(rejection)),
        }
    }
}

impl<T, S> FromRequestParts<S> for QueryParam<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::bad_request(INVALID_PARAM).with_source(rejection)),
        }
    }
}
