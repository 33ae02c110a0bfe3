//! Axum extractor for validated request bodies
//!
//! This module provides the `ValidatedJson<T>` extractor that parses and
//! validates request payloads before they reach handlers.

use crate::core::error::{OrderServiceError, ValidationError};
use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Axum extractor that deserializes JSON and runs `validator` rules
///
/// Malformed JSON and rule violations are both rejected with a
/// [`ValidationError`], so handlers only ever see valid payloads.
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn place_order(
///     ValidatedJson(request): ValidatedJson<CreateOrderRequest>,
/// ) -> OrderServiceResult<Json<ApiResponse<Order>>> {
///     // request is already validated
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    /// Get the inner payload
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> std::ops::Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = OrderServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state).await.map_err(|e| {
            ValidationError::InvalidJson {
                message: e.body_text(),
            }
        })?;

        payload.validate().map_err(ValidationError::from)?;

        Ok(Self(payload))
    }
}
