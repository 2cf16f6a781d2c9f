//! JSON extractor that runs [`validator`] checks after deserializing.

use axum::extract::{FromRequest, Request};
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use super::Json;
use crate::handler::response::ErrorResponse;
use crate::handler::{Error, ErrorKind};

const TRACING_TARGET: &str = "catalog_server::extract::validate";

/// Deserializes a JSON body and validates it.
///
/// Failed checks answer with a `validation_error` listing every field, e.g.
/// a product name longer than 255 characters.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct ValidateJson<T>(pub T);

impl<T> ValidateJson<T> {
    /// Consumes the wrapper and returns the validated payload.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state).await?;
        payload.validate()?;
        Ok(Self(payload))
    }
}

impl From<ValidationErrors> for Error<'static> {
    fn from(errors: ValidationErrors) -> Self {
        tracing::debug!(
            target: TRACING_TARGET,
            fields = ?errors.field_errors().keys().collect::<Vec<_>>(),
            "Request validation failed"
        );

        let details = ErrorResponse::from_validation_errors(&errors)
            .validation
            .unwrap_or_default();

        let message = match details.as_slice() {
            [single] => single.message.clone(),
            _ => format!("{} fields failed validation", details.len()),
        };

        ErrorKind::Validation
            .with_message(message)
            .with_validation(details)
    }
}

impl<T> aide::OperationInput for ValidateJson<T>
where
    T: schemars::JsonSchema,
{
    fn operation_input(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) {
        Json::<T>::operation_input(ctx, operation);
    }

    fn inferred_early_responses(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Vec<(Option<u16>, aide::openapi::Response)> {
        Json::<T>::inferred_early_responses(ctx, operation)
    }
}
