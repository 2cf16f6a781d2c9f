use axum::extract::rejection::PathRejection;
use axum::extract::{FromRequestParts, Path as AxumPath};
use axum::http::request::Parts;
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;

use crate::handler::{Error, ErrorKind};

const TRACING_TARGET: &str = "catalog_server::extract::path";

/// Path parameter extractor.
///
/// A path segment that does not parse, such as a product id that is not a
/// UUID, becomes a 400 naming the offending segment.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct Path<T>(pub T);

impl<T> Path<T> {
    /// Consumes the wrapper and returns the parameters.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AxumPath(params) = AxumPath::<T>::from_request_parts(parts, state).await?;
        Ok(Self(params))
    }
}

impl From<PathRejection> for Error<'static> {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(target: TRACING_TARGET, error = %rejection, "Path rejected");

        match rejection {
            PathRejection::FailedToDeserializePathParams(e) => {
                let detail = e.body_text();
                let message = if detail.contains("UUID") {
                    "Path parameter is not a valid UUID"
                } else {
                    "Path parameter has an invalid format"
                };
                ErrorKind::BadRequest
                    .with_message(message)
                    .with_context(detail)
            }
            PathRejection::MissingPathParams(e) => ErrorKind::MissingPathParam
                .with_context(e.body_text()),
            other => ErrorKind::InternalServerError.with_context(other.body_text()),
        }
    }
}

impl<T> aide::OperationInput for Path<T>
where
    T: schemars::JsonSchema,
{
    fn operation_input(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) {
        AxumPath::<T>::operation_input(ctx, operation);
    }

    fn inferred_early_responses(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Vec<(Option<u16>, aide::openapi::Response)> {
        AxumPath::<T>::inferred_early_responses(ctx, operation)
    }
}
