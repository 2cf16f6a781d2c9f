use axum::extract::rejection::QueryRejection;
use axum::extract::{FromRequestParts, Query as AxumQuery};
use axum::http::request::Parts;
use derive_more::{Deref, DerefMut, From};
use serde::de::DeserializeOwned;

use crate::handler::{Error, ErrorKind};

const TRACING_TARGET: &str = "catalog_server::extract::query";

/// Query string extractor.
///
/// Unparsable parameters, such as `num=ten`, become a 400 that names the
/// parameter when it can be recovered from the decoder message.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct Query<T>(pub T);

impl<T> Query<T> {
    /// Consumes the wrapper and returns the parameters.
    #[inline]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T, S> FromRequestParts<S> for Query<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AxumQuery(params) = AxumQuery::<T>::from_request_parts(parts, state).await?;
        Ok(Self(params))
    }
}

impl From<QueryRejection> for Error<'static> {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!(target: TRACING_TARGET, error = %rejection, "Query string rejected");

        let detail = rejection.body_text();
        let message = match quoted_field(&detail) {
            Some(field) => format!("Query parameter '{field}' is invalid"),
            None => "Query string is invalid".to_owned(),
        };

        ErrorKind::BadRequest
            .with_message(message)
            .with_context(detail)
    }
}

/// Returns the first name wrapped in backticks, as serde quotes field names.
fn quoted_field(message: &str) -> Option<&str> {
    let (_, rest) = message.split_once('`')?;
    let (field, _) = rest.split_once('`')?;
    (!field.is_empty()).then_some(field)
}

impl<T> aide::OperationInput for Query<T>
where
    T: schemars::JsonSchema,
{
    fn operation_input(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) {
        AxumQuery::<T>::operation_input(ctx, operation);
    }

    fn inferred_early_responses(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Vec<(Option<u16>, aide::openapi::Response)> {
        AxumQuery::<T>::inferred_early_responses(ctx, operation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_are_read_from_backticks() {
        assert_eq!(quoted_field("missing field `num`"), Some("num"));
        assert_eq!(quoted_field("invalid digit found in string"), None);
        assert_eq!(quoted_field("empty ``"), None);
    }
}
