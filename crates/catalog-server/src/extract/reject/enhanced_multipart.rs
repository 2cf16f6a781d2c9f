//! Multipart body extractor used by the image upload route.

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{FromRequest, Multipart as AxumMultipart, Request};
use axum::http::StatusCode;
use derive_more::{Deref, DerefMut, From};

use crate::handler::{Error, ErrorKind};

/// Wrapper around [`axum::extract::Multipart`] rejecting with the crate's [`Error`].
#[must_use]
#[derive(Debug, Deref, DerefMut, From)]
pub struct Multipart(pub AxumMultipart);

impl<S> FromRequest<S> for Multipart
where
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let multipart = AxumMultipart::from_request(req, state).await?;
        Ok(Self(multipart))
    }
}

impl From<MultipartRejection> for Error<'static> {
    fn from(rejection: MultipartRejection) -> Self {
        match rejection {
            MultipartRejection::InvalidBoundary(_) => ErrorKind::UnsupportedMediaType
                .with_message("Request body must be multipart/form-data")
                .with_suggestion("Send a 'multipart/form-data' body with a boundary parameter"),
            other => ErrorKind::BadRequest
                .with_message("Multipart body could not be read")
                .with_context(other.body_text()),
        }
    }
}

impl From<MultipartError> for Error<'static> {
    fn from(error: MultipartError) -> Self {
        if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return ErrorKind::PayloadTooLarge
                .with_message("Uploaded file exceeds the size limit")
                .with_context(error.body_text());
        }

        ErrorKind::BadRequest
            .with_message("Multipart field could not be read")
            .with_context(error.body_text())
    }
}

impl aide::OperationInput for Multipart {
    fn operation_input(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) {
        AxumMultipart::operation_input(ctx, operation);
    }
}
