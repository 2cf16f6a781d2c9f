//! Service error to HTTP error conversion.

use catalog_postgres::PgError;
use tokio::time::error::Elapsed;

use super::http_error::{Error as HttpError, ErrorKind};
use crate::ErrorKind as ServiceErrorKind;

/// Tracing target for service error conversions.
const TRACING_TARGET: &str = "catalog_server::handler::service";

impl From<crate::Error> for HttpError<'static> {
    fn from(error: crate::Error) -> Self {
        let pg_error = std::error::Error::source(&error)
            .and_then(|source| source.downcast_ref::<PgError>());
        if let Some(pg_error) = pg_error.filter(|e| e.constraint_violation().is_some()) {
            return pg_error.into();
        }

        let context = match std::error::Error::source(&error) {
            Some(source) => format!("{error}: {source}"),
            None => error.to_string(),
        };

        match error.kind() {
            ServiceErrorKind::InvalidCursor => ErrorKind::InvalidCursor
                .with_message(error.message().to_owned())
                .with_resource("cursor")
                .with_suggestion("Omit the cursor to start over, or pass a next_cursor unchanged")
                .with_context(context),
            ServiceErrorKind::BadInput => ErrorKind::BadRequest
                .with_message(error.message().to_owned())
                .with_context(context),
            ServiceErrorKind::NotFound => ErrorKind::NotFound
                .with_message(error.message().to_owned())
                .with_context(context),
            ServiceErrorKind::PayloadTooLarge => ErrorKind::PayloadTooLarge
                .with_message(error.message().to_owned())
                .with_context(context),
            ServiceErrorKind::Internal if is_deadline_expiry(&error) => {
                tracing::warn!(target: TRACING_TARGET, error = %context, "Store deadline exceeded");
                ErrorKind::InternalServerError.with_context(context)
            }
            ServiceErrorKind::Config
            | ServiceErrorKind::FileSystem
            | ServiceErrorKind::Internal => {
                tracing::error!(target: TRACING_TARGET, error = %context, "Service operation failed");
                ErrorKind::InternalServerError.with_context(context)
            }
        }
    }
}

fn is_deadline_expiry(error: &crate::Error) -> bool {
    std::error::Error::source(error).is_some_and(|source| source.is::<Elapsed>())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::http::StatusCode;
    use catalog_postgres::types::{CursorError, MAX_PAGE_SIZE};
    use jiff::Timestamp;

    use super::*;
    use crate::service::{MemoryStore, PageSizePolicy, Paginator};

    #[test]
    fn invalid_cursor_is_bad_request() {
        let error = HttpError::from(crate::Error::from(CursorError::Empty));
        assert_eq!(error.kind(), ErrorKind::InvalidCursor);
        assert_eq!(error.resource(), Some("cursor"));
    }

    #[test]
    fn service_kinds_map_to_http_kinds() {
        let cases = [
            (crate::Error::not_found("missing"), ErrorKind::NotFound),
            (crate::Error::bad_input("nope"), ErrorKind::BadRequest),
            (crate::Error::payload_too_large("big"), ErrorKind::PayloadTooLarge),
            (crate::Error::internal("postgres", "down"), ErrorKind::InternalServerError),
            (crate::Error::file_system("disk"), ErrorKind::InternalServerError),
        ];

        for (service_error, expected) in cases {
            assert_eq!(HttpError::from(service_error).kind(), expected);
        }
    }

    #[test]
    fn internal_details_stay_in_context() {
        let error = HttpError::from(crate::Error::internal("postgres", "password rejected"));
        assert_eq!(error.message(), None);
        assert!(error.context().unwrap().contains("password rejected"));
    }

    #[tokio::test]
    async fn expired_store_deadline_is_internal_server_error() {
        let store = MemoryStore::new().with_delay(Duration::from_millis(200));
        store.seed("slow", Timestamp::from_second(1_700_000_000).unwrap());
        let policy = PageSizePolicy::new(2, MAX_PAGE_SIZE).unwrap();
        let paginator = Paginator::new(Arc::new(store), policy, Duration::from_millis(20));

        let service_error = paginator.list("", 2).await.unwrap_err();
        assert!(is_deadline_expiry(&service_error));

        let error = HttpError::from(service_error);
        assert_eq!(error.kind(), ErrorKind::InternalServerError);
        assert_eq!(error.kind().status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(error.context().unwrap().contains("did not complete"));
    }
}
