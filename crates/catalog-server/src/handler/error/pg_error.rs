//! Database error to HTTP error conversion.

use catalog_postgres::PgError;
use catalog_postgres::types::{ConstraintViolation, ProductConstraints};

use crate::handler::{Error, ErrorKind};

/// Tracing target for database error conversions.
const TRACING_TARGET: &str = "catalog_server::handler::postgres";

impl From<ProductConstraints> for Error<'static> {
    fn from(constraint: ProductConstraints) -> Self {
        let error = match constraint {
            ProductConstraints::NameLength => ErrorKind::BadRequest
                .with_message("Product name must be between 1 and 255 characters"),
            ProductConstraints::DescriptionLength => ErrorKind::BadRequest
                .with_message("Product description must be between 1 and 255 characters"),
            ProductConstraints::ImageSrcLength => ErrorKind::BadRequest
                .with_message("Product image reference must be at most 2048 characters"),
            ProductConstraints::UpdatedAfterCreated => ErrorKind::InternalServerError.into_error(),
        };

        error
            .with_resource("product")
            .with_context(format!("constraint violated: {constraint}"))
    }
}

impl From<ConstraintViolation> for Error<'static> {
    fn from(constraint: ConstraintViolation) -> Self {
        match constraint {
            ConstraintViolation::Product(c) => c.into(),
        }
    }
}

impl From<&PgError> for Error<'static> {
    fn from(error: &PgError) -> Self {
        if let Some(violation) = error.constraint_violation() {
            return violation.into();
        }

        if error.is_not_found() {
            return ErrorKind::NotFound.into_error();
        }

        tracing::error!(
            target: TRACING_TARGET,
            error = %error,
            transient = error.is_transient(),
            "Database operation failed"
        );
        ErrorKind::InternalServerError.with_context(error.to_string())
    }
}

impl From<PgError> for Error<'static> {
    #[inline]
    fn from(error: PgError) -> Self {
        Self::from(&error)
    }
}

#[cfg(test)]
mod tests {
    use catalog_postgres::error::DieselError;

    use super::*;

    #[test]
    fn constraint_violations_are_bad_requests() {
        let error = Error::from(ProductConstraints::NameLength);
        assert_eq!(error.kind(), ErrorKind::BadRequest);
        assert_eq!(error.resource(), Some("product"));
    }

    #[test]
    fn missing_rows_are_not_found() {
        let error = Error::from(PgError::Query(DieselError::NotFound));
        assert_eq!(error.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn other_failures_are_internal() {
        let error = Error::from(PgError::Unexpected("pool closed".into()));
        assert_eq!(error.kind(), ErrorKind::InternalServerError);
    }
}
