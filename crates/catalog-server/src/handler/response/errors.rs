use std::borrow::Cow;
use std::collections::HashMap;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use schemars::JsonSchema;
use serde::Serialize;
use validator::ValidationErrors;

/// Tracing target for rendered error responses.
const TRACING_TARGET: &str = "catalog_server::handler::errors";

/// One failed field check.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ValidationErrorDetail {
    /// Field that failed validation.
    pub field: String,
    /// Validator code, e.g. `length`.
    pub code: String,
    /// Human-readable explanation.
    pub message: String,
    /// Validator parameters such as `min` and `max`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<HashMap<String, serde_json::Value>>,
}

/// JSON body of every error response.
///
/// Only `name`, `message`, `resource`, `suggestion` and `validation` reach the
/// client; the status travels in the response line and the context stays in
/// the logs.
#[must_use = "error responses do nothing unless serialized"]
#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse<'a> {
    /// Stable machine-readable error name.
    pub name: Cow<'a, str>,
    /// Message safe to show to users.
    pub message: Cow<'a, str>,
    /// Resource the error relates to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<Cow<'a, str>>,
    /// Hint on how to fix the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<Cow<'a, str>>,
    /// Field level validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<Vec<ValidationErrorDetail>>,

    /// Internal context, logged only.
    #[serde(skip)]
    pub context: Option<Cow<'a, str>>,
    /// HTTP status code.
    #[serde(skip)]
    pub status: StatusCode,
}

impl<'a> ErrorResponse<'a> {
    pub const BAD_REQUEST: Self = Self::new(
        "bad_request",
        "Invalid request data.",
        StatusCode::BAD_REQUEST,
    );
    pub const INTERNAL_SERVER_ERROR: Self = Self::new(
        "internal_server_error",
        "Internal server error.",
        StatusCode::INTERNAL_SERVER_ERROR,
    );
    pub const INVALID_CURSOR: Self = Self::new(
        "invalid_cursor",
        "Invalid pagination cursor.",
        StatusCode::BAD_REQUEST,
    );
    pub const MISSING_PATH_PARAM: Self = Self::new(
        "missing_path_param",
        "Missing path parameter.",
        StatusCode::BAD_REQUEST,
    );
    pub const NOT_FOUND: Self =
        Self::new("not_found", "Resource not found.", StatusCode::NOT_FOUND);
    pub const PAYLOAD_TOO_LARGE: Self = Self::new(
        "payload_too_large",
        "Payload too large.",
        StatusCode::PAYLOAD_TOO_LARGE,
    );
    pub const SERVICE_UNAVAILABLE: Self = Self::new(
        "service_unavailable",
        "Service unavailable.",
        StatusCode::SERVICE_UNAVAILABLE,
    );
    pub const UNSUPPORTED_MEDIA_TYPE: Self = Self::new(
        "unsupported_media_type",
        "Unsupported media type.",
        StatusCode::UNSUPPORTED_MEDIA_TYPE,
    );
    pub const VALIDATION_ERROR: Self = Self::new(
        "validation_error",
        "Validation failed.",
        StatusCode::BAD_REQUEST,
    );

    /// Creates a new error response.
    #[inline]
    pub const fn new(name: &'a str, message: &'a str, status: StatusCode) -> Self {
        Self {
            name: Cow::Borrowed(name),
            message: Cow::Borrowed(message),
            resource: None,
            suggestion: None,
            validation: None,
            context: None,
            status,
        }
    }

    /// Replaces the default message.
    pub fn with_message(mut self, message: impl Into<Cow<'a, str>>) -> Self {
        self.message = message.into();
        self
    }

    /// Sets the resource, nesting it under an existing one.
    pub fn with_resource(mut self, resource: impl Into<Cow<'a, str>>) -> Self {
        let resource = resource.into();
        self.resource = Some(match self.resource {
            Some(existing) => Cow::Owned(format!("{existing}/{resource}")),
            None => resource,
        });
        self
    }

    /// Appends internal context.
    pub fn with_context(mut self, context: impl Into<Cow<'a, str>>) -> Self {
        let context = context.into();
        self.context = Some(match self.context {
            Some(existing) => Cow::Owned(format!("{existing}; {context}")),
            None => context,
        });
        self
    }

    /// Sets the suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<Cow<'a, str>>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Builds a validation error listing every failed field.
    pub fn from_validation_errors(errors: &ValidationErrors) -> Self {
        let details = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, failures)| {
                failures.iter().map(move |failure| {
                    let params: HashMap<_, _> = failure
                        .params
                        .iter()
                        .filter(|(key, _)| *key != "value")
                        .map(|(key, value)| (key.to_string(), value.clone()))
                        .collect();

                    ValidationErrorDetail {
                        field: field.to_string(),
                        code: failure.code.to_string(),
                        message: failure
                            .message
                            .as_ref()
                            .map(ToString::to_string)
                            .unwrap_or_else(|| format!("Field '{field}' is invalid")),
                        params: (!params.is_empty()).then_some(params),
                    }
                })
            })
            .collect();

        Self {
            validation: Some(details),
            ..Self::VALIDATION_ERROR
        }
    }
}

impl Default for ErrorResponse<'_> {
    #[inline]
    fn default() -> Self {
        Self::INTERNAL_SERVER_ERROR
    }
}

impl From<ValidationErrors> for ErrorResponse<'_> {
    fn from(errors: ValidationErrors) -> Self {
        Self::from_validation_errors(&errors)
    }
}

impl IntoResponse for ErrorResponse<'_> {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(
                target: TRACING_TARGET,
                status = %self.status,
                name = %self.name,
                context = ?self.context,
                "Request failed"
            );
        } else {
            tracing::debug!(
                target: TRACING_TARGET,
                status = %self.status,
                name = %self.name,
                resource = ?self.resource,
                context = ?self.context,
                "Request rejected"
            );
        }

        (self.status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::*;

    #[derive(Validate)]
    struct Named {
        #[validate(length(min = 1, max = 3))]
        name: String,
    }

    #[test]
    fn message_replaces_default() {
        let response = ErrorResponse::NOT_FOUND.with_message("Product not found");
        assert_eq!(response.message, "Product not found");
        assert_eq!(response.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn resources_nest() {
        let response = ErrorResponse::NOT_FOUND
            .with_resource("uploads")
            .with_resource("image");
        assert_eq!(response.resource.as_deref(), Some("uploads/image"));
    }

    #[test]
    fn context_and_status_are_not_serialized() {
        let response = ErrorResponse::INVALID_CURSOR
            .with_resource("cursor")
            .with_context("base64 decode failed")
            .with_suggestion("Pass the next_cursor of a previous page unchanged");

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["name"], "invalid_cursor");
        assert_eq!(json["resource"], "cursor");
        assert!(json.get("suggestion").is_some());
        assert!(json.get("context").is_none());
        assert!(json.get("status").is_none());
    }

    #[test]
    fn validation_errors_are_listed_per_field() {
        let errors = Named {
            name: "toolong".to_owned(),
        }
        .validate()
        .unwrap_err();

        let response = ErrorResponse::from(errors);
        let details = response.validation.unwrap();
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].field, "name");
        assert_eq!(details[0].code, "length");
    }
}
