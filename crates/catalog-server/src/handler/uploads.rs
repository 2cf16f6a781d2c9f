//! Image upload and download handlers.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::{DefaultBodyLimit, FromRef, State};
use axum::http::StatusCode;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};

use crate::extract::{Json, Multipart, Path};
use crate::handler::request::ImagePathParams;
use crate::handler::response::{ErrorResponse, UploadedImage};
use crate::handler::{ErrorKind, Result};
use crate::service::{ImageFormat, ImageStorage, ServiceState};

/// Tracing target for upload operations.
const TRACING_TARGET: &str = "catalog_server::handler::uploads";

/// Multipart field carrying the file.
const FILE_FIELD: &str = "document";

/// Allowance for multipart boundaries and part headers on top of the file.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Stores an uploaded image.
#[tracing::instrument(skip_all)]
async fn upload_image(
    State(storage): State<ImageStorage>,
    Multipart(mut multipart): Multipart,
) -> Result<(StatusCode, Json<UploadedImage>)> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let original_name = field.file_name().unwrap_or_default().to_owned();
        let bytes = field.bytes().await?;

        tracing::debug!(
            target: TRACING_TARGET,
            original_name = %original_name,
            size = bytes.len(),
            "Upload received"
        );

        let stored = storage.save(&original_name, &bytes).await?;
        return Ok((StatusCode::CREATED, Json(stored.into())));
    }

    Err(ErrorKind::BadRequest
        .with_message(format!("Multipart field '{FILE_FIELD}' is missing"))
        .with_resource("upload"))
}

fn upload_image_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Upload image")
        .description(
            "Stores the file sent in the multipart field `document` and returns its \
             download link. The stored name keeps a sanitized stem and extension of the \
             original and adds a random suffix.",
        )
        .response::<201, Json<UploadedImage>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<413, Json<ErrorResponse>>()
}

/// Serves a stored image as an attachment.
#[tracing::instrument(skip_all, fields(file_name = %path_params.file_name))]
async fn download_image(
    State(storage): State<ImageStorage>,
    Path(path_params): Path<ImagePathParams>,
) -> Result<Response> {
    let bytes = storage.read(&path_params.file_name).await?;

    let headers = [
        (
            CONTENT_TYPE,
            ImageFormat::mime_type_of(&path_params.file_name).to_owned(),
        ),
        (
            CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", path_params.file_name),
        ),
    ];

    Ok((headers, bytes).into_response())
}

fn download_image_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Download image")
        .description("Returns a stored file with `Content-Disposition: attachment`.")
        .response_with::<200, (), _>(|res| res.description("The stored file"))
        .response::<400, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Returns routes for image uploads.
///
/// The body limit of the upload route follows the storage's maximum file size.
pub fn routes(state: &ServiceState) -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    let max_upload_size = ImageStorage::from_ref(state).max_upload_size();

    let upload = ApiRouter::new()
        .api_route("/uploads/images", post_with(upload_image, upload_image_docs))
        .layer(DefaultBodyLimit::max(max_upload_size + MULTIPART_OVERHEAD));

    ApiRouter::new()
        .merge(upload)
        .api_route(
            "/uploads/images/{file_name}",
            get_with(download_image, download_image_docs),
        )
        .with_path_items(|item| item.tag("Uploads"))
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;
    use axum_test::multipart::{MultipartForm, Part};

    use super::*;
    use crate::handler::test::create_test_app;

    fn image_form(file_name: &str, bytes: &'static [u8]) -> MultipartForm {
        MultipartForm::new().add_part(
            FILE_FIELD,
            Part::bytes(bytes)
                .file_name(file_name)
                .mime_type("image/png"),
        )
    }

    #[tokio::test]
    async fn upload_then_download() -> anyhow::Result<()> {
        let app = create_test_app(|state| routes(&state)).await?;

        let response = app
            .server
            .post("/uploads/images")
            .multipart(image_form("../../etc/lamp.png", b"png bytes"))
            .await;
        response.assert_status(StatusCode::CREATED);

        let uploaded = response.json::<UploadedImage>();
        assert!(uploaded.file_name.starts_with("lamp-"));
        assert!(uploaded.file_name.ends_with(".png"));
        assert_eq!(uploaded.size, 9);
        assert_eq!(
            uploaded.url,
            format!("/api/v1/uploads/images/{}", uploaded.file_name)
        );

        let response = app
            .server
            .get(&format!("/uploads/images/{}", uploaded.file_name))
            .await;
        response.assert_status_ok();
        assert_eq!(response.as_bytes().as_ref(), b"png bytes");
        assert_eq!(response.header(CONTENT_TYPE), "image/png");
        assert_eq!(
            response.header(CONTENT_DISPOSITION),
            HeaderValue::from_str(&format!("attachment; filename=\"{}\"", uploaded.file_name))?
        );
        Ok(())
    }

    #[tokio::test]
    async fn oversized_upload_is_rejected() -> anyhow::Result<()> {
        let app = create_test_app(|state| routes(&state)).await?;
        static LARGE: [u8; 2048] = [7; 2048];

        let response = app
            .server
            .post("/uploads/images")
            .multipart(image_form("big.png", &LARGE))
            .await;
        response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            response.json::<serde_json::Value>()["name"],
            "payload_too_large"
        );
        Ok(())
    }

    #[tokio::test]
    async fn missing_field_is_bad_request() -> anyhow::Result<()> {
        let app = create_test_app(|state| routes(&state)).await?;

        let form = MultipartForm::new().add_text("title", "lamp");
        app.server
            .post("/uploads/images")
            .multipart(form)
            .await
            .assert_status_bad_request();
        Ok(())
    }

    #[tokio::test]
    async fn unknown_file_is_not_found() -> anyhow::Result<()> {
        let app = create_test_app(|state| routes(&state)).await?;
        app.server
            .get("/uploads/images/missing-0000.png")
            .await
            .assert_status_not_found();
        Ok(())
    }
}
