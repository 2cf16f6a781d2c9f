//! Product handlers: CRUD plus cursor and offset listings.

use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::State;
use axum::http::StatusCode;

use crate::extract::{Json, Path, Query, ValidateJson};
use crate::handler::request::{
    CreateProduct, CursorQuery, PageQuery, ProductNamePathParams, ProductPathParams,
    UpdateProduct,
};
use crate::handler::response::{ErrorResponse, NumberedProductsPage, Product, ProductsPage};
use crate::handler::Result;
use crate::service::{Paginator, ProductService, ServiceState};

/// Tracing target for product operations.
const TRACING_TARGET: &str = "catalog_server::handler::products";

/// Creates a product.
#[tracing::instrument(skip_all)]
async fn create_product(
    State(products): State<ProductService>,
    ValidateJson(request): ValidateJson<CreateProduct>,
) -> Result<(StatusCode, Json<Product>)> {
    tracing::debug!(target: TRACING_TARGET, "Creating product");

    let product = products.create(request.into_draft()).await?;
    Ok((StatusCode::CREATED, Json(product.into())))
}

fn create_product_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Create product")
        .description("Stores a new product. The id and both timestamps are assigned by the server.")
        .response::<201, Json<Product>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<504, Json<ErrorResponse>>()
}

/// Lists products after a cursor.
#[tracing::instrument(skip_all, fields(has_cursor = query.cursor.is_some(), num = query.num))]
async fn list_products(
    State(paginator): State<Paginator>,
    Query(query): Query<CursorQuery>,
) -> Result<(StatusCode, Json<ProductsPage>)> {
    let page = paginator.list(query.cursor(), query.num()).await?;

    tracing::debug!(
        target: TRACING_TARGET,
        item_count = page.items.len(),
        has_more = page.has_more(),
        "Products listed"
    );

    Ok((StatusCode::OK, Json(page.into())))
}

fn list_products_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List products")
        .description(
            "Returns products in creation order. Pass `next_cursor` back as `cursor` to read \
             the following page; it is absent once the listing is exhausted. Page sizes \
             below the server floor are raised to it.",
        )
        .response::<200, Json<ProductsPage>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
        .response::<504, Json<ErrorResponse>>()
}

/// Lists products by page number.
#[tracing::instrument(skip_all, fields(page = query.page, limit = query.limit))]
async fn list_product_pages(
    State(paginator): State<Paginator>,
    Query(query): Query<PageQuery>,
) -> Result<(StatusCode, Json<NumberedProductsPage>)> {
    let page = paginator.list_offset(query.page(), query.limit()).await?;

    tracing::debug!(
        target: TRACING_TARGET,
        item_count = page.items.len(),
        total_rows = page.total_rows,
        "Product page listed"
    );

    Ok((StatusCode::OK, Json(page.into())))
}

fn list_product_pages_docs(op: TransformOperation) -> TransformOperation {
    op.summary("List products by page")
        .description(
            "Returns one numbered page of products. Totals are estimated from table \
             statistics and may be inexact under concurrent writes.",
        )
        .response::<200, Json<NumberedProductsPage>>()
        .response::<404, Json<ErrorResponse>>()
        .response::<504, Json<ErrorResponse>>()
}

/// Reads a product by id.
#[tracing::instrument(skip_all, fields(product_id = %path_params.product_id))]
async fn read_product(
    State(products): State<ProductService>,
    Path(path_params): Path<ProductPathParams>,
) -> Result<(StatusCode, Json<Product>)> {
    let product = products.get(path_params.product_id).await?;
    Ok((StatusCode::OK, Json(product.into())))
}

fn read_product_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get product")
        .description("Returns the product with the given id.")
        .response::<200, Json<Product>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Reads a product by exact name.
#[tracing::instrument(skip_all)]
async fn read_product_by_name(
    State(products): State<ProductService>,
    Path(path_params): Path<ProductNamePathParams>,
) -> Result<(StatusCode, Json<Product>)> {
    let product = products.get_by_name(&path_params.name).await?;
    Ok((StatusCode::OK, Json(product.into())))
}

fn read_product_by_name_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Get product by name")
        .description("Returns the oldest product whose name matches exactly.")
        .response::<200, Json<Product>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Updates a product.
#[tracing::instrument(skip_all, fields(product_id = %path_params.product_id))]
async fn update_product(
    State(products): State<ProductService>,
    Path(path_params): Path<ProductPathParams>,
    ValidateJson(request): ValidateJson<UpdateProduct>,
) -> Result<(StatusCode, Json<Product>)> {
    tracing::debug!(target: TRACING_TARGET, "Updating product");

    let product = products
        .update(path_params.product_id, request.into_model())
        .await?;
    Ok((StatusCode::OK, Json(product.into())))
}

fn update_product_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Update product")
        .description("Changes the given fields and refreshes `updated_at`. At least one field is required.")
        .response::<200, Json<Product>>()
        .response::<400, Json<ErrorResponse>>()
        .response::<404, Json<ErrorResponse>>()
}

/// Deletes a product.
#[tracing::instrument(skip_all, fields(product_id = %path_params.product_id))]
async fn delete_product(
    State(products): State<ProductService>,
    Path(path_params): Path<ProductPathParams>,
) -> Result<StatusCode> {
    products.delete(path_params.product_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn delete_product_docs(op: TransformOperation) -> TransformOperation {
    op.summary("Delete product")
        .description("Permanently removes the product.")
        .response::<204, ()>()
        .response::<404, Json<ErrorResponse>>()
}

/// Returns routes for product management.
pub fn routes() -> ApiRouter<ServiceState> {
    use aide::axum::routing::*;

    ApiRouter::new()
        .api_route(
            "/products",
            post_with(create_product, create_product_docs)
                .get_with(list_products, list_products_docs),
        )
        .api_route(
            "/products/pages",
            get_with(list_product_pages, list_product_pages_docs),
        )
        .api_route(
            "/products/by-name/{name}",
            get_with(read_product_by_name, read_product_by_name_docs),
        )
        .api_route(
            "/products/{product_id}",
            get_with(read_product, read_product_docs)
                .patch_with(update_product, update_product_docs)
                .delete_with(delete_product, delete_product_docs),
        )
        .with_path_items(|item| item.tag("Products"))
}
