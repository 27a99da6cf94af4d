use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{IdPath, ValidatedJson};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{CreateProduct, InventoryStats, Product, SearchQuery, UpdateProduct};
use crate::repository::ProductRepository;
use crate::service::ProductService;

const TAG: &str = "products";

/// OpenAPI documentation for the inventory API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
        search_products,
        low_stock_products,
        out_of_stock_products,
        statistics,
        list_categories,
        list_suppliers,
        products_by_category,
        products_by_supplier,
    ),
    components(schemas(Product, CreateProduct, UpdateProduct, InventoryStats)),
    tags(
        (name = TAG, description = "Inventory management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the product router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/search", get(search_products))
        .route("/low-stock", get(low_stock_products))
        .route("/out-of-stock", get(out_of_stock_products))
        .route("/statistics", get(statistics))
        .route("/categories", get(list_categories))
        .route("/suppliers", get(list_suppliers))
        .route("/by-category/{category}", get(products_by_category))
        .route("/by-supplier/{supplier}", get(products_by_supplier))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(shared_service)
}

/// List all products
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "List of all products", body = Vec<Product>),
        (status = 500, description = "Storage failure")
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.get_all_products().await?;
    Ok(Json(products))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created successfully", body = Product),
        (status = 400, description = "Validation failure"),
        (status = 500, description = "Storage failure")
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Get a product by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "Product not found")
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<Json<Product>> {
    let product = service.get_product(id).await?;
    Ok(Json(product))
}

/// Update a product, replacing every mutable field
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated successfully", body = Product),
        (status = 400, description = "Validation failure"),
        (status = 404, description = "Product not found")
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> ProductResult<Json<Product>> {
    let product = service.update_product(id, input).await?;
    Ok(Json(product))
}

/// Delete a product
///
/// Returns 204 regardless of prior existence.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 400, description = "Invalid id")
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<impl IntoResponse> {
    service.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Substring search over name, category and supplier
#[utoipa::path(
    get,
    path = "/search",
    tag = TAG,
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching products (possibly empty)", body = Vec<Product>)
    )
)]
async fn search_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Query(params): Query<SearchQuery>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.search_products(&params.query).await?;
    Ok(Json(products))
}

/// Products at or below their low-stock threshold
#[utoipa::path(
    get,
    path = "/low-stock",
    tag = TAG,
    responses(
        (status = 200, description = "Low-stock products", body = Vec<Product>)
    )
)]
async fn low_stock_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.get_low_stock_products().await?;
    Ok(Json(products))
}

/// Products with zero quantity
#[utoipa::path(
    get,
    path = "/out-of-stock",
    tag = TAG,
    responses(
        (status = 200, description = "Out-of-stock products", body = Vec<Product>)
    )
)]
async fn out_of_stock_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.get_out_of_stock_products().await?;
    Ok(Json(products))
}

/// Aggregate inventory statistics
#[utoipa::path(
    get,
    path = "/statistics",
    tag = TAG,
    responses(
        (status = 200, description = "Inventory statistics", body = InventoryStats)
    )
)]
async fn statistics<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<InventoryStats>> {
    let stats = service.get_statistics().await?;
    Ok(Json(stats))
}

/// Distinct categories, sorted ascending
#[utoipa::path(
    get,
    path = "/categories",
    tag = TAG,
    responses(
        (status = 200, description = "Distinct categories", body = Vec<String>)
    )
)]
async fn list_categories<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<Vec<String>>> {
    let categories = service.get_all_categories().await?;
    Ok(Json(categories))
}

/// Distinct suppliers, sorted ascending
#[utoipa::path(
    get,
    path = "/suppliers",
    tag = TAG,
    responses(
        (status = 200, description = "Distinct suppliers", body = Vec<String>)
    )
)]
async fn list_suppliers<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<Vec<String>>> {
    let suppliers = service.get_all_suppliers().await?;
    Ok(Json(suppliers))
}

/// Products in an exact category
#[utoipa::path(
    get,
    path = "/by-category/{category}",
    tag = TAG,
    params(
        ("category" = String, Path, description = "Exact category label")
    ),
    responses(
        (status = 200, description = "Products in the category", body = Vec<Product>)
    )
)]
async fn products_by_category<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(category): Path<String>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.get_products_by_category(&category).await?;
    Ok(Json(products))
}

/// Products from an exact supplier
#[utoipa::path(
    get,
    path = "/by-supplier/{supplier}",
    tag = TAG,
    params(
        ("supplier" = String, Path, description = "Exact supplier label")
    ),
    responses(
        (status = 200, description = "Products from the supplier", body = Vec<Product>)
    )
)]
async fn products_by_supplier<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(supplier): Path<String>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.get_products_by_supplier(&supplier).await?;
    Ok(Json(products))
}
