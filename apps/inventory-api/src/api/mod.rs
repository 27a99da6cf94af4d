//! API routes module

pub mod health;

use axum::Router;
use domain_inventory::{ProductRepository, ProductService};

/// Create all API routes
pub fn routes<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    Router::new().nest("/products", domain_inventory::handlers::router(service))
}
