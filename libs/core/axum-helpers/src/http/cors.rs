use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};

/// Creates the CORS layer for API services.
///
/// The API is public: every origin and header is allowed.
/// Allowed methods: GET, POST, PUT, DELETE, OPTIONS.
pub fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
}
