//! API route configuration.
//!
//! Each resource router owns its prefix under `/api`. The scope carries
//! its own JSON 404 fallback so unmatched API paths never reach the SPA
//! entry document.

use crate::api::handlers::{
    create_order_handler, create_product_handler, create_user_handler, delete_product_handler,
    delete_user_handler, get_order_handler, get_product_handler, get_user_handler,
    list_orders_handler, list_products_handler, list_users_handler, update_order_status_handler,
    update_product_handler, update_user_handler,
};
use crate::error::AppError;
use crate::state::AppState;
use axum::{Router, routing::get};
use serde_json::json;

/// All API routes.
///
/// # Endpoints
///
/// - `GET    /products`        - List catalog products (paginated)
/// - `POST   /products`        - Add a product
/// - `GET    /products/{id}`   - Fetch a product
/// - `PATCH  /products/{id}`   - Partially update a product
/// - `DELETE /products/{id}`   - Remove a product
/// - `GET    /orders`          - List orders (paginated, optional user filter)
/// - `POST   /orders`          - Place an order
/// - `GET    /orders/{id}`     - Fetch an order with line items
/// - `PATCH  /orders/{id}`     - Move an order through its lifecycle
/// - `GET    /users`           - List users (paginated)
/// - `POST   /users`           - Register a user
/// - `GET    /users/{id}`      - Fetch a user
/// - `PATCH  /users/{id}`      - Partially update a user
/// - `DELETE /users/{id}`      - Delete a user
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .nest("/orders", order_routes())
        .nest("/users", user_routes())
        .fallback(api_not_found)
}

fn product_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_products_handler).post(create_product_handler),
        )
        .route(
            "/{id}",
            get(get_product_handler)
                .patch(update_product_handler)
                .delete(delete_product_handler),
        )
}

fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders_handler).post(create_order_handler))
        .route(
            "/{id}",
            get(get_order_handler).patch(update_order_status_handler),
        )
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users_handler).post(create_user_handler))
        .route(
            "/{id}",
            get(get_user_handler)
                .patch(update_user_handler)
                .delete(delete_user_handler),
        )
}

/// JSON 404 for unmatched paths inside the API scope.
async fn api_not_found() -> AppError {
    AppError::not_found("Resource not found", json!({}))
}
