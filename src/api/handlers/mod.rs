//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod orders;
pub mod products;
pub mod users;

pub use health::health_handler;
pub use orders::{
    create_order_handler, get_order_handler, list_orders_handler, update_order_status_handler,
};
pub use products::{
    create_product_handler, delete_product_handler, get_product_handler, list_products_handler,
    update_product_handler,
};
pub use users::{
    create_user_handler, delete_user_handler, get_user_handler, list_users_handler,
    update_user_handler,
};
