//! Business logic services for the storefront.

pub mod catalog_service;
pub mod order_service;
pub mod user_service;

pub use catalog_service::CatalogService;
pub use order_service::{OrderService, RequestedLine};
pub use user_service::UserService;
