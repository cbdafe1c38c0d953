//! PostgreSQL repository implementations.
//!
//! Queries use the runtime `query_as` API with private row structs, so
//! the domain entities stay free of persistence derives.

pub mod pg_order_repository;
pub mod pg_product_repository;
pub mod pg_user_repository;

pub use pg_order_repository::PgOrderRepository;
pub use pg_product_repository::PgProductRepository;
pub use pg_user_repository::PgUserRepository;
