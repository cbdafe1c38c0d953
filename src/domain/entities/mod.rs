//! Core entities of the storefront data model.

pub mod order;
pub mod product;
pub mod user;

pub use order::{NewOrder, Order, OrderItem, OrderStatus};
pub use product::{NewProduct, Product, ProductPatch};
pub use user::{NewUser, User, UserPatch};
