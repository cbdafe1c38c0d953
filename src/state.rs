//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{CatalogService, OrderService, UserService};

/// Cheap-to-clone bundle of application services.
#[derive(Clone)]
pub struct AppState {
    pub catalog_service: Arc<CatalogService>,
    pub order_service: Arc<OrderService>,
    pub user_service: Arc<UserService>,
}

impl AppState {
    pub fn new(
        catalog_service: Arc<CatalogService>,
        order_service: Arc<OrderService>,
        user_service: Arc<UserService>,
    ) -> Self {
        Self {
            catalog_service,
            order_service,
            user_service,
        }
    }
}
