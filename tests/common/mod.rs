#![allow(dead_code)]

//! Shared test harness: an in-memory store standing in for PostgreSQL,
//! plus factories for application state and the full router.

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use chrono::Utc;
use serde_json::json;

use storefront::application::services::{CatalogService, OrderService, UserService};
use storefront::config::Config;
use storefront::domain::entities::{
    NewOrder, NewProduct, NewUser, Order, OrderStatus, Product, ProductPatch, User, UserPatch,
};
use storefront::domain::repositories::{OrderRepository, ProductRepository, UserRepository};
use storefront::error::AppError;
use storefront::routes::app_router;
use storefront::state::AppState;

/// Backing store shared by the in-memory repositories.
///
/// `fail_all` flips every repository call into an internal error, which
/// lets tests observe the uniform failure mapping end to end.
#[derive(Default)]
pub struct TestStore {
    products: Mutex<Vec<Product>>,
    orders: Mutex<Vec<Order>>,
    users: Mutex<Vec<User>>,
    next_product_id: AtomicI64,
    next_order_id: AtomicI64,
    next_user_id: AtomicI64,
    fail_all: AtomicBool,
}

impl TestStore {
    pub fn fail_all(&self) {
        self.fail_all.store(true, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), AppError> {
        if self.fail_all.load(Ordering::SeqCst) {
            return Err(AppError::internal("simulated storage failure"));
        }
        Ok(())
    }

    pub fn seed_product(&self, sku: &str, name: &str, price_cents: i64, stock: i32) -> Product {
        let id = self.next_product_id.fetch_add(1, Ordering::SeqCst) + 1;
        let product = Product {
            id,
            sku: sku.to_string(),
            name: name.to_string(),
            description: None,
            price_cents,
            stock_quantity: stock,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.products.lock().unwrap().push(product.clone());
        product
    }

    pub fn seed_user(&self, email: &str, name: &str) -> User {
        let id = self.next_user_id.fetch_add(1, Ordering::SeqCst) + 1;
        let user = User {
            id,
            email: email.to_string(),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        self.users.lock().unwrap().push(user.clone());
        user
    }

    pub fn product_stock(&self, id: i64) -> Option<i32> {
        self.products
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.stock_quantity)
    }
}

pub struct InMemoryProductRepository {
    store: Arc<TestStore>,
}

impl InMemoryProductRepository {
    pub fn new(store: Arc<TestStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, new_product: NewProduct) -> Result<Product, AppError> {
        self.store.check_available()?;
        let mut products = self.store.products.lock().unwrap();

        if products.iter().any(|p| p.sku == new_product.sku) {
            return Err(AppError::conflict(
                "A product with this SKU already exists",
                json!({ "sku": new_product.sku }),
            ));
        }

        let id = self.store.next_product_id.fetch_add(1, Ordering::SeqCst) + 1;
        let product = Product {
            id,
            sku: new_product.sku,
            name: new_product.name,
            description: new_product.description,
            price_cents: new_product.price_cents,
            stock_quantity: new_product.stock_quantity,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        products.push(product.clone());
        Ok(product)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, AppError> {
        self.store.check_available()?;
        let products = self.store.products.lock().unwrap();
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Product>, AppError> {
        self.store.check_available()?;
        let products = self.store.products.lock().unwrap();
        Ok(products
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        self.store.check_available()?;
        Ok(self.store.products.lock().unwrap().len() as i64)
    }

    async fn update(&self, id: i64, patch: ProductPatch) -> Result<Product, AppError> {
        self.store.check_available()?;
        let mut products = self.store.products.lock().unwrap();

        let Some(product) = products.iter_mut().find(|p| p.id == id) else {
            return Err(AppError::not_found("Product not found", json!({ "id": id })));
        };

        if let Some(name) = patch.name {
            product.name = name;
        }
        if let Some(description) = patch.description {
            product.description = description;
        }
        if let Some(price_cents) = patch.price_cents {
            product.price_cents = price_cents;
        }
        if let Some(stock_quantity) = patch.stock_quantity {
            product.stock_quantity = stock_quantity;
        }
        product.updated_at = Utc::now();

        Ok(product.clone())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        self.store.check_available()?;

        let referenced = self
            .store
            .orders
            .lock()
            .unwrap()
            .iter()
            .any(|o| o.items.iter().any(|i| i.product_id == id));
        if referenced {
            return Err(AppError::conflict(
                "Product is referenced by existing orders",
                json!({ "id": id }),
            ));
        }

        let mut products = self.store.products.lock().unwrap();
        let before = products.len();
        products.retain(|p| p.id != id);
        Ok(products.len() < before)
    }
}

pub struct InMemoryOrderRepository {
    store: Arc<TestStore>,
}

impl InMemoryOrderRepository {
    pub fn new(store: Arc<TestStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create(&self, new_order: NewOrder) -> Result<Order, AppError> {
        self.store.check_available()?;
        let mut products = self.store.products.lock().unwrap();

        // Verify every line first, then decrement, mirroring the
        // all-or-nothing transaction of the Postgres implementation.
        for item in &new_order.items {
            let available = products
                .iter()
                .find(|p| p.id == item.product_id)
                .map_or(0, |p| p.stock_quantity);
            if available < item.quantity {
                return Err(AppError::conflict(
                    "Insufficient stock for product",
                    json!({ "product_id": item.product_id, "requested": item.quantity }),
                ));
            }
        }

        for item in &new_order.items {
            if let Some(product) = products.iter_mut().find(|p| p.id == item.product_id) {
                product.stock_quantity -= item.quantity;
                product.updated_at = Utc::now();
            }
        }
        drop(products);

        let id = self.store.next_order_id.fetch_add(1, Ordering::SeqCst) + 1;
        let order = Order {
            id,
            user_id: new_order.user_id,
            status: OrderStatus::Pending,
            total_cents: new_order.total_cents,
            created_at: Utc::now(),
            items: new_order.items,
        };
        self.store.orders.lock().unwrap().push(order.clone());
        Ok(order)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Order>, AppError> {
        self.store.check_available()?;
        let orders = self.store.orders.lock().unwrap();
        Ok(orders.iter().find(|o| o.id == id).cloned())
    }

    async fn list(
        &self,
        user_id: Option<i64>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Order>, AppError> {
        self.store.check_available()?;
        let orders = self.store.orders.lock().unwrap();
        Ok(orders
            .iter()
            .rev()
            .filter(|o| user_id.is_none_or(|uid| o.user_id == uid))
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count(&self, user_id: Option<i64>) -> Result<i64, AppError> {
        self.store.check_available()?;
        let orders = self.store.orders.lock().unwrap();
        Ok(orders
            .iter()
            .filter(|o| user_id.is_none_or(|uid| o.user_id == uid))
            .count() as i64)
    }

    async fn update_status(&self, id: i64, status: OrderStatus) -> Result<Order, AppError> {
        self.store.check_available()?;
        let mut orders = self.store.orders.lock().unwrap();

        let Some(order) = orders.iter_mut().find(|o| o.id == id) else {
            return Err(AppError::not_found("Order not found", json!({ "id": id })));
        };

        order.status = status;
        Ok(order.clone())
    }
}

pub struct InMemoryUserRepository {
    store: Arc<TestStore>,
}

impl InMemoryUserRepository {
    pub fn new(store: Arc<TestStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        self.store.check_available()?;
        let mut users = self.store.users.lock().unwrap();

        if users.iter().any(|u| u.email == new_user.email) {
            return Err(AppError::conflict(
                "A user with this email already exists",
                json!({ "email": new_user.email }),
            ));
        }

        let id = self.store.next_user_id.fetch_add(1, Ordering::SeqCst) + 1;
        let user = User {
            id,
            email: new_user.email,
            name: new_user.name,
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        self.store.check_available()?;
        let users = self.store.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.store.check_available()?;
        let users = self.store.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<User>, AppError> {
        self.store.check_available()?;
        let users = self.store.users.lock().unwrap();
        Ok(users
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        self.store.check_available()?;
        Ok(self.store.users.lock().unwrap().len() as i64)
    }

    async fn update(&self, id: i64, patch: UserPatch) -> Result<User, AppError> {
        self.store.check_available()?;
        let mut users = self.store.users.lock().unwrap();

        if let Some(email) = &patch.email
            && users.iter().any(|u| u.id != id && &u.email == email)
        {
            return Err(AppError::conflict(
                "A user with this email already exists",
                json!({ "email": email }),
            ));
        }

        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Err(AppError::not_found("User not found", json!({ "id": id })));
        };

        if let Some(email) = patch.email {
            user.email = email;
        }
        if let Some(name) = patch.name {
            user.name = name;
        }

        Ok(user.clone())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        self.store.check_available()?;
        let mut users = self.store.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() < before)
    }
}

/// Builds application state backed by a fresh in-memory store.
pub fn create_test_state() -> (AppState, Arc<TestStore>) {
    let store = Arc::new(TestStore::default());

    let product_repo = Arc::new(InMemoryProductRepository::new(store.clone()));
    let order_repo = Arc::new(InMemoryOrderRepository::new(store.clone()));
    let user_repo = Arc::new(InMemoryUserRepository::new(store.clone()));

    let catalog_service = Arc::new(CatalogService::new(product_repo.clone()));
    let order_service = Arc::new(OrderService::new(
        order_repo,
        product_repo,
        user_repo.clone(),
    ));
    let user_service = Arc::new(UserService::new(user_repo));

    let state = AppState::new(catalog_service, order_service, user_service);
    (state, store)
}

/// Configuration pointing the static host at the checked-in fixture bundle.
pub fn test_config() -> Config {
    Config {
        database_url: "postgres://localhost/storefront-test".to_string(),
        listen_addr: "127.0.0.1:0".to_string(),
        log_level: "info".to_string(),
        log_format: "text".to_string(),
        static_dir: "tests/fixtures/dist".to_string(),
        cors_allowed_origins: vec!["*".to_string()],
        db_max_connections: 5,
        db_connect_timeout: 5,
        db_idle_timeout: 60,
        db_max_lifetime: 300,
    }
}

/// Full application router over the given state.
pub fn test_app(state: AppState) -> Router {
    app_router(state, &test_config())
}
