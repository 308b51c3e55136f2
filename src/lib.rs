pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod infrastructure;
pub mod schema;

use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use crate::application::boleto::BoletoService;
use crate::application::customer_service::CustomerService;
use crate::application::notification::LogNotifier;
use crate::application::order_service::OrderService;
use crate::application::product_service::ProductService;
use crate::config::Config;
use crate::errors::StartupError;
use crate::infrastructure::customer_repo::DieselCustomerRepository;
use crate::infrastructure::order_repo::DieselOrderRepository;
use crate::infrastructure::product_repo::DieselProductRepository;

pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub type PgOrderService = OrderService<
    DieselOrderRepository,
    DieselCustomerRepository,
    DieselProductRepository,
    LogNotifier,
>;

/// Run any pending Diesel migrations against the pool's database and return
/// how many were applied.
pub fn run_migrations(pool: &DbPool) -> Result<usize, StartupError> {
    let mut conn = pool.get()?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| StartupError::Migration(e.to_string()))?;
    Ok(applied.len())
}

/// Wire the customer and order services against PostgreSQL.
pub fn build_services(
    pool: &DbPool,
    config: &Config,
) -> (CustomerService<DieselCustomerRepository>, PgOrderService) {
    let customers = CustomerService::new(DieselCustomerRepository::new(pool.clone()));
    let orders = OrderService::new(
        DieselOrderRepository::new(pool.clone()),
        CustomerService::new(DieselCustomerRepository::new(pool.clone())),
        ProductService::new(DieselProductRepository::new(pool.clone())),
        BoletoService::new(config.boleto_due_days),
        LogNotifier,
    );
    (customers, orders)
}
