//! PostgreSQL persistence adapters built on Diesel.

pub mod diesel_project_store;
pub mod diesel_user_store;
pub(crate) mod models;
pub mod pool;
pub(crate) mod schema;

pub use diesel_project_store::DieselProjectStore;
pub use diesel_user_store::DieselUserStore;
pub use pool::{DbPool, PoolConfig, PoolError};
