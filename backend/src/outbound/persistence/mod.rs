//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Implements the domain's counter repository port on top of `diesel-async`
//! with `bb8` connection pooling.
//!
//! - **Thin adapters**: repository code only translates between Diesel rows
//!   and domain types.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: pool and Diesel failures are mapped onto
//!   [`crate::domain::ports::CounterRepositoryError`].
//!
//! # Example
//!
//! ```rust,no_run
//! use backend::outbound::persistence::{DbPool, DieselCounterRepository, PoolConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/atelier_db")).await?;
//! let repository = DieselCounterRepository::new(pool);
//! # let _ = repository;
//! # Ok(())
//! # }
//! ```

mod diesel_counter_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_counter_repository::DieselCounterRepository;
pub use migrations::{MIGRATIONS, MigrationError, apply_migrations, run_pending_migrations};
pub use pool::{DEFAULT_MAX_SIZE, DbPool, PoolConfig, PoolError};
