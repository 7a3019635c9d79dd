//! user-store - User persistence contract and adapters
//!
//! A narrow `UserRepository` trait (save, find, list, delete, count,
//! existence checks including `exists_by_email`) with three adapters:
//!
//! - **UserStore**: SeaORM over a pooled `DatabaseConnection`
//! - **TxUserStore**: SeaORM inside a unit-of-work transaction
//! - **MemoryUserStore**: in-process map, for tests and embedding
//!
//! # Layers
//!
//! - **cli** / **commands**: `user-store` binary
//! - **config**: environment-driven settings and constants
//! - **domain**: the `User` entity and its DTOs
//! - **infra**: database, migrations, repositories, unit of work
//! - **services**: application use cases (duplicate-email handling)
//! - **errors**: `AppError` / `AppResult`
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use user_store::{Config, Database, User, UserRepository, UserStore};
//!
//! # async fn demo() -> user_store::AppResult<()> {
//! let db = Database::connect(&Config::from_env()).await?;
//! let users = Arc::new(UserStore::new(db.get_connection()));
//!
//! let saved = users.save(User::new("Ada", "ada@example.com")).await?;
//! assert!(users.exists_by_email("ada@example.com").await?);
//! users.delete_by_id(saved.id.unwrap_or_default()).await?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use config::Config;
pub use domain::{NewUser, User, UserChanges};
pub use errors::{AppError, AppResult};
pub use infra::{
    Database, MemoryUserStore, Persistence, TxUserStore, UnitOfWork, UserRepository, UserStore,
};
pub use services::{UserManager, UserService};
