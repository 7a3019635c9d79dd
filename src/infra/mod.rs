//! Infrastructure layer - Backing store integration
//!
//! - Database connection and migrations
//! - User repository adapters (SeaORM, transaction-scoped, in-memory)
//! - Unit of Work for transaction management

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{MemoryUserStore, TxUserStore, UserRepository, UserStore};
pub use unit_of_work::{Persistence, TransactionContext, TxFuture, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::MockUserRepository;
