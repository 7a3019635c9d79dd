//! Repository layer - Data access abstraction
//!
//! `UserRepository` is the persistence contract; `UserStore`, `TxUserStore`
//! and `MemoryUserStore` are its adapters.

pub mod entities;
mod memory;
mod user_repository;

pub use memory::MemoryUserStore;
pub use user_repository::{TxUserStore, UserRepository, UserStore};

// Export mock for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
