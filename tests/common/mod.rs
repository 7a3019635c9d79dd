//! Shared helpers for integration tests.

#![allow(dead_code)]

use user_store::{Config, Database, User};

/// Fresh in-memory SQLite database with migrations applied.
pub async fn memory_db() -> Database {
    Database::connect(&Config::in_memory())
        .await
        .expect("in-memory database should start")
}

pub fn user(name: &str, email: &str) -> User {
    User::new(name, email)
}
