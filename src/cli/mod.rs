//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `migrate` - Database migrations
//! - `users` - User administration through the user store

pub mod args;

pub use args::{Cli, Commands};
