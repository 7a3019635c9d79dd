//! Commands module - CLI command implementations.

use serde::Serialize;

use crate::errors::{AppError, AppResult};

pub mod migrate;
pub mod users;

/// Print a command result as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> AppResult<()> {
    let out = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::internal(format!("Failed to serialize output: {}", e)))?;
    println!("{}", out);
    Ok(())
}
