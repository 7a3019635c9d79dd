//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Database
// =============================================================================

/// Default database connection URL (for development)
pub const DEFAULT_DATABASE_URL: &str = "sqlite://./users.db?mode=rwc";

/// Default upper bound of pooled connections
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Default number of idle connections kept open
pub const DEFAULT_MIN_CONNECTIONS: u32 = 1;

/// Default connect/acquire timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 8;

/// URL prefix of SQLite in-memory databases
pub const SQLITE_MEMORY_PREFIX: &str = "sqlite::memory:";

// =============================================================================
// Schema
// =============================================================================

/// Users table name
pub const USERS_TABLE: &str = "users";

/// Name of the unique index on users.email
pub const USERS_EMAIL_INDEX: &str = "idx_users_email_unique";

/// Maximum stored length of a user email
pub const MAX_EMAIL_LENGTH: u32 = 255;

/// Maximum stored length of a user name
pub const MAX_NAME_LENGTH: u32 = 255;

/// Maximum stored length of a phone number
pub const MAX_PHONE_LENGTH: u32 = 32;
