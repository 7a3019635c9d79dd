//! Domain layer - Core business entities
//!
//! Plain data types with no infrastructure dependencies beyond serde.

pub mod user;

pub use user::{NewUser, User, UserChanges};
