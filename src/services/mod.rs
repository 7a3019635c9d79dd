//! Application services layer - Use cases on top of the user store.
//!
//! Services depend on the `UnitOfWork` abstraction, never on a concrete
//! database handle.

mod user_service;

pub use user_service::{UserManager, UserService};
