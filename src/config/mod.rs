//! Configuration: database settings read from the environment,
//! plus schema and connection constants.

mod constants;
mod settings;

pub use constants::*;
pub use settings::Config;
