//! SeaORM entity definitions
//!
//! Database rows, kept separate from the domain `User`.

pub mod user;

pub use user::{ActiveModel as UserActiveModel, Entity as UserEntity, Model as UserModel};
