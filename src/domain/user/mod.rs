//! User domain
//!
//! Users are identified by a caller-chosen id. Their password is accepted in
//! plaintext on the way in and only ever stored as a one-way hash.

mod entity;

pub use entity::{NewUser, UpdateUser, User, UserField};
