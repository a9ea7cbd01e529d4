//! Domain layer - Core entities and the storage contract

pub mod database;
pub mod error;
pub mod team;
pub mod user;
pub mod validation;

pub use database::DatabaseHandler;
pub use error::DomainError;
pub use team::{NewTeam, Team, TeamField, TeamMember, UpdateTeam};
pub use user::{NewUser, UpdateUser, User, UserField};
pub use validation::{validate_identifier, ValidationError};
