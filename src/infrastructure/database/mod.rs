//! Database handler implementations and backend selection

mod connection;
mod factory;
mod mock;
mod sqlite;
mod update;

pub use connection::SqliteConfig;
pub use factory::{HandlerKind, HandlerRegistry};
pub use mock::{FailingDatabaseHandler, FixtureDatabaseHandler};
pub use sqlite::SqliteDatabaseHandler;
pub use update::{Column, UpdateStatement};
