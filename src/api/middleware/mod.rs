//! API middleware components

pub mod backend;
pub mod logging;

pub use backend::Backend;
pub use logging::logging_middleware;
