//! Infrastructure layer - Storage backends, hashing and logging

pub mod database;
pub mod logging;
pub mod password;
