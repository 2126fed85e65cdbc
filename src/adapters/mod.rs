//! External integrations

pub mod query;
