//! Domain types, validation, and admin-console configuration shared by the
//! database and API crates. Nothing in here touches the database.

pub mod admin;
pub mod error;
pub mod roles;
pub mod risk;
pub mod search;
pub mod telemetry;
pub mod types;
pub mod validation;
