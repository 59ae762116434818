//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `FromRow` admin list row joined with the display names the console shows
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod alert;
pub mod clinician;
pub mod comment;
pub mod list;
pub mod patient;
pub mod sensor_frame;
pub mod session;
pub mod user;
