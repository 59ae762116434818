//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod alert_repo;
pub mod clinician_repo;
pub mod comment_repo;
pub mod patient_repo;
pub mod sensor_frame_repo;
pub mod session_repo;
pub mod user_repo;

pub use alert_repo::AlertRepo;
pub use clinician_repo::ClinicianRepo;
pub use comment_repo::CommentRepo;
pub use patient_repo::PatientRepo;
pub use sensor_frame_repo::SensorFrameRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
