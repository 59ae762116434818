//! Route definitions for the `/admin` console.
//!
//! The admin role is enforced by the handlers' [`RequireAdmin`] extractor.
//!
//! [`RequireAdmin`]: crate::middleware::rbac::RequireAdmin

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{alerts, clinicians, comments, patients, registry, sensor_frames, users};
use crate::state::AppState;

/// Routes mounted at `/admin`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/registry", get(registry::get_registry))
        // Users
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/users/{id}/reset-password", post(users::reset_password))
        // Clinicians
        .route(
            "/clinicians",
            get(clinicians::list_clinicians).post(clinicians::create_clinician),
        )
        .route(
            "/clinicians/{id}",
            get(clinicians::get_clinician)
                .put(clinicians::update_clinician)
                .delete(clinicians::delete_clinician),
        )
        // Patients
        .route(
            "/patients",
            get(patients::list_patients).post(patients::create_patient),
        )
        .route(
            "/patients/clinician-choices",
            get(patients::clinician_choices),
        )
        .route(
            "/patients/{id}",
            get(patients::get_patient)
                .put(patients::update_patient)
                .delete(patients::delete_patient),
        )
        // Telemetry
        .route(
            "/sensor-frames",
            get(sensor_frames::list_sensor_frames).post(sensor_frames::create_sensor_frame),
        )
        .route(
            "/sensor-frames/{id}",
            get(sensor_frames::get_sensor_frame)
                .put(sensor_frames::update_sensor_frame)
                .delete(sensor_frames::delete_sensor_frame),
        )
        // Alerts
        .route("/alerts", get(alerts::list_alerts).post(alerts::create_alert))
        .route(
            "/alerts/{id}",
            get(alerts::get_alert).delete(alerts::delete_alert),
        )
        // Comments
        .route(
            "/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route(
            "/comments/{id}",
            get(comments::get_comment).delete(comments::delete_comment),
        )
}
