//! Integration tests for entity CRUD and the delete/uniqueness contract.
//!
//! Exercises the repository layer against a real database:
//! - Full chain creation (user -> patient -> sensor frame -> alert / comment)
//! - Cascade delete behaviour
//! - Set-null on delete of an assigned clinician
//! - Unique constraint violations (email, one profile per user)
//! - Check constraint violations (role, risk category)
//! - Update and timestamp behaviour

use assert_matches::assert_matches;
use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::json;
use sqlx::PgPool;
use telecare_db::models::alert::CreateAlert;
use telecare_db::models::clinician::CreateClinician;
use telecare_db::models::comment::CreateComment;
use telecare_db::models::patient::{CreatePatient, UpdatePatient};
use telecare_db::models::sensor_frame::CreateSensorFrame;
use telecare_db::models::user::{CreateUser, UpdateUser, User};
use telecare_db::repositories::{
    AlertRepo, ClinicianRepo, CommentRepo, PatientRepo, SensorFrameRepo, UserRepo,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_user(username: &str, role: &str) -> CreateUser {
    CreateUser {
        username: username.to_string(),
        email: format!("{username}@demo.com"),
        full_name: None,
        password_hash: "$argon2id$placeholder".to_string(),
        role: Some(role.to_string()),
    }
}

async fn create_user(pool: &PgPool, username: &str, role: &str) -> User {
    UserRepo::create(pool, &new_user(username, role)).await.unwrap()
}

fn new_patient(user_id: i64, clinician_id: Option<i64>) -> CreatePatient {
    CreatePatient {
        user_id,
        assigned_clinician_id: clinician_id,
        date_of_birth: NaiveDate::from_ymd_opt(1980, 5, 17),
        medical_notes: None,
        risk_category: None,
    }
}

fn new_frame(patient_id: i64, minute: u32) -> CreateSensorFrame {
    CreateSensorFrame {
        patient_id,
        timestamp: Utc.with_ymd_and_hms(2026, 3, 1, 8, minute, 0).unwrap(),
        data: json!({ "hr": 72, "spo2": 97 }),
    }
}

// ---------------------------------------------------------------------------
// Test: Full chain creation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_full_chain(pool: PgPool) {
    let clinician_user = create_user(&pool, "drsmith", "clinician").await;
    let clinician = ClinicianRepo::create(
        &pool,
        &CreateClinician {
            user_id: clinician_user.id,
            specialty: Some("Cardiology".to_string()),
        },
    )
    .await
    .unwrap();
    assert_eq!(clinician.specialty, "Cardiology");

    let patient_user = create_user(&pool, "jdoe", "patient").await;
    let patient = PatientRepo::create(&pool, &new_patient(patient_user.id, Some(clinician_user.id)))
        .await
        .unwrap();
    assert_eq!(patient.assigned_clinician_id, Some(clinician_user.id));
    assert_eq!(patient.date_of_birth, NaiveDate::from_ymd_opt(1980, 5, 17));

    let frame = SensorFrameRepo::create(&pool, &new_frame(patient.id, 0))
        .await
        .unwrap();
    assert_eq!(frame.data["hr"], 72);

    let alert = AlertRepo::create(
        &pool,
        &CreateAlert {
            patient_id: patient.id,
            sensor_frame_id: frame.id,
            alert_type: "tachycardia".to_string(),
            severity: "high".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(
        alert.to_string(),
        format!("Alert(patient_id={}, type=tachycardia, severity=high)", patient.id)
    );

    let comment = CommentRepo::create(
        &pool,
        &CreateComment {
            sensor_frame_id: frame.id,
            user_id: clinician_user.id,
            body: "Reviewed, within expected range.".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(comment.sensor_frame_id, frame.id);
}

// ---------------------------------------------------------------------------
// Test: User defaults and display
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_user_role_defaults_to_patient(pool: PgPool) {
    let mut input = new_user("norole", "patient");
    input.role = None;
    let user = UserRepo::create(&pool, &input).await.unwrap();

    assert_eq!(user.role, "patient");
    assert!(user.is_active);
    assert_eq!(user.to_string(), "norole@demo.com (patient)");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_by_email_ignores_case(pool: PgPool) {
    let user = create_user(&pool, "casey", "patient").await;
    let found = UserRepo::find_by_email(&pool, "CASEY@Demo.com")
        .await
        .unwrap()
        .expect("lookup should ignore case");
    assert_eq!(found.id, user.id);
}

// ---------------------------------------------------------------------------
// Test: Uniqueness
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_email_rejected(pool: PgPool) {
    create_user(&pool, "first", "patient").await;

    let mut dup = new_user("second", "patient");
    dup.email = "FIRST@demo.com".to_string();
    let err = UserRepo::create(&pool, &dup).await.unwrap_err();

    assert_matches!(&err, sqlx::Error::Database(db) if db.constraint() == Some("uq_users_email"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_second_profile_for_user_rejected(pool: PgPool) {
    let user = create_user(&pool, "twice", "clinician").await;
    let input = CreateClinician {
        user_id: user.id,
        specialty: None,
    };
    ClinicianRepo::create(&pool, &input).await.unwrap();

    let err = ClinicianRepo::create(&pool, &input).await.unwrap_err();
    assert_matches!(
        &err,
        sqlx::Error::Database(db) if db.constraint() == Some("uq_clinicians_user_id")
    );
}

// ---------------------------------------------------------------------------
// Test: Check constraints
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_role_rejected(pool: PgPool) {
    let result = UserRepo::create(&pool, &new_user("root", "superuser")).await;
    assert_matches!(
        result,
        Err(sqlx::Error::Database(db)) if db.constraint() == Some("ck_users_role")
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_risk_category_rejected(pool: PgPool) {
    let user = create_user(&pool, "risky", "patient").await;
    let mut input = new_patient(user.id, None);
    input.risk_category = Some("extreme".to_string());

    let result = PatientRepo::create(&pool, &input).await;
    assert!(result.is_err(), "risk category outside high/medium/low should fail");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_fk_violation_frame_bad_patient(pool: PgPool) {
    let result = SensorFrameRepo::create(&pool, &new_frame(999_999, 0)).await;
    assert!(result.is_err(), "FK violation should fail for non-existent patient_id");
}

// ---------------------------------------------------------------------------
// Test: Cascades
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_user_cascades_clinician_profile(pool: PgPool) {
    let user = create_user(&pool, "leaving", "clinician").await;
    let clinician = ClinicianRepo::create(
        &pool,
        &CreateClinician {
            user_id: user.id,
            specialty: Some("Neurology".to_string()),
        },
    )
    .await
    .unwrap();

    // The clinician authored a comment on another patient's frame.
    let patient_user = create_user(&pool, "staying", "patient").await;
    let patient = PatientRepo::create(&pool, &new_patient(patient_user.id, None))
        .await
        .unwrap();
    let frame = SensorFrameRepo::create(&pool, &new_frame(patient.id, 0))
        .await
        .unwrap();
    let comment = CommentRepo::create(
        &pool,
        &CreateComment {
            sensor_frame_id: frame.id,
            user_id: user.id,
            body: "Follow up next week.".to_string(),
        },
    )
    .await
    .unwrap();

    assert!(UserRepo::delete(&pool, user.id).await.unwrap());

    assert!(ClinicianRepo::find_by_id(&pool, clinician.id)
        .await
        .unwrap()
        .is_none());
    assert!(CommentRepo::find_by_id(&pool, comment.id)
        .await
        .unwrap()
        .is_none());
    // The frame belongs to the patient and survives.
    assert!(SensorFrameRepo::find_by_id(&pool, frame.id)
        .await
        .unwrap()
        .is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_assigned_clinician_sets_null(pool: PgPool) {
    let clinician_user = create_user(&pool, "drgone", "clinician").await;
    let patient_user = create_user(&pool, "stays", "patient").await;
    let patient = PatientRepo::create(&pool, &new_patient(patient_user.id, Some(clinician_user.id)))
        .await
        .unwrap();

    UserRepo::delete(&pool, clinician_user.id).await.unwrap();

    let patient = PatientRepo::find_by_id(&pool, patient.id)
        .await
        .unwrap()
        .expect("patient must survive clinician deletion");
    assert_eq!(patient.assigned_clinician_id, None);
    assert_eq!(patient.user_id, patient_user.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_patient_cascades_telemetry(pool: PgPool) {
    let clinician_user = create_user(&pool, "drkeep", "clinician").await;
    let patient_user = create_user(&pool, "cascade", "patient").await;
    let patient = PatientRepo::create(&pool, &new_patient(patient_user.id, None))
        .await
        .unwrap();
    let frame = SensorFrameRepo::create(&pool, &new_frame(patient.id, 5))
        .await
        .unwrap();
    let alert = AlertRepo::create(
        &pool,
        &CreateAlert {
            patient_id: patient.id,
            sensor_frame_id: frame.id,
            alert_type: "low_spo2".to_string(),
            severity: "medium".to_string(),
        },
    )
    .await
    .unwrap();
    let comment = CommentRepo::create(
        &pool,
        &CreateComment {
            sensor_frame_id: frame.id,
            user_id: clinician_user.id,
            body: "Follow up tomorrow.".to_string(),
        },
    )
    .await
    .unwrap();

    assert!(PatientRepo::delete(&pool, patient.id).await.unwrap());

    assert!(SensorFrameRepo::find_by_id(&pool, frame.id).await.unwrap().is_none());
    assert!(AlertRepo::find_by_id(&pool, alert.id).await.unwrap().is_none());
    assert!(CommentRepo::find_by_id(&pool, comment.id).await.unwrap().is_none());

    // The patient's user and the commenting clinician are untouched.
    assert!(UserRepo::find_by_id(&pool, patient_user.id).await.unwrap().is_some());
    assert!(UserRepo::find_by_id(&pool, clinician_user.id).await.unwrap().is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_patient_user_cascades_through_profile(pool: PgPool) {
    let patient_user = create_user(&pool, "wholechain", "patient").await;
    let patient = PatientRepo::create(&pool, &new_patient(patient_user.id, None))
        .await
        .unwrap();
    let frame = SensorFrameRepo::create(&pool, &new_frame(patient.id, 10))
        .await
        .unwrap();

    UserRepo::delete(&pool, patient_user.id).await.unwrap();

    assert!(PatientRepo::find_by_id(&pool, patient.id).await.unwrap().is_none());
    assert!(SensorFrameRepo::find_by_id(&pool, frame.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_frame_cascades_alerts_and_comments(pool: PgPool) {
    let patient_user = create_user(&pool, "framer", "patient").await;
    let patient = PatientRepo::create(&pool, &new_patient(patient_user.id, None))
        .await
        .unwrap();
    let keep = SensorFrameRepo::create(&pool, &new_frame(patient.id, 1))
        .await
        .unwrap();
    let doomed = SensorFrameRepo::create(&pool, &new_frame(patient.id, 2))
        .await
        .unwrap();
    for frame_id in [keep.id, doomed.id] {
        AlertRepo::create(
            &pool,
            &CreateAlert {
                patient_id: patient.id,
                sensor_frame_id: frame_id,
                alert_type: "fall".to_string(),
                severity: "high".to_string(),
            },
        )
        .await
        .unwrap();
        CommentRepo::create(
            &pool,
            &CreateComment {
                sensor_frame_id: frame_id,
                user_id: patient_user.id,
                body: "I felt dizzy".to_string(),
            },
        )
        .await
        .unwrap();
    }

    SensorFrameRepo::delete(&pool, doomed.id).await.unwrap();

    let alerts = AlertRepo::list_by_patient(&pool, patient.id).await.unwrap();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].sensor_frame_id, keep.id);
    assert!(CommentRepo::list_by_sensor_frame(&pool, doomed.id)
        .await
        .unwrap()
        .is_empty());
    assert_eq!(
        CommentRepo::list_by_sensor_frame(&pool, keep.id)
            .await
            .unwrap()
            .len(),
        1
    );
}

// ---------------------------------------------------------------------------
// Test: Updates
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_user_bumps_updated_at(pool: PgPool) {
    let user = create_user(&pool, "updater", "patient").await;
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    let updated = UserRepo::update(
        &pool,
        user.id,
        &UpdateUser {
            full_name: Some(Some("Up Dater".to_string())),
            role: Some("clinician".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .expect("update should return the row");

    assert_eq!(updated.full_name.as_deref(), Some("Up Dater"));
    assert_eq!(updated.role, "clinician");
    assert_eq!(updated.email, user.email);
    assert_eq!(updated.created_at, user.created_at);
    assert!(updated.updated_at > user.updated_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_nonexistent_returns_none(pool: PgPool) {
    let result = UserRepo::update(&pool, 999_999, &UpdateUser::default())
        .await
        .unwrap();
    assert!(result.is_none(), "Updating non-existent ID should return None");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_nonexistent_returns_false(pool: PgPool) {
    assert!(!UserRepo::delete(&pool, 999_999).await.unwrap());
    assert!(!PatientRepo::delete(&pool, 999_999).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_assign_and_unassign_clinician(pool: PgPool) {
    let clinician_user = create_user(&pool, "drassign", "clinician").await;
    let patient_user = create_user(&pool, "assignee", "patient").await;
    let patient = PatientRepo::create(&pool, &new_patient(patient_user.id, None))
        .await
        .unwrap();

    let assigned = PatientRepo::set_assigned_clinician(&pool, patient.id, Some(clinician_user.id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(assigned.assigned_clinician_id, Some(clinician_user.id));
    assert_eq!(
        PatientRepo::list_by_clinician(&pool, clinician_user.id)
            .await
            .unwrap()
            .len(),
        1
    );

    let updated = PatientRepo::update(
        &pool,
        patient.id,
        &UpdatePatient {
            risk_category: Some(Some("low".to_string())),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    // A profile update leaves the assignment alone.
    assert_eq!(updated.assigned_clinician_id, Some(clinician_user.id));
    assert_eq!(updated.risk_category.as_deref(), Some("low"));

    let cleared = PatientRepo::set_assigned_clinician(&pool, patient.id, None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cleared.assigned_clinician_id, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_frames_listed_newest_first(pool: PgPool) {
    let patient_user = create_user(&pool, "ordered", "patient").await;
    let patient = PatientRepo::create(&pool, &new_patient(patient_user.id, None))
        .await
        .unwrap();
    for minute in [30, 10, 20] {
        SensorFrameRepo::create(&pool, &new_frame(patient.id, minute))
            .await
            .unwrap();
    }

    let frames = SensorFrameRepo::list_by_patient(&pool, patient.id, 10, 0)
        .await
        .unwrap();
    let minutes: Vec<_> = frames
        .iter()
        .map(|f| f.timestamp.format("%M").to_string())
        .collect();
    assert_eq!(minutes, ["30", "20", "10"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_set_role_and_deactivate(pool: PgPool) {
    let user = create_user(&pool, "promoted", "patient").await;

    assert!(UserRepo::set_role(&pool, user.id, "clinician").await.unwrap());
    assert!(UserRepo::deactivate(&pool, user.id).await.unwrap());

    let reloaded = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(reloaded.role, "clinician");
    assert!(!reloaded.is_active);

    let active_clinicians = UserRepo::list_by_role(&pool, "clinician").await.unwrap();
    assert!(active_clinicians.is_empty());

    assert!(!UserRepo::deactivate(&pool, 999_999).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_profile_lookup_by_user(pool: PgPool) {
    let doc = create_user(&pool, "lookup_doc", "clinician").await;
    let pat = create_user(&pool, "lookup_pat", "patient").await;

    let clinician = ClinicianRepo::find_by_user(&pool, doc.id).await.unwrap();
    assert!(clinician.is_none());
    ClinicianRepo::create(
        &pool,
        &CreateClinician {
            user_id: doc.id,
            specialty: None,
        },
    )
    .await
    .unwrap();
    let clinician = ClinicianRepo::find_by_user(&pool, doc.id).await.unwrap().unwrap();
    assert_eq!(clinician.specialty, "");

    let patient = PatientRepo::create(&pool, &new_patient(pat.id, Some(doc.id)))
        .await
        .unwrap();
    let found = PatientRepo::find_by_user(&pool, pat.id).await.unwrap().unwrap();
    assert_eq!(found.id, patient.id);
    assert!(PatientRepo::find_by_user(&pool, doc.id).await.unwrap().is_none());

    let by_name = UserRepo::find_by_username(&pool, "lookup_pat").await.unwrap().unwrap();
    assert_eq!(by_name.id, pat.id);
    assert!(UserRepo::find_by_username(&pool, "LOOKUP_PAT").await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_clears_nullable_fields(pool: PgPool) {
    let user = create_user(&pool, "clearable", "patient").await;
    let patient = PatientRepo::create(
        &pool,
        &CreatePatient {
            medical_notes: Some("Asthma".to_string()),
            risk_category: Some("high".to_string()),
            ..new_patient(user.id, None)
        },
    )
    .await
    .unwrap();

    // Absent fields keep their value.
    let updated = PatientRepo::update(
        &pool,
        patient.id,
        &UpdatePatient {
            medical_notes: Some(Some("Asthma, mild".to_string())),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.risk_category.as_deref(), Some("high"));
    assert!(updated.date_of_birth.is_some());

    let cleared = PatientRepo::update(
        &pool,
        patient.id,
        &UpdatePatient {
            date_of_birth: Some(None),
            risk_category: Some(None),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert!(cleared.date_of_birth.is_none());
    assert!(cleared.risk_category.is_none());
    assert_eq!(cleared.medical_notes.as_deref(), Some("Asthma, mild"));

    UserRepo::update(
        &pool,
        user.id,
        &UpdateUser {
            full_name: Some(Some("Clara Able".to_string())),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    let user = UserRepo::update(
        &pool,
        user.id,
        &UpdateUser {
            full_name: Some(None),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert!(user.full_name.is_none());
}
