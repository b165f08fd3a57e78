use std::sync::Arc;

use homevisit::capture::{CameraSource, FileCamera, LocationSource, StaticLocation};
use homevisit::config::ClientOptions;
use homevisit::error::Error;
use homevisit::store::MemoryPreferences;
use homevisit::types::{LatLng, VisitStatus, Vitals};
use homevisit::HomeVisit;

const PATIENT_HOME: LatLng = LatLng {
    latitude: 34.0522,
    longitude: -118.2437,
};

fn selfie(label: &str) -> String {
    format!("data:image/jpeg;base64,{}", label)
}

fn vitals() -> Vitals {
    Vitals {
        blood_pressure: "120/80".to_string(),
        blood_sugar: "95".to_string(),
        heart_rate: "72".to_string(),
        oxygen_saturation: "98".to_string(),
        notes: "Stable".to_string(),
    }
}

async fn seeded_client() -> HomeVisit {
    let options = ClientOptions::default().with_seed_demo_data(true);
    let client = HomeVisit::new_with_options(Arc::new(MemoryPreferences::new()), options);
    client.initialize().await.unwrap();
    client
}

#[tokio::test]
async fn starting_a_visit_creates_a_pending_record_dated_today() {
    let client = seeded_client().await;

    let visit = client.visits().start_visit("patient-2").await.unwrap();

    assert_eq!(visit.status, VisitStatus::Pending);
    assert_eq!(visit.patient_id, "patient-2");
    assert!(visit.start_time.is_none());
    let stored = client.store().visit(&visit.id).await.unwrap().unwrap();
    assert_eq!(stored.visit_date, visit.visit_date);
}

#[tokio::test]
async fn starting_a_visit_resumes_an_active_one() {
    let client = seeded_client().await;
    let visits = client.visits();

    let first = visits.start_visit("patient-2").await.unwrap();
    let second = visits.start_visit("patient-2").await.unwrap();

    assert_eq!(first.id, second.id);
}

#[tokio::test]
async fn starting_a_visit_for_an_unknown_patient_fails() {
    let client = seeded_client().await;

    let err = client.visits().start_visit("patient-404").await.unwrap_err();
    assert!(matches!(err, Error::Visit(_)));
}

#[tokio::test]
async fn check_in_requires_both_artifacts() {
    let client = seeded_client().await;
    let visits = client.visits();
    let visit = visits.start_visit("patient-1").await.unwrap();

    // Nothing captured yet.
    let err = visits.complete_check_in(&visit.id).await.unwrap_err();
    assert!(matches!(err, Error::Visit(_)));

    // Location alone is not enough.
    visits.capture_in_location(&visit.id, PATIENT_HOME).await.unwrap();
    let err = visits.complete_check_in(&visit.id).await.unwrap_err();
    assert!(matches!(err, Error::Visit(_)));

    // Selfie alone would not be either; with both, check-in succeeds.
    visits.capture_in_selfie(&visit.id, selfie("in")).await.unwrap();
    let checked_in = visits.complete_check_in(&visit.id).await.unwrap();
    assert_eq!(checked_in.status, VisitStatus::In);
    assert!(checked_in.start_time.is_some());
}

#[tokio::test]
async fn full_lifecycle_reaches_completed() {
    let client = seeded_client().await;
    let visits = client.visits();
    let visit = visits.start_visit("patient-1").await.unwrap();

    visits.capture_in_location(&visit.id, PATIENT_HOME).await.unwrap();
    visits.capture_in_selfie(&visit.id, selfie("in")).await.unwrap();
    visits.complete_check_in(&visit.id).await.unwrap();

    visits.record_vitals(&visit.id, vitals()).await.unwrap();
    visits
        .record_prescription(&visit.id, Some("Amoxicillin 500mg".to_string()), None)
        .await
        .unwrap();
    visits.record_report(&visit.id, "Patient recovering well").await.unwrap();

    visits.capture_out_location(&visit.id, PATIENT_HOME).await.unwrap();
    visits.capture_out_selfie(&visit.id, selfie("out")).await.unwrap();
    let done = visits.complete_check_out(&visit.id).await.unwrap();

    assert_eq!(done.status, VisitStatus::Completed);
    assert!(done.end_time.is_some());
    assert_eq!(done.vitals.unwrap(), vitals());
    assert_eq!(done.prescription.as_deref(), Some("Amoxicillin 500mg"));
    assert_eq!(done.report_details.as_deref(), Some("Patient recovering well"));
}

#[tokio::test]
async fn check_out_requires_check_in_first() {
    let client = seeded_client().await;
    let visits = client.visits();
    let visit = visits.start_visit("patient-1").await.unwrap();

    let err = visits
        .capture_out_location(&visit.id, PATIENT_HOME)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Visit(_)));

    let err = visits.complete_check_out(&visit.id).await.unwrap_err();
    assert!(matches!(err, Error::Visit(_)));
}

#[tokio::test]
async fn check_out_requires_both_out_artifacts() {
    let client = seeded_client().await;
    let visits = client.visits();
    let visit = visits.start_visit("patient-1").await.unwrap();

    visits.capture_in_location(&visit.id, PATIENT_HOME).await.unwrap();
    visits.capture_in_selfie(&visit.id, selfie("in")).await.unwrap();
    visits.complete_check_in(&visit.id).await.unwrap();

    visits.capture_out_location(&visit.id, PATIENT_HOME).await.unwrap();
    let err = visits.complete_check_out(&visit.id).await.unwrap_err();
    assert!(matches!(err, Error::Visit(_)));
}

#[tokio::test]
async fn completed_visits_reject_all_mutations() {
    let client = seeded_client().await;
    let visits = client.visits();
    let visit = visits.start_visit("patient-1").await.unwrap();

    visits.capture_in_location(&visit.id, PATIENT_HOME).await.unwrap();
    visits.capture_in_selfie(&visit.id, selfie("in")).await.unwrap();
    visits.complete_check_in(&visit.id).await.unwrap();
    visits.capture_out_location(&visit.id, PATIENT_HOME).await.unwrap();
    visits.capture_out_selfie(&visit.id, selfie("out")).await.unwrap();
    visits.complete_check_out(&visit.id).await.unwrap();

    let err = visits.record_vitals(&visit.id, vitals()).await.unwrap_err();
    assert!(matches!(err, Error::Visit(_)));
    let err = visits
        .capture_in_location(&visit.id, PATIENT_HOME)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Visit(_)));
    let err = visits.complete_check_out(&visit.id).await.unwrap_err();
    assert!(matches!(err, Error::Visit(_)));
}

#[tokio::test]
async fn derived_status_recovers_an_interrupted_check_in() {
    let client = seeded_client().await;
    let visits = client.visits();
    let visit = visits.start_visit("patient-1").await.unwrap();

    visits.capture_in_location(&visit.id, PATIENT_HOME).await.unwrap();
    let captured = visits.capture_in_selfie(&visit.id, selfie("in")).await.unwrap();

    // Both artifacts persisted but the status write never happened: the
    // stored status is stale, the derived status is not.
    assert_eq!(captured.status, VisitStatus::Pending);
    assert_eq!(captured.derived_status(), VisitStatus::In);
}

#[tokio::test]
async fn todays_visits_follow_the_assignment() {
    let client = seeded_client().await;

    // Demo data assigns both patients to user-2 with one pending visit today.
    let today = client.visits().today_visits_for("user-2").await.unwrap();
    assert_eq!(today.len(), 1);
    assert_eq!(today[0].patient_id, "patient-1");

    let none = client.visits().today_visits_for("user-404").await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn client_visits_match_patients_by_name() {
    let client = seeded_client().await;
    let user = homevisit::types::User {
        id: "u-9".to_string(),
        name: "John Doe".to_string(),
        role: homevisit::types::UserRole::Client,
        email: None,
        phone: None,
        status: None,
        password: None,
    };

    let visible = client.visits().visits_for_client(&user).await.unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].patient_id, "patient-1");
}

#[tokio::test]
async fn capture_sources_feed_the_lifecycle() {
    let client = seeded_client().await;
    let visits = client.visits();
    let visit = visits.start_visit("patient-1").await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let image_path = dir.path().join("selfie.jpg");
    std::fs::write(&image_path, b"jpeg bytes").unwrap();

    let camera = FileCamera::new(&image_path);
    let gps = StaticLocation(PATIENT_HOME);

    let fix = gps.current_position().await.unwrap();
    assert!(client.within_range(fix, PATIENT_HOME));

    visits.capture_in_location(&visit.id, fix).await.unwrap();
    let image = camera.take_selfie().await.unwrap();
    visits.capture_in_selfie(&visit.id, image).await.unwrap();

    let checked_in = visits.complete_check_in(&visit.id).await.unwrap();
    assert_eq!(checked_in.status, VisitStatus::In);
}

#[tokio::test]
async fn geofence_gates_far_fixes() {
    let client = seeded_client().await;

    let far_away = LatLng {
        latitude: 34.1,
        longitude: -118.2437,
    };
    assert!(!client.within_range(far_away, PATIENT_HOME));
}
