//! Core data types for patients, visits and users
//!
//! Field names serialize in camelCase so records remain readable alongside
//! blobs written by the original mobile client.

use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A geographic coordinate in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude in degrees
    pub latitude: f64,

    /// Longitude in degrees
    pub longitude: f64,
}

/// A patient registered for home visits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// The patient ID
    pub id: String,

    /// The patient's full name
    pub name: String,

    /// The patient's street address
    pub address: String,

    /// The registered home coordinate used for geofencing
    pub coordinates: LatLng,

    /// ID of the practitioner assigned to this patient
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,

    /// Date the assignment was made (YYYY-MM-DD)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_date: Option<String>,
}

/// Vital signs captured during a visit, stored as free-form strings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vitals {
    /// Blood pressure, e.g. "120/80"
    pub blood_pressure: String,

    /// Blood sugar in mg/dL
    pub blood_sugar: String,

    /// Heart rate in BPM
    pub heart_rate: String,

    /// Oxygen saturation in %
    pub oxygen_saturation: String,

    /// Free-text notes
    pub notes: String,
}

/// Status of a visit
///
/// `Out` is retained for compatibility with records written by older
/// clients; no current operation produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VisitStatus {
    Pending,
    In,
    Out,
    Completed,
}

impl fmt::Display for VisitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VisitStatus::Pending => "PENDING",
            VisitStatus::In => "IN",
            VisitStatus::Out => "OUT",
            VisitStatus::Completed => "COMPLETED",
        };
        write!(f, "{}", name)
    }
}

/// One practitioner-patient encounter tracked through check-in, assessment
/// and check-out
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    /// The visit ID
    pub id: String,

    /// ID of the patient being visited
    pub patient_id: String,

    /// Date of the visit (YYYY-MM-DD)
    pub visit_date: String,

    /// Current lifecycle status
    pub status: VisitStatus,

    /// Check-in timestamp (RFC 3339), set when the visit reaches IN
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,

    /// Check-out timestamp (RFC 3339), set when the visit completes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,

    /// Check-in verification selfie as a base64 data URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_selfie: Option<String>,

    /// Check-out verification selfie as a base64 data URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_selfie: Option<String>,

    /// Location captured at check-in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_location: Option<LatLng>,

    /// Location captured at check-out
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_location: Option<LatLng>,

    /// Vital signs recorded during the assessment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vitals: Option<Vitals>,

    /// Prescription text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prescription: Option<String>,

    /// Prescription image as a base64 data URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prescription_image: Option<String>,

    /// Additional free-text report details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_details: Option<String>,
}

impl Visit {
    /// Create a new pending visit for a patient, dated today
    pub fn new_pending(patient_id: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            patient_id: patient_id.to_string(),
            visit_date: today(),
            status: VisitStatus::Pending,
            start_time: None,
            end_time: None,
            in_selfie: None,
            out_selfie: None,
            in_location: None,
            out_location: None,
            vitals: None,
            prescription: None,
            prescription_image: None,
            report_details: None,
        }
    }

    /// Whether the visit still accepts practitioner actions
    pub fn is_active(&self) -> bool {
        matches!(self.status, VisitStatus::Pending | VisitStatus::In)
    }

    /// Recompute the furthest status justified by the populated fields.
    ///
    /// Artifact captures and status writes are separate store operations, so
    /// an interrupted sequence can leave `status` behind the artifacts. The
    /// derived status tells the caller where to resume.
    pub fn derived_status(&self) -> VisitStatus {
        if self.end_time.is_some() {
            return VisitStatus::Completed;
        }
        if self.start_time.is_some() {
            return VisitStatus::In;
        }
        if self.in_location.is_some() && self.in_selfie.is_some() {
            return VisitStatus::In;
        }
        VisitStatus::Pending
    }
}

/// Role attached to a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Client,
    Practitioner,
    Admin,
}

/// Whether a user account is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
}

/// A user account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// The user ID
    pub id: String,

    /// The user's full name
    pub name: String,

    /// The user's role
    pub role: UserRole,

    /// The user's email address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// The user's mobile number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Account status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,

    /// Login password. Present only in the `users` collection; the persisted
    /// current-user record never carries it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl User {
    /// Copy of this user with the password stripped, safe to hand out as a
    /// session record
    pub fn without_password(&self) -> Self {
        Self {
            password: None,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visit_parses_original_client_json() {
        let raw = r#"{
            "id": "visit-1",
            "patientId": "patient-1",
            "visitDate": "2026-08-25",
            "status": "IN",
            "startTime": "2026-08-25T09:15:00Z",
            "inSelfie": "data:image/jpeg;base64,abc",
            "inLocation": { "latitude": 34.0522, "longitude": -118.2437 },
            "vitals": {
                "bloodPressure": "120/80",
                "bloodSugar": "95",
                "heartRate": "72",
                "oxygenSaturation": "98",
                "notes": ""
            }
        }"#;

        let visit: Visit = serde_json::from_str(raw).unwrap();
        assert_eq!(visit.status, VisitStatus::In);
        assert_eq!(visit.patient_id, "patient-1");
        assert_eq!(visit.vitals.unwrap().blood_pressure, "120/80");
        assert!(visit.out_selfie.is_none());
    }

    #[test]
    fn visit_serializes_camel_case_and_omits_unset_fields() {
        let visit = Visit::new_pending("patient-1");
        let value = serde_json::to_value(&visit).unwrap();

        assert_eq!(value["status"], "PENDING");
        assert_eq!(value["patientId"], "patient-1");
        assert!(value.get("inSelfie").is_none());
        assert!(value.get("startTime").is_none());
    }

    #[test]
    fn legacy_out_status_still_parses() {
        let visit: Visit = serde_json::from_str(
            r#"{ "id": "v", "patientId": "p", "visitDate": "2026-08-25", "status": "OUT" }"#,
        )
        .unwrap();
        assert_eq!(visit.status, VisitStatus::Out);
    }

    #[test]
    fn user_roles_serialize_lowercase() {
        let user = User {
            id: "u-1".to_string(),
            name: "Admin User".to_string(),
            role: UserRole::Admin,
            email: None,
            phone: None,
            status: Some(UserStatus::Active),
            password: None,
        };
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["role"], "admin");
        assert_eq!(value["status"], "active");
        assert!(value.get("password").is_none());
    }

    #[test]
    fn derived_status_tracks_populated_fields() {
        let mut visit = Visit::new_pending("p-1");
        assert_eq!(visit.derived_status(), VisitStatus::Pending);

        visit.in_location = Some(LatLng {
            latitude: 34.0,
            longitude: -118.0,
        });
        assert_eq!(visit.derived_status(), VisitStatus::Pending);

        visit.in_selfie = Some("data:image/jpeg;base64,abc".to_string());
        assert_eq!(visit.derived_status(), VisitStatus::In);

        visit.end_time = Some("2026-08-25T10:00:00Z".to_string());
        assert_eq!(visit.derived_status(), VisitStatus::Completed);
    }
}

/// Today's date as YYYY-MM-DD (UTC)
pub(crate) fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

/// The current time as an RFC 3339 timestamp
pub(crate) fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}
