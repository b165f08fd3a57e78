//! Visit lifecycle: state machine and artifact capture
//!
//! A visit advances PENDING -> IN -> COMPLETED. Check-in requires a captured
//! location and selfie, check-out requires both check-out artifacts, and a
//! completed visit no longer accepts changes. Each capture persists the whole
//! visit immediately; the later status write is a separate store operation,
//! so an interrupted sequence leaves a record that
//! [`Visit::derived_status`](crate::types::Visit::derived_status) can
//! recover.

use std::collections::HashSet;

use log::info;

use crate::error::Error;
use crate::store::Store;
use crate::types::{now_rfc3339, today, LatLng, User, Visit, VisitStatus, Vitals};

/// Client for visit lifecycle operations
pub struct VisitClient {
    store: Store,
}

impl VisitClient {
    pub(crate) fn new(store: Store) -> Self {
        Self { store }
    }

    /// Open a visit for a patient: returns the patient's active visit when
    /// one exists, otherwise creates a new pending visit dated today
    pub async fn start_visit(&self, patient_id: &str) -> Result<Visit, Error> {
        if self.store.patient(patient_id).await?.is_none() {
            return Err(Error::visit(format!("Patient {} not found", patient_id)));
        }

        if let Some(active) = self.active_visit_for(patient_id).await? {
            return Ok(active);
        }

        let visit = Visit::new_pending(patient_id);
        self.store.save_visit(&visit).await?;
        info!("started visit {} for patient {}", visit.id, patient_id);
        Ok(visit)
    }

    /// The patient's pending or in-progress visit, if any
    pub async fn active_visit_for(&self, patient_id: &str) -> Result<Option<Visit>, Error> {
        let visits = self.store.visits().await?;
        Ok(visits
            .into_iter()
            .find(|v| v.patient_id == patient_id && v.is_active()))
    }

    /// Record the check-in location; allowed only while the visit is pending
    pub async fn capture_in_location(&self, id: &str, location: LatLng) -> Result<Visit, Error> {
        let mut visit = self.load(id).await?;
        ensure_status(&visit, VisitStatus::Pending, "capture a check-in location")?;
        visit.in_location = Some(location);
        self.store.save_visit(&visit).await?;
        Ok(visit)
    }

    /// Record the check-in selfie; allowed only while the visit is pending
    pub async fn capture_in_selfie(&self, id: &str, image: String) -> Result<Visit, Error> {
        let mut visit = self.load(id).await?;
        ensure_status(&visit, VisitStatus::Pending, "capture a check-in selfie")?;
        visit.in_selfie = Some(image);
        self.store.save_visit(&visit).await?;
        Ok(visit)
    }

    /// Confirm check-in: requires both check-in artifacts, moves the visit to
    /// IN and stamps the start time
    pub async fn complete_check_in(&self, id: &str) -> Result<Visit, Error> {
        let mut visit = self.load(id).await?;
        ensure_status(&visit, VisitStatus::Pending, "check in")?;
        if visit.in_location.is_none() || visit.in_selfie.is_none() {
            return Err(Error::visit(
                "Check-in requires a captured location and selfie",
            ));
        }

        visit.status = VisitStatus::In;
        visit.start_time = Some(now_rfc3339());
        self.store.save_visit(&visit).await?;
        info!("visit {} checked in", visit.id);
        Ok(visit)
    }

    /// Record vital signs during the assessment
    pub async fn record_vitals(&self, id: &str, vitals: Vitals) -> Result<Visit, Error> {
        let mut visit = self.load(id).await?;
        ensure_status(&visit, VisitStatus::In, "record vitals")?;
        visit.vitals = Some(vitals);
        self.store.save_visit(&visit).await?;
        Ok(visit)
    }

    /// Record a prescription, as text and/or a captured image
    pub async fn record_prescription(
        &self,
        id: &str,
        text: Option<String>,
        image: Option<String>,
    ) -> Result<Visit, Error> {
        let mut visit = self.load(id).await?;
        ensure_status(&visit, VisitStatus::In, "record a prescription")?;
        if text.is_some() {
            visit.prescription = text;
        }
        if image.is_some() {
            visit.prescription_image = image;
        }
        self.store.save_visit(&visit).await?;
        Ok(visit)
    }

    /// Record free-text report details
    pub async fn record_report(&self, id: &str, details: &str) -> Result<Visit, Error> {
        let mut visit = self.load(id).await?;
        ensure_status(&visit, VisitStatus::In, "record a report")?;
        visit.report_details = Some(details.to_string());
        self.store.save_visit(&visit).await?;
        Ok(visit)
    }

    /// Record the check-out location; allowed only while the visit is IN
    pub async fn capture_out_location(&self, id: &str, location: LatLng) -> Result<Visit, Error> {
        let mut visit = self.load(id).await?;
        ensure_status(&visit, VisitStatus::In, "capture a check-out location")?;
        visit.out_location = Some(location);
        self.store.save_visit(&visit).await?;
        Ok(visit)
    }

    /// Record the check-out selfie; allowed only while the visit is IN
    pub async fn capture_out_selfie(&self, id: &str, image: String) -> Result<Visit, Error> {
        let mut visit = self.load(id).await?;
        ensure_status(&visit, VisitStatus::In, "capture a check-out selfie")?;
        visit.out_selfie = Some(image);
        self.store.save_visit(&visit).await?;
        Ok(visit)
    }

    /// Confirm check-out: requires both check-out artifacts, completes the
    /// visit and stamps the end time
    pub async fn complete_check_out(&self, id: &str) -> Result<Visit, Error> {
        let mut visit = self.load(id).await?;
        ensure_status(&visit, VisitStatus::In, "check out")?;
        if visit.out_location.is_none() || visit.out_selfie.is_none() {
            return Err(Error::visit(
                "Check-out requires a captured location and selfie",
            ));
        }

        visit.status = VisitStatus::Completed;
        visit.end_time = Some(now_rfc3339());
        self.store.save_visit(&visit).await?;
        info!("visit {} completed", visit.id);
        Ok(visit)
    }

    /// All visits for a patient
    pub async fn visits_for_patient(&self, patient_id: &str) -> Result<Vec<Visit>, Error> {
        let visits = self.store.visits().await?;
        Ok(visits
            .into_iter()
            .filter(|v| v.patient_id == patient_id)
            .collect())
    }

    /// Today's visits for the patients assigned to a practitioner
    pub async fn today_visits_for(&self, practitioner_id: &str) -> Result<Vec<Visit>, Error> {
        let patients = self.store.patients().await?;
        let assigned: HashSet<String> = patients
            .into_iter()
            .filter(|p| p.assigned_to.as_deref() == Some(practitioner_id))
            .map(|p| p.id)
            .collect();

        let date = today();
        let visits = self.store.visits().await?;
        Ok(visits
            .into_iter()
            .filter(|v| v.visit_date == date && assigned.contains(&v.patient_id))
            .collect())
    }

    /// Visits visible to a client account
    ///
    /// Patient records carry no user id, so patients are matched to client
    /// accounts by name.
    pub async fn visits_for_client(&self, user: &User) -> Result<Vec<Visit>, Error> {
        let patients = self.store.patients().await?;
        let own: HashSet<String> = patients
            .into_iter()
            .filter(|p| p.name == user.name)
            .map(|p| p.id)
            .collect();

        let visits = self.store.visits().await?;
        Ok(visits
            .into_iter()
            .filter(|v| own.contains(&v.patient_id))
            .collect())
    }

    async fn load(&self, id: &str) -> Result<Visit, Error> {
        self.store
            .visit(id)
            .await?
            .ok_or_else(|| Error::visit(format!("Visit {} not found", id)))
    }
}

fn ensure_status(visit: &Visit, expected: VisitStatus, action: &str) -> Result<(), Error> {
    if visit.status == VisitStatus::Completed {
        return Err(Error::visit(
            "Visit is completed and can no longer be modified",
        ));
    }
    if visit.status != expected {
        return Err(Error::visit(format!(
            "Cannot {} while the visit is {}",
            action, visit.status
        )));
    }
    Ok(())
}
