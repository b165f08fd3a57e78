//! Administrative operations: user roles, account status and patient
//! assignment

use log::info;

use crate::error::Error;
use crate::store::Store;
use crate::types::{today, Patient, User, UserRole, UserStatus};

/// Client for admin-only operations
pub struct AdminClient {
    store: Store,
}

impl AdminClient {
    pub(crate) fn new(store: Store) -> Self {
        Self { store }
    }

    /// Change a user's role
    pub async fn set_user_role(&self, user_id: &str, role: UserRole) -> Result<User, Error> {
        let mut user = self.load_user(user_id).await?;
        user.role = role;
        self.store.save_user(&user).await?;
        info!("user {} role changed", user.id);
        Ok(user)
    }

    /// Toggle a user's account status
    pub async fn set_user_status(&self, user_id: &str, status: UserStatus) -> Result<User, Error> {
        let mut user = self.load_user(user_id).await?;
        user.status = Some(status);
        self.store.save_user(&user).await?;
        Ok(user)
    }

    /// Assign a patient to a practitioner, dating the assignment today
    pub async fn assign_patient(
        &self,
        patient_id: &str,
        practitioner_id: &str,
    ) -> Result<Patient, Error> {
        let practitioner = self.load_user(practitioner_id).await?;
        if practitioner.role != UserRole::Practitioner {
            return Err(Error::general(format!(
                "User {} is not a practitioner",
                practitioner_id
            )));
        }

        let mut patient = self.load_patient(patient_id).await?;
        patient.assigned_to = Some(practitioner_id.to_string());
        patient.assigned_date = Some(today());
        self.store.save_patient(&patient).await?;
        info!(
            "patient {} assigned to practitioner {}",
            patient_id, practitioner_id
        );
        Ok(patient)
    }

    /// Clear a patient's assignment
    pub async fn unassign_patient(&self, patient_id: &str) -> Result<Patient, Error> {
        let mut patient = self.load_patient(patient_id).await?;
        patient.assigned_to = None;
        patient.assigned_date = None;
        self.store.save_patient(&patient).await?;
        Ok(patient)
    }

    /// All users with the practitioner role
    pub async fn practitioners(&self) -> Result<Vec<User>, Error> {
        let users = self.store.users().await?;
        Ok(users
            .into_iter()
            .filter(|u| u.role == UserRole::Practitioner)
            .collect())
    }

    async fn load_user(&self, id: &str) -> Result<User, Error> {
        self.store
            .user(id)
            .await?
            .ok_or_else(|| Error::general(format!("User {} not found", id)))
    }

    async fn load_patient(&self, id: &str) -> Result<Patient, Error> {
        self.store
            .patient(id)
            .await?
            .ok_or_else(|| Error::general(format!("Patient {} not found", id)))
    }
}
