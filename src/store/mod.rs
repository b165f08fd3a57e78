//! Typed collection access over the preferences store
//!
//! The data tier is three flat lists (`patients`, `visits`, `users`) and a
//! single `currentUser` record, each held as one JSON blob. Every save is
//! read-list, replace-or-append, write-list: O(n) per write with no partial
//! update and no isolation, which is acceptable for a single-user local app.

mod prefs;

use std::sync::Arc;

use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Error;
use crate::types::{today, LatLng, Patient, User, UserRole, Visit};

pub use prefs::{FilePreferences, MemoryPreferences, Preferences};

const PATIENTS_KEY: &str = "patients";
const VISITS_KEY: &str = "visits";
const USERS_KEY: &str = "users";
const CURRENT_USER_KEY: &str = "currentUser";

/// Typed access to the patient, visit and user collections
#[derive(Clone)]
pub struct Store {
    prefs: Arc<dyn Preferences>,
}

impl Store {
    /// Create a store over a preferences backend
    pub fn new(prefs: Arc<dyn Preferences>) -> Self {
        Self { prefs }
    }

    async fn read_list<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, Error> {
        let raw = self.prefs.get(key).await?;
        let Some(raw) = raw else {
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Option<Vec<T>>>(&raw) {
            Ok(list) => Ok(list.unwrap_or_default()),
            Err(e) => {
                // An unreadable blob is treated as absent rather than fatal.
                warn!("failed to parse stored data for key {}: {}", key, e);
                Ok(Vec::new())
            }
        }
    }

    async fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<(), Error> {
        let raw = serde_json::to_string(value)?;
        self.prefs.set(key, &raw).await
    }

    async fn save_item<T, F>(&self, key: &str, item: &T, id_of: F) -> Result<(), Error>
    where
        T: Serialize + DeserializeOwned + Clone,
        F: Fn(&T) -> &str,
    {
        let mut items: Vec<T> = self.read_list(key).await?;
        match items.iter().position(|i| id_of(i) == id_of(item)) {
            Some(index) => items[index] = item.clone(),
            None => items.push(item.clone()),
        }
        self.write(key, &items).await
    }

    /// All registered patients
    pub async fn patients(&self) -> Result<Vec<Patient>, Error> {
        self.read_list(PATIENTS_KEY).await
    }

    /// Save a patient, replacing an existing record with the same id
    pub async fn save_patient(&self, patient: &Patient) -> Result<(), Error> {
        self.save_item(PATIENTS_KEY, patient, |p: &Patient| p.id.as_str()).await
    }

    /// Look up a patient by id
    pub async fn patient(&self, id: &str) -> Result<Option<Patient>, Error> {
        let patients = self.patients().await?;
        Ok(patients.into_iter().find(|p| p.id == id))
    }

    /// All recorded visits
    pub async fn visits(&self) -> Result<Vec<Visit>, Error> {
        self.read_list(VISITS_KEY).await
    }

    /// Save a visit, replacing an existing record with the same id
    pub async fn save_visit(&self, visit: &Visit) -> Result<(), Error> {
        self.save_item(VISITS_KEY, visit, |v: &Visit| v.id.as_str()).await
    }

    /// Look up a visit by id
    pub async fn visit(&self, id: &str) -> Result<Option<Visit>, Error> {
        let visits = self.visits().await?;
        Ok(visits.into_iter().find(|v| v.id == id))
    }

    /// All user accounts
    pub async fn users(&self) -> Result<Vec<User>, Error> {
        self.read_list(USERS_KEY).await
    }

    /// Save a user, replacing an existing record with the same id
    pub async fn save_user(&self, user: &User) -> Result<(), Error> {
        self.save_item(USERS_KEY, user, |u: &User| u.id.as_str()).await
    }

    /// Look up a user by id
    pub async fn user(&self, id: &str) -> Result<Option<User>, Error> {
        let users = self.users().await?;
        Ok(users.into_iter().find(|u| u.id == id))
    }

    /// Look up a user by email, case-insensitively
    pub async fn user_by_email(&self, email: &str) -> Result<Option<User>, Error> {
        let users = self.users().await?;
        Ok(users.into_iter().find(|u| {
            u.email
                .as_deref()
                .map(|e| e.eq_ignore_ascii_case(email))
                .unwrap_or(false)
        }))
    }

    /// The persisted signed-in user, if any
    pub async fn current_user(&self) -> Result<Option<User>, Error> {
        let raw = self.prefs.get(CURRENT_USER_KEY).await?;
        let Some(raw) = raw else {
            return Ok(None);
        };
        match serde_json::from_str::<Option<User>>(&raw) {
            Ok(user) => Ok(user),
            Err(e) => {
                warn!("failed to parse stored current user: {}", e);
                Ok(None)
            }
        }
    }

    /// Persist the signed-in user
    pub async fn set_current_user(&self, user: &User) -> Result<(), Error> {
        self.write(CURRENT_USER_KEY, user).await
    }

    /// Clear the signed-in user record to null
    pub async fn clear_current_user(&self) -> Result<(), Error> {
        self.write(CURRENT_USER_KEY, &None::<User>).await
    }

    /// Seed demo patients, visits and users into any empty collection
    pub async fn initialize_demo_data(&self) -> Result<(), Error> {
        let mut patients = self.patients().await?;
        if patients.is_empty() {
            patients = demo_patients();
            self.write(PATIENTS_KEY, &patients).await?;
        }

        let visits = self.visits().await?;
        if visits.is_empty() {
            let demo_visits = vec![Visit {
                id: "visit-1".to_string(),
                ..Visit::new_pending(&patients[0].id)
            }];
            self.write(VISITS_KEY, &demo_visits).await?;
        }

        let users = self.users().await?;
        if users.is_empty() {
            self.write(USERS_KEY, &demo_users()).await?;
        }

        Ok(())
    }
}

fn demo_patients() -> Vec<Patient> {
    vec![
        Patient {
            id: "patient-1".to_string(),
            name: "John Doe".to_string(),
            address: "123 Main St, Anytown".to_string(),
            coordinates: LatLng {
                latitude: 34.0522,
                longitude: -118.2437,
            },
            assigned_to: Some("user-2".to_string()),
            assigned_date: Some(today()),
        },
        Patient {
            id: "patient-2".to_string(),
            name: "Jane Smith".to_string(),
            address: "456 Elm St, Anytown".to_string(),
            coordinates: LatLng {
                latitude: 34.0522,
                longitude: -118.2437,
            },
            assigned_to: Some("user-2".to_string()),
            assigned_date: Some(today()),
        },
    ]
}

fn demo_users() -> Vec<User> {
    vec![
        User {
            id: "user-1".to_string(),
            name: "Admin User".to_string(),
            role: UserRole::Admin,
            email: Some("admin@example.com".to_string()),
            phone: None,
            status: None,
            password: Some("admin123".to_string()),
        },
        User {
            id: "user-2".to_string(),
            name: "Dr. Smith".to_string(),
            role: UserRole::Practitioner,
            email: Some("doctor@example.com".to_string()),
            phone: None,
            status: None,
            password: Some("doctor123".to_string()),
        },
        User {
            id: "user-3".to_string(),
            name: "Patient User".to_string(),
            role: UserRole::Client,
            email: Some("patient@example.com".to_string()),
            phone: None,
            status: None,
            password: Some("patient123".to_string()),
        },
    ]
}
