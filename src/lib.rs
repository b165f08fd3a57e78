//! Home-Visit Tracking Client Library
//!
//! Client-side domain logic for tracking healthcare practitioner home
//! visits: patient assignment, geofenced check-in/check-out with selfie
//! verification, vitals capture and prescription recording, persisted in a
//! preferences-style key-value store.

pub mod admin;
pub mod auth;
pub mod capture;
pub mod config;
pub mod error;
pub mod geofence;
pub mod routes;
pub mod store;
pub mod types;
pub mod visit;

use std::sync::Arc;

use crate::admin::AdminClient;
use crate::auth::Auth;
use crate::config::ClientOptions;
use crate::error::Error;
use crate::store::{Preferences, Store};
use crate::types::{LatLng, User};
use crate::visit::VisitClient;

/// The main entry point for the home-visit client
pub struct HomeVisit {
    /// Typed access to the preferences-backed collections
    pub store: Store,
    /// Auth client for login, registration and the current session
    pub auth: Auth,
    /// Client options
    pub options: ClientOptions,
}

impl HomeVisit {
    /// Create a new client over a preferences backend
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use homevisit::HomeVisit;
    /// use homevisit::store::MemoryPreferences;
    ///
    /// let client = HomeVisit::new(Arc::new(MemoryPreferences::new()));
    /// ```
    pub fn new(prefs: Arc<dyn Preferences>) -> Self {
        Self::new_with_options(prefs, ClientOptions::default())
    }

    /// Create a new client with custom options
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use homevisit::{HomeVisit, config::ClientOptions};
    /// use homevisit::store::MemoryPreferences;
    ///
    /// let options = ClientOptions::default().with_geofence_range_m(150.0);
    /// let client = HomeVisit::new_with_options(Arc::new(MemoryPreferences::new()), options);
    /// ```
    pub fn new_with_options(prefs: Arc<dyn Preferences>, options: ClientOptions) -> Self {
        let store = Store::new(prefs);
        let auth = Auth::new(store.clone(), options.clone());

        Self {
            store,
            auth,
            options,
        }
    }

    /// Initialize the client: seed demo data when configured and restore a
    /// persisted session, returning the signed-in user if one was restored
    pub async fn initialize(&self) -> Result<Option<User>, Error> {
        if self.options.seed_demo_data {
            self.store.initialize_demo_data().await?;
        }
        self.auth.restore_session().await
    }

    /// Get a reference to the auth client
    pub fn auth(&self) -> &Auth {
        &self.auth
    }

    /// Get a reference to the store
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Create a client for visit lifecycle operations
    pub fn visits(&self) -> VisitClient {
        VisitClient::new(self.store.clone())
    }

    /// Create a client for admin operations
    pub fn admin(&self) -> AdminClient {
        AdminClient::new(self.store.clone())
    }

    /// Whether `user_location` is within the configured geofence radius of
    /// `target`, gating the capture-location action
    pub fn within_range(&self, user_location: LatLng, target: LatLng) -> bool {
        geofence::is_within_range(user_location, target, self.options.geofence_range_m)
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::config::ClientOptions;
    pub use crate::error::Error;
    pub use crate::types::{LatLng, Patient, User, UserRole, Visit, VisitStatus, Vitals};
    pub use crate::HomeVisit;
}
