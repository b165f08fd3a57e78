//! Configuration options for the home-visit client

/// Configuration options for the home-visit client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Geofence radius in meters for the capture-location gate
    pub geofence_range_m: f64,

    /// Whether to persist the signed-in user across restarts
    pub persist_session: bool,

    /// Whether to seed demo data on initialization when the store is empty
    pub seed_demo_data: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            geofence_range_m: 200.0,
            persist_session: true,
            seed_demo_data: false,
        }
    }
}

impl ClientOptions {
    /// Set the geofence radius in meters
    pub fn with_geofence_range_m(mut self, value: f64) -> Self {
        self.geofence_range_m = value;
        self
    }

    /// Set whether to persist the session
    pub fn with_persist_session(mut self, value: bool) -> Self {
        self.persist_session = value;
        self
    }

    /// Set whether to seed demo data on initialization
    pub fn with_seed_demo_data(mut self, value: bool) -> Self {
        self.seed_demo_data = value;
        self
    }
}
