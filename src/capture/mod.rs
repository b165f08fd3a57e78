//! Device capture seams: camera and geolocation sources
//!
//! The device shell supplies real camera and GPS access; this crate only
//! defines the seams and ships sources suitable for tests and desktop use.

use std::path::PathBuf;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use tokio::fs;

use crate::error::Error;
use crate::types::LatLng;

/// A source of verification selfies
#[async_trait]
pub trait CameraSource: Send + Sync {
    /// Capture a still image and return it as a base64 data URL
    async fn take_selfie(&self) -> Result<String, Error>;
}

/// A source of single high-accuracy position fixes
#[async_trait]
pub trait LocationSource: Send + Sync {
    /// Read the current position
    async fn current_position(&self) -> Result<LatLng, Error>;
}

/// Camera source backed by a still image on disk
pub struct FileCamera {
    path: PathBuf,
}

impl FileCamera {
    /// Create a camera source that returns the image at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CameraSource for FileCamera {
    async fn take_selfie(&self) -> Result<String, Error> {
        let bytes = fs::read(&self.path).await.map_err(|e| {
            Error::camera(format!("Failed to read {}: {}", self.path.display(), e))
        })?;
        Ok(format!("data:image/jpeg;base64,{}", BASE64.encode(bytes)))
    }
}

/// Location source that always returns a fixed coordinate
pub struct StaticLocation(pub LatLng);

#[async_trait]
impl LocationSource for StaticLocation {
    async fn current_position(&self) -> Result<LatLng, Error> {
        Ok(self.0)
    }
}
