//! Location Model

use serde::{Deserialize, Serialize};

/// A geolocation fix attached to a report
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationData {
    pub latitude: f64,
    pub longitude: f64,
    /// Reported accuracy in meters
    pub accuracy: f64,
}
