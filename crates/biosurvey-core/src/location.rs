//! One-shot acquisition of the starting search location

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

use crate::error::{Result, SurveyError};
use crate::models::Coordinate;
use crate::ports::LocationProvider;

/// Brisbane CBD, used whenever no position can be obtained
pub const DEFAULT_FALLBACK: Coordinate = Coordinate { lat: -27.4698, lon: 153.0251 };

/// Outcome of asking for the current location
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LocationFix {
    /// The provider reported a position
    Located { coordinate: Coordinate },

    /// No position; search from the fallback instead
    Unavailable { fallback: Coordinate, reason: String },
}

impl LocationFix {
    /// The coordinate to search from, whichever branch was taken
    pub fn coordinate(&self) -> Coordinate {
        match self {
            LocationFix::Located { coordinate } => *coordinate,
            LocationFix::Unavailable { fallback, .. } => *fallback,
        }
    }

    pub fn is_located(&self) -> bool {
        matches!(self, LocationFix::Located { .. })
    }
}

/// Ask the provider once, substituting the fallback on error or timeout
pub async fn acquire_location<P: LocationProvider + ?Sized>(
    provider: &P,
    fallback: Coordinate,
    timeout: Duration,
) -> LocationFix {
    match tokio::time::timeout(timeout, provider.current_location()).await {
        Ok(Ok(coordinate)) => {
            tracing::debug!(lat = coordinate.lat, lon = coordinate.lon, "Location acquired");
            LocationFix::Located { coordinate }
        }
        Ok(Err(e)) => {
            tracing::info!(error = %e, "Location unavailable, using fallback");
            LocationFix::Unavailable { fallback, reason: e.to_string() }
        }
        Err(_) => {
            tracing::info!(timeout_ms = timeout.as_millis() as u64, "Location timed out, using fallback");
            LocationFix::Unavailable {
                fallback,
                reason: format!("no position within {}ms", timeout.as_millis()),
            }
        }
    }
}

/// Provider that reports a position supplied up front (flags or config)
#[derive(Debug, Clone, Copy)]
pub struct FixedLocationProvider {
    coordinate: Coordinate,
}

impl FixedLocationProvider {
    pub fn new(coordinate: Coordinate) -> Self {
        Self { coordinate }
    }
}

#[async_trait]
impl LocationProvider for FixedLocationProvider {
    async fn current_location(&self) -> Result<Coordinate> {
        Ok(self.coordinate)
    }
}

/// Provider used when no positioning source exists
#[derive(Debug, Clone, Default)]
pub struct NoLocationProvider;

#[async_trait]
impl LocationProvider for NoLocationProvider {
    async fn current_location(&self) -> Result<Coordinate> {
        Err(SurveyError::LocationUnavailable {
            reason: "no positioning source configured".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StalledProvider;

    #[async_trait]
    impl LocationProvider for StalledProvider {
        async fn current_location(&self) -> Result<Coordinate> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(Coordinate { lat: 0.0, lon: 0.0 })
        }
    }

    #[tokio::test]
    async fn test_located() {
        let here = Coordinate::new(-19.26, 146.81).unwrap();
        let fix =
            acquire_location(&FixedLocationProvider::new(here), DEFAULT_FALLBACK, Duration::from_secs(1))
                .await;
        assert_eq!(fix, LocationFix::Located { coordinate: here });
        assert_eq!(fix.coordinate(), here);
    }

    #[tokio::test]
    async fn test_denied_uses_fallback() {
        let fix = acquire_location(&NoLocationProvider, DEFAULT_FALLBACK, Duration::from_secs(1)).await;
        assert!(!fix.is_located());
        assert_eq!(fix.coordinate(), DEFAULT_FALLBACK);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_uses_fallback() {
        let fix = acquire_location(&StalledProvider, DEFAULT_FALLBACK, Duration::from_millis(500)).await;
        match fix {
            LocationFix::Unavailable { fallback, reason } => {
                assert_eq!(fallback, DEFAULT_FALLBACK);
                assert!(reason.contains("500ms"));
            }
            other => panic!("expected fallback, got {:?}", other),
        }
    }
}
