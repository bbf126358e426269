//! Total location resolution over an injected device capability.
//!
//! The presentation layer (or a test) supplies a `LocationProvider`; this
//! module wraps one acquisition attempt in a wall-clock timeout and folds
//! every failure mode into the `Unresolved` arm of `Location`. `resolve`
//! never returns an error and never hangs past its budget, so the
//! emergency flow can always proceed with whatever it got.
//!
//! No automatic retry: a caller that wants another attempt calls `resolve`
//! again. Abandoning an in-flight resolution is always safe: the future
//! only computes a value, it mutates nothing.

use crate::coords::{Coordinates, Location, UnresolvedReason};
use chrono::Utc;
use std::time::Duration;

/// Default acquisition budget before giving up.
pub const DEFAULT_RESOLVE_TIMEOUT_MS: u64 = 8_000;

/// How long `resolve` waits on the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverConfig {
    pub timeout_ms: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_RESOLVE_TIMEOUT_MS,
        }
    }
}

/// A raw position fix as reported by a device.
///
/// Not yet range-validated; `resolve` rejects fixes that do not form
/// valid `Coordinates`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionFix {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy_meters: f64,
}

/// Failures a device capability can report.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("no location capability on this device")]
    Unsupported,

    #[error("device error: {0}")]
    Device(String),
}

/// The injected device-location capability.
///
/// Implementations adapt whatever the platform offers (a browser
/// geolocation callback, a GPS daemon, a fixed test position) into one
/// async call. Implementations must be side-effect free on cancellation.
#[async_trait::async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_position(&self) -> Result<PositionFix, ProviderError>;
}

/// Resolve the reporter's location. Total: always returns a `Location`.
///
/// - provider success with in-range coordinates → `Resolved`, stamped
///   with accuracy and capture time
/// - provider success with out-of-range coordinates → `Unresolved{DeviceError}`
/// - provider failure → the matching `Unresolved` reason
/// - budget exhausted → `Unresolved{Timeout}`
pub async fn resolve(provider: &dyn LocationProvider, config: &ResolverConfig) -> Location {
    let budget = Duration::from_millis(config.timeout_ms);
    let outcome = tokio::time::timeout(budget, provider.current_position()).await;

    match outcome {
        Err(_elapsed) => Location::unresolved(UnresolvedReason::Timeout),
        Ok(Err(ProviderError::PermissionDenied)) => {
            Location::unresolved(UnresolvedReason::PermissionDenied)
        }
        Ok(Err(ProviderError::Unsupported)) => Location::unresolved(UnresolvedReason::Unsupported),
        Ok(Err(ProviderError::Device(_))) => Location::unresolved(UnresolvedReason::DeviceError),
        Ok(Ok(fix)) => match Coordinates::new(fix.latitude, fix.longitude) {
            Ok(coords) => Location::Resolved(
                coords
                    .with_accuracy(fix.accuracy_meters)
                    .with_captured_at(Utc::now()),
            ),
            Err(_) => Location::unresolved(UnresolvedReason::DeviceError),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedProvider {
        fix: PositionFix,
    }

    #[async_trait::async_trait]
    impl LocationProvider for FixedProvider {
        async fn current_position(&self) -> Result<PositionFix, ProviderError> {
            Ok(self.fix)
        }
    }

    struct FailingProvider {
        error: ProviderError,
    }

    #[async_trait::async_trait]
    impl LocationProvider for FailingProvider {
        async fn current_position(&self) -> Result<PositionFix, ProviderError> {
            Err(self.error.clone())
        }
    }

    /// Never completes; stands in for a sensor that never answers.
    struct StalledProvider;

    #[async_trait::async_trait]
    impl LocationProvider for StalledProvider {
        async fn current_position(&self) -> Result<PositionFix, ProviderError> {
            std::future::pending().await
        }
    }

    #[tokio::test(start_paused = true)]
    async fn zero_budget_times_out_immediately() {
        let config = ResolverConfig { timeout_ms: 0 };
        let location = resolve(&StalledProvider, &config).await;
        assert_eq!(
            location,
            Location::unresolved(UnresolvedReason::Timeout),
            "a stalled sensor must never hang the flow"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_provider_times_out_at_budget() {
        let config = ResolverConfig { timeout_ms: 8_000 };
        let location = resolve(&StalledProvider, &config).await;
        assert_eq!(location, Location::unresolved(UnresolvedReason::Timeout));
    }

    #[tokio::test]
    async fn success_carries_accuracy_and_capture_time() {
        let provider = FixedProvider {
            fix: PositionFix {
                latitude: 12.9716,
                longitude: 77.5946,
                accuracy_meters: 20.0,
            },
        };
        let location = resolve(&provider, &ResolverConfig::default()).await;
        let coords = location
            .coordinates()
            .expect("fixed provider should resolve");
        assert_eq!(coords.latitude, 12.9716);
        assert_eq!(coords.accuracy_meters, Some(20.0));
        assert!(coords.captured_at.is_some());
    }

    #[tokio::test]
    async fn permission_denial_maps_to_its_reason() {
        let provider = FailingProvider {
            error: ProviderError::PermissionDenied,
        };
        let location = resolve(&provider, &ResolverConfig::default()).await;
        assert_eq!(
            location,
            Location::unresolved(UnresolvedReason::PermissionDenied)
        );
    }

    #[tokio::test]
    async fn device_failure_maps_to_its_reason() {
        let provider = FailingProvider {
            error: ProviderError::Device("sensor read failed".to_string()),
        };
        let location = resolve(&provider, &ResolverConfig::default()).await;
        assert_eq!(
            location,
            Location::unresolved(UnresolvedReason::DeviceError)
        );
    }

    #[tokio::test]
    async fn out_of_range_fix_is_a_device_error() {
        let provider = FixedProvider {
            fix: PositionFix {
                latitude: 91.0,
                longitude: 0.0,
                accuracy_meters: 5.0,
            },
        };
        let location = resolve(&provider, &ResolverConfig::default()).await;
        assert_eq!(
            location,
            Location::unresolved(UnresolvedReason::DeviceError)
        );
    }
}
