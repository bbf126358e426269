//! # sarpa-geo
//!
//! The location domain for sarpa:
//! - `Coordinates`: range-validated latitude/longitude with optional
//!   accuracy and capture time
//! - `Location`: the total "resolved or reason-tagged unresolved" sum type
//! - haversine great-circle distance
//! - `LocationProvider` + `resolve`: capability-injected acquisition that
//!   always produces a `Location` value, never an error
//!
//! Everything downstream of this crate is a pure function of `Location`
//! values; the one suspension point in the whole system (waiting on a
//! device fix) lives behind `resolve`.

pub mod coords;
pub mod distance;
pub mod resolver;

pub use coords::{CoordinateError, Coordinates, Location, UnresolvedReason};
pub use distance::{EARTH_RADIUS_KM, haversine_km};
pub use resolver::{
    DEFAULT_RESOLVE_TIMEOUT_MS, LocationProvider, PositionFix, ProviderError, ResolverConfig,
    resolve,
};
