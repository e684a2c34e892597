//! Unit quantities and planar geometry shared by the engine crates.

#![warn(clippy::pedantic)]

mod units;
pub use units::*;

pub mod alg2d;

mod geo;
pub use geo::GeoPoint;

/// Converts nautical miles to feet.
pub const FEET_PER_NM: f32 = 6076.12;
/// Converts nautical miles to meters.
pub const METERS_PER_NM: f32 = 1852.;
/// Converts hours to seconds.
pub const SECONDS_PER_HOUR: f32 = 3600.;
/// Mean radius of the Earth, in nautical miles.
pub const EARTH_RADIUS_NM: f32 = 3440.065;
