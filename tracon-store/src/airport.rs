use std::collections::HashMap;

use math::{Angle, GeoPoint, Position};

use crate::{Procedure, SpawnPattern};

/// Top-level structure of an airport file.
#[derive(Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Airport {
    /// ICAO code of the airport, e.g. `"KLAS"`.
    pub icao: String,
    /// Human-readable airport name.
    pub name: String,
    /// Geographic reference point of the airport.
    /// All other coordinates in the file are projected relative to this point.
    pub position: GeoPoint,
    /// Magnetic declination at the airport, east positive.
    ///
    /// The projected plane is rotated such that +y points to magnetic north.
    #[serde(default)]
    pub magnetic_north: Angle,
    /// Named fixes available for route construction, keyed by fix name.
    pub fixes: HashMap<String, GeoPoint>,
    /// Standard instrument departures, keyed by procedure identifier.
    #[serde(default)]
    pub sids: HashMap<String, Procedure>,
    /// Standard terminal arrival routes, keyed by procedure identifier.
    #[serde(default)]
    pub stars: HashMap<String, Procedure>,
    /// Traffic generation patterns active for this airport.
    #[serde(default)]
    pub spawn_patterns: Vec<SpawnPattern>,
    /// Lateral and vertical extent of the controlled airspace.
    pub airspace: Vec<AirspaceSector>,
}

/// One sector of the controlled airspace.
#[derive(Clone, serde::Serialize, serde::Deserialize)]
pub struct AirspaceSector {
    /// Lowest controlled altitude of the sector.
    pub floor: Position<f32>,
    /// Highest controlled altitude of the sector.
    pub ceiling: Position<f32>,
    /// Lateral boundary of the sector as a closed polygon.
    pub poly: Vec<GeoPoint>,
}
