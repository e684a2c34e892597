use math::{Length, Position, Speed};

use crate::{Range, WeightedList};

/// A traffic generation pattern for one route.
#[derive(Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SpawnPattern {
    /// Whether the pattern produces arrivals or departures.
    pub category: Category,
    /// Distribution of spawn intervals over time.
    pub kind: RateKind,
    /// Route string every spawned aircraft follows,
    /// e.g. `"MLF.GRNPA1.KLAS"`.
    pub route: String,
    /// Average spawn rate in aircraft per hour.
    pub frequency: f32,
    /// Initial speed of spawned aircraft.
    pub speed: Speed<f32>,
    /// Initial altitude band of spawned aircraft.
    /// Sampled uniformly and rounded to the nearest thousand feet.
    pub altitude: Range<Position<f32>>,
    /// Airlines operating this route, with relative weights.
    #[serde(default)]
    pub airlines: WeightedList<String>,
    /// Cycle length in seconds for the cyclic, wave and surge kinds.
    #[serde(default)]
    pub period: Option<f32>,
    /// Phase offset in seconds into the cycle at activation time.
    #[serde(default)]
    pub offset: f32,
    /// Peak deviation from `frequency` in aircraft per hour,
    /// for the cyclic and wave kinds.
    #[serde(default)]
    pub variation: f32,
    /// In-trail separation band for the surge kind.
    /// `min` applies during the surge, `max` during the lull.
    #[serde(default)]
    pub entrail: Option<Range<Length<f32>>>,
}

/// Which phase of flight a spawn pattern produces aircraft in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Aircraft entering the airspace en route to the airport.
    Arrival,
    /// Aircraft departing the airport.
    Departure,
}

/// Distribution of spawn intervals over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RateKind {
    /// Independent random intervals averaging to `frequency`.
    Random,
    /// Triangular ramp between `frequency - variation` and `frequency + variation`.
    Cyclic,
    /// Sinusoidal oscillation around `frequency` with amplitude `variation`.
    Wave,
    /// Alternating bursts at minimum in-trail separation and quiet gaps.
    Surge,
}
