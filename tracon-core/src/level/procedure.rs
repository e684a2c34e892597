use std::collections::HashMap;
use std::sync::Arc;

use bevy::app::{App, Plugin};
use bevy::ecs::resource::Resource;
use bevy::math::Vec2;
use math::{Heading, Length, Position, Speed, TurnDirection};

use crate::level::fix;

pub mod loader;

#[cfg(test)]
mod tests;

pub struct Plug;

impl Plugin for Plug {
    fn build(&self, app: &mut App) { app.init_resource::<Registry>(); }
}

/// Whether a procedure is flown after departure or before arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Sid,
    Star,
}

/// Crossing restriction on one axis, `None` meaning unbounded.
///
/// An exact crossing restriction sets both bounds to the same value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Limits<T> {
    pub min: Option<T>,
    pub max: Option<T>,
}

impl<T> Default for Limits<T> {
    fn default() -> Self { Self { min: None, max: None } }
}

impl<T: Copy + PartialOrd> Limits<T> {
    #[must_use]
    pub fn is_some(&self) -> bool { self.min.is_some() || self.max.is_some() }

    /// Whether the upper bound exists and lies strictly below `value`.
    #[must_use]
    pub fn max_below(&self, value: T) -> bool {
        self.max.is_some_and(|max| max.partial_cmp(&value) == Some(std::cmp::Ordering::Less))
    }

    /// Whether the lower bound exists and lies strictly above `value`.
    #[must_use]
    pub fn min_above(&self, value: T) -> bool {
        self.min.is_some_and(|min| min.partial_cmp(&value) == Some(std::cmp::Ordering::Greater))
    }
}

/// Parameters of a racetrack holding pattern at a waypoint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoldParameters {
    /// Heading of the inbound leg towards the fix.
    /// `None` until backfilled from the preceding route leg.
    pub inbound_heading: Option<Heading>,
    /// Length of each straight leg.
    pub leg_length:      Length<f32>,
    pub turn_direction:  TurnDirection,
}

impl Default for HoldParameters {
    fn default() -> Self {
        Self {
            inbound_heading: None,
            leg_length:      Length::from_nm(4.),
            turn_direction:  TurnDirection::Clockwise,
        }
    }
}

/// A restriction-bearing point within a procedure or route.
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    /// Uppercase fix name. For vector waypoints this holds the heading digits
    /// without the `#` marker.
    pub name:     String,
    /// Altitude restriction in feet AMSL.
    pub altitude: Limits<Position<f32>>,
    /// Speed restriction.
    pub speed:    Limits<Speed<f32>>,
    /// The aircraft must cross directly over the fix before turning.
    pub fly_over: bool,
    /// The aircraft enters a holding pattern at this fix.
    pub hold:     Option<HoldParameters>,
    /// An assigned heading to fly instead of a fix position.
    pub vector:   Option<Heading>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid restriction token {0:?}")]
    Restriction(String),
    #[error("invalid vector heading {0:?}")]
    VectorHeading(String),
}

impl Waypoint {
    /// Parses a waypoint from a bare name, interpreting the
    /// `^` (fly-over), `@` (hold) and `#` (vector) prefixes.
    ///
    /// # Errors
    /// If a `#`-prefixed name does not parse as a heading in degrees.
    pub fn from_name(raw: &str) -> Result<Self, ParseError> {
        let (fly_over, raw) = match raw.strip_prefix('^') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };
        let (hold, raw) = match raw.strip_prefix('@') {
            Some(rest) => (Some(HoldParameters::default()), rest),
            None => (None, raw),
        };
        let (vector, raw) = match raw.strip_prefix('#') {
            Some(digits) => {
                let degrees: f32 = digits
                    .parse()
                    .map_err(|_| ParseError::VectorHeading(raw.to_string()))?;
                (Some(Heading::from_degrees(degrees)), digits)
            }
            None => (None, raw),
        };

        Ok(Self {
            name: if vector.is_some() { raw.to_string() } else { raw.to_uppercase() },
            altitude: Limits::default(),
            speed: Limits::default(),
            fly_over,
            hold,
            vector,
        })
    }

    /// Parses a waypoint entry from an airport file,
    /// applying its restriction string if present.
    ///
    /// # Errors
    /// If the restriction string or a vector heading is malformed.
    pub fn parse(entry: &store::WaypointEntry) -> Result<Self, ParseError> {
        let mut waypoint = Self::from_name(entry.name())?;
        if let Some(restriction) = entry.restriction() {
            waypoint.apply_restrictions(restriction)?;
        }
        Ok(waypoint)
    }

    /// Applies a `|`-separated restriction string such as `"A100+|S250-"`.
    ///
    /// Altitude digits are in hundreds of feet; speed digits are knots.
    ///
    /// # Errors
    /// If any token has an unknown axis or an unparseable numeric part.
    pub fn apply_restrictions(&mut self, restrictions: &str) -> Result<(), ParseError> {
        for token in restrictions.split('|') {
            let malformed = || ParseError::Restriction(token.to_string());

            let (axis, rest) = token.split_at_checked(1).ok_or_else(malformed)?;
            let (digits, bound) = match rest.as_bytes().last() {
                Some(b'+') => (&rest[..rest.len() - 1], Bound::Min),
                Some(b'-') => (&rest[..rest.len() - 1], Bound::Max),
                _ => (rest, Bound::Exact),
            };
            let value: f32 = digits.parse().map_err(|_| malformed())?;

            match axis {
                "A" | "a" => {
                    let altitude = Position::from_amsl_feet(value * 100.);
                    bound.apply(&mut self.altitude, altitude);
                }
                "S" | "s" => {
                    let speed = Speed::from_knots(value);
                    bound.apply(&mut self.speed, speed);
                }
                _ => return Err(malformed()),
            }
        }
        Ok(())
    }

    /// Name shown to the user. Unpublished RNAV points are labelled generically.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.starts_with('_') { "RNAV" } else { &self.name }
    }

    /// Backfills hold parameters once the inbound leg is known.
    /// No-op on non-hold waypoints.
    pub fn set_hold_parameters(&mut self, parameters: HoldParameters) {
        if self.hold.is_some() {
            self.hold = Some(parameters);
        }
    }
}

enum Bound {
    Min,
    Max,
    Exact,
}

impl Bound {
    fn apply<T: Copy>(&self, limits: &mut Limits<T>, value: T) {
        match self {
            Self::Min => limits.min = Some(value),
            Self::Max => limits.max = Some(value),
            Self::Exact => {
                limits.min = Some(value);
                limits.max = Some(value);
            }
        }
    }
}

/// A named SID or STAR with entry, body and exit segments.
///
/// For a SID, entries are keyed by runway and exits by named exit point.
/// For a STAR, entries are keyed by named entry point and exits by runway.
#[derive(Debug)]
pub struct Definition {
    /// Full identifier including any variant suffix, uppercase.
    pub icao: String,
    /// Spoken name of the procedure.
    pub name: String,
    pub kind: Kind,
    entries:  HashMap<String, Vec<Waypoint>>,
    body:     Vec<Waypoint>,
    exits:    HashMap<String, Vec<Waypoint>>,
}

impl Definition {
    /// Entry segment + body + exit segment, in flying order.
    ///
    /// Returns `None` if the entry or exit key is absent;
    /// missing transitions are an authoring error recoverable mid-session,
    /// so this is not fatal.
    #[must_use]
    pub fn waypoints_for(&self, entry: &str, exit: &str) -> Option<Vec<Waypoint>> {
        let entry = self.entries.get(&entry.to_uppercase())?;
        let exit = self.exits.get(&exit.to_uppercase())?;
        Some(entry.iter().chain(&self.body).chain(exit).cloned().collect())
    }

    pub fn entries(&self) -> impl Iterator<Item = &str> { self.entries.keys().map(String::as_str) }

    pub fn exits(&self) -> impl Iterator<Item = &str> { self.exits.keys().map(String::as_str) }

    #[must_use]
    pub fn has_exits(&self) -> bool { !self.exits.is_empty() }
}

/// One waypoint of a resolved route, annotated with
/// the planar distance from its predecessor.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteLeg {
    pub waypoint: Waypoint,
    /// Zero for the first waypoint and across vector or unresolvable hops.
    pub distance: Length<f32>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("no procedure called {0:?}")]
    UnknownProcedure(String),
}

/// All procedures of the loaded airport, with a resolution cache.
#[derive(Default, Resource)]
pub struct Registry {
    definitions: HashMap<String, Arc<Definition>>,
    cache:       HashMap<String, Arc<[RouteLeg]>>,
}

impl Registry {
    pub fn insert(&mut self, definition: Definition) {
        self.definitions.insert(definition.icao.clone(), Arc::new(definition));
    }

    /// Case-insensitive lookup by full identifier, suffix included.
    #[must_use]
    pub fn find_by_icao(&self, icao: &str) -> Option<&Arc<Definition>> {
        self.definitions.get(&icao.to_uppercase())
    }

    /// Resolves an (icao, entry, exit) triple to an ordered leg list.
    ///
    /// Results are memoized per triple; resolution is deterministic
    /// and re-requested often. Unknown entry or exit keys degrade to
    /// an empty segment with a logged warning rather than failing,
    /// so an authoring mistake cannot take down a running session.
    ///
    /// # Errors
    /// If no procedure has the given identifier.
    pub fn resolve(
        &mut self,
        icao: &str,
        entry: &str,
        exit: &str,
        fixes: &fix::Registry,
    ) -> Result<Arc<[RouteLeg]>, ResolveError> {
        let key = format!("{}.{}.{}", icao.to_uppercase(), entry.to_uppercase(), exit.to_uppercase());
        if let Some(cached) = self.cache.get(&key) {
            return Ok(Arc::clone(cached));
        }

        let definition = self
            .find_by_icao(icao)
            .ok_or_else(|| ResolveError::UnknownProcedure(icao.to_string()))?;

        let waypoints = match definition.waypoints_for(entry, exit) {
            Some(waypoints) => waypoints,
            None => {
                bevy::log::warn!(
                    "procedure {:?} has no transition {entry:?} -> {exit:?}, \
                     substituting empty segments",
                    definition.icao,
                );
                let empty = Vec::new();
                let entry_segment =
                    definition.entries.get(&entry.to_uppercase()).unwrap_or(&empty);
                let exit_segment = definition.exits.get(&exit.to_uppercase()).unwrap_or(&empty);
                entry_segment.iter().chain(&definition.body).chain(exit_segment).cloned().collect()
            }
        };

        let legs: Arc<[RouteLeg]> = annotate_distances(waypoints, fixes).into();
        self.cache.insert(key, Arc::clone(&legs));
        Ok(legs)
    }

    /// Picks a random exit for the procedure, or the procedure's own
    /// identifier if it has none (single-path procedure).
    ///
    /// Returns `None` for an unknown identifier.
    pub fn random_exit(&self, icao: &str, rng: &mut impl rand::Rng) -> Option<String> {
        use rand::seq::IteratorRandom;

        let definition = self.find_by_icao(icao)?;
        if definition.has_exits() {
            definition.exits().choose(rng).map(str::to_string)
        } else {
            Some(definition.icao.clone())
        }
    }

    #[must_use]
    pub fn len(&self) -> usize { self.definitions.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.definitions.is_empty() }

    pub fn clear(&mut self) {
        self.definitions.clear();
        self.cache.clear();
    }
}

/// Annotates each waypoint with the distance from its predecessor.
///
/// Vector waypoints and fixes missing from the registry break the chain;
/// distance is never computed across such a hop.
fn annotate_distances(waypoints: Vec<Waypoint>, fixes: &fix::Registry) -> Vec<RouteLeg> {
    let mut previous: Option<Position<Vec2>> = None;
    waypoints
        .into_iter()
        .map(|waypoint| {
            let position = if waypoint.vector.is_some() {
                None
            } else {
                let found = fixes.get(&waypoint.name).map(|fix| fix.position);
                if found.is_none() {
                    bevy::log::warn!("route references unknown fix {:?}", waypoint.name);
                }
                found
            };

            let distance = match (previous, position) {
                (Some(from), Some(to)) => from.distance_exact(to),
                _ => Length::ZERO,
            };
            previous = position;

            RouteLeg { waypoint, distance }
        })
        .collect()
}
