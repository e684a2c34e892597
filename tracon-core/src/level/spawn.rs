use std::sync::Arc;
use std::time::Duration;

use bevy::app::{self, App, Plugin};
use bevy::ecs::component::Component;
use bevy::ecs::entity::Entity;
use bevy::ecs::message::{Message, MessageWriter};
use bevy::ecs::query::Added;
use bevy::ecs::schedule::IntoScheduleConfigs;
use bevy::ecs::system::{Commands, Local, Query, Res};
use bevy::math::Vec2;
use bevy::time::{Time, Virtual};
use math::{Heading, Length, Position, SECONDS_PER_HOUR, Speed, alg2d};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use store::{Category, WeightedList};

use crate::level::airspace::Airspace;
use crate::level::procedure::Waypoint;
use crate::level::{SystemSets, fix};

pub mod loader;


/// Minimum in-trail spacing between consecutive spawns on the same route.
pub const MIN_ENTRAIL_DISTANCE: Length<f32> = Length::from_nm(5.5);

/// Back-fill spacing below this threshold is applied exactly, without jitter.
const SMALLEST_INTERVAL: Length<f32> = Length::from_nm(15.);

/// The back-filled aircraft closest to the airspace spawns this far
/// short of the boundary.
const BOUNDARY_MARGIN: Length<f32> = Length::from_nm(3.);

/// Default cycle length for the periodic rate models.
const DEFAULT_PERIOD: f32 = 1800.;

pub struct Plug;

impl Plugin for Plug {
    fn build(&self, app: &mut App) {
        app.add_message::<Request>();
        app.add_systems(app::Update, arm_system.in_set(SystemSets::Arm));
        app.add_systems(app::Update, tick_system.in_set(SystemSets::Spawn));
    }
}

/// An airline operating a spawn pattern's route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Airline {
    /// ICAO airline code, e.g. `"AAL"`.
    pub icao:  String,
    /// Named sub-fleet of the airline, if specified as `"aal/long"`.
    pub fleet: Option<String>,
}

/// A traffic generation pattern loaded from the airport file.
///
/// Inserting this component arms the pattern; removing the
/// [`Schedule`] component stops it.
#[derive(Component)]
pub struct Pattern {
    pub category:     Category,
    /// The route string this pattern was built from.
    pub route_string: String,
    /// Resolved waypoint sequence every spawned aircraft follows.
    pub route:        Arc<[Waypoint]>,
    /// Average spawn rate in aircraft per hour.
    pub frequency:    f32,
    /// Initial speed of spawned aircraft.
    pub speed:        Speed<f32>,
    /// Initial altitude band, sampled uniformly
    /// and rounded to the nearest thousand feet.
    pub altitude_min: Position<f32>,
    pub altitude_max: Position<f32>,
    pub airlines:     WeightedList<Airline>,
    pub rate:         RateModel,
    /// Phase offset in seconds into the rate model's cycle at arm time.
    pub offset:       f32,
}

/// Pending spawn timer state. Presence of this component means the
/// pattern is armed; removal stops it and is always safe.
#[derive(Component)]
pub struct Schedule {
    /// Virtual elapsed time at which the next aircraft spawns.
    pub next_at: Duration,
    pub model:   RateModelState,
}

/// A request to create one aircraft, consumed by an external factory.
/// Creation failure is the factory's problem; there is no retry.
#[derive(Message)]
pub struct Request {
    pub pattern:       Entity,
    pub category:      Category,
    pub airline:       Option<Airline>,
    pub route:         Arc<[Waypoint]>,
    /// Spawn point on the plane. `None` for departures, which start
    /// on the ground at the airport.
    pub position:      Option<Position<Vec2>>,
    pub heading:       Option<Heading>,
    pub altitude:      Position<f32>,
    pub speed:         Speed<f32>,
    /// Index into `route` of the waypoint to fly towards first.
    pub next_waypoint: Option<usize>,
}

/// Distribution of spawn intervals over time. Immutable parameters;
/// the running clock state lives in [`RateModelState`].
#[derive(Debug, Clone, PartialEq)]
pub enum RateModel {
    /// Independent intervals drawn uniformly around the target,
    /// floored by the minimum in-trail separation.
    Random { target: f32, minimum: f32 },
    /// Triangular ramp over `period` with amplitude `variation`.
    Cyclic { frequency: f32, variation: f32, period: f32 },
    /// `frequency + variation * sin(tau * elapsed / period)`.
    Wave { frequency: f32, variation: f32, period: f32 },
    /// Alternating bursts at `interval_up` spacing and lulls at
    /// `interval_dn`, with `uptime` seconds of burst per period.
    Surge { period: f32, interval_up: f32, interval_dn: f32, uptime: f32 },
}

/// Clock state of an armed rate model.
///
/// Only mutated from within [`next_interval`](RateModelState::next_interval);
/// no other component reads or writes it.
#[derive(Debug, Clone, PartialEq)]
pub struct RateModelState {
    pub rate:        RateModel,
    /// Virtual time (seconds) at which the current cycle began.
    pub cycle_start: f32,
}

impl RateModel {
    /// Builds the model from a stored pattern, clamping rates that would
    /// violate the minimum in-trail separation. Clamping only reduces
    /// throughput and is permanent for the pattern's lifetime.
    #[must_use]
    pub fn build(pattern: &store::SpawnPattern) -> Self {
        let speed_knots = pattern.speed.into_knots();
        let mut frequency = pattern.frequency;
        let period = pattern.period.unwrap_or(DEFAULT_PERIOD);

        match pattern.kind {
            store::RateKind::Random => {
                let target = SECONDS_PER_HOUR / frequency;
                let minimum = MIN_ENTRAIL_DISTANCE.into_nm() / speed_knots * SECONDS_PER_HOUR;
                if minimum >= target {
                    bevy::log::warn!(
                        "spawn rate {frequency} acph violates minimum in-trail separation, \
                         spawning at fixed {minimum}s intervals",
                    );
                    Self::Random { target: minimum, minimum }
                } else {
                    Self::Random { target, minimum }
                }
            }
            store::RateKind::Cyclic => {
                Self::Cyclic { frequency, variation: pattern.variation, period }
            }
            store::RateKind::Wave => {
                let mut variation = pattern.variation;
                let max_frequency = speed_knots / MIN_ENTRAIL_DISTANCE.into_nm();
                if frequency > max_frequency {
                    bevy::log::warn!(
                        "wave rate {frequency} acph exceeds separation limit, \
                         clamping to {max_frequency} acph with no variation",
                    );
                    frequency = max_frequency;
                    variation = 0.;
                } else if frequency + variation > max_frequency {
                    bevy::log::warn!(
                        "wave peak rate {} acph exceeds separation limit, \
                         reducing variation to {}",
                        frequency + variation,
                        max_frequency - frequency,
                    );
                    variation = max_frequency - frequency;
                }
                Self::Wave { frequency, variation, period }
            }
            store::RateKind::Surge => {
                let entrail = pattern.entrail.unwrap_or(store::Range {
                    min: MIN_ENTRAIL_DISTANCE,
                    max: MIN_ENTRAIL_DISTANCE * 2.,
                });
                let acph_up = speed_knots / entrail.min.into_nm();
                let acph_dn = speed_knots / entrail.max.into_nm();
                if frequency > acph_up || frequency < acph_dn {
                    let clamped = frequency.clamp(acph_dn, acph_up);
                    bevy::log::warn!(
                        "surge rate {frequency} acph outside [{acph_dn}, {acph_up}], \
                         clamping to {clamped}",
                    );
                    frequency = clamped;
                }

                let interval_up = SECONDS_PER_HOUR / acph_up;
                let interval_dn = SECONDS_PER_HOUR / acph_dn;
                // time-weighted average over the period equals the target rate
                let mut uptime = period * (frequency - acph_dn) / (acph_up - acph_dn);
                uptime -= uptime % interval_up;
                Self::Surge { period, interval_up, interval_dn, uptime }
            }
        }
    }

    /// Starts the model's cycle clock with the pattern's phase offset.
    #[must_use]
    pub fn armed(self, now: f32, offset: f32) -> RateModelState {
        RateModelState { rate: self, cycle_start: now - offset }
    }
}

impl RateModelState {
    /// Seconds until the next spawn, advancing the cycle clock
    /// across period boundaries.
    pub fn next_interval(&mut self, now: f32, rng: &mut impl rand::Rng) -> f32 {
        match self.rate {
            RateModel::Random { target, minimum } => {
                if minimum >= target {
                    target
                } else {
                    rng.random_range(minimum..=2. * target - minimum)
                }
            }
            RateModel::Cyclic { frequency, variation, period } => {
                let quarter = period / 4.;
                let mut elapsed = now - self.cycle_start;
                while elapsed / quarter >= 4. {
                    self.cycle_start += period;
                    elapsed -= period;
                }
                let done = elapsed / quarter;

                let rate = if done <= 1. {
                    frequency + done * variation
                } else if done <= 2. {
                    frequency + 2. * (period - 2. * elapsed) / period * variation
                } else if done <= 3. {
                    frequency - (done - 2.) * variation
                } else {
                    frequency - 4. * (period - elapsed) / period * variation
                };
                SECONDS_PER_HOUR / rate
            }
            RateModel::Wave { frequency, variation, period } => {
                let elapsed = now - self.cycle_start;
                let rate = frequency
                    + variation * (std::f32::consts::TAU * elapsed / period).sin();
                SECONDS_PER_HOUR / rate
            }
            RateModel::Surge { period, interval_up, interval_dn, uptime } => {
                let mut elapsed = now - self.cycle_start;
                while elapsed >= period {
                    self.cycle_start += period;
                    elapsed -= period;
                }

                if elapsed < uptime {
                    interval_up
                } else {
                    // lull spacing, with the final gap shortened so the
                    // next burst starts on the period boundary
                    (period - elapsed).min(interval_dn)
                }
            }
        }
    }
}

/// Route distance from the first waypoint to the first waypoint
/// lying inside the airspace.
///
/// Vector waypoints and unknown fixes break distance accumulation;
/// the distance across such a hop is not counted.
#[must_use]
pub fn distance_to_airspace(
    route: &[Waypoint],
    fixes: &fix::Registry,
    airspace: &Airspace,
) -> Length<f32> {
    let mut total = Length::ZERO;
    let mut previous: Option<Position<Vec2>> = None;

    for waypoint in route {
        if waypoint.vector.is_some() {
            previous = None;
            continue;
        }
        let Some(fix) = fixes.get(&waypoint.name) else {
            bevy::log::warn!("route references unknown fix {:?}", waypoint.name);
            previous = None;
            continue;
        };
        if let Some(from) = previous {
            total += from.distance_exact(fix.position);
        }
        if airspace.contains(fix.position) {
            break;
        }
        previous = Some(fix.position);
    }
    total
}

/// Offsets (nm from route start) at which to back-fill aircraft
/// when a pattern starts, so the player is not kept waiting.
///
/// Always includes `0` and, when the route is long enough,
/// `total - 3`; intermediate offsets descend from the boundary
/// with jitter around `entrail` averaging to the target spacing.
pub fn backfill_offsets(
    total: Length<f32>,
    entrail: Length<f32>,
    rng: &mut impl rand::Rng,
) -> Vec<Length<f32>> {
    let mut offsets = Vec::new();
    let mut next = total - BOUNDARY_MARGIN;

    if entrail.is_positive() {
        while next.is_positive() {
            offsets.push(next);
            let step = if entrail <= SMALLEST_INTERVAL {
                entrail
            } else {
                let smallest = SMALLEST_INTERVAL.into_nm();
                Length::from_nm(rng.random_range(smallest..=2. * entrail.into_nm() - smallest))
            };
            next -= step;
        }
    } else if next.is_positive() {
        offsets.push(next);
    }

    offsets.push(Length::ZERO);
    offsets
}

/// Position, heading and next-waypoint index at `offset` nm along the route.
///
/// Returns `None` if the offset runs past the last resolvable leg.
#[must_use]
pub fn point_along_route(
    route: &[Waypoint],
    fixes: &fix::Registry,
    offset: Length<f32>,
) -> Option<(Position<Vec2>, Heading, usize)> {
    let mut remaining = offset;
    let mut previous: Option<(Position<Vec2>, usize)> = None;

    for (index, waypoint) in route.iter().enumerate() {
        if waypoint.vector.is_some() {
            previous = None;
            continue;
        }
        let position = fixes.get(&waypoint.name)?.position;

        if let Some((from, _)) = previous {
            let leg = from.distance_exact(position);
            if remaining <= leg {
                let point = alg2d::point_along(from, position, remaining);
                return Some((point, from.heading_towards(position), index));
            }
            remaining -= leg;
        }
        previous = Some((position, index));
    }
    None
}

fn arm_system(
    mut commands: Commands,
    time: Res<Time<Virtual>>,
    patterns: Query<(Entity, &Pattern), Added<Pattern>>,
    fixes: Res<fix::Registry>,
    airspace: Res<Airspace>,
    mut requests: MessageWriter<Request>,
    mut rng: Local<Option<SmallRng>>,
) {
    let rng = rng.get_or_insert_with(|| SmallRng::from_rng(&mut rand::rng()));
    let now = time.elapsed();

    for (entity, pattern) in &patterns {
        if pattern.category == Category::Arrival {
            backfill(entity, pattern, &fixes, &airspace, &mut requests, rng);
        }

        let delay = rng.random_range(0.0..=SECONDS_PER_HOUR / pattern.frequency);
        commands.entity(entity).insert(Schedule {
            next_at: now + Duration::from_secs_f32(delay),
            model:   pattern.rate.clone().armed(now.as_secs_f32(), pattern.offset),
        });
    }
}

fn backfill(
    entity: Entity,
    pattern: &Pattern,
    fixes: &fix::Registry,
    airspace: &Airspace,
    requests: &mut MessageWriter<Request>,
    rng: &mut SmallRng,
) {
    let total = distance_to_airspace(&pattern.route, fixes, airspace);
    let entrail = Length::from_nm(pattern.speed.into_knots() / pattern.frequency);

    for offset in backfill_offsets(total, entrail, rng) {
        let (position, heading, next_waypoint) = crate::try_log!(
            point_along_route(&pattern.route, fixes, offset),
            expect "cannot back-fill route {:?} at offset {}nm"
                (pattern.route_string, offset.into_nm())
            or continue
        );
        requests.write(make_request(
            entity,
            pattern,
            Some(position),
            Some(heading),
            Some(next_waypoint),
            rng,
        ));
    }
}

fn tick_system(
    time: Res<Time<Virtual>>,
    mut schedules: Query<(Entity, &Pattern, &mut Schedule)>,
    fixes: Res<fix::Registry>,
    mut requests: MessageWriter<Request>,
    mut rng: Local<Option<SmallRng>>,
) {
    if time.is_paused() {
        return;
    }
    let rng = rng.get_or_insert_with(|| SmallRng::from_rng(&mut rand::rng()));
    let now = time.elapsed();

    for (entity, pattern, mut schedule) in &mut schedules {
        while now >= schedule.next_at {
            let placement = match pattern.category {
                Category::Arrival => point_along_route(&pattern.route, &fixes, Length::ZERO),
                Category::Departure => None,
            };
            let (position, heading, next_waypoint) = match placement {
                Some((position, heading, next)) => (Some(position), Some(heading), Some(next)),
                None => (None, None, None),
            };
            requests.write(make_request(entity, pattern, position, heading, next_waypoint, rng));

            // each interval is computed at the scheduled spawn time, so
            // catching up over several spawns in one frame keeps the
            // model's phase; intervals are at least one second so a
            // degenerate rate cannot wedge this loop
            let at = schedule.next_at.as_secs_f32();
            let interval = schedule.model.next_interval(at, rng).max(1.);
            schedule.next_at += Duration::from_secs_f32(interval);
        }
    }
}

fn make_request(
    entity: Entity,
    pattern: &Pattern,
    position: Option<Position<Vec2>>,
    heading: Option<Heading>,
    next_waypoint: Option<usize>,
    rng: &mut impl rand::Rng,
) -> Request {
    Request {
        pattern: entity,
        category: pattern.category,
        airline: pattern.airlines.sample(rng).cloned(),
        route: Arc::clone(&pattern.route),
        position,
        heading,
        altitude: sample_altitude(pattern.altitude_min, pattern.altitude_max, rng),
        speed: pattern.speed,
        next_waypoint,
    }
}

/// Uniform altitude within the band, rounded to the nearest thousand feet.
fn sample_altitude(
    min: Position<f32>,
    max: Position<f32>,
    rng: &mut impl rand::Rng,
) -> Position<f32> {
    let min_feet = min.amsl().into_feet();
    let max_feet = max.amsl().into_feet();
    let feet = if max_feet > min_feet {
        rng.random_range(min_feet..=max_feet)
    } else {
        min_feet
    };
    Position::from_amsl_feet((feet / 1000.).round() * 1000.)
}
