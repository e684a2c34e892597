use bevy::ecs::name::Name;
use bevy::ecs::world::{Mut, World};

use crate::level::spawn::{Airline, Pattern, RateModel};
use crate::level::{fix, procedure, route};
use crate::load::{self, StoredEntity};

/// Spawns one pattern entity per stored spawn pattern.
///
/// # Errors
/// If a pattern has invalid rate parameters or an unresolvable route.
pub fn load(world: &mut World, airport: &store::Airport) -> load::Result<()> {
    let patterns = world.resource_scope(|world, mut procedures: Mut<procedure::Registry>| {
        let fixes = world.resource::<fix::Registry>();
        airport
            .spawn_patterns
            .iter()
            .map(|stored| build(stored, &mut procedures, fixes))
            .collect::<load::Result<Vec<_>>>()
    })?;

    for pattern in patterns {
        let name = Name::new(format!("SpawnPattern: {}", pattern.route_string));
        world.spawn((StoredEntity, name, pattern));
    }
    Ok(())
}

fn build(
    stored: &store::SpawnPattern,
    procedures: &mut procedure::Registry,
    fixes: &fix::Registry,
) -> load::Result<Pattern> {
    let route = stored.route.clone();
    if stored.frequency <= 0. || !stored.frequency.is_finite() {
        return Err(load::Error::NonPositiveFrequency { route });
    }
    if stored.speed.into_knots() <= 0. {
        return Err(load::Error::NonPositiveSpeed { route });
    }
    if matches!(stored.kind, store::RateKind::Cyclic | store::RateKind::Wave)
        && (stored.variation < 0. || stored.variation >= stored.frequency)
    {
        return Err(load::Error::ExcessiveVariation { route });
    }
    if matches!(stored.kind, store::RateKind::Surge)
        && let Some(entrail) = stored.entrail
        && (!entrail.min.is_positive() || entrail.min > entrail.max)
    {
        return Err(load::Error::InvalidEntrail { route });
    }

    let elements = route::parse(&stored.route)
        .map_err(|source| load::Error::RouteSyntax { route: stored.route.clone(), source })?;
    let waypoints = route::resolve(&elements, procedures, fixes)
        .map_err(|source| load::Error::RouteResolve { route: stored.route.clone(), source })?;

    let airlines = stored
        .airlines
        .try_map_ref(|spec| Ok::<_, load::Error>(parse_airline(spec)))?;

    Ok(Pattern {
        category: stored.category,
        route_string: stored.route.clone(),
        route: waypoints.into(),
        frequency: stored.frequency,
        speed: stored.speed,
        altitude_min: stored.altitude.min,
        altitude_max: stored.altitude.max,
        airlines,
        rate: RateModel::build(stored),
        offset: stored.offset,
    })
}

/// Splits an `"icao/fleet"` airline spec into its parts.
fn parse_airline(spec: &str) -> Airline {
    match spec.split_once('/') {
        Some((icao, fleet)) => {
            Airline { icao: icao.to_uppercase(), fleet: Some(fleet.to_string()) }
        }
        None => Airline { icao: spec.to_uppercase(), fleet: None },
    }
}
