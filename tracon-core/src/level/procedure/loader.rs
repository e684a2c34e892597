use std::collections::HashMap;

use bevy::ecs::world::World;

use crate::level::procedure::{self, Definition, Kind, Waypoint};
use crate::load;

/// Builds all procedure definitions from an airport file,
/// expanding suffixed variants into standalone definitions.
///
/// # Errors
/// If any procedure contains malformed waypoint data.
pub fn load(world: &mut World, airport: &store::Airport) -> load::Result<()> {
    let mut registry = world.resource_mut::<procedure::Registry>();
    registry.clear();

    for (kind, procedures) in [(Kind::Sid, &airport.sids), (Kind::Star, &airport.stars)] {
        for procedure in procedures.values() {
            for definition in expand(kind, procedure)? {
                registry.insert(definition);
            }
        }
    }
    Ok(())
}

/// The base definition plus one definition per suffix key,
/// each suffixed variant restricted to a single runway
/// and identified by the concatenated icao.
///
/// # Errors
/// If the procedure contains malformed waypoint data
/// or a suffix references a runway with no segment.
pub fn expand(kind: Kind, procedure: &store::Procedure) -> load::Result<Vec<Definition>> {
    let mut definitions = vec![build(kind, procedure, None)?];
    for (suffix, runway) in &procedure.suffix {
        definitions.push(build(kind, procedure, Some((suffix, runway)))?);
    }
    Ok(definitions)
}

fn build(
    kind: Kind,
    procedure: &store::Procedure,
    variant: Option<(&str, &str)>,
) -> load::Result<Definition> {
    let rwy = match variant {
        None => segments(&procedure.rwy, &procedure.icao)?,
        Some((_, runway)) => {
            let Some((key, entries)) = procedure.rwy.get_key_value(runway) else {
                return Err(load::Error::UnknownSuffixRunway {
                    icao:   procedure.icao.clone(),
                    runway: runway.to_string(),
                });
            };
            HashMap::from([(key.to_uppercase(), segment(entries, &procedure.icao)?)])
        }
    };

    let (entries, exits) = match kind {
        Kind::Sid => (rwy, segments(&procedure.exit_points, &procedure.icao)?),
        Kind::Star => (segments(&procedure.entry_points, &procedure.icao)?, rwy),
    };

    let icao = match variant {
        None => procedure.icao.to_uppercase(),
        Some((suffix, _)) => format!("{}{suffix}", procedure.icao).to_uppercase(),
    };

    Ok(Definition {
        icao,
        name: procedure.name.clone(),
        kind,
        entries,
        body: segment(&procedure.body, &procedure.icao)?,
        exits,
    })
}

fn segments(
    map: &HashMap<String, Vec<store::WaypointEntry>>,
    icao: &str,
) -> load::Result<HashMap<String, Vec<Waypoint>>> {
    map.iter().map(|(key, entries)| Ok((key.to_uppercase(), segment(entries, icao)?))).collect()
}

fn segment(entries: &[store::WaypointEntry], icao: &str) -> load::Result<Vec<Waypoint>> {
    entries
        .iter()
        .map(|entry| {
            Waypoint::parse(entry)
                .map_err(|source| load::Error::Procedure { icao: icao.to_string(), source })
        })
        .collect()
}
