use std::borrow::Cow;

use bevy::ecs::component::Component;
use bevy::ecs::entity::Entity;
use bevy::ecs::query::With;
use bevy::ecs::system::Command as BevyCommand;
use bevy::ecs::world::World;
use math::Position;

use crate::level::airspace::{Airspace, Sector};
use crate::level::{fix, procedure, route, spawn};


/// Marks an entity as part of a loaded airport,
/// so it is removed when loading another one.
#[derive(Component)]
pub struct StoredEntity;

pub enum Source {
    Raw(Cow<'static, [u8]>),
    Parsed(Box<store::Airport>),
}

pub struct Command {
    pub source:   Source,
    pub on_error: Box<dyn FnOnce(&mut World, Error) + Send>,
}

impl BevyCommand for Command {
    fn apply(self, world: &mut World) {
        if let Err(err) = do_load(world, &self.source) {
            (self.on_error)(world, err);
        }
    }
}

fn do_load(world: &mut World, source: &Source) -> Result<()> {
    let airport_owned: store::Airport;
    let airport = match source {
        Source::Raw(bytes) => {
            airport_owned = serde_json::from_slice(bytes).map_err(Error::Serde)?;
            &airport_owned
        }
        Source::Parsed(airport) => airport,
    };

    world
        .query_filtered::<Entity, With<StoredEntity>>()
        .iter(world)
        .collect::<Vec<_>>()
        .into_iter()
        .for_each(|entity| world.entity_mut(entity).despawn());

    load_fixes(world, airport);
    load_airspace(world, airport);
    procedure::loader::load(world, airport)?;
    spawn::loader::load(world, airport)?;

    Ok(())
}

fn load_fixes(world: &mut World, airport: &store::Airport) {
    let mut registry = world.resource_mut::<fix::Registry>();
    registry.clear();
    for (name, point) in &airport.fixes {
        registry.insert(name, point.project(airport.position, airport.magnetic_north));
    }
    // the airport itself is addressable as a fix at the reference point,
    // so arrival routes may end in the airport icao
    registry.insert(&airport.icao, Position::ORIGIN);
}

fn load_airspace(world: &mut World, airport: &store::Airport) {
    let mut airspace = world.resource_mut::<Airspace>();
    airspace.sectors = airport
        .airspace
        .iter()
        .map(|sector| Sector {
            floor:    sector.floor,
            ceiling:  sector.ceiling,
            boundary: sector
                .poly
                .iter()
                .map(|point| point.project(airport.position, airport.magnetic_north))
                .collect(),
        })
        .collect();
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("deserialization error: {0}")]
    Serde(serde_json::Error),
    #[error("procedure {icao:?}: {source}")]
    Procedure { icao: String, source: procedure::ParseError },
    #[error("suffix of procedure {icao:?} references unknown runway {runway:?}")]
    UnknownSuffixRunway { icao: String, runway: String },
    #[error("spawn route {route:?}: {source}")]
    RouteSyntax { route: String, source: route::ParseError },
    #[error("spawn route {route:?}: {source}")]
    RouteResolve { route: String, source: route::ResolveError },
    #[error("spawn pattern for route {route:?} must have positive frequency")]
    NonPositiveFrequency { route: String },
    #[error("spawn pattern for route {route:?} must have positive speed")]
    NonPositiveSpeed { route: String },
    #[error("spawn pattern for route {route:?} has variation exceeding its frequency")]
    ExcessiveVariation { route: String },
    #[error("spawn pattern for route {route:?} has an invalid in-trail separation band")]
    InvalidEntrail { route: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
