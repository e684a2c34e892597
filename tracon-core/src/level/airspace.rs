use bevy::app::{App, Plugin};
use bevy::ecs::resource::Resource;
use bevy::math::Vec2;
use math::{Position, alg2d};

pub struct Plug;

impl Plugin for Plug {
    fn build(&self, app: &mut App) { app.init_resource::<Airspace>(); }
}

/// The controlled airspace of the loaded airport.
#[derive(Default, Resource)]
pub struct Airspace {
    pub sectors: Vec<Sector>,
}

/// One sector of controlled airspace, projected onto the plane.
pub struct Sector {
    pub floor:    Position<f32>,
    pub ceiling:  Position<f32>,
    pub boundary: Vec<Position<Vec2>>,
}

impl Airspace {
    /// Whether the lateral point lies within any sector boundary,
    /// regardless of altitude.
    #[must_use]
    pub fn contains(&self, point: Position<Vec2>) -> bool {
        self.sectors.iter().any(|sector| alg2d::polygon_contains(&sector.boundary, point))
    }
}
