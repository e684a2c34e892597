//! Route resolution and traffic generation.

use bevy::app::{self, App, Plugin};
use bevy::ecs::schedule::IntoScheduleConfigs;
use bevy::prelude::SystemSet;
use itertools::Itertools;
use strum::IntoEnumIterator;

pub mod airspace;
pub mod fix;
pub mod procedure;
pub mod route;
pub mod spawn;

pub struct Plug;

impl Plugin for Plug {
    fn build(&self, app: &mut App) {
        for (before, after) in SystemSets::iter().tuple_windows() {
            app.configure_sets(app::Update, before.before(after));
        }

        app.add_plugins(fix::Plug);
        app.add_plugins(airspace::Plug);
        app.add_plugins(procedure::Plug);
        app.add_plugins(spawn::Plug);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SystemSet, strum::EnumIter)]
pub enum SystemSets {
    /// Activates newly added spawn patterns,
    /// back-filling arrival routes with initial traffic.
    Arm,
    /// Emits aircraft creation requests when spawn timers expire.
    Spawn,
}
