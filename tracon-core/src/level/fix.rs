use std::collections::HashMap;

use bevy::app::{App, Plugin};
use bevy::ecs::resource::Resource;
use bevy::math::Vec2;
use math::Position;

pub struct Plug;

impl Plugin for Plug {
    fn build(&self, app: &mut App) { app.init_resource::<Registry>(); }
}

/// A named navigation fix on the projected plane.
#[derive(Debug, Clone)]
pub struct Fix {
    /// Canonical (uppercase) name of the fix.
    pub name:     String,
    /// Location of the fix relative to the airport reference.
    pub position: Position<Vec2>,
}

impl Fix {
    /// Name shown to the user.
    ///
    /// Fixes prefixed with `_` are unpublished RNAV points
    /// and are labelled generically.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.starts_with('_') { "RNAV" } else { &self.name }
    }
}

/// All fixes available for route construction.
///
/// Lookup is case-insensitive.
#[derive(Default, Resource)]
pub struct Registry {
    fixes: HashMap<String, Fix>,
}

impl Registry {
    pub fn insert(&mut self, name: &str, position: Position<Vec2>) {
        let name = name.to_uppercase();
        self.fixes.insert(name.clone(), Fix { name, position });
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Fix> { self.fixes.get(&name.to_uppercase()) }

    /// # Errors
    /// If no fix has the given name.
    pub fn resolve(&self, name: &str) -> Result<&Fix, UnknownFix> {
        self.get(name).ok_or_else(|| UnknownFix(name.to_string()))
    }

    #[must_use]
    pub fn len(&self) -> usize { self.fixes.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.fixes.is_empty() }

    pub fn clear(&mut self) { self.fixes.clear(); }
}

#[derive(Debug, thiserror::Error)]
#[error("no fix called {0:?}")]
pub struct UnknownFix(pub String);
