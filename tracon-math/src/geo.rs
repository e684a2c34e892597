use bevy_math::Vec2;

use crate::{Angle, EARTH_RADIUS_NM, Length, Position};

/// A geographic coordinate in decimal degrees, as authored in airport files.
///
/// Serializes as a `[latitude, longitude]` pair.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "[f32; 2]", into = "[f32; 2]")]
pub struct GeoPoint {
    /// Latitude in degrees, north positive.
    pub latitude:  f32,
    /// Longitude in degrees, east positive.
    pub longitude: f32,
}

impl From<[f32; 2]> for GeoPoint {
    fn from([latitude, longitude]: [f32; 2]) -> Self { Self { latitude, longitude } }
}

impl From<GeoPoint> for [f32; 2] {
    fn from(point: GeoPoint) -> Self { [point.latitude, point.longitude] }
}

impl GeoPoint {
    /// Projects this coordinate onto the flat plane centered at `reference`,
    /// with `magnetic_north` rotating the plane so that +y points to magnetic north.
    ///
    /// Equirectangular projection; adequate within terminal-airspace distances.
    #[must_use]
    pub fn project(self, reference: GeoPoint, magnetic_north: Angle) -> Position<Vec2> {
        let dlat = (self.latitude - reference.latitude).to_radians();
        let dlon = (self.longitude - reference.longitude).to_radians();
        let mid_lat = reference.latitude.to_radians();

        let east = dlon * mid_lat.cos() * EARTH_RADIUS_NM;
        let north = dlat * EARTH_RADIUS_NM;

        let true_offset = Length(Vec2::new(east, north));
        Position::ORIGIN + true_offset.rotated_clockwise(-magnetic_north)
    }
}

#[cfg(test)]
mod tests {
    use super::GeoPoint;
    use crate::Angle;

    #[test]
    fn project_cardinal_offsets() {
        let reference = GeoPoint { latitude: 36., longitude: -115. };

        // One degree of latitude is 60nm northward.
        let north = GeoPoint { latitude: 37., longitude: -115. };
        let pos = north.project(reference, Angle::ZERO);
        assert!((pos.get().y - 60.).abs() < 0.2, "got {}", pos.get().y);
        assert!(pos.get().x.abs() < 1e-3);

        // One degree of longitude shrinks with latitude.
        let east = GeoPoint { latitude: 36., longitude: -114. };
        let pos = east.project(reference, Angle::ZERO);
        assert!((pos.get().x - 60. * 36f32.to_radians().cos()).abs() < 0.2);
        assert!(pos.get().y.abs() < 1e-3);
    }

    #[test]
    fn project_magnetic_rotation() {
        let reference = GeoPoint { latitude: 36., longitude: -115. };
        let north = GeoPoint { latitude: 37., longitude: -115. };

        // With 90 degrees of easterly declination, magnetic north points true east,
        // so a true-north offset lands on the -x side of the magnetic plane.
        let pos = north.project(reference, Angle::from_degrees(90.));
        assert!((pos.get().x + 60.).abs() < 0.2, "got {}", pos.get().x);
        assert!(pos.get().y.abs() < 0.2);
    }
}
