use std::f32::consts::{FRAC_PI_2, PI};
use std::fmt;

use bevy_math::{Dir2, Vec2};
use ordered_float::{FloatIsNan, NotNan};

use super::Angle;

#[cfg(test)]
mod tests;

/// An absolute directional bearing.
#[derive(Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Heading(
    Angle, // always -PI < heading <= PI
);

impl Heading {
    /// Heading north.
    pub const NORTH: Self = Self(Angle(0.));
    /// Heading east.
    pub const EAST: Self = Self(Angle(FRAC_PI_2));
    /// Heading south.
    pub const SOUTH: Self = Self(Angle(PI));
    /// Heading west.
    pub const WEST: Self = Self(Angle(-FRAC_PI_2));

    /// Returns the heading of the vector.
    ///
    /// Returns a NaN heading if and only if the argument is zero or contains NaN components.
    #[must_use]
    pub fn from_vec2(vec: Vec2) -> Self { Self(Angle(vec.x.atan2(vec.y))) }

    /// Converts the heading into a direction vector.
    #[must_use]
    pub fn into_dir2(self) -> Dir2 {
        let (x, y) = self.0.0.sin_cos();
        Dir2::from_xy_unchecked(x, y)
    }

    /// Creates a heading from an absolute bearing in degrees.
    #[must_use]
    pub fn from_degrees(degrees: f32) -> Self { Self::from_radians(Angle::from_degrees(degrees)) }

    /// Returns the heading in degrees in the range 0..360.
    #[must_use]
    pub fn degrees(self) -> f32 {
        let degrees = self.0.into_degrees();
        if degrees < 0. { degrees + 360. } else { degrees }
    }

    /// Creates a heading from an absolute bearing in radians.
    #[must_use]
    pub fn from_radians(radians: Angle) -> Self {
        let mut radians = Angle(radians.0 % Angle::FULL.0);
        if radians > Angle::STRAIGHT {
            radians -= Angle::FULL;
        } else if radians <= -Angle::STRAIGHT {
            radians += Angle::FULL;
        }
        Self(radians)
    }

    /// Returns the heading in radians in the range `-STRAIGHT < value <= STRAIGHT`.
    #[must_use]
    pub fn radians(self) -> Angle { self.0 }

    /// Returns the heading as an ordered value.
    ///
    /// # Errors
    /// Returns an error if the heading is NaN.
    pub fn as_ordered(self) -> Result<impl Copy + Ord, FloatIsNan> { NotNan::new(self.0.0) }

    /// The heading in the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self { Self::from_radians(self.0 + Angle::STRAIGHT) }

    /// Radians to turn from `self` to `other` in the given direction.
    /// The output is always in the range `[0, FULL)` for `Clockwise`,
    /// or `(-FULL, 0]` for `CounterClockwise`.
    #[must_use]
    pub fn distance(self, other: Heading, dir: TurnDirection) -> Angle {
        let mut output = (other.0 - self.0) % Angle::FULL;
        match dir {
            TurnDirection::Clockwise => {
                if output.0 < 0. {
                    output += Angle::FULL;
                }
            }
            TurnDirection::CounterClockwise => {
                if output.0 > 0. {
                    output -= Angle::FULL;
                }
            }
        }

        output
    }
}

impl fmt::Debug for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Heading({:.1}°)", self.degrees())
    }
}

/// Direction to turn through when entering a holding pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TurnDirection {
    /// A right/standard turn.
    Clockwise,
    /// A left turn.
    CounterClockwise,
}
