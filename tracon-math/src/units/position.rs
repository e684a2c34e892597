use std::ops;

use bevy_math::{Vec2, VectorSpace};

use super::{Heading, Length};

/// A point quantity, distinguished from the displacement vector [`Length`].
///
/// `Position<Vec2>` is a horizontal point relative to the airport reference;
/// `Position<f32>` is an altitude above mean sea level.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
pub struct Position<T>(pub Length<T>);

impl<T> Position<T> {
    pub const fn new(value: T) -> Self { Position(Length(value)) }

    pub fn get(self) -> T { self.0.0 }
}

impl<T: ops::AddAssign> ops::Add<Length<T>> for Position<T> {
    type Output = Self;

    fn add(mut self, rhs: Length<T>) -> Self::Output {
        self.0 += rhs;
        self
    }
}

impl<T: ops::AddAssign> ops::AddAssign<Length<T>> for Position<T> {
    fn add_assign(&mut self, rhs: Length<T>) { self.0 += rhs; }
}

impl<T: ops::SubAssign> ops::Sub<Length<T>> for Position<T> {
    type Output = Self;

    fn sub(mut self, rhs: Length<T>) -> Self::Output {
        self.0 -= rhs;
        self
    }
}

impl<T: ops::SubAssign> ops::Sub for Position<T> {
    type Output = Length<T>;

    fn sub(self, rhs: Self) -> Length<T> { self.0 - rhs.0 }
}

impl<T: VectorSpace<Scalar = f32>> Position<T> {
    #[must_use]
    pub fn lerp(self, other: Self, s: f32) -> Self { Self(self.0.lerp(other.0, s)) }
}

impl Position<f32> {
    pub const SEA_LEVEL: Self = Self(Length(0.));

    #[must_use]
    pub fn from_amsl_feet(feet: f32) -> Self { Self(Length::from_feet(feet)) }

    #[must_use]
    pub fn amsl(self) -> Length<f32> { self - Self::SEA_LEVEL }

    /// Inverse lerp function.
    #[must_use]
    pub fn ratio_between(self, start: Self, end: Self) -> f32 {
        self.0.ratio_between(start.0, end.0)
    }

    #[must_use]
    pub fn min(self, other: Self) -> Self { Self(self.0.min(other.0)) }

    #[must_use]
    pub fn max(self, other: Self) -> Self { Self(self.0.max(other.0)) }
}

impl Position<Vec2> {
    pub const ORIGIN: Self = Self(Length(Vec2::ZERO));

    #[must_use]
    pub fn from_origin_nm(x: f32, y: f32) -> Self { Self(Length(Vec2 { x, y })) }

    #[must_use]
    pub fn x(self) -> Position<f32> { Position(self.0.x()) }

    #[must_use]
    pub fn y(self) -> Position<f32> { Position(self.0.y()) }

    #[must_use]
    pub fn distance_exact(self, other: Self) -> Length<f32> { (self - other).magnitude_exact() }

    /// Bearing from this point towards `other`.
    #[must_use]
    pub fn heading_towards(self, other: Self) -> Heading { (other - self).heading() }
}
