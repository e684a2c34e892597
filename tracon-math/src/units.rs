use std::f32::consts::{FRAC_PI_2, PI, TAU};
use std::time::Duration;
use std::{iter, ops};

use bevy_math::{Dir2, Vec2, VectorSpace};

use crate::{FEET_PER_NM, METERS_PER_NM, SECONDS_PER_HOUR};

mod heading;
pub use heading::{Heading, TurnDirection};
mod position;
pub use position::Position;

#[cfg(test)]
mod tests;

macro_rules! decl_units {
    ($(
        $(#[$meta:meta])*
        $ty:ident
        $([Rate<$int_dt:ident>])?
        ,
    )*) => { $(
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
        #[derive(serde::Serialize, serde::Deserialize)]
        pub struct $ty<T>(pub T);

        impl<T> $ty<T> {
            pub const fn new(value: T) -> Self { Self(value) }

            pub fn into_raw(self) -> T { self.0 }
        }

        impl<T: ops::AddAssign> ops::Add for $ty<T> {
            type Output = Self;

            fn add(mut self, other: Self) -> Self {
                self.0 += other.0;
                self
            }
        }

        impl<T: ops::AddAssign> ops::AddAssign for $ty<T> {
            fn add_assign(&mut self, other: Self) { self.0 += other.0; }
        }

        impl<T: ops::SubAssign> ops::Sub for $ty<T> {
            type Output = Self;

            fn sub(mut self, other: Self) -> Self {
                self.0 -= other.0;
                self
            }
        }

        impl<T: ops::SubAssign> ops::SubAssign for $ty<T> {
            fn sub_assign(&mut self, other: Self) { self.0 -= other.0; }
        }

        impl<T: ops::MulAssign<f32>> ops::Mul<f32> for $ty<T> {
            type Output = Self;

            fn mul(mut self, other: f32) -> Self {
                self.0 *= other;
                self
            }
        }

        impl<T: ops::MulAssign<f32>> ops::MulAssign<f32> for $ty<T> {
            fn mul_assign(&mut self, other: f32) { self.0 *= other; }
        }

        impl<T: ops::DivAssign<f32>> ops::Div<f32> for $ty<T> {
            type Output = Self;

            fn div(mut self, other: f32) -> Self {
                self.0 /= other;
                self
            }
        }

        impl<T: ops::DivAssign<f32>> ops::DivAssign<f32> for $ty<T> {
            fn div_assign(&mut self, other: f32) { self.0 /= other; }
        }

        impl<T: ops::Div> ops::Div for $ty<T> {
            type Output = T::Output;

            fn div(self, other: Self) -> Self::Output { self.0 / other.0 }
        }

        impl<T: ops::RemAssign<T>> ops::Rem for $ty<T> {
            type Output = Self;

            fn rem(mut self, other: Self) -> Self {
                self.0 %= other.0;
                self
            }
        }

        impl<T: ops::Neg<Output = T>> ops::Neg for $ty<T> {
            type Output = Self;

            fn neg(self) -> Self { Self(-self.0) }
        }

        impl<T: Default + ops::AddAssign> iter::Sum for $ty<T> {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                iter.fold(Self::default(), |sum, value| sum + value)
            }
        }

        impl<T: VectorSpace<Scalar = f32>> $ty<T> {
            pub const ZERO: Self = Self(T::ZERO);

            #[must_use]
            pub fn lerp(self, other: Self, s: f32) -> Self { Self(self.0.lerp(other.0, s)) }
        }

        impl $ty<f32> {
            #[must_use]
            pub fn is_positive(self) -> bool { self.0 > 0. }

            #[must_use]
            pub fn is_negative(self) -> bool { self.0 < 0. }

            #[must_use]
            pub fn is_zero(self) -> bool { self.0 == 0. }

            #[must_use]
            pub fn abs(self) -> Self { Self(self.0.abs()) }

            #[must_use]
            pub fn signum(self) -> f32 { self.0.signum() }

            /// Inverse lerp function.
            #[must_use]
            pub fn ratio_between(self, start: Self, end: Self) -> f32 {
                (self - start).0 / (end - start).0
            }

            #[must_use]
            pub fn min(self, other: Self) -> Self { Self(self.0.min(other.0)) }

            #[must_use]
            pub fn max(self, other: Self) -> Self { Self(self.0.max(other.0)) }

            #[must_use]
            pub fn clamp(self, min: Self, max: Self) -> Self {
                Self(self.0.clamp(min.0, max.0))
            }

            #[must_use]
            pub fn with_heading(self, heading: Heading) -> $ty<Vec2> {
                $ty(heading.into_dir2() * self.0)
            }
        }

        impl ops::Mul<Dir2> for $ty<f32> {
            type Output = $ty<Vec2>;

            fn mul(self, other: Dir2) -> $ty<Vec2> { $ty(other * self.0) }
        }

        impl $ty<Vec2> {
            #[must_use]
            pub fn x(self) -> $ty<f32> { $ty(self.0.x) }
            #[must_use]
            pub fn y(self) -> $ty<f32> { $ty(self.0.y) }

            #[must_use]
            pub fn heading(self) -> Heading { Heading::from_vec2(self.0) }

            #[must_use]
            pub fn magnitude_exact(self) -> $ty<f32> { $ty(self.0.length()) }

            /// Rotates the vector clockwise by `angle`.
            #[must_use]
            pub fn rotated_clockwise(self, angle: Angle) -> Self {
                Self(Vec2::from_angle(-angle.0).rotate(self.0))
            }
        }

        $(
            impl<T: ops::Mul<f32, Output = T>> ops::Mul<Duration> for $ty<T> {
                type Output = $int_dt<T>;

                fn mul(self, other: Duration) -> $int_dt<T> {
                    $int_dt(self.0 * other.as_secs_f32())
                }
            }
        )?
    )* };
}

decl_units! {
    /// A distance quantity. Always in nautical miles.
    Length,

    /// A linear speed (rate of [length](Length) change) quantity.
    /// Always in nm/s.
    Speed[Rate<Length>],
}

/// A relative angle. Always in radians.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Angle(pub f32);

impl Length<f32> {
    pub const fn from_nm(nm: f32) -> Self { Self(nm) }

    #[must_use]
    pub const fn into_nm(self) -> f32 { self.0 }

    #[must_use]
    pub fn from_feet(feet: f32) -> Self { Self(feet / FEET_PER_NM) }

    #[must_use]
    pub fn into_feet(self) -> f32 { self.0 * FEET_PER_NM }

    #[must_use]
    pub fn from_km(km: f32) -> Self { Self(km * 1000. / METERS_PER_NM) }

    #[must_use]
    pub fn into_km(self) -> f32 { self.0 * METERS_PER_NM / 1000. }

    /// Time to cover this length at `speed`.
    ///
    /// Returns zero rather than panicking when `speed` is not positive.
    #[must_use]
    pub fn time_at(self, speed: Speed<f32>) -> Duration {
        Duration::try_from_secs_f32(self.0 / speed.0).unwrap_or(Duration::ZERO)
    }
}

impl<T: ops::Mul<f32, Output = T> + ops::Div<f32, Output = T>> Speed<T> {
    #[must_use]
    pub fn into_knots(self) -> T { self.0 * SECONDS_PER_HOUR }

    pub fn from_knots(knots: T) -> Self { Self(knots / SECONDS_PER_HOUR) }
}

impl Angle {
    pub const ZERO: Self = Self(0.);
    pub const RIGHT: Self = Self(FRAC_PI_2);
    pub const STRAIGHT: Self = Self(PI);
    pub const FULL: Self = Self(TAU);

    #[must_use]
    pub fn from_degrees(degrees: f32) -> Self { Self(degrees.to_radians()) }

    #[must_use]
    pub fn into_degrees(self) -> f32 { self.0.to_degrees() }

    #[must_use]
    pub const fn from_radians(radians: f32) -> Self { Self(radians) }

    #[must_use]
    pub const fn into_radians(self) -> f32 { self.0 }

    #[must_use]
    pub fn sin(self) -> f32 { self.0.sin() }

    #[must_use]
    pub fn cos(self) -> f32 { self.0.cos() }

    #[must_use]
    pub fn abs(self) -> Self { Self(self.0.abs()) }
}

impl ops::Add for Angle {
    type Output = Self;

    fn add(self, other: Self) -> Self { Self(self.0 + other.0) }
}

impl ops::AddAssign for Angle {
    fn add_assign(&mut self, other: Self) { self.0 += other.0; }
}

impl ops::Sub for Angle {
    type Output = Self;

    fn sub(self, other: Self) -> Self { Self(self.0 - other.0) }
}

impl ops::SubAssign for Angle {
    fn sub_assign(&mut self, other: Self) { self.0 -= other.0; }
}

impl ops::Neg for Angle {
    type Output = Self;

    fn neg(self) -> Self { Self(-self.0) }
}

impl ops::Mul<f32> for Angle {
    type Output = Self;

    fn mul(self, other: f32) -> Self { Self(self.0 * other) }
}

impl ops::Rem for Angle {
    type Output = Self;

    fn rem(self, other: Self) -> Self { Self(self.0 % other.0) }
}
