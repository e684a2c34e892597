use bevy_math::Vec2;

use super::{Heading, TurnDirection};
use crate::Angle;

fn assert_almost_eq(left: Heading, right: Heading, message: &str) {
    let delta = (left.radians() - right.radians()).abs();
    assert!(
        delta.0 < 1e-4 || (Angle::FULL - delta).abs().0 < 1e-4,
        "{left:?} != {right:?}: {message}"
    );
}

#[test]
fn heading_from_vec2() {
    assert_almost_eq(Heading::from_vec2(Vec2::new(1., 0.)), Heading::EAST, "(1, 0) is eastward");
    assert_almost_eq(Heading::from_vec2(Vec2::new(-1., 0.)), Heading::WEST, "(-1, 0) is westward");
    assert_almost_eq(Heading::from_vec2(Vec2::new(0., 1.)), Heading::NORTH, "(0, 1) is northward");
    assert_almost_eq(
        Heading::from_vec2(Vec2::new(0., -1.)),
        Heading::SOUTH,
        "(0, -1) is southward",
    );
}

#[test]
fn heading_from_degrees() {
    assert_almost_eq(Heading::from_degrees(-90.), Heading::WEST, "-90 degrees is westward");
    assert_almost_eq(Heading::from_degrees(-270.), Heading::EAST, "-270 degrees is eastward");
    assert_almost_eq(Heading::from_degrees(-360.), Heading::NORTH, "-360 degrees is northward");
    assert_almost_eq(Heading::from_degrees(90.), Heading::EAST, "90 degrees is eastward");
    assert_almost_eq(Heading::from_degrees(270.), Heading::WEST, "270 degrees is westward");
    assert_almost_eq(Heading::from_degrees(360.), Heading::NORTH, "360 degrees is northward");
    assert_almost_eq(Heading::from_degrees(180.), Heading::SOUTH, "180 degrees is southward");
    assert_almost_eq(Heading::from_degrees(0.), Heading::NORTH, "0 degrees is northward");
}

#[test]
fn heading_degrees_range() {
    let west = Heading::from_degrees(270.);
    assert!((west.degrees() - 270.).abs() < 1e-3, "degrees() reports 0..360");

    let north = Heading::from_degrees(0.);
    assert!(north.degrees().abs() < 1e-3 || (north.degrees() - 360.).abs() < 1e-3);
}

#[test]
fn heading_distance() {
    let cw = Heading::WEST.distance(Heading::NORTH, TurnDirection::Clockwise);
    assert!((cw - Angle::RIGHT).abs().0 < 1e-4, "90 degrees right from west to north");

    let ccw = Heading::WEST.distance(Heading::NORTH, TurnDirection::CounterClockwise);
    assert!((ccw + Angle::RIGHT * 3.).abs().0 < 1e-4, "270 degrees left from west to north");
}

#[test]
fn heading_opposite() {
    assert_almost_eq(Heading::NORTH.opposite(), Heading::SOUTH, "north reverses to south");
    assert_almost_eq(Heading::EAST.opposite(), Heading::WEST, "east reverses to west");
}
