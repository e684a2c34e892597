use bevy_math::Vec2;

use super::{point_along, polygon_contains};
use crate::{Length, Position};

fn square() -> Vec<Position<Vec2>> {
    vec![
        Position::from_origin_nm(-10., -10.),
        Position::from_origin_nm(10., -10.),
        Position::from_origin_nm(10., 10.),
        Position::from_origin_nm(-10., 10.),
    ]
}

#[test]
fn polygon_contains_interior() {
    assert!(polygon_contains(&square(), Position::ORIGIN));
    assert!(polygon_contains(&square(), Position::from_origin_nm(9., -9.)));
}

#[test]
fn polygon_excludes_exterior() {
    assert!(!polygon_contains(&square(), Position::from_origin_nm(11., 0.)));
    assert!(!polygon_contains(&square(), Position::from_origin_nm(0., -10.5)));
    assert!(!polygon_contains(&square(), Position::from_origin_nm(-20., 20.)));
}

#[test]
fn polygon_concave() {
    // L-shape with a notch at the top right.
    let vertices = vec![
        Position::from_origin_nm(0., 0.),
        Position::from_origin_nm(10., 0.),
        Position::from_origin_nm(10., 5.),
        Position::from_origin_nm(5., 5.),
        Position::from_origin_nm(5., 10.),
        Position::from_origin_nm(0., 10.),
    ];
    assert!(polygon_contains(&vertices, Position::from_origin_nm(2., 8.)));
    assert!(!polygon_contains(&vertices, Position::from_origin_nm(8., 8.)));
}

#[test]
fn polygon_degenerate() {
    let two = &square()[..2];
    assert!(!polygon_contains(two, Position::ORIGIN));
}

#[test]
fn point_along_interpolates() {
    let start = Position::from_origin_nm(0., 0.);
    let end = Position::from_origin_nm(0., 10.);
    let mid = point_along(start, end, Length::from_nm(4.));
    assert!(mid.distance_exact(Position::from_origin_nm(0., 4.)).into_nm() < 1e-4);
    assert!((start.heading_towards(Position::from_origin_nm(10., 0.)).degrees() - 90.).abs() < 1e-3);
}
