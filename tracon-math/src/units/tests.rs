use super::{Length, Position};

#[test]
fn lerp_midpoint() {
    let start = Position::from_origin_nm(0., 0.);
    let end = Position::from_origin_nm(10., 0.);
    let mid = start.lerp(end, 0.5);
    assert!(mid.distance_exact(Position::from_origin_nm(5., 0.)).into_nm() < 1e-4);

    let quarter = Length::ZERO.lerp(Length::from_nm(8.), 0.25);
    assert!((quarter.into_nm() - 2.).abs() < 1e-4);
}
