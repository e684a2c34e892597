use std::collections::HashMap;
use std::sync::Arc;

use math::Position;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::{Kind, ParseError, Registry, ResolveError, Waypoint, loader};
use crate::level::fix;

fn bare(name: &str) -> store::WaypointEntry { store::WaypointEntry::Bare(name.to_string()) }

fn restricted(name: &str, restriction: &str) -> store::WaypointEntry {
    store::WaypointEntry::Restricted(name.to_string(), restriction.to_string())
}

fn feet(value: f32) -> Position<f32> { Position::from_amsl_feet(value) }

#[test]
fn altitude_exact_sets_both_bounds() {
    let waypoint = Waypoint::parse(&restricted("BOACH", "A80")).unwrap();
    assert_eq!(waypoint.altitude.min, Some(feet(8000.)));
    assert_eq!(waypoint.altitude.max, Some(feet(8000.)));
    assert!(!waypoint.speed.is_some());
}

#[test]
fn altitude_range() {
    let waypoint = Waypoint::parse(&restricted("BOACH", "A80+|A120-")).unwrap();
    assert_eq!(waypoint.altitude.min, Some(feet(8000.)));
    assert_eq!(waypoint.altitude.max, Some(feet(12000.)));
    assert_eq!(waypoint.speed.min, None);
    assert_eq!(waypoint.speed.max, None);
}

#[test]
fn speed_restrictions() {
    let waypoint = Waypoint::parse(&restricted("LUXOR", "A110|S250-")).unwrap();
    assert_eq!(waypoint.altitude.min, Some(feet(11000.)));
    assert_eq!(waypoint.speed.max, Some(math::Speed::from_knots(250.)));
    assert_eq!(waypoint.speed.min, None);
    assert!(waypoint.altitude.max_below(feet(11500.)));
    assert!(!waypoint.altitude.min_above(feet(11500.)));
}

#[test]
fn malformed_restrictions() {
    for token in ["A80*", "Q100", "A", "S", ""] {
        let err = Waypoint::parse(&restricted("BOACH", token)).unwrap_err();
        assert_eq!(err, ParseError::Restriction(token.to_string()), "token {token:?}");
    }
}

#[test]
fn name_prefixes() {
    let fly_over = Waypoint::from_name("^BOACH").unwrap();
    assert!(fly_over.fly_over);
    assert_eq!(fly_over.name, "BOACH");

    let hold = Waypoint::from_name("@MLF").unwrap();
    assert!(hold.hold.is_some());
    assert_eq!(hold.name, "MLF");

    let vector = Waypoint::from_name("#320").unwrap();
    let heading = vector.vector.expect("vector prefix should parse a heading");
    assert!((heading.degrees() - 320.).abs() < 1e-3);
    assert_eq!(vector.name, "320");

    Waypoint::from_name("#north").unwrap_err();
}

fn grnpa1() -> store::Procedure {
    store::Procedure {
        icao: "GRNPA1".to_string(),
        name: "Grandpa One".to_string(),
        rwy: HashMap::from([("19R".to_string(), vec![]), ("19L".to_string(), vec![])]),
        body: vec![
            bare("DVC"),
            restricted("BETHL", "A170"),
            restricted("HOLDM", "A140"),
            restricted("KSINO", "A130"),
            restricted("LUXOR", "A110|S250-"),
            restricted("GRNPA", "A110"),
            restricted("DUKET", "A100"),
        ],
        entry_points: HashMap::from([
            ("MLF".to_string(), vec![bare("MLF")]),
            ("BCE".to_string(), vec![bare("BCE"), restricted("KSINO", "A170")]),
        ]),
        ..store::Procedure::default()
    }
}

fn registry_with(procedure: &store::Procedure, kind: Kind) -> Registry {
    let mut registry = Registry::default();
    for definition in loader::expand(kind, procedure).unwrap() {
        registry.insert(definition);
    }
    registry
}

fn fixes_for(names: &[&str]) -> fix::Registry {
    let mut fixes = fix::Registry::default();
    for (index, name) in names.iter().enumerate() {
        #[expect(clippy::cast_precision_loss, reason = "tiny test indices")]
        fixes.insert(name, Position::from_origin_nm(0., index as f32 * 10.));
    }
    fixes
}

#[test]
fn star_resolves_entry_body_exit() {
    let mut registry = registry_with(&grnpa1(), Kind::Star);
    let fixes =
        fixes_for(&["MLF", "DVC", "BETHL", "HOLDM", "KSINO", "LUXOR", "GRNPA", "DUKET", "BCE"]);

    let legs = registry.resolve("GRNPA1", "MLF", "19R", &fixes).unwrap();
    assert_eq!(legs.len(), 8);
    assert_eq!(legs[0].waypoint.name, "MLF");
    assert_eq!(legs[0].distance, math::Length::ZERO);
    assert!(legs[1].distance.is_positive());
}

#[test]
fn resolution_is_memoized() {
    let mut registry = registry_with(&grnpa1(), Kind::Star);
    let fixes = fixes_for(&["MLF"]);

    let first = registry.resolve("grnpa1", "mlf", "19r", &fixes).unwrap();
    let second = registry.resolve("GRNPA1", "MLF", "19R", &fixes).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn unknown_procedure_fails() {
    let mut registry = registry_with(&grnpa1(), Kind::Star);
    let err = registry.resolve("NOPE1", "MLF", "19R", &fix::Registry::default()).unwrap_err();
    assert_eq!(err, ResolveError::UnknownProcedure("NOPE1".to_string()));
}

#[test]
fn unknown_transition_degrades_to_empty_segment() {
    let mut registry = registry_with(&grnpa1(), Kind::Star);
    let legs = registry.resolve("GRNPA1", "NOWHERE", "19R", &fix::Registry::default()).unwrap();
    // body plus the empty runway segment only
    assert_eq!(legs.len(), 7);
}

#[test]
fn suffix_expansion() {
    let mut procedure = grnpa1();
    procedure.rwy = (1..=8)
        .map(|index| (format!("{index:02}"), vec![]))
        .collect();
    procedure.suffix = (1..=8)
        .map(|index| (format!("{index}A"), format!("{index:02}")))
        .collect();

    let definitions = loader::expand(Kind::Star, &procedure).unwrap();
    assert_eq!(definitions.len(), 9);

    for definition in &definitions[1..] {
        assert_eq!(definition.exits().count(), 1, "suffixed {}", definition.icao);
    }

    let mut registry = Registry::default();
    for definition in definitions {
        registry.insert(definition);
    }
    let suffixed = registry.find_by_icao("grnpa11a").expect("case-insensitive suffixed lookup");
    assert_eq!(suffixed.icao, "GRNPA11A");
    assert_eq!(suffixed.exits().collect::<Vec<_>>(), vec!["01"]);
}

#[test]
fn suffix_with_unknown_runway_fails() {
    let mut procedure = grnpa1();
    procedure.suffix = HashMap::from([("1A".to_string(), "36C".to_string())]);
    loader::expand(Kind::Star, &procedure).unwrap_err();
}

#[test]
fn random_exit_prefers_exit_keys() {
    let registry = registry_with(&grnpa1(), Kind::Star);
    let mut rng = SmallRng::seed_from_u64(7);
    let exit = registry.random_exit("GRNPA1", &mut rng).unwrap();
    assert!(exit == "19R" || exit == "19L");
}

#[test]
fn random_exit_falls_back_to_own_icao() {
    // a SID with no exit points is a single-path procedure
    let mut procedure = grnpa1();
    procedure.icao = "TRALR6".to_string();
    let registry = registry_with(&procedure, Kind::Sid);
    let mut rng = SmallRng::seed_from_u64(7);
    assert_eq!(registry.random_exit("TRALR6", &mut rng).unwrap(), "TRALR6");
}

#[test]
fn hold_parameter_backfill() {
    let mut hold = Waypoint::from_name("@MLF").unwrap();
    let parameters = super::HoldParameters {
        inbound_heading: Some(math::Heading::from_degrees(180.)),
        ..super::HoldParameters::default()
    };
    hold.set_hold_parameters(parameters);
    assert_eq!(hold.hold.unwrap().inbound_heading, Some(math::Heading::from_degrees(180.)));

    let mut plain = Waypoint::from_name("MLF").unwrap();
    plain.set_hold_parameters(parameters);
    assert_eq!(plain.hold, None);
}
