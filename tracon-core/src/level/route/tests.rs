use math::Position;

use super::{Element, ParseError, hold_segment, parse, resolve, vector_segment};
use crate::level::{fix, procedure};

fn direct(name: &str) -> Element { Element::Direct(name.to_string()) }

fn proc(entry: &str, icao: &str, exit: &str) -> Element {
    Element::Procedure {
        entry: entry.to_string(),
        icao:  icao.to_string(),
        exit:  exit.to_string(),
    }
}

#[test]
fn direct_only() {
    assert_eq!(parse("A..B..C").unwrap(), vec![direct("A"), direct("B"), direct("C")]);
}

#[test]
fn single_procedure() {
    assert_eq!(parse("A.P.B").unwrap(), vec![proc("A", "P", "B")]);
}

#[test]
fn multilink_windows_share_fixes() {
    assert_eq!(parse("A.P.B.Q.C").unwrap(), vec![proc("A", "P", "B"), proc("B", "Q", "C")]);
}

#[test]
fn mixed_direct_and_procedure() {
    assert_eq!(
        parse("BOACH..MLF.GRNPA1.KLAS..@HITME").unwrap(),
        vec![direct("BOACH"), proc("MLF", "GRNPA1", "KLAS"), direct("@HITME")],
    );
}

#[test]
fn whitespace_is_rejected() {
    assert_eq!(
        parse("A .P.B").unwrap_err(),
        ParseError::Whitespace("A .P.B".to_string()),
    );
    parse("A..B C").unwrap_err();
}

#[test]
fn short_procedure_group_is_rejected() {
    assert_eq!(parse("A.P").unwrap_err(), ParseError::TooShort("A.P".to_string()));
    parse("A..").unwrap_err();
    parse("").unwrap_err();
}

#[test]
fn even_token_group_is_rejected() {
    assert_eq!(
        parse("A.P.B.Q").unwrap_err(),
        ParseError::Unbalanced("A.P.B.Q".to_string()),
    );
}

#[test]
fn marker_extraction() {
    assert_eq!(hold_segment("@MLF"), Some("MLF"));
    assert_eq!(hold_segment("MLF"), None);
    assert_eq!(vector_segment("#320"), Some("320"));
    assert_eq!(vector_segment("MLF"), None);
}

#[test]
fn resolve_direct_fixes() {
    let mut fixes = fix::Registry::default();
    fixes.insert("BOACH", Position::from_origin_nm(0., 0.));
    fixes.insert("MLF", Position::from_origin_nm(0., 10.));
    let mut procedures = procedure::Registry::default();

    let waypoints =
        resolve(&parse("BOACH..@MLF..#090").unwrap(), &mut procedures, &fixes).unwrap();
    assert_eq!(waypoints.len(), 3);
    assert_eq!(waypoints[0].name, "BOACH");
    assert!(waypoints[1].hold.is_some());
    assert!(waypoints[2].vector.is_some());
}

#[test]
fn resolve_unknown_direct_fix_fails() {
    let fixes = fix::Registry::default();
    let mut procedures = procedure::Registry::default();
    resolve(&parse("NOWHERE").unwrap(), &mut procedures, &fixes).unwrap_err();
}
