//! Route-string parsing and resolution.
//!
//! Route strings use two separator levels: `..` joins direct segments,
//! while `.` joins the start/procedure/end tokens of a procedure segment,
//! e.g. `"BOACH..MLF.GRNPA1.KLAS"`.

use crate::level::procedure::{self, Waypoint};
use crate::level::fix;

#[cfg(test)]
mod tests;

/// One segment of a parsed route string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    /// Fly direct to a fix (possibly `@`/`#`/`^` prefixed).
    Direct(String),
    /// Fly a procedure from `entry` to `exit`.
    Procedure { entry: String, icao: String, exit: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Whitespace is the outer command delimiter and must never
    /// appear inside a route string.
    #[error("route string {0:?} contains whitespace")]
    Whitespace(String),
    /// A `.`-joined group needs at least start, procedure and end tokens.
    #[error("procedure segment {0:?} has fewer than 3 parts")]
    TooShort(String),
    /// Multi-link segments must alternate fixes and procedures,
    /// so their token count is always odd.
    #[error("procedure segment {0:?} does not alternate fixes and procedures")]
    Unbalanced(String),
}

/// Splits a route string into resolvable segments.
///
/// Multi-link procedure groups like `"A.P1.B.P2.C"` become successive
/// three-token windows sharing their joining fix: `A.P1.B` then `B.P2.C`.
///
/// # Errors
/// See [`ParseError`].
pub fn parse(route: &str) -> Result<Vec<Element>, ParseError> {
    if route.contains(char::is_whitespace) {
        return Err(ParseError::Whitespace(route.to_string()));
    }

    let mut elements = Vec::new();
    for group in route.split("..") {
        if !group.contains('.') {
            if group.is_empty() {
                return Err(ParseError::TooShort(group.to_string()));
            }
            elements.push(Element::Direct(group.to_string()));
            continue;
        }

        let tokens: Vec<&str> = group.split('.').collect();
        if tokens.len() < 3 || tokens.contains(&"") {
            return Err(ParseError::TooShort(group.to_string()));
        }
        if tokens.len() % 2 == 0 {
            return Err(ParseError::Unbalanced(group.to_string()));
        }

        for window in (0..tokens.len() - 2).step_by(2) {
            elements.push(Element::Procedure {
                entry: tokens[window].to_string(),
                icao:  tokens[window + 1].to_string(),
                exit:  tokens[window + 2].to_string(),
            });
        }
    }
    Ok(elements)
}

/// Strips the `@` hold marker from a direct segment, if present.
#[must_use]
pub fn hold_segment(segment: &str) -> Option<&str> { segment.strip_prefix('@') }

/// Strips the `#` vector marker from a direct segment, if present,
/// yielding the heading token in degrees.
#[must_use]
pub fn vector_segment(segment: &str) -> Option<&str> { segment.strip_prefix('#') }

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error(transparent)]
    Procedure(#[from] procedure::ResolveError),
    #[error(transparent)]
    Waypoint(#[from] procedure::ParseError),
    #[error(transparent)]
    UnknownFix(#[from] fix::UnknownFix),
}

/// Resolves parsed elements into a flat waypoint sequence.
///
/// Direct fixes must exist in the registry; fixes referenced from
/// inside a procedure degrade softly at use time instead.
///
/// # Errors
/// See [`ResolveError`].
pub fn resolve(
    elements: &[Element],
    procedures: &mut procedure::Registry,
    fixes: &fix::Registry,
) -> Result<Vec<Waypoint>, ResolveError> {
    let mut waypoints = Vec::new();
    for element in elements {
        match element {
            Element::Direct(name) => {
                let waypoint = Waypoint::from_name(name)?;
                if waypoint.vector.is_none() {
                    fixes.resolve(&waypoint.name)?;
                }
                waypoints.push(waypoint);
            }
            Element::Procedure { entry, icao, exit } => {
                let legs = procedures.resolve(icao, entry, exit, fixes)?;
                waypoints.extend(legs.iter().map(|leg| leg.waypoint.clone()));
            }
        }
    }
    Ok(waypoints)
}
