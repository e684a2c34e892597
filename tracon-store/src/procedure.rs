use std::collections::HashMap;

/// An instrument procedure (SID or STAR) as authored in an airport file.
///
/// Whether a procedure is a departure or an arrival is determined by
/// which map of [`Airport`](crate::Airport) it appears in.
#[derive(Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Procedure {
    /// Published identifier of the procedure, e.g. `"GRNPA1"`.
    pub icao: String,
    /// Spoken name of the procedure, e.g. `"Grandpa One"`.
    pub name: String,
    /// Runway-specific segments, keyed by runway name.
    ///
    /// For a SID these are entry segments flown first;
    /// for a STAR they are exit segments flown last.
    /// An empty waypoint list is a valid transition with no extra waypoints.
    #[serde(default)]
    pub rwy: HashMap<String, Vec<WaypointEntry>>,
    /// Waypoints common to every variant of the procedure.
    #[serde(default)]
    pub body: Vec<WaypointEntry>,
    /// Named entry transitions of a STAR, flown before the body.
    #[serde(default)]
    pub entry_points: HashMap<String, Vec<WaypointEntry>>,
    /// Named exit transitions of a SID, flown after the body.
    #[serde(default)]
    pub exit_points: HashMap<String, Vec<WaypointEntry>>,
    /// Fix name sequences used for chart rendering only.
    ///
    /// Names may carry a trailing `*` to mark a dashed segment.
    #[serde(default)]
    pub draw: Vec<Vec<String>>,
    /// Suffixed variants of the procedure, keyed by suffix string,
    /// with the runway each variant is restricted to as value.
    #[serde(default)]
    pub suffix: HashMap<String, String>,
}

/// One waypoint reference in a procedure segment.
///
/// Either a bare fix name, or a fix name paired with a restriction string
/// such as `"A100+|S250-"`.
#[derive(Clone, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum WaypointEntry {
    /// A fix name with no restrictions.
    Bare(String),
    /// A fix name with a restriction string.
    Restricted(String, String),
}

impl WaypointEntry {
    /// The referenced fix name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Bare(name) | Self::Restricted(name, _) => name,
        }
    }

    /// The restriction string, if any.
    #[must_use]
    pub fn restriction(&self) -> Option<&str> {
        match self {
            Self::Bare(_) => None,
            Self::Restricted(_, restriction) => Some(restriction),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::WaypointEntry;

    #[test]
    fn waypoint_entry_forms() {
        let bare: WaypointEntry = serde_json::from_str(r#""MLF""#).unwrap();
        assert_eq!(bare.name(), "MLF");
        assert_eq!(bare.restriction(), None);

        let restricted: WaypointEntry = serde_json::from_str(r#"["BOACH", "A80+|A120-"]"#).unwrap();
        assert_eq!(restricted.name(), "BOACH");
        assert_eq!(restricted.restriction(), Some("A80+|A120-"));
    }
}
