use serde::{Deserialize, Serialize};

/// result of reverse-geocoding one trip endpoint. a point that falls outside
/// the covered region, or whose lookup fails for any reason, carries the
/// Unresolved sentinel; corridor predicates never match that sentinel, so
/// such trips are excluded rather than mislabeled.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneLabel {
    Resolved { borough: String, zone: String },
    Unresolved,
}

impl ZoneLabel {
    /// spelling of the sentinel in the labeled trip caches
    pub const NA: &'static str = "NA";

    pub fn resolved(borough: &str, zone: &str) -> ZoneLabel {
        ZoneLabel::Resolved {
            borough: String::from(borough),
            zone: String::from(zone),
        }
    }

    /// reconstructs a label from cache columns, mapping the NA/NA pair back
    /// to the sentinel.
    pub fn from_fields(borough: &str, zone: &str) -> ZoneLabel {
        if borough == Self::NA && zone == Self::NA {
            ZoneLabel::Unresolved
        } else {
            ZoneLabel::resolved(borough, zone)
        }
    }

    pub fn zone(&self) -> Option<&str> {
        match self {
            ZoneLabel::Resolved { zone, .. } => Some(zone),
            ZoneLabel::Unresolved => None,
        }
    }

    pub fn borough(&self) -> Option<&str> {
        match self {
            ZoneLabel::Resolved { borough, .. } => Some(borough),
            ZoneLabel::Unresolved => None,
        }
    }

    pub fn zone_or_na(&self) -> &str {
        self.zone().unwrap_or(Self::NA)
    }

    pub fn borough_or_na(&self) -> &str {
        self.borough().unwrap_or(Self::NA)
    }

    /// true if this label is resolved and its zone appears in the given region
    pub fn zone_in(&self, region: &[String]) -> bool {
        match self.zone() {
            Some(z) => region.iter().any(|name| name == z),
            None => false,
        }
    }

    pub fn zone_is(&self, name: &str) -> bool {
        self.zone() == Some(name)
    }

    pub fn borough_is(&self, name: &str) -> bool {
        self.borough() == Some(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unresolved_never_matches() {
        let label = ZoneLabel::Unresolved;
        let region = vec![String::from("Astoria"), String::from("Astoria Park")];
        assert!(!label.zone_in(&region));
        assert!(!label.zone_is("Astoria"));
        assert!(!label.borough_is("Manhattan"));
        assert!(!label.borough_is(ZoneLabel::NA));
        assert!(!label.zone_is(ZoneLabel::NA));
    }

    #[test]
    fn test_field_round_trip() {
        let label = ZoneLabel::resolved("Queens", "Astoria");
        assert_eq!(
            ZoneLabel::from_fields(label.borough_or_na(), label.zone_or_na()),
            label
        );
        let na = ZoneLabel::Unresolved;
        assert_eq!(ZoneLabel::from_fields(na.borough_or_na(), na.zone_or_na()), na);
    }
}
