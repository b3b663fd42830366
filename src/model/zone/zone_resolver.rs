use super::{LayerCrs, ZoneLabel, ZoneLayer, ZoneLookup};
use crate::model::CityBounds;

/// reverse-geocoder for trip endpoints: maps a WGS84 (longitude, latitude)
/// pair to the (borough, zone) of the containing taxi zone polygon.
///
/// resolution is a pure function of the point and the loaded layer state.
/// every failure mode degrades to [`ZoneLabel::Unresolved`] rather than an
/// error: points outside the metro bounding box are rejected before any
/// geometry work, and a failed projection, containment miss, or missing
/// lookup id all yield the sentinel.
#[derive(Debug)]
pub struct ZoneResolver {
    layer: ZoneLayer,
    lookup: ZoneLookup,
    bounds: CityBounds,
    crs: LayerCrs,
}

impl ZoneResolver {
    pub fn new(layer: ZoneLayer, lookup: ZoneLookup, bounds: CityBounds, crs: LayerCrs) -> ZoneResolver {
        ZoneResolver {
            layer,
            lookup,
            bounds,
            crs,
        }
    }

    pub fn resolve(&self, lon: f64, lat: f64) -> ZoneLabel {
        if !self.bounds.contains(lon, lat) {
            return ZoneLabel::Unresolved;
        }
        let (x, y) = match self.crs.forward(lon, lat) {
            Some(projected) => projected,
            None => return ZoneLabel::Unresolved,
        };
        match self.layer.locate(x, y).and_then(|id| self.lookup.get(id)) {
            Some((borough, zone)) => ZoneLabel::resolved(borough, zone),
            None => ZoneLabel::Unresolved,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::zone::{ZoneFeature, ZoneLookupRow};
    use geo::polygon;

    /// one square zone covering lon/lat [-74.0, -73.9] x [40.7, 40.8],
    /// registered as LocationID 7 = (Queens, Astoria)
    fn test_resolver() -> ZoneResolver {
        let square = polygon![
            (x: -74.0, y: 40.7),
            (x: -73.9, y: 40.7),
            (x: -73.9, y: 40.8),
            (x: -74.0, y: 40.8),
            (x: -74.0, y: 40.7),
        ];
        let feature = ZoneFeature::new(7, geo::MultiPolygon(vec![square])).unwrap();
        let lookup = ZoneLookup::from_rows(vec![
            ZoneLookupRow {
                location_id: 7,
                borough: String::from("Queens"),
                zone: String::from("Astoria"),
            },
            ZoneLookupRow {
                location_id: 9,
                borough: String::from("Manhattan"),
                zone: String::from("Midtown Center"),
            },
        ]);
        ZoneResolver::new(
            ZoneLayer::from_features(vec![feature]),
            lookup,
            CityBounds::default(),
            LayerCrs::Wgs84,
        )
    }

    #[test]
    fn test_point_outside_bounds_short_circuits() {
        let resolver = test_resolver();
        // Chicago: outside the NYC bounding box, rejected before geometry
        assert_eq!(resolver.resolve(-87.63, 41.88), ZoneLabel::Unresolved);
        // inside the bounding box but east of the only polygon
        assert_eq!(resolver.resolve(-73.7, 40.75), ZoneLabel::Unresolved);
    }

    #[test]
    fn test_point_inside_polygon_resolves() {
        let resolver = test_resolver();
        assert_eq!(
            resolver.resolve(-73.95, 40.75),
            ZoneLabel::resolved("Queens", "Astoria")
        );
    }

    #[test]
    fn test_resolution_is_consistent_across_calls() {
        let resolver = test_resolver();
        let first = resolver.resolve(-73.95, 40.75);
        for _ in 0..10 {
            assert_eq!(resolver.resolve(-73.95, 40.75), first);
        }
    }

    #[test]
    fn test_missing_lookup_id_degrades_to_unresolved() {
        let square = polygon![
            (x: -74.0, y: 40.7),
            (x: -73.9, y: 40.7),
            (x: -73.9, y: 40.8),
            (x: -74.0, y: 40.8),
            (x: -74.0, y: 40.7),
        ];
        let feature = ZoneFeature::new(99, geo::MultiPolygon(vec![square])).unwrap();
        let resolver = ZoneResolver::new(
            ZoneLayer::from_features(vec![feature]),
            ZoneLookup::default(),
            CityBounds::default(),
            LayerCrs::Wgs84,
        );
        assert_eq!(resolver.resolve(-73.95, 40.75), ZoneLabel::Unresolved);
    }
}
