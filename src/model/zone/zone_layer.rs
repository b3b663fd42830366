use std::path::Path;

use geo::{BoundingRect, Contains};
use rstar::{RTree, RTreeObject, AABB};

use crate::model::TaxipoolError;

/// one polygonal zone feature with its integer id from the source layer.
#[derive(Debug, Clone)]
pub struct ZoneFeature {
    pub location_id: u32,
    polygon: geo::MultiPolygon<f64>,
    envelope: AABB<[f64; 2]>,
}

impl ZoneFeature {
    pub fn new(location_id: u32, polygon: geo::MultiPolygon<f64>) -> Result<ZoneFeature, TaxipoolError> {
        let rect = polygon.bounding_rect().ok_or_else(|| {
            TaxipoolError::OtherError(format!(
                "zone feature {location_id} has an empty geometry, cannot compute bounding box"
            ))
        })?;
        let envelope = AABB::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y]);
        Ok(ZoneFeature {
            location_id,
            polygon,
            envelope,
        })
    }

    pub fn contains(&self, point: &geo::Point<f64>) -> bool {
        self.polygon.contains(point)
    }
}

impl RTreeObject for ZoneFeature {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// the loaded zone polygon layer, spatially indexed on feature bounding boxes
/// for cheap candidate selection before the exact containment test. read-only
/// for the lifetime of a run and shareable across parallel readers.
#[derive(Debug)]
pub struct ZoneLayer {
    rtree: RTree<ZoneFeature>,
}

impl ZoneLayer {
    /// the shapefile attribute holding each zone's integer id
    pub const ID_FIELD: &'static str = "LocationID";

    pub fn from_features(features: Vec<ZoneFeature>) -> ZoneLayer {
        ZoneLayer {
            rtree: RTree::bulk_load(features),
        }
    }

    /// reads zone polygons from an ESRI shapefile, indexing each polygonal
    /// shape by its LocationID attribute. non-polygonal shapes are an error.
    pub fn from_shapefile(path: &Path) -> Result<ZoneLayer, TaxipoolError> {
        let layer_err = |message: String| TaxipoolError::ZoneLayerError {
            path: path.to_string_lossy().to_string(),
            message,
        };
        let rows = shapefile::read(path).map_err(|e| layer_err(format!("{e}")))?;

        let mut features = vec![];
        for (idx, (shape, record)) in rows.into_iter().enumerate() {
            let polygon: geo::MultiPolygon<f64> = match shape {
                shapefile::Shape::Polygon(p) => p
                    .try_into()
                    .map_err(|e| layer_err(format!("failed converting polygon at row {idx}: {e}")))?,
                shapefile::Shape::PolygonM(p) => p
                    .try_into()
                    .map_err(|e| layer_err(format!("failed converting polygon at row {idx}: {e}")))?,
                _ => {
                    return Err(layer_err(format!(
                        "unexpected shape type {} at row {idx}, zone layers must be polygonal",
                        shape.shapetype()
                    )))
                }
            };
            let field = record
                .get(Self::ID_FIELD)
                .ok_or_else(|| layer_err(format!("field {} missing at row {idx}", Self::ID_FIELD)))?;
            let location_id = match field {
                shapefile::dbase::FieldValue::Numeric(Some(n)) => *n as u32,
                shapefile::dbase::FieldValue::Character(Some(s)) => {
                    s.trim().parse::<u32>().map_err(|e| {
                        layer_err(format!("non-integer {} at row {idx}: {e}", Self::ID_FIELD))
                    })?
                }
                other => {
                    return Err(layer_err(format!(
                        "field {} has unexpected type '{}' at row {idx}",
                        Self::ID_FIELD,
                        other.field_type()
                    )))
                }
            };
            features.push(ZoneFeature::new(location_id, polygon)?);
        }
        log::debug!("loaded {} zone features from {:?}", features.len(), path);
        Ok(ZoneLayer::from_features(features))
    }

    /// finds the first feature containing the given layer-space point.
    pub fn locate(&self, x: f64, y: f64) -> Option<u32> {
        let point = geo::Point::new(x, y);
        self.rtree
            .locate_in_envelope_intersecting(&AABB::from_point([x, y]))
            .find(|feature| feature.contains(&point))
            .map(|feature| feature.location_id)
    }

    pub fn len(&self) -> usize {
        self.rtree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.rtree.size() == 0
    }
}
