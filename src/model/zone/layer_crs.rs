use serde::{Deserialize, Serialize};

/// coordinate reference system of the zone polygon layer. incoming trip
/// coordinates are always WGS84 (EPSG:4326) lon/lat; when the layer uses a
/// different system, points are projected forward before containment testing.
///
/// the nyc.gov taxi zone shapefile ships in EPSG:2263 (NAD83 / New York Long
/// Island, US survey feet), a Lambert conformal conic projection. the forward
/// transform is computed directly from the EPSG 2SP formulas rather than
/// linking libproj.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LayerCrs {
    /// layer coordinates are already WGS84 lon/lat
    Wgs84,
    /// NAD83 / New York Long Island, US survey feet (EPSG:2263)
    #[default]
    NyLongIslandFt,
}

// GRS80 ellipsoid
const SEMI_MAJOR_M: f64 = 6_378_137.0;
const ECC_SQ: f64 = 0.006_694_380_022_903_416;

// EPSG:2263 projection parameters
const LAT_ORIGIN_DEG: f64 = 40.166_666_666_666_664; // 40°10'N
const LON_ORIGIN_DEG: f64 = -74.0;
const STD_PARALLEL_1_DEG: f64 = 41.033_333_333_333_33; // 41°02'N
const STD_PARALLEL_2_DEG: f64 = 40.666_666_666_666_664; // 40°40'N
const FALSE_EASTING_FT: f64 = 984_250.0;
const FALSE_NORTHING_FT: f64 = 0.0;

// one US survey foot is 1200/3937 meters exactly
const FT_US_PER_M: f64 = 3937.0 / 1200.0;

impl LayerCrs {
    /// projects a WGS84 lon/lat point into the layer's coordinate system.
    /// returns None when the transform produces a non-finite result.
    pub fn forward(&self, lon: f64, lat: f64) -> Option<(f64, f64)> {
        match self {
            LayerCrs::Wgs84 => Some((lon, lat)),
            LayerCrs::NyLongIslandFt => lcc_forward(lon, lat),
        }
    }
}

/// Lambert conformal conic 2SP forward projection (EPSG method 9802) with the
/// EPSG:2263 parameters, producing easting/northing in US survey feet.
fn lcc_forward(lon: f64, lat: f64) -> Option<(f64, f64)> {
    let e = ECC_SQ.sqrt();
    let phi = lat.to_radians();
    let phi_0 = LAT_ORIGIN_DEG.to_radians();
    let phi_1 = STD_PARALLEL_1_DEG.to_radians();
    let phi_2 = STD_PARALLEL_2_DEG.to_radians();
    let lambda = lon.to_radians();
    let lambda_0 = LON_ORIGIN_DEG.to_radians();

    let m_1 = lcc_m(phi_1, e);
    let m_2 = lcc_m(phi_2, e);
    let t = lcc_t(phi, e);
    let t_0 = lcc_t(phi_0, e);
    let t_1 = lcc_t(phi_1, e);
    let t_2 = lcc_t(phi_2, e);

    let n = (m_1.ln() - m_2.ln()) / (t_1.ln() - t_2.ln());
    let f = m_1 / (n * t_1.powf(n));
    let rho = SEMI_MAJOR_M * f * t.powf(n);
    let rho_0 = SEMI_MAJOR_M * f * t_0.powf(n);
    let theta = n * (lambda - lambda_0);

    let easting = FALSE_EASTING_FT + rho * theta.sin() * FT_US_PER_M;
    let northing = FALSE_NORTHING_FT + (rho_0 - rho * theta.cos()) * FT_US_PER_M;
    if easting.is_finite() && northing.is_finite() {
        Some((easting, northing))
    } else {
        None
    }
}

fn lcc_m(phi: f64, e: f64) -> f64 {
    phi.cos() / (1.0 - e * e * phi.sin() * phi.sin()).sqrt()
}

fn lcc_t(phi: f64, e: f64) -> f64 {
    let esin = e * phi.sin();
    (std::f64::consts::FRAC_PI_4 - phi / 2.0).tan() / ((1.0 - esin) / (1.0 + esin)).powf(e / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wgs84_is_identity() {
        let (x, y) = LayerCrs::Wgs84.forward(-73.9772, 40.7527).unwrap();
        assert_eq!(x, -73.9772);
        assert_eq!(y, 40.7527);
    }

    #[test]
    fn test_grand_central_projects_into_midtown_state_plane_range() {
        // Grand Central Terminal. midtown Manhattan sits near easting
        // 990,000 ft / northing 213,000 ft in the Long Island state plane.
        let (x, y) = LayerCrs::NyLongIslandFt.forward(-73.9772, 40.7527).unwrap();
        assert!((985_000.0..995_000.0).contains(&x), "easting {x}");
        assert!((208_000.0..218_000.0).contains(&y), "northing {y}");
    }

    #[test]
    fn test_projection_preserves_ordering_near_nyc() {
        let crs = LayerCrs::NyLongIslandFt;
        let (x_west, _) = crs.forward(-74.0, 40.75).unwrap();
        let (x_east, _) = crs.forward(-73.9, 40.75).unwrap();
        let (_, y_south) = crs.forward(-73.95, 40.6).unwrap();
        let (_, y_north) = crs.forward(-73.95, 40.8).unwrap();
        assert!(x_west < x_east);
        assert!(y_south < y_north);
    }
}
