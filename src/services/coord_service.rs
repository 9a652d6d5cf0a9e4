use std::f64::consts::PI;

use thiserror::Error;

/// Reference ellipsoid semi-major axis (Krasovsky 1940).
const A: f64 = 6378245.0;
/// Squared eccentricity of the reference ellipsoid.
const EE: f64 = 0.00669342162296594323;

#[derive(Debug, Error, PartialEq)]
pub enum TransformError {
    #[error("coordinate is not a finite number (lon={lon}, lat={lat})")]
    NonFinite { lon: f64, lat: f64 },
    #[error("latitude {0} outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// Convert an obfuscated (GCJ-02) coordinate pair back to true geodetic
/// (WGS-84) coordinates.
///
/// Points outside the obfuscation region pass through unchanged. Inside it,
/// the published offset formula is evaluated at the obfuscated point and
/// subtracted, the standard approximate inverse. The constants match the
/// reference implementations, so previously stored obfuscated coordinates
/// keep converting to the same place.
pub fn gcj02_to_wgs84(lon: f64, lat: f64) -> Result<(f64, f64), TransformError> {
    if !lon.is_finite() || !lat.is_finite() {
        return Err(TransformError::NonFinite { lon, lat });
    }
    if !in_obfuscated_region(lon, lat) {
        return Ok((lon, lat));
    }

    let x = lon - 105.0;
    let y = lat - 35.0;
    let mut d_lat = transform_lat(x, y);
    let mut d_lon = transform_lon(x, y);

    let rad_lat = lat / 180.0 * PI;
    let mut magic = rad_lat.sin();
    magic = 1.0 - EE * magic * magic;
    let sqrt_magic = magic.sqrt();
    d_lat = (d_lat * 180.0) / ((A * (1.0 - EE)) / (magic * sqrt_magic) * PI);
    d_lon = (d_lon * 180.0) / (A / sqrt_magic * rad_lat.cos() * PI);

    Ok((lon - d_lon, lat - d_lat))
}

/// Whether the obfuscation applies at this point: a fixed bounding box around
/// the mainland, minus the two strips (Taiwan, Hong Kong / Macau) where maps
/// use true coordinates.
fn in_obfuscated_region(lon: f64, lat: f64) -> bool {
    if !(72.004..=137.8347).contains(&lon) || !(0.8293..=55.8271).contains(&lat) {
        return false;
    }
    // Taiwan strip
    if (119.92..=122.51).contains(&lon) && (21.78..=25.42).contains(&lat) {
        return false;
    }
    // Hong Kong / Macau strip
    if (113.52..=114.45).contains(&lon) && (22.06..=22.58).contains(&lat) {
        return false;
    }
    true
}

fn transform_lat(x: f64, y: f64) -> f64 {
    let mut ret = -100.0 + 2.0 * x + 3.0 * y + 0.2 * y * y + 0.1 * x * y + 0.2 * x.abs().sqrt();
    ret += (20.0 * (6.0 * x * PI).sin() + 20.0 * (2.0 * x * PI).sin()) * 2.0 / 3.0;
    ret += (20.0 * (y * PI).sin() + 40.0 * (y / 3.0 * PI).sin()) * 2.0 / 3.0;
    ret += (160.0 * (y / 12.0 * PI).sin() + 320.0 * (y * PI / 30.0).sin()) * 2.0 / 3.0;
    ret
}

fn transform_lon(x: f64, y: f64) -> f64 {
    let mut ret = 300.0 + x + 2.0 * y + 0.1 * x * x + 0.1 * x * y + 0.1 * x.abs().sqrt();
    ret += (20.0 * (6.0 * x * PI).sin() + 20.0 * (2.0 * x * PI).sin()) * 2.0 / 3.0;
    ret += (20.0 * (x * PI).sin() + 40.0 * (x / 3.0 * PI).sin()) * 2.0 / 3.0;
    ret += (150.0 * (x / 12.0 * PI).sin() + 300.0 * (x / 30.0 * PI).sin()) * 2.0 / 3.0;
    ret
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn identity_outside_the_region() {
        // Amsterdam, well outside the bounding box.
        let (lon, lat) = gcj02_to_wgs84(4.8952, 52.3702).unwrap();
        assert_eq!((lon, lat), (4.8952, 52.3702));

        // Just west of the box edge.
        let (lon, lat) = gcj02_to_wgs84(71.9, 30.0).unwrap();
        assert_eq!((lon, lat), (71.9, 30.0));
    }

    #[test]
    fn identity_in_excluded_strips() {
        // Taipei and Hong Kong fall inside the bounding box but are excluded.
        let (lon, lat) = gcj02_to_wgs84(121.5654, 25.0330).unwrap();
        assert_eq!((lon, lat), (121.5654, 25.0330));

        let (lon, lat) = gcj02_to_wgs84(114.1694, 22.3193).unwrap();
        assert_eq!((lon, lat), (114.1694, 22.3193));
    }

    #[test]
    fn beijing_point_is_shifted_by_a_plausible_offset() {
        let (lon, lat) = gcj02_to_wgs84(116.3975, 39.9087).unwrap();
        // The obfuscation offset in this area is a few hundred meters,
        // i.e. somewhere between ~1e-4 and ~1e-2 degrees on each axis.
        let d_lon = (116.3975 - lon).abs();
        let d_lat = (39.9087 - lat).abs();
        assert!(d_lon > 1e-4 && d_lon < 1e-2, "d_lon = {d_lon}");
        assert!(d_lat > 1e-4 && d_lat < 1e-2, "d_lat = {d_lat}");
    }

    #[test]
    fn transform_is_deterministic() {
        let a = gcj02_to_wgs84(116.3975, 39.9087).unwrap();
        let b = gcj02_to_wgs84(116.3975, 39.9087).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn non_finite_input_is_rejected() {
        assert_matches!(
            gcj02_to_wgs84(f64::NAN, 39.9),
            Err(TransformError::NonFinite { .. })
        );
        assert_matches!(
            gcj02_to_wgs84(116.4, f64::INFINITY),
            Err(TransformError::NonFinite { .. })
        );
    }
}
