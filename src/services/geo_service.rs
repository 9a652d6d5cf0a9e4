use crate::services::coord_service::TransformError;

/// Mean Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance in meters between two true geodetic points.
///
/// Out-of-range latitudes or longitudes are an error, never a clamp: the
/// inputs here are either stored activity centers or transformed request
/// coordinates, and a value outside the valid range means corrupt data.
pub fn distance_meters(
    lat_a: f64,
    lon_a: f64,
    lat_b: f64,
    lon_b: f64,
) -> Result<f64, TransformError> {
    for &lat in &[lat_a, lat_b] {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(TransformError::LatitudeOutOfRange(lat));
        }
    }
    for &lon in &[lon_a, lon_b] {
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(TransformError::LongitudeOutOfRange(lon));
        }
    }

    let d_lat = (lat_b - lat_a).to_radians();
    let d_lon = (lon_b - lon_a).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + lat_a.to_radians().cos() * lat_b.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().asin();
    Ok(EARTH_RADIUS_M * c)
}

/// Inclusive radius check: a point exactly on the boundary is inside.
pub fn within_radius(distance_m: f64, radius_m: f64) -> bool {
    distance_m <= radius_m
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn coincident_points_have_zero_distance() {
        assert_eq!(distance_meters(39.9087, 116.3975, 39.9087, 116.3975).unwrap(), 0.0);
        assert_eq!(distance_meters(0.0, 0.0, 0.0, 0.0).unwrap(), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let ab = distance_meters(52.3702, 4.8952, 48.8566, 2.3522).unwrap();
        let ba = distance_meters(48.8566, 2.3522, 52.3702, 4.8952).unwrap();
        assert!((ab - ba).abs() < 1e-9);
        assert!(ab > 0.0);
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let d = distance_meters(0.0, 10.0, 1.0, 10.0).unwrap();
        assert!((d - 111_194.9).abs() < 1.0, "d = {d}");
    }

    #[test]
    fn colinear_points_are_additive() {
        // Three points along the equator lie on one great circle.
        let ab = distance_meters(0.0, 10.0, 0.0, 11.0).unwrap();
        let bc = distance_meters(0.0, 11.0, 0.0, 12.0).unwrap();
        let ac = distance_meters(0.0, 10.0, 0.0, 12.0).unwrap();
        assert!((ac - (ab + bc)).abs() < 1e-6, "ac = {ac}, ab+bc = {}", ab + bc);
    }

    #[test]
    fn out_of_range_inputs_are_rejected() {
        assert_matches!(
            distance_meters(91.0, 0.0, 0.0, 0.0),
            Err(TransformError::LatitudeOutOfRange(_))
        );
        assert_matches!(
            distance_meters(0.0, -180.5, 0.0, 0.0),
            Err(TransformError::LongitudeOutOfRange(_))
        );
        assert_matches!(
            distance_meters(0.0, 0.0, f64::NAN, 0.0),
            Err(TransformError::LatitudeOutOfRange(_))
        );
    }

    #[test]
    fn radius_boundary_is_inclusive() {
        assert!(within_radius(50.0, 50.0));
        assert!(within_radius(0.0, 50.0));
        assert!(!within_radius(50.0001, 50.0));
    }
}
