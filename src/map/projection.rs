//! Web Mercator projection
//!
//! Maps WGS 84 coordinates onto the unit square (x growing east, y growing
//! south), the standard web-map projection. Latitudes beyond the Mercator
//! limit are clamped so the math stays finite at the poles.

use crate::model::GeoPoint;
use std::f64::consts::PI;

/// Latitude bound of the square Web Mercator world
pub const MAX_LATITUDE: f64 = 85.051_128_78;

/// Project a coordinate onto the unit square
pub fn project(point: GeoPoint) -> (f64, f64) {
    let x = (point.lng + 180.0) / 360.0;

    let lat = point.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
    let rad = lat.to_radians();
    let y = (1.0 - ((rad.tan() + 1.0 / rad.cos()).ln()) / PI) / 2.0;

    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equator_prime_meridian_is_center() {
        let (x, y) = project(GeoPoint::new(0.0, 0.0));
        assert!((x - 0.5).abs() < 1e-12);
        assert!((y - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_axes_orientation() {
        // East of the meridian: larger x
        let (x_east, _) = project(GeoPoint::new(0.0, 37.6));
        assert!(x_east > 0.5);

        // North of the equator: smaller y
        let (_, y_north) = project(GeoPoint::new(55.75, 0.0));
        assert!(y_north < 0.5);
    }

    #[test]
    fn test_poles_stay_finite() {
        let (_, y) = project(GeoPoint::new(90.0, 0.0));
        assert!(y.is_finite());
        let (_, y) = project(GeoPoint::new(-90.0, 0.0));
        assert!(y.is_finite());
    }

    #[test]
    fn test_unit_square_bounds() {
        for &(lat, lng) in &[(55.7558, 37.6173), (-33.86, 151.21), (85.0, -179.9), (-85.0, 179.9)] {
            let (x, y) = project(GeoPoint::new(lat, lng));
            assert!((0.0..=1.0).contains(&x));
            assert!((0.0..=1.0).contains(&y));
        }
    }
}
