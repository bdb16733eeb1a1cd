//! Spherical earth calculations.
//!
//! All functions work on a sphere of radius `EARTH_RADIUS_KM`, which is more than enough for
//! the distances we deal with (a few hundred km at most).
//!
//! Angles are in degrees, distances in kilometers.
//!

use crate::Position;

/// Earth radius in km
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two positions using the haversine formula.
///
/// Returns 0 for identical positions and is symmetric in its arguments.
///
pub fn distance_km(a: &Position, b: &Position) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    // Rounding can push `h` slightly outside [0, 1] for antipodal points
    //
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Initial bearing when leaving `from` toward `to`, in [0, 360).
///
/// The direction is undefined when both positions are the same, we return 0 in that case.
///
pub fn bearing_deg(from: &Position, to: &Position) -> f64 {
    if from == to {
        return 0.;
    }

    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let d_lon = (to.lon - from.lon).to_radians();

    let x = d_lon.sin() * lat2.cos();
    let y = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();

    normalize_deg(x.atan2(y).to_degrees())
}

/// How far `heading` is from the direct course `bearing`, in [0, 180].
///
pub fn course_deviation(heading: f64, bearing: f64) -> f64 {
    ((heading - bearing + 180.).rem_euclid(360.) - 180.).abs()
}

/// Wrap any angle into [0, 360).
///
pub fn normalize_deg(angle: f64) -> f64 {
    let a = angle.rem_euclid(360.);
    // rem_euclid() can round up to exactly 360
    if a >= 360. {
        0.
    } else {
        a
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    const BROCKEN: Position = Position {
        lat: 51.7991,
        lon: 10.6156,
    };
    const WERNIGERODE: Position = Position {
        lat: 51.835,
        lon: 10.785,
    };

    #[rstest]
    #[case(BROCKEN)]
    #[case(WERNIGERODE)]
    #[case(Position { lat: 0., lon: 0. })]
    #[case(Position { lat: -89.9, lon: 179.9 })]
    fn test_distance_to_self_is_zero(#[case] p: Position) {
        assert_eq!(0., distance_km(&p, &p));
    }

    #[test]
    fn test_distance_symmetric() {
        let p = Position { lat: 52.0, lon: 11.2 };
        assert_eq!(distance_km(&BROCKEN, &p), distance_km(&p, &BROCKEN));
        assert_eq!(
            distance_km(&WERNIGERODE, &BROCKEN),
            distance_km(&BROCKEN, &WERNIGERODE)
        );
    }

    #[test]
    fn test_distance_known_values() {
        // One degree of latitude along a meridian
        //
        let a = Position { lat: 50., lon: 10. };
        let b = Position { lat: 51., lon: 10. };
        assert!((distance_km(&a, &b) - 111.195).abs() < 0.01);

        // Brocken to Wernigerode is roughly 12.3 km
        //
        let d = distance_km(&BROCKEN, &WERNIGERODE);
        assert!((12.0..12.6).contains(&d), "d = {d}");
    }

    #[rstest]
    #[case(Position { lat: 50., lon: 10. }, Position { lat: 51., lon: 10. }, 0.)]
    #[case(Position { lat: 50., lon: 10. }, Position { lat: 49., lon: 10. }, 180.)]
    #[case(Position { lat: 0., lon: 10. }, Position { lat: 0., lon: 11. }, 90.)]
    #[case(Position { lat: 0., lon: 10. }, Position { lat: 0., lon: 9. }, 270.)]
    fn test_bearing_cardinal(#[case] from: Position, #[case] to: Position, #[case] want: f64) {
        let b = bearing_deg(&from, &to);
        assert!((b - want).abs() < 1e-6, "b = {b}");
    }

    #[test]
    fn test_bearing_same_point() {
        assert_eq!(0., bearing_deg(&BROCKEN, &BROCKEN));
    }

    #[test]
    fn test_bearing_range() {
        for lat in (-80..=80).step_by(20) {
            for lon in (-180..180).step_by(30) {
                let to = Position {
                    lat: lat as f64,
                    lon: lon as f64,
                };
                let b = bearing_deg(&BROCKEN, &to);
                assert!((0.0..360.).contains(&b), "b = {b}");
            }
        }
    }

    #[rstest]
    #[case(90., 90., 0.)]
    #[case(0., 180., 180.)]
    #[case(350., 10., 20.)]
    #[case(10., 350., 20.)]
    #[case(270., 90., 180.)]
    #[case(45., 0., 45.)]
    #[case(720., 0., 0.)]
    #[case(-90., 90., 180.)]
    fn test_course_deviation(#[case] heading: f64, #[case] bearing: f64, #[case] want: f64) {
        assert!((course_deviation(heading, bearing) - want).abs() < 1e-9);
    }

    #[test]
    fn test_course_deviation_range() {
        for h in (0..360).step_by(7) {
            for b in (0..360).step_by(11) {
                let d = course_deviation(h as f64, b as f64);
                assert!((0.0..=180.).contains(&d), "d = {d}");
            }
        }
    }

    #[rstest]
    #[case(0., 0.)]
    #[case(360., 0.)]
    #[case(-90., 270.)]
    #[case(725., 5.)]
    #[case(-1e-15, 0.)]
    fn test_normalize_deg(#[case] a: f64, #[case] want: f64) {
        let n = normalize_deg(a);
        assert!((0.0..360.).contains(&n));
        assert!((n - want).abs() < 1e-9, "n = {n}");
    }
}
