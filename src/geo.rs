pub const EARTH_RADIUS: f64 = 6_371_000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Great-circle surface distance in meters between two points given in degrees.
///
/// Coinciding points short-circuit to exactly `0.0`, since the `acos` argument
/// can round above 1.0 for them.
pub fn distance(from: Coordinate, to: Coordinate) -> f64 {
    if from == to {
        return 0.0;
    }

    let (lat_from, lat_to) = (from.latitude.to_radians(), to.latitude.to_radians());
    let delta_lng = (from.longitude - to.longitude).abs().to_radians();

    let cos_angle = lat_from.sin() * lat_to.sin() + lat_from.cos() * lat_to.cos() * delta_lng.cos();

    cos_angle.clamp(-1.0, 1.0).acos() * EARTH_RADIUS
}
