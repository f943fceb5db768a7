//! Spherical Earth primitives.
//!
//! All angles exchanged with the outside world are in decimal degrees,
//! distances are in kilometers, unless stated otherwise.

/// Mean Earth radius (km)
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great circle distance on a unit sphere (haversine).
/// All angles, and the returned value, are expressed in radians.
pub fn sphere_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlon = lon2 - lon1;
    let dlat = lat2 - lat1;

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);

    // rounding may push us slightly above unity on antipodal points
    2.0 * a.sqrt().min(1.0).asin()
}

/// Great circle distance (in kilometers) between two points
/// given in decimal degrees.
pub fn earth_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    EARTH_RADIUS_KM
        * sphere_distance(
            lat1.to_radians(),
            lon1.to_radians(),
            lat2.to_radians(),
            lon2.to_radians(),
        )
}

/// Initial bearing (in degrees) from first point towards second point.
/// North is 0.0, East is +90.0, West is -90.0 and South is +/-180.0.
/// Coincident points have a 0.0 bearing.
pub fn bearing_to(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1, lon1) = (lat1.to_radians(), lon1.to_radians());
    let (lat2, lon2) = (lat2.to_radians(), lon2.to_radians());

    let dlon = lon2 - lon1;

    let y = dlon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();

    y.atan2(x).to_degrees()
}

/// Angle (in degrees, within [0, 180]) subtended at the vertex
/// by two other points, on the sphere.
///
/// ## Input
/// - (lat_v, lon_v): the vertex
/// - (lat_a, lon_a): first point
/// - (lat_b, lon_b): second point
///
/// ## Output
/// - 0.0 when either point coincides with the vertex (undefined angle)
pub fn angle_at(lat_v: f64, lon_v: f64, lat_a: f64, lon_a: f64, lat_b: f64, lon_b: f64) -> f64 {
    let (lat_v, lon_v) = (lat_v.to_radians(), lon_v.to_radians());
    let (lat_a, lon_a) = (lat_a.to_radians(), lon_a.to_radians());
    let (lat_b, lon_b) = (lat_b.to_radians(), lon_b.to_radians());

    let va = sphere_distance(lat_v, lon_v, lat_a, lon_a);
    let vb = sphere_distance(lat_v, lon_v, lat_b, lon_b);
    let ab = sphere_distance(lat_a, lon_a, lat_b, lon_b);

    let denom = va.sin() * vb.sin();
    if denom.abs() < 1e-12 {
        return 0.0;
    }

    // spherical law of cosines
    let cos_v = (ab.cos() - va.cos() * vb.cos()) / denom;
    cos_v.clamp(-1.0, 1.0).acos().to_degrees()
}
