//! Angle of incidence between the sun and a tilted panel plane.

/// Cosine of the angle of incidence of direct sunlight on a tilted surface.
///
/// All angles are in degrees. Azimuths are measured clockwise from true north;
/// `surface_slope_deg` is the tilt from horizontal. The result is in `[0, 1]`:
/// zero when the sun is below the horizon (`sun_zenith_deg > 90`) or when the
/// panel faces away from the sun.
///
/// # Examples
///
/// ```
/// use pv_strings_sim::solar::orientation_factor;
///
/// // Flat panel: factor is cos(zenith).
/// let f = orientation_factor(180.0, 60.0, 180.0, 0.0);
/// assert!((f - 0.5).abs() < 1e-12);
///
/// // Sun below the horizon.
/// assert_eq!(orientation_factor(0.0, 95.0, 0.0, 30.0), 0.0);
/// ```
pub fn orientation_factor(
    sun_azimuth_deg: f64,
    sun_zenith_deg: f64,
    surface_azimuth_deg: f64,
    surface_slope_deg: f64,
) -> f64 {
    if sun_zenith_deg > 90.0 {
        return 0.0;
    }

    let zenith = sun_zenith_deg.to_radians();
    let slope = surface_slope_deg.to_radians();
    let azimuth_diff = (sun_azimuth_deg - surface_azimuth_deg).to_radians();

    let cos_theta =
        zenith.cos() * slope.cos() + zenith.sin() * slope.sin() * azimuth_diff.cos();

    if cos_theta > 0.0 {
        cos_theta.min(1.0)
    } else {
        0.0
    }
}

/// Angle of incidence in degrees for an orientation factor; 90 when no
/// direct light reaches the surface.
pub fn incidence_angle_deg(orientation_factor: f64) -> f64 {
    orientation_factor.clamp(0.0, 1.0).acos().to_degrees()
}
