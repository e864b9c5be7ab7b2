//! Extraterrestrial radiation geometry (FAO-56, equations 21 to 25).
//!
//! All angles are radians; `doy` is the Gregorian day of year (1..=366).

use std::f64::consts::PI;

/// Solar constant, MJ m⁻² min⁻¹.
pub const SOLAR_CONSTANT: f64 = 0.0820;

/// Solar declination.
pub fn solar_declination(doy: u32) -> f64 {
    0.409 * (2.0 * PI / 365.0 * f64::from(doy) - 1.39).sin()
}

/// Sunset hour angle for latitude `phi`.
///
/// The `acos` argument is clamped so polar day and polar night map to `π`
/// and `0`.
pub fn sunset_hour_angle(phi: f64, declination: f64) -> f64 {
    (-phi.tan() * declination.tan()).clamp(-1.0, 1.0).acos()
}

/// Inverse relative Earth-Sun distance.
pub fn inverse_relative_distance(doy: u32) -> f64 {
    1.0 + 0.033 * (2.0 * PI / 365.0 * f64::from(doy)).cos()
}

/// Daily extraterrestrial radiation, MJ m⁻² day⁻¹.
pub fn extraterrestrial_radiation(phi: f64, doy: u32) -> f64 {
    let delta = solar_declination(doy);
    let ws = sunset_hour_angle(phi, delta);
    let dr = inverse_relative_distance(doy);
    let ra = (24.0 * 60.0 / PI)
        * SOLAR_CONSTANT
        * dr
        * (ws * phi.sin() * delta.sin() + phi.cos() * delta.cos() * ws.sin());
    ra.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn fao56_example_8() {
        // 20°S on 3 September.
        let phi = (-20.0f64).to_radians();
        let doy = 246;
        assert_abs_diff_eq!(solar_declination(doy), 0.120, epsilon = 1e-3);
        assert_abs_diff_eq!(inverse_relative_distance(doy), 0.985, epsilon = 1e-3);
        assert_abs_diff_eq!(
            sunset_hour_angle(phi, solar_declination(doy)),
            1.527,
            epsilon = 1e-3
        );
        assert_abs_diff_eq!(extraterrestrial_radiation(phi, doy), 32.2, epsilon = 0.05);
    }

    #[test]
    fn polar_night_has_no_radiation() {
        let phi = 70.0f64.to_radians();
        assert_eq!(sunset_hour_angle(phi, solar_declination(355)), 0.0);
        assert_eq!(extraterrestrial_radiation(phi, 355), 0.0);
    }

    #[test]
    fn polar_day_sun_never_sets() {
        let phi = 80.0f64.to_radians();
        assert_abs_diff_eq!(sunset_hour_angle(phi, solar_declination(172)), PI);
    }
}
