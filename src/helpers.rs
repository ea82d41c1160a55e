use std::f64;

pub fn modulus(a: f64, b: f64) -> f64 {
    ((a % b) + b) % b
}

/// Wraps a longitude in degrees into (-180, 180].
pub fn normalize_longitude(lon: f64) -> f64 {
    180. - modulus(180. - lon, 360.)
}

/// Keeps inverse trig inputs inside [-1, 1] when rounding pushes them just outside.
pub fn clamp_unit(value: f64) -> f64 {
    value.clamp(-1., 1.)
}

pub fn safe_acos(value: f64) -> f64 {
    clamp_unit(value).acos()
}

pub fn safe_asin(value: f64) -> f64 {
    clamp_unit(value).asin()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_modulus_negative() {
        assert_abs_diff_eq!(modulus(-10., 360.), 350.);
        assert_abs_diff_eq!(modulus(370., 360.), 10.);
    }

    #[test]
    fn test_normalize_longitude() {
        assert_abs_diff_eq!(normalize_longitude(180.), 180.);
        assert_abs_diff_eq!(normalize_longitude(-180.), 180.);
        assert_abs_diff_eq!(normalize_longitude(190.), -170., epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_longitude(-190.), 170., epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_longitude(725.), 5., epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_longitude(0.), 0.);
    }

    #[test]
    fn test_safe_inverse_trig() {
        assert_abs_diff_eq!(safe_acos(1.0000000001), 0.);
        assert_abs_diff_eq!(safe_asin(-1.0000000001), -f64::consts::FRAC_PI_2);
        assert!(!safe_acos(-1.5).is_nan());
    }
}
