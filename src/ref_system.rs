use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::constants::{Radian, DPI};

/// Construct a rotation matrix around one of the principal axes (X, Y, or Z).
///
/// This function returns a 3×3 orthonormal matrix representing an **active rotation**
/// of a 3D vector by an angle `alpha` around the chosen axis, counter-clockwise when
/// looking from the positive end of the axis toward the origin.
///
/// # Arguments
///
/// * `alpha` - Rotation angle in **radians**.
/// * `k` - Index of the axis of rotation:
///   * `0` → X-axis
///   * `1` → Y-axis
///   * `2` → Z-axis
///
/// # Returns
///
/// A 3×3 rotation matrix `R` such that the rotated vector is `x' = R · x`.
/// The passive (change of basis) rotation `R_k(θ)` is `rotmt(-θ, k)`.
///
/// # Panics
///
/// Panics if `k > 2`, as only axes 0–2 are valid.
pub fn rotmt(alpha: Radian, k: usize) -> Matrix3<f64> {
    let axis = match k {
        0 => Vector3::x_axis(),
        1 => Vector3::y_axis(),
        2 => Vector3::z_axis(),
        _ => panic!("**** ROTMT: invalid axis index {k} (must be 0,1,2) ****"),
    };

    Rotation3::from_axis_angle(&axis, alpha).into()
}

/// Unit vector pointing toward the equatorial direction `(α, δ)`.
///
/// Arguments
/// ---------
/// * `ra`: right ascension in radians.
/// * `dec`: declination in radians.
pub fn radec_to_unit(ra: Radian, dec: Radian) -> Vector3<f64> {
    let (sin_ra, cos_ra) = ra.sin_cos();
    let (sin_dec, cos_dec) = dec.sin_cos();
    Vector3::new(cos_dec * cos_ra, cos_dec * sin_ra, sin_dec)
}

/// Local orthonormal triad `(east, north, radial)` at the equatorial direction `(α, δ)`.
///
/// The east and north axes point toward increasing right ascension and declination.
/// They are used to express a proper motion as a space velocity.
pub fn local_triad(ra: Radian, dec: Radian) -> (Vector3<f64>, Vector3<f64>, Vector3<f64>) {
    let (sin_ra, cos_ra) = ra.sin_cos();
    let (sin_dec, cos_dec) = dec.sin_cos();
    (
        Vector3::new(-sin_ra, cos_ra, 0.0),
        Vector3::new(-sin_dec * cos_ra, -sin_dec * sin_ra, cos_dec),
        Vector3::new(cos_dec * cos_ra, cos_dec * sin_ra, sin_dec),
    )
}

/// Convert a 3D Cartesian position vector to right ascension and declination.
///
/// Arguments
/// ---------
/// * `cartesian_position`: 3D position vector in Cartesian coordinates (any length unit).
///
/// Returns
/// --------
/// * Tuple `(α, δ, ρ)`:
///     - `α`: right ascension in radians, in the range [0, 2π).
///     - `δ`: declination in radians, in the range [−π/2, +π/2].
///     - `ρ`: Euclidean norm of the vector.
///
/// Remarks
/// -------
/// * If the input vector has zero norm, the result is `(0.0, 0.0, 0.0)`.
/// * On the poles the right ascension is undefined and set to 0.
pub fn cartesian_to_radec(cartesian_position: &Vector3<f64>) -> (Radian, Radian, f64) {
    let pos_norm = cartesian_position.norm();
    if pos_norm == 0. {
        return (0.0, 0.0, pos_norm);
    }

    let delta = (cartesian_position.z / pos_norm).clamp(-1.0, 1.0).asin();

    let xy = cartesian_position.x.hypot(cartesian_position.y);
    if xy == 0.0 {
        return (0.0, delta, pos_norm);
    }

    let alpha = cartesian_position.y.atan2(cartesian_position.x);
    // atan2 can round to exactly 2π once shifted; fold that back onto 0
    let alpha = if alpha < 0.0 { alpha + DPI } else { alpha };
    let alpha = if alpha >= DPI { 0.0 } else { alpha };
    (alpha, delta, pos_norm)
}

#[cfg(test)]
mod ref_system_test {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_rotmt_axes() {
        let rz = rotmt(FRAC_PI_2, 2);
        assert_relative_eq!(rz * Vector3::x(), Vector3::y(), epsilon = 1e-15);

        let rx = rotmt(FRAC_PI_2, 0);
        assert_relative_eq!(rx * Vector3::y(), Vector3::z(), epsilon = 1e-15);

        let ry = rotmt(FRAC_PI_2, 1);
        assert_relative_eq!(ry * Vector3::z(), Vector3::x(), epsilon = 1e-15);
    }

    #[test]
    fn test_rotmt_inverse() {
        let r = rotmt(0.3, 1);
        assert_relative_eq!(r.transpose(), rotmt(-0.3, 1), epsilon = 1e-15);
    }

    #[test]
    #[should_panic]
    fn test_rotmt_invalid_axis() {
        rotmt(0.1, 3);
    }

    #[test]
    fn test_radec_round_trip() {
        let (ra, dec) = (4.0, -0.7);
        let u = radec_to_unit(ra, dec) * 12.5;
        let (alpha, delta, rho) = cartesian_to_radec(&u);
        assert_relative_eq!(alpha, ra, epsilon = 1e-14);
        assert_relative_eq!(delta, dec, epsilon = 1e-14);
        assert_relative_eq!(rho, 12.5, epsilon = 1e-14);
    }

    #[test]
    fn test_cartesian_to_radec_edge_cases() {
        assert_eq!(cartesian_to_radec(&Vector3::zeros()), (0.0, 0.0, 0.0));

        let (alpha, delta, _) = cartesian_to_radec(&Vector3::new(0.0, 0.0, -3.0));
        assert_eq!(alpha, 0.0);
        assert_relative_eq!(delta, -FRAC_PI_2);

        let (alpha, _, _) = cartesian_to_radec(&Vector3::new(-1.0, -1e-300, 0.0));
        assert!((0.0..DPI).contains(&alpha));
        assert_relative_eq!(alpha, PI, epsilon = 1e-12);
    }

    #[test]
    fn test_local_triad() {
        let (ra, dec) = (1.2, 0.4);
        let (e, n, r) = local_triad(ra, dec);
        assert_relative_eq!(r, radec_to_unit(ra, dec), epsilon = 1e-15);
        assert_relative_eq!(e.dot(&n), 0.0, epsilon = 1e-15);
        assert_relative_eq!(e.dot(&r), 0.0, epsilon = 1e-15);
        assert_relative_eq!(n.dot(&r), 0.0, epsilon = 1e-15);
        assert_relative_eq!(e.cross(&n), r, epsilon = 1e-15);

        // a small step north raises the declination
        let (_, dec2, _) = cartesian_to_radec(&(r + 1e-6 * n));
        assert!(dec2 > dec);
    }
}
