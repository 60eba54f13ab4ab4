//! # Observer & Site Geometry
//!
//! This module gathers **ground-based observer handling**:
//!
//! - An [`Observer`](crate::observers::Observer) type storing the geodetic site
//!   (longitude, latitude, height), its **geocentric parallax coordinates** (ρ·cosφ, ρ·sinφ)
//!   and a **precomputed body-fixed** (ITRS) position.
//! - [`Observer::geocentric_posvel`](crate::observers::Observer::geocentric_posvel), the
//!   observer's position and velocity relative to the geocenter in the **GCRS**.
//! - Helpers converting geodetic latitude/height to normalized parallax coordinates
//!   ([`geodetic_to_parallax`](crate::observers::geodetic_to_parallax)).
//!
//! ## Frames & conventions
//!
//! ```text
//! ITRS --(polar motion W)--> TIRS --(GAST)--> true of date --((N·P·B)ᵀ)--> GCRS
//! ```
//!
//! ## Units
//!
//! - Longitudes and latitudes: **degrees** (east positive, geodetic).
//! - Heights: **meters** above the GRS80 ellipsoid.
//! - Geocentric parallax (ρ·cosφ, ρ·sinφ): **Earth radii**.
//! - Positions: **AU**. Velocities: **AU/day**.
//!
//! ## Design & invariants
//!
//! - `NotNan<f64>` is used for every stored field, so that two observers compare and hash
//!   by value and frames built on them can be used as cache keys.
//! - The latitude is checked against [−90°, 90°] at construction.

use nalgebra::{Matrix3, Vector3};
use ordered_float::NotNan;

use crate::cirs_errors::CirsError;
use crate::constants::{
    Degree, Meter, Radian, DPI, EARTH_MAJOR_AXIS, EARTH_MINOR_AXIS, ERAU, ERA_RATE,
};
use crate::earth_orientation::EarthOrientationParams;
use crate::ref_system::rotmt;

/// Ground-based observer with precomputed body-fixed state.
///
/// Units
/// -----
/// * `longitude`, `latitude`: degrees (geodetic, east positive).
/// * `height`: meters above the reference ellipsoid.
/// * `rho_cos_phi`, `rho_sin_phi`: Earth radii.
/// * `observer_fixed_coord`: astronomical units (AU), ITRS axes.
///
/// See also
/// ------------
/// * [`geodetic_to_parallax`] – Converts geodetic latitude/height to (ρ·cosφ, ρ·sinφ).
/// * [`Observer::geocentric_posvel`] – GCRS position and velocity at a given Earth orientation.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct Observer {
    /// Geodetic longitude in **degrees** east of Greenwich.
    pub longitude: NotNan<f64>,

    /// Geodetic latitude in **degrees**.
    pub latitude: NotNan<f64>,

    /// Height above the ellipsoid in **meters**.
    pub height: NotNan<f64>,

    /// ρ·cosφ (geocentric latitude φ), in **Earth radii**.
    pub rho_cos_phi: NotNan<f64>,

    /// ρ·sinφ (geocentric latitude φ), in **Earth radii**.
    pub rho_sin_phi: NotNan<f64>,

    /// Precomputed **body-fixed** position of the observer in **AU**.
    observer_fixed_coord: Vector3<NotNan<f64>>,
}

impl Observer {
    /// Create a new observer from geodetic coordinates.
    ///
    /// Arguments
    /// -----------------
    /// * `longitude`: Geodetic longitude in **degrees** (east positive), any finite value.
    /// * `latitude`: Geodetic latitude in **degrees**, within [−90, 90].
    /// * `height`: Height above the reference ellipsoid in **meters**.
    ///
    /// Errors
    /// ----------
    /// * [`CirsError::InvalidObserver`] if a coordinate is not finite or the latitude is out of range.
    pub fn new(longitude: Degree, latitude: Degree, height: Meter) -> Result<Observer, CirsError> {
        if !(longitude.is_finite() && latitude.is_finite() && height.is_finite()) {
            return Err(CirsError::InvalidObserver(format!(
                "non-finite site coordinates (lon={longitude}, lat={latitude}, h={height})"
            )));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CirsError::InvalidObserver(format!(
                "latitude {latitude} outside [-90, 90]"
            )));
        }

        let (rho_cos_phi, rho_sin_phi) = geodetic_to_parallax(latitude, height);

        let lon_radians = longitude.to_radians();
        let body_fixed_coord: Vector3<NotNan<f64>> = Vector3::new(
            NotNan::new(ERAU * rho_cos_phi * lon_radians.cos())?,
            NotNan::new(ERAU * rho_cos_phi * lon_radians.sin())?,
            NotNan::new(ERAU * rho_sin_phi)?,
        );

        Ok(Observer {
            longitude: NotNan::new(longitude)?,
            latitude: NotNan::new(latitude)?,
            height: NotNan::new(height)?,
            rho_cos_phi: NotNan::new(rho_cos_phi)?,
            rho_sin_phi: NotNan::new(rho_sin_phi)?,
            observer_fixed_coord: body_fixed_coord,
        })
    }

    /// Body-fixed (ITRS) position of the observer, in AU.
    pub fn body_fixed_coord(&self) -> Vector3<f64> {
        self.observer_fixed_coord.map(|x| x.into_inner())
    }

    /// Compute the observer's geocentric position and velocity in the GCRS.
    ///
    /// Arguments
    /// ---------
    /// * `celestial_to_true`: the bias-precession-nutation matrix `N·P·B` at the date.
    /// * `gast`: Greenwich apparent sidereal time, radians.
    /// * `eop`: Earth orientation parameters providing the polar motion.
    ///
    /// Returns
    /// --------
    /// * `(dx, dv)`: geocentric position \[AU\] and velocity due to the Earth rotation \[AU/day\].
    ///
    /// Remarks
    /// -------
    /// * The velocity is `ω × r` in the true-of-date frame with the constant rotation rate
    ///   `ω = 2π·1.00273781191135448` rad/day. The slow motion of the pole is neglected.
    ///
    /// # See also
    /// * [`crate::earth_orientation::celestial_to_true_of_date`]
    /// * [`crate::earth_orientation::greenwich_apparent_sidereal_time`]
    pub fn geocentric_posvel(
        &self,
        celestial_to_true: &Matrix3<f64>,
        gast: Radian,
        eop: &EarthOrientationParams,
    ) -> (Vector3<f64>, Vector3<f64>) {
        let dxbf = self.body_fixed_coord();

        // terrestrial to true equator and equinox of date
        let dx_tod = rotmt(gast, 2) * (eop.polar_motion_matrix() * dxbf);

        let omega = Vector3::new(0.0, 0.0, DPI * ERA_RATE);
        let dv_tod = omega.cross(&dx_tod);

        let to_gcrs = celestial_to_true.transpose();
        (to_gcrs * dx_tod, to_gcrs * dv_tod)
    }
}

/// Convert geodetic latitude and height into normalized parallax coordinates
/// on the Earth.
///
/// The resulting values are dimensionless, in units of the Earth's equatorial
/// radius (`EARTH_MAJOR_AXIS`), and account for the Earth's oblateness.
///
/// Arguments
/// ---------
/// * `lat` - Geodetic latitude of the observer in **radians**.
/// * `height` - Observer's height above the reference ellipsoid in **meters**.
///
/// Returns
/// -------
/// A tuple `(rho_cos_phi, rho_sin_phi)`.
///
/// Details
/// -------
/// ```text
/// u = atan( (sin φ * (b/a)) / cos φ )
/// ρ_sinφ = (b/a) * sin u + (h/a) * sin φ
/// ρ_cosφ = cos u + (h/a) * cos φ
/// ```
///
/// where `a` and `b` are the Earth's semi-major and semi-minor axes,
/// and `h` is the height above the ellipsoid.
pub fn lat_alt_to_parallax(lat: Radian, height: Meter) -> (f64, f64) {
    let axis_ratio = EARTH_MINOR_AXIS / EARTH_MAJOR_AXIS;

    // parametric latitude
    let u = (lat.sin() * axis_ratio).atan2(lat.cos());

    let rho_sin_phi = axis_ratio * u.sin() + (height / EARTH_MAJOR_AXIS) * lat.sin();
    let rho_cos_phi = u.cos() + (height / EARTH_MAJOR_AXIS) * lat.cos();

    (rho_cos_phi, rho_sin_phi)
}

/// Same as [`lat_alt_to_parallax`], with the latitude in **degrees**.
pub fn geodetic_to_parallax(lat: Degree, height: Meter) -> (f64, f64) {
    lat_alt_to_parallax(lat.to_radians(), height)
}
