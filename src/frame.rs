//! # Observing frames
//!
//! An [`ObservingFrame`] is the target of a transformation: an instant, a site on the
//! Earth and the Earth orientation parameters in effect. [`FrameGeometry`] holds every
//! quantity derived from a frame that does not depend on the source, so that it can be
//! computed once and shared by all the sources transformed into the same frame.

use hifitime::{Epoch, Unit};
use nalgebra::{Matrix3, Vector3};
use rand::Rng;

use crate::cirs_errors::CirsError;
use crate::constants::{Degree, Meter, Radian};
use crate::corrections::Aberration;
use crate::earth_orientation::{
    celestial_to_true_of_date, equation_of_origins, greenwich_apparent_sidereal_time,
    true_of_date_to_cirs, EarthOrientationParams,
};
use crate::ephemeris::earth_sun_state;
use crate::observers::Observer;
use crate::time::TimeScales;

/// Target frame of an apparent place reduction.
///
/// Two frames are equal only when the epoch, the site and the Earth orientation
/// parameters are all identical.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservingFrame {
    /// Instant of observation.
    pub epoch: Epoch,
    /// Geodetic location of the observer.
    pub observer: Observer,
    pub eop: EarthOrientationParams,
}

impl ObservingFrame {
    pub fn new(epoch: Epoch, observer: Observer, eop: EarthOrientationParams) -> Self {
        ObservingFrame {
            epoch,
            observer,
            eop,
        }
    }

    /// Build a frame from raw geodetic site coordinates.
    ///
    /// Errors
    /// ------
    /// * [`CirsError::InvalidObserver`] if the site coordinates are rejected by [`Observer::new`].
    pub fn at_site(
        epoch: Epoch,
        longitude: Degree,
        latitude: Degree,
        height: Meter,
        eop: EarthOrientationParams,
    ) -> Result<Self, CirsError> {
        Ok(ObservingFrame::new(
            epoch,
            Observer::new(longitude, latitude, height)?,
            eop,
        ))
    }

    /// Draw a random frame before a reference instant.
    ///
    /// The generator is consumed in this order: time offset, longitude, latitude.
    ///
    /// Arguments
    /// ---------
    /// * `reference`: latest possible instant.
    /// * `max_offset_days`: the epoch is `reference − U[0, max_offset_days)` days.
    /// * `height`: site height above the ellipsoid, meters.
    /// * `eop`: Earth orientation parameters attached to the frame.
    /// * `rng`: random generator.
    ///
    /// The longitude is uniform in [0°, 360°) and the latitude in [−90°, 90°).
    pub fn random<R: Rng>(
        reference: Epoch,
        max_offset_days: f64,
        height: Meter,
        eop: EarthOrientationParams,
        rng: &mut R,
    ) -> Result<Self, CirsError> {
        let offset = max_offset_days * rng.random::<f64>();
        let longitude = 360.0 * rng.random::<f64>();
        let latitude = 180.0 * (rng.random::<f64>() - 0.5);

        ObservingFrame::at_site(
            reference - Unit::Day * offset,
            longitude,
            latitude,
            height,
            eop,
        )
    }
}

/// Source-independent quantities of one observing frame.
///
/// Vectors are in the GCRS, positions in AU and velocities in AU/day.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameGeometry {
    pub times: TimeScales,
    /// TDB Julian date of the observation.
    pub jd_tdb: f64,
    /// Rotation from the GCRS to the CIRS.
    pub gcrs_to_cirs: Matrix3<f64>,
    /// Equation of the origins, radians.
    pub equation_of_origins: Radian,
    /// Barycentric position of the observer.
    pub observer_position: Vector3<f64>,
    /// Barycentric velocity of the observer.
    pub observer_velocity: Vector3<f64>,
    /// Barycentric position of the Sun.
    pub sun_position: Vector3<f64>,
    /// Distance from the observer to the geocenter.
    pub observer_geocentric_distance: f64,
    /// Distance from the observer to the Sun.
    pub observer_sun_distance: f64,
    pub aberration: Aberration,
}

impl FrameGeometry {
    /// Compute the geometry of a frame.
    ///
    /// Steps
    /// -----
    /// 1. Time scales of the epoch (UT1 from the frame's UT1 − UTC).
    /// 2. Barycentric Earth and Sun from the built-in ephemeris.
    /// 3. Bias-precession-nutation matrix and equation of the origins.
    /// 4. Geocentric position and velocity of the site, added to the Earth's state.
    ///
    /// Errors
    /// ------
    /// * [`CirsError::EphemerisOutOfRange`] if the epoch is outside the ephemeris window.
    /// * [`CirsError::DegenerateGeometry`] if the observer is not moving slower than light.
    pub fn new(frame: &ObservingFrame) -> Result<Self, CirsError> {
        let times = TimeScales::new(&frame.epoch, frame.eop.dut1);
        let jd_tdb = times.jd_tdb();

        let earth_sun = earth_sun_state(jd_tdb)?;

        let npb = celestial_to_true_of_date(times.mjd_tt);
        let gast = greenwich_apparent_sidereal_time(times.mjd_ut1, times.mjd_tt);
        let eo = equation_of_origins(times.mjd_ut1, times.mjd_tt);
        let gcrs_to_cirs = true_of_date_to_cirs(eo) * npb;

        let (geo_position, geo_velocity) = frame.observer.geocentric_posvel(&npb, gast, &frame.eop);

        let observer_position = earth_sun.earth_position + geo_position;
        let observer_velocity = earth_sun.earth_velocity + geo_velocity;

        let aberration = Aberration::new(observer_velocity);
        if aberration.beta().is_nan() || aberration.beta() >= 1.0 {
            return Err(CirsError::DegenerateGeometry(format!(
                "observer speed β = {} is not below c",
                aberration.beta()
            )));
        }

        Ok(FrameGeometry {
            times,
            jd_tdb,
            gcrs_to_cirs,
            equation_of_origins: eo,
            observer_position,
            observer_velocity,
            sun_position: earth_sun.sun_position,
            observer_geocentric_distance: geo_position.norm(),
            observer_sun_distance: (observer_position - earth_sun.sun_position).norm(),
            aberration,
        })
    }
}
