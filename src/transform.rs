//! # Catalog to CIRS transformation
//!
//! [`PositionTransformer`] is the capability the benchmark driver depends on: turn a
//! catalog [`Source`] into its apparent place in an [`ObservingFrame`].
//!
//! [`CirsTransformer`] is the built-in implementation. It keeps the [`FrameGeometry`] of
//! the last frame it was given, so that a run of sources transformed into the same frame
//! only pays for the source-dependent part of the reduction.

use nalgebra::Vector3;
use ordered_float::NotNan;

use crate::catalog::Source;
use crate::cirs_errors::CirsError;
use crate::constants::{Degree, Radian, JD_J2000};
use crate::corrections::{
    observed_radial_velocity, propagate_proper_motion, solar_deflection, to_observer,
};
use crate::frame::{FrameGeometry, ObservingFrame};
use crate::ref_system::cartesian_to_radec;

/// Apparent place of a source in the CIRS.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApparentPosition {
    /// CIRS right ascension (from the CIO), degrees in [0, 360).
    pub ra: Degree,
    /// CIRS declination, degrees.
    pub dec: Degree,
    /// Unit vector toward the apparent place, CIRS axes.
    pub r_hat: Vector3<f64>,
    /// Radial velocity measured by the observer, km/s.
    pub radial_velocity: f64,
    /// Geometric distance from the observer at the time of observation, AU.
    pub distance: f64,
}

/// Converts catalog sources into apparent positions.
pub trait PositionTransformer {
    /// Compute the apparent place of `source` in `frame`.
    ///
    /// Implementations must be deterministic: equal inputs give equal outputs.
    fn transform(
        &mut self,
        source: &Source,
        frame: &ObservingFrame,
    ) -> Result<ApparentPosition, CirsError>;

    /// Same result as [`PositionTransformer::transform`], without reusing any state kept
    /// from previous calls.
    ///
    /// Stateless implementations can keep the default.
    fn transform_uncached(
        &mut self,
        source: &Source,
        frame: &ObservingFrame,
    ) -> Result<ApparentPosition, CirsError> {
        self.transform(source, frame)
    }
}

/// Apparent place of a source for an already computed frame geometry.
///
/// Arguments
/// ---------
/// * `source`: catalog entry at J2000.0.
/// * `geometry`: geometry of the target frame, see [`FrameGeometry::new`].
///
/// Return
/// ------
/// * the CIRS position, the observed radial velocity and the geometric distance.
///
/// Errors
/// ------
/// * [`CirsError::DegenerateGeometry`] if the source coincides with the observer or moves
///   at the speed of light.
/// * [`CirsError::NanValue`] if the reduction produced a NaN.
pub fn apparent_position(
    source: &Source,
    geometry: &FrameGeometry,
) -> Result<ApparentPosition, CirsError> {
    let (pos_catalog, vel) = source.barycentric_state()?;
    let pos = propagate_proper_motion(&pos_catalog, &vel, geometry.jd_tdb - JD_J2000);

    let (rel, lighttime) = to_observer(&pos, &geometry.observer_position);
    let distance = rel.norm();
    if distance == 0.0 {
        return Err(CirsError::DegenerateGeometry(
            "source coincides with the observer".into(),
        ));
    }

    let radial_velocity = observed_radial_velocity(
        source,
        &rel,
        &vel,
        &geometry.observer_velocity,
        geometry.observer_geocentric_distance,
        geometry.observer_sun_distance,
    );

    let deflected = solar_deflection(&rel, &geometry.observer_position, &geometry.sun_position);
    let aberrated = geometry.aberration.apply(&deflected, lighttime);

    let cirs = geometry.gcrs_to_cirs * aberrated;
    let (alpha, delta, norm): (Radian, Radian, f64) = cartesian_to_radec(&cirs);

    Ok(ApparentPosition {
        ra: NotNan::new(alpha.to_degrees())?.into_inner(),
        dec: NotNan::new(delta.to_degrees())?.into_inner(),
        r_hat: cirs / norm,
        radial_velocity: NotNan::new(radial_velocity)?.into_inner(),
        distance,
    })
}

/// CIRS reduction with a one-frame geometry cache.
///
/// The cache holds the last frame seen. A call with an equal frame reuses its geometry,
/// any other frame replaces it.
#[derive(Debug, Clone, Default)]
pub struct CirsTransformer {
    cache: Option<(ObservingFrame, FrameGeometry)>,
    geometry_builds: usize,
}

impl CirsTransformer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frame geometries computed since creation, cached or not.
    pub fn geometry_builds(&self) -> usize {
        self.geometry_builds
    }

    fn geometry(&mut self, frame: &ObservingFrame) -> Result<&FrameGeometry, CirsError> {
        if !matches!(&self.cache, Some((cached, _)) if cached == frame) {
            let geometry = FrameGeometry::new(frame)?;
            self.geometry_builds += 1;
            self.cache = Some((frame.clone(), geometry));
        }

        match &self.cache {
            Some((_, geometry)) => Ok(geometry),
            None => Err(CirsError::DegenerateGeometry(
                "frame geometry cache is empty".into(),
            )),
        }
    }
}

impl PositionTransformer for CirsTransformer {
    fn transform(
        &mut self,
        source: &Source,
        frame: &ObservingFrame,
    ) -> Result<ApparentPosition, CirsError> {
        let geometry = self.geometry(frame)?;
        apparent_position(source, geometry)
    }

    /// Recompute the frame geometry for this call only. The cache is left untouched.
    fn transform_uncached(
        &mut self,
        source: &Source,
        frame: &ObservingFrame,
    ) -> Result<ApparentPosition, CirsError> {
        let geometry = FrameGeometry::new(frame)?;
        self.geometry_builds += 1;
        apparent_position(source, &geometry)
    }
}
