//! # Astrometric corrections
//!
//! Vector-level steps of the apparent place reduction of a star. Positions are in AU,
//! velocities in AU/day, all referred to the GCRS (ICRS axes).
//!
//! The steps are applied in this order by [`crate::transform`]:
//!
//! 1. [`propagate_proper_motion`]: linear space motion from the catalog epoch.
//! 2. [`to_observer`]: origin shift from the barycenter to the observer, with light time.
//! 3. [`observed_radial_velocity`]: spectroscopic radial velocity seen by the observer.
//! 4. [`solar_deflection`]: gravitational bending of light by the Sun.
//! 5. [`Aberration::apply`]: relativistic aberration by the observer's velocity.

use nalgebra::Vector3;

use crate::catalog::Source;
use crate::constants::{AU_METERS, GE, GS, SECONDS_PER_DAY, VLIGHT_AU, VLIGHT_M};
use crate::ref_system::radec_to_unit;

/// Cosine threshold (about 1 arcsec) under which the source and the Sun are considered
/// aligned and the deflection is skipped.
const DEFLECTION_ALIGNMENT_LIMIT: f64 = 0.99999999999;

/// Propagate a barycentric position with a constant space velocity.
///
/// Arguments
/// ---------
/// * `pos`: position at the catalog epoch \[AU\].
/// * `vel`: space velocity \[AU/day\].
/// * `dt`: elapsed TDB days since the catalog epoch.
pub fn propagate_proper_motion(pos: &Vector3<f64>, vel: &Vector3<f64>, dt: f64) -> Vector3<f64> {
    pos + vel * dt
}

/// Move the origin of a barycentric position to the observer.
///
/// Returns
/// -------
/// * `(rel, lighttime)`: observer-to-source vector \[AU\] and its length in days of light travel.
pub fn to_observer(pos: &Vector3<f64>, pos_obs: &Vector3<f64>) -> (Vector3<f64>, f64) {
    let rel = pos - pos_obs;
    let lighttime = rel.norm() / VLIGHT_AU;
    (rel, lighttime)
}

/// Compute the radial velocity a spectroscopist would measure for a star.
///
/// The catalog barycentric radial velocity is corrected for the change of the line of
/// sight since the catalog epoch, then converted into the observer's frame, following
/// Lindegren & Dravins (2003), eq. (41), including the gravitational potentials of the
/// Sun and the Earth at the observer.
///
/// Arguments
/// ---------
/// * `source`: catalog entry, for the catalog direction and radial velocity.
/// * `rel`: observer-to-source vector \[AU\].
/// * `vel`: space velocity of the source \[AU/day\].
/// * `vel_obs`: barycentric velocity of the observer \[AU/day\].
/// * `d_obs_geo`: distance between the observer and the geocenter \[AU\].
/// * `d_obs_sun`: distance between the observer and the Sun \[AU\].
///
/// Returns
/// -------
/// * the observed radial velocity in km/s.
pub fn observed_radial_velocity(
    source: &Source,
    rel: &Vector3<f64>,
    vel: &Vector3<f64>,
    vel_obs: &Vector3<f64>,
    d_obs_geo: f64,
    d_obs_sun: f64,
) -> f64 {
    let c2 = VLIGHT_M * VLIGHT_M;
    // AU/day to m/s
    let toms = AU_METERS / SECONDS_PER_DAY;

    let uk = rel.normalize();
    let vo2 = vel_obs.norm_squared() * toms * toms;

    let r_geo = d_obs_geo * AU_METERS;
    let phigeo = if r_geo > 1.0e6 { GE / r_geo } else { 0.0 };
    let r_sun = d_obs_sun * AU_METERS;
    let phisun = if r_sun > 1.0e8 { GS / r_sun } else { 0.0 };

    let rel_factor = if d_obs_geo != 0.0 || d_obs_sun != 0.0 {
        1.0 - (phigeo + phisun) / c2 - 0.5 * vo2 / c2
    } else {
        1.0 - 1.550e-8
    };

    // change of view angle since the catalog epoch
    let du = uk - radec_to_unit(source.ra().to_radians(), source.dec().to_radians());
    let zc = source.radial_velocity() * 1.0e3 + vel.dot(&du) * toms;

    let zb1 = 1.0 + zc / VLIGHT_M;
    let kvobs = uk.dot(vel_obs) * toms;
    let zobs1 = zb1 * rel_factor / (1.0 + kvobs / VLIGHT_M);

    (zobs1 - 1.0) * VLIGHT_M / 1000.0
}

/// Apply the gravitational light deflection by the Sun (PPN γ = 1).
///
/// Arguments
/// ---------
/// * `pos1`: observer-to-source vector \[AU\].
/// * `pos_obs`: barycentric position of the observer \[AU\].
/// * `pos_sun`: barycentric position of the Sun \[AU\].
///
/// Returns
/// --------
/// * the deflected observer-to-source vector. Its length matches `pos1` to first order in
///   the deflection angle.
///
/// Remarks
/// -------
/// * When the source is within ~1 arcsec of the direction of the Sun, or opposite to it,
///   the vector is returned unchanged.
pub fn solar_deflection(
    pos1: &Vector3<f64>,
    pos_obs: &Vector3<f64>,
    pos_sun: &Vector3<f64>,
) -> Vector3<f64> {
    // Sun to source, and Sun to observer
    let pq = pos_obs + pos1 - pos_sun;
    let pe = pos_obs - pos_sun;

    let pmag = pos1.norm();
    let emag = pe.norm();
    let qmag = pq.norm();

    let phat = pos1 / pmag;
    let ehat = pe / emag;
    let qhat = pq / qmag;

    let pdotq = phat.dot(&qhat);
    let edotp = ehat.dot(&phat);
    let qdote = qhat.dot(&ehat);

    if edotp.abs() > DEFLECTION_ALIGNMENT_LIMIT {
        return *pos1;
    }

    let fac1 = 2.0 * GS / (VLIGHT_M * VLIGHT_M * emag * AU_METERS);
    let fac2 = 1.0 + qdote;

    (phat + fac1 * (pdotq * ehat - edotp * qhat) / fac2) * pmag
}

/// Relativistic aberration by the motion of the observer.
///
/// The factors depending only on the observer's velocity are computed once per frame
/// with [`Aberration::new`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aberration {
    /// Barycentric velocity of the observer \[AU/day\].
    velocity: Vector3<f64>,
    /// |v|, AU/day
    speed: f64,
    /// β = |v| / c
    beta: f64,
    /// 1/γ = √(1 − β²)
    gamma_inv: f64,
}

impl Aberration {
    pub fn new(velocity: Vector3<f64>) -> Self {
        let speed = velocity.norm();
        let beta = speed / VLIGHT_AU;
        Aberration {
            velocity,
            speed,
            beta,
            gamma_inv: (1.0 - beta * beta).sqrt(),
        }
    }

    /// Ratio of the observer's speed to the speed of light.
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Apply the aberration to an observer-to-source vector.
    ///
    /// Arguments
    /// ---------
    /// * `pos`: observer-to-source vector \[AU\], possibly already deflected.
    /// * `lighttime`: light travel time along the geometric path \[day\].
    ///
    /// Formula
    /// -------
    /// ```text
    /// p = β cos θ,   q = (1 + p / (1 + 1/γ)) · τ,   r = 1 + p
    /// pos' = (pos / γ + q · v) / r
    /// ```
    /// where θ is the angle between `pos` and the velocity and τ the light time.
    pub fn apply(&self, pos: &Vector3<f64>, lighttime: f64) -> Vector3<f64> {
        if self.speed == 0.0 {
            return *pos;
        }

        let p1mag = lighttime * VLIGHT_AU;
        let cosd = pos.dot(&self.velocity) / (p1mag * self.speed);
        let p = self.beta * cosd;
        let q = (1.0 + p / (1.0 + self.gamma_inv)) * lighttime;
        let r = 1.0 + p;

        (pos * self.gamma_inv + self.velocity * q) / r
    }
}
