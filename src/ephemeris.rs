//! # Low-precision Earth–Sun ephemeris
//!
//! Barycentric position and velocity of the Earth and barycentric position of the Sun,
//! referred to the mean equator and equinox of J2000.0 (ICRS axes to within the frame
//! bias), in AU and AU/day.
//!
//! ## Model
//!
//! - The geocentric Sun comes from the Bretagnon & Simon (1986) series, 50 periodic
//!   terms in longitude and distance, with a linear correction fitted to DE405 over
//!   1900–2100. Quoted accuracy is about 2″.
//! - The Earth velocity is a central finite difference over ±0.1 day.
//! - The Sun's offset from the solar system barycenter is estimated from Keplerian
//!   orbits of Jupiter, Saturn, Uranus and Neptune (Explanatory Supplement 1992, p. 316).
//!
//! The model is valid within three centuries of J2000.0; dates outside
//! [`EPHEMERIS_JD_RANGE`] are rejected.

use std::ops::RangeInclusive;
use std::sync::LazyLock;

use nalgebra::Vector3;

use crate::{
    cirs_errors::CirsError,
    constants::{DPI, JD_J2000, RADEG, RADSEC},
    earth_orientation::precession_matrix,
    ref_system::radec_to_unit,
    time::jd_to_mjd,
};

/// Julian dates (TDB) accepted by [`earth_sun_state`].
pub const EPHEMERIS_JD_RANGE: RangeInclusive<f64> = 2_340_000.5..=2_560_000.5;

/// Half-width of the finite-difference stencil for the Earth velocity, in days.
const VELOCITY_STEP: f64 = 0.1;

/// One periodic term of the solar longitude/distance series.
struct SunTerm {
    /// longitude amplitude, 1e-7 rad
    l: f64,
    /// distance amplitude, 1e-7 AU
    r: f64,
    /// phase, rad
    alpha: f64,
    /// frequency, rad per 10⁴ Julian years
    nu: f64,
}

const fn term(l: f64, r: f64, alpha: f64, nu: f64) -> SunTerm {
    SunTerm { l, r, alpha, nu }
}

#[rustfmt::skip]
const SUN_TERMS: [SunTerm; 50] = [
    term(403406.0, 0.0, 4.721964, 1.621043),
    term(195207.0, -97597.0, 5.937458, 62830.348067),
    term(119433.0, -59715.0, 1.115589, 62830.821524),
    term(112392.0, -56188.0, 5.781616, 62829.634302),
    term(3891.0, -1556.0, 5.5474, 125660.5691),
    term(2819.0, -1126.0, 1.5120, 125660.9845),
    term(1721.0, -861.0, 4.1897, 62832.4766),
    term(0.0, 941.0, 1.163, 0.813),
    term(660.0, -264.0, 5.415, 125659.310),
    term(350.0, -163.0, 4.315, 57533.850),
    term(334.0, 0.0, 4.553, -33.931),
    term(314.0, 309.0, 5.198, 777137.715),
    term(268.0, -158.0, 5.989, 78604.191),
    term(242.0, 0.0, 2.911, 5.412),
    term(234.0, -54.0, 1.423, 39302.098),
    term(158.0, 0.0, 0.061, -34.861),
    term(132.0, -93.0, 2.317, 115067.698),
    term(129.0, -20.0, 3.193, 15774.337),
    term(114.0, 0.0, 2.828, 5296.670),
    term(99.0, -47.0, 0.52, 58849.27),
    term(93.0, 0.0, 4.65, 5296.11),
    term(86.0, 0.0, 4.35, -3980.70),
    term(78.0, -33.0, 2.75, 52237.69),
    term(72.0, -32.0, 4.50, 55076.47),
    term(68.0, 0.0, 3.23, 261.08),
    term(64.0, -10.0, 1.22, 15773.85),
    term(46.0, -16.0, 0.14, 188491.03),
    term(38.0, 0.0, 3.44, -7756.55),
    term(37.0, 0.0, 4.37, 264.89),
    term(32.0, -24.0, 1.14, 117906.27),
    term(29.0, -13.0, 2.84, 55075.75),
    term(28.0, 0.0, 5.96, -7961.39),
    term(27.0, -9.0, 5.09, 188489.81),
    term(27.0, 0.0, 1.72, 2132.19),
    term(25.0, -17.0, 2.56, 109771.03),
    term(24.0, -11.0, 1.92, 54868.56),
    term(21.0, 0.0, 0.09, 25443.93),
    term(21.0, 31.0, 5.98, -55731.43),
    term(20.0, -10.0, 4.03, 60697.74),
    term(18.0, 0.0, 4.27, 2132.79),
    term(17.0, -12.0, 0.79, 109771.63),
    term(14.0, 0.0, 4.24, -7752.82),
    term(13.0, -5.0, 2.01, 188491.91),
    term(13.0, 0.0, 2.65, 207.81),
    term(13.0, 0.0, 4.98, 29424.63),
    term(12.0, 0.0, 0.93, -7.99),
    term(10.0, 0.0, 2.21, 46941.14),
    term(10.0, 0.0, 3.59, -68.29),
    term(10.0, 0.0, 1.50, 21463.25),
    term(10.0, -9.0, 2.55, 157208.40),
];

/// Mean orbital elements of one giant planet, angles in radians.
struct PlanetElements {
    /// inverse mass, in solar masses
    inv_mass: f64,
    /// semi-major axis, AU
    a: f64,
    e: f64,
    i: f64,
    /// longitude of the ascending node
    node: f64,
    /// longitude of perihelion
    peri: f64,
    /// mean longitude at J2000.0
    mean_lon: f64,
    /// mean motion, rad/day
    n: f64,
}

const GIANT_PLANETS: [PlanetElements; 4] = [
    // Jupiter
    PlanetElements {
        inv_mass: 1047.349,
        a: 5.203363,
        e: 0.048393,
        i: 0.022782,
        node: 1.755036,
        peri: 0.257503,
        mean_lon: 0.600470,
        n: 1.450138e-3,
    },
    // Saturn
    PlanetElements {
        inv_mass: 3497.898,
        a: 9.537070,
        e: 0.054151,
        i: 0.043362,
        node: 1.984702,
        peri: 1.613242,
        mean_lon: 0.871693,
        n: 5.841727e-4,
    },
    // Uranus
    PlanetElements {
        inv_mass: 22903.0,
        a: 19.191264,
        e: 0.047168,
        i: 0.013437,
        node: 1.295556,
        peri: 2.983889,
        mean_lon: 5.466933,
        n: 2.047497e-4,
    },
    // Neptune
    PlanetElements {
        inv_mass: 19412.2,
        a: 30.068963,
        e: 0.008586,
        i: 0.030878,
        node: 2.298977,
        peri: 0.784898,
        mean_lon: 5.321160,
        n: 1.043891e-4,
    },
];

/// Mass of the Sun plus the inner planets, in solar masses.
const INNER_SYSTEM_MASS: f64 = 1.0 + 5.977e-6;

/// Obliquity of the ecliptic at J2000.0, in degrees.
const OBLIQUITY_J2000: f64 = 23.4392794444;

/// Orbit orientation of one giant planet, precomputed once.
struct PlanetOrbit {
    /// `a·P`, with `P` the unit vector toward perihelion (equatorial J2000)
    p: Vector3<f64>,
    /// `a·√(1−e²)·Q`, with `Q` completing the orbital plane basis
    q: Vector3<f64>,
    e: f64,
    peri: f64,
    mean_lon: f64,
    n: f64,
    /// planet mass over the total mass of the system
    mass_ratio: f64,
}

static PLANET_ORBITS: LazyLock<[PlanetOrbit; 4]> = LazyLock::new(|| {
    let total_mass = INNER_SYSTEM_MASS + GIANT_PLANETS.iter().map(|p| 1.0 / p.inv_mass).sum::<f64>();
    let (se, ce) = (OBLIQUITY_J2000 * RADEG).sin_cos();

    GIANT_PLANETS.map(|pl| {
        let (si, ci) = pl.i.sin_cos();
        let (sn, cn) = pl.node.sin_cos();
        let (sw, cw) = (pl.peri - pl.node).sin_cos();

        // Brouwer & Clemence (1961), pp. 35-36, rotated from ecliptic to equator
        let p = Vector3::new(
            cw * cn - sw * sn * ci,
            (cw * sn + sw * cn * ci) * ce - sw * si * se,
            (cw * sn + sw * cn * ci) * se + sw * si * ce,
        );
        let q = Vector3::new(
            -sw * cn - cw * sn * ci,
            (-sw * sn + cw * cn * ci) * ce - cw * si * se,
            (-sw * sn + cw * cn * ci) * se + cw * si * ce,
        );

        PlanetOrbit {
            p: pl.a * p,
            q: pl.a * (1.0 - pl.e * pl.e).sqrt() * q,
            e: pl.e,
            peri: pl.peri,
            mean_lon: pl.mean_lon,
            n: pl.n,
            mass_ratio: 1.0 / (pl.inv_mass * total_mass),
        }
    })
});

/// Barycentric state of the Earth and the Sun at one date.
///
/// All vectors are referred to the mean equator and equinox of J2000.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EarthSunState {
    /// Barycentric position of the Earth, AU.
    pub earth_position: Vector3<f64>,
    /// Barycentric velocity of the Earth, AU/day.
    pub earth_velocity: Vector3<f64>,
    /// Barycentric position of the Sun, AU.
    pub sun_position: Vector3<f64>,
}

/// Geocentric equatorial coordinates of the Sun referred to the mean equator and
/// equinox of date.
///
/// Arguments
/// ---------
/// * `jd`: Julian date, TT or TDB.
///
/// Returns
/// -------
/// * `(α, δ, r)`: right ascension and declination in radians, distance in AU.
pub fn sun_of_date(jd: f64) -> (f64, f64, f64) {
    const FACTOR: f64 = 1.0e-07;

    // 10⁴ Julian years and Julian centuries from J2000.0
    let u = (jd - JD_J2000) / 3_652_500.0;
    let t = u * 100.0;

    let (sum_lon, sum_r) = SUN_TERMS.iter().fold((0.0, 0.0), |(sl, sr), c| {
        let arg = c.alpha + c.nu * u;
        (sl + c.l * arg.sin(), sr + c.r * arg.cos())
    });

    let lon = 4.9353929 + 62833.1961680 * u + FACTOR * sum_lon
        + (-0.1371679461 - 0.2918293271 * t) * RADSEC;
    let lon = lon.rem_euclid(DPI);

    let dist = 1.0001026 + FACTOR * sum_r;

    let emean = (84381.406 + (-46.836769 + (-0.0001831 + 0.00200340 * t) * t) * t) * RADSEC;

    let (sin_lon, cos_lon) = lon.sin_cos();
    let ra = (emean.cos() * sin_lon).atan2(cos_lon).rem_euclid(DPI);
    let dec = (emean.sin() * sin_lon).asin();

    (ra, dec, dist)
}

/// Heliocentric position of the Earth, mean equator and equinox of J2000.0, AU.
fn heliocentric_earth(jd: f64) -> Vector3<f64> {
    let (ra, dec, dist) = sun_of_date(jd);
    let sun_of_date = radec_to_unit(ra, dec) * dist;
    -(precession_matrix(jd_to_mjd(jd)).transpose() * sun_of_date)
}

/// Position and velocity of the Sun relative to the solar system barycenter.
fn sun_barycentric_offset(jd_tdb: f64) -> (Vector3<f64>, Vector3<f64>) {
    PLANET_ORBITS.iter().fold(
        (Vector3::zeros(), Vector3::zeros()),
        |(pos, vel), orbit| {
            let e = orbit.e;
            let mlon = orbit.mean_lon + orbit.n * (jd_tdb - JD_J2000);
            let ma = (mlon - orbit.peri) % DPI;
            // second-order eccentric anomaly
            let ecc_anomaly = ma + e * ma.sin() + 0.5 * e * e * (2.0 * ma).sin();
            let (sinu, cosu) = ecc_anomaly.sin_cos();
            let anr = orbit.n / (1.0 - e * cosu);

            let pplan = orbit.p * (cosu - e) + orbit.q * sinu;
            let vplan = (orbit.q * cosu - orbit.p * sinu) * anr;

            // the Sun moves opposite to each planet, weighted by its mass
            (
                pos - pplan * orbit.mass_ratio,
                vel - vplan * orbit.mass_ratio,
            )
        },
    )
}

/// Compute the barycentric state of the Earth and the Sun.
///
/// Arguments
/// ---------
/// * `jd_tdb`: Julian date in the TDB scale.
///
/// Errors
/// ------
/// * [`CirsError::EphemerisOutOfRange`] if `jd_tdb` is outside [`EPHEMERIS_JD_RANGE`].
pub fn earth_sun_state(jd_tdb: f64) -> Result<EarthSunState, CirsError> {
    if !EPHEMERIS_JD_RANGE.contains(&jd_tdb) {
        return Err(CirsError::EphemerisOutOfRange(jd_tdb));
    }

    let before = heliocentric_earth(jd_tdb - VELOCITY_STEP);
    let now = heliocentric_earth(jd_tdb);
    let after = heliocentric_earth(jd_tdb + VELOCITY_STEP);
    let helio_velocity = (after - before) / (2.0 * VELOCITY_STEP);

    let (sun_position, sun_velocity) = sun_barycentric_offset(jd_tdb);

    Ok(EarthSunState {
        earth_position: now + sun_position,
        earth_velocity: helio_velocity + sun_velocity,
        sun_position,
    })
}

#[cfg(test)]
mod ephemeris_test {
    use super::*;
    use crate::constants::VLIGHT_AU;
    use approx::assert_relative_eq;

    /// JD (TDB) of 2025-01-25T15:33:09
    const JD_2025: f64 = 2_460_701.1480229;

    #[test]
    fn test_sun_of_date_near_equinox() {
        // March equinox 2000 ≈ JD 2451623.816
        let (ra, dec, dist) = sun_of_date(2_451_623.816);
        let ra_wrapped = if ra > std::f64::consts::PI { ra - DPI } else { ra };
        assert!(ra_wrapped.abs() < 0.01, "ra = {ra}");
        assert!(dec.abs() < 0.005, "dec = {dec}");
        assert!((dist - 0.996).abs() < 0.002, "dist = {dist}");
    }

    #[test]
    fn test_sun_of_date_january() {
        // perihelion season: distance close to 0.983 AU, Sun deep in the south
        let (ra, dec, dist) = sun_of_date(JD_2025);
        assert!((dist - 0.9845).abs() < 0.002, "dist = {dist}");
        assert!(dec < -18.0 * RADEG && dec > -20.0 * RADEG, "dec = {dec}");
        // ecliptic longitude ≈ 305.7°, i.e. right ascension close to 20h 32m
        assert!((ra / RADEG - 308.0).abs() < 1.5, "ra = {}", ra / RADEG);
    }

    #[test]
    fn test_earth_sun_state() {
        let state = earth_sun_state(JD_2025).unwrap();

        let helio = state.earth_position - state.sun_position;
        assert!((helio.norm() - 0.9845).abs() < 0.002);

        // orbital speed close to 30.3 km/s near perihelion, i.e. v/c ≈ 1.01e-4
        let beta = state.earth_velocity.norm() / VLIGHT_AU;
        assert!(beta > 0.97e-4 && beta < 1.03e-4, "beta = {beta}");

        // the velocity is nearly perpendicular to the radius vector
        let cos_angle = helio.normalize().dot(&state.earth_velocity.normalize());
        assert!(cos_angle.abs() < 0.03);

        // the barycenter stays within ~2 solar radii of the Sun center
        assert!(state.sun_position.norm() < 0.02);
    }

    #[test]
    fn test_velocity_matches_motion() {
        let s0 = earth_sun_state(JD_2025).unwrap();
        let s1 = earth_sun_state(JD_2025 + 0.01).unwrap();
        let predicted = s0.earth_position + s0.earth_velocity * 0.01;
        assert_relative_eq!(s1.earth_position, predicted, epsilon = 1e-7);
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(
            earth_sun_state(2_300_000.0).unwrap_err(),
            CirsError::EphemerisOutOfRange(2_300_000.0)
        );
        assert!(earth_sun_state(2_600_000.0).is_err());
        assert!(earth_sun_state(*EPHEMERIS_JD_RANGE.end()).is_ok());
    }
}
