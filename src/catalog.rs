//! # Synthetic sidereal catalog
//!
//! [`Source`] holds the barycentric astrometric parameters of one star at the catalog
//! epoch J2000.0 (TDB). [`generate_catalog`] draws a catalog of independent uniformly
//! distributed sources from an explicit random generator:
//!
//! | field | distribution |
//! |-------|--------------|
//! | right ascension | `360·(u−0.5)`, folded into [0°, 360°) |
//! | declination | `180·(u−0.5)` ∈ [−90°, 90°) |
//! | distance | `1 + 1000·u` ∈ [1, 1001) pc |
//! | proper motions | `100·(u−0.5)` ∈ [−50, 50) mas/yr each |
//! | radial velocity | `1000·(u−0.5)` ∈ [−500, 500) km/s |
//!
//! with `u` uniform in [0, 1).

use nalgebra::Vector3;
use rand::Rng;

use crate::cirs_errors::CirsError;
use crate::constants::{
    Degree, Parsec, AU, JULIAN_YEAR_DAYS, RADMAS, SECONDS_PER_DAY, VLIGHT,
};
use crate::ref_system::local_triad;

/// A catalog star at the reference epoch J2000.0.
///
/// Sources are immutable once built, by [`Source::new`] or [`Source::random`], so every
/// instance satisfies the constructor's checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Source {
    /// ICRS right ascension, degrees in [0, 360).
    ra: Degree,
    /// ICRS declination, degrees in [−90, 90].
    dec: Degree,
    /// Distance from the solar system barycenter, parsecs.
    distance: Parsec,
    /// Proper motion in right ascension times cos(δ), mas/yr.
    pm_ra_cosdec: f64,
    /// Proper motion in declination, mas/yr.
    pm_dec: f64,
    /// Barycentric radial velocity, km/s (positive receding).
    radial_velocity: f64,
}

impl Source {
    /// Build a source from explicit astrometric parameters.
    ///
    /// The right ascension is folded into [0°, 360°).
    ///
    /// Errors
    /// ------
    /// * [`CirsError::InvalidSource`] if a value is not finite, the declination is outside
    ///   [−90°, 90°], the distance is not positive, or |radial velocity| reaches c.
    pub fn new(
        ra: Degree,
        dec: Degree,
        distance: Parsec,
        pm_ra_cosdec: f64,
        pm_dec: f64,
        radial_velocity: f64,
    ) -> Result<Self, CirsError> {
        let values = [ra, dec, distance, pm_ra_cosdec, pm_dec, radial_velocity];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(CirsError::InvalidSource(format!(
                "non-finite parameter in {values:?}"
            )));
        }
        if !(-90.0..=90.0).contains(&dec) {
            return Err(CirsError::InvalidSource(format!(
                "declination {dec} outside [-90, 90]"
            )));
        }
        if distance <= 0.0 {
            return Err(CirsError::InvalidSource(format!(
                "distance must be positive, got {distance} pc"
            )));
        }
        if radial_velocity.abs() >= VLIGHT {
            return Err(CirsError::InvalidSource(format!(
                "radial velocity {radial_velocity} km/s is not below c"
            )));
        }

        Ok(Source {
            ra: normalize_degrees(ra),
            dec,
            distance,
            pm_ra_cosdec,
            pm_dec,
            radial_velocity,
        })
    }

    /// Draw one random source.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let ra = normalize_degrees(360.0 * (rng.random::<f64>() - 0.5));
        let dec = 180.0 * (rng.random::<f64>() - 0.5);
        let distance = 1.0 + 1000.0 * rng.random::<f64>();
        let pm_ra_cosdec = 100.0 * (rng.random::<f64>() - 0.5);
        let pm_dec = 100.0 * (rng.random::<f64>() - 0.5);
        let radial_velocity = 1000.0 * (rng.random::<f64>() - 0.5);

        Source {
            ra,
            dec,
            distance,
            pm_ra_cosdec,
            pm_dec,
            radial_velocity,
        }
    }

    /// ICRS right ascension, degrees in [0, 360).
    pub fn ra(&self) -> Degree {
        self.ra
    }

    /// ICRS declination, degrees.
    pub fn dec(&self) -> Degree {
        self.dec
    }

    /// Barycentric distance, parsecs.
    pub fn distance(&self) -> Parsec {
        self.distance
    }

    /// mas/yr
    pub fn pm_ra_cosdec(&self) -> f64 {
        self.pm_ra_cosdec
    }

    /// mas/yr
    pub fn pm_dec(&self) -> f64 {
        self.pm_dec
    }

    /// Barycentric radial velocity, km/s.
    pub fn radial_velocity(&self) -> f64 {
        self.radial_velocity
    }

    /// Parallax in milliarcseconds.
    pub fn parallax_mas(&self) -> f64 {
        1000.0 / self.distance
    }

    /// Barycentric position \[AU\] and space velocity \[AU/day\] at the catalog epoch.
    ///
    /// The velocity combines the proper motion, scaled by the distance, and the radial
    /// velocity. All three components carry the Doppler factor `k = 1 / (1 − v_r/c)`,
    /// which turns the observed rates into rates in barycentric coordinate time.
    ///
    /// Errors
    /// ------
    /// * [`CirsError::DegenerateGeometry`] if the radial velocity reaches c.
    pub fn barycentric_state(&self) -> Result<(Vector3<f64>, Vector3<f64>), CirsError> {
        let doppler = 1.0 - self.radial_velocity / VLIGHT;
        if doppler <= 0.0 {
            return Err(CirsError::DegenerateGeometry(format!(
                "radial velocity {} km/s is not below c",
                self.radial_velocity
            )));
        }
        let k = 1.0 / doppler;

        let paralx = self.parallax_mas();
        let dist = 1.0 / (paralx * RADMAS).sin();

        let (east, north, radial) = local_triad(self.ra.to_radians(), self.dec.to_radians());

        let pmr = self.pm_ra_cosdec / (paralx * JULIAN_YEAR_DAYS) * k;
        let pmd = self.pm_dec / (paralx * JULIAN_YEAR_DAYS) * k;
        let rvl = self.radial_velocity * SECONDS_PER_DAY / AU * k;

        Ok((radial * dist, east * pmr + north * pmd + radial * rvl))
    }
}

/// Fold an angle in degrees into [0, 360).
fn normalize_degrees(angle: Degree) -> Degree {
    let folded = angle.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360
    if folded >= 360.0 {
        0.0
    } else {
        folded
    }
}

/// Generate `n` random sources, consuming the generator in catalog order.
pub fn generate_catalog<R: Rng>(n: usize, rng: &mut R) -> Vec<Source> {
    (0..n).map(|_| Source::random(rng)).collect()
}

#[cfg(test)]
mod catalog_test {
    use super::*;
    use crate::constants::VLIGHT_AU;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(-180.0), 180.0);
        assert_eq!(normalize_degrees(359.5), 359.5);
        assert_eq!(normalize_degrees(-1e-15), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
    }

    #[test]
    fn test_generate_catalog_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        let catalog = generate_catalog(2000, &mut rng);
        assert_eq!(catalog.len(), 2000);

        for s in &catalog {
            assert!((0.0..360.0).contains(&s.ra()), "ra = {}", s.ra());
            assert!((-90.0..90.0).contains(&s.dec()), "dec = {}", s.dec());
            assert!((1.0..1001.0).contains(&s.distance()));
            assert!((-50.0..50.0).contains(&s.pm_ra_cosdec()));
            assert!((-50.0..50.0).contains(&s.pm_dec()));
            assert!((-500.0..500.0).contains(&s.radial_velocity()));
        }
    }

    #[test]
    fn test_generate_catalog_spreads_over_sky() {
        let mut rng = StdRng::seed_from_u64(7);
        let catalog = generate_catalog(1000, &mut rng);
        assert!(catalog.iter().any(|s| s.ra() < 90.0));
        assert!(catalog.iter().any(|s| s.ra() > 270.0));
        assert!(catalog.iter().any(|s| s.dec() < -45.0));
        assert!(catalog.iter().any(|s| s.dec() > 45.0));
    }

    #[test]
    fn test_generate_empty_catalog() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generate_catalog(0, &mut rng).is_empty());
    }

    #[test]
    fn test_source_validation() {
        assert!(Source::new(10.0, 95.0, 10.0, 0.0, 0.0, 0.0).is_err());
        assert!(Source::new(10.0, 5.0, 0.0, 0.0, 0.0, 0.0).is_err());
        assert!(Source::new(10.0, 5.0, 10.0, f64::NAN, 0.0, 0.0).is_err());
        assert!(Source::new(10.0, 5.0, 10.0, 0.0, 0.0, 3.0e5).is_err());

        let s = Source::new(-90.0, 5.0, 10.0, 1.0, 2.0, 3.0).unwrap();
        assert_eq!(s.ra(), 270.0);
        assert_eq!(s.dec(), 5.0);
        assert_eq!(s.distance(), 10.0);
        assert_eq!((s.pm_ra_cosdec(), s.pm_dec()), (1.0, 2.0));
        assert_eq!(s.radial_velocity(), 3.0);
        assert_eq!(s.parallax_mas(), 100.0);
    }

    #[test]
    fn test_barycentric_state_position() {
        let s = Source::new(90.0, 0.0, 1.0, 0.0, 0.0, 0.0).unwrap();
        let (pos, vel) = s.barycentric_state().unwrap();

        // one parsec along +y
        assert_relative_eq!(pos.y, 206264.80624548031, epsilon = 1e-5);
        assert_relative_eq!(pos.x, 0.0, epsilon = 1e-9);
        assert_eq!(vel, Vector3::zeros());
    }

    #[test]
    fn test_barycentric_state_velocity() {
        // 10 pc, 100 mas/yr eastward at α = 0, δ = 0 is 4.74 km/s toward +y
        let s = Source::new(0.0, 0.0, 10.0, 100.0, 0.0, 0.0).unwrap();
        let (_, vel) = s.barycentric_state().unwrap();
        let km_s = vel.y * AU / SECONDS_PER_DAY;
        assert_relative_eq!(km_s, 4.740470463, epsilon = 1e-6);
        assert_relative_eq!(vel.x, 0.0, epsilon = 1e-15);

        // receding source, Doppler-scaled radial component
        let s = Source::new(0.0, 0.0, 10.0, 0.0, 0.0, 100.0).unwrap();
        let (_, vel) = s.barycentric_state().unwrap();
        let k = 1.0 / (1.0 - 100.0 / VLIGHT);
        assert_relative_eq!(vel.x, 100.0 * SECONDS_PER_DAY / AU * k, epsilon = 1e-15);
        assert!(vel.x < VLIGHT_AU);
    }

    #[test]
    fn test_barycentric_state_degenerate() {
        // only reachable from inside the module, Source::new rejects it
        let s = Source {
            ra: 0.0,
            dec: 0.0,
            distance: 10.0,
            pm_ra_cosdec: 0.0,
            pm_dec: 0.0,
            radial_velocity: VLIGHT,
        };
        assert!(matches!(
            s.barycentric_state(),
            Err(CirsError::DegenerateGeometry(_))
        ));
    }
}
