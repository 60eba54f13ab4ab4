use hifitime::Epoch;
use std::str::FromStr;

use crate::cirs_errors::CirsError;
use crate::constants::{Radian, DPI, ERA_RATE, JDTOMJD, MJD, SECONDS_PER_DAY, T2000};

/// Parse a date in the format YYYY-MM-ddTHH:mm:ss into an [`Epoch`].
///
/// Dates without an explicit time scale suffix are read as UTC.
///
/// Argument
/// --------
/// * `date`: ISO 8601 calendar date, e.g. `"2025-01-25T15:32:00"`
///
/// Return
/// ------
/// * the parsed epoch, or [`CirsError::InvalidEpoch`] if the string is malformed
pub fn parse_epoch(date: &str) -> Result<Epoch, CirsError> {
    Epoch::from_str(date).map_err(|err| CirsError::InvalidEpoch(format!("{date}: {err}")))
}

/// Transformation from modified julian date (MJD) to julian date (JD)
pub fn mjd_to_jd(mjd: MJD) -> f64 {
    mjd + JDTOMJD
}

/// Transformation from julian date (JD) to modified julian date (MJD)
pub fn jd_to_mjd(jd: f64) -> MJD {
    jd - JDTOMJD
}

/// The time arguments of one observing instant, expressed in every scale used by the reduction.
///
/// All values are Modified Julian Dates in days.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScales {
    pub mjd_utc: MJD,
    pub mjd_ut1: MJD,
    pub mjd_tt: MJD,
    pub mjd_tdb: MJD,
}

impl TimeScales {
    /// Derive the UTC, UT1, TT and TDB dates of an epoch.
    ///
    /// UT1 is not provided by `hifitime` without a remote Earth orientation table, so it is
    /// obtained from UTC and the supplied UT1 − UTC offset.
    ///
    /// Arguments
    /// ---------
    /// * `epoch`: instant of observation.
    /// * `dut1`: UT1 − UTC in seconds.
    pub fn new(epoch: &Epoch, dut1: f64) -> Self {
        let mjd_utc = epoch.to_mjd_utc_days();
        TimeScales {
            mjd_utc,
            mjd_ut1: mjd_utc + dut1 / SECONDS_PER_DAY,
            mjd_tt: epoch.to_mjd_tt_days(),
            mjd_tdb: epoch.to_jde_tdb_days() - JDTOMJD,
        }
    }

    /// Julian date in the TDB scale.
    pub fn jd_tdb(&self) -> f64 {
        mjd_to_jd(self.mjd_tdb)
    }
}

/// Compute the Greenwich Mean Sidereal Time (GMST) in radians
/// for a given Modified Julian Date (UT1 time scale).
///
/// This function implements the IAU 1982 polynomial formula
/// for the mean sidereal time at 0h UT1, plus the fractional-day
/// correction term due to Earth's rotation rate.
///
/// # Arguments
/// * `tjm` - Modified Julian Date (MJD, UT1 time scale)
///
/// # Returns
/// * GMST angle in radians, normalized to the interval [0, 2π).
///
/// # References
/// * IAU 1982, IERS Conventions 1996.
/// * Explanatory Supplement to the Astronomical Almanac (1992).
pub fn gmst(tjm: MJD) -> Radian {
    // Polynomial coefficients for GMST at 0h UT1 (in seconds)
    const C0: f64 = 24110.54841;
    const C1: f64 = 8640184.812866;
    const C2: f64 = 9.3104e-2;
    const C3: f64 = -6.2e-6;

    // Ratio of sidereal day to solar day
    const RAP: f64 = 1.00273790934;

    let itjm = tjm.floor();
    let t = (itjm - T2000) / 36525.0;

    // GMST at 0h UT1, seconds to radians
    let gmst0 = (((C3 * t + C2) * t + C1) * t + C0) * DPI / SECONDS_PER_DAY;

    // Rotation accumulated since 0h UT1, scaled to sidereal rate
    let h = (tjm - itjm) * DPI;

    (gmst0 + h * RAP).rem_euclid(DPI)
}

/// Compute the Earth Rotation Angle (IAU 2000) in radians.
///
/// The ERA is the angle between the Celestial Intermediate Origin and the
/// Terrestrial Intermediate Origin, a linear function of UT1:
///
/// ```text
/// θ = 2π · (0.7790572732640 + 1.00273781191135448 · Tu),   Tu = JD_UT1 − 2451545.0
/// ```
///
/// The integer part of `Tu` is dropped before the product to keep the fractional
/// turns accurate.
///
/// # Arguments
/// * `tjm` - Modified Julian Date (MJD, UT1 time scale)
///
/// # Returns
/// * ERA in radians, normalized to the interval [0, 2π).
pub fn earth_rotation_angle(tjm: MJD) -> Radian {
    let tu = tjm - T2000;
    let turns = tu.fract() + 0.7790572732640 + (ERA_RATE - 1.0) * tu;
    turns.rem_euclid(1.0) * DPI
}

#[cfg(test)]
mod time_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_epoch() {
        let epoch = parse_epoch("2021-01-01T00:00:00").unwrap();
        assert_eq!(epoch.to_mjd_utc_days(), 59215.0);

        let epoch = parse_epoch("2025-01-25T15:32:00").unwrap();
        assert_relative_eq!(
            epoch.to_mjd_utc_days(),
            60700.0 + (15.0 * 60.0 + 32.0) / 1440.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_parse_epoch_rejects_garbage() {
        let err = parse_epoch("not a date").unwrap_err();
        assert!(matches!(err, CirsError::InvalidEpoch(_)));
    }

    #[test]
    fn test_jd_mjd() {
        assert_eq!(mjd_to_jd(59215.0), 2459215.5);
        assert_eq!(jd_to_mjd(2459216.5), 59216.0);
    }

    #[test]
    fn test_time_scales() {
        let epoch = parse_epoch("2021-01-01T00:00:00").unwrap();
        let scales = TimeScales::new(&epoch, 0.114);

        assert_eq!(scales.mjd_utc, 59215.0);
        assert_relative_eq!(scales.mjd_tt, 59215.00080074074, epsilon = 1e-10);
        assert_relative_eq!(scales.mjd_ut1, 59215.0 + 0.114 / 86400.0, epsilon = 1e-12);

        // TDB - TT stays within 2 ms
        assert!((scales.mjd_tdb - scales.mjd_tt).abs() * SECONDS_PER_DAY < 2e-3);
        assert_relative_eq!(scales.jd_tdb(), scales.mjd_tdb + 2400000.5);
        assert_relative_eq!(scales.jd_tdb(), epoch.to_jde_tdb_days(), epsilon = 1e-9);
    }

    #[test]
    fn test_time_scales_tdb_of_reference_time() {
        // 2025-01-25T15:32:00 UTC: TT = UTC + 69.184 s, TDB within 2 ms of TT
        let epoch = parse_epoch("2025-01-25T15:32:00").unwrap();
        let scales = TimeScales::new(&epoch, 0.114);

        let utc = 60700.0 + (15.0 * 60.0 + 32.0) / 1440.0;
        assert_relative_eq!(scales.mjd_tt, utc + 69.184 / SECONDS_PER_DAY, epsilon = 1e-9);
        assert!((scales.mjd_tdb - scales.mjd_tt).abs() * SECONDS_PER_DAY < 2e-3);
        assert_relative_eq!(scales.jd_tdb(), 2_460_701.1480229, epsilon = 1e-6);
    }

    #[test]
    fn test_gmst() {
        let tut = 57028.478514610404;
        let res_gmst = gmst(tut);
        assert_relative_eq!(res_gmst, 4.851925725092499, epsilon = 1e-12);

        let tut = T2000;
        let res_gmst = gmst(tut);
        assert_relative_eq!(res_gmst, 4.894961212789145, epsilon = 1e-12);
    }

    #[test]
    fn test_earth_rotation_angle() {
        assert_relative_eq!(
            earth_rotation_angle(T2000),
            0.7790572732640 * DPI,
            epsilon = 1e-12
        );

        // ERA and GMST agree to the µs level at J2000
        assert!((earth_rotation_angle(T2000) - gmst(T2000)).abs() < 1e-9);

        // one UT1 day advances the ERA by 2π·(ERA_RATE - 1) modulo a full turn
        let d = earth_rotation_angle(T2000 + 1.0) - earth_rotation_angle(T2000);
        assert_relative_eq!(d.rem_euclid(DPI), (ERA_RATE - 1.0) * DPI, epsilon = 1e-12);
    }

    #[test]
    fn test_era_range() {
        for k in 0..100 {
            let era = earth_rotation_angle(60000.0 + 3.7 * k as f64 - 200.0);
            assert!((0.0..DPI).contains(&era));
        }
    }
}
