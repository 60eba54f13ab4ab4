//! # Constants and type definitions for cirs-bench
//!
//! This module centralizes the **physical constants**, **conversion factors**, and **type aliases**
//! shared by the reduction pipeline and the benchmark driver.
//!
//! ## Overview
//!
//! - Astronomical and geophysical constants (IAU 2012 AU, GRS80 ellipsoid, GM of Sun and Earth)
//! - Unit conversions (degrees ↔ radians, mas ↔ radians, km/s ↔ AU/day)
//! - Reference epochs (J2000.0 in JD and MJD)
//! - Default parameters of the benchmark observing frames

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Number of days in a Julian year
pub const JULIAN_YEAR_DAYS: f64 = 365.25;

/// Astronomical Unit in kilometers (IAU 2012)
pub const AU: f64 = 149_597_870.7;

/// Astronomical Unit in meters
pub const AU_METERS: f64 = AU * 1000.0;

/// MJD epoch of J2000.0 (2000-01-01 12:00:00 TT)
pub const T2000: f64 = 51544.5;

/// Julian date of J2000.0
pub const JD_J2000: f64 = 2_451_545.0;

/// Conversion factor between Julian Date and Modified Julian Date
pub const JDTOMJD: f64 = 2400000.5;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Arcseconds → radians
pub const RADSEC: f64 = std::f64::consts::PI / 648000.0;

/// Milliarcseconds → radians
pub const RADMAS: f64 = RADSEC / 1000.0;

/// Earth equatorial radius in meters (GRS1980/WGS84)
pub const EARTH_MAJOR_AXIS: f64 = 6_378_137.0;

/// Earth polar radius in meters (GRS1980/WGS84)
pub const EARTH_MINOR_AXIS: f64 = 6_356_752.3;

/// Earth radius expressed in astronomical units
pub const ERAU: f64 = (EARTH_MAJOR_AXIS / 1000.) / AU;

/// Speed of light in km/s
pub const VLIGHT: f64 = 2.99792458e5;

/// Speed of light in m/s
pub const VLIGHT_M: f64 = VLIGHT * 1000.0;

/// Speed of light in astronomical units per day
pub const VLIGHT_AU: f64 = VLIGHT / AU * SECONDS_PER_DAY;

/// Heliocentric gravitational constant GM☉ in m³/s² (TDB-compatible)
pub const GS: f64 = 1.32712440017987e20;

/// Geocentric gravitational constant GM⊕ in m³/s²
pub const GE: f64 = 3.98600433e14;

/// Ratio of the Earth rotation angle rate to the solar day
pub const ERA_RATE: f64 = 1.00273781191135448;

// -------------------------------------------------------------------------------------------------
// Benchmark defaults
// -------------------------------------------------------------------------------------------------

/// Observing instant shared by the fixed-frame phase and used as the anchor of random frames (UTC)
pub const REFERENCE_TIME: &str = "2025-01-25T15:32:00";

/// Geodetic longitude of the fixed observing site, in degrees east
pub const FIXED_SITE_LONGITUDE: Degree = 6.16;

/// Geodetic latitude of the fixed observing site, in degrees
pub const FIXED_SITE_LATITUDE: Degree = 42.7;

/// Height of every benchmark site above the ellipsoid, in meters
pub const SITE_HEIGHT: Meter = 2500.0;

/// Width of the window preceding [`REFERENCE_TIME`] in which random frames are drawn, in days
pub const MAX_TIME_OFFSET_DAYS: f64 = 365.0;

/// Default catalog size
pub const DEFAULT_SOURCE_COUNT: usize = 300;

/// UT1 − UTC, in seconds (IERS Bulletin A)
pub const DEFAULT_DUT1: f64 = 0.114;

/// Polar offset x, in milliarcseconds (IERS Bulletin A)
pub const DEFAULT_POLAR_X: MilliArcSec = 230.0;

/// Polar offset y, in milliarcseconds (IERS Bulletin A)
pub const DEFAULT_POLAR_Y: MilliArcSec = -62.0;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in arcseconds
pub type ArcSec = f64;
/// Angle in milliarcseconds
pub type MilliArcSec = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in meters
pub type Meter = f64;
/// Distance in parsecs
pub type Parsec = f64;
/// Modified Julian Date (days)
pub type MJD = f64;
