//! # Earth orientation
//!
//! Precession, nutation, frame bias and Earth rotation quantities needed to rotate
//! vectors between the GCRS, the true equator and equinox of date, the CIRS and the
//! terrestrial frame.
//!
//! ## Conventions
//!
//! Every matrix returned here is a **change of basis**: it maps the components of a fixed
//! vector in the source frame to its components in the target frame (`x_target = M · x_source`).
//! They are assembled from [`rotmt`], which builds **active** rotations, so a passive rotation
//! `R_k(θ)` of the IAU literature is written `rotmt(-θ, k)`.
//!
//! ```text
//!  GCRS --B--> mean J2000 --P--> mean of date --N--> true of date --R3(-EO)--> CIRS
//!                                                        ^
//!  ITRS --W--> TIRS --R3(-GAST)-------------------------/
//! ```
//!
//! Models: IAU 1976 precession, IAU 1980 nutation, IAU 1982 GMST, IAU 2000 ERA.

use nalgebra::{Matrix3, Vector3};

use crate::{
    cirs_errors::CirsError,
    constants::{
        ArcSec, MilliArcSec, Radian, DEFAULT_DUT1, DEFAULT_POLAR_X, DEFAULT_POLAR_Y, DPI, MJD,
        RADEG, RADMAS, RADSEC, T2000,
    },
    ref_system::rotmt,
    time::{earth_rotation_angle, gmst},
};

/// Compute the mean obliquity of the ecliptic at a given epoch (IAU 1976 model).
///
/// Arguments
/// ---------
/// * `tjm`: Modified Julian Date (TT scale).
///
/// Returns
/// --------
/// * Mean obliquity of the ecliptic in radians.
///
/// Formula
/// -------
/// ```text
/// ε(t) = ε₀ + ε₁·T + ε₂·T² + ε₃·T³,   T = (tjm - T2000) / 36525
/// ```
/// evaluated with Horner's method, coefficients in arcseconds.
pub fn mean_obliquity(tjm: MJD) -> Radian {
    let ob0 = ((23.0 * 3600.0 + 26.0 * 60.0) + 21.448) * RADSEC;
    let ob1 = -46.815 * RADSEC;
    let ob2 = -0.0006 * RADSEC;
    let ob3 = 0.00181 * RADSEC;

    let t = (tjm - T2000) / 36525.0;

    ((ob3 * t + ob2) * t + ob1) * t + ob0
}

/// Compute the nutation angles in longitude and obliquity using the IAU 1980 (Wahr) model.
///
/// The series depends on the five fundamental arguments (mean anomalies of the Moon and
/// the Sun, argument of latitude of the Moon, mean elongation of the Moon, longitude of
/// the lunar ascending node), expanded here as products of their sines and cosines.
///
/// Arguments
/// ---------
/// * `tjm`: Modified Julian Date (TT scale).
///
/// Returns
/// --------
/// * `(Δψ, Δε)` in **arcseconds**.
pub fn nutation_angles(tjm: MJD) -> (ArcSec, ArcSec) {
    // Compute the fundamental lunar and solar arguments (in radians)
    let t1 = (tjm - T2000) / 36525.0;
    let t = t1;
    let t2 = t * t;
    let t3 = t2 * t;

    let dl = (485866.733 + 1717915922.633 * t1 + 31.310 * t2 + 0.064 * t3) * RADSEC;
    let dp = (1287099.804 + 129596581.224 * t1 - 0.577 * t2 - 0.012 * t3) * RADSEC;
    let df = (335778.877 + 1739527263.137 * t1 - 13.257 * t2 + 0.011 * t3) * RADSEC;
    let dd = (1072261.307 + 1602961601.328 * t1 - 6.891 * t2 + 0.019 * t3) * RADSEC;
    let dn = (450160.280 - 6962890.539 * t1 + 7.455 * t2 + 0.008 * t3) * RADSEC;

    let l = dl % DPI;
    let p = dp % DPI;
    let x = df % DPI * 2.0;
    let d = dd % DPI;
    let n = dn % DPI;

    // Precompute cosine and sine of fundamental arguments
    let sin_cos = |x: f64| -> (f64, f64) { (x.cos(), x.sin()) };

    let (cl, sl) = sin_cos(l);
    let (cp, sp) = sin_cos(p);
    let (cx, sx) = sin_cos(x);
    let (cd, sd) = sin_cos(d);
    let (cn, sn) = sin_cos(n);

    // Construct compound trigonometric terms used in the series expansion
    let cp2 = 2.0 * cp * cp - 1.0;

    let sp2 = 2.0 * sp * cp;
    let cd2 = 2.0 * cd * cd - 1.0;
    let sd2 = 2.0 * sd * cd;
    let cn2 = 2.0 * cn * cn - 1.0;
    let sn2 = 2.0 * sn * cn;
    let cl2 = 2.0 * cl * cl - 1.0;
    let sl2 = 2.0 * sl * cl;

    let ca = cx * cd2 + sx * sd2;
    let sa = sx * cd2 - cx * sd2;
    let cb = ca * cn - sa * sn;
    let sb = sa * cn + ca * sn;
    let cc = cb * cn - sb * sn;
    let sc = sb * cn + cb * sn;

    let cv = cx * cd2 - sx * sd2;
    let sv = sx * cd2 + cx * sd2;
    let ce = cv * cn - sv * sn;
    let se = sv * cn + cv * sn;
    let cf = ce * cn - se * sn;
    let sf = se * cn + ce * sn;

    let cg = cl * cd2 + sl * sd2;
    let sg = sl * cd2 - cl * sd2;
    let ch = cx * cn2 - sx * sn2;
    let sh = sx * cn2 + cx * sn2;
    let cj = ch * cl - sh * sl;
    let sj = sh * cl + ch * sl;

    let ck = cj * cl - sj * sl;
    let sk = sj * cl + cj * sl;
    let cm = cx * cl2 + sx * sl2;
    let sm = sx * cl2 - cx * sl2;
    let cq = cl * cd + sl * sd;
    let sq = sl * cd - cl * sd;

    let cr = 2.0 * cq * cq - 1.0;
    let sr = 2.0 * sq * cq;
    let cs = cx * cn - sx * sn;
    let ss = sx * cn + cx * sn;
    let ct = cs * cl - ss * sl;
    let st = ss * cl + cs * sl;

    let cu = cf * cl + sf * sl;
    let su = sf * cl - cf * sl;
    let cw = cp * cg - sp * sg;
    let sw = sp * cg + cp * sg;

    // Series expansion for nutation in longitude (Δψ), in 0.0001 arcseconds
    let mut dpsi =
        -(171996.0 + 174.2 * t) * sn + (2062.0 + 0.2 * t) * sn2 + 46.0 * (sm * cn + cm * sn)
            - 11.0 * sm
            - 3.0 * (sm * cn2 + cm * sn2)
            - 3.0 * (sq * cp - cq * sp)
            - 2.0 * (sb * cp2 - cb * sp2)
            + (sn * cm - cn * sm)
            - (13187.0 + 1.6 * t) * sc
            + (1426.0 - 3.4 * t) * sp
            - (517.0 - 1.2 * t) * (sc * cp + cc * sp)
            + (217.0 - 0.5 * t) * (sc * cp - cc * sp)
            + (129.0 + 0.1 * t) * sb
            + 48.0 * sr
            - 22.0 * sa
            + (17.0 - 0.1 * t) * sp2
            - 15.0 * (sp * cn + cp * sn)
            - (16.0 - 0.1 * t) * (sc * cp2 + cc * sp2)
            - 12.0 * (sn * cp - cn * sp);

    dpsi += -6.0 * (sn * cr - cn * sr) - 5.0 * (sb * cp - cb * sp)
        + 4.0 * (sr * cn + cr * sn)
        + 4.0 * (sb * cp + cb * sp)
        - 4.0 * sq
        + (sr * cp + cr * sp)
        + (sn * ca - cn * sa)
        - (sp * ca - cp * sa)
        + (sp * cn2 + cp * sn2)
        + (sn * cq - cn * sq)
        - (sp * ca + cp * sa)
        - (2274.0 + 0.2 * t) * sh
        + (712.0 + 0.1 * t) * sl
        - (386.0 + 0.4 * t) * ss
        - 301.0 * sj
        - 158.0 * sg
        + 123.0 * (sh * cl - ch * sl)
        + 63.0 * sd2
        + (63.0 + 0.1 * t) * (sl * cn + cl * sn)
        - (58.0 + 0.1 * t) * (sn * cl - cn * sl)
        - 59.0 * su
        - 51.0 * st
        - 38.0 * sf
        + 29.0 * sl2;

    dpsi += 29.0 * (sc * cl + cc * sl) - 31.0 * sk
        + 26.0 * sx
        + 21.0 * (ss * cl - cs * sl)
        + 16.0 * (sn * cg - cn * sg)
        - 13.0 * (sn * cg + cn * sg)
        - 10.0 * (se * cl - ce * sl)
        - 7.0 * (sg * cp + cg * sp)
        + 7.0 * (sh * cp + ch * sp)
        - 7.0 * (sh * cp - ch * sp)
        - 8.0 * (sf * cl + cf * sl)
        + 6.0 * (sl * cd2 + cl * sd2)
        + 6.0 * (sc * cl2 + cc * sl2)
        - 6.0 * (sn * cd2 + cn * sd2)
        - 7.0 * se
        + 6.0 * (sb * cl + cb * sl)
        - 5.0 * (sn * cd2 - cn * sd2)
        + 5.0 * (sl * cp - cl * sp)
        - 5.0 * (ss * cl2 + cs * sl2)
        - 4.0 * (sp * cd2 - cp * sd2);

    dpsi += 4.0 * (sl * cx - cl * sx) - 4.0 * sd - 3.0 * (sl * cp + cl * sp)
        + 3.0 * (sl * cx + cl * sx)
        - 3.0 * (sj * cp - cj * sp)
        - 3.0 * (su * cp - cu * sp)
        - 2.0 * (sn * cl2 - cn * sl2)
        - 3.0 * (sk * cl + ck * sl)
        - 3.0 * (sf * cp - cf * sp)
        + 2.0 * (sj * cp + cj * sp)
        - 2.0 * (sb * cl - cb * sl);

    dpsi += 2.0 * (sn * cl2 + cn * sl2) - 2.0 * (sl * cn2 + cl * sn2)
        + 2.0 * (sl * cl2 + cl * sl2)
        + 2.0 * (sh * cd + ch * sd)
        + (sn2 * cl - cn2 * sl)
        - (sg * cd2 - cg * sd2)
        + (sf * cl2 - cf * sl2)
        - 2.0 * (su * cd2 + cu * sd2)
        - (sr * cd2 - cr * sd2)
        + (sw * ch + cw * sh)
        - (sl * ce + cl * se)
        - (sf * cr - cf * sr)
        + (su * ca + cu * sa)
        + (sg * cp - cg * sp)
        + (sb * cl2 + cb * sl2)
        - (sf * cl2 + cf * sl2)
        - (st * ca - ct * sa)
        + (sc * cx + cc * sx)
        + (sj * cr + cj * sr)
        - (sg * cx + cg * sx);

    dpsi += (sp * cs + cp * ss) + (sn * cw - cn * sw)
        - (sn * cx - cn * sx)
        - (sh * cd - ch * sd)
        - (sp * cd2 + cp * sd2)
        - (sl * cv - cl * sv)
        - (ss * cp - cs * sp)
        - (sw * cn + cw * sn)
        - (sl * ca - cl * sa)
        + (sl2 * cd2 + cl2 * sd2)
        - (sf * cd2 + cf * sd2)
        + (sp * cd + cp * sd);

    // Series expansion for nutation in obliquity (Δε), in 0.0001 arcseconds
    let mut deps = (92025.0 + 8.9 * t) * cn - (895.0 - 0.5 * t) * cn2 - 24.0 * (cm * cn - sm * sn)
        + (cm * cn2 - sm * sn2)
        + (cb * cp2 + sb * sp2)
        + (5736.0 - 3.1 * t) * cc
        + (54.0 - 0.1 * t) * cp
        + (224.0 - 0.6 * t) * (cc * cp - sc * sp)
        - (95.0 - 0.3 * t) * (cc * cp + sc * sp)
        - 70.0 * cb
        + cr
        + 9.0 * (cp * cn - sp * sn)
        + 7.0 * (cc * cp2 - sc * sp2)
        + 6.0 * (cn * cp + sn * sp)
        + 3.0 * (cn * cr + sn * sr)
        + 3.0 * (cb * cp + sb * sp)
        - 2.0 * (cr * cn - sr * sn)
        - 2.0 * (cb * cp - sb * sp);

    deps += (977.0 - 0.5 * t) * ch - 7.0 * cl + 200.0 * cs + (129.0 - 0.1 * t) * cj
        - cg
        - 53.0 * (ch * cl + sh * sl)
        - 2.0 * cd2
        - 33.0 * (cl * cn - sl * sn)
        + 32.0 * (cn * cl + sn * sl)
        + 26.0 * cu
        + 27.0 * ct
        + 16.0 * cf
        - cl2
        - 12.0 * (cc * cl - sc * sl)
        + 13.0 * ck
        - cx
        - 10.0 * (cs * cl + ss * sl)
        - 8.0 * (cn * cg + sn * sg)
        + 7.0 * (cn * cg - sn * sg)
        + 5.0 * (ce * cl + se * sl)
        - 3.0 * (ch * cp - sh * sp)
        + 3.0 * (ch * cp + sh * sp)
        + 3.0 * (cf * cl - sf * sl)
        - 3.0 * (cc * cl2 - sc * sl2)
        + 3.0 * (cn * cd2 - sn * sd2)
        + 3.0 * ce
        - 3.0 * (cb * cl - sb * sl)
        + 3.0 * (cn * cd2 + sn * sd2)
        + 3.0 * (cs * cl2 - ss * sl2)
        + (cj * cp + sj * sp)
        + (cu * cp + su * sp)
        + (cn * cl2 + sn * sl2)
        + (ck * cl - sk * sl)
        + (cf * cp + sf * sp)
        - (cj * cp - sj * sp)
        + (cb * cl + sb * sl)
        - (cn * cl2 - sn * sl2)
        + (cl * cn2 - sl * sn2)
        - (ch * cd - sh * sd)
        - (cn2 * cl + sn2 * sl)
        - (cf * cl2 + sf * sl2)
        + (cu * cd2 - su * sd2)
        - (cw * ch - sw * sh)
        + (cl * ce - sl * se)
        + (cf * cr + sf * sr)
        - (cb * cl2 - sb * sl2);

    // Convert results from 0.0001 arcseconds to arcseconds
    dpsi *= 1e-4;
    deps *= 1e-4;

    (dpsi, deps)
}

/// Nutation matrix `N`, from the mean equator and equinox of date to the true equator
/// and equinox of date (IAU 1980).
///
/// ```text
/// N = R1(−ε − Δε) · R3(−Δψ) · R1(ε)
/// ```
///
/// # See also
/// * [`nutation_angles`] – Δψ, Δε
/// * [`mean_obliquity`] – ε
pub fn nutation_matrix(tjm: MJD) -> Matrix3<f64> {
    let epsm = mean_obliquity(tjm);
    let (dpsi, deps) = nutation_angles(tjm);
    let epst = epsm + deps * RADSEC;

    rotmt(epst, 0) * rotmt(dpsi * RADSEC, 2) * rotmt(-epsm, 0)
}

/// Compute the equation of the equinoxes, `Δψ·cos ε`, in radians.
///
/// This is the difference between apparent and mean sidereal time.
pub fn equation_of_equinoxes(tjm: MJD) -> Radian {
    let (dpsi, _deps) = nutation_angles(tjm);
    RADSEC * dpsi * mean_obliquity(tjm).cos()
}

/// Precession matrix `P`, from the mean equator and equinox of J2000.0 to the mean equator
/// and equinox of date (IAU 1976, Lieske).
///
/// ```text
/// P = R3(−z) · R2(θ) · R3(−ζ)
///
/// ζ(T) = (0.6406161 + 0.0000839·T + 0.0000050·T²) · T  [deg]
/// θ(T) = (0.5567530 - 0.0001185·T - 0.0000116·T²) · T  [deg]
/// z(T) = (0.6406161 + 0.0003041·T + 0.0000051·T²) · T  [deg]
/// ```
///
/// Arguments
/// ---------
/// * `tjm`: Modified Julian Date (TT scale).
pub fn precession_matrix(tjm: MJD) -> Matrix3<f64> {
    let t = (tjm - T2000) / 36525.0;

    let zeta = ((0.0000050 * t + 0.0000839) * t + 0.6406161) * t * RADEG;
    let z = ((0.0000051 * t + 0.0003041) * t + 0.6406161) * t * RADEG;
    let theta = ((-0.0000116 * t - 0.0001185) * t + 0.5567530) * t * RADEG;

    rotmt(z, 2) * rotmt(-theta, 1) * rotmt(zeta, 2)
}

/// Frame bias matrix `B`, from the GCRS (ICRS axes) to the dynamical mean equator and
/// equinox of J2000.0.
///
/// Second-order small-angle form of the IERS 2003 offsets ξ₀ = −16.6170 mas,
/// η₀ = −6.8192 mas, dα₀ = −14.60 mas.
pub fn frame_bias_matrix() -> Matrix3<f64> {
    let ax = -0.0068192 * RADSEC; // η₀
    let ay = 0.0166170 * RADSEC; // −ξ₀
    let az = 0.01460 * RADSEC; // −dα₀

    let (ax2, ay2, az2) = (ax * ax, ay * ay, az * az);

    Matrix3::new(
        1.0 - 0.5 * (ay2 + az2),
        -az,
        ay,
        az,
        1.0 - 0.5 * (ax2 + az2),
        -ax,
        -ay,
        ax,
        1.0 - 0.5 * (ax2 + ay2),
    )
}

/// Combined bias-precession-nutation matrix `N·P·B`, from the GCRS to the true equator
/// and equinox of date.
pub fn celestial_to_true_of_date(tjm: MJD) -> Matrix3<f64> {
    nutation_matrix(tjm) * precession_matrix(tjm) * frame_bias_matrix()
}

/// Greenwich apparent sidereal time in radians, in [0, 2π).
///
/// Arguments
/// ---------
/// * `mjd_ut1`: date in the UT1 scale, for the rotation of the Earth.
/// * `mjd_tt`: date in the TT scale, for the nutation.
pub fn greenwich_apparent_sidereal_time(mjd_ut1: MJD, mjd_tt: MJD) -> Radian {
    (gmst(mjd_ut1) + equation_of_equinoxes(mjd_tt)).rem_euclid(DPI)
}

/// Equation of the origins, `ERA − GAST`, in radians, wrapped into [−π, π).
///
/// It is the right ascension of the true equinox measured from the CIO, with the
/// opposite sign: `α_CIRS = α_true + EO`.
pub fn equation_of_origins(mjd_ut1: MJD, mjd_tt: MJD) -> Radian {
    let eo = earth_rotation_angle(mjd_ut1) - greenwich_apparent_sidereal_time(mjd_ut1, mjd_tt);
    (eo + std::f64::consts::PI).rem_euclid(DPI) - std::f64::consts::PI
}

/// Rotation from the true equator and equinox of date to the CIRS, for a given
/// equation of the origins.
pub fn true_of_date_to_cirs(equation_of_origins: Radian) -> Matrix3<f64> {
    rotmt(equation_of_origins, 2)
}

/// Earth orientation parameters not predicted by the models above.
///
/// The values come from IERS Bulletin A and are treated as constant over the benchmark.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EarthOrientationParams {
    /// UT1 − UTC, in seconds.
    pub dut1: f64,
    /// Polar offset x, in milliarcseconds.
    pub polar_x: MilliArcSec,
    /// Polar offset y, in milliarcseconds.
    pub polar_y: MilliArcSec,
}

impl Default for EarthOrientationParams {
    fn default() -> Self {
        EarthOrientationParams {
            dut1: DEFAULT_DUT1,
            polar_x: DEFAULT_POLAR_X,
            polar_y: DEFAULT_POLAR_Y,
        }
    }
}

impl EarthOrientationParams {
    /// Build a set of Earth orientation parameters.
    ///
    /// Errors
    /// ------
    /// * [`CirsError::InvalidBenchParameter`] if a value is not finite, or if |UT1 − UTC|
    ///   exceeds one second.
    pub fn new(
        dut1: f64,
        polar_x: MilliArcSec,
        polar_y: MilliArcSec,
    ) -> Result<Self, CirsError> {
        let eop = EarthOrientationParams {
            dut1,
            polar_x,
            polar_y,
        };
        eop.validate()?;
        Ok(eop)
    }

    pub(crate) fn validate(&self) -> Result<(), CirsError> {
        if !(self.dut1.is_finite() && self.polar_x.is_finite() && self.polar_y.is_finite()) {
            return Err(CirsError::InvalidBenchParameter(
                "Earth orientation parameters must be finite".into(),
            ));
        }
        if self.dut1.abs() > 1.0 {
            return Err(CirsError::InvalidBenchParameter(format!(
                "UT1 - UTC must stay within 1 s, got {}",
                self.dut1
            )));
        }
        Ok(())
    }

    /// Polar motion matrix `W = R2(xp) · R1(yp)`, from the ITRS to the TIRS.
    ///
    /// The TIO locator s' (below 0.1 mas per century) is neglected.
    pub fn polar_motion_matrix(&self) -> Matrix3<f64> {
        let xp = self.polar_x * RADMAS;
        let yp = self.polar_y * RADMAS;
        rotmt(-xp, 1) * rotmt(-yp, 0)
    }

    /// Direction of the ITRS pole in the TIRS.
    pub fn itrs_pole(&self) -> Vector3<f64> {
        self.polar_motion_matrix() * Vector3::z()
    }
}

#[cfg(test)]
mod earth_orientation_test {
    use super::*;
    use approx::assert_relative_eq;

    /// MJD (TT) of 2025-01-25T15:33:09.184
    const TJM_2025: f64 = 60700.6480229;

    fn assert_orthonormal(m: &Matrix3<f64>) {
        assert_relative_eq!(m * m.transpose(), Matrix3::identity(), epsilon = 1e-14);
        assert_relative_eq!(m.determinant(), 1.0, epsilon = 1e-14);
    }

    #[test]
    fn test_obliquity() {
        let obl = mean_obliquity(T2000);
        assert_eq!(obl, 0.40909280422232897)
    }

    #[test]
    fn test_nutation_angles() {
        let (dpsi, deps) = nutation_angles(T2000);
        assert_eq!(dpsi, -13.923385169502602);
        assert_eq!(deps, -5.773808263765919);
    }

    #[test]
    fn test_nutation_matrix() {
        // columns of the true-to-mean matrix at J2000
        let true_to_mean = [
            [
                0.9999999977217079,
                6.19323109890795e-5,
                2.6850942970991024e-5,
            ],
            [
                -6.193306258211379e-5,
                0.9999999976903892,
                2.799138089948361e-5,
            ],
            [
                -2.6849209338068913e-5,
                -2.7993043796858963e-5,
                0.9999999992477547,
            ],
        ];
        let expected = Matrix3::from(true_to_mean).transpose();

        let n = nutation_matrix(T2000);
        assert_relative_eq!(n, expected, epsilon = 1e-14);
        assert_orthonormal(&n);
    }

    #[test]
    fn test_precession_matrix() {
        assert_relative_eq!(
            precession_matrix(T2000),
            Matrix3::identity(),
            epsilon = 1e-15
        );

        // a quarter century moves the J2000 equinox by ζ + z ≈ 0.32° in right ascension
        let p = precession_matrix(T2000 + 0.25 * 36525.0);
        assert_orthonormal(&p);
        let equinox = p * Vector3::x();
        let ra = equinox.y.atan2(equinox.x) / RADEG;
        assert!(ra > 0.31 && ra < 0.33, "ra = {ra}");
    }

    #[test]
    fn test_frame_bias_matrix() {
        let b = frame_bias_matrix();
        assert_orthonormal(&b);

        // the J2000 dynamical pole sits at (ξ₀, η₀) in the GCRS
        let pole = b.transpose() * Vector3::z();
        assert_relative_eq!(pole.x, -0.0166170 * RADSEC, epsilon = 1e-15);
        assert_relative_eq!(pole.y, -0.0068192 * RADSEC, epsilon = 1e-15);
    }

    #[test]
    fn test_equation_of_equinoxes() {
        let expected = RADSEC * (-13.923385169502602) * mean_obliquity(T2000).cos();
        assert_relative_eq!(equation_of_equinoxes(T2000), expected, epsilon = 1e-12);

        // bounded by ~18 arcsec, and varying in time
        assert!(equation_of_equinoxes(58000.0).abs() / RADSEC < 18.0);
        assert!((equation_of_equinoxes(60000.0) - equation_of_equinoxes(T2000)).abs() > 1e-7);
    }

    #[test]
    fn test_equation_of_origins() {
        // at J2000 the CIO and the mean equinox nearly coincide, the residual is nutation
        let eo = equation_of_origins(T2000, T2000);
        assert!(eo.abs() / RADSEC < 18.0);

        // accumulated precession in right ascension after 25 years
        let eo = equation_of_origins(TJM_2025, TJM_2025) / RADEG;
        assert!(eo > -0.34 && eo < -0.30, "eo = {eo}");
    }

    #[test]
    fn test_celestial_to_true_of_date() {
        let m = celestial_to_true_of_date(TJM_2025);
        assert_orthonormal(&m);
        assert_relative_eq!(
            m,
            nutation_matrix(TJM_2025) * precession_matrix(TJM_2025) * frame_bias_matrix(),
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_polar_motion() {
        let eop = EarthOrientationParams::new(0.0, 0.0, 0.0).unwrap();
        assert_relative_eq!(
            eop.polar_motion_matrix(),
            Matrix3::identity(),
            epsilon = 1e-15
        );

        let eop = EarthOrientationParams::default();
        let pole = eop.itrs_pole();
        assert_relative_eq!(pole.x, -230.0 * RADMAS, epsilon = 1e-12);
        assert_relative_eq!(pole.y, -62.0 * RADMAS, epsilon = 1e-12);
        assert_relative_eq!(pole.norm(), 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_eop_validation() {
        assert!(EarthOrientationParams::new(f64::NAN, 0.0, 0.0).is_err());
        assert!(EarthOrientationParams::new(1.5, 0.0, 0.0).is_err());
        assert!(EarthOrientationParams::new(-0.3, 100.0, 300.0).is_ok());
    }
}
