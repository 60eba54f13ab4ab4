//! # Benchmark configuration
//!
//! [`BenchConfig`] gathers every parameter of a benchmark run. It is created through
//! [`BenchConfigBuilder`], which starts from the default run (300 sources, unseeded,
//! fixed frame on 2025-01-25T15:32:00 UTC) and validates the overrides in
//! [`BenchConfigBuilder::build`].
//!
//! ```rust,no_run
//! use cirs_bench::config::BenchConfig;
//!
//! let config = BenchConfig::builder()
//!     .n_sources(1000)
//!     .seed(42)
//!     .max_time_offset_days(30.0)
//!     .build()
//!     .unwrap();
//! ```

use std::cmp::Ordering::{Equal, Greater};

use hifitime::{Epoch, Unit};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cirs_errors::CirsError;
use crate::constants::{
    Degree, Meter, DEFAULT_SOURCE_COUNT, FIXED_SITE_LATITUDE, FIXED_SITE_LONGITUDE,
    MAX_TIME_OFFSET_DAYS, REFERENCE_TIME, SITE_HEIGHT,
};
use crate::earth_orientation::EarthOrientationParams;
use crate::ephemeris::EPHEMERIS_JD_RANGE;
use crate::frame::ObservingFrame;
use crate::observers::Observer;
use crate::time::{parse_epoch, TimeScales};

/// Validated parameters of a benchmark run.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchConfig {
    /// Number of catalog sources.
    pub n_sources: usize,
    /// Seed of the random generator, `None` to draw it from the OS.
    pub seed: Option<u64>,
    /// Epoch of the fixed frame, and latest epoch of the random frames.
    pub reference_time: Epoch,
    /// Site of the fixed frame.
    pub fixed_site: Observer,
    /// Height of the random sites, meters.
    pub random_site_height: Meter,
    /// Random frames are drawn in `[reference_time − max_time_offset_days, reference_time]`.
    pub max_time_offset_days: f64,
    pub earth_orientation: EarthOrientationParams,
    /// Also time a third loop that recomputes the fixed frame's geometry for every source.
    pub recompute_frame_phase: bool,
}

impl BenchConfig {
    /// Create a new [`BenchConfigBuilder`] initialized with the default run.
    pub fn builder() -> BenchConfigBuilder {
        BenchConfigBuilder::new()
    }

    /// Random generator of the run, seeded if a seed was given.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    /// The frame shared by every source in the same-frame phase.
    pub fn fixed_frame(&self) -> ObservingFrame {
        ObservingFrame::new(
            self.reference_time,
            self.fixed_site.clone(),
            self.earth_orientation,
        )
    }

    /// Draw one frame of the individual-frame phase.
    pub fn random_frame<R: Rng>(&self, rng: &mut R) -> Result<ObservingFrame, CirsError> {
        ObservingFrame::random(
            self.reference_time,
            self.max_time_offset_days,
            self.random_site_height,
            self.earth_orientation,
            rng,
        )
    }
}

/// Builder for [`BenchConfig`], with validation.
#[derive(Debug, Clone)]
pub struct BenchConfigBuilder {
    n_sources: usize,
    seed: Option<u64>,
    reference_time: String,
    fixed_site: (Degree, Degree, Meter),
    random_site_height: Meter,
    max_time_offset_days: f64,
    earth_orientation: EarthOrientationParams,
    recompute_frame_phase: bool,
}

impl Default for BenchConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BenchConfigBuilder {
    /// Create a new builder initialized with default values.
    pub fn new() -> Self {
        Self {
            n_sources: DEFAULT_SOURCE_COUNT,
            seed: None,
            reference_time: REFERENCE_TIME.to_string(),
            fixed_site: (FIXED_SITE_LONGITUDE, FIXED_SITE_LATITUDE, SITE_HEIGHT),
            random_site_height: SITE_HEIGHT,
            max_time_offset_days: MAX_TIME_OFFSET_DAYS,
            earth_orientation: EarthOrientationParams::default(),
            recompute_frame_phase: false,
        }
    }

    pub fn n_sources(mut self, v: usize) -> Self {
        self.n_sources = v;
        self
    }
    pub fn seed(mut self, v: u64) -> Self {
        self.seed = Some(v);
        self
    }
    pub fn maybe_seed(mut self, v: Option<u64>) -> Self {
        self.seed = v;
        self
    }
    /// ISO 8601 calendar date, read as UTC when no scale is given.
    pub fn reference_time(mut self, v: impl Into<String>) -> Self {
        self.reference_time = v.into();
        self
    }
    /// Longitude and latitude in degrees, height in meters.
    pub fn fixed_site(mut self, longitude: Degree, latitude: Degree, height: Meter) -> Self {
        self.fixed_site = (longitude, latitude, height);
        self
    }
    pub fn random_site_height(mut self, v: Meter) -> Self {
        self.random_site_height = v;
        self
    }
    pub fn max_time_offset_days(mut self, v: f64) -> Self {
        self.max_time_offset_days = v;
        self
    }
    pub fn earth_orientation(mut self, v: EarthOrientationParams) -> Self {
        self.earth_orientation = v;
        self
    }
    pub fn recompute_frame_phase(mut self, v: bool) -> Self {
        self.recompute_frame_phase = v;
        self
    }

    /// Return true iff x >= 0.0 and comparable (i.e., not NaN).
    #[inline]
    fn ge0(x: f64) -> bool {
        matches!(x.partial_cmp(&0.0), Some(Greater) | Some(Equal))
    }

    /// Validate the parameters and build the [`BenchConfig`].
    ///
    /// Errors
    /// ------
    /// * [`CirsError::InvalidEpoch`] if the reference time does not parse.
    /// * [`CirsError::InvalidObserver`] if the fixed site is rejected by [`Observer::new`].
    /// * [`CirsError::InvalidBenchParameter`] for the other checks:
    ///     - `max_time_offset_days` finite and non-negative,
    ///     - `random_site_height` finite,
    ///     - Earth orientation parameters finite with |UT1 − UTC| ≤ 1 s,
    ///     - every frame epoch inside the ephemeris window.
    pub fn build(self) -> Result<BenchConfig, CirsError> {
        if !Self::ge0(self.max_time_offset_days) || !self.max_time_offset_days.is_finite() {
            return Err(CirsError::InvalidBenchParameter(format!(
                "max_time_offset_days must be finite and >= 0, got {}",
                self.max_time_offset_days
            )));
        }
        if !self.random_site_height.is_finite() {
            return Err(CirsError::InvalidBenchParameter(
                "random_site_height must be finite".into(),
            ));
        }
        self.earth_orientation.validate()?;

        let reference_time = parse_epoch(&self.reference_time)?;
        let (lon, lat, height) = self.fixed_site;
        let fixed_site = Observer::new(lon, lat, height)?;

        let latest = TimeScales::new(&reference_time, self.earth_orientation.dut1).jd_tdb();
        let earliest = TimeScales::new(
            &(reference_time - Unit::Day * self.max_time_offset_days),
            self.earth_orientation.dut1,
        )
        .jd_tdb();
        if !(EPHEMERIS_JD_RANGE.contains(&latest) && EPHEMERIS_JD_RANGE.contains(&earliest)) {
            return Err(CirsError::InvalidBenchParameter(format!(
                "frames between JD {earliest} and JD {latest} (TDB) leave the ephemeris window"
            )));
        }

        Ok(BenchConfig {
            n_sources: self.n_sources,
            seed: self.seed,
            reference_time,
            fixed_site,
            random_site_height: self.random_site_height,
            max_time_offset_days: self.max_time_offset_days,
            earth_orientation: self.earth_orientation,
            recompute_frame_phase: self.recompute_frame_phase,
        })
    }
}
