//! # Benchmark driver
//!
//! Two timed loops over the same catalog:
//!
//! * **same frame**: every source is transformed into one fixed [`ObservingFrame`];
//! * **individual frame**: every source gets its own random frame, built inside the
//!   timed loop.
//!
//! When [`BenchConfig::recompute_frame_phase`] is set, a third loop, **recomputed frame**,
//! transforms every source into the fixed frame again through
//! [`PositionTransformer::transform_uncached`], paying for the frame geometry on each call.
//!
//! Each loop reports its throughput in transforms per second. The catalog is generated
//! before any clock is started. The first transformation error aborts the run.

use std::fmt;
use std::hint::black_box;
use std::time::{Duration, Instant};

use rand::Rng;
use tracing::{debug, info};

use crate::catalog::{generate_catalog, Source};
use crate::cirs_errors::CirsError;
use crate::config::BenchConfig;
use crate::frame::ObservingFrame;
use crate::transform::PositionTransformer;

pub const SAME_FRAME_LABEL: &str = "same frame";
pub const INDIVIDUAL_FRAME_LABEL: &str = "individual frame";
pub const RECOMPUTED_FRAME_LABEL: &str = "recomputed frame";

/// Timing of one benchmark phase.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseReport {
    pub label: &'static str,
    /// Number of transformed sources.
    pub sources: usize,
    /// Wall-clock time spent in the transform loop.
    pub elapsed: Duration,
}

impl PhaseReport {
    /// Transforms per second.
    ///
    /// An empty catalog gives 0, or NaN if the clock did not advance at all.
    pub fn throughput(&self) -> f64 {
        self.sources as f64 / self.elapsed.as_secs_f64()
    }
}

impl fmt::Display for PhaseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<20}{}", self.label, self.throughput())
    }
}

/// Result of a complete run.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchReport {
    pub same_frame: PhaseReport,
    pub individual_frames: PhaseReport,
    /// Only run when [`BenchConfig::recompute_frame_phase`] is set.
    pub recomputed_frame: Option<PhaseReport>,
}

impl fmt::Display for BenchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.same_frame)?;
        write!(f, "{}", self.individual_frames)?;
        if let Some(recomputed) = &self.recomputed_frame {
            write!(f, "\n{recomputed}")?;
        }
        Ok(())
    }
}

/// Transform every source of the catalog into a single frame.
///
/// Arguments
/// ---------
/// * `catalog`: sources, visited in order.
/// * `frame`: target frame shared by every call.
/// * `transformer`: the transformation under test.
///
/// Errors
/// ------
/// * the first error returned by the transformer.
pub fn run_same_frame<T: PositionTransformer>(
    catalog: &[Source],
    frame: &ObservingFrame,
    transformer: &mut T,
) -> Result<PhaseReport, CirsError> {
    let start = Instant::now();
    for source in catalog {
        black_box(transformer.transform(source, frame)?);
    }
    let elapsed = start.elapsed();

    debug!(sources = catalog.len(), ?elapsed, "same frame loop done");
    Ok(PhaseReport {
        label: SAME_FRAME_LABEL,
        sources: catalog.len(),
        elapsed,
    })
}

/// Transform every source of the catalog into its own random frame.
///
/// The frames are drawn from `rng` inside the timed loop, one per source, following
/// [`BenchConfig::random_frame`].
///
/// Errors
/// ------
/// * the first error raised while building a frame or transforming a source.
pub fn run_individual_frames<T: PositionTransformer, R: Rng>(
    catalog: &[Source],
    config: &BenchConfig,
    rng: &mut R,
    transformer: &mut T,
) -> Result<PhaseReport, CirsError> {
    let start = Instant::now();
    for source in catalog {
        let frame = config.random_frame(rng)?;
        black_box(transformer.transform(source, &frame)?);
    }
    let elapsed = start.elapsed();

    debug!(sources = catalog.len(), ?elapsed, "individual frame loop done");
    Ok(PhaseReport {
        label: INDIVIDUAL_FRAME_LABEL,
        sources: catalog.len(),
        elapsed,
    })
}

/// Transform every source of the catalog into a single frame, recomputing the frame
/// geometry on each call with [`PositionTransformer::transform_uncached`].
///
/// Errors
/// ------
/// * the first error returned by the transformer.
pub fn run_recomputed_frame<T: PositionTransformer>(
    catalog: &[Source],
    frame: &ObservingFrame,
    transformer: &mut T,
) -> Result<PhaseReport, CirsError> {
    let start = Instant::now();
    for source in catalog {
        black_box(transformer.transform_uncached(source, frame)?);
    }
    let elapsed = start.elapsed();

    debug!(sources = catalog.len(), ?elapsed, "recomputed frame loop done");
    Ok(PhaseReport {
        label: RECOMPUTED_FRAME_LABEL,
        sources: catalog.len(),
        elapsed,
    })
}

/// Run the complete benchmark: catalog generation, then the phases in sequence.
///
/// A single generator, created by [`BenchConfig::rng`], feeds the catalog and then the
/// random frames. The recomputed-frame phase, if enabled, runs last and draws nothing.
pub fn run_benchmark<T: PositionTransformer>(
    config: &BenchConfig,
    transformer: &mut T,
) -> Result<BenchReport, CirsError> {
    let mut rng = config.rng();
    let catalog = generate_catalog(config.n_sources, &mut rng);
    info!(
        sources = catalog.len(),
        seed = ?config.seed,
        "catalog generated"
    );

    let frame = config.fixed_frame();
    let same_frame = run_same_frame(&catalog, &frame, transformer)?;
    info!(throughput = same_frame.throughput(), "{SAME_FRAME_LABEL} phase finished");

    let individual_frames = run_individual_frames(&catalog, config, &mut rng, transformer)?;
    info!(
        throughput = individual_frames.throughput(),
        "{INDIVIDUAL_FRAME_LABEL} phase finished"
    );

    let recomputed_frame = if config.recompute_frame_phase {
        let report = run_recomputed_frame(&catalog, &frame, transformer)?;
        info!(
            throughput = report.throughput(),
            "{RECOMPUTED_FRAME_LABEL} phase finished"
        );
        Some(report)
    } else {
        None
    };

    Ok(BenchReport {
        same_frame,
        individual_frames,
        recomputed_frame,
    })
}
