#![allow(dead_code)]

use nalgebra::Vector3;

use cirs_bench::catalog::Source;
use cirs_bench::cirs_errors::CirsError;
use cirs_bench::config::BenchConfig;
use cirs_bench::frame::ObservingFrame;
use cirs_bench::ref_system::radec_to_unit;
use cirs_bench::transform::{ApparentPosition, PositionTransformer};

/// Transformer recording every call, returning the catalog place unchanged.
#[derive(Debug, Default)]
pub struct RecordingTransformer {
    pub calls: Vec<(Source, ObservingFrame)>,
}

impl PositionTransformer for RecordingTransformer {
    fn transform(
        &mut self,
        source: &Source,
        frame: &ObservingFrame,
    ) -> Result<ApparentPosition, CirsError> {
        self.calls.push((*source, frame.clone()));
        Ok(ApparentPosition {
            ra: source.ra(),
            dec: source.dec(),
            r_hat: catalog_direction(source),
            radial_velocity: source.radial_velocity(),
            distance: source.distance(),
        })
    }
}

/// Transformer failing on the call of index `fail_at`.
#[derive(Debug)]
pub struct FailingTransformer {
    pub fail_at: usize,
    pub calls: usize,
}

impl PositionTransformer for FailingTransformer {
    fn transform(
        &mut self,
        _source: &Source,
        _frame: &ObservingFrame,
    ) -> Result<ApparentPosition, CirsError> {
        let index = self.calls;
        self.calls += 1;
        if index == self.fail_at {
            return Err(CirsError::DegenerateGeometry("injected failure".into()));
        }
        Ok(ApparentPosition {
            ra: 0.0,
            dec: 0.0,
            r_hat: Vector3::x(),
            radial_velocity: 0.0,
            distance: 1.0,
        })
    }
}

pub fn seeded_config(n_sources: usize, seed: u64) -> BenchConfig {
    BenchConfig::builder()
        .n_sources(n_sources)
        .seed(seed)
        .build()
        .unwrap()
}

pub fn catalog_direction(source: &Source) -> Vector3<f64> {
    radec_to_unit(source.ra().to_radians(), source.dec().to_radians())
}

/// Angle between two directions, degrees.
pub fn separation_deg(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    a.cross(b).norm().atan2(a.dot(b)).to_degrees()
}
