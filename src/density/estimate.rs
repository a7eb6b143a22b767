use std::collections::HashMap;

use rayon::prelude::*;

use crate::foundation::core::{Field2, PointSet};
use crate::foundation::error::{HeatError, HeatResult};
use crate::foundation::math::kde_quartic;

/// Strategy for accumulating quartic-kernel intensity at grid-cell centers.
///
/// Implementations must return `Σ K(‖c - p‖, h)` over every point for every cell,
/// summing points in input order within a cell.
pub trait IntensityEstimator: Sync {
    /// Intensity for the single cell centered at `(cx, cy)`.
    fn cell_intensity(&self, cx: f64, cy: f64) -> f64;
}

/// Visits every point for every cell.
#[derive(Debug)]
pub struct BruteForce<'a> {
    points: &'a PointSet,
    bandwidth: f64,
}

impl<'a> BruteForce<'a> {
    pub fn new(points: &'a PointSet, bandwidth: f64) -> HeatResult<Self> {
        validate_bandwidth(bandwidth)?;
        Ok(Self { points, bandwidth })
    }
}

impl IntensityEstimator for BruteForce<'_> {
    fn cell_intensity(&self, cx: f64, cy: f64) -> f64 {
        let h = self.bandwidth;
        self.points
            .iter()
            .map(|(px, py)| kde_quartic((cx - px).hypot(cy - py), h))
            .sum()
    }
}

/// Buckets points into square bins of edge `bandwidth`; a cell only visits the 3x3
/// neighbourhood of bins around its center.
#[derive(Debug)]
pub struct BucketIndex<'a> {
    points: &'a PointSet,
    bandwidth: f64,
    origin: (f64, f64),
    // Point indices per bucket, ascending so the summation order matches `BruteForce`.
    buckets: HashMap<(i64, i64), Vec<usize>>,
}

impl<'a> BucketIndex<'a> {
    pub fn new(points: &'a PointSet, bandwidth: f64) -> HeatResult<Self> {
        validate_bandwidth(bandwidth)?;
        let origin = (
            points.x().extent().map_or(0.0, |(lo, _)| lo),
            points.y().extent().map_or(0.0, |(lo, _)| lo),
        );
        let mut buckets: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
        for (i, (px, py)) in points.iter().enumerate() {
            let key = bucket_of(px, py, origin, bandwidth);
            buckets.entry(key).or_default().push(i);
        }
        tracing::debug!(buckets = buckets.len(), "built bucket index");
        Ok(Self {
            points,
            bandwidth,
            origin,
            buckets,
        })
    }
}

impl IntensityEstimator for BucketIndex<'_> {
    fn cell_intensity(&self, cx: f64, cy: f64) -> f64 {
        let h = self.bandwidth;
        let (bx, by) = bucket_of(cx, cy, self.origin, h);
        let mut candidates: Vec<usize> = Vec::new();
        for dy in -1..=1 {
            for dx in -1..=1 {
                if let Some(ids) = self.buckets.get(&(bx + dx, by + dy)) {
                    candidates.extend_from_slice(ids);
                }
            }
        }
        candidates.sort_unstable();

        let xs = self.points.x();
        let ys = self.points.y();
        candidates
            .into_iter()
            .map(|i| kde_quartic((cx - xs[i]).hypot(cy - ys[i]), h))
            .sum()
    }
}

fn bucket_of(x: f64, y: f64, origin: (f64, f64), edge: f64) -> (i64, i64) {
    (
        ((x - origin.0) / edge).floor() as i64,
        ((y - origin.1) / edge).floor() as i64,
    )
}

fn validate_bandwidth(bandwidth: f64) -> HeatResult<()> {
    if !bandwidth.is_finite() || bandwidth <= 0.0 {
        return Err(HeatError::invalid_input(format!(
            "bandwidth must be a finite value > 0, got {bandwidth}"
        )));
    }
    Ok(())
}

/// Estimator selection for [`estimate_intensity_with`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimatorKind {
    /// Every point for every cell.
    #[default]
    BruteForce,
    /// Bandwidth-sized buckets restrict candidates to nearby points.
    Bucket,
}

impl std::str::FromStr for EstimatorKind {
    type Err = HeatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "brute" | "brute_force" | "brute-force" => Ok(Self::BruteForce),
            "bucket" | "grid" => Ok(Self::Bucket),
            other => Err(HeatError::invalid_input(format!(
                "unknown estimator '{other}' (expected 'brute' or 'bucket')"
            ))),
        }
    }
}

/// Brute-force quartic-kernel intensity at every cell center.
pub fn estimate_intensity(
    points: &PointSet,
    centers_x: &Field2,
    centers_y: &Field2,
    bandwidth: f64,
) -> HeatResult<Field2> {
    estimate_intensity_with(
        points,
        centers_x,
        centers_y,
        bandwidth,
        EstimatorKind::BruteForce,
        false,
    )
}

/// Intensity at every cell center using the chosen strategy, optionally spreading rows
/// over the rayon global pool.
#[tracing::instrument(skip(points, centers_x, centers_y), fields(points = points.len()))]
pub fn estimate_intensity_with(
    points: &PointSet,
    centers_x: &Field2,
    centers_y: &Field2,
    bandwidth: f64,
    kind: EstimatorKind,
    parallel: bool,
) -> HeatResult<Field2> {
    if centers_x.shape() != centers_y.shape() {
        return Err(HeatError::invalid_input(format!(
            "center grids differ in shape: {:?} vs {:?}",
            centers_x.shape(),
            centers_y.shape()
        )));
    }
    let intensity = match kind {
        EstimatorKind::BruteForce => {
            let est = BruteForce::new(points, bandwidth)?;
            accumulate(&est, centers_x, centers_y, parallel)?
        }
        EstimatorKind::Bucket => {
            let est = BucketIndex::new(points, bandwidth)?;
            accumulate(&est, centers_x, centers_y, parallel)?
        }
    };
    tracing::info!(shape = ?intensity.shape(), "calculated intensity matrix");
    Ok(intensity)
}

/// Run `est` over every cell, row by row.
pub fn accumulate<E: IntensityEstimator + ?Sized>(
    est: &E,
    centers_x: &Field2,
    centers_y: &Field2,
    parallel: bool,
) -> HeatResult<Field2> {
    let (rows, cols) = centers_x.shape();
    let mut out = Field2::zeros(rows, cols);
    if cols == 0 {
        return Ok(out);
    }

    let fill_row = |j: usize, row: &mut [f64]| {
        let xs = centers_x.row(j);
        let ys = centers_y.row(j);
        for (k, v) in row.iter_mut().enumerate() {
            *v = est.cell_intensity(xs[k], ys[k]);
        }
    };

    if parallel {
        out.as_mut_slice()
            .par_chunks_mut(cols)
            .enumerate()
            .for_each(|(j, row)| fill_row(j, row));
    } else {
        for (j, row) in out.as_mut_slice().chunks_mut(cols).enumerate() {
            fill_row(j, row);
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/density/estimate.rs"]
mod tests;
