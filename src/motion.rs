use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::foundation::core::{Coords, Delta, PointSet};
use crate::foundation::error::{HeatError, HeatResult};

/// Shift every coordinate by its delta. Scalar deltas apply to all points.
pub fn update_coordinates(
    x: &Coords,
    y: &Coords,
    x_delta: impl Into<Delta>,
    y_delta: impl Into<Delta>,
) -> HeatResult<(Coords, Coords)> {
    let (dx, dy) = (x_delta.into(), y_delta.into());
    Ok((x.offset(&dx)?, y.offset(&dy)?))
}

/// [`update_coordinates`] over a whole point set.
pub fn update_points(
    points: &PointSet,
    x_delta: impl Into<Delta>,
    y_delta: impl Into<Delta>,
) -> HeatResult<PointSet> {
    let (x, y) = update_coordinates(points.x(), points.y(), x_delta, y_delta)?;
    PointSet::new(x, y)
}

/// Seeded random drift of a point cloud.
///
/// Points start on integer coordinates in `[0, extent)`. Each step picks one direction
/// per axis for the whole cloud and moves every point by its own magnitude in `[0, 1)`.
#[derive(Debug)]
pub struct RandomWalk {
    rng: StdRng,
    points: PointSet,
}

impl RandomWalk {
    pub fn new(count: usize, extent: u32, seed: u64) -> HeatResult<Self> {
        if count == 0 {
            return Err(HeatError::invalid_input("random walk needs at least one point"));
        }
        if extent == 0 {
            return Err(HeatError::invalid_input("random walk extent must be > 0"));
        }
        let mut rng = StdRng::seed_from_u64(seed);
        let x: Coords = (0..count)
            .map(|_| f64::from(rng.gen_range(0..extent)))
            .collect();
        let y: Coords = (0..count)
            .map(|_| f64::from(rng.gen_range(0..extent)))
            .collect();
        Ok(Self {
            rng,
            points: PointSet::new(x, y)?,
        })
    }

    pub fn points(&self) -> &PointSet {
        &self.points
    }

    /// Advance one step and return the new positions.
    pub fn step(&mut self) -> HeatResult<&PointSet> {
        let n = self.points.len();
        let x_sign = if self.rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        let y_sign = if self.rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        let dx: Coords = (0..n).map(|_| self.rng.r#gen::<f64>() * x_sign).collect();
        let dy: Coords = (0..n).map(|_| self.rng.r#gen::<f64>() * y_sign).collect();
        self.points = update_points(&self.points, dx, dy)?;
        Ok(&self.points)
    }

    /// The current positions followed by `steps - 1` further steps.
    pub fn frames(&mut self, steps: usize) -> HeatResult<Vec<PointSet>> {
        let mut out = Vec::with_capacity(steps);
        for i in 0..steps {
            if i > 0 {
                self.step()?;
            }
            out.push(self.points.clone());
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../tests/unit/motion.rs"]
mod tests;
