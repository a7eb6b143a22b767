use crate::foundation::core::{Field2, PointSet};
use crate::foundation::error::{HeatError, HeatResult};
use crate::foundation::math::arange;

/// Largest number of cells [`build_grid`] will allocate.
pub const MAX_GRID_CELLS: usize = 1 << 26;

/// Regular grid covering the point extent padded by the bandwidth.
///
/// Rows follow the y axis and columns the x axis. Every array has shape
/// `(y_axis.len(), x_axis.len())`.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    /// Cell edge length.
    pub grid_size: f64,
    /// Cell origins along x (`x_min - bandwidth`, stepped by `grid_size`).
    pub x_axis: Vec<f64>,
    /// Cell origins along y.
    pub y_axis: Vec<f64>,
    pub origins_x: Field2,
    pub origins_y: Field2,
    pub centers_x: Field2,
    pub centers_y: Field2,
}

impl Grid {
    pub fn shape(&self) -> (usize, usize) {
        self.centers_x.shape()
    }
}

/// Build the cell grid for `points`.
///
/// Axes are half-open: `x_min - bandwidth <= x < x_max + bandwidth`.
#[tracing::instrument(skip(points), fields(points = points.len()))]
pub fn build_grid(points: &PointSet, grid_size: f64, bandwidth: f64) -> HeatResult<Grid> {
    if !grid_size.is_finite() || grid_size <= 0.0 {
        return Err(HeatError::invalid_input(format!(
            "grid_size must be a finite value > 0, got {grid_size}"
        )));
    }
    if !bandwidth.is_finite() || bandwidth < 0.0 {
        return Err(HeatError::invalid_input(format!(
            "bandwidth must be a finite value >= 0, got {bandwidth}"
        )));
    }
    let (Some((x_min, x_max)), Some((y_min, y_max))) = (points.x().extent(), points.y().extent())
    else {
        return Err(HeatError::invalid_input(
            "cannot build a grid for an empty point set",
        ));
    };

    let x_axis = arange(x_min - bandwidth, x_max + bandwidth, grid_size)?;
    let y_axis = arange(y_min - bandwidth, y_max + bandwidth, grid_size)?;
    let (rows, cols) = (y_axis.len(), x_axis.len());
    match rows.checked_mul(cols) {
        Some(cells) if cells <= MAX_GRID_CELLS => {}
        _ => {
            return Err(HeatError::invalid_input(format!(
                "grid of {rows}x{cols} cells exceeds the {MAX_GRID_CELLS} cell limit; \
                 raise grid_size"
            )));
        }
    }

    let mut origins_x = Vec::with_capacity(rows * cols);
    let mut origins_y = Vec::with_capacity(rows * cols);
    for &gy in &y_axis {
        for &gx in &x_axis {
            origins_x.push(gx);
            origins_y.push(gy);
        }
    }
    let origins_x = Field2::from_vec(rows, cols, origins_x)?;
    let origins_y = Field2::from_vec(rows, cols, origins_y)?;

    let half = grid_size / 2.0;
    let centers_x = origins_x.map(|v| v + half);
    let centers_y = origins_y.map(|v| v + half);

    tracing::debug!(rows, cols, "built grid");
    Ok(Grid {
        grid_size,
        x_axis,
        y_axis,
        origins_x,
        origins_y,
        centers_x,
        centers_y,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/density/grid.rs"]
mod tests;
