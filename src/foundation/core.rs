use std::ops::{Add, Index};

use crate::foundation::error::{HeatError, HeatResult};

/// Ordered sequence of coordinates along one axis.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Coords(pub Vec<f64>);

impl Coords {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.0.iter()
    }

    /// `(min, max)` of the sequence, or `None` when empty.
    pub fn extent(&self) -> Option<(f64, f64)> {
        let mut it = self.0.iter().copied();
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }

    /// Elementwise `self + delta`, broadcasting a scalar delta.
    pub fn offset(&self, delta: &Delta) -> HeatResult<Self> {
        match delta {
            Delta::Scalar(d) => Ok(Self(self.0.iter().map(|v| v + d).collect())),
            Delta::Seq(ds) => {
                if ds.len() != self.len() {
                    return Err(HeatError::invalid_input(format!(
                        "delta length {} does not match coordinate length {}",
                        ds.len(),
                        self.len()
                    )));
                }
                Ok(Self(
                    self.0.iter().zip(ds.iter()).map(|(v, d)| v + d).collect(),
                ))
            }
        }
    }
}

impl From<Vec<f64>> for Coords {
    fn from(v: Vec<f64>) -> Self {
        Self(v)
    }
}

impl From<&[f64]> for Coords {
    fn from(v: &[f64]) -> Self {
        Self(v.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for Coords {
    fn from(v: [f64; N]) -> Self {
        Self(v.to_vec())
    }
}

impl FromIterator<f64> for Coords {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Index<usize> for Coords {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.0[i]
    }
}

/// Per-axis displacement: one value broadcast to every point, or one value per point.
#[derive(Clone, Debug, PartialEq)]
pub enum Delta {
    Scalar(f64),
    Seq(Coords),
}

impl Delta {
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Scalar(d) => *d == 0.0,
            Self::Seq(ds) => ds.iter().all(|d| *d == 0.0),
        }
    }
}

impl From<f64> for Delta {
    fn from(v: f64) -> Self {
        Self::Scalar(v)
    }
}

impl From<Coords> for Delta {
    fn from(v: Coords) -> Self {
        Self::Seq(v)
    }
}

impl From<Vec<f64>> for Delta {
    fn from(v: Vec<f64>) -> Self {
        Self::Seq(Coords(v))
    }
}

impl<const N: usize> From<[f64; N]> for Delta {
    fn from(v: [f64; N]) -> Self {
        Self::Seq(Coords::from(v))
    }
}

impl Add<&Delta> for &Coords {
    type Output = HeatResult<Coords>;

    fn add(self, rhs: &Delta) -> HeatResult<Coords> {
        self.offset(rhs)
    }
}

/// Parallel x/y sequences describing one frame's points.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointSet {
    x: Coords,
    y: Coords,
}

impl PointSet {
    pub fn new(x: impl Into<Coords>, y: impl Into<Coords>) -> HeatResult<Self> {
        let (x, y) = (x.into(), y.into());
        if x.len() != y.len() {
            return Err(HeatError::invalid_input(format!(
                "x has {} values but y has {}",
                x.len(),
                y.len()
            )));
        }
        Ok(Self { x, y })
    }

    pub fn x(&self) -> &Coords {
        &self.x
    }

    pub fn y(&self) -> &Coords {
        &self.y
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    pub fn into_parts(self) -> (Coords, Coords) {
        (self.x, self.y)
    }
}

/// Row-major 2-D array of `f64`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Field2 {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Field2 {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> HeatResult<Self> {
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(HeatError::invalid_input(format!(
                "field data of length {} does not match shape {rows}x{cols}",
                data.len()
            )));
        }
        Ok(Self { rows, cols, data })
    }

    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> HeatResult<Self> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (j, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(HeatError::invalid_input(format!(
                    "ragged field: row {j} has {} values, expected {cols}",
                    row.len()
                )));
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// `(min, max)` over all cells, or `None` when empty.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        let mut it = self.data.iter().copied();
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }

    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
