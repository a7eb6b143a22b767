use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::core::{Coords, PointSet};
use crate::foundation::error::{HeatError, HeatResult};

#[derive(Debug, serde::Deserialize)]
struct CoordRecord {
    x: Option<f64>,
    y: Option<f64>,
}

/// Parse `[{"x": .., "y": ..}, ...]` from a JSON reader, preserving record order.
pub fn coordinates_from_reader<R: std::io::Read>(r: R) -> HeatResult<PointSet> {
    let records: Vec<CoordRecord> = serde_json::from_reader(r)
        .map_err(|e| HeatError::invalid_input(format!("parse coordinate JSON: {e}")))?;

    let mut x = Vec::with_capacity(records.len());
    let mut y = Vec::with_capacity(records.len());
    for (index, rec) in records.into_iter().enumerate() {
        x.push(rec.x.ok_or(HeatError::missing_field(index, "x"))?);
        y.push(rec.y.ok_or(HeatError::missing_field(index, "y"))?);
    }
    PointSet::new(Coords(x), Coords(y))
}

/// Load point coordinates from a JSON file on disk.
#[tracing::instrument]
pub fn load_coordinates(path: &Path) -> HeatResult<PointSet> {
    let f = File::open(path).map_err(|e| HeatError::from_io(path, e))?;
    let points = coordinates_from_reader(BufReader::new(f)).inspect_err(|e| {
        tracing::error!(path = %path.display(), "coordinate load failed: {e}");
    })?;
    tracing::info!(count = points.len(), path = %path.display(), "loaded coordinates");
    Ok(points)
}

#[cfg(test)]
#[path = "../../tests/unit/input/coords.rs"]
mod tests;
