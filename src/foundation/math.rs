use crate::foundation::error::{HeatError, HeatResult};

/// Quartic (biweight) kernel `(1 - (d/h)^2)^2`, zero outside `d <= h`.
///
/// `bandwidth` must be positive; the estimators check it once up front.
#[inline]
pub(crate) fn kde_quartic(distance: f64, bandwidth: f64) -> f64 {
    if distance > bandwidth {
        return 0.0;
    }
    let u = distance / bandwidth;
    let t = 1.0 - u * u;
    t * t
}

/// Half-open range `start, start + step, ... < stop`, with the same length rule as
/// `numpy.arange`: `ceil((stop - start) / step)` values.
///
/// More than `u32::MAX` values is `InvalidInput`.
pub(crate) fn arange(start: f64, stop: f64, step: f64) -> HeatResult<Vec<f64>> {
    let span = ((stop - start) / step).ceil();
    if span.is_nan() || span <= 0.0 {
        return Ok(Vec::new());
    }
    if span > f64::from(u32::MAX) {
        return Err(HeatError::invalid_input(format!(
            "range {start}..{stop} with step {step} has too many values ({span:e})"
        )));
    }
    let n = span as usize;
    Ok((0..n).map(|i| start + (i as f64) * step).collect())
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
