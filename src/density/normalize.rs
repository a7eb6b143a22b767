use crate::foundation::core::Field2;

/// Rescale `intensity` to `[0, 1]` for use as an alpha channel.
///
/// A constant field (including all zeros) yields all zeros: no signal renders fully
/// transparent.
pub fn normalize_alpha(intensity: &Field2) -> Field2 {
    let Some((lo, hi)) = intensity.min_max() else {
        return intensity.clone();
    };
    if hi == lo {
        tracing::warn!("constant intensity values detected, returning zeros");
        return Field2::zeros(intensity.rows(), intensity.cols());
    }
    let span = hi - lo;
    intensity.map(|v| (v - lo) / span)
}

#[cfg(test)]
#[path = "../../tests/unit/density/normalize.rs"]
mod tests;
