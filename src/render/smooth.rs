use crate::foundation::core::Field2;
use crate::foundation::error::{HeatError, HeatResult};

/// Display smoothing applied before palette lookup. Never changes the output size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    /// One flat colour per cell.
    #[serde(alias = "none")]
    Nearest,
    /// Separable gaussian blur over the cell neighbourhood.
    #[default]
    Gaussian,
}

impl std::str::FromStr for Interpolation {
    type Err = HeatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" | "none" => Ok(Self::Nearest),
            "gaussian" => Ok(Self::Gaussian),
            other => Err(HeatError::invalid_input(format!(
                "unknown interpolation '{other}' (expected 'nearest' or 'gaussian')"
            ))),
        }
    }
}

impl Interpolation {
    pub fn apply(self, field: &Field2) -> HeatResult<Field2> {
        match self {
            Self::Nearest => Ok(field.clone()),
            Self::Gaussian => gaussian_smooth(field, 1, 0.85),
        }
    }
}

/// Separable gaussian blur with clamped edges.
pub fn gaussian_smooth(field: &Field2, radius: usize, sigma: f64) -> HeatResult<Field2> {
    if radius == 0 || field.is_empty() {
        return Ok(field.clone());
    }
    let kernel = gaussian_kernel(radius, sigma)?;
    let (rows, cols) = field.shape();
    let src = field.as_slice();
    let mut tmp = vec![0.0; src.len()];
    let mut out = vec![0.0; src.len()];

    horizontal_pass(src, &mut tmp, rows, cols, &kernel);
    vertical_pass(&tmp, &mut out, rows, cols, &kernel);
    Field2::from_vec(rows, cols, out)
}

fn gaussian_kernel(radius: usize, sigma: f64) -> HeatResult<Vec<f64>> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(HeatError::invalid_input("smoothing sigma must be > 0"));
    }
    let r = radius as i64;
    let denom = 2.0 * sigma * sigma;
    let weights: Vec<f64> = (-r..=r)
        .map(|i| {
            let x = i as f64;
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f64 = weights.iter().sum();
    Ok(weights.into_iter().map(|w| w / sum).collect())
}

fn horizontal_pass(src: &[f64], dst: &mut [f64], rows: usize, cols: usize, k: &[f64]) {
    let radius = (k.len() / 2) as i64;
    let w = cols as i64;
    for y in 0..rows {
        for x in 0..w {
            let mut acc = 0.0;
            for (ki, &kw) in k.iter().enumerate() {
                let sx = (x + ki as i64 - radius).clamp(0, w - 1) as usize;
                acc += kw * src[y * cols + sx];
            }
            dst[y * cols + x as usize] = acc;
        }
    }
}

fn vertical_pass(src: &[f64], dst: &mut [f64], rows: usize, cols: usize, k: &[f64]) {
    let radius = (k.len() / 2) as i64;
    let h = rows as i64;
    for y in 0..h {
        for x in 0..cols {
            let mut acc = 0.0;
            for (ki, &kw) in k.iter().enumerate() {
                let sy = (y + ki as i64 - radius).clamp(0, h - 1) as usize;
                acc += kw * src[sy * cols + x];
            }
            dst[y as usize * cols + x] = acc;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/smooth.rs"]
mod tests;
