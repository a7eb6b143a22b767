use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;

use crate::density::estimate::{EstimatorKind, estimate_intensity_with};
use crate::density::grid::{Grid, build_grid};
use crate::density::normalize::normalize_alpha;
use crate::foundation::core::{Field2, PointSet};
use crate::foundation::error::{HeatError, HeatResult};
use crate::input::coords::load_coordinates;
use crate::render::colormap::Colormap;
use crate::render::raster::{render, save_heatmap};
use crate::render::smooth::Interpolation;

/// Parameters shared by every frame of a heatmap render.
///
/// Deserializes from a partial JSON object; absent keys keep their defaults.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeatmapParams {
    /// Cell edge length.
    pub grid_size: f64,
    /// Kernel radius.
    pub bandwidth: f64,
    pub colormap: Colormap,
    pub interpolation: Interpolation,
    pub estimator: EstimatorKind,
    /// Spread estimator rows over the rayon pool.
    pub parallel: bool,
}

impl Default for HeatmapParams {
    fn default() -> Self {
        Self {
            grid_size: 1.0,
            bandwidth: 10.0,
            colormap: Colormap::Jet,
            interpolation: Interpolation::Gaussian,
            estimator: EstimatorKind::BruteForce,
            parallel: false,
        }
    }
}

impl HeatmapParams {
    /// Defaults used for point-cloud input and animation frames (coarser grid).
    pub fn for_point_cloud() -> Self {
        Self {
            grid_size: 10.0,
            ..Self::default()
        }
    }

    /// Read parameters from a JSON file; absent keys take [`HeatmapParams::default`].
    pub fn from_path(path: impl AsRef<Path>) -> HeatResult<Self> {
        Self::from_path_over(path, Self::default())
    }

    /// Read parameters from a JSON file; absent keys keep their value in `base`.
    pub fn from_path_over(path: impl AsRef<Path>, base: Self) -> HeatResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| HeatError::from_io(path, e))?;
        let patch: ParamsPatch = serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            HeatError::invalid_input(format!("parse params JSON '{}': {e}", path.display()))
        })?;
        Ok(patch.apply(base))
    }
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ParamsPatch {
    grid_size: Option<f64>,
    bandwidth: Option<f64>,
    colormap: Option<Colormap>,
    interpolation: Option<Interpolation>,
    estimator: Option<EstimatorKind>,
    parallel: Option<bool>,
}

impl ParamsPatch {
    fn apply(self, base: HeatmapParams) -> HeatmapParams {
        HeatmapParams {
            grid_size: self.grid_size.unwrap_or(base.grid_size),
            bandwidth: self.bandwidth.unwrap_or(base.bandwidth),
            colormap: self.colormap.unwrap_or(base.colormap),
            interpolation: self.interpolation.unwrap_or(base.interpolation),
            estimator: self.estimator.unwrap_or(base.estimator),
            parallel: self.parallel.unwrap_or(base.parallel),
        }
    }
}

/// Everything computed for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct HeatmapFrame {
    pub grid: Grid,
    pub intensity: Field2,
    pub alpha: Field2,
}

/// Grid, intensity and alpha for `points`. Pure: equal inputs give equal outputs.
pub fn compute_frame(points: &PointSet, params: &HeatmapParams) -> HeatResult<HeatmapFrame> {
    let grid = build_grid(points, params.grid_size, params.bandwidth)?;
    let intensity = estimate_intensity_with(
        points,
        &grid.centers_x,
        &grid.centers_y,
        params.bandwidth,
        params.estimator,
        params.parallel,
    )?;
    let alpha = normalize_alpha(&intensity);
    Ok(HeatmapFrame {
        grid,
        intensity,
        alpha,
    })
}

/// Render `points` to a transparent heatmap image at `output`.
pub fn create_heatmap_from_points(
    output: &Path,
    points: &PointSet,
    params: &HeatmapParams,
) -> HeatResult<HeatmapFrame> {
    let frame = compute_frame(points, params)?;
    let img = render(
        &frame.intensity,
        &frame.alpha,
        params.colormap,
        params.interpolation,
    )?;
    save_heatmap(output, &img)?;
    Ok(frame)
}

/// Load coordinates from `json_file` and render them to `output`.
#[tracing::instrument(skip(params))]
pub fn create_heatmap(
    output: &Path,
    json_file: &Path,
    params: &HeatmapParams,
) -> HeatResult<HeatmapFrame> {
    let points = load_coordinates(json_file)?;
    create_heatmap_from_points(output, &points, params)
}

/// Threading controls for multi-frame rendering.
#[derive(Clone, Debug, Default)]
pub struct RenderThreading {
    /// Render frames concurrently when `true`.
    pub parallel: bool,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

/// Aggregated rendering counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub frames_total: u64,
    pub frames_rendered: u64,
}

/// One frame to render: its points and its own output path.
#[derive(Clone, Debug)]
pub struct FrameJob {
    pub points: PointSet,
    pub output: PathBuf,
}

/// Render independent frames, each to its own path.
///
/// Stops at the first failing frame; frames already written stay on disk.
pub fn render_frames(
    jobs: &[FrameJob],
    params: &HeatmapParams,
    threading: &RenderThreading,
) -> HeatResult<RenderStats> {
    let mut seen = HashSet::with_capacity(jobs.len());
    for job in jobs {
        if !seen.insert(job.output.as_path()) {
            return Err(HeatError::invalid_input(format!(
                "duplicate frame output path '{}'",
                job.output.display()
            )));
        }
    }

    let total = jobs.len();
    let done = AtomicUsize::new(0);
    let render_one = |job: &FrameJob| -> HeatResult<()> {
        create_heatmap_from_points(&job.output, &job.points, params)?;
        let n = done.fetch_add(1, Ordering::Relaxed) + 1;
        if n % 10 == 0 {
            tracing::info!("generated {n}/{total} frames");
        }
        Ok(())
    };

    if threading.parallel {
        let pool = build_thread_pool(threading.threads)?;
        pool.install(|| jobs.par_iter().try_for_each(render_one))?;
    } else {
        jobs.iter().try_for_each(render_one)?;
    }

    let n = jobs.len() as u64;
    Ok(RenderStats {
        frames_total: n,
        frames_rendered: n,
    })
}

pub(crate) fn build_thread_pool(threads: Option<usize>) -> HeatResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(HeatError::invalid_input(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| HeatError::io(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
