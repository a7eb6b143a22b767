use std::path::{Path, PathBuf};

use crate::compose::gif::{GifOpts, encode_gif};
use crate::compose::overlay::{OverlayOpts, overlay_images};
use crate::foundation::error::{HeatError, HeatResult};
use crate::motion::RandomWalk;
use crate::pipeline::{FrameJob, HeatmapParams, RenderStats, RenderThreading, render_frames};

/// Side length of the square the simulated points start in.
pub const SIMULATION_EXTENT: u32 = 100;

/// Options for [`animate`].
#[derive(Clone, Debug)]
pub struct AnimateOpts {
    pub frames: usize,
    pub points: usize,
    pub output: PathBuf,
    /// Composite every frame over this image.
    pub background: Option<PathBuf>,
    pub gif: GifOpts,
    pub params: HeatmapParams,
    pub seed: u64,
    pub threading: RenderThreading,
    /// Scratch directory for the per-frame PNGs.
    pub frames_dir: PathBuf,
    /// Leave `frames_dir` in place after the GIF is written.
    pub keep_frames: bool,
}

impl Default for AnimateOpts {
    fn default() -> Self {
        Self {
            frames: 100,
            points: 100,
            output: PathBuf::from("animation.gif"),
            background: None,
            gif: GifOpts::default(),
            params: HeatmapParams::for_point_cloud(),
            seed: 0,
            threading: RenderThreading::default(),
            frames_dir: PathBuf::from("temp_frames"),
            keep_frames: false,
        }
    }
}

/// Simulate drifting points, render one heatmap per step and assemble a looping GIF.
#[tracing::instrument(skip(opts), fields(frames = opts.frames, points = opts.points))]
pub fn animate(opts: &AnimateOpts) -> HeatResult<RenderStats> {
    if opts.frames == 0 {
        return Err(HeatError::invalid_input("animation needs at least one frame"));
    }
    let mut walk = RandomWalk::new(opts.points, SIMULATION_EXTENT, opts.seed)?;
    let jobs: Vec<FrameJob> = walk
        .frames(opts.frames)?
        .into_iter()
        .enumerate()
        .map(|(i, points)| FrameJob {
            points,
            output: opts.frames_dir.join(format!("frame_{i:04}.png")),
        })
        .collect();

    let created_dir = !opts.frames_dir.exists();
    std::fs::create_dir_all(&opts.frames_dir)
        .map_err(|e| HeatError::from_io(&opts.frames_dir, e))?;
    let result = render_and_encode(opts, &jobs);
    if !opts.keep_frames {
        remove_frames(&opts.frames_dir, &jobs, created_dir);
    }
    let stats = result?;
    tracing::info!(output = %opts.output.display(), "animation created");
    Ok(stats)
}

/// Delete the frames this run wrote; the directory goes too only if this run made it.
fn remove_frames(dir: &Path, jobs: &[FrameJob], created_dir: bool) {
    if created_dir {
        if let Err(e) = std::fs::remove_dir_all(dir) {
            tracing::warn!(dir = %dir.display(), "failed to remove frames: {e}");
        }
        return;
    }
    for job in jobs {
        match std::fs::remove_file(&job.output) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(frame = %job.output.display(), "failed to remove frame: {e}");
            }
        }
    }
}

fn render_and_encode(opts: &AnimateOpts, jobs: &[FrameJob]) -> HeatResult<RenderStats> {
    tracing::info!("generating {} frames", jobs.len());
    let stats = render_frames(jobs, &opts.params, &opts.threading)?;

    if let Some(bg) = &opts.background {
        let overlay = OverlayOpts {
            crop: None,
            fit: true,
        };
        for (i, job) in jobs.iter().enumerate() {
            overlay_images(bg, &job.output, &job.output, overlay)?;
            if (i + 1) % 10 == 0 {
                tracing::info!("composited {}/{} frames", i + 1, jobs.len());
            }
        }
    }

    tracing::info!("creating gif animation");
    let files: Vec<PathBuf> = jobs.iter().map(|j| j.output.clone()).collect();
    encode_gif(&files, &opts.output, opts.gif)?;
    Ok(stats)
}

#[cfg(test)]
#[path = "../tests/unit/animate.rs"]
mod tests;
