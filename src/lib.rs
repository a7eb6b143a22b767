//! heatkde turns a set of (x, y) points into a quartic-kernel density heatmap.
//!
//! # Pipeline overview
//!
//! 1. **Load**: JSON `[{"x": .., "y": ..}]` -> [`PointSet`]
//! 2. **Grid**: point extent padded by the bandwidth -> [`Grid`] of cell centers
//! 3. **Estimate**: quartic-kernel sum per cell -> intensity [`Field2`]
//! 4. **Normalize**: intensity -> alpha in `[0, 1]`
//! 5. **Render**: palette + alpha -> transparent RGBA PNG, one pixel per cell
//!
//! Every frame is an independent, pure computation. Around the core sit the compositing
//! helpers ([`overlay_images`], [`crop_image`], [`resize_image`]), GIF assembly
//! ([`create_gif`]) and a random-walk animation driver ([`animate`]).
//!
//! Logging goes through `tracing`; installing a subscriber is left to the binary.
#![forbid(unsafe_code)]

mod animate;
mod compose;
mod density;
mod foundation;
mod input;
mod motion;
mod pipeline;
mod render;

pub use animate::{AnimateOpts, SIMULATION_EXTENT, animate};
pub use compose::gif::{
    GifOpts, create_gif, create_gif_from_directory, encode_gif, expand_pattern,
};
pub use compose::image_ops::{
    CropBox, MAX_CROP_PIXELS, crop_image, crop_rgba, resize_image, thumbnail_size,
};
pub use compose::overlay::{OverlayOpts, composite, overlay_images};
pub use density::estimate::{
    BruteForce, BucketIndex, EstimatorKind, IntensityEstimator, accumulate, estimate_intensity,
    estimate_intensity_with,
};
pub use density::grid::{Grid, MAX_GRID_CELLS, build_grid};
pub use density::normalize::normalize_alpha;
pub use foundation::core::{Coords, Delta, Field2, PointSet};
pub use foundation::error::{HeatError, HeatResult};
pub use foundation::io::{ensure_parent_dir, open_image, save_image_atomic};
pub use input::coords::{coordinates_from_reader, load_coordinates};
pub use motion::{RandomWalk, update_coordinates, update_points};
pub use pipeline::{
    FrameJob, HeatmapFrame, HeatmapParams, RenderStats, RenderThreading, compute_frame,
    create_heatmap, create_heatmap_from_points, render_frames,
};
pub use render::colormap::Colormap;
pub use render::raster::{render, save_heatmap};
pub use render::smooth::{Interpolation, gaussian_smooth};
