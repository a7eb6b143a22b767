pub mod colormap;
pub mod raster;
pub mod smooth;
