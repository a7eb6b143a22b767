pub mod gif;
pub mod image_ops;
pub mod overlay;
