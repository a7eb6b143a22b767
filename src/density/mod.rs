pub mod estimate;
pub mod grid;
pub mod normalize;
