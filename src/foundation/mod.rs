pub mod core;
pub mod error;
pub mod io;
pub mod math;
