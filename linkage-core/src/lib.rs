pub mod chain;
pub mod error;
pub mod geometry;

pub use nalgebra;

pub use self::error::Error;
