use std::{error, fmt};

#[derive(Debug)]
pub enum Error {
    /// Axis tag outside {x, y, z}.
    InvalidAxis(String),
    /// Angle vector does not match the joint count.
    DimensionMismatch { expected: usize, actual: usize },
    /// Homogeneous coordinate of a transformed point deviates from 1.
    HomogeneousInvariant(f64),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidAxis(tag) => write!(f, "invalid rotation axis: {}", tag),
            Error::DimensionMismatch { expected, actual } => {
                write!(f, "expected {} joint angles, got {}", expected, actual)
            }
            Error::HomogeneousInvariant(w) => {
                write!(f, "homogeneous coordinate deviates from 1: {}", w)
            }
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        None
    }
}
