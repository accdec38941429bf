use nalgebra::{IsometryMatrix3, Matrix3, Matrix4, Rotation3, Translation3, UnitVector3, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Principal axis a revolute joint rotates about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Unit vector of the axis in its local frame.
    #[inline]
    pub fn unit(self) -> UnitVector3<f64> {
        match self {
            Axis::X => Vector3::x_axis(),
            Axis::Y => Vector3::y_axis(),
            Axis::Z => Vector3::z_axis(),
        }
    }
}

impl TryFrom<char> for Axis {
    type Error = Error;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase() {
            'x' => Ok(Self::X),
            'y' => Ok(Self::Y),
            'z' => Ok(Self::Z),
            _ => Err(Error::InvalidAxis(value.to_string())),
        }
    }
}

impl std::str::FromStr for Axis {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "x" => Ok(Self::X),
            "y" => Ok(Self::Y),
            "z" => Ok(Self::Z),
            _ => Err(Error::InvalidAxis(s.to_string())),
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}

/// Construct the elementary rotation matrix about a single principal axis.
///
/// The angle is taken in degrees and converted internally. The result is the
/// standard right-handed rotation: x fixes the x-axis and rotates the y-z
/// plane, y fixes the y-axis, z fixes the z-axis.
pub fn rotation(angle_deg: f64, axis: Axis) -> Matrix3<f64> {
    Rotation3::from_axis_angle(&axis.unit(), angle_deg.to_radians()).into_inner()
}

/// Combine a rotation and a translation into a homogeneous rigid-body
/// transform of the block form `[[R, t], [0 0 0, 1]]`.
///
/// The rotation is trusted as-is; orthonormality is the caller's concern.
pub fn frame(rotation: Matrix3<f64>, translation: Vector3<f64>) -> Matrix4<f64> {
    IsometryMatrix3::from_parts(
        Translation3::from(translation),
        Rotation3::from_matrix_unchecked(rotation),
    )
    .to_homogeneous()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector4;

    const EPSILON: f64 = 1e-9;

    fn assert_matrix3_eq(lhs: &Matrix3<f64>, rhs: &Matrix3<f64>) {
        for (l, r) in lhs.iter().zip(rhs.iter()) {
            assert!((l - r).abs() < EPSILON, "{} != {}", l, r);
        }
    }

    #[test]
    fn test_rotation_orthonormal() {
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            for angle in [-400.0, -180.0, -30.0, 0.0, 12.5, 90.0, 360.0, 730.0] {
                let r = rotation(angle, axis);

                assert_matrix3_eq(&(r * r.transpose()), &Matrix3::identity());
                assert!((r.determinant() - 1.0).abs() < EPSILON);
            }
        }
    }

    #[test]
    fn test_rotation_zero_is_identity() {
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            assert_matrix3_eq(&rotation(0.0, axis), &Matrix3::identity());
        }
    }

    #[test]
    fn test_rotation_inverse_law() {
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            let product = rotation(73.4, axis) * rotation(-73.4, axis);

            assert_matrix3_eq(&product, &Matrix3::identity());
        }
    }

    #[test]
    fn test_rotation_right_handed() {
        // A quarter turn about each axis cycles the next unit vector forward.
        let x = rotation(90.0, Axis::X) * Vector3::y();
        assert!((x.z - 1.0).abs() < EPSILON);

        let y = rotation(90.0, Axis::Y) * Vector3::z();
        assert!((y.x - 1.0).abs() < EPSILON);

        let z = rotation(90.0, Axis::Z) * Vector3::x();
        assert!((z.y - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_frame_maps_origin_to_translation() {
        let transform = frame(rotation(42.0, Axis::Y), Vector3::new(1.0, -2.0, 3.0));
        let origin = transform * Vector4::new(0.0, 0.0, 0.0, 1.0);

        assert!((origin.x - 1.0).abs() < EPSILON);
        assert!((origin.y + 2.0).abs() < EPSILON);
        assert!((origin.z - 3.0).abs() < EPSILON);
        assert!((origin.w - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_frame_block_structure() {
        let r = rotation(-17.0, Axis::X);
        let transform = frame(r, Vector3::new(0.5, 0.0, -4.0));

        assert_matrix3_eq(&transform.fixed_view::<3, 3>(0, 0).into_owned(), &r);

        assert_eq!(transform[(3, 0)], 0.0);
        assert_eq!(transform[(3, 1)], 0.0);
        assert_eq!(transform[(3, 2)], 0.0);
        assert_eq!(transform[(3, 3)], 1.0);
    }

    #[test]
    fn test_axis_parse() {
        assert_eq!("z".parse::<Axis>().unwrap(), Axis::Z);
        assert_eq!(" Y ".parse::<Axis>().unwrap(), Axis::Y);
        assert_eq!(Axis::try_from('x').unwrap(), Axis::X);

        assert!("w".parse::<Axis>().is_err());
        assert!(Axis::try_from('0').is_err());
    }
}
