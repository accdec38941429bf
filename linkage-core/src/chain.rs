use nalgebra::{Matrix4, Point3, Vector3, Vector4};

use crate::error::Error;
use crate::geometry::{frame, rotation, Axis};

/// Tolerance on the homogeneous coordinate of a transformed point.
const HOMOGENEOUS_EPSILON: f64 = 1e-9;

/// A single revolute joint in a serial chain.
///
/// A joint carries its rotation axis, the controllable joint angle and a
/// fixed translation offset with respect to the previous frame. Joints are
/// immutable for a given configuration; a new angle vector produces new
/// joints (see [`Chain::with_angles`]).
#[derive(Clone, Debug)]
pub struct Joint {
    name: String,
    axis: Axis,
    angle: f64,
    origin: Vector3<f64>,
}

impl Joint {
    /// Construct a new joint at the parent frame origin with a zero angle.
    pub fn new(name: impl ToString, axis: Axis) -> Self {
        Self {
            name: name.to_string(),
            axis,
            angle: 0.0,
            origin: Vector3::zeros(),
        }
    }

    /// Joint angle in degrees. Any real value is accepted, including
    /// multi-turn angles; limits belong to a planner, not to kinematics.
    pub fn set_angle(mut self, angle_deg: f64) -> Self {
        self.angle = angle_deg;
        self
    }

    pub fn set_origin_translation(mut self, origin_x: f64, origin_y: f64, origin_z: f64) -> Self {
        self.origin = Vector3::new(origin_x, origin_y, origin_z);
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    #[inline]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    #[inline]
    pub fn origin(&self) -> Vector3<f64> {
        self.origin
    }

    /// Transform of this joint's frame with respect to its parent frame.
    pub fn local_transform(&self) -> Matrix4<f64> {
        frame(rotation(self.angle, self.axis), self.origin)
    }
}

/// Result of a forward kinematics solve.
///
/// Holds the cumulative world transform of every joint frame, base to tip,
/// and the world position of the end-effector.
pub struct Solution {
    poses: Vec<Matrix4<f64>>,
    end_effector: Point3<f64>,
}

impl Solution {
    /// Cumulative world transforms, one per joint in chain order.
    #[inline]
    pub fn poses(&self) -> &[Matrix4<f64>] {
        &self.poses
    }

    /// World transform of a single joint frame.
    #[inline]
    pub fn pose(&self, index: usize) -> Option<&Matrix4<f64>> {
        self.poses.get(index)
    }

    /// World position of the end-effector.
    #[inline]
    pub fn end_effector(&self) -> Point3<f64> {
        self.end_effector
    }
}

/// An ordered serial chain of revolute joints, base to tip.
///
/// The chain holds no solver state; every call to [`Chain::solve`] is an
/// independent single pass and may run concurrently with solves on other
/// chains.
#[derive(Clone, Default)]
pub struct Chain {
    joints: Vec<Joint>,
}

impl Chain {
    pub fn new() -> Self {
        Self { joints: vec![] }
    }

    pub fn add_joint(mut self, joint: Joint) -> Self {
        self.joints.push(joint);
        self
    }

    #[inline]
    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.joints.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    /// Produce a chain with the same geometry and a fresh configuration.
    ///
    /// The angle vector must carry one angle in degrees per joint.
    pub fn with_angles(&self, angles: &[f64]) -> Result<Self, Error> {
        if angles.len() != self.joints.len() {
            return Err(Error::DimensionMismatch {
                expected: self.joints.len(),
                actual: angles.len(),
            });
        }

        let joints = self
            .joints
            .iter()
            .zip(angles)
            .map(|(joint, angle)| joint.clone().set_angle(*angle))
            .collect();

        Ok(Self { joints })
    }

    /// Solve forward kinematics for the current configuration.
    ///
    /// Composes the local joint transforms left to right from the world
    /// frame identity and extracts the end-effector position from the final
    /// pose. An empty chain is valid and yields the world origin.
    pub fn solve(&self) -> Result<Solution, Error> {
        let mut pose = Matrix4::identity();
        let mut poses = Vec::with_capacity(self.joints.len());

        for joint in &self.joints {
            pose *= joint.local_transform();
            poses.push(pose);
        }

        let effector = pose * Vector4::new(0.0, 0.0, 0.0, 1.0);
        if (effector.w - 1.0).abs() > HOMOGENEOUS_EPSILON {
            return Err(Error::HomogeneousInvariant(effector.w));
        }

        log::debug!(
            "Effector point: X {:>+5.2} Y {:>+5.2} Z {:>+5.2}",
            effector.x,
            effector.y,
            effector.z
        );

        Ok(Solution {
            poses,
            end_effector: Point3::new(effector.x, effector.y, effector.z),
        })
    }
}

impl std::fmt::Display for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pose = self
            .joints
            .iter()
            .fold(Matrix4::<f64>::identity(), |pose, joint| {
                pose * joint.local_transform()
            });
        let point = pose.transform_point(&Point3::origin());

        write!(f, "[{:.2}, {:.2}, {:.2}]", point.x, point.y, point.z)
    }
}

impl std::fmt::Debug for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for joint in &self.joints {
            write!(f, "{}={:5.2}°/{} ", joint.name(), joint.angle(), joint.axis())?;
        }

        write!(f, "Endpoint {}", self)
    }
}
