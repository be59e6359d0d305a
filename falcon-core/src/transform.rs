/// 3D transformation matrices, Euler rotation state and node transforms
use nalgebra::{Matrix3, Matrix4, Point3, Vector3};

/// Rotation around three axes (in radians), applied as `Rx * Ry * Rz`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationState {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Extract XYZ Euler angles from a pure rotation matrix
    pub fn from_rotation_matrix(m: &Matrix3<f32>) -> Self {
        let m13 = m[(0, 2)].clamp(-1.0, 1.0);
        let y = m13.asin();
        if m13.abs() < 0.99999 {
            Self::new(
                (-m[(1, 2)]).atan2(m[(2, 2)]),
                y,
                (-m[(0, 1)]).atan2(m[(0, 0)]),
            )
        } else {
            Self::new(m[(2, 1)].atan2(m[(1, 1)]), y, 0.0)
        }
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Create a rotation matrix from a rotation state
    pub fn rotation_matrix(rotation: &RotationState) -> Matrix4<f32> {
        // Intrinsic X, then Y, then Z
        Self::rotation_x(rotation.x) * Self::rotation_y(rotation.y) * Self::rotation_z(rotation.z)
    }

    pub fn rotation_x(angle: f32) -> Matrix4<f32> {
        Matrix4::new_rotation(Vector3::new(angle, 0.0, 0.0))
    }

    pub fn rotation_y(angle: f32) -> Matrix4<f32> {
        Matrix4::new_rotation(Vector3::new(0.0, angle, 0.0))
    }

    pub fn rotation_z(angle: f32) -> Matrix4<f32> {
        Matrix4::new_rotation(Vector3::new(0.0, 0.0, angle))
    }

    /// Create a translation matrix
    pub fn translation_matrix(x: f32, y: f32, z: f32) -> Matrix4<f32> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }
}

/// Local transform of a scene node: translation, Euler rotation and scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeTransform {
    pub position: Vector3<f32>,
    pub rotation: RotationState,
    pub scale: Vector3<f32>,
}

impl Default for NodeTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl NodeTransform {
    pub fn identity() -> Self {
        Self {
            position: Vector3::zeros(),
            rotation: RotationState::zero(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    /// Compose `T * R * S`
    pub fn matrix(&self) -> Matrix4<f32> {
        Matrix4::new_translation(&self.position)
            * Transform::rotation_matrix(&self.rotation)
            * Matrix4::new_nonuniform_scaling(&self.scale)
    }

    /// Decompose an affine matrix into translation, rotation and scale
    ///
    /// Shear is not representable and is dropped.
    pub fn from_matrix(m: &Matrix4<f32>) -> Self {
        let linear: Matrix3<f32> = m.fixed_view::<3, 3>(0, 0).into_owned();
        let mut scale = Vector3::new(
            linear.column(0).norm(),
            linear.column(1).norm(),
            linear.column(2).norm(),
        );
        if linear.determinant() < 0.0 {
            scale.x = -scale.x;
        }

        let mut rotation = linear;
        for (i, s) in scale.iter().enumerate() {
            if *s != 0.0 {
                let column = rotation.column(i) / *s;
                rotation.set_column(i, &column);
            }
        }

        Self {
            position: Vector3::new(m[(0, 3)], m[(1, 3)], m[(2, 3)]),
            rotation: RotationState::from_rotation_matrix(&rotation),
            scale,
        }
    }

    /// Pre-multiply by `m` (parent-side) and store the decomposed result
    pub fn apply_matrix(&mut self, m: &Matrix4<f32>) {
        *self = Self::from_matrix(&(m * self.matrix()));
    }

    /// Origin of this transform in its parent frame
    pub fn origin(&self) -> Point3<f32> {
        Point3::from(self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_rotation_state() {
        let state = RotationState::new(0.1, 0.2, 0.3);
        assert_eq!(RotationState::default(), RotationState::zero());
        assert!((state.x - 0.1).abs() < 1e-6);
        assert!((state.y - 0.2).abs() < 1e-6);
        assert!((state.z - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_identity_rotation() {
        let rotation = RotationState::zero();
        let matrix = Transform::rotation_matrix(&rotation);
        assert!((matrix - Matrix4::identity()).norm() < 1e-6);
    }

    #[test]
    fn test_euler_round_trip() {
        let rotation = RotationState::new(0.3, -0.7, 1.1);
        let matrix = Transform::rotation_matrix(&rotation);
        let linear = matrix.fixed_view::<3, 3>(0, 0).into_owned();
        let back = RotationState::from_rotation_matrix(&linear);
        assert_relative_eq!(back.x, rotation.x, epsilon = 1e-5);
        assert_relative_eq!(back.y, rotation.y, epsilon = 1e-5);
        assert_relative_eq!(back.z, rotation.z, epsilon = 1e-5);
    }

    #[test]
    fn test_apply_rotations_to_node() {
        // Turn about Y, then about Z: ends up as Euler (-pi/2, 0, -pi/2).
        let mut node = NodeTransform::identity();
        node.apply_matrix(&Transform::rotation_y(-FRAC_PI_2));
        node.apply_matrix(&Transform::rotation_z(-FRAC_PI_2));

        assert_relative_eq!(node.rotation.x, -FRAC_PI_2, epsilon = 1e-5);
        assert_relative_eq!(node.rotation.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(node.rotation.z, -FRAC_PI_2, epsilon = 1e-5);
        assert_relative_eq!(node.scale, Vector3::new(1.0, 1.0, 1.0), epsilon = 1e-5);
    }

    #[test]
    fn test_apply_translation_then_rotation() {
        let mut node = NodeTransform::identity();
        node.apply_matrix(&Transform::translation_matrix(-12.5, 0.0, 0.0));
        node.apply_matrix(&Transform::rotation_y(FRAC_PI_2));
        // Rotating +90 degrees about Y takes -x to +z.
        assert_relative_eq!(node.position, Vector3::new(0.0, 0.0, 12.5), epsilon = 1e-5);
    }

    #[test]
    fn test_matrix_decompose_round_trip() {
        let node = NodeTransform {
            position: Vector3::new(50.0, 10.5, -50.0),
            rotation: RotationState::new(0.2, PI / 16.0, -0.4),
            scale: Vector3::new(1.5, 1.0, 1.0),
        };
        let back = NodeTransform::from_matrix(&node.matrix());
        assert_relative_eq!(back.position, node.position, epsilon = 1e-4);
        assert_relative_eq!(back.scale, node.scale, epsilon = 1e-5);
        assert_relative_eq!(back.rotation.x, node.rotation.x, epsilon = 1e-5);
        assert_relative_eq!(back.rotation.y, node.rotation.y, epsilon = 1e-5);
        assert_relative_eq!(back.rotation.z, node.rotation.z, epsilon = 1e-5);
    }
}
