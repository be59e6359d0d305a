/// Camera and projection utilities
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use nalgebra::{Matrix4, Point3, Vector3};

use crate::config::{CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR, CAMERA_POSITION};

/// Live handle to a position that other objects read every frame
///
/// Clones share the same cell: a glow material holding a handle to the
/// camera position sees every later camera move.
#[derive(Clone)]
pub struct SharedPosition(Rc<Cell<Point3<f32>>>);

impl SharedPosition {
    pub fn new(position: Point3<f32>) -> Self {
        Self(Rc::new(Cell::new(position)))
    }

    pub fn get(&self) -> Point3<f32> {
        self.0.get()
    }

    pub fn set(&self, position: Point3<f32>) {
        self.0.set(position);
    }

    /// True when both handles point at the same cell
    pub fn same_as(&self, other: &SharedPosition) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for SharedPosition {
    fn default() -> Self {
        Self::new(Point3::origin())
    }
}

impl fmt::Debug for SharedPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedPosition").field(&self.get()).finish()
    }
}

/// Camera configuration for 3D rendering
pub struct Camera {
    pub position: SharedPosition,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        let [x, y, z] = CAMERA_POSITION;
        Self {
            position: SharedPosition::new(Point3::new(x, y, z)),
            target: Point3::origin(),
            up: Vector3::new(0.0, 1.0, 0.0),
            fov: CAMERA_FOV_DEGREES.to_radians(),
            aspect: width as f32 / height.max(1) as f32,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
        }
    }

    /// Handle that follows this camera's position
    pub fn position_handle(&self) -> SharedPosition {
        self.position.clone()
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position.get(), &self.target, &self.up)
    }

    /// Create the perspective projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
    }

    /// Project a world-space point to 2D screen space
    ///
    /// Returns `(x, y, depth)` with depth in normalized device units, or
    /// `None` when the point falls outside the view volume.
    pub fn project_to_screen(
        &self,
        point: &Point3<f32>,
        view_projection: &Matrix4<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let clip = view_projection * point.to_homogeneous();

        // Points behind the eye
        if clip.w <= 1e-6 {
            return None;
        }

        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        let depth = clip.z / clip.w;

        if !(-1.0..=1.0).contains(&depth) {
            return None;
        }

        // Convert to screen space; triangles may overhang the viewport and are
        // clipped by the rasterizer.
        let screen_x = (ndc_x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc_y) * 0.5 * height as f32;

        Some((screen_x, screen_y, depth))
    }

    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}
