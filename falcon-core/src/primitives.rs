/// Primitive Factory
///
/// Parametric solids returned as editable [`Mesh`]es. Each generator
/// enumerates its vertices in a fixed order so that later edits can address
/// them by index; the layouts are documented per function and exposed through
/// [`CylinderLayout`] and [`BoxCorner`] instead of bare offsets.
use std::f32::consts::TAU;
use std::ops::RangeInclusive;

use nalgebra::{Point2, Point3};

use crate::error::{ensure_positive, GeometryError, GeometryResult};
use crate::geometry::Mesh;

/// Parameters of a (possibly partial) cylinder or frustum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylinderParams {
    pub radius_top: f32,
    pub radius_bottom: f32,
    pub height: f32,
    pub radial_segments: u32,
    pub height_segments: u32,
    pub open_ended: bool,
    pub theta_start: f32,
    pub theta_length: f32,
}

impl CylinderParams {
    /// A closed, full-revolution cylinder with one height segment.
    pub fn new(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32) -> Self {
        Self {
            radius_top,
            radius_bottom,
            height,
            radial_segments,
            height_segments: 1,
            open_ended: false,
            theta_start: 0.0,
            theta_length: TAU,
        }
    }

    /// Restrict the sweep to `theta_length` radians starting at `theta_start`.
    pub fn sweep(mut self, theta_start: f32, theta_length: f32) -> Self {
        self.theta_start = theta_start;
        self.theta_length = theta_length;
        self
    }

    pub fn height_segments(mut self, height_segments: u32) -> Self {
        self.height_segments = height_segments;
        self
    }

    pub fn open_ended(mut self, open_ended: bool) -> Self {
        self.open_ended = open_ended;
        self
    }
}

/// Named vertex indices of a single-height-segment closed cylinder.
///
/// Rows run top to bottom, each with `radial_segments + 1` vertices, followed
/// by the top-cap center and the bottom-cap center.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CylinderLayout {
    radial_segments: usize,
}

impl CylinderLayout {
    pub fn new(radial_segments: u32) -> Self {
        Self {
            radial_segments: radial_segments as usize,
        }
    }

    pub fn radial_segments(&self) -> usize {
        self.radial_segments
    }

    /// `i`-th vertex of the top rim, `0..=radial_segments`
    pub fn top_rim(&self, i: usize) -> usize {
        i
    }

    /// `i`-th vertex of the bottom rim, `0..=radial_segments`
    pub fn bottom_rim(&self, i: usize) -> usize {
        self.radial_segments + 1 + i
    }

    pub fn top_rim_range(&self) -> RangeInclusive<usize> {
        self.top_rim(0)..=self.top_rim(self.radial_segments)
    }

    pub fn bottom_rim_range(&self) -> RangeInclusive<usize> {
        self.bottom_rim(0)..=self.bottom_rim(self.radial_segments)
    }

    pub fn top_center(&self) -> usize {
        self.radial_segments * 2 + 2
    }

    pub fn bottom_center(&self) -> usize {
        self.radial_segments * 2 + 3
    }

    /// Vertex count of the closed cylinder this layout describes
    pub fn vertex_count(&self) -> usize {
        self.radial_segments * 2 + 4
    }
}

/// Build a cylinder, frustum or partial revolution around the Y axis.
///
/// Vertex enumeration: for each row `y` in `0..=height_segments` (top to
/// bottom) and each column `x` in `0..=radial_segments`, the rim vertex at
/// angle `theta_start + x / radial_segments * theta_length` with
/// `x = r * sin(theta)` and `z = r * cos(theta)`. When `open_ended` is false
/// the top-cap center and then the bottom-cap center follow.
///
/// Faces: two side triangles per cell, then the top fan, then the bottom fan.
pub fn cylinder(params: &CylinderParams) -> GeometryResult<Mesh> {
    ensure_positive("cylinder top radius", params.radius_top)?;
    ensure_positive("cylinder bottom radius", params.radius_bottom)?;
    ensure_positive("cylinder height", params.height)?;
    ensure_positive("cylinder theta length", params.theta_length)?;
    if !params.theta_start.is_finite() {
        return Err(GeometryError::invalid(format!(
            "cylinder theta start must be finite, got {}",
            params.theta_start
        )));
    }
    if params.radial_segments == 0 || params.height_segments == 0 {
        return Err(GeometryError::invalid(format!(
            "cylinder segment counts must be positive, got {} radial and {} height",
            params.radial_segments, params.height_segments
        )));
    }

    let radial = params.radial_segments as usize;
    let rows = params.height_segments as usize;
    let columns = radial + 1;
    let half_height = params.height / 2.0;

    let mut mesh = Mesh::with_capacity((rows + 1) * columns + 2, 4 * radial * rows);

    for y in 0..=rows {
        let v = y as f32 / rows as f32;
        let radius = v * (params.radius_bottom - params.radius_top) + params.radius_top;
        for x in 0..=radial {
            let u = x as f32 / radial as f32;
            let theta = u * params.theta_length + params.theta_start;
            mesh.add_vertex(Point3::new(
                radius * theta.sin(),
                -v * params.height + half_height,
                radius * theta.cos(),
            ));
        }
    }

    let index = |row: usize, column: usize| (row * columns + column) as u32;

    for x in 0..radial {
        for y in 0..rows {
            let v1 = index(y, x);
            let v2 = index(y + 1, x);
            let v3 = index(y + 1, x + 1);
            let v4 = index(y, x + 1);
            mesh.add_face(v1, v2, v4);
            mesh.add_face(v2, v3, v4);
        }
    }

    if !params.open_ended {
        let top = mesh.add_vertex(Point3::new(0.0, half_height, 0.0));
        for x in 0..radial {
            mesh.add_face(index(0, x), index(0, x + 1), top);
        }

        let bottom = mesh.add_vertex(Point3::new(0.0, -half_height, 0.0));
        for x in 0..radial {
            mesh.add_face(index(rows, x + 1), index(rows, x), bottom);
        }
    }

    mesh.compute_face_normals();
    Ok(mesh)
}

/// The eight merged corners of a box, in generation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxCorner {
    /// `(+x, +y, +z)`
    RightTopFront = 0,
    /// `(+x, +y, -z)`
    RightTopBack = 1,
    /// `(+x, -y, +z)`
    RightBottomFront = 2,
    /// `(+x, -y, -z)`
    RightBottomBack = 3,
    /// `(-x, +y, -z)`
    LeftTopBack = 4,
    /// `(-x, +y, +z)`
    LeftTopFront = 5,
    /// `(-x, -y, -z)`
    LeftBottomBack = 6,
    /// `(-x, -y, +z)`
    LeftBottomFront = 7,
}

impl BoxCorner {
    pub const ALL: [BoxCorner; 8] = [
        BoxCorner::RightTopFront,
        BoxCorner::RightTopBack,
        BoxCorner::RightBottomFront,
        BoxCorner::RightBottomBack,
        BoxCorner::LeftTopBack,
        BoxCorner::LeftTopFront,
        BoxCorner::LeftBottomBack,
        BoxCorner::LeftBottomFront,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Sign of the corner along x, y and z
    fn signs(self) -> [f32; 3] {
        match self {
            BoxCorner::RightTopFront => [1.0, 1.0, 1.0],
            BoxCorner::RightTopBack => [1.0, 1.0, -1.0],
            BoxCorner::RightBottomFront => [1.0, -1.0, 1.0],
            BoxCorner::RightBottomBack => [1.0, -1.0, -1.0],
            BoxCorner::LeftTopBack => [-1.0, 1.0, -1.0],
            BoxCorner::LeftTopFront => [-1.0, 1.0, 1.0],
            BoxCorner::LeftBottomBack => [-1.0, -1.0, -1.0],
            BoxCorner::LeftBottomFront => [-1.0, -1.0, 1.0],
        }
    }
}

/// Face list of the merged box, two triangles per side (+x, -x, +y, -y, +z, -z)
const BOX_FACES: [[u32; 3]; 12] = [
    [0, 2, 1],
    [2, 3, 1],
    [4, 6, 5],
    [6, 7, 5],
    [4, 5, 1],
    [5, 0, 1],
    [7, 6, 2],
    [6, 3, 2],
    [5, 7, 0],
    [7, 2, 0],
    [1, 3, 4],
    [3, 6, 4],
];

/// Build an axis-aligned box centered at the origin.
///
/// Vertices follow [`BoxCorner`] order.
pub fn cuboid(width: f32, height: f32, depth: f32) -> GeometryResult<Mesh> {
    ensure_positive("box width", width)?;
    ensure_positive("box height", height)?;
    ensure_positive("box depth", depth)?;

    let half = [width / 2.0, height / 2.0, depth / 2.0];
    let mut mesh = Mesh::with_capacity(8, BOX_FACES.len());
    for corner in BoxCorner::ALL {
        let [sx, sy, sz] = corner.signs();
        mesh.add_vertex(Point3::new(sx * half[0], sy * half[1], sz * half[2]));
    }
    for [a, b, c] in BOX_FACES {
        mesh.add_face(a, b, c);
    }

    mesh.compute_face_normals();
    Ok(mesh)
}

/// Extrude a convex outline in the XY plane from `z = 0` to `z = depth`.
///
/// The outline is normalized to counter-clockwise order (a closing point equal
/// to the first is dropped). Vertices: the front ring at `z = 0`, then the
/// back ring at `z = depth`, both in outline order. Faces: the front cap, the
/// back cap, then two triangles per side.
pub fn extruded_polygon(points: &[Point2<f32>], depth: f32) -> GeometryResult<Mesh> {
    ensure_positive("extrusion depth", depth)?;

    let mut outline: Vec<Point2<f32>> = points.to_vec();
    if outline.len() > 1 && outline.first() == outline.last() {
        outline.pop();
    }
    if outline.len() < 3 {
        return Err(GeometryError::invalid(format!(
            "extruded polygon needs at least 3 points, got {}",
            outline.len()
        )));
    }
    if outline.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
        return Err(GeometryError::invalid("extruded polygon has a non-finite point"));
    }

    let area = signed_area(&outline);
    if area.abs() <= f32::EPSILON {
        return Err(GeometryError::invalid("extruded polygon has zero area"));
    }
    if area < 0.0 {
        outline.reverse();
    }
    if !is_convex(&outline) {
        return Err(GeometryError::invalid("extruded polygon outline must be convex"));
    }

    let count = outline.len();
    let mut mesh = Mesh::with_capacity(count * 2, 4 * count - 4);
    for z in [0.0, depth] {
        for p in &outline {
            mesh.add_vertex(Point3::new(p.x, p.y, z));
        }
    }

    let front = |i: usize| i as u32;
    let back = |i: usize| (count + i) as u32;

    for i in 1..count - 1 {
        mesh.add_face(front(0), front(i + 1), front(i));
    }
    for i in 1..count - 1 {
        mesh.add_face(back(0), back(i), back(i + 1));
    }
    for i in 0..count {
        let j = (i + 1) % count;
        mesh.add_face(front(i), front(j), back(j));
        mesh.add_face(front(i), back(j), back(i));
    }

    mesh.compute_face_normals();
    Ok(mesh)
}

/// Triangular prism with corners `A = (base, 0)`, `B = (0, 0)` and
/// `C = (cos(angle) * side, sin(angle) * side)`, extruded by `depth`.
pub fn triangle_prism(base: f32, side: f32, angle: f32, depth: f32) -> GeometryResult<Mesh> {
    ensure_positive("triangle base", base)?;
    ensure_positive("triangle side", side)?;
    let outline = [
        Point2::new(base, 0.0),
        Point2::new(0.0, 0.0),
        Point2::new(angle.cos() * side, angle.sin() * side),
    ];
    extruded_polygon(&outline, depth)
}

/// True when no corner of a counter-clockwise outline turns clockwise
fn is_convex(outline: &[Point2<f32>]) -> bool {
    let n = outline.len();
    (0..n).all(|i| {
        let (a, b, c) = (outline[i], outline[(i + 1) % n], outline[(i + 2) % n]);
        let (ab, bc) = (b - a, c - b);
        ab.x * bc.y - ab.y * bc.x >= -1e-6 * ab.norm() * bc.norm()
    })
}

/// Twice-area-signed shoelace sum halved; positive when counter-clockwise
fn signed_area(outline: &[Point2<f32>]) -> f32 {
    let n = outline.len();
    let twice: f32 = (0..n)
        .map(|i| {
            let (p, q) = (outline[i], outline[(i + 1) % n]);
            p.x * q.y - q.x * p.y
        })
        .sum();
    twice / 2.0
}
