/// Vertex Sculptor
///
/// Deterministic per-vertex edits that turn a regular primitive into an
/// irregular part. Operations address vertices by their generation index, so
/// they must run before anything that changes the vertex layout.
use std::ops::RangeInclusive;

use crate::error::{GeometryError, GeometryResult};
use crate::geometry::Mesh;

/// Coordinate axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// A single sculpting operation
#[derive(Debug, Clone, PartialEq)]
pub enum Sculpt {
    /// Overwrite one coordinate of one vertex.
    Set { vertex: usize, axis: Axis, value: f32 },
    /// Move one vertex along an axis.
    Offset { vertex: usize, axis: Axis, delta: f32 },
    /// Move every vertex of a range along an axis.
    Translate {
        vertices: RangeInclusive<usize>,
        axis: Axis,
        delta: f32,
    },
    /// `target += sin(angle) * source`: an angled cut plane.
    Shear {
        vertices: RangeInclusive<usize>,
        target: Axis,
        source: Axis,
        angle: f32,
    },
    /// `target = sin(angle) * source + bias`: a lip or flare along a ring.
    Flare {
        vertices: RangeInclusive<usize>,
        target: Axis,
        source: Axis,
        angle: f32,
        bias: f32,
    },
}

impl Sculpt {
    pub fn set(vertex: usize, axis: Axis, value: f32) -> Self {
        Sculpt::Set {
            vertex,
            axis,
            value,
        }
    }

    pub fn offset(vertex: usize, axis: Axis, delta: f32) -> Self {
        Sculpt::Offset {
            vertex,
            axis,
            delta,
        }
    }

    /// Highest vertex index this operation touches
    fn max_index(&self) -> Option<usize> {
        match self {
            Sculpt::Set { vertex, .. } | Sculpt::Offset { vertex, .. } => Some(*vertex),
            Sculpt::Translate { vertices, .. }
            | Sculpt::Shear { vertices, .. }
            | Sculpt::Flare { vertices, .. } => {
                if vertices.is_empty() {
                    None
                } else {
                    Some(*vertices.end())
                }
            }
        }
    }

    fn apply(&self, mesh: &mut Mesh) {
        match self {
            Sculpt::Set {
                vertex,
                axis,
                value,
            } => mesh.vertices[*vertex][axis.index()] = *value,
            Sculpt::Offset {
                vertex,
                axis,
                delta,
            } => mesh.vertices[*vertex][axis.index()] += *delta,
            Sculpt::Translate {
                vertices,
                axis,
                delta,
            } => {
                for v in &mut mesh.vertices[vertices.clone()] {
                    v[axis.index()] += *delta;
                }
            }
            Sculpt::Shear {
                vertices,
                target,
                source,
                angle,
            } => {
                let factor = angle.sin();
                for v in &mut mesh.vertices[vertices.clone()] {
                    v[target.index()] += factor * v[source.index()];
                }
            }
            Sculpt::Flare {
                vertices,
                target,
                source,
                angle,
                bias,
            } => {
                let factor = angle.sin();
                for v in &mut mesh.vertices[vertices.clone()] {
                    v[target.index()] = factor * v[source.index()] + *bias;
                }
            }
        }
    }
}

/// Apply `operations` in order, then recompute face normals.
///
/// Every index is checked before any vertex moves, so a failing call leaves
/// the mesh untouched.
pub fn sculpt(mesh: &mut Mesh, operations: &[Sculpt]) -> GeometryResult<()> {
    let count = mesh.vertex_count();
    for operation in operations {
        if let Some(max) = operation.max_index() {
            if max >= count {
                return Err(GeometryError::invalid(format!(
                    "vertex index {} out of range for a mesh of {} vertices",
                    max, count
                )));
            }
        }
    }

    for operation in operations {
        operation.apply(mesh);
    }
    mesh.compute_face_normals();
    Ok(())
}
