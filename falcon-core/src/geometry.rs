/// Indexed meshes and the render triangles produced from them
use std::collections::HashMap;

use nalgebra::{Matrix4, Point3, Vector3};

/// A render vertex with world position and normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
}

impl Vertex {
    pub fn new(position: Point3<f32>, normal: Vector3<f32>) -> Self {
        Self { position, normal }
    }
}

/// A render triangle defined by three vertices
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Calculate the face normal from the triangle's vertices
    pub fn calculate_normal(&self) -> Vector3<f32> {
        face_normal(
            &self.vertices[0].position,
            &self.vertices[1].position,
            &self.vertices[2].position,
        )
    }

    /// Centroid of the three positions
    pub fn centroid(&self) -> Point3<f32> {
        let sum = self.vertices[0].position.coords
            + self.vertices[1].position.coords
            + self.vertices[2].position.coords;
        Point3::from(sum / 3.0)
    }
}

/// A triangle of an indexed mesh, with its flat normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    pub indices: [u32; 3],
    pub normal: Vector3<f32>,
}

impl Face {
    pub fn new(a: u32, b: u32, c: u32) -> Self {
        Self {
            indices: [a, b, c],
            normal: Vector3::zeros(),
        }
    }
}

/// An editable indexed mesh: an ordered vertex arena plus faces
///
/// Vertex order is part of the contract of every primitive that produces a
/// mesh; sculpting and patching address vertices by that order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Point3<f32>>,
    pub faces: Vec<Face>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, faces: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            faces: Vec::with_capacity(faces),
        }
    }

    /// Append a vertex and return its index
    pub fn add_vertex(&mut self, position: Point3<f32>) -> u32 {
        self.vertices.push(position);
        (self.vertices.len() - 1) as u32
    }

    pub fn add_face(&mut self, a: u32, b: u32, c: u32) {
        self.faces.push(Face::new(a, b, c));
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Recompute flat per-face normals
    pub fn compute_face_normals(&mut self) {
        let vertices = &self.vertices;
        for face in &mut self.faces {
            let [a, b, c] = face.indices;
            face.normal = face_normal(
                &vertices[a as usize],
                &vertices[b as usize],
                &vertices[c as usize],
            );
        }
    }

    /// Bake an affine transform into the vertex positions
    pub fn apply_matrix(&mut self, matrix: &Matrix4<f32>) {
        for vertex in &mut self.vertices {
            *vertex = matrix.transform_point(vertex);
        }
        self.compute_face_normals();
    }

    /// Number of faces sharing each undirected edge
    pub fn edge_face_counts(&self) -> HashMap<(u32, u32), usize> {
        let mut counts = HashMap::new();
        for face in &self.faces {
            let [a, b, c] = face.indices;
            for (u, v) in [(a, b), (b, c), (c, a)] {
                *counts.entry((u.min(v), u.max(v))).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Undirected edges used by exactly one face, sorted
    pub fn boundary_edges(&self) -> Vec<(u32, u32)> {
        let mut edges: Vec<_> = self
            .edge_face_counts()
            .into_iter()
            .filter(|&(_, count)| count == 1)
            .map(|(edge, _)| edge)
            .collect();
        edges.sort_unstable();
        edges
    }

    /// True when every edge is shared by exactly two faces
    pub fn is_closed(&self) -> bool {
        !self.faces.is_empty() && self.edge_face_counts().values().all(|&count| count == 2)
    }

    /// Flat-shaded triangles transformed into world space
    pub fn triangles(&self, world: &Matrix4<f32>) -> Vec<Triangle> {
        self.faces
            .iter()
            .map(|face| {
                let [a, b, c] = face.indices.map(|i| world.transform_point(&self.vertices[i as usize]));
                let normal = face_normal(&a, &b, &c);
                Triangle::new(
                    Vertex::new(a, normal),
                    Vertex::new(b, normal),
                    Vertex::new(c, normal),
                )
            })
            .collect()
    }
}

/// Unit normal of triangle `(a, b, c)`; zero for degenerate triangles
pub fn face_normal(a: &Point3<f32>, b: &Point3<f32>, c: &Point3<f32>) -> Vector3<f32> {
    let cb = c - b;
    let ab = a - b;
    cb.cross(&ab)
        .try_normalize(f32::EPSILON)
        .unwrap_or_else(Vector3::zeros)
}
