/// Mesh Patcher
///
/// Closes the two flat wedge ends of a partial cylinder.
use tracing::trace;

use crate::error::{GeometryError, GeometryResult};
use crate::geometry::Mesh;
use crate::primitives::CylinderLayout;

/// Stitch the open wedge of a partial cylinder built with `radial_segments`.
///
/// Appends four triangles joining the first and last rim columns to the two
/// cap centers, then recomputes face normals. The mesh must be a closed-cap,
/// single-height-segment cylinder with the same segment count; any other
/// layout is rejected before the mesh is touched.
pub fn close_partial_cylinder(mesh: &mut Mesh, radial_segments: u32) -> GeometryResult<()> {
    if radial_segments == 0 {
        return Err(GeometryError::invalid("radial segments must be positive"));
    }

    let layout = CylinderLayout::new(radial_segments);
    if mesh.vertex_count() != layout.vertex_count() {
        return Err(GeometryError::mismatch(format!(
            "a capped cylinder with {} radial segments has {} vertices, found {}",
            radial_segments,
            layout.vertex_count(),
            mesh.vertex_count()
        )));
    }

    let n = layout.radial_segments();
    // Side quads and both cap fans of a single-row cylinder
    let expected_faces = 4 * n;
    if mesh.face_count() != expected_faces {
        return Err(GeometryError::mismatch(format!(
            "a capped single-row cylinder with {} radial segments has {} faces, found {}",
            radial_segments,
            expected_faces,
            mesh.face_count()
        )));
    }

    let first_top = layout.top_rim(0) as u32;
    let first_bottom = layout.bottom_rim(0) as u32;
    let last_top = layout.top_rim(n) as u32;
    let last_bottom = layout.bottom_rim(n) as u32;
    let top_center = layout.top_center() as u32;
    let bottom_center = layout.bottom_center() as u32;

    mesh.add_face(first_top, first_bottom, bottom_center);
    mesh.add_face(first_top, top_center, bottom_center);
    mesh.add_face(last_top, last_bottom, bottom_center);
    mesh.add_face(last_top, top_center, bottom_center);

    mesh.compute_face_normals();
    trace!(radial_segments, faces = mesh.face_count(), "closed partial cylinder");
    Ok(())
}
