/// Cockpit tube: an angled head on a sheared body reaching back to the hull.
use std::f32::consts::{FRAC_PI_2, PI};

use tracing::debug;

use super::sculpted;
use crate::error::GeometryResult;
use crate::material::{secondary, tertiary};
use crate::part::Part;
use crate::primitives::{cylinder, CylinderLayout, CylinderParams};
use crate::sculpt::{Axis, Sculpt};
use crate::transform::Transform;

const BODY_TOP_RADIUS: f32 = 14.0;
const BODY_BOTTOM_RADIUS: f32 = 16.0;
const BODY_HEIGHT: f32 = 50.0;
const BODY_REACH: f32 = 100.0;
const SEGMENTS: u32 = 32;
const CUT_ANGLE: f32 = PI / 6.0;

const HEAD_ANGLE_HEIGHT: f32 = 20.0;
const HEAD_CYLINDER_HEIGHT: f32 = 20.0;

pub fn cockpit() -> GeometryResult<Part> {
    let layout = CylinderLayout::new(SEGMENTS);
    let shear = |vertices| Sculpt::Shear {
        vertices,
        target: Axis::Y,
        source: Axis::X,
        angle: -CUT_ANGLE,
    };

    let mut angle = cylinder(&CylinderParams::new(
        BODY_BOTTOM_RADIUS,
        BODY_BOTTOM_RADIUS,
        HEAD_ANGLE_HEIGHT,
        SEGMENTS,
    ))?;
    angle.apply_matrix(&Transform::translation_matrix(0.0, -HEAD_ANGLE_HEIGHT / 2.0, 0.0));
    let angle = sculpted(angle, &[shear(layout.top_rim_range())])?;

    let head_cylinder = sculpted(
        cylinder(&CylinderParams::new(
            BODY_BOTTOM_RADIUS,
            BODY_BOTTOM_RADIUS - 8.0,
            HEAD_CYLINDER_HEIGHT,
            SEGMENTS,
        ))?,
        &[Sculpt::set(
            layout.bottom_center(),
            Axis::Y,
            -(HEAD_CYLINDER_HEIGHT / 2.0 + 1.0),
        )],
    )?;
    let mut head_cylinder = Part::mesh("cockpit_head_cylinder", head_cylinder, tertiary());
    head_cylinder.transform.position.y = -HEAD_ANGLE_HEIGHT - HEAD_CYLINDER_HEIGHT / 2.0;

    // The body's lower rim follows the head's cut so the two meet flush.
    let seam: Vec<Sculpt> = layout
        .top_rim_range()
        .zip(layout.bottom_rim_range())
        .map(|(head, body)| Sculpt::set(body, Axis::Y, angle.vertices[head].y))
        .collect();

    let mut body = cylinder(&CylinderParams::new(
        BODY_TOP_RADIUS,
        BODY_BOTTOM_RADIUS,
        BODY_HEIGHT,
        SEGMENTS,
    ))?;
    body.apply_matrix(&Transform::translation_matrix(0.0, BODY_HEIGHT / 2.0, 0.0));
    let reach = CUT_ANGLE.sin() * BODY_REACH;
    let top_center = layout.top_center()..=layout.top_center();
    let mut edits = vec![
        shear(layout.top_rim_range()),
        Sculpt::Translate {
            vertices: layout.top_rim_range(),
            axis: Axis::X,
            delta: reach,
        },
        shear(top_center),
        Sculpt::offset(layout.top_center(), Axis::X, reach),
    ];
    edits.extend(seam);
    let body = sculpted(body, &edits)?;

    let head = Part::group("cockpit_head")
        .with_child(Part::mesh("cockpit_head_angle", angle, secondary()))
        .with_child(head_cylinder);

    let mut cockpit = Part::group("cockpit")
        .with_child(head)
        .with_child(Part::mesh("cockpit_body", body, secondary()));
    cockpit.apply_matrix(&Transform::rotation_x(-FRAC_PI_2));
    cockpit.apply_matrix(&Transform::rotation_y(FRAC_PI_2));
    cockpit.transform.position.x = CUT_ANGLE.sin() * 150.0;
    cockpit.transform.position.y = 5.0;
    cockpit.transform.position.z = CUT_ANGLE.cos() * 90.0;

    debug!(parts = cockpit.part_count(), "assembled cockpit");
    Ok(cockpit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::part::NodePath;
    use approx::assert_relative_eq;

    fn mesh_at<'a>(cockpit: &'a Part, path: &[usize]) -> &'a crate::geometry::Mesh {
        cockpit
            .node(&NodePath::new(path.to_vec()))
            .unwrap()
            .mesh
            .as_ref()
            .unwrap()
    }

    #[test]
    fn test_placement() {
        let cockpit = cockpit().unwrap();
        assert_relative_eq!(cockpit.transform.position.x, 75.0, epsilon = 1e-4);
        assert_relative_eq!(cockpit.transform.position.y, 5.0);
        assert_relative_eq!(cockpit.transform.position.z, 77.94229, epsilon = 1e-3);
    }

    #[test]
    fn test_body_meets_head_cut() {
        let cockpit = cockpit().unwrap();
        let layout = CylinderLayout::new(SEGMENTS);
        let angle = mesh_at(&cockpit, &[0, 0]);
        let body = mesh_at(&cockpit, &[1]);
        for (head, seam) in layout.top_rim_range().zip(layout.bottom_rim_range()) {
            assert_eq!(body.vertices[seam].y, angle.vertices[head].y);
        }
    }

    #[test]
    fn test_body_top_is_pushed_forward_and_cut() {
        let cockpit = cockpit().unwrap();
        let layout = CylinderLayout::new(SEGMENTS);
        let body = mesh_at(&cockpit, &[1]);
        // Rim vertex 8 sits at theta = pi/2: x = 14 before the edits.
        let v = body.vertices[layout.top_rim(8)];
        assert_relative_eq!(v.x, 64.0, epsilon = 1e-4);
        assert_relative_eq!(v.y, 50.0 - 7.0, epsilon = 1e-4);
        let center = body.vertices[layout.top_center()];
        assert_relative_eq!(center.x, 50.0, epsilon = 1e-4);
        assert_relative_eq!(center.y, 50.0, epsilon = 1e-4);
    }

    #[test]
    fn test_head_cylinder_tip() {
        let cockpit = cockpit().unwrap();
        let layout = CylinderLayout::new(SEGMENTS);
        let tip = mesh_at(&cockpit, &[0, 1]);
        assert_relative_eq!(tip.vertices[layout.bottom_center()].y, -11.0);
    }
}
