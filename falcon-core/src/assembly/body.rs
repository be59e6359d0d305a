/// Hull: two patched half-discs, the raised rear decks and the engine row.
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use tracing::debug;

use super::boosters::boosters;
use super::patched_sweep;
use crate::error::GeometryResult;
use crate::material::{primary, secondary};
use crate::part::Part;
use crate::primitives::{CylinderLayout, CylinderParams};
use crate::projection::SharedPosition;
use crate::sculpt::{Axis, Sculpt};
use crate::transform::Transform;

pub const HULL_RADIUS: f32 = 100.0;

const HALF_BODY_HEIGHT: f32 = 10.0;
const HALF_BODY_ANGLE: f32 = PI / 8.0;
const SEGMENTS: u32 = 32;

const DECK_RADIUS: f32 = HULL_RADIUS + 5.0;
const DECK_HEIGHT: f32 = 2.0;
const DECK_INSET: f32 = HULL_RADIUS - 5.0;

/// Build the hull. Engine halos track `camera`.
pub fn body(camera: &SharedPosition) -> GeometryResult<Part> {
    let layout = CylinderLayout::new(SEGMENTS);
    let mut hull = Part::group("body");

    let mut half = Part::mesh(
        "half_body_left",
        patched_sweep(
            &CylinderParams::new(HULL_RADIUS, HULL_RADIUS, HALF_BODY_HEIGHT, SEGMENTS)
                .sweep(HALF_BODY_ANGLE, PI - HALF_BODY_ANGLE),
            &[
                // Pull the cap centers out to form the domed saucer.
                Sculpt::set(layout.top_center(), Axis::Y, HALF_BODY_HEIGHT * 2.0),
                Sculpt::set(layout.bottom_center(), Axis::Y, -HALF_BODY_HEIGHT * 2.0),
            ],
        )?,
        primary().double_sided(),
    );
    if let Some(mesh) = half.mesh.as_mut() {
        mesh.apply_matrix(&Transform::rotation_y(-HALF_BODY_ANGLE / 2.0));
    }
    let other_half = half.mirrored("half_body_right", |t| t.rotation.y = PI);
    hull.add(half);
    hull.add(other_half);

    hull.add(decks()?);

    for part in boosters(camera)? {
        hull.add(part);
    }

    debug!(parts = hull.part_count(), "assembled body");
    Ok(hull)
}

/// Quarter-disc plates stacked above and below the rear of the hull
fn decks() -> GeometryResult<Part> {
    let layout = CylinderLayout::new(SEGMENTS);
    let n = layout.radial_segments();

    let mut top = Part::mesh(
        "deck_top",
        patched_sweep(
            &CylinderParams::new(DECK_RADIUS, DECK_RADIUS, DECK_HEIGHT, SEGMENTS)
                .sweep(FRAC_PI_2, PI - FRAC_PI_2),
            &[
                Sculpt::set(layout.top_center(), Axis::Y, HALF_BODY_HEIGHT * 1.5),
                Sculpt::set(layout.top_rim(0), Axis::X, DECK_INSET),
                Sculpt::set(layout.bottom_rim(0), Axis::X, DECK_INSET),
                Sculpt::set(layout.top_rim(n), Axis::Z, -DECK_INSET),
                Sculpt::set(layout.bottom_rim(n), Axis::Z, -DECK_INSET),
            ],
        )?,
        secondary().double_sided(),
    );
    if let Some(mesh) = top.mesh.as_mut() {
        mesh.apply_matrix(&Transform::rotation_y(-FRAC_PI_4));
    }
    top.transform.position.y = 5.0;

    let bottom = top.mirrored("deck_bottom", |t| {
        t.rotation.x = PI;
        t.position.y = -5.0;
    });

    let mut decks = Part::group("decks").with_child(top).with_child(bottom);
    decks.transform.rotation.y = PI;
    Ok(decks)
}
