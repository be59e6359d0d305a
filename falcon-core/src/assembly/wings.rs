/// Forward mandibles and the plate between them.
use std::f32::consts::{FRAC_PI_2, PI};

use tracing::debug;

use super::sculpted;
use crate::error::GeometryResult;
use crate::material::{primary, secondary};
use crate::part::Part;
use crate::primitives::{cuboid, triangle_prism, BoxCorner};
use crate::sculpt::{Axis, Sculpt};
use crate::transform::Transform;

const FRONT_HEIGHT: f32 = 160.0;
const FRONT_WIDTH: f32 = 83.0;
const FRONT_X: f32 = FRONT_HEIGHT / 2.0 + 6.0;
const FRONT_Z: f32 = 100.0 - FRONT_WIDTH - 2.0;

const BORDER_HEIGHT: f32 = 45.0;
const BORDER_WIDTH: f32 = 5.0;
const BORDER_DEPTH: f32 = 8.0;

const PLATE_WIDTH: f32 = 100.0;
const PLATE_HEIGHT: f32 = 6.0;
const PLATE_DEPTH: f32 = 32.0;
const PLATE_BORDER_X: f32 = PLATE_WIDTH / 2.0 - 4.0;
const PLATE_BORDER_Z: f32 = PLATE_DEPTH / 2.0 - 2.0;
const PLATE_RIDGE: f32 = 12.0;

pub fn wings() -> GeometryResult<Part> {
    let left = mandible()?;
    let right = left.mirrored("mandible_right", |t| {
        t.position.z = FRONT_Z;
        t.rotation.x = -FRAC_PI_2;
    });

    let fronts = Part::group("wings")
        .with_child(left)
        .with_child(right)
        .with_child(center_plate()?);

    debug!(parts = fronts.part_count(), "assembled wings");
    Ok(fronts)
}

/// Left mandible: a thick border strip and a triangular blade
fn mandible() -> GeometryResult<Part> {
    let mut border = sculpted(
        cuboid(BORDER_WIDTH, BORDER_HEIGHT, BORDER_DEPTH)?,
        &[
            Sculpt::set(BoxCorner::LeftBottomBack.index(), Axis::Y, -BORDER_HEIGHT / 2.0 + 6.0),
            Sculpt::set(BoxCorner::LeftBottomFront.index(), Axis::Y, -BORDER_HEIGHT / 2.0 + 6.0),
        ],
    )?;
    border.apply_matrix(&Transform::translation_matrix(
        BORDER_WIDTH / 2.0,
        (FRONT_HEIGHT - BORDER_HEIGHT) / 2.0,
        0.0,
    ));

    let mut blade = triangle_prism(
        FRONT_WIDTH - BORDER_WIDTH,
        FRONT_HEIGHT,
        FRAC_PI_2 - PI / 16.0,
        BORDER_DEPTH,
    )?;
    blade.apply_matrix(&Transform::rotation_z(PI / 16.0));
    let mut blade = Part::mesh("mandible_blade", blade, primary());
    blade.transform.position.x = BORDER_WIDTH;
    blade.transform.position.y = -FRONT_HEIGHT / 2.0;
    blade.transform.position.z = -BORDER_DEPTH / 2.0;

    let mut left = Part::group("mandible_left")
        .with_child(Part::mesh("mandible_border", border, primary()))
        .with_child(blade);
    left.transform.position.x = FRONT_X;
    left.transform.position.z = -FRONT_Z;
    left.transform.rotation.x = FRAC_PI_2;
    left.transform.rotation.z = -FRAC_PI_2;
    Ok(left)
}

/// Wedge plate between the mandibles, upper half mirrored underneath
fn center_plate() -> GeometryResult<Part> {
    let mut plate = sculpted(
        cuboid(PLATE_WIDTH, PLATE_HEIGHT, PLATE_DEPTH)?,
        &[
            Sculpt::set(BoxCorner::RightTopFront.index(), Axis::X, PLATE_BORDER_X),
            Sculpt::set(BoxCorner::RightTopFront.index(), Axis::Z, PLATE_BORDER_Z),
            Sculpt::set(BoxCorner::RightTopBack.index(), Axis::X, PLATE_BORDER_X),
            Sculpt::set(BoxCorner::RightTopBack.index(), Axis::Z, -PLATE_BORDER_Z),
            Sculpt::set(BoxCorner::LeftTopBack.index(), Axis::Y, PLATE_RIDGE),
            Sculpt::set(BoxCorner::LeftTopBack.index(), Axis::Z, -PLATE_BORDER_Z),
            Sculpt::set(BoxCorner::LeftTopFront.index(), Axis::Y, PLATE_RIDGE),
            Sculpt::set(BoxCorner::LeftTopFront.index(), Axis::Z, PLATE_BORDER_Z),
        ],
    )?;
    plate.apply_matrix(&Transform::translation_matrix(0.0, PLATE_HEIGHT / 2.0 + 4.0, 0.0));

    let top = Part::mesh("plate_top", plate, secondary());
    let bottom = top.mirrored("plate_bottom", |t| t.rotation.x = PI);

    let mut center = Part::group("plate").with_child(top).with_child(bottom);
    center.transform.position.x = PLATE_WIDTH / 2.0 + 22.0;
    Ok(center)
}
