/// Sensor dish on its arm, mounted on the starboard hull.
use std::f32::consts::{FRAC_PI_2, PI};

use tracing::debug;

use super::sculpted;
use crate::error::GeometryResult;
use crate::material::{primary, secondary, tertiary};
use crate::part::Part;
use crate::primitives::{cuboid, cylinder, BoxCorner, CylinderLayout, CylinderParams};
use crate::sculpt::{Axis, Sculpt};
use crate::transform::Transform;

const BASE_HEIGHT: f32 = 3.0;
const ARM_HEIGHT: f32 = 12.0;
const ARM_TOP_HEIGHT: f32 = 5.0;
const DISH_RADIUS: f32 = 12.0;
const TILT: f32 = PI / 16.0;

pub fn dish() -> GeometryResult<Part> {
    let mut base = Part::mesh(
        "dish_base",
        cylinder(&CylinderParams::new(5.0, 6.0, BASE_HEIGHT, 32))?,
        tertiary(),
    );
    base.transform.position.y = -BASE_HEIGHT / 2.0;

    // Flare the lower corners out and twist them about the arm.
    let arm = cuboid(5.0, ARM_HEIGHT, 3.0)?;
    let corner = arm.vertices[BoxCorner::RightBottomFront.index()];
    let (x, z) = (corner.x + 1.0, corner.z + 1.0);
    let arm = sculpted(
        arm,
        &[
            Sculpt::set(BoxCorner::RightBottomFront.index(), Axis::X, x),
            Sculpt::set(BoxCorner::RightBottomBack.index(), Axis::X, x),
            Sculpt::set(BoxCorner::LeftBottomBack.index(), Axis::X, -x),
            Sculpt::set(BoxCorner::LeftBottomFront.index(), Axis::X, -x),
            Sculpt::set(BoxCorner::RightBottomFront.index(), Axis::Z, z),
            Sculpt::set(BoxCorner::LeftBottomFront.index(), Axis::Z, z),
            Sculpt::set(BoxCorner::RightBottomBack.index(), Axis::Z, -z),
            Sculpt::set(BoxCorner::LeftBottomBack.index(), Axis::Z, -z),
        ],
    )?;
    let mut arm = Part::mesh("dish_arm", arm, primary());
    arm.transform.position.y = ARM_HEIGHT / 2.0;

    let mut arm_top = cylinder(&CylinderParams::new(1.5, 1.5, ARM_TOP_HEIGHT, 32))?;
    arm_top.apply_matrix(&Transform::translation_matrix(0.0, ARM_TOP_HEIGHT / 2.0, 0.0));
    let mut arm_top = Part::mesh("dish_arm_top", arm_top, tertiary());
    arm_top.transform.rotation.x = FRAC_PI_2 - TILT;
    arm_top.transform.position.y = ARM_HEIGHT / 2.0 + 2.0;
    arm_top.transform.position.z = 1.0;

    let layout = CylinderLayout::new(32);
    let mut plate = sculpted(
        cylinder(&CylinderParams::new(DISH_RADIUS, DISH_RADIUS, 0.5, 32))?,
        &[
            Sculpt::set(layout.top_center(), Axis::Y, 2.0),
            Sculpt::set(layout.bottom_center(), Axis::Y, 1.0),
        ],
    )?;
    plate.apply_matrix(&Transform::rotation_x(-FRAC_PI_2 - TILT));
    let mut plate = Part::mesh("dish_plate", plate, secondary());
    plate.transform.position.y = ARM_HEIGHT / 2.0 + 4.0;
    plate.transform.position.z = 7.0;

    let mut dish = Part::group("dish")
        .with_child(base)
        .with_child(arm)
        .with_child(arm_top)
        .with_child(plate);
    dish.transform.rotation.y = FRAC_PI_2 + TILT;
    dish.transform.position.x = 50.0;
    dish.transform.position.y = BASE_HEIGHT + 7.5;
    dish.transform.position.z = -50.0;

    debug!(parts = dish.part_count(), "assembled dish");
    Ok(dish)
}
