/// Landing gear: rear skids, two forward legs and a centre keel.
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use tracing::debug;

use super::sculpted;
use crate::error::GeometryResult;
use crate::material::{secondary, tertiary};
use crate::part::Part;
use crate::primitives::{cuboid, BoxCorner};
use crate::sculpt::{Axis, Sculpt};
use crate::transform::Transform;

const DEPTH: f32 = 10.0;

const BACK_BODY_WIDTH: f32 = 25.0;
const BACK_BODY_HEIGHT: f32 = 60.0;
const BACK_BORDER_WIDTH: f32 = 18.0;
const BACK_BORDER_HEIGHT: f32 = 50.0;

const FRONT_HEIGHT: f32 = 40.0;
const FRONT_WIDTH: f32 = 25.0;
const FRONT_BODY_WIDTH: f32 = 15.0;
const FRONT_BORDER_WIDTH: f32 = FRONT_WIDTH - FRONT_BODY_WIDTH;
const FRONT_OFFSET_Z: f32 = 35.5;

pub fn landing_gear() -> GeometryResult<Part> {
    let front_left = front_leg()?;
    let front_right = front_left.mirrored("front_gear_right", |t| {
        t.rotation.x = -FRAC_PI_2;
        t.position.z = -FRONT_OFFSET_Z;
    });

    let mut keel = cuboid(18.0, 60.0, DEPTH)?;
    keel.apply_matrix(&Transform::rotation_z(FRAC_PI_2));
    keel.apply_matrix(&Transform::rotation_x(FRAC_PI_2));
    let mut keel = Part::mesh("front_gear_center", keel, secondary());
    keel.transform.position.x = 65.0;
    keel.transform.position.y = -DEPTH;

    let gear = Part::group("landing_gear")
        .with_child(back_gear()?)
        .with_child(front_left)
        .with_child(front_right)
        .with_child(keel);

    debug!(parts = gear.part_count(), "assembled landing gear");
    Ok(gear)
}

/// Pair of rear skids, the right one a half-turned copy of the left
fn back_gear() -> GeometryResult<Part> {
    let body = sculpted(
        cuboid(BACK_BODY_WIDTH, BACK_BODY_HEIGHT, DEPTH)?,
        &[
            Sculpt::set(BoxCorner::RightBottomFront.index(), Axis::Y, -BACK_BODY_HEIGHT / 2.0 - 2.0),
            Sculpt::set(BoxCorner::RightBottomBack.index(), Axis::Y, -BACK_BODY_HEIGHT / 2.0 - 2.0),
            Sculpt::set(BoxCorner::LeftTopBack.index(), Axis::Y, BACK_BODY_HEIGHT / 2.0 + 8.0),
            Sculpt::set(BoxCorner::LeftTopFront.index(), Axis::Y, BACK_BODY_HEIGHT / 2.0 + 8.0),
        ],
    )?;

    let mut border = cuboid(BACK_BORDER_WIDTH, BACK_BORDER_HEIGHT, DEPTH)?;
    border.apply_matrix(&Transform::translation_matrix(
        -(BACK_BODY_WIDTH + BACK_BORDER_WIDTH) / 2.0,
        (BACK_BODY_HEIGHT - BACK_BORDER_HEIGHT) / 2.0,
        0.0,
    ));
    let border = sculpted(
        border,
        &[
            Sculpt::set(BoxCorner::RightTopFront.index(), Axis::Y, BACK_BODY_HEIGHT / 2.0 + 8.0),
            Sculpt::set(BoxCorner::RightTopBack.index(), Axis::Y, BACK_BODY_HEIGHT / 2.0 + 8.0),
            Sculpt::set(BoxCorner::RightBottomFront.index(), Axis::Y, -BACK_BODY_HEIGHT / 2.0),
            Sculpt::set(BoxCorner::RightBottomBack.index(), Axis::Y, -BACK_BODY_HEIGHT / 2.0),
        ],
    )?;

    let left = Part::group("back_gear_left")
        .with_child(Part::mesh("back_gear_body", body, tertiary()))
        .with_child(Part::mesh("back_gear_border", border, tertiary()));
    let right = left.mirrored("back_gear_right", |t| {
        t.rotation.y = PI;
        t.position.x = BACK_BODY_WIDTH;
    });

    let mut back = Part::group("back_gear").with_child(left).with_child(right);
    back.apply_matrix(&Transform::translation_matrix(-BACK_BODY_WIDTH / 2.0, 0.0, 0.0));
    back.apply_matrix(&Transform::rotation_y(FRAC_PI_2));
    back.apply_matrix(&Transform::rotation_z(-FRAC_PI_2));
    back.transform.position.x = -25.0 - BACK_BODY_HEIGHT / 2.0;
    back.transform.position.y = -DEPTH;
    Ok(back)
}

/// Left forward leg: a body with a sloped top and a raked border
fn front_leg() -> GeometryResult<Part> {
    let drop = FRAC_PI_4.sin();
    let body = sculpted(
        cuboid(FRONT_BODY_WIDTH, FRONT_HEIGHT, DEPTH)?,
        &[
            Sculpt::offset(BoxCorner::LeftTopBack.index(), Axis::Y, -drop * FRONT_BODY_WIDTH),
            Sculpt::offset(BoxCorner::LeftTopFront.index(), Axis::Y, -drop * FRONT_BODY_WIDTH),
        ],
    )?;

    let mut border = cuboid(FRONT_BORDER_WIDTH, FRONT_HEIGHT, DEPTH)?;
    border.apply_matrix(&Transform::translation_matrix(FRONT_WIDTH / 2.0, 0.0, 0.0));
    let border = sculpted(
        border,
        &[
            Sculpt::offset(BoxCorner::RightBottomFront.index(), Axis::Y, drop * FRONT_BORDER_WIDTH),
            Sculpt::offset(BoxCorner::RightBottomBack.index(), Axis::Y, drop * FRONT_BORDER_WIDTH),
        ],
    )?;

    let mut leg = Part::group("front_gear_left")
        .with_child(Part::mesh("front_gear_body", body, tertiary()))
        .with_child(Part::mesh("front_gear_border", border, tertiary()));
    leg.apply_matrix(&Transform::rotation_z(-FRAC_PI_2));
    leg.apply_matrix(&Transform::rotation_x(FRAC_PI_2));
    leg.transform.position.x = 50.0;
    leg.transform.position.y = -DEPTH;
    leg.transform.position.z = FRONT_OFFSET_Z;
    Ok(leg)
}
