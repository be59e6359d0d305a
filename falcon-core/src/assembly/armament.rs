/// Central drum with the dorsal and ventral laser turrets.
use std::f32::consts::{FRAC_PI_2, PI};

use tracing::debug;

use super::{patched_sweep, sculpted, TURRET_BOTTOM, TURRET_TOP};
use crate::error::GeometryResult;
use crate::geometry::Mesh;
use crate::material::{primary, secondary, tertiary};
use crate::part::Part;
use crate::primitives::{cuboid, cylinder, BoxCorner, CylinderLayout, CylinderParams};
use crate::sculpt::{Axis, Sculpt};
use crate::transform::Transform;

const CENTER_RADIUS: f32 = 20.0;
const CENTER_HEIGHT: f32 = 40.0;

const BASE_HEIGHT: f32 = 12.0;
const BASE_WIDTH: f32 = 16.0;
const BASE_TAPER_X: f32 = BASE_WIDTH / 4.0;
const BASE_DEPTH: f32 = 2.0;
const BASE_BACK_HEIGHT: f32 = 4.0;
const BASE_FRONT_HEIGHT: f32 = BASE_HEIGHT - BASE_BACK_HEIGHT;

const QUARTER_RADIUS: f32 = 4.0;
const QUARTER_HEIGHT: f32 = 6.0;
const QUARTER_LIP: f32 = PI / 12.0;

const GUN_RADIUS: f32 = 0.5;
const GUN_HEIGHT: f32 = 5.0;
const SHOOTER_RADIUS: f32 = 0.3;
const SHOOTER_HEIGHT: f32 = 10.0;

const SEGMENTS: u32 = 32;

/// Drum plus two turrets. The lower turret is a flipped copy of the upper.
pub fn armament() -> GeometryResult<Part> {
    let drum = Part::mesh(
        "center_drum",
        cylinder(&CylinderParams::new(
            CENTER_RADIUS,
            CENTER_RADIUS,
            CENTER_HEIGHT,
            SEGMENTS,
        ))?,
        secondary(),
    );

    let mut top = turret()?;
    top.apply_matrix(&Transform::rotation_y(-FRAC_PI_2));
    top.apply_matrix(&Transform::rotation_z(-FRAC_PI_2));
    top.transform.position.y = CENTER_HEIGHT / 2.0;

    let bottom = top.mirrored(TURRET_BOTTOM, |t| {
        t.rotation.x = FRAC_PI_2;
        t.position.y = -CENTER_HEIGHT / 2.0;
    });

    let center = Part::group("armament")
        .with_child(drum)
        .with_child(top)
        .with_child(bottom);

    debug!(parts = center.part_count(), "assembled armament");
    Ok(center)
}

/// Upper turret in its own frame, before it is laid onto the drum
fn turret() -> GeometryResult<Part> {
    let back = sculpted(
        cuboid(BASE_WIDTH, BASE_BACK_HEIGHT, BASE_DEPTH)?,
        &[
            Sculpt::set(BoxCorner::RightBottomFront.index(), Axis::X, BASE_TAPER_X),
            Sculpt::set(BoxCorner::RightBottomBack.index(), Axis::X, BASE_TAPER_X),
            Sculpt::set(BoxCorner::LeftBottomBack.index(), Axis::X, -BASE_TAPER_X),
            Sculpt::set(BoxCorner::LeftBottomFront.index(), Axis::X, -BASE_TAPER_X),
        ],
    )?;
    let mut back = Part::mesh("turret_base_back", back, primary());
    back.transform.position.y = -BASE_BACK_HEIGHT / 2.0;

    let front = sculpted(
        cuboid(BASE_WIDTH, BASE_FRONT_HEIGHT, BASE_DEPTH)?,
        &[
            Sculpt::set(BoxCorner::RightTopFront.index(), Axis::X, BASE_TAPER_X),
            Sculpt::set(BoxCorner::RightTopBack.index(), Axis::X, BASE_TAPER_X),
            Sculpt::set(BoxCorner::LeftTopBack.index(), Axis::X, -BASE_TAPER_X),
            Sculpt::set(BoxCorner::LeftTopFront.index(), Axis::X, -BASE_TAPER_X),
        ],
    )?;
    let mut front = Part::mesh("turret_base_front", front, primary());
    front.transform.position.y = BASE_FRONT_HEIGHT / 2.0;

    let base = Part::group("turret_base").with_child(back).with_child(front);

    let mut quarter = Part::mesh("turret_cowl", cowl()?, tertiary().double_sided());
    quarter.transform.position.y = BASE_FRONT_HEIGHT - 4.0;
    quarter.transform.position.z = BASE_DEPTH / 2.0;

    let gun_z = BASE_DEPTH + QUARTER_RADIUS / 2.0 - GUN_RADIUS * 2.0;
    let gun_x = GUN_RADIUS + 0.5;

    let mut gun = Part::mesh(
        "gun_left",
        cylinder(&CylinderParams::new(GUN_RADIUS, GUN_RADIUS, GUN_HEIGHT, SEGMENTS))?,
        tertiary(),
    );
    gun.transform.position.x = -gun_x;
    gun.transform.position.y = GUN_HEIGHT / 2.0 + BASE_FRONT_HEIGHT - 4.0;
    gun.transform.position.z = gun_z;
    let other_gun = gun.mirrored("gun_right", |t| t.position.x = gun_x);

    let mut shooter = Part::mesh(
        "shooter_left",
        cylinder(&CylinderParams::new(
            SHOOTER_RADIUS,
            SHOOTER_RADIUS,
            SHOOTER_HEIGHT,
            SEGMENTS,
        ))?,
        tertiary(),
    );
    shooter.transform.position.x = -gun_x;
    shooter.transform.position.y = SHOOTER_HEIGHT / 2.0 + BASE_FRONT_HEIGHT - 4.0 + GUN_HEIGHT;
    shooter.transform.position.z = gun_z;
    let other_shooter = shooter.mirrored("shooter_right", |t| t.position.x = gun_x);

    let guns = Part::group("guns")
        .with_child(gun)
        .with_child(other_gun)
        .with_child(shooter)
        .with_child(other_shooter);

    Ok(Part::group(TURRET_TOP)
        .with_child(base)
        .with_child(quarter)
        .with_child(guns))
}

/// Quarter-round cowl over the gun mount, rims bent into a lip
fn cowl() -> GeometryResult<Mesh> {
    let layout = CylinderLayout::new(SEGMENTS);
    let mut mesh = patched_sweep(
        &CylinderParams::new(QUARTER_RADIUS, QUARTER_RADIUS, QUARTER_HEIGHT, SEGMENTS)
            .sweep(PI, FRAC_PI_2),
        &[
            Sculpt::Flare {
                vertices: layout.top_rim_range(),
                target: Axis::Y,
                source: Axis::Z,
                angle: -QUARTER_LIP,
                bias: 1.0,
            },
            Sculpt::Flare {
                vertices: layout.bottom_rim_range(),
                target: Axis::Y,
                source: Axis::Z,
                angle: QUARTER_LIP,
                bias: -1.0,
            },
        ],
    )?;
    mesh.apply_matrix(&Transform::rotation_y(PI));
    mesh.apply_matrix(&Transform::rotation_z(-FRAC_PI_2));
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::part::NodePath;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    #[test]
    fn test_turrets_sit_on_the_drum_caps() {
        let center = armament().unwrap();
        let top = center.find(TURRET_TOP).unwrap();
        let bottom = center.find(TURRET_BOTTOM).unwrap();
        assert_relative_eq!(
            center.world_position(&top).unwrap(),
            Point3::new(0.0, 20.0, 0.0),
            epsilon = 1e-5
        );
        assert_relative_eq!(
            center.world_position(&bottom).unwrap(),
            Point3::new(0.0, -20.0, 0.0),
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_lower_turret_is_a_flipped_copy() {
        let center = armament().unwrap();
        let top = center.child(1).unwrap();
        let bottom = center.child(2).unwrap();
        assert_eq!(top.children(), bottom.children());
        assert_relative_eq!(bottom.transform.rotation.x, FRAC_PI_2);
        assert_eq!(bottom.transform.rotation.y, top.transform.rotation.y);
        assert_eq!(bottom.transform.rotation.z, top.transform.rotation.z);
    }

    #[test]
    fn test_guns_are_side_by_side() {
        let center = armament().unwrap();
        let guns = center.node(&NodePath::new(vec![1, 2])).unwrap();
        let left = &guns.child(0).unwrap().transform.position;
        let right = &guns.child(1).unwrap().transform.position;
        assert_relative_eq!(left.x, -1.0);
        assert_relative_eq!(right.x, 1.0);
        assert_relative_eq!(left.y, 6.5);
        assert_relative_eq!(left.z, 3.0);
        assert_relative_eq!(guns.child(3).unwrap().transform.position.y, 14.0);
    }

    #[test]
    fn test_cowl_is_closed_with_a_lip() {
        let mesh = cowl().unwrap();
        assert!(mesh.is_closed());
        assert_eq!(mesh.face_count(), 4 * 32 + 4);
    }
}
