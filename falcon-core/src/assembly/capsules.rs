/// Escape pods slung either side of the hull.
use std::f32::consts::{FRAC_PI_2, PI};

use tracing::debug;

use crate::error::GeometryResult;
use crate::material::{primary, secondary, tertiary};
use crate::part::Part;
use crate::primitives::{cylinder, CylinderParams};
use crate::transform::Transform;

const CAPSULE_HEIGHT: f32 = 92.0;
const CAPSULE_TOP_RADIUS: f32 = 18.0;
const CAPSULE_BOTTOM_RADIUS: f32 = CAPSULE_TOP_RADIUS + 2.0;
const CAPSULE_SEGMENTS: u32 = 6;

const FRONT_HEIGHT: f32 = 100.0 - CAPSULE_HEIGHT;
const FRONT_BORDER_HEIGHT: f32 = 2.0;
const FRONT_BODY_HEIGHT: f32 = FRONT_HEIGHT - FRONT_BORDER_HEIGHT;
const FRONT_TOP_RADIUS: f32 = CAPSULE_TOP_RADIUS - 6.0;
const FRONT_BOTTOM_RADIUS: f32 = CAPSULE_TOP_RADIUS - 3.0;

/// Both pods: the left one built, the right one mirrored from it
pub fn rescue_capsules() -> GeometryResult<Part> {
    let mut shell = cylinder(&CylinderParams::new(
        CAPSULE_TOP_RADIUS,
        CAPSULE_BOTTOM_RADIUS,
        CAPSULE_HEIGHT,
        CAPSULE_SEGMENTS,
    ))?;
    // Turn a flat side of the hexagon outward.
    shell.apply_matrix(&Transform::rotation_y(PI / CAPSULE_SEGMENTS as f32));

    let front_body = Part::mesh(
        "capsule_front_body",
        cylinder(&CylinderParams::new(
            FRONT_TOP_RADIUS,
            FRONT_BOTTOM_RADIUS,
            FRONT_BODY_HEIGHT,
            32,
        ))?,
        secondary(),
    );

    let mut front_border = Part::mesh(
        "capsule_front_border",
        cylinder(&CylinderParams::new(
            FRONT_TOP_RADIUS,
            FRONT_TOP_RADIUS,
            FRONT_BORDER_HEIGHT,
            32,
        ))?,
        primary(),
    );
    front_border.transform.position.y = FRONT_HEIGHT / 2.0;

    let mut front = Part::group("capsule_front")
        .with_child(front_body)
        .with_child(front_border);
    front.transform.position.y = (CAPSULE_HEIGHT + FRONT_BODY_HEIGHT) / 2.0;

    let mut left = Part::group("capsule_left")
        .with_child(Part::mesh("capsule_shell", shell, tertiary()))
        .with_child(front);
    left.transform.rotation.x = -FRAC_PI_2;
    left.transform.position.z = -CAPSULE_HEIGHT / 2.0;

    let right = mirror_rescue_capsule(&left);
    let capsules = Part::group("rescue_capsules")
        .with_child(left)
        .with_child(right);

    debug!(parts = capsules.part_count(), "assembled rescue capsules");
    Ok(capsules)
}

/// Copy of a pod reflected across the craft's XY plane.
///
/// Only the pitch and the lateral offset change sign; the subtree is copied
/// as is.
pub fn mirror_rescue_capsule(left: &Part) -> Part {
    left.mirrored("capsule_right", |t| {
        t.rotation.x = -t.rotation.x;
        t.position.z = -t.position.z;
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    #[test]
    fn test_pods_mirror_across_the_hull() {
        let capsules = rescue_capsules().unwrap();
        let left = capsules.child(0).unwrap();
        let right = capsules.child(1).unwrap();

        assert_relative_eq!(left.transform.rotation.x, -FRAC_PI_2);
        assert_relative_eq!(left.transform.position.z, -46.0);
        assert_relative_eq!(right.transform.rotation.x, FRAC_PI_2);
        assert_relative_eq!(right.transform.position.z, 46.0);
        assert_eq!(left.children(), right.children());
    }

    #[test]
    fn test_mirror_flips_only_lateral_components() {
        let mut pod = Part::group("capsule_left");
        pod.transform.position = Vector3::new(10.0, 0.0, -5.0);
        pod.transform.rotation.x = -0.3;

        let mirrored = mirror_rescue_capsule(&pod);
        assert_eq!(mirrored.transform.position, Vector3::new(10.0, 0.0, 5.0));
        assert_relative_eq!(mirrored.transform.rotation.x, 0.3);
        assert_eq!(pod.transform.position, Vector3::new(10.0, 0.0, -5.0));
    }

    #[test]
    fn test_front_sits_on_the_shell() {
        let capsules = rescue_capsules().unwrap();
        let front = capsules.node(&crate::part::NodePath::new(vec![0, 1])).unwrap();
        assert_eq!(front.name, "capsule_front");
        assert_relative_eq!(front.transform.position.y, 49.0);
        assert_relative_eq!(front.child(1).unwrap().transform.position.y, 4.0);
    }
}
