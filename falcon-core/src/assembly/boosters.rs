/// Engine row along the rear arc of the hull.
use std::f32::consts::FRAC_PI_2;

use super::body::HULL_RADIUS;
use super::BOOSTER_HALO_PREFIX;
use crate::config::{BOOSTER_GLOW_COLOR, EMISSIVE_COLOR};
use crate::error::GeometryResult;
use crate::glow::glow_material;
use crate::material::{Color, Material};
use crate::part::Part;
use crate::primitives::cuboid;
use crate::projection::SharedPosition;

const ARC_ANGLE: f32 = FRAC_PI_2;
const BOOSTER_WIDTH: f32 = 8.0;
const BOOSTER_HEIGHT: f32 = 6.0;
const BOOSTER_DEPTH: f32 = 5.0;
const HALO_PADDING: f32 = 15.0;
const HALO_DEPTH: f32 = 10.0;

/// Number of engine slots that fit on the rear arc
pub fn booster_count() -> u32 {
    (ARC_ANGLE * HULL_RADIUS / BOOSTER_WIDTH).round() as u32
}

/// Engine blocks and their halos, interleaved block then halo.
///
/// Slots run from `-count / 2 + 1` up to but excluding `count / 2`, so both
/// end slots of the arc stay empty.
pub fn boosters(camera: &SharedPosition) -> GeometryResult<Vec<Part>> {
    let count = booster_count() as f32;
    let step = ARC_ANGLE / count;

    let block = Part::mesh(
        "booster",
        cuboid(BOOSTER_WIDTH, BOOSTER_HEIGHT, BOOSTER_DEPTH)?,
        Material::lambert(EMISSIVE_COLOR),
    );
    let halo = Part::mesh(
        BOOSTER_HALO_PREFIX,
        cuboid(BOOSTER_WIDTH + HALO_PADDING, BOOSTER_HEIGHT, HALO_DEPTH)?,
        Material::Glow(glow_material(
            Color::from_hex(BOOSTER_GLOW_COLOR),
            camera.clone(),
        )),
    );

    let mut parts = Vec::new();
    let mut slot = -count / 2.0 + 1.0;
    let mut index = 0;
    while slot < count / 2.0 {
        let angle = slot * step;
        for (template, name) in [(&block, "booster"), (&halo, BOOSTER_HALO_PREFIX)] {
            parts.push(template.cloned_with(format!("{}_{}", name, index), |t| {
                t.position.x = -angle.cos() * HULL_RADIUS;
                t.position.z = angle.sin() * HULL_RADIUS;
                t.rotation.y = angle;
            }));
        }
        slot += 1.0;
        index += 1;
    }
    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::{Blending, Side};
    use approx::assert_relative_eq;

    #[test]
    fn test_slot_count() {
        assert_eq!(booster_count(), 20);
        let parts = boosters(&SharedPosition::default()).unwrap();
        assert_eq!(parts.len(), 2 * 19);
    }

    #[test]
    fn test_blocks_and_halos_share_placement() {
        let parts = boosters(&SharedPosition::default()).unwrap();
        for pair in parts.chunks(2) {
            assert!(pair[0].name.starts_with("booster_"));
            assert!(pair[1].name.starts_with(BOOSTER_HALO_PREFIX));
            assert_eq!(pair[0].transform, pair[1].transform);
            let radius = pair[0].transform.position.xz().norm();
            assert_relative_eq!(radius, HULL_RADIUS, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_row_is_symmetric_about_the_stern() {
        let parts = boosters(&SharedPosition::default()).unwrap();
        let first = &parts[0].transform;
        let last = &parts[parts.len() - 2].transform;
        assert_relative_eq!(first.position.x, last.position.x, epsilon = 1e-3);
        assert_relative_eq!(first.position.z, -last.position.z, epsilon = 1e-3);
        assert_relative_eq!(first.rotation.y, -last.rotation.y, epsilon = 1e-5);
        // Middle slot sits dead astern.
        let middle = &parts[18].transform;
        assert_relative_eq!(middle.position.x, -HULL_RADIUS, epsilon = 1e-3);
        assert_relative_eq!(middle.position.z, 0.0, epsilon = 1e-3);
    }

    #[test]
    fn test_halos_glow() {
        let camera = SharedPosition::default();
        let parts = boosters(&camera).unwrap();
        match parts[1].material.as_ref().unwrap() {
            Material::Glow(glow) => {
                assert_eq!(glow.side, Side::Back);
                assert_eq!(glow.blending, Blending::Additive);
                assert!(glow.view.same_as(&camera));
            }
            other => panic!("expected a glow material, got {:?}", other),
        }
    }
}
