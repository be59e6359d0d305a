/// Laser bolts fired from the two turrets.
use std::f32::consts::FRAC_PI_2;

use nalgebra::{Point3, Vector3};
use tracing::debug;

use crate::config::{BLAST_GLOW_COLOR, EMISSIVE_COLOR};
use crate::error::GeometryResult;
use crate::glow::glow_material;
use crate::material::{Color, Material};
use crate::part::Part;
use crate::primitives::{cylinder, CylinderParams};
use crate::projection::SharedPosition;

pub const BLAST_LENGTH: f32 = 25.0;

/// Offset from a turret origin to the centre of its bolt; the vertical
/// component is mirrored for the lower turret
pub const BLAST_MUZZLE_OFFSET: [f32; 3] = [BLAST_LENGTH / 2.0 + 20.0, 3.0, 0.0];

const SEGMENTS: u32 = 16;

/// A pair of bolts leaving the turrets at `top` and `bottom` (world space).
///
/// The returned group sits at the origin; animating its x position moves
/// both bolts together.
pub fn blasts(
    top: Point3<f32>,
    bottom: Point3<f32>,
    camera: &SharedPosition,
) -> GeometryResult<Part> {
    let core = Part::mesh(
        "blast_core",
        cylinder(&CylinderParams::new(0.5, 0.5, BLAST_LENGTH, SEGMENTS))?,
        Material::lambert(EMISSIVE_COLOR),
    );
    let halo = Part::mesh(
        "blast_halo",
        cylinder(&CylinderParams::new(1.6, 1.6, BLAST_LENGTH + 4.0, SEGMENTS))?,
        Material::Glow(glow_material(
            Color::from_hex(BLAST_GLOW_COLOR),
            camera.clone(),
        )),
    );

    let [dx, dy, dz] = BLAST_MUZZLE_OFFSET;
    let mut upper = Part::group("blast_top").with_child(core).with_child(halo);
    upper.transform.rotation.z = -FRAC_PI_2;
    upper.transform.position = top.coords + Vector3::new(dx, dy, dz);

    let lower = upper.mirrored("blast_bottom", |t| {
        t.position = bottom.coords + Vector3::new(dx, -dy, dz);
    });

    let bolts = Part::group("blasts").with_child(upper).with_child(lower);
    debug!(?top, ?bottom, "fired blasts");
    Ok(bolts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Side;
    use approx::assert_relative_eq;

    #[test]
    fn test_bolts_start_ahead_of_the_turrets() {
        let bolts = blasts(
            Point3::new(0.0, 20.0, 0.0),
            Point3::new(0.0, -20.0, 0.0),
            &SharedPosition::default(),
        )
        .unwrap();
        let upper = bolts.child(0).unwrap();
        let lower = bolts.child(1).unwrap();
        assert_relative_eq!(upper.transform.position, Vector3::new(32.5, 23.0, 0.0));
        assert_relative_eq!(lower.transform.position, Vector3::new(32.5, -23.0, 0.0));
        assert_relative_eq!(upper.transform.rotation.z, -FRAC_PI_2);
        assert_eq!(upper.transform.rotation, lower.transform.rotation);
        assert_eq!(bolts.transform.position, Vector3::zeros());
    }

    #[test]
    fn test_bolt_halo_glows_red() {
        let bolts = blasts(Point3::origin(), Point3::origin(), &SharedPosition::default()).unwrap();
        let halo = bolts.child(0).unwrap().child(1).unwrap();
        let material = halo.material.as_ref().unwrap();
        assert_eq!(material.color(), Color::from_hex(0xff0000));
        assert_eq!(material.side(), Side::Back);
    }
}
