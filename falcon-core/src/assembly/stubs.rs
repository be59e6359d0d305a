/// Short exhaust stubs on the upper rear deck.
use std::f32::consts::PI;

use nalgebra::Vector3;
use tracing::debug;

use crate::error::GeometryResult;
use crate::material::quaternary;
use crate::part::Part;
use crate::primitives::{cylinder, CylinderParams};
use crate::transform::Transform;

const SPLAY: f32 = PI / 50.0;

/// `(position, pitch)` of each stub, inner row first
const PLACEMENTS: [([f32; 3], f32); 6] = [
    ([-40.0, 15.0, 0.0], 0.0),
    ([-34.0, 15.0, -17.0], -SPLAY),
    ([-34.0, 15.0, 17.0], SPLAY),
    ([-60.0, 12.0, 0.0], 0.0),
    ([-52.0, 12.0, -25.0], -SPLAY),
    ([-52.0, 12.0, 25.0], SPLAY),
];

pub fn rear_stubs() -> GeometryResult<Part> {
    let mut mesh = cylinder(&CylinderParams::new(8.0, 9.0, 2.0, 32))?;
    mesh.apply_matrix(&Transform::rotation_z(PI / 22.0));
    let stub = Part::mesh("rear_stub", mesh, quaternary());

    let mut stubs = Part::group("rear_stubs");
    for (index, ([x, y, z], pitch)) in PLACEMENTS.into_iter().enumerate() {
        stubs.add(stub.cloned_with(format!("rear_stub_{}", index), |t| {
            t.position = Vector3::new(x, y, z);
            t.rotation.x = pitch;
        }));
    }

    debug!(parts = stubs.part_count(), "assembled rear stubs");
    Ok(stubs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_six_stubs_in_mirrored_pairs() {
        let stubs = rear_stubs().unwrap();
        assert_eq!(stubs.children().len(), 6);
        for row in stubs.children().chunks(3) {
            let (center, left, right) = (&row[0], &row[1], &row[2]);
            assert_eq!(center.transform.position.z, 0.0);
            assert_eq!(left.transform.position.x, right.transform.position.x);
            assert_eq!(left.transform.position.z, -right.transform.position.z);
            assert_eq!(left.transform.rotation.x, -right.transform.rotation.x);
            assert_eq!(left.mesh, center.mesh);
        }
    }
}
