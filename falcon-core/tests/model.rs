use approx::assert_relative_eq;
use falcon_core::assembly::{armament, mirror_rescue_capsule};
use falcon_core::{
    close_partial_cylinder, cylinder, CylinderParams, Material, Model, Part, SharedPosition,
};
use nalgebra::{Matrix4, Point3, Vector3};
use std::f32::consts::PI;

#[test]
fn test_build_is_deterministic() {
    let camera = SharedPosition::default();
    let a = Model::build(&camera).unwrap();
    let b = Model::build(&camera).unwrap();
    assert_eq!(a.root().part_count(), b.root().part_count());
    assert_eq!(a.root(), b.root());
    assert_eq!(a.shooter_top(), b.shooter_top());
    assert_eq!(a.booster_halos(), b.booster_halos());
}

#[test]
fn test_turret_world_positions_at_identity_root() {
    let model = Model::build(&SharedPosition::default()).unwrap();
    let top = model.world_position(model.shooter_top()).unwrap();
    let bottom = model.world_position(model.shooter_bottom()).unwrap();
    assert_relative_eq!(top, Point3::new(0.0, 20.0, 0.0), epsilon = 1e-4);
    assert_relative_eq!(bottom, Point3::new(0.0, -20.0, 0.0), epsilon = 1e-4);

    // The armament on its own agrees with its place in the model.
    let center = armament().unwrap();
    let path = center.find("turret_top").unwrap();
    assert_relative_eq!(center.world_position(&path).unwrap(), top, epsilon = 1e-4);
}

#[test]
fn test_half_sweep_patch_scenario() {
    let mut mesh = cylinder(&CylinderParams::new(10.0, 10.0, 4.0, 8).sweep(0.0, PI)).unwrap();
    assert_eq!(mesh.vertex_count(), 20);
    assert_eq!(mesh.face_count(), 32);
    assert!(!mesh.is_closed());

    close_partial_cylinder(&mut mesh, 8).unwrap();
    assert_eq!(mesh.face_count(), 36);
    assert!(mesh.boundary_edges().is_empty());
    for face in &mesh.faces {
        assert!(face.indices.iter().all(|&i| (i as usize) < mesh.vertex_count()));
    }
}

#[test]
fn test_capsule_mirror_scenario() {
    let mut left = Part::group("capsule_left");
    left.transform.position = Vector3::new(10.0, 0.0, -5.0);
    let right = mirror_rescue_capsule(&left);
    assert_eq!(right.transform.position, Vector3::new(10.0, 0.0, 5.0));
    assert_eq!(left.transform.position, Vector3::new(10.0, 0.0, -5.0));
}

#[test]
fn test_every_face_is_in_range_and_normals_are_finite() {
    let model = Model::build(&SharedPosition::default()).unwrap();
    let mut meshes = 0;
    model
        .root()
        .walk(&Matrix4::identity(), &mut |part: &Part, _: &Matrix4<f32>| {
            if let Some(mesh) = &part.mesh {
                meshes += 1;
                for face in &mesh.faces {
                    assert!(face
                        .indices
                        .iter()
                        .all(|&i| (i as usize) < mesh.vertex_count()));
                    assert!(face.normal.iter().all(|c| c.is_finite()));
                }
            }
        });
    assert_eq!(meshes, model.root().mesh_count());
}

#[test]
fn test_halos_track_the_camera() {
    let camera = SharedPosition::default();
    let model = Model::build(&camera).unwrap();
    camera.set(Point3::new(0.0, 250.0, 500.0));
    for path in model.booster_halos() {
        match model.root().node(path).and_then(|part| part.material.as_ref()) {
            Some(Material::Glow(glow)) => {
                assert_eq!(glow.view.get(), Point3::new(0.0, 250.0, 500.0));
            }
            other => panic!("halo without a glow material: {:?}", other),
        }
    }
}
