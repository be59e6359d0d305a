/// Model Composer
///
/// Attaches the eight sub-assemblies under one root and keeps named
/// references to the nodes the animation layer drives: the two turrets whose
/// world positions seed the laser bolts and the engine halos whose scale
/// follows the pointer.
use nalgebra::Point3;
use tracing::info;

use crate::assembly::{
    armament, blasts, body, cockpit, dish, landing_gear, rear_stubs, rescue_capsules, wings,
    BOOSTER_HALO_PREFIX, TURRET_BOTTOM, TURRET_TOP,
};
use crate::error::{GeometryError, GeometryResult};
use crate::part::{NodePath, Part};
use crate::projection::SharedPosition;
use crate::transform::NodeTransform;

/// The composed craft.
///
/// The tree is fixed once built; callers may move the root or edit the
/// transform of an existing node but cannot add or remove parts.
#[derive(Debug, Clone)]
pub struct Model {
    root: Part,
    shooter_top: NodePath,
    shooter_bottom: NodePath,
    booster_halos: Vec<NodePath>,
}

impl Model {
    /// Build every sub-assembly and attach them in a fixed order.
    ///
    /// Glow materials keep `camera` to read the view position from.
    pub fn build(camera: &SharedPosition) -> GeometryResult<Self> {
        let root = Part::group("craft")
            .with_child(body(camera)?)
            .with_child(rescue_capsules()?)
            .with_child(armament()?)
            .with_child(rear_stubs()?)
            .with_child(wings()?)
            .with_child(cockpit()?)
            .with_child(landing_gear()?)
            .with_child(dish()?);

        let shooter_top = lookup(&root, TURRET_TOP)?;
        let shooter_bottom = lookup(&root, TURRET_BOTTOM)?;
        let booster_halos = root.find_all(|part| part.name.starts_with(BOOSTER_HALO_PREFIX));

        info!(
            parts = root.part_count(),
            meshes = root.mesh_count(),
            halos = booster_halos.len(),
            "composed model"
        );

        Ok(Self {
            root,
            shooter_top,
            shooter_bottom,
            booster_halos,
        })
    }

    pub fn root(&self) -> &Part {
        &self.root
    }

    /// Root transform, the handle for moving the whole craft
    pub fn root_transform_mut(&mut self) -> &mut NodeTransform {
        &mut self.root.transform
    }

    /// Transform of the node at `path`, if it exists
    pub fn transform_mut(&mut self, path: &NodePath) -> Option<&mut NodeTransform> {
        self.root.node_mut(path).map(|part| &mut part.transform)
    }

    pub fn shooter_top(&self) -> &NodePath {
        &self.shooter_top
    }

    pub fn shooter_bottom(&self) -> &NodePath {
        &self.shooter_bottom
    }

    pub fn booster_halos(&self) -> &[NodePath] {
        &self.booster_halos
    }

    /// World-space origin of the node at `path`, root transform included
    pub fn world_position(&self, path: &NodePath) -> Option<Point3<f32>> {
        self.root.world_position(path)
    }

    /// Current world positions of the upper and lower turrets
    pub fn muzzle_positions(&self) -> GeometryResult<(Point3<f32>, Point3<f32>)> {
        let top = self
            .world_position(&self.shooter_top)
            .ok_or_else(|| GeometryError::mismatch("upper turret is missing"))?;
        let bottom = self
            .world_position(&self.shooter_bottom)
            .ok_or_else(|| GeometryError::mismatch("lower turret is missing"))?;
        Ok((top, bottom))
    }

    /// Fresh pair of laser bolts at the current turret positions
    pub fn fire(&self, camera: &SharedPosition) -> GeometryResult<Part> {
        let (top, bottom) = self.muzzle_positions()?;
        blasts(top, bottom, camera)
    }
}

fn lookup(root: &Part, name: &str) -> GeometryResult<NodePath> {
    root.find(name)
        .ok_or_else(|| GeometryError::mismatch(format!("no part named {}", name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    #[test]
    fn test_assembly_order() {
        let model = Model::build(&SharedPosition::default()).unwrap();
        let names: Vec<&str> = model
            .root()
            .children()
            .iter()
            .map(|part| part.name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "body",
                "rescue_capsules",
                "armament",
                "rear_stubs",
                "wings",
                "cockpit",
                "landing_gear",
                "dish"
            ]
        );
    }

    #[test]
    fn test_named_references_resolve() {
        let model = Model::build(&SharedPosition::default()).unwrap();
        assert_eq!(model.root().node(model.shooter_top()).unwrap().name, TURRET_TOP);
        assert_eq!(
            model.root().node(model.shooter_bottom()).unwrap().name,
            TURRET_BOTTOM
        );
        assert_eq!(model.booster_halos().len(), 19);
    }

    #[test]
    fn test_muzzles_follow_the_root() {
        let mut model = Model::build(&SharedPosition::default()).unwrap();
        model.root_transform_mut().position = Vector3::new(10.0, 0.0, 0.0);
        let (top, bottom) = model.muzzle_positions().unwrap();
        assert_relative_eq!(top, Point3::new(10.0, 20.0, 0.0), epsilon = 1e-4);
        assert_relative_eq!(bottom, Point3::new(10.0, -20.0, 0.0), epsilon = 1e-4);
    }

    #[test]
    fn test_halo_transform_is_editable() {
        let mut model = Model::build(&SharedPosition::default()).unwrap();
        let halo = model.booster_halos()[0].clone();
        model.transform_mut(&halo).unwrap().scale.x = 1.5;
        assert_eq!(model.root().node(&halo).unwrap().transform.scale.x, 1.5);
    }

    #[test]
    fn test_fire_places_bolts_at_the_turrets() {
        let camera = SharedPosition::default();
        let model = Model::build(&camera).unwrap();
        let bolts = model.fire(&camera).unwrap();
        assert_relative_eq!(
            bolts.child(0).unwrap().transform.position,
            Vector3::new(32.5, 23.0, 0.0),
            epsilon = 1e-4
        );
    }
}
