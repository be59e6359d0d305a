/// Falcon Web - WASM export of the procedural craft
///
/// Builds the model once and hands it to a browser renderer as flat,
/// world-space triangle buffers ready for upload to vertex arrays.
use falcon_core::config::CAMERA_POSITION;
use falcon_core::{Color, GeometryError, Material, Model, Part, SharedPosition};
use nalgebra::{Matrix4, Point3};
use wasm_bindgen::prelude::*;

/// Non-indexed triangle soup, three floats per vertex in every buffer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffers {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub colors: Vec<f32>,
    /// One float per vertex: 1.0 for additive glow, 0.0 for opaque
    pub glow: Vec<f32>,
    pub triangle_count: u32,
}

impl MeshBuffers {
    fn push_vertex(&mut self, position: &Point3<f32>, normal: &[f32; 3], color: Color, glow: bool) {
        self.positions.extend_from_slice(&[position.x, position.y, position.z]);
        self.normals.extend_from_slice(normal);
        self.colors.extend_from_slice(&color.to_array());
        self.glow.push(if glow { 1.0 } else { 0.0 });
    }
}

/// Flatten every mesh of the model into world-space buffers.
///
/// Glow surfaces are baked with their rim intensity for the current view.
pub fn flatten(model: &Model) -> MeshBuffers {
    let mut buffers = MeshBuffers::default();
    flatten_part(model.root(), &mut buffers);
    buffers
}

fn flatten_part(root: &Part, buffers: &mut MeshBuffers) {
    root.walk(&Matrix4::identity(), &mut |part: &Part, world: &Matrix4<f32>| {
        let (Some(mesh), Some(material)) = (&part.mesh, &part.material) else {
            return;
        };
        for triangle in mesh.triangles(world) {
            let normal = triangle.calculate_normal();
            let (color, glow) = match material {
                Material::Lambert(lambert) => (lambert.color, false),
                Material::Glow(glow) => (glow.shade(&normal, &glow.view.get().coords), true),
            };
            for vertex in &triangle.vertices {
                buffers.push_vertex(&vertex.position, &normal.into(), color, glow);
            }
            buffers.triangle_count += 1;
        }
    });
}

/// Camera handle at the default eye position, looking at the origin
pub fn default_camera() -> SharedPosition {
    let [x, y, z] = CAMERA_POSITION;
    SharedPosition::new(Point3::new(x, y, z))
}

/// Browser handle on the built craft
#[wasm_bindgen]
pub struct CraftBuffers {
    model: Model,
    camera: SharedPosition,
    buffers: MeshBuffers,
}

#[wasm_bindgen]
impl CraftBuffers {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<CraftBuffers, JsValue> {
        let camera = default_camera();
        let model = Model::build(&camera).map_err(to_js)?;
        let buffers = flatten(&model);
        web_sys::console::log_1(&JsValue::from_str(&format!(
            "falcon: {} parts, {} triangles",
            model.root().part_count(),
            buffers.triangle_count
        )));

        Ok(CraftBuffers {
            model,
            camera,
            buffers,
        })
    }

    /// Move the eye the glow halos are shaded for and rebake the buffers
    pub fn set_camera(&mut self, x: f32, y: f32, z: f32) {
        self.camera.set(Point3::new(x, y, z));
        self.buffers = flatten(&self.model);
    }

    #[wasm_bindgen(getter)]
    pub fn positions(&self) -> Vec<f32> {
        self.buffers.positions.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn normals(&self) -> Vec<f32> {
        self.buffers.normals.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn colors(&self) -> Vec<f32> {
        self.buffers.colors.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn glow(&self) -> Vec<f32> {
        self.buffers.glow.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn triangle_count(&self) -> u32 {
        self.buffers.triangle_count
    }
}

fn to_js(error: GeometryError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model_with_camera() -> (Model, SharedPosition) {
        let camera = SharedPosition::default();
        let model = Model::build(&camera).unwrap();
        (model, camera)
    }

    #[test]
    fn test_buffer_lengths_agree() {
        let (model, _) = model_with_camera();
        let buffers = flatten(&model);
        let vertices = buffers.triangle_count as usize * 3;
        assert!(buffers.triangle_count > 0);
        assert_eq!(buffers.positions.len(), vertices * 3);
        assert_eq!(buffers.normals.len(), vertices * 3);
        assert_eq!(buffers.colors.len(), vertices * 3);
        assert_eq!(buffers.glow.len(), vertices);
    }

    #[test]
    fn test_every_face_is_flattened() {
        let (model, _) = model_with_camera();
        let mut faces = 0;
        model
            .root()
            .walk(&Matrix4::identity(), &mut |part: &Part, _: &Matrix4<f32>| {
                if let Some(mesh) = &part.mesh {
                    faces += mesh.face_count();
                }
            });
        assert_eq!(flatten(&model).triangle_count as usize, faces);
    }

    #[test]
    fn test_glow_and_opaque_vertices_are_both_present() {
        let (model, _) = model_with_camera();
        let buffers = flatten(&model);
        assert!(buffers.glow.contains(&1.0));
        assert!(buffers.glow.contains(&0.0));
        assert!(buffers.positions.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn test_default_camera_shades_halos_unevenly() {
        let camera = default_camera();
        assert_ne!(camera.get(), Point3::origin());

        let model = Model::build(&camera).unwrap();
        let buffers = flatten(&model);
        let glow_colors: Vec<&[f32]> = buffers
            .colors
            .chunks(3)
            .zip(&buffers.glow)
            .filter(|(_, glow)| **glow == 1.0)
            .map(|(color, _)| color)
            .collect();
        assert!(!glow_colors.is_empty());
        assert!(glow_colors.iter().any(|color| *color != glow_colors[0]));
    }

    #[test]
    fn test_glow_follows_camera() {
        let (model, camera) = model_with_camera();
        let [x, y, z] = CAMERA_POSITION;
        camera.set(Point3::new(x, y, z));
        let near = flatten(&model);
        camera.set(Point3::new(-x, -y, -z));
        let far = flatten(&model);

        assert_eq!(near.positions, far.positions);
        assert_ne!(near.colors, far.colors);
    }
}
