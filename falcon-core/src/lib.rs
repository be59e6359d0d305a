/// Falcon Core Library - Procedural spacecraft geometry
///
/// This library builds the craft as a tree of transformed parts: parametric
/// primitives, index-addressed vertex edits, seam patching for partial
/// cylinders, per-part assemblers and the model composer, plus the rim-glow
/// material and the camera math shared by the front ends.
pub mod assembly;
pub mod config;
pub mod error;
pub mod geometry;
pub mod glow;
pub mod material;
pub mod model;
pub mod part;
pub mod patch;
pub mod primitives;
pub mod projection;
pub mod sculpt;
pub mod transform;

// Re-export commonly used types
pub use error::{GeometryError, GeometryResult};
pub use geometry::{Face, Mesh, Triangle, Vertex};
pub use glow::{glow_material, GlowMaterial};
pub use material::{Blending, Color, Material, Side};
pub use model::Model;
pub use part::{NodePath, Part};
pub use patch::close_partial_cylinder;
pub use primitives::{cuboid, cylinder, BoxCorner, CylinderLayout, CylinderParams};
pub use projection::{Camera, SharedPosition};
pub use sculpt::{sculpt, Axis, Sculpt};
pub use transform::{NodeTransform, RotationState, Transform};
