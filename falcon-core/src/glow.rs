/// Glow Shader Factory
///
/// Rim-light material for engine and laser halos. The material is plain data:
/// the colour, the two constants of the rim formula, render-state flags, the
/// GLSL program and a live handle on the camera position that the view
/// vector is read from every frame.
use nalgebra::Vector3;

use crate::config::{GLOW_C, GLOW_P};
use crate::material::{Blending, Color, Side};
use crate::projection::SharedPosition;

pub const GLOW_VERTEX_SHADER: &str = r#"
uniform vec3 viewVector;
uniform float c;
uniform float p;
varying float intensity;
void main()
{
    vec3 vNormal = normalize(normalMatrix * normal);
    vec3 vNormel = normalize(normalMatrix * viewVector);
    intensity = pow(c - dot(vNormal, vNormel), p);

    gl_Position = projectionMatrix * modelViewMatrix * vec4(position, 1.0);
}
"#;

pub const GLOW_FRAGMENT_SHADER: &str = r#"
uniform vec3 glowColor;
varying float intensity;
void main()
{
    vec3 glow = glowColor * intensity;
    gl_FragColor = vec4(glow, 1.0);
}
"#;

/// Back-face, additive, transparent rim-light material
#[derive(Debug, Clone)]
pub struct GlowMaterial {
    pub color: Color,
    pub c: f32,
    pub p: f32,
    pub view: SharedPosition,
    pub side: Side,
    pub blending: Blending,
    pub transparent: bool,
}

impl GlowMaterial {
    /// `pow(c - dot(normal, view), p)` for view-space unit vectors
    pub fn intensity(&self, normal: &Vector3<f32>, view: &Vector3<f32>) -> f32 {
        let n = normal.try_normalize(f32::EPSILON).unwrap_or_else(Vector3::zeros);
        let v = view.try_normalize(f32::EPSILON).unwrap_or_else(Vector3::zeros);
        (self.c - n.dot(&v)).max(0.0).powf(self.p)
    }

    /// Colour contribution at a fragment
    pub fn shade(&self, normal: &Vector3<f32>, view: &Vector3<f32>) -> Color {
        self.color.scale(self.intensity(normal, view))
    }

    pub fn vertex_shader(&self) -> &'static str {
        GLOW_VERTEX_SHADER
    }

    pub fn fragment_shader(&self) -> &'static str {
        GLOW_FRAGMENT_SHADER
    }
}

impl PartialEq for GlowMaterial {
    fn eq(&self, other: &Self) -> bool {
        self.color == other.color
            && self.c == other.c
            && self.p == other.p
            && self.view.get() == other.view.get()
            && self.side == other.side
            && self.blending == other.blending
            && self.transparent == other.transparent
    }
}

/// Build a rim-light material of the given colour that tracks `view`.
pub fn glow_material(color: Color, view: SharedPosition) -> GlowMaterial {
    GlowMaterial {
        color,
        c: GLOW_C,
        p: GLOW_P,
        view,
        side: Side::Back,
        blending: Blending::Additive,
        transparent: true,
    }
}
