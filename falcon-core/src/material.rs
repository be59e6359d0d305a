/// Surface descriptions handed to renderers alongside each mesh.
use crate::config::{PRIMARY_COLOR, QUATERNARY_COLOR, SECONDARY_COLOR, TERTIARY_COLOR};
use crate::glow::GlowMaterial;

/// Linear RGB colour, components in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Construct from a packed `0xRRGGBB` value
    pub fn from_hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self { r, g, b }
    }

    pub fn scale(self, factor: f32) -> Self {
        Self::rgb(self.r * factor, self.g * factor, self.b * factor)
    }

    /// Perceived brightness
    pub fn luminance(&self) -> f32 {
        0.2126 * self.r + 0.7152 * self.g + 0.0722 * self.b
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

/// Which faces of a mesh are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Front,
    Back,
    Double,
}

/// How a fragment combines with what is already on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blending {
    Normal,
    Additive,
}

/// Flat-shaded diffuse surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LambertMaterial {
    pub color: Color,
    pub side: Side,
}

impl LambertMaterial {
    pub fn new(hex: u32) -> Self {
        Self {
            color: Color::from_hex(hex),
            side: Side::Front,
        }
    }

    pub fn double_sided(mut self) -> Self {
        self.side = Side::Double;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    Lambert(LambertMaterial),
    Glow(GlowMaterial),
}

impl Material {
    pub fn lambert(hex: u32) -> Self {
        Material::Lambert(LambertMaterial::new(hex))
    }

    pub fn side(&self) -> Side {
        match self {
            Material::Lambert(lambert) => lambert.side,
            Material::Glow(glow) => glow.side,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Material::Lambert(lambert) => lambert.color,
            Material::Glow(glow) => glow.color,
        }
    }

    /// Same surface, drawn from both sides
    pub fn double_sided(self) -> Self {
        match self {
            Material::Lambert(lambert) => Material::Lambert(lambert.double_sided()),
            other => other,
        }
    }
}

/// Hull palette
pub fn primary() -> Material {
    Material::lambert(PRIMARY_COLOR)
}

pub fn secondary() -> Material {
    Material::lambert(SECONDARY_COLOR)
}

pub fn tertiary() -> Material {
    Material::lambert(TERTIARY_COLOR)
}

pub fn quaternary() -> Material {
    Material::lambert(QUATERNARY_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_hex() {
        let c = Color::from_hex(0x00e3fc);
        assert_relative_eq!(c.r, 0.0);
        assert_relative_eq!(c.g, 227.0 / 255.0);
        assert_relative_eq!(c.b, 252.0 / 255.0);
        assert_eq!(Color::from_hex(0xffffff), Color::WHITE);
    }

    #[test]
    fn test_double_sided() {
        let material = primary().double_sided();
        assert_eq!(material.side(), Side::Double);
        assert_eq!(quaternary().side(), Side::Front);
    }
}
