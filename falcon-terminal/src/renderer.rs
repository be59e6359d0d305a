/// ASCII rasterizer for terminal rendering
use crossterm::{
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use falcon_core::{Camera, Color, Material, Part, Side, Triangle};
use nalgebra::{Matrix4, Point3, Vector3};
use std::io::Write;

/// Character luminosity ramp for depth/shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Hemisphere light: full sky colour straight up, ground colour straight down
const SKY: Color = Color::WHITE;
const GROUND: Color = Color::BLACK;

/// ASCII renderer that converts transform trees to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    color_buffer: Vec<Color>,
}

/// Screen-space vertex: pixel x, pixel y, NDC depth
type ScreenPoint = (f32, f32, f32);

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            color_buffer: vec![Color::BLACK; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.color_buffer.fill(Color::BLACK);
    }

    /// Draw every mesh of `root`: opaque surfaces first, then glow
    pub fn render_part(&mut self, root: &Part, camera: &Camera) {
        let view_projection = camera.view_projection();
        let eye = camera.position.get();

        for additive in [false, true] {
            root.walk(&Matrix4::identity(), &mut |part: &Part, world: &Matrix4<f32>| {
                let (Some(mesh), Some(material)) = (&part.mesh, &part.material) else {
                    return;
                };
                if matches!(material, Material::Glow(_)) != additive {
                    return;
                }
                for triangle in mesh.triangles(world) {
                    self.render_triangle(&triangle, material, &eye, &view_projection, camera);
                }
            });
        }
    }

    fn render_triangle(
        &mut self,
        triangle: &Triangle,
        material: &Material,
        eye: &Point3<f32>,
        view_projection: &Matrix4<f32>,
        camera: &Camera,
    ) {
        let normal = triangle.calculate_normal();
        let facing = normal.dot(&(eye - triangle.centroid())) > 0.0;
        let visible = match material.side() {
            Side::Front => facing,
            Side::Back => !facing,
            Side::Double => true,
        };
        if !visible {
            return;
        }

        // Project vertices to screen space
        let mut screen_coords = Vec::with_capacity(3);
        for vertex in &triangle.vertices {
            match camera.project_to_screen(
                &vertex.position,
                view_projection,
                self.width as u32,
                self.height as u32,
            ) {
                Some(point) => screen_coords.push(point),
                None => return, // Triangle is clipped
            }
        }

        match material {
            Material::Lambert(lambert) => {
                // Shade the side that faces the eye
                let lit = if facing { normal } else { -normal };
                let color = hemisphere(&lit, lambert.color);
                self.rasterize_triangle(&screen_coords, |cell| *cell = color, true);
            }
            Material::Glow(glow) => {
                let intensity = glow.intensity(&normal, &glow.view.get().coords);
                let color = glow.color.scale(intensity);
                self.rasterize_triangle(&screen_coords, |cell| *cell = add(*cell, color), false);
            }
        }
    }

    /// Fill the pixels of a screen triangle that pass the depth test.
    ///
    /// `shade` updates the cell colour; depth is written only when
    /// `write_depth` is set.
    fn rasterize_triangle<F>(&mut self, coords: &[ScreenPoint], mut shade: F, write_depth: bool)
    where
        F: FnMut(&mut Color),
    {
        let (v0, v1, v2) = (coords[0], coords[1], coords[2]);

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i32;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i32;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i32;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                let Some((w0, w1, w2)) =
                    barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), (px, py))
                else {
                    continue;
                };
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                let idx = y as usize * self.width + x as usize;
                if depth < self.depth_buffer[idx] {
                    if write_depth {
                        self.depth_buffer[idx] = depth;
                    }
                    shade(&mut self.color_buffer[idx]);
                }
            }
        }
    }

    /// Character drawn for a cell
    pub fn glyph(&self, x: usize, y: usize) -> Option<char> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(ramp(self.color_buffer[y * self.width + x].luminance()))
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let color = self.color_buffer[y * self.width + x];
                let [r, g, b] = color.to_array().map(|c| (c.clamp(0.0, 1.0) * 255.0) as u8);

                writer.queue(SetForegroundColor(TermColor::Rgb { r, g, b }))?;
                writer.queue(Print(ramp(color.luminance())))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Lambert colour under a white-sky, black-ground hemisphere light
fn hemisphere(normal: &Vector3<f32>, albedo: Color) -> Color {
    let weight = 0.5 * normal.y + 0.5;
    let light = Color::rgb(
        GROUND.r + (SKY.r - GROUND.r) * weight,
        GROUND.g + (SKY.g - GROUND.g) * weight,
        GROUND.b + (SKY.b - GROUND.b) * weight,
    );
    Color::rgb(albedo.r * light.r, albedo.g * light.g, albedo.b * light.b)
}

fn add(a: Color, b: Color) -> Color {
    Color::rgb(
        (a.r + b.r).min(1.0),
        (a.g + b.g).min(1.0),
        (a.b + b.b).min(1.0),
    )
}

fn ramp(luminance: f32) -> char {
    let char_index = (luminance.clamp(0.0, 1.0) * (LUMINOSITY_RAMP.len() - 1) as f32) as usize;
    LUMINOSITY_RAMP[char_index.min(LUMINOSITY_RAMP.len() - 1)]
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
