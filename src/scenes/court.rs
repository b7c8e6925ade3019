use glam::Vec3;

use crate::config::HexColor;
use crate::loaders::TextureData;
use crate::mesh::{ground_quad, Mesh};

/// Court quad size in world units
pub const COURT_WIDTH: f32 = 400.0;
pub const COURT_DEPTH: f32 = 200.0;
pub const FLOOR_SIZE: f32 = 2000.0;
/// Court sits just above the floor so the two never z-fight
pub const COURT_LIFT: f32 = 0.1;

const SURROUND: [u8; 3] = [0x3C, 0x7A, 0x4A];
const PLAYING_AREA: [u8; 3] = [0x2E, 0x5F, 0xA8];
const LINE: [u8; 3] = [0xF4, 0xF4, 0xF0];

/// Texture coverage in metres, 2:1 like the quad
const SPAN_X: f32 = 36.0;
const SPAN_Z: f32 = 18.0;
const DOUBLES_LENGTH: f32 = 23.77;
const DOUBLES_WIDTH: f32 = 10.97;
const SINGLES_WIDTH: f32 = 8.23;
const SERVICE_FROM_NET: f32 = 6.40;
const LINE_WIDTH: f32 = 0.08;

/// Floor plane plus textured court on top, in world space
pub fn ground_mesh(ground_height: f32, floor_color: HexColor) -> Mesh {
    let mut mesh = ground_quad(
        Vec3::new(0.0, ground_height, 0.0),
        FLOOR_SIZE,
        FLOOR_SIZE,
        floor_color.to_linear(),
    );
    mesh.extend(
        ground_quad(
            Vec3::new(0.0, ground_height + COURT_LIFT, 0.0),
            COURT_WIDTH,
            COURT_DEPTH,
            [1.0; 3],
        )
        .textured(),
    );
    mesh
}

/// Painted tennis court used when the texture asset cannot be loaded
pub fn court_texture(width: u32, height: u32) -> TextureData {
    let mut canvas = Canvas::new(width, height, SURROUND);
    let half_length = DOUBLES_LENGTH * 0.5;
    let half_doubles = DOUBLES_WIDTH * 0.5;
    let half_singles = SINGLES_WIDTH * 0.5;
    let w = LINE_WIDTH * 0.5;

    canvas.fill(-half_length, -half_doubles, half_length, half_doubles, PLAYING_AREA);

    // Baselines and doubles sidelines
    for x in [-half_length, half_length] {
        canvas.fill(x - w, -half_doubles, x + w, half_doubles, LINE);
    }
    for z in [-half_doubles, half_doubles] {
        canvas.fill(-half_length, z - w, half_length, z + w, LINE);
    }

    // Singles sidelines
    for z in [-half_singles, half_singles] {
        canvas.fill(-half_length, z - w, half_length, z + w, LINE);
    }

    // Service lines and centre service line
    for x in [-SERVICE_FROM_NET, SERVICE_FROM_NET] {
        canvas.fill(x - w, -half_singles, x + w, half_singles, LINE);
    }
    canvas.fill(-SERVICE_FROM_NET, -w, SERVICE_FROM_NET, w, LINE);

    // Net
    canvas.fill(-w * 2.0, -half_doubles - 0.9, w * 2.0, half_doubles + 0.9, LINE);

    canvas.into_texture()
}

/// RGBA buffer addressed in court metres, origin at the net centre
struct Canvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Canvas {
    fn new(width: u32, height: u32, color: [u8; 3]) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let data = [color[0], color[1], color[2], 255].repeat((width * height) as usize);
        Self { width, height, data }
    }

    fn to_pixel_x(&self, x: f32) -> i64 {
        ((x / SPAN_X + 0.5) * self.width as f32).round() as i64
    }

    fn to_pixel_y(&self, z: f32) -> i64 {
        ((z / SPAN_Z + 0.5) * self.height as f32).round() as i64
    }

    /// Fill the rectangle between two corners, at least one pixel thick
    fn fill(&mut self, x0: f32, z0: f32, x1: f32, z1: f32, color: [u8; 3]) {
        let (px0, px1) = (self.to_pixel_x(x0), self.to_pixel_x(x1).max(self.to_pixel_x(x0) + 1));
        let (py0, py1) = (self.to_pixel_y(z0), self.to_pixel_y(z1).max(self.to_pixel_y(z0) + 1));

        let (x0, x1) = (self.clamp_x(px0), self.clamp_x(px1));
        let (y0, y1) = (self.clamp_y(py0), self.clamp_y(py1));

        for y in y0..y1 {
            for x in x0..x1 {
                let i = ((y * self.width + x) * 4) as usize;
                self.data[i..i + 3].copy_from_slice(&color);
            }
        }
    }

    fn clamp_x(&self, p: i64) -> u32 {
        p.clamp(0, self.width as i64) as u32
    }

    fn clamp_y(&self, p: i64) -> u32 {
        p.clamp(0, self.height as i64) as u32
    }

    fn into_texture(self) -> TextureData {
        TextureData {
            width: self.width,
            height: self.height,
            data: self.data,
        }
    }
}
