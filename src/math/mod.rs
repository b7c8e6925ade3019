mod aabb;
mod color;

pub use aabb::AABB;
pub use color::{hsv_to_rgb, srgb_to_linear, to_rgb8};
