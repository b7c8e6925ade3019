pub mod gltf;
pub mod texture;

pub use self::gltf::load_paddle_mesh;
pub use texture::{load_texture, TextureData};
