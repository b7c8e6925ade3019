mod court;
mod paddle;

pub use court::{court_texture, ground_mesh, COURT_DEPTH, COURT_LIFT, COURT_WIDTH, FLOOR_SIZE};
pub use paddle::procedural_paddle;
