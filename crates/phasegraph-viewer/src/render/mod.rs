pub mod camera;
pub mod spatial;

pub use camera::{apply_zoom, setup_scene};
pub use spatial::draw_frame;
