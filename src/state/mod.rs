pub mod camera;
pub mod picking;
pub mod tracker;

pub use camera::Camera;
pub use picking::{SurfaceRect, pick_at};
pub use tracker::TrackerSim;
