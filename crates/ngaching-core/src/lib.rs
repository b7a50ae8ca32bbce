pub mod blend;
pub mod camera;
pub mod config;
pub mod constants;
pub mod controller;
pub mod layout;
pub mod palette;
pub mod scene;
pub mod sensor;
pub mod state;

pub use blend::*;
pub use camera::*;
pub use config::*;
pub use constants::*;
pub use controller::*;
pub use layout::*;
pub use scene::*;
pub use sensor::*;
pub use state::*;

// Shaders bundled as string constants
pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
