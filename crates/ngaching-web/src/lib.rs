//! Browser front-end: webcam motion drives the tree, WebGPU draws it.

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod session;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod capture;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod frame;
#[cfg(target_arch = "wasm32")]
mod ui;

#[cfg(target_arch = "wasm32")]
pub use app::{shutdown, start};
