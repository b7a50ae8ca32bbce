use std::time::Instant;

use winit::{
    event::*,
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

use ngaching_core::{Scene, SceneConfig};
use ngaching_render::GpuState;

mod input;

use input::{GateLog, SimulatedMotion};

/// `NGACHING_SEED` pins the layout; otherwise every launch grows a new tree.
fn scene_seed() -> u64 {
    std::env::var("NGACHING_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(rand::random)
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut scene = Scene::new(SceneConfig::default(), scene_seed())?;

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("NgaChing (native)")
        .build(&event_loop)?;
    let window = &window;

    let size = window.inner_size();
    let mut gpu = pollster::block_on(GpuState::new(window, size.width, size.height))?;
    let mut motion = SimulatedMotion::default();
    let mut gates = GateLog::default();
    let start = Instant::now();
    log::info!("[native] hold Space to scatter, drag with the left button to orbit");

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::Resized(size) => gpu.resize(size.width, size.height),
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        ..
                    },
                ..
            } => match code {
                KeyCode::Space => motion.set_chaos_held(state == ElementState::Pressed),
                KeyCode::Escape => elwt.exit(),
                _ => {}
            },
            WindowEvent::CursorMoved { position, .. } => {
                let (width, _) = gpu.size();
                motion.cursor_moved(position.x as f32 / width.max(1) as f32);
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => motion.set_dragging(state == ElementState::Pressed),
            _ => {}
        },
        Event::AboutToWait => {
            motion.apply(&mut scene);
            scene.tick(start.elapsed().as_secs_f32());
            let frame = scene.frame();
            gates.update(frame.show_blessing(), frame.show_chaos_hint());
            let camera = scene.rig().camera(gpu.aspect());
            match gpu.render(&frame, &camera) {
                Ok(_) => window.request_redraw(),
                Err(wgpu::SurfaceError::Lost) => gpu.reconfigure(),
                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                Err(_) => {}
            }
        }
        _ => {}
    })?;
    Ok(())
}
