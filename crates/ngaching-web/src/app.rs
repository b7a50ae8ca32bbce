use instant::Instant;
use ngaching_core::{MotionSensor, Scene, SceneConfig, SensorParams};
use ngaching_render::GpuState;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

use crate::capture::Capture;
use crate::dom;
use crate::frame::{AnimationLoop, FrameContext};
use crate::session::CameraSlot;
use crate::ui;

const ENABLE_CAMERA_ID: &str = "enable-camera";
const SIMULATE_CHAOS_ID: &str = "simulate-chaos";

/// Handles kept alive for the page's lifetime, released by [`shutdown`].
struct App {
    animation: AnimationLoop,
    camera: Rc<CameraSlot<Capture>>,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("ngaching-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Stop the render loop and release the camera.
#[wasm_bindgen]
pub fn shutdown() {
    if let Some(app) = APP.with(|slot| slot.borrow_mut().take()) {
        app.animation.stop();
        // also covers a permission prompt still open
        app.camera.close();
        log::info!("ngaching-web stopped");
    }
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id("app-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #app-canvas"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    dom::track_canvas_size(&canvas);

    let scene = Rc::new(RefCell::new(Scene::new(
        SceneConfig::default(),
        rand::random(),
    )?));
    let sensor_params = SensorParams {
        pixel_threshold: scene.borrow().config().motion_threshold,
        ..SensorParams::default()
    };
    let sensor = Rc::new(RefCell::new(MotionSensor::new(sensor_params)));
    let camera: Rc<CameraSlot<Capture>> = Rc::new(CameraSlot::default());

    // The overlay starts hidden until the first tick decides
    dom::set_visible(&document, ui::BLESSING_ID, false);
    dom::set_visible(&document, ui::CHAOS_HINT_ID, false);

    {
        let scene = scene.clone();
        dom::add_hover_listener(&document, SIMULATE_CHAOS_ID, move |hovering| {
            scene.borrow_mut().set_simulated_chaos(hovering)
        });
    }
    wire_enable_camera(&document, sensor.clone(), camera.clone());

    let gpu = match GpuState::new(
        wgpu::SurfaceTarget::Canvas(canvas.clone()),
        canvas.width(),
        canvas.height(),
    )
    .await
    {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    };

    let frame_ctx = Rc::new(RefCell::new(FrameContext {
        scene,
        sensor,
        camera: camera.clone(),
        gpu,
        canvas,
        document,
        gates: ui::UiGates::default(),
        start: Instant::now(),
    }));
    let animation = AnimationLoop::start(frame_ctx);
    APP.with(|slot| *slot.borrow_mut() = Some(App { animation, camera }));
    Ok(())
}

/// `#enable-camera` asks for the webcam once. A refusal disables sensing for
/// the rest of the session and the tree stays formed.
fn wire_enable_camera(
    document: &web::Document,
    sensor: Rc<RefCell<MotionSensor>>,
    camera: Rc<CameraSlot<Capture>>,
) {
    static REQUESTED: AtomicBool = AtomicBool::new(false);
    let doc = document.clone();
    dom::add_listener(document, ENABLE_CAMERA_ID, "click", move || {
        if camera.is_closed() {
            return;
        }
        if REQUESTED.swap(true, Ordering::SeqCst) {
            log::warn!("[capture] camera already requested; ignoring extra click");
            return;
        }
        let (doc, sensor, camera) = (doc.clone(), sensor.clone(), camera.clone());
        dom::set_visible(&doc, ENABLE_CAMERA_ID, false);
        spawn_local(async move {
            match Capture::open(&doc).await {
                Ok(cam) => {
                    if camera.install(cam) {
                        sensor.borrow_mut().activate();
                    } else {
                        log::info!("[capture] camera granted after shutdown; released");
                    }
                }
                Err(e) => {
                    log::error!("[capture] camera unavailable: {:?}", e);
                    sensor.borrow_mut().disable("camera unavailable");
                }
            }
        });
    });
}
