use crate::capture::Capture;
use crate::session::CameraSlot;
use crate::ui::UiGates;
use instant::Instant;
use ngaching_core::{MotionSensor, Scene};
use ngaching_render::GpuState;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub scene: Rc<RefCell<Scene>>,
    pub sensor: Rc<RefCell<MotionSensor>>,
    pub camera: Rc<CameraSlot<Capture>>,
    pub gpu: Option<GpuState<'static>>,
    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,
    pub gates: UiGates,
    pub start: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let sampled = self
            .camera
            .with(|capture| capture.sample(&mut self.sensor.borrow_mut()));
        match sampled {
            Some(Ok(Some(signal))) => self.scene.borrow_mut().push_motion(signal),
            Some(Ok(None)) | None => {}
            // keep the cached signal and try again next tick
            Some(Err(e)) => log::debug!("[sensor] frame skipped: {e:?}"),
        }

        let mut scene = self.scene.borrow_mut();
        scene.tick(self.start.elapsed().as_secs_f32());
        let frame = scene.frame();
        self.gates.apply(&self.document, &frame);

        if let Some(gpu) = self.gpu.as_mut() {
            gpu.resize(self.canvas.width(), self.canvas.height());
            let camera = scene.rig().camera(gpu.aspect());
            match gpu.render(&frame, &camera) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu.reconfigure(),
                Err(e) => log::warn!("[render] frame dropped: {e:?}"),
            }
        }
    }
}

type TickClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Owns the requestAnimationFrame chain driving a [`FrameContext`].
pub struct AnimationLoop {
    tick: TickClosure,
    pending: Rc<Cell<Option<i32>>>,
}

impl AnimationLoop {
    pub fn start(frame_ctx: Rc<RefCell<FrameContext>>) -> Self {
        let tick: TickClosure = Rc::new(RefCell::new(None));
        let pending = Rc::new(Cell::new(None));
        let tick_clone = tick.clone();
        let pending_clone = pending.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            frame_ctx.borrow_mut().frame();
            pending_clone.set(request_frame(&tick_clone));
        }) as Box<dyn FnMut()>));
        pending.set(request_frame(&tick));
        Self { tick, pending }
    }

    pub fn is_running(&self) -> bool {
        self.tick.borrow().is_some()
    }

    /// Cancel the pending frame and drop the tick closure, which releases the
    /// frame context it captured.
    pub fn stop(&self) {
        if let (Some(id), Some(w)) = (self.pending.take(), web::window()) {
            let _ = w.cancel_animation_frame(id);
        }
        self.tick.borrow_mut().take();
    }
}

fn request_frame(tick: &TickClosure) -> Option<i32> {
    let window = web::window()?;
    let tick = tick.borrow();
    let closure = tick.as_ref()?;
    window
        .request_animation_frame(closure.as_ref().unchecked_ref())
        .ok()
}
