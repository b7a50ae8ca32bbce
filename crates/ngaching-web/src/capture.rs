//! Webcam acquisition and per-tick frame grabbing.
//!
//! The camera stream plays into a `<video>` element (the page's
//! `#camera-preview` when it has one, otherwise a detached element). Each tick
//! the current video frame is drawn into an offscreen canvas at capture
//! resolution, box-averaged down to the sensor resolution and handed to the
//! [`MotionSensor`].

use ngaching_core::{
    downsample, MotionSensor, MotionSignal, VideoFrame, CAPTURE_HEIGHT, CAPTURE_WIDTH,
};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

use crate::dom::js_err;
use crate::session::{Release, ReleaseGuard};

/// `HTMLMediaElement.HAVE_ENOUGH_DATA`
const HAVE_ENOUGH_DATA: u16 = 4;

pub struct Capture {
    video: web::HtmlVideoElement,
    stream: web::MediaStream,
    ctx: web::CanvasRenderingContext2d,
}

impl Capture {
    /// Ask for the camera and start playback.
    pub async fn open(document: &web::Document) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let devices = window.navigator().media_devices().map_err(js_err)?;

        let video_constraints = js_sys::Object::new();
        js_sys::Reflect::set(&video_constraints, &"width".into(), &CAPTURE_WIDTH.into())
            .map_err(js_err)?;
        js_sys::Reflect::set(&video_constraints, &"height".into(), &CAPTURE_HEIGHT.into())
            .map_err(js_err)?;
        let constraints = web::MediaStreamConstraints::new();
        constraints.set_video(&video_constraints);
        constraints.set_audio(&JsValue::FALSE);

        let promise = devices
            .get_user_media_with_constraints(&constraints)
            .map_err(js_err)?;
        let stream: web::MediaStream = JsFuture::from(promise)
            .await
            .map_err(js_err)?
            .dyn_into()
            .map_err(js_err)?;
        // the camera is live from here on; any failure below switches it off
        let guard = ReleaseGuard::new(&stream);

        let video = match document
            .get_element_by_id("camera-preview")
            .and_then(|el| el.dyn_into::<web::HtmlVideoElement>().ok())
        {
            Some(v) => v,
            None => document
                .create_element("video")
                .map_err(js_err)?
                .dyn_into::<web::HtmlVideoElement>()
                .map_err(js_err)?,
        };
        video.set_muted(true);
        video.set_autoplay(true);
        let _ = video.set_attribute("playsinline", "");
        video.set_src_object(Some(&stream));
        JsFuture::from(video.play().map_err(js_err)?)
            .await
            .map_err(js_err)?;

        let canvas = document
            .create_element("canvas")
            .map_err(js_err)?
            .dyn_into::<web::HtmlCanvasElement>()
            .map_err(js_err)?;
        canvas.set_width(CAPTURE_WIDTH);
        canvas.set_height(CAPTURE_HEIGHT);
        let ctx = canvas
            .get_context("2d")
            .map_err(js_err)?
            .ok_or_else(|| anyhow::anyhow!("no 2d context for sampling canvas"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(js_err)?;

        guard.disarm();
        log::info!("[capture] streaming at {}x{}", CAPTURE_WIDTH, CAPTURE_HEIGHT);
        Ok(Self { video, stream, ctx })
    }

    /// Grab the current video frame and run it through the sensor. `Ok(None)`
    /// while the video has no frame yet or the sensor is not active.
    pub fn sample(&self, sensor: &mut MotionSensor) -> anyhow::Result<Option<MotionSignal>> {
        if self.video.ready_state() != HAVE_ENOUGH_DATA {
            return Ok(None);
        }
        let (w, h) = (CAPTURE_WIDTH as f64, CAPTURE_HEIGHT as f64);
        self.ctx
            .draw_image_with_html_video_element_and_dw_and_dh(&self.video, 0.0, 0.0, w, h)
            .map_err(js_err)?;
        let pixels = self.ctx.get_image_data(0.0, 0.0, w, h).map_err(js_err)?.data();
        let (sw, sh) = (sensor.params().width, sensor.params().height);
        let small = downsample(VideoFrame::new(CAPTURE_WIDTH, CAPTURE_HEIGHT, &pixels.0), sw, sh)?;
        Ok(sensor.sample(VideoFrame::new(sw, sh, &small))?)
    }

    /// Stop every track of the stream and detach it from the video element.
    pub fn stop(&self) {
        self.stream.release();
        self.video.set_src_object(None);
        log::info!("[capture] stopped");
    }
}

impl Release for web::MediaStream {
    fn release(&self) {
        for track in self.get_tracks().iter() {
            if let Ok(track) = track.dyn_into::<web::MediaStreamTrack>() {
                track.stop();
            }
        }
    }
}

impl Release for Capture {
    fn release(&self) {
        self.stop();
    }
}
