use ngaching_core::{MotionSignal, Scene};

/// Keyboard/pointer stand-in for the webcam on desktop.
///
/// Holding Space keeps the tree scattered; dragging with the left button
/// reports the cursor column as the motion centroid so the camera orbits.
#[derive(Default)]
pub struct SimulatedMotion {
    cursor_u: f32,
    dragging: bool,
    chaos_held: bool,
    released: bool,
}

impl SimulatedMotion {
    pub fn cursor_moved(&mut self, u: f32) {
        self.cursor_u = u.clamp(0.0, 1.0);
    }

    pub fn set_dragging(&mut self, down: bool) {
        if self.dragging && !down {
            self.released = true;
        }
        self.dragging = down;
    }

    pub fn set_chaos_held(&mut self, held: bool) {
        self.chaos_held = held;
    }

    /// Centroid in -1..1 for the current cursor column. Not mirrored: the
    /// pointer already moves the way the user sees it.
    pub fn center_x(&self) -> f32 {
        (self.cursor_u - 0.5) * 2.0
    }

    pub fn apply(&mut self, scene: &mut Scene) {
        scene.set_simulated_chaos(self.chaos_held);
        if self.dragging {
            scene.push_motion(MotionSignal::new(0.0, self.center_x()));
        } else if std::mem::take(&mut self.released) {
            scene.push_motion(MotionSignal::default());
        }
    }
}

/// Logs UI gate changes so the desktop build shows what the web overlay would.
#[derive(Default)]
pub struct GateLog {
    blessing: bool,
    chaos_hint: bool,
}

impl GateLog {
    pub fn update(&mut self, blessing: bool, chaos_hint: bool) {
        if blessing != self.blessing {
            log::info!("[ui] blessing {}", if blessing { "available" } else { "hidden" });
            self.blessing = blessing;
        }
        if chaos_hint != self.chaos_hint {
            log::info!("[ui] chaos hint {}", if chaos_hint { "shown" } else { "hidden" });
            self.chaos_hint = chaos_hint;
        }
    }
}
