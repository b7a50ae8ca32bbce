//! The scene context: populations, controller, blender and camera rig owned
//! together and advanced once per render tick.

use crate::blend::{BlendOutput, Blender, InstanceTransform};
use crate::camera::CameraRig;
use crate::config::{ConfigError, SceneConfig};
use crate::constants::{BLESSING_PROGRESS, CHAOS_HINT_PROGRESS};
use crate::controller::{Controller, ControllerParams};
use crate::layout::{Layouts, Population};
use crate::sensor::MotionSignal;
use crate::state::AnimationState;
use glam::Vec3;

pub struct Scene {
    config: SceneConfig,
    layouts: Layouts,
    controller: Controller,
    blender: Blender,
    rig: CameraRig,
}

impl Scene {
    pub fn new(config: SceneConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let layouts = Layouts::generate(&config, seed);
        log::info!(
            "[scene] seed={seed:#x} foliage={} ornaments={} gifts={} photos={} total={}",
            layouts.foliage.len(),
            layouts.ornaments.len(),
            layouts.gifts.len(),
            layouts.photos.len(),
            layouts.total()
        );
        let controller = Controller::with_params(ControllerParams {
            trigger_threshold: config.trigger_chaos_threshold,
            ..ControllerParams::default()
        });
        let blender = Blender::new(&layouts);
        Ok(Self {
            config,
            layouts,
            controller,
            blender,
            rig: CameraRig::default(),
        })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn layouts(&self) -> &Layouts {
        &self.layouts
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    /// Sensor push callback; the signal stays cached until the next sample.
    pub fn push_motion(&mut self, signal: MotionSignal) {
        self.controller.push_signal(signal);
    }

    pub fn set_simulated_chaos(&mut self, active: bool) {
        self.controller.set_simulated_chaos(active);
    }

    /// Advance one render tick. `time_sec` is the elapsed animation time used
    /// by the secondary motion only; the controller counts ticks.
    pub fn tick(&mut self, time_sec: f32) -> SceneFrame<'_> {
        let state = self.controller.tick();
        self.blender.blend(&self.layouts, &state, time_sec);
        self.rig.update(state.rotation);
        self.frame()
    }

    /// Read-only view of the most recent tick.
    pub fn frame(&self) -> SceneFrame<'_> {
        SceneFrame {
            state: self.controller.state(),
            camera_position: self.rig.position(),
            blend: self.blender.output(),
            layouts: &self.layouts,
        }
    }
}

/// Everything a renderer or UI needs from one tick.
#[derive(Clone, Copy)]
pub struct SceneFrame<'a> {
    pub state: AnimationState,
    pub camera_position: Vec3,
    pub blend: &'a BlendOutput,
    pub layouts: &'a Layouts,
}

impl<'a> SceneFrame<'a> {
    pub fn eased_progress(&self) -> f32 {
        self.blend.eased_progress
    }

    /// The blessing affordance appears only once the tree is nearly whole.
    pub fn show_blessing(&self) -> bool {
        self.state.progress > BLESSING_PROGRESS
    }

    pub fn show_chaos_hint(&self) -> bool {
        self.state.progress < CHAOS_HINT_PROGRESS
    }

    /// Transforms paired with their population's static data, in draw order.
    pub fn batches(&self) -> [(&'a Population, &'a [InstanceTransform]); 4] {
        let (layouts, blend) = (self.layouts, self.blend);
        [
            (&layouts.foliage, blend.foliage.as_slice()),
            (&layouts.ornaments, blend.ornaments.as_slice()),
            (&layouts.gifts, blend.gifts.as_slice()),
            (&layouts.photos, blend.photos.as_slice()),
        ]
    }
}
