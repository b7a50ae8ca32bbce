use crate::constants::*;
use thiserror::Error;

/// Startup configuration consumed by the layout generators and the controller.
///
/// Fields mirror the constants in [`crate::constants`]; `Default` yields the
/// installation's tuned values. Nothing here is mutated after the scene starts.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub tree_height: f32,
    pub tree_radius: f32,
    pub particle_count: usize,
    pub ornament_count: usize,
    pub gift_count: usize,
    pub photo_count: usize,
    /// Per-channel pixel difference; a pixel counts as changed when the summed
    /// RGB difference exceeds three times this value.
    pub motion_threshold: u8,
    /// Motion score above which the tree scatters.
    pub trigger_chaos_threshold: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            tree_height: TREE_HEIGHT,
            tree_radius: TREE_RADIUS,
            particle_count: PARTICLE_COUNT,
            ornament_count: ORNAMENT_COUNT,
            gift_count: GIFT_COUNT,
            photo_count: PHOTO_COUNT,
            motion_threshold: MOTION_THRESHOLD,
            trigger_chaos_threshold: TRIGGER_CHAOS_THRESHOLD,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("tree dimensions must be positive and finite (height={height}, radius={radius})")]
    TreeShape { height: f32, radius: f32 },
    #[error("chaos trigger threshold {0} is outside [0, 1]")]
    TriggerThreshold(f32),
}

impl SceneConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let shape_ok = self.tree_height.is_finite()
            && self.tree_radius.is_finite()
            && self.tree_height > 0.0
            && self.tree_radius > 0.0;
        if !shape_ok {
            return Err(ConfigError::TreeShape {
                height: self.tree_height,
                radius: self.tree_radius,
            });
        }
        if !(0.0..=1.0).contains(&self.trigger_chaos_threshold) {
            return Err(ConfigError::TriggerThreshold(self.trigger_chaos_threshold));
        }
        Ok(())
    }

    pub fn total_instances(&self) -> usize {
        self.particle_count + self.ornament_count + self.gift_count + self.photo_count
    }
}
