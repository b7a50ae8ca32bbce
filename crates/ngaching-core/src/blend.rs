//! Per-frame blending of every population between its chaos and target
//! positions, plus class-specific secondary motion.
//!
//! All populations use the same eased progress so they morph in lockstep.
//! Each function recomputes its output from static data; nothing accumulates
//! between frames.

use crate::constants::*;
use crate::layout::{Layouts, Population};
use crate::palette;
use crate::state::AnimationState;
use glam::{EulerRot, Quat, Vec3};
use std::f32::consts::{PI, TAU};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InstanceTransform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: f32,
}

impl Default for InstanceTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: 1.0,
        }
    }
}

/// Cubic ease-out: `1 - (1 - p)^3`, with `p` clamped to \[0, 1\].
#[inline]
pub fn ease_out_cubic(progress: f32) -> f32 {
    let inv = 1.0 - progress.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

#[inline]
fn pairs(pop: &Population) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
    pop.chaos.iter().copied().zip(pop.target.iter().copied())
}

/// Foliage sways sideways as it forms and shimmers between emerald and gold.
/// `shade` receives the lit particle color.
pub fn blend_foliage(
    pop: &Population,
    progress: f32,
    time: f32,
    out: &mut [InstanceTransform],
    shade: &mut [[f32; 3]],
) {
    let t = ease_out_cubic(progress);
    let attrs = pop.scale.iter().zip(&pop.phase).zip(&pop.color);
    for (((o, s), (chaos, target)), ((size, phase), base)) in out
        .iter_mut()
        .zip(shade.iter_mut())
        .zip(pairs(pop))
        .zip(attrs)
    {
        let mut pos = chaos.lerp(target, t);
        let lit_y = pos.y;
        pos.x += (time * FOLIAGE_SWAY_FREQ + pos.y).sin() * FOLIAGE_SWAY_AMPLITUDE * t;
        *o = InstanceTransform {
            position: pos,
            rotation: Quat::IDENTITY,
            scale: *size,
        };

        let shimmer = (time * FOLIAGE_SHIMMER_FREQ + phase * FOLIAGE_SHIMMER_PHASE_SCALE).sin()
            * 0.5
            + 0.5;
        let light = (lit_y / 20.0 + 0.5).clamp(0.4, 1.0);
        *s = palette::scale(
            palette::mix(*base, palette::GOLD, shimmer * FOLIAGE_HIGHLIGHT_MIX),
            light,
        );
    }
}

/// Ornaments bob while mostly scattered, grow as they settle and turn with
/// the eased progress.
pub fn blend_ornaments(pop: &Population, progress: f32, time: f32, out: &mut [InstanceTransform]) {
    let t = ease_out_cubic(progress);
    let wobble = progress < ORNAMENT_WOBBLE_BELOW;
    let rotation = Quat::from_euler(EulerRot::XYZ, t * TAU, t * PI, 0.0);
    for (i, ((o, (chaos, target)), base)) in
        out.iter_mut().zip(pairs(pop)).zip(&pop.scale).enumerate()
    {
        let mut pos = chaos.lerp(target, t);
        if wobble {
            pos.y += (time + i as f32).sin() * ORNAMENT_WOBBLE_AMPLITUDE;
        }
        *o = InstanceTransform {
            position: pos,
            rotation,
            scale: base * (0.5 + 0.5 * t),
        };
    }
}

/// Gifts spin slowly about the vertical axis, each offset by its index.
pub fn blend_gifts(pop: &Population, progress: f32, time: f32, out: &mut [InstanceTransform]) {
    let t = ease_out_cubic(progress);
    for (i, ((o, (chaos, target)), scale)) in
        out.iter_mut().zip(pairs(pop)).zip(&pop.scale).enumerate()
    {
        *o = InstanceTransform {
            position: chaos.lerp(target, t),
            rotation: Quat::from_rotation_y(time * GIFT_SPIN_RATE + i as f32),
            scale: *scale,
        };
    }
}

/// Photos line up with the tree axis once nearly formed, back toward the trunk
/// and front (+Z) facing out; otherwise they tumble about X and Y at their own
/// rate.
pub fn blend_photos(pop: &Population, progress: f32, time: f32, out: &mut [InstanceTransform]) {
    let t = ease_out_cubic(progress);
    let facing = progress > PHOTO_FACE_CENTER_ABOVE;
    for ((o, (chaos, target)), (scale, spin)) in out
        .iter_mut()
        .zip(pairs(pop))
        .zip(pop.scale.iter().zip(&pop.spin))
    {
        let position = chaos.lerp(target, t);
        let rotation = if facing {
            Quat::from_rotation_y(position.x.atan2(position.z))
        } else {
            let a = time * spin;
            Quat::from_euler(EulerRot::XYZ, a, a, 0.0)
        };
        *o = InstanceTransform {
            position,
            rotation,
            scale: *scale,
        };
    }
}

/// Reusable per-frame output buffers, one per population.
#[derive(Clone, Debug, Default)]
pub struct BlendOutput {
    pub eased_progress: f32,
    pub foliage: Vec<InstanceTransform>,
    pub foliage_shade: Vec<[f32; 3]>,
    pub ornaments: Vec<InstanceTransform>,
    pub gifts: Vec<InstanceTransform>,
    pub photos: Vec<InstanceTransform>,
}

pub struct Blender {
    output: BlendOutput,
}

impl Blender {
    pub fn new(layouts: &Layouts) -> Self {
        let mut blender = Self {
            output: BlendOutput::default(),
        };
        blender.fit(layouts);
        blender
    }

    fn fit(&mut self, layouts: &Layouts) {
        let o = &mut self.output;
        o.foliage.resize(layouts.foliage.len(), InstanceTransform::default());
        o.foliage_shade.resize(layouts.foliage.len(), palette::EMERALD);
        o.ornaments.resize(layouts.ornaments.len(), InstanceTransform::default());
        o.gifts.resize(layouts.gifts.len(), InstanceTransform::default());
        o.photos.resize(layouts.photos.len(), InstanceTransform::default());
    }

    pub fn output(&self) -> &BlendOutput {
        &self.output
    }

    pub fn blend(&mut self, layouts: &Layouts, state: &AnimationState, time: f32) -> &BlendOutput {
        self.fit(layouts);
        let p = state.progress;
        let o = &mut self.output;
        o.eased_progress = ease_out_cubic(p);
        blend_foliage(&layouts.foliage, p, time, &mut o.foliage, &mut o.foliage_shade);
        blend_ornaments(&layouts.ornaments, p, time, &mut o.ornaments);
        blend_gifts(&layouts.gifts, p, time, &mut o.gifts);
        blend_photos(&layouts.photos, p, time, &mut o.photos);
        &self.output
    }
}
