//! Procedural placement for the four object populations.
//!
//! Each generator produces, per instance, a chaotic position, a formed
//! (target) position and decorative attributes. Output depends only on the
//! configuration and the RNG stream, so a seeded RNG reproduces a layout
//! exactly.

use crate::config::SceneConfig;
use crate::constants::*;
use crate::palette;
use glam::Vec3;
use rand::prelude::*;
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PopulationKind {
    Foliage,
    Ornament,
    Gift,
    Photo,
}

impl PopulationKind {
    pub const ALL: [PopulationKind; 4] = [
        PopulationKind::Foliage,
        PopulationKind::Ornament,
        PopulationKind::Gift,
        PopulationKind::Photo,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PopulationKind::Foliage => "foliage",
            PopulationKind::Ornament => "ornaments",
            PopulationKind::Gift => "gifts",
            PopulationKind::Photo => "photos",
        }
    }
}

/// Static per-instance data stored as parallel arrays indexed by instance id.
///
/// `phase` is only meaningful for foliage (shimmer offset) and `spin` only for
/// photos (tumble rate); other kinds hold zeros there.
#[derive(Clone, Debug, PartialEq)]
pub struct Population {
    pub kind: PopulationKind,
    pub chaos: Vec<Vec3>,
    pub target: Vec<Vec3>,
    pub color: Vec<[f32; 3]>,
    pub scale: Vec<f32>,
    pub phase: Vec<f32>,
    pub spin: Vec<f32>,
}

impl Population {
    pub fn with_capacity(kind: PopulationKind, n: usize) -> Self {
        Self {
            kind,
            chaos: Vec::with_capacity(n),
            target: Vec::with_capacity(n),
            color: Vec::with_capacity(n),
            scale: Vec::with_capacity(n),
            phase: Vec::with_capacity(n),
            spin: Vec::with_capacity(n),
        }
    }

    fn push(&mut self, chaos: Vec3, target: Vec3, color: [f32; 3], scale: f32) -> &mut Self {
        self.chaos.push(chaos);
        self.target.push(target);
        self.color.push(color);
        self.scale.push(scale);
        self.phase.push(0.0);
        self.spin.push(0.0);
        self
    }

    fn set_last_phase(&mut self, phase: f32) {
        if let Some(p) = self.phase.last_mut() {
            *p = phase;
        }
    }

    fn set_last_spin(&mut self, spin: f32) {
        if let Some(s) = self.spin.last_mut() {
            *s = spin;
        }
    }

    pub fn len(&self) -> usize {
        self.target.len()
    }

    pub fn is_empty(&self) -> bool {
        self.target.is_empty()
    }
}

/// Radius of the cone surface at height `y`: full `radius` at the base
/// (`y = -height/2`) narrowing to zero at the apex.
#[inline]
pub fn cone_radius_at(y: f32, height: f32, radius: f32) -> f32 {
    ((height / 2.0 - y) / height) * radius
}

/// Uniformly distributed unit vector.
pub fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let theta = rng.gen::<f32>() * TAU;
    let u = rng.gen::<f32>() * 2.0 - 1.0;
    let c = (1.0 - u * u).max(0.0).sqrt();
    Vec3::new(c * theta.cos(), u, c * theta.sin())
}

/// Point uniformly distributed by volume inside a sphere of `radius`.
pub fn random_in_sphere<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vec3 {
    let r = radius * rng.gen::<f32>().cbrt();
    let theta = rng.gen::<f32>() * TAU;
    let phi = (2.0 * rng.gen::<f32>() - 1.0).clamp(-1.0, 1.0).acos();
    Vec3::new(
        r * phi.sin() * theta.cos(),
        r * phi.sin() * theta.sin(),
        r * phi.cos(),
    )
}

fn random_cone_point<R: Rng + ?Sized>(rng: &mut R, height: f32, radius: f32) -> Vec3 {
    let y = (rng.gen::<f32>() - 0.5) * height;
    let r = cone_radius_at(y, height, radius);
    let theta = rng.gen::<f32>() * TAU;
    Vec3::new(r * theta.cos(), y, r * theta.sin())
}

pub fn generate_foliage<R: Rng + ?Sized>(config: &SceneConfig, rng: &mut R) -> Population {
    let h = config.tree_height;
    let mut pop = Population::with_capacity(PopulationKind::Foliage, config.particle_count);
    for _ in 0..config.particle_count {
        let target = random_cone_point(rng, h, config.tree_radius);
        let chaos = random_in_sphere(rng, h * FOLIAGE_CHAOS_RADIUS_FACTOR);
        let phase = rng.gen::<f32>();
        let size = rng.gen::<f32>() * 0.4 + 0.1;
        pop.push(chaos, target, palette::EMERALD, size)
            .set_last_phase(phase);
    }
    pop
}

pub fn generate_ornaments<R: Rng + ?Sized>(config: &SceneConfig, rng: &mut R) -> Population {
    let mut pop = Population::with_capacity(PopulationKind::Ornament, config.ornament_count);
    let span = ORNAMENT_CHAOS_RADIUS_MAX - ORNAMENT_CHAOS_RADIUS_MIN;
    for _ in 0..config.ornament_count {
        let target = random_cone_point(rng, config.tree_height, config.tree_radius * ORNAMENT_INSET);
        let chaos = random_direction(rng) * (ORNAMENT_CHAOS_RADIUS_MIN + rng.gen::<f32>() * span);
        let color = if rng.gen::<f32>() > 0.5 {
            palette::GOLD
        } else {
            palette::RED_VELVET
        };
        let scale = rng.gen::<f32>() * 0.3 + 0.2;
        pop.push(chaos, target, color, scale);
    }
    pop
}

pub fn generate_gifts<R: Rng + ?Sized>(config: &SceneConfig, rng: &mut R) -> Population {
    let mut pop = Population::with_capacity(PopulationKind::Gift, config.gift_count);
    let base_y = -config.tree_height / 2.0 - GIFT_BASE_DROP;
    let span = GIFT_RING_RADIUS_MAX - GIFT_RING_RADIUS_MIN;
    for _ in 0..config.gift_count {
        let r = rng.gen::<f32>() * span + GIFT_RING_RADIUS_MIN;
        let theta = rng.gen::<f32>() * TAU;
        let target = Vec3::new(r * theta.cos(), base_y, r * theta.sin());
        let chaos = random_direction(rng) * GIFT_CHAOS_RADIUS;
        let color = if rng.gen::<f32>() > 0.5 {
            palette::CHAMPAGNE
        } else {
            palette::SILVER
        };
        let scale = rng.gen::<f32>() * 0.5 + 0.4;
        pop.push(chaos, target, color, scale);
    }
    pop
}

/// Photo cards climb the cone in a spiral: height and azimuth both grow with
/// the instance index.
pub fn generate_photos<R: Rng + ?Sized>(config: &SceneConfig, rng: &mut R) -> Population {
    let n = config.photo_count;
    let h = config.tree_height;
    let mut pop = Population::with_capacity(PopulationKind::Photo, n);
    for i in 0..n {
        let y = (i as f32 / n as f32 - 0.5) * h * PHOTO_SPIRAL_HEIGHT_FACTOR;
        let r = cone_radius_at(y, h, config.tree_radius) + PHOTO_RADIUS_OFFSET;
        let theta = i as f32 * PHOTO_SPIRAL_STEP;
        let target = Vec3::new(r * theta.cos(), y, r * theta.sin());
        let chaos = random_direction(rng) * PHOTO_CHAOS_RADIUS;
        let spin = rng.gen::<f32>() * PHOTO_TUMBLE_MAX;
        pop.push(chaos, target, palette::CARD_WHITE, 1.0)
            .set_last_spin(spin);
    }
    pop
}

/// All four populations, generated once at startup.
#[derive(Clone, Debug, PartialEq)]
pub struct Layouts {
    pub foliage: Population,
    pub ornaments: Population,
    pub gifts: Population,
    pub photos: Population,
}

impl Layouts {
    /// Generate every population from one seed. Each population draws from its
    /// own stream, so changing one count leaves the other layouts untouched.
    pub fn generate(config: &SceneConfig, seed: u64) -> Self {
        let mut streams = PopulationKind::ALL.map(|kind| {
            let mix = seed ^ (kind as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
            StdRng::seed_from_u64(mix)
        });
        let [foliage_rng, ornament_rng, gift_rng, photo_rng] = &mut streams;
        Self {
            foliage: generate_foliage(config, foliage_rng),
            ornaments: generate_ornaments(config, ornament_rng),
            gifts: generate_gifts(config, gift_rng),
            photos: generate_photos(config, photo_rng),
        }
    }

    pub fn populations(&self) -> [&Population; 4] {
        [&self.foliage, &self.ornaments, &self.gifts, &self.photos]
    }

    pub fn total(&self) -> usize {
        self.populations().iter().map(|p| p.len()).sum()
    }
}
