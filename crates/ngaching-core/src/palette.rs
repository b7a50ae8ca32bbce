//! Linear RGB palette for the tree populations.

pub const EMERALD: [f32; 3] = [0.0, 0.259, 0.145]; // #004225
pub const GOLD: [f32; 3] = [1.0, 0.843, 0.0]; // #FFD700
pub const CHAMPAGNE: [f32; 3] = [0.969, 0.906, 0.808]; // #F7E7CE
pub const SILVER: [f32; 3] = [0.753, 0.753, 0.753]; // #C0C0C0
pub const RED_VELVET: [f32; 3] = [0.502, 0.0, 0.125]; // #800020
pub const RICH_BLACK: [f32; 3] = [0.008, 0.016, 0.012]; // #020403
pub const CARD_WHITE: [f32; 3] = [1.0, 1.0, 1.0];

#[inline]
pub fn mix(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

#[inline]
pub fn scale(c: [f32; 3], k: f32) -> [f32; 3] {
    [c[0] * k, c[1] * k, c[2] * k]
}
