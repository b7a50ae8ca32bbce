// Shared tuning constants used by the core and both frontends.

// Tree shape (world units)
pub const TREE_HEIGHT: f32 = 18.0;
pub const TREE_RADIUS: f32 = 7.0;

// Population sizes
pub const PARTICLE_COUNT: usize = 2500;
pub const ORNAMENT_COUNT: usize = 150;
pub const GIFT_COUNT: usize = 40;
pub const PHOTO_COUNT: usize = 20;

// Motion sensing
pub const CAPTURE_WIDTH: u32 = 320; // requested webcam resolution
pub const CAPTURE_HEIGHT: u32 = 240;
pub const SENSOR_WIDTH: u32 = 64; // downsampled analysis resolution
pub const SENSOR_HEIGHT: u32 = 48;
pub const MOTION_THRESHOLD: u8 = 15; // per-channel diff; a pixel changes above 3x this summed
pub const MOTION_SENSITIVITY: f32 = 0.1; // fraction of changed pixels that saturates the score

// Mode & progress controller
pub const TRIGGER_CHAOS_THRESHOLD: f32 = 0.25; // score above this is chaos
pub const CHAOS_RATE_PER_TICK: f32 = 0.05; // fast collapse
pub const FORM_RATE_PER_TICK: f32 = 0.02; // slow reform
pub const ROTATION_DEAD_ZONE: f32 = 0.2; // |center_x| at or below this is ignored
pub const ROTATION_GAIN: f32 = 0.05;
pub const ROTATION_SMOOTHING: f32 = 0.1;

// Layout shape parameters
pub const FOLIAGE_CHAOS_RADIUS_FACTOR: f32 = 1.5; // chaos sphere radius = factor * TREE_HEIGHT
pub const ORNAMENT_INSET: f32 = 0.9;
pub const ORNAMENT_CHAOS_RADIUS_MIN: f32 = 15.0;
pub const ORNAMENT_CHAOS_RADIUS_MAX: f32 = 25.0;
pub const GIFT_RING_RADIUS_MIN: f32 = 2.0;
pub const GIFT_RING_RADIUS_MAX: f32 = 6.0;
pub const GIFT_BASE_DROP: f32 = 0.5; // gifts sit this far below the cone base
pub const GIFT_CHAOS_RADIUS: f32 = 20.0;
pub const PHOTO_SPIRAL_HEIGHT_FACTOR: f32 = 0.8;
pub const PHOTO_SPIRAL_STEP: f32 = 1.5; // radians per photo
pub const PHOTO_RADIUS_OFFSET: f32 = 0.5;
pub const PHOTO_CHAOS_RADIUS: f32 = 12.0;
pub const PHOTO_TUMBLE_MAX: f32 = 0.5;

// Secondary motion
pub const FOLIAGE_SWAY_AMPLITUDE: f32 = 0.1;
pub const FOLIAGE_SWAY_FREQ: f32 = 2.0;
pub const FOLIAGE_SHIMMER_FREQ: f32 = 5.0;
pub const FOLIAGE_SHIMMER_PHASE_SCALE: f32 = 100.0;
pub const FOLIAGE_HIGHLIGHT_MIX: f32 = 0.3;
pub const ORNAMENT_WOBBLE_AMPLITUDE: f32 = 0.02;
pub const ORNAMENT_WOBBLE_BELOW: f32 = 0.5; // wobble only while progress is under this
pub const GIFT_SPIN_RATE: f32 = 0.1; // radians per second
pub const PHOTO_FACE_CENTER_ABOVE: f32 = 0.8;

// Camera
pub const CAMERA_POS: [f32; 3] = [0.0, 4.0, 22.0];
pub const CAMERA_ORBIT_RADIUS: f32 = 22.0;
pub const CAMERA_HEIGHT: f32 = 4.0;
pub const CAMERA_ANGLE_SCALE: f32 = 2.0; // orbit angle = rotation * scale
pub const CAMERA_SMOOTHING: f32 = 0.05;
pub const CAMERA_FOV_DEG: f32 = 50.0;

// UI gating
pub const BLESSING_PROGRESS: f32 = 0.9;
pub const CHAOS_HINT_PROGRESS: f32 = 0.5;
