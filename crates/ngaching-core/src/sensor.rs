//! Frame-difference motion sensing.
//!
//! A low-resolution RGBA frame is compared against the previous one; the share
//! of significantly changed pixels becomes the motion `score` and their mean
//! column becomes the horizontal centroid `center_x`.

use crate::constants::{MOTION_SENSITIVITY, MOTION_THRESHOLD, SENSOR_HEIGHT, SENSOR_WIDTH};
use thiserror::Error;

/// Per-sample summary of sensed movement.
///
/// - `score`: normalized amount of change, 0..1 (1 once `sensitivity` of the
///   frame has changed)
/// - `center_x`: horizontal centroid of changed pixels in -1..1, already
///   flipped for a mirrored capture; 0 when nothing changed
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MotionSignal {
    pub score: f32,
    pub center_x: f32,
}

impl MotionSignal {
    pub fn new(score: f32, center_x: f32) -> Self {
        Self {
            score: score.clamp(0.0, 1.0),
            center_x: center_x.clamp(-1.0, 1.0),
        }
    }

    pub fn from_diff(
        stats: DiffStats,
        width: u32,
        height: u32,
        sensitivity: f32,
        mirrored: bool,
    ) -> Self {
        let saturation = (width * height) as f32 * sensitivity;
        let score = if saturation > 0.0 {
            (stats.changed as f32 / saturation).min(1.0)
        } else {
            0.0
        };
        let center_x = if stats.changed == 0 || width == 0 {
            0.0
        } else {
            let mean_x = stats.sum_x as f64 / stats.changed as f64;
            let centered = ((mean_x / width as f64) - 0.5) * 2.0;
            if mirrored {
                -centered as f32
            } else {
                centered as f32
            }
        };
        Self::new(score, center_x)
    }
}

/// Changed-pixel count and the sum of their column indices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DiffStats {
    pub changed: u32,
    pub sum_x: u64,
}

/// Borrowed RGBA8 frame.
#[derive(Clone, Copy, Debug)]
pub struct VideoFrame<'a> {
    pub width: u32,
    pub height: u32,
    pub rgba: &'a [u8],
}

impl<'a> VideoFrame<'a> {
    pub fn new(width: u32, height: u32, rgba: &'a [u8]) -> Self {
        Self {
            width,
            height,
            rgba,
        }
    }

    fn check_len(&self) -> Result<(), SensorError> {
        let expected = self.width as usize * self.height as usize * 4;
        if self.rgba.len() != expected {
            return Err(SensorError::BufferLength {
                expected,
                actual: self.rgba.len(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SensorError {
    #[error("frame is {actual:?}, sensor expects {expected:?}")]
    FrameSize {
        expected: (u32, u32),
        actual: (u32, u32),
    },
    #[error("frame buffer holds {actual} bytes, expected {expected}")]
    BufferLength { expected: usize, actual: usize },
}

#[derive(Clone, Debug)]
pub struct SensorParams {
    pub width: u32,
    pub height: u32,
    pub pixel_threshold: u8,
    pub sensitivity: f32,
    /// Webcams usually deliver a mirrored image; flip the centroid back.
    pub mirrored: bool,
}

impl Default for SensorParams {
    fn default() -> Self {
        Self {
            width: SENSOR_WIDTH,
            height: SENSOR_HEIGHT,
            pixel_threshold: MOTION_THRESHOLD,
            sensitivity: MOTION_SENSITIVITY,
            mirrored: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SensorStatus {
    /// Capture not yet authorized.
    Inactive,
    Active,
    /// Capture failed; terminal for the session.
    Disabled,
}

pub struct MotionSensor {
    params: SensorParams,
    status: SensorStatus,
    previous: Option<Vec<u8>>,
}

impl Default for MotionSensor {
    fn default() -> Self {
        Self::new(SensorParams::default())
    }
}

impl MotionSensor {
    pub fn new(params: SensorParams) -> Self {
        Self {
            params,
            status: SensorStatus::Inactive,
            previous: None,
        }
    }

    pub fn params(&self) -> &SensorParams {
        &self.params
    }

    pub fn status(&self) -> SensorStatus {
        self.status
    }

    /// Mark capture as granted. Has no effect once the sensor is disabled.
    pub fn activate(&mut self) {
        match self.status {
            SensorStatus::Disabled => {
                log::warn!("[sensor] activate ignored; sensing disabled for this session")
            }
            SensorStatus::Active => {}
            SensorStatus::Inactive => {
                log::info!(
                    "[sensor] active at {}x{}",
                    self.params.width,
                    self.params.height
                );
                self.status = SensorStatus::Active;
            }
        }
    }

    pub fn disable(&mut self, reason: &str) {
        log::warn!("[sensor] disabled: {reason}");
        self.status = SensorStatus::Disabled;
        self.previous = None;
    }

    /// Forget the stored frame so the next sample starts a new comparison.
    pub fn reset(&mut self) {
        self.previous = None;
    }

    /// Compare `frame` with the previously sampled one.
    ///
    /// Returns `Ok(None)` while the sensor is not active. A frame of the wrong
    /// size is rejected without touching the stored previous frame.
    pub fn sample(&mut self, frame: VideoFrame<'_>) -> Result<Option<MotionSignal>, SensorError> {
        if self.status != SensorStatus::Active {
            return Ok(None);
        }
        let (w, h) = (self.params.width, self.params.height);
        if (frame.width, frame.height) != (w, h) {
            return Err(SensorError::FrameSize {
                expected: (w, h),
                actual: (frame.width, frame.height),
            });
        }
        frame.check_len()?;

        let stats = match self.previous.as_mut() {
            Some(prev) => {
                let stats = frame_difference(prev, frame.rgba, w, self.params.pixel_threshold);
                prev.copy_from_slice(frame.rgba);
                stats
            }
            None => {
                self.previous = Some(frame.rgba.to_vec());
                return Ok(Some(MotionSignal::default()));
            }
        };

        Ok(Some(MotionSignal::from_diff(
            stats,
            w,
            h,
            self.params.sensitivity,
            self.params.mirrored,
        )))
    }
}

#[inline]
fn channel_delta(a: &[u8], b: &[u8]) -> u32 {
    a.iter()
        .zip(b)
        .take(3)
        .map(|(x, y)| (*x as i32 - *y as i32).unsigned_abs())
        .sum()
}

/// Count pixels whose summed RGB difference exceeds `threshold * 3`.
///
/// Both buffers are RGBA8 rows of `width` pixels; alpha is ignored.
pub fn frame_difference(previous: &[u8], current: &[u8], width: u32, threshold: u8) -> DiffStats {
    let limit = threshold as u32 * 3;
    let width = width.max(1) as usize;
    previous
        .chunks_exact(4)
        .zip(current.chunks_exact(4))
        .enumerate()
        .filter(|(_, (p, c))| channel_delta(p, c) > limit)
        .fold(DiffStats::default(), |mut acc, (i, _)| {
            acc.changed += 1;
            acc.sum_x += (i % width) as u64;
            acc
        })
}

/// Box-average an RGBA8 frame down to `width` x `height`.
pub fn downsample(frame: VideoFrame<'_>, width: u32, height: u32) -> Result<Vec<u8>, SensorError> {
    frame.check_len()?;
    let (sw, sh) = (frame.width as usize, frame.height as usize);
    let (dw, dh) = (width as usize, height as usize);
    let mut out = vec![0u8; dw * dh * 4];
    if sw == 0 || sh == 0 {
        return Ok(out);
    }
    for (di, px) in out.chunks_exact_mut(4).enumerate() {
        let (dx, dy) = (di % dw, di / dw);
        let x0 = dx * sw / dw;
        let x1 = ((dx + 1) * sw / dw).max(x0 + 1).min(sw);
        let y0 = dy * sh / dh;
        let y1 = ((dy + 1) * sh / dh).max(y0 + 1).min(sh);
        let mut acc = [0u32; 4];
        for y in y0..y1 {
            let row = &frame.rgba[(y * sw + x0) * 4..(y * sw + x1) * 4];
            for src in row.chunks_exact(4) {
                for (a, s) in acc.iter_mut().zip(src) {
                    *a += *s as u32;
                }
            }
        }
        let n = ((x1 - x0) * (y1 - y0)) as u32;
        for (p, a) in px.iter_mut().zip(acc) {
            *p = (a / n) as u8;
        }
    }
    Ok(out)
}
