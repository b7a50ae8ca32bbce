//! Webcam ownership across the permission request and teardown.
//!
//! The camera is acquired asynchronously, so it can arrive after the page has
//! already shut down, or half-open when a later setup step fails. Both cases
//! must switch the device off instead of dropping a live stream.

use std::cell::{Cell, RefCell};

/// A handle holding the webcam that can be switched off.
pub trait Release {
    fn release(&self);
}

/// Releases its target on drop unless [`ReleaseGuard::disarm`] was called.
pub struct ReleaseGuard<'a, T: Release> {
    target: &'a T,
    armed: bool,
}

impl<'a, T: Release> ReleaseGuard<'a, T> {
    pub fn new(target: &'a T) -> Self {
        Self {
            target,
            armed: true,
        }
    }

    /// Setup succeeded; the caller keeps the target running.
    pub fn disarm(mut self) {
        self.armed = false;
    }
}

impl<T: Release> Drop for ReleaseGuard<'_, T> {
    fn drop(&mut self) {
        if self.armed {
            self.target.release();
        }
    }
}

/// Slot for the active camera, shared between the page teardown and the task
/// waiting on the permission prompt.
pub struct CameraSlot<T: Release> {
    closed: Cell<bool>,
    camera: RefCell<Option<T>>,
}

impl<T: Release> Default for CameraSlot<T> {
    fn default() -> Self {
        Self {
            closed: Cell::new(false),
            camera: RefCell::new(None),
        }
    }
}

impl<T: Release> CameraSlot<T> {
    /// Store a freshly opened camera. After [`close`](Self::close) the camera
    /// is released at once and `false` is returned.
    pub fn install(&self, camera: T) -> bool {
        if self.closed.get() {
            camera.release();
            return false;
        }
        if let Some(previous) = self.camera.replace(Some(camera)) {
            previous.release();
        }
        true
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.camera.borrow().as_ref().map(f)
    }

    pub fn is_closed(&self) -> bool {
        self.closed.get()
    }

    /// Release the current camera and refuse any that arrives later.
    pub fn close(&self) {
        self.closed.set(true);
        if let Some(camera) = self.camera.take() {
            camera.release();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct FakeCamera {
        released: Rc<Cell<u32>>,
    }

    impl Release for FakeCamera {
        fn release(&self) {
            self.released.set(self.released.get() + 1);
        }
    }

    fn setup(camera: &FakeCamera, fail: bool) -> Result<(), &'static str> {
        let guard = ReleaseGuard::new(camera);
        if fail {
            return Err("play() rejected");
        }
        guard.disarm();
        Ok(())
    }

    #[test]
    fn failed_setup_releases_the_camera() {
        let cam = FakeCamera::default();
        assert!(setup(&cam, true).is_err());
        assert_eq!(cam.released.get(), 1);
    }

    #[test]
    fn successful_setup_keeps_the_camera_running() {
        let cam = FakeCamera::default();
        assert!(setup(&cam, false).is_ok());
        assert_eq!(cam.released.get(), 0);
    }

    #[test]
    fn close_releases_the_installed_camera() {
        let slot = CameraSlot::default();
        let cam = FakeCamera::default();
        assert!(slot.install(cam.clone()));
        assert_eq!(slot.with(|_| ()), Some(()));

        slot.close();
        assert!(slot.is_closed());
        assert_eq!(cam.released.get(), 1);
        assert_eq!(slot.with(|_| ()), None);
        // closing twice does not release again
        slot.close();
        assert_eq!(cam.released.get(), 1);
    }

    #[test]
    fn camera_arriving_after_close_is_released_not_stored() {
        let slot = CameraSlot::default();
        slot.close();

        let late = FakeCamera::default();
        assert!(!slot.install(late.clone()));
        assert_eq!(late.released.get(), 1);
        assert_eq!(slot.with(|_| ()), None);
    }

    #[test]
    fn replacing_a_camera_releases_the_old_one() {
        let slot = CameraSlot::default();
        let (first, second) = (FakeCamera::default(), FakeCamera::default());
        slot.install(first.clone());
        slot.install(second.clone());
        assert_eq!(first.released.get(), 1);
        assert_eq!(second.released.get(), 0);
    }
}
