use super::{Slider, Tracker};
use crate::controller::ControllerError;
use crate::cursor::{CursorError, CursorProvider};
use crate::ipc::ActionName;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Controller(#[from] ControllerError),
    #[error("failed to spawn tracking thread: {0}")]
    Spawn(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum TrackingError {
    #[error(transparent)]
    Cursor(#[from] CursorError),
    #[error(transparent)]
    Controller(#[from] ControllerError),
}

struct Session {
    working: Arc<AtomicBool>,
    thread: JoinHandle<()>,
}

impl Session {
    fn is_running(&self) -> bool {
        self.working.load(Ordering::Acquire) && !self.thread.is_finished()
    }
}

/// Tracks the pointer between `start()` and `stop()` and writes the resulting values.
///
/// Each session runs on its own thread. It first waits for the pointer to leave the deadzone,
/// then anchors an interpreter at the current pointer position and controller value and keeps
/// writing until stopped. Stopping is cooperative: the thread notices within one tick.
pub struct SliderHandler {
    slider: Arc<Slider>,
    cursor: Arc<dyn CursorProvider>,
    session: Option<Session>,
}

impl SliderHandler {
    pub fn new(slider: Slider, cursor: Arc<dyn CursorProvider>) -> Self {
        Self {
            slider: Arc::new(slider),
            cursor,
            session: None,
        }
    }

    pub fn name(&self) -> &ActionName {
        &self.slider.name
    }

    pub fn is_running(&self) -> bool {
        self.session.as_ref().is_some_and(Session::is_running)
    }

    pub fn start(&mut self) -> Result<(), HandlerError> {
        if self.is_running() {
            log::debug!("Slider '{}' is already tracking", self.slider.name);
            return Ok(());
        }

        self.slider.controller.lock().refresh()?;

        let working = Arc::new(AtomicBool::new(true));
        let thread = thread::Builder::new()
            .name(format!("slider-{}", self.slider.name))
            .spawn({
                let slider = self.slider.clone();
                let cursor = self.cursor.clone();
                let working = working.clone();
                move || {
                    if let Err(e) = track(&slider, cursor.as_ref(), &working) {
                        log::error!("Slider '{}' stopped: {}", slider.name, e);
                    }
                    working.store(false, Ordering::Release);
                }
            })?;

        self.session = Some(Session { working, thread });
        Ok(())
    }

    pub fn stop(&mut self) {
        if let Some(session) = self.session.take() {
            session.working.store(false, Ordering::Release);
        }
    }
}

impl Drop for SliderHandler {
    fn drop(&mut self) {
        self.stop();
    }
}

fn track(
    slider: &Slider,
    cursor: &dyn CursorProvider,
    working: &AtomicBool,
) -> Result<(), TrackingError> {
    let cursor = cursor.acquire()?;
    let read = || slider.axis.read(cursor.as_ref());

    let mut tracker = Tracker::new(
        &slider.values,
        read()?,
        slider.deadzone,
        slider.pixels_in_unit,
    );

    while working.load(Ordering::Acquire) {
        thread::sleep(slider.sleep_time);
        if !working.load(Ordering::Acquire) {
            break;
        }
        let mouse = read()?;
        tracker.step(mouse, &mut **slider.controller.lock())?;
    }

    log::debug!("Slider '{}' finished tracking", slider.name);
    Ok(())
}
