use derive_more::{AsRef, Deref, Display, From, Into};
use hyprland::data::{CursorPosition, Monitor, Monitors};
use hyprland::error::HyprError;
use hyprland::prelude::*;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Degrees in `[0, 360)` from `center` to `self`, clockwise from straight up.
    pub fn bearing_from(&self, center: Point) -> f64 {
        let (dx, dy) = (self.x - center.x, self.y - center.y);
        dx.atan2(-dy).to_degrees().rem_euclid(360.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref, From, Into, AsRef)]
pub struct MonitorName(String);

crate::impl_string_newtype!(MonitorName);

#[derive(Debug, Error)]
pub enum CursorError {
    #[error(transparent)]
    Hypr(#[from] HyprError),
    #[error("no focused monitor")]
    NoFocusedMonitor,
}

/// Live pointer position in pixels.
pub trait CursorSource {
    fn x(&self) -> Result<i32, CursorError>;

    fn y(&self) -> Result<i32, CursorError>;
}

/// Hands out a fresh [`CursorSource`] for every tracking session.
pub trait CursorProvider: Send + Sync {
    fn acquire(&self) -> Result<Box<dyn CursorSource>, CursorError>;
}

/// Hyprland cursor, relative to the monitor that was focused when it was acquired.
#[derive(Debug, Clone, Copy)]
pub struct HyprCursor {
    origin_x: i64,
    origin_y: i64,
}

impl CursorSource for HyprCursor {
    fn x(&self) -> Result<i32, CursorError> {
        Ok((CursorPosition::get()?.x - self.origin_x) as i32)
    }

    fn y(&self) -> Result<i32, CursorError> {
        Ok((CursorPosition::get()?.y - self.origin_y) as i32)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HyprCursorProvider;

impl CursorProvider for HyprCursorProvider {
    fn acquire(&self) -> Result<Box<dyn CursorSource>, CursorError> {
        let monitor = focused_monitor()?.ok_or(CursorError::NoFocusedMonitor)?;
        Ok(Box::new(HyprCursor {
            origin_x: i64::from(monitor.x),
            origin_y: i64::from(monitor.y),
        }))
    }
}

fn focused_monitor() -> Result<Option<Monitor>, HyprError> {
    Ok(Monitors::get()?.into_iter().find(|m| m.focused))
}

pub fn get_active_monitor() -> Option<MonitorName> {
    focused_monitor()
        .ok()
        .flatten()
        .map(|m| MonitorName(m.name))
}

pub fn get_cursor_pos_on_active_monitor() -> Option<Point> {
    let cursor = HyprCursorProvider.acquire().ok()?;
    Some(Point::new(cursor.x().ok()? as f64, cursor.y().ok()? as f64))
}
