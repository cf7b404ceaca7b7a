use crate::controller::LabelDisplay;
use crate::cursor::Point;
use crate::value::Value;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum LabelError {
    #[error("label for `{0}` has neither text nor image")]
    NoDisplay(Value),
    #[error("a pie menu holds at most 360 values, got {0}")]
    TooMany(usize),
}

/// One angular slot of a pie menu.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub value: Value,
    pub display: Option<LabelDisplay>,
    pub angle: u16,
    pub center: Point,
}

impl Label {
    pub fn display(&self) -> Result<&LabelDisplay, LabelError> {
        self.display
            .as_ref()
            .ok_or_else(|| LabelError::NoDisplay(self.value.clone()))
    }
}

/// Labels of one pie menu keyed by angle, plus the currently active one.
#[derive(Debug, Clone, Default)]
pub struct LabelHolder {
    labels: BTreeMap<u16, Label>,
    active: Option<u16>,
}

fn circular_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

impl LabelHolder {
    pub fn new(labels: impl IntoIterator<Item = Label>) -> Self {
        Self {
            labels: labels.into_iter().map(|l| (l.angle, l)).collect(),
            active: None,
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels in angle order.
    pub fn iter(&self) -> impl Iterator<Item = &Label> {
        self.labels.values()
    }

    pub fn get(&self, angle: u16) -> Option<&Label> {
        self.labels.get(&angle)
    }

    pub fn active(&self) -> Option<&Label> {
        self.active.and_then(|angle| self.labels.get(&angle))
    }

    /// Returns whether the active label changed.
    pub fn set_active(&mut self, angle: Option<u16>) -> bool {
        let angle = angle.filter(|a| self.labels.contains_key(a));
        let changed = self.active != angle;
        self.active = angle;
        changed
    }

    /// The label closest to `angle` around the circle; equal distances go to the smaller angle.
    pub fn nearest(&self, angle: f64) -> Option<&Label> {
        let angle = angle.rem_euclid(360.0);
        let key = angle.floor() as u16;

        let (below_angle, below) = self
            .labels
            .range(..=key)
            .next_back()
            .or_else(|| self.labels.iter().next_back())?;
        let (above_angle, above) = self
            .labels
            .range(key.saturating_add(1)..)
            .next()
            .or_else(|| self.labels.iter().next())?;

        let d_below = circular_distance(angle, f64::from(*below_angle));
        let d_above = circular_distance(angle, f64::from(*above_angle));

        Some(if d_above < d_below {
            above
        } else if d_below < d_above || below_angle <= above_angle {
            below
        } else {
            above
        })
    }
}
