use crate::controller::SharedController;
use crate::cursor::{CursorError, CursorSource};
use crate::ipc::ActionName;
use crate::value::MouseInput;
use serde::Serialize;
use serde_with::DeserializeFromStr;
use std::time::Duration;
use strum::EnumString;

pub mod handler;
pub mod tracker;
pub mod values;

pub use handler::{HandlerError, SliderHandler, TrackingError};
pub use tracker::{Phase, Tracker};
pub use values::{Domain, ListValues, RangeValues, SliderError, SliderValues};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, DeserializeFromStr, EnumString,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    #[default]
    #[strum(serialize = "horizontal", serialize = "h", serialize = "x")]
    Horizontal,
    #[strum(serialize = "vertical", serialize = "v", serialize = "y")]
    Vertical,
}

impl Axis {
    /// Vertical input is negated so that moving up increases the value.
    pub fn read(self, cursor: &dyn CursorSource) -> Result<MouseInput, CursorError> {
        let pixels = match self {
            Axis::Horizontal => cursor.x()?,
            Axis::Vertical => -cursor.y()?,
        };
        Ok(MouseInput::new(pixels))
    }
}

/// Everything needed to drive one slider action.
pub struct Slider {
    pub name: ActionName,
    pub values: SliderValues,
    pub controller: SharedController,
    pub deadzone: u32,
    pub pixels_in_unit: f64,
    pub sleep_time: Duration,
    pub axis: Axis,
}

impl Slider {
    /// Fails for a `pixels_in_unit` that is not a positive finite number and for a zero sleep time.
    pub fn check(&self) -> Result<(), SliderError> {
        if !self.pixels_in_unit.is_finite() || self.pixels_in_unit <= 0.0 {
            return Err(SliderError::InvalidScale(self.pixels_in_unit));
        }
        if self.sleep_time.is_zero() {
            return Err(SliderError::ZeroSleepTime);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{self, testing::RecordingController};
    use crate::value::Value;

    #[test]
    fn test_axis_deserialization() {
        let cases = vec![
            ("\"horizontal\"", Axis::Horizontal),
            ("\"Horizontal\"", Axis::Horizontal),
            ("\"x\"", Axis::Horizontal),
            ("\"V\"", Axis::Vertical),
            ("\"vertical\"", Axis::Vertical),
            ("\"y\"", Axis::Vertical),
        ];

        for (json, expected) in cases {
            let deserialized: Axis = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
        assert!(serde_json::from_str::<Axis>("\"diagonal\"").is_err());
    }

    fn slider(pixels_in_unit: f64, sleep_time: Duration) -> Slider {
        Slider {
            name: ActionName::new("volume"),
            values: SliderValues::new(Domain::Range {
                min: 0.0,
                max: 100.0,
            })
            .unwrap(),
            controller: controller::shared(RecordingController::new(Value::Number(50.0))),
            deadzone: 10,
            pixels_in_unit,
            sleep_time,
            axis: Axis::Horizontal,
        }
    }

    #[test]
    fn test_check_rejects_unusable_scale() {
        let tick = Duration::from_millis(16);
        assert_eq!(slider(2.5, tick).check(), Ok(()));
        for scale in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                slider(scale, tick).check(),
                Err(SliderError::InvalidScale(_))
            ));
        }
    }

    #[test]
    fn test_check_rejects_zero_sleep_time() {
        assert_eq!(
            slider(1.0, Duration::ZERO).check(),
            Err(SliderError::ZeroSleepTime)
        );
    }
}
