use crate::controller::{Controller, ControllerError};
use crate::interpreter::MouseInterpreter;
use crate::slider::values::SliderValues;
use crate::value::MouseInput;

#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    /// Waiting for the pointer to leave the deadzone around `start`.
    Deadzone { start: MouseInput },
    Tracking(MouseInterpreter),
}

/// State of one slider drag, fed one pointer sample per tick.
#[derive(Debug, Clone)]
pub struct Tracker<'a> {
    values: &'a SliderValues,
    deadzone: u32,
    pixels_in_unit: f64,
    phase: Phase,
}

impl<'a> Tracker<'a> {
    pub fn new(
        values: &'a SliderValues,
        start: MouseInput,
        deadzone: u32,
        pixels_in_unit: f64,
    ) -> Self {
        Self {
            values,
            deadzone,
            pixels_in_unit,
            phase: Phase::Deadzone { start },
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_tracking(&self) -> bool {
        matches!(self.phase, Phase::Tracking(_))
    }

    /// Handles one sample. Once past the deadzone every sample ends in a controller write.
    pub fn step(
        &mut self,
        mouse: MouseInput,
        controller: &mut dyn Controller,
    ) -> Result<(), ControllerError> {
        if let Phase::Deadzone { start } = self.phase {
            if (*mouse - *start).unsigned_abs() <= self.deadzone {
                return Ok(());
            }
            log::debug!("Left deadzone at {mouse}, tracking");
            self.phase = Phase::Tracking(self.anchor(mouse, controller));
        }

        if let Phase::Tracking(interpreter) = &mut self.phase {
            let interpreted = interpreter.interpret(mouse);
            controller.set_value(&self.values.at(interpreted))?;
        }
        Ok(())
    }

    fn anchor(&self, mouse: MouseInput, controller: &dyn Controller) -> MouseInterpreter {
        MouseInterpreter::new(
            self.values.min(),
            self.values.max(),
            mouse,
            self.values.index(&controller.get_value()),
            self.pixels_in_unit,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::testing::RecordingController;
    use crate::slider::values::Domain;
    use crate::value::Value;

    fn range() -> SliderValues {
        SliderValues::new(Domain::Range {
            min: 0.0,
            max: 100.0,
        })
        .unwrap()
    }

    #[test]
    fn test_deadzone_boundary() {
        let values = range();
        let mut controller = RecordingController::new(Value::Number(50.0));
        let mut tracker = Tracker::new(&values, MouseInput::new(100), 10, 1.0);

        tracker.step(MouseInput::new(110), &mut controller).unwrap();
        tracker.step(MouseInput::new(90), &mut controller).unwrap();
        assert_eq!(
            tracker.phase(),
            &Phase::Deadzone {
                start: MouseInput::new(100)
            }
        );
        assert!(controller.writes().is_empty());

        tracker.step(MouseInput::new(111), &mut controller).unwrap();
        assert!(matches!(tracker.phase(), Phase::Tracking(_)));
        assert!(tracker.is_tracking());
        assert_eq!(controller.writes(), vec![Value::Number(50.0)]);
    }

    #[test]
    fn test_anchors_at_current_controller_value() {
        let values = range();
        let mut controller = RecordingController::new(Value::Number(20.0));
        let mut tracker = Tracker::new(&values, MouseInput::new(0), 5, 2.0);

        tracker.step(MouseInput::new(-6), &mut controller).unwrap();
        tracker.step(MouseInput::new(14), &mut controller).unwrap();
        tracker.step(MouseInput::new(500), &mut controller).unwrap();
        assert_eq!(
            controller.writes(),
            vec![
                Value::Number(20.0),
                Value::Number(30.0),
                Value::Number(100.0)
            ]
        );
    }

    #[test]
    fn test_list_values_follow_pointer() {
        let values = SliderValues::new(Domain::List(vec![
            Value::from("s"),
            Value::from("m"),
            Value::from("l"),
        ]))
        .unwrap();
        let mut controller = RecordingController::new(Value::from("m"));
        let mut tracker = Tracker::new(&values, MouseInput::new(0), 0, 10.0);

        for mouse in [1, 6, 16, -3, -30] {
            tracker.step(MouseInput::new(mouse), &mut controller).unwrap();
        }
        assert_eq!(
            controller.writes(),
            ["m", "l", "l", "m", "s"].map(Value::from).to_vec()
        );
    }

    #[test]
    fn test_write_failure_propagates() {
        let values = range();
        let mut controller = RecordingController::new(Value::Number(0.0));
        controller.fail_writes = true;
        let mut tracker = Tracker::new(&values, MouseInput::new(0), 0, 1.0);
        assert!(tracker.step(MouseInput::new(3), &mut controller).is_err());
    }
}
