use crate::value::{Interpreted, MouseInput};

/// Turns pointer travel into a bounded [`Interpreted`] value.
///
/// Dragging past a bound moves `mouse_origin` along with the pointer, so reversing direction
/// changes the value right away instead of first retracing the overshoot.
#[derive(Debug, Clone, PartialEq)]
pub struct MouseInterpreter {
    pub min: Interpreted,
    pub max: Interpreted,
    pub mouse_origin: MouseInput,
    pub start_value: Interpreted,
    pub pixels_in_unit: f64,
}

impl MouseInterpreter {
    pub fn new(
        min: Interpreted,
        max: Interpreted,
        mouse_origin: MouseInput,
        start_value: Interpreted,
        pixels_in_unit: f64,
    ) -> Self {
        Self {
            min,
            max,
            mouse_origin,
            start_value,
            pixels_in_unit,
        }
    }

    pub fn interpret(&mut self, mouse: MouseInput) -> Interpreted {
        let value = *self.start_value + self.delta(mouse);
        self.recalibrate(value);
        self.clip(value)
    }

    fn delta(&self, mouse: MouseInput) -> f64 {
        f64::from(*mouse - *self.mouse_origin) / self.pixels_in_unit
    }

    fn recalibrate(&mut self, value: f64) {
        let below = (*self.min - value) * self.pixels_in_unit;
        if below > 0.0 {
            self.shift_origin(below);
        }

        let above = (*self.max - value) * self.pixels_in_unit;
        if above < 0.0 {
            self.shift_origin(above);
        }
    }

    fn shift_origin(&mut self, pixels: f64) {
        let origin = f64::from(*self.mouse_origin) - pixels;
        self.mouse_origin = MouseInput::new(origin.round() as i32);
    }

    fn clip(&self, value: f64) -> Interpreted {
        Interpreted::new(value.clamp(*self.min, *self.max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interpreter(start: f64, pixels_in_unit: f64) -> MouseInterpreter {
        MouseInterpreter::new(
            Interpreted::new(0.0),
            Interpreted::new(100.0),
            MouseInput::new(0),
            Interpreted::new(start),
            pixels_in_unit,
        )
    }

    #[test]
    fn test_identity_inside_bounds() {
        let mut interp = interpreter(50.0, 1.0);
        for mouse in [-50, -10, 0, 25, 50] {
            assert_eq!(*interp.interpret(MouseInput::new(mouse)), 50.0 + mouse as f64);
        }
        assert_eq!(interp.mouse_origin, MouseInput::new(0));
    }

    #[test]
    fn test_scale_divides_travel() {
        let mut interp = interpreter(10.0, 4.0);
        assert_eq!(*interp.interpret(MouseInput::new(20)), 15.0);
        assert_eq!(*interp.interpret(MouseInput::new(-8)), 8.0);
    }

    #[test]
    fn test_clamps_to_nearer_bound() {
        let mut interp = interpreter(50.0, 1.0);
        assert_eq!(*interp.interpret(MouseInput::new(500)), 100.0);
        let mut interp = interpreter(50.0, 1.0);
        assert_eq!(*interp.interpret(MouseInput::new(-500)), 0.0);
    }

    #[test]
    fn test_no_overshoot_past_bound() {
        let mut interp = interpreter(50.0, 2.0);
        assert_eq!(*interp.interpret(MouseInput::new(100)), 100.0);
        for mouse in 101..120 {
            assert_eq!(*interp.interpret(MouseInput::new(mouse)), 100.0);
        }
        // one unit back off the bound moves the value immediately
        assert_eq!(*interp.interpret(MouseInput::new(117)), 99.0);
    }

    #[test]
    fn test_reversal_after_overshoot_resumes_immediately() {
        let mut interp = interpreter(50.0, 1.0);
        assert_eq!(*interp.interpret(MouseInput::new(200)), 100.0);
        assert_eq!(interp.mouse_origin, MouseInput::new(150));
        assert_eq!(*interp.interpret(MouseInput::new(150)), 50.0);
        assert_eq!(*interp.interpret(MouseInput::new(0)), 0.0);
        assert_eq!(interp.mouse_origin, MouseInput::new(50));
        assert_eq!(*interp.interpret(MouseInput::new(75)), 75.0);
    }

    #[test]
    fn test_recalibration_keeps_start_value() {
        let mut interp = interpreter(30.0, 3.0);
        interp.interpret(MouseInput::new(-1000));
        interp.interpret(MouseInput::new(1000));
        assert_eq!(interp.start_value, Interpreted::new(30.0));
    }

    #[test]
    fn test_recalibration_is_idempotent_for_same_input() {
        let mut interp = interpreter(50.0, 1.0);
        interp.interpret(MouseInput::new(300));
        let origin = interp.mouse_origin;
        interp.interpret(MouseInput::new(300));
        assert_eq!(interp.mouse_origin, origin);
    }

    #[test]
    fn test_origin_shift_is_rounded_to_pixels() {
        let mut interp = MouseInterpreter::new(
            Interpreted::new(-0.49),
            Interpreted::new(2.49),
            MouseInput::new(0),
            Interpreted::new(0.0),
            10.0,
        );
        assert_eq!(*interp.interpret(MouseInput::new(40)), 2.49);
        // the bound was reached 15.1px earlier
        assert_eq!(interp.mouse_origin, MouseInput::new(15));
    }
}
