use super::angle::AngleIterator;
use super::label::{Label, LabelError, LabelHolder};
use super::style::PieStyle;
use crate::controller::{Controller, ControllerError, SharedController};
use crate::cursor::Point;
use crate::ipc::ActionName;
use crate::value::Value;

const MAX_LABELS: usize = 360;

/// A radial menu: opened on key press, commits the label under the pointer on release.
pub struct PieMenu {
    name: ActionName,
    controller: SharedController,
    labels: LabelHolder,
    style: PieStyle,
    center: Point,
    scale: f64,
    tracking: bool,
}

impl PieMenu {
    pub fn new(
        name: ActionName,
        values: Vec<Value>,
        controller: SharedController,
        style: PieStyle,
    ) -> Result<Self, LabelError> {
        if values.len() > MAX_LABELS {
            return Err(LabelError::TooMany(values.len()));
        }
        let labels = Self::create_labels(values, &style, &**controller.lock());
        Ok(Self {
            name,
            controller,
            labels,
            style,
            center: Point::default(),
            scale: 1.0,
            tracking: false,
        })
    }

    fn create_labels(
        values: Vec<Value>,
        style: &PieStyle,
        controller: &dyn Controller,
    ) -> LabelHolder {
        let layout = AngleIterator::new(style.widget_radius(), style.pie_radius, values.len());
        LabelHolder::new(
            values
                .into_iter()
                .zip(&layout)
                .map(|(value, (angle, center))| Label {
                    display: controller.get_label(&value),
                    value,
                    angle,
                    center,
                }),
        )
    }

    pub fn name(&self) -> &ActionName {
        &self.name
    }

    pub fn labels(&self) -> &LabelHolder {
        &self.labels
    }

    pub fn style(&self) -> &PieStyle {
        &self.style
    }

    /// Screen position of the menu center, set on the last press.
    pub fn center(&self) -> Point {
        self.center
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    pub fn active(&self) -> Option<&Label> {
        self.labels.active()
    }

    pub fn press(&mut self, center: Point, scale: f64) -> Result<(), ControllerError> {
        self.controller.lock().refresh()?;
        self.center = center;
        self.scale = scale;
        self.labels.set_active(None);
        self.tracking = true;
        Ok(())
    }

    /// Re-resolves the active label for the pointer position. Returns whether it changed.
    pub fn update_cursor(&mut self, cursor: Point) -> bool {
        if !self.tracking {
            return false;
        }

        let active = if cursor.distance_to(self.center) <= self.style.deadzone_radius * self.scale
        {
            None
        } else {
            self.labels
                .nearest(cursor.bearing_from(self.center))
                .map(|label| label.angle)
        };
        self.labels.set_active(active)
    }

    /// Commits the active label's value, if any, and stops tracking.
    pub fn release(&mut self) -> Result<Option<Value>, ControllerError> {
        self.tracking = false;
        let Some(value) = self.labels.active().map(|label| label.value.clone()) else {
            return Ok(None);
        };
        self.controller.lock().set_value(&value)?;
        Ok(Some(value))
    }

    pub fn cancel(&mut self) {
        self.tracking = false;
        self.labels.set_active(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{self, testing::RecordingController};
    use parking_lot::Mutex;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Fixture {
        menu: PieMenu,
        written: Arc<Mutex<Vec<Value>>>,
        refreshes: Arc<AtomicUsize>,
    }

    fn fixture(values: &[&str]) -> Fixture {
        let recorder = RecordingController::new(Value::from("pen"));
        let written = recorder.written.clone();
        let refreshes = recorder.refreshes.clone();
        let menu = PieMenu::new(
            ActionName::new("tools"),
            values.iter().map(|v| Value::from(*v)).collect(),
            controller::shared(recorder),
            PieStyle::default(),
        )
        .unwrap();
        Fixture {
            menu,
            written,
            refreshes,
        }
    }

    const CENTER: Point = Point { x: 500.0, y: 400.0 };

    #[test]
    fn test_labels_are_laid_out_around_widget_center() {
        let f = fixture(&["pen", "brush", "eraser", "smudge"]);
        let style = f.menu.style();
        let labels: Vec<_> = f.menu.labels().iter().collect();
        assert_eq!(labels.len(), 4);
        assert_eq!(labels[1].angle, 90);
        assert_eq!(labels[1].value, Value::from("brush"));
        assert_eq!(
            labels[1].center,
            Point::new(style.widget_radius() + style.pie_radius, style.widget_radius())
        );
        assert!(labels.iter().all(|l| l.display().is_ok()));
    }

    #[test]
    fn test_press_refreshes_and_release_commits() {
        let mut f = fixture(&["pen", "brush", "eraser", "smudge"]);
        f.menu.press(CENTER, 1.0).unwrap();
        assert_eq!(f.refreshes.load(Ordering::SeqCst), 1);
        assert!(f.menu.is_tracking());

        assert!(f.menu.update_cursor(Point::new(CENTER.x + 100.0, CENTER.y + 10.0)));
        assert_eq!(f.menu.active().map(|l| l.angle), Some(90));

        assert_eq!(f.menu.release().unwrap(), Some(Value::from("brush")));
        assert!(!f.menu.is_tracking());
        assert_eq!(*f.written.lock(), vec![Value::from("brush")]);
    }

    #[test]
    fn test_active_follows_pointer_continuously() {
        let mut f = fixture(&["pen", "brush", "eraser", "smudge"]);
        f.menu.press(CENTER, 1.0).unwrap();
        f.menu.update_cursor(Point::new(CENTER.x, CENTER.y - 80.0));
        assert_eq!(f.menu.active().map(|l| l.angle), Some(0));
        assert!(!f.menu.update_cursor(Point::new(CENTER.x + 5.0, CENTER.y - 80.0)));
        assert!(f.menu.update_cursor(Point::new(CENTER.x - 80.0, CENTER.y)));
        assert_eq!(f.menu.active().map(|l| l.angle), Some(270));
    }

    #[test]
    fn test_deadzone_clears_active_and_commits_nothing() {
        let mut f = fixture(&["pen", "brush"]);
        f.menu.press(CENTER, 2.0).unwrap();
        f.menu.update_cursor(Point::new(CENTER.x, CENTER.y + 100.0));
        assert!(f.menu.active().is_some());

        // inside the scaled deadzone (40 * 2)
        assert!(f.menu.update_cursor(Point::new(CENTER.x, CENTER.y + 79.0)));
        assert!(f.menu.active().is_none());
        assert_eq!(f.menu.release().unwrap(), None);
        assert!(f.written.lock().is_empty());
    }

    #[test]
    fn test_cursor_ignored_when_not_tracking() {
        let mut f = fixture(&["pen", "brush"]);
        assert!(!f.menu.update_cursor(Point::new(0.0, 0.0)));
        f.menu.press(CENTER, 1.0).unwrap();
        f.menu.cancel();
        assert!(!f.menu.update_cursor(Point::new(CENTER.x, CENTER.y + 100.0)));
        assert_eq!(f.menu.release().unwrap(), None);
        assert!(f.written.lock().is_empty());
    }

    #[test]
    fn test_press_clears_previous_active() {
        let mut f = fixture(&["pen", "brush"]);
        f.menu.press(CENTER, 1.0).unwrap();
        f.menu.update_cursor(Point::new(CENTER.x, CENTER.y + 100.0));
        f.menu.press(CENTER, 1.0).unwrap();
        assert!(f.menu.active().is_none());
    }

    #[test]
    fn test_too_many_values() {
        let values = (0..361).map(|i| Value::Number(f64::from(i))).collect();
        let result = PieMenu::new(
            ActionName::new("huge"),
            values,
            controller::shared(RecordingController::new(Value::Number(0.0))),
            PieStyle::default(),
        );
        assert!(matches!(result, Err(LabelError::TooMany(361))));
    }
}
