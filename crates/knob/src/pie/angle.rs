use crate::cursor::Point;

/// Evenly spaced angles around a circle, clockwise from the top, with the matching slot centers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleIterator {
    center_distance: f64,
    radius: f64,
    amount: usize,
}

impl AngleIterator {
    /// `center_distance` is the offset of the circle's center on both axes.
    pub fn new(center_distance: f64, radius: f64, amount: usize) -> Self {
        Self {
            center_distance,
            radius,
            amount,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (u16, Point)> + '_ {
        let step = 360.0 / self.amount.max(1) as f64;
        (0..self.amount).map(move |i| {
            let angle = i as f64 * step;
            (angle.round() as u16, self.center_from_angle(angle))
        })
    }

    fn center_from_angle(&self, angle: f64) -> Point {
        let rad = angle.to_radians();
        Point::new(
            (self.center_distance + self.radius * rad.sin()).round(),
            (self.center_distance - self.radius * rad.cos()).round(),
        )
    }
}

impl<'a> IntoIterator for &'a AngleIterator {
    type Item = (u16, Point);
    type IntoIter = Box<dyn Iterator<Item = (u16, Point)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
