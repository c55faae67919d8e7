//! Raw spatial moments of closed polygons

use imageproc::point::Point;
use num_traits::ToPrimitive;

/// Zeroth and first order raw moments of a closed contour
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Moments {
    /// Enclosed area
    pub m00: f64,
    /// First moment along x
    pub m10: f64,
    /// First moment along y
    pub m01: f64,
}

impl Moments {
    /// Compute moments of the polygon through `points` using Green's theorem
    ///
    /// The polygon is implicitly closed. Orientation does not matter: a
    /// clockwise trace yields the same non-negative moments as its reverse.
    pub fn of_polygon<T: ToPrimitive + Copy>(points: &[Point<T>]) -> Self {
        let Some(last) = points.last() else {
            return Self::default();
        };

        let mut a00 = 0.0;
        let mut a10 = 0.0;
        let mut a01 = 0.0;

        let (mut x_prev, mut y_prev) = coords(*last);
        for point in points {
            let (x, y) = coords(*point);
            let cross = x_prev * y - x * y_prev;
            a00 += cross;
            a10 += cross * (x_prev + x);
            a01 += cross * (y_prev + y);
            x_prev = x;
            y_prev = y;
        }

        let sign = if a00 < 0.0 { -1.0 } else { 1.0 };
        Self {
            m00: sign * a00 / 2.0,
            m10: sign * a10 / 6.0,
            m01: sign * a01 / 6.0,
        }
    }

    /// Center of mass, absent for degenerate (zero area) polygons
    pub fn centroid(&self) -> Option<Point<f64>> {
        (self.m00 > 0.0).then(|| Point::new(self.m10 / self.m00, self.m01 / self.m00))
    }
}

fn coords<T: ToPrimitive + Copy>(point: Point<T>) -> (f64, f64) {
    (
        point.x.to_f64().unwrap_or(0.0),
        point.y.to_f64().unwrap_or(0.0),
    )
}
