//! Incremental scan conversion of lines, circles and ellipses.
//!
//! Every rasterizer is a free function writing integer points into a
//! [`PixelSink`]; none of them keep state between calls.

mod circle;
mod ellipse;
mod line;

pub use self::circle::{circle_bresenham, circle_midpoint, Symmetry};
pub use self::ellipse::ellipse_midpoint;
pub use self::line::{line_bresenham, line_dda, line_midpoint};

use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Truncates toward zero.
    pub fn midpoint(self, other: Point) -> Point {
        let half = |a: i32, b: i32| ((a as i64 + b as i64) / 2) as i32;
        Point::new(half(self.x, other.x), half(self.y, other.y))
    }

    /// `self + (dx, dy)`, saturating at the ends of the i32 range.
    pub fn offset(self, dx: i32, dy: i32) -> Point {
        Point::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl FromStr for Point {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s.split_once(',')
                      .ok_or_else(|| format!("bad point '{}', expected x,y", s))?;
        let parse = |v: &str| v.parse::<i32>().map_err(|_| format!("bad integer '{}' in point '{}'", v, s));
        Ok(Point::new(parse(x)?, parse(y)?))
    }
}

/// Destination of rasterized points, in logical coordinates (origin bottom-left).
pub trait PixelSink {
    fn put_pixel(&mut self, p: Point);

    fn set_pixel(&mut self, p: Point, _glyph: &str) {
        self.put_pixel(p)
    }
}

impl PixelSink for Vec<Point> {
    fn put_pixel(&mut self, p: Point) {
        self.push(p)
    }
}
