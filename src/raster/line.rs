use super::{PixelSink, Point};

#[inline]
fn round(v: f64) -> i32 {
    (v + 0.5).floor() as i32
}

// Absolute deltas, step signs and whether y is the driving axis. Deltas are
// widened so endpoints at opposite ends of the i32 range do not overflow.
struct Octant {
    major: i64,
    minor: i64,
    sx: i32,
    sy: i32,
    steep: bool,
}

impl Octant {
    fn of(from: Point, to: Point) -> Self {
        let dx = to.x as i64 - from.x as i64;
        let dy = to.y as i64 - from.y as i64;
        let steep = dy.abs() > dx.abs();
        Octant { major: if steep { dy.abs() } else { dx.abs() },
                 minor: if steep { dx.abs() } else { dy.abs() },
                 sx: dx.signum() as i32,
                 sy: dy.signum() as i32,
                 steep }
    }

    fn step_major(&self, p: &mut Point) {
        if self.steep {
            p.y += self.sy
        } else {
            p.x += self.sx
        }
    }

    fn step_minor(&self, p: &mut Point) {
        if self.steep {
            p.x += self.sx
        } else {
            p.y += self.sy
        }
    }
}

/// Digital differential analyzer: floating point increments, rounded per step.
pub fn line_dda<S: PixelSink + ?Sized>(from: Point, to: Point, sink: &mut S) {
    let dx = to.x as i64 - from.x as i64;
    let dy = to.y as i64 - from.y as i64;
    let steps = std::cmp::max(dx.abs(), dy.abs());

    sink.put_pixel(from);
    if steps == 0 {
        return;
    }

    let xinc = dx as f64 / steps as f64;
    let yinc = dy as f64 / steps as f64;
    let (mut x, mut y) = (from.x as f64, from.y as f64);
    for _ in 0..steps {
        x += xinc;
        y += yinc;
        sink.put_pixel(Point::new(round(x), round(y)));
    }
}

/// Integer Bresenham. Steep lines swap the roles of x and y.
pub fn line_bresenham<S: PixelSink + ?Sized>(from: Point, to: Point, sink: &mut S) {
    let oct = Octant::of(from, to);
    let mut cur = from;
    sink.put_pixel(cur);

    let mut p = 2 * oct.minor - oct.major;
    for _ in 0..oct.major {
        oct.step_major(&mut cur);
        if p >= 0 {
            oct.step_minor(&mut cur);
            p += 2 * (oct.minor - oct.major);
        } else {
            p += 2 * oct.minor;
        }
        sink.put_pixel(cur);
    }
}

/// Midpoint line: the implicit line function `a*x + b*y` is evaluated at the
/// midpoint between the two candidate pixels, starting from `a + b/2`.
pub fn line_midpoint<S: PixelSink + ?Sized>(from: Point, to: Point, sink: &mut S) {
    let oct = Octant::of(from, to);
    let a = oct.minor as f64;
    let b = -oct.major as f64;
    let mut cur = from;
    sink.put_pixel(cur);

    let mut p = a + b / 2.0;
    for _ in 0..oct.major {
        oct.step_major(&mut cur);
        if p >= 0.0 {
            oct.step_minor(&mut cur);
            p += a + b;
        } else {
            p += a;
        }
        sink.put_pixel(cur);
    }
}
