use super::{PixelSink, Point};

fn four_points<S: PixelSink + ?Sized>(c: Point, x: i32, y: i32, sink: &mut S) {
    sink.put_pixel(c.offset(x, y));
    sink.put_pixel(c.offset(-x, y));
    sink.put_pixel(c.offset(x, -y));
    sink.put_pixel(c.offset(-x, -y));
}

/// Two-region midpoint ellipse with semi-axis `a` along x and `b` along y.
pub fn ellipse_midpoint<S: PixelSink + ?Sized>(center: Point, a: i32, b: i32, sink: &mut S) {
    let (a, b) = (a.abs(), b.abs());
    if a == 0 || b == 0 {
        for x in 0..=a {
            four_points(center, x, 0, sink);
        }
        for y in 0..=b {
            four_points(center, 0, y, sink);
        }
        return;
    }

    let a2 = (a as f64) * (a as f64);
    let b2 = (b as f64) * (b as f64);
    let (mut x, mut y) = (0i32, b);
    four_points(center, x, y, sink);

    // region 1: slope shallower than -1
    let mut p = b2 - a2 * b as f64 + a2 / 4.0;
    while b2 * (x as f64 + 1.0) < a2 * (y as f64 - 0.5) {
        x += 1;
        if p < 0.0 {
            p += b2 * (2 * x + 1) as f64;
        } else {
            y -= 1;
            p += b2 * (2 * x + 1) as f64 - 2.0 * a2 * y as f64;
        }
        four_points(center, x, y, sink);
    }

    // region 2
    let mut p = b2 * (x as f64 + 0.5).powi(2) + a2 * ((y - 1) as f64).powi(2) - a2 * b2;
    while y > 0 {
        y -= 1;
        if p > 0.0 {
            p += a2 * (1 - 2 * y) as f64;
        } else {
            x += 1;
            p += 2.0 * b2 * x as f64 + a2 * (1 - 2 * y) as f64;
        }
        four_points(center, x, y, sink);
    }
}
