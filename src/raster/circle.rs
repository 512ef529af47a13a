use super::{PixelSink, Point};
use crate::error::{Error, Result};

/// How many symmetric copies each generated offset produces.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Symmetry {
    /// Classic octant mirroring.
    Eight,
    /// Repeated reflection across axes `360/n` degrees apart; `n` is a power of two in `4..=256`.
    Points(u32),
}

impl Default for Symmetry {
    fn default() -> Self {
        Symmetry::Eight
    }
}

impl Symmetry {
    pub const MIN_POINTS: u32 = 4;
    pub const MAX_POINTS: u32 = 256;

    pub fn points(n: u32) -> Result<Self> {
        if !n.is_power_of_two() || n < Self::MIN_POINTS || n > Self::MAX_POINTS {
            return Err(Error::config(format!("symmetry must be a power of 2 ({} <= symmetry <= {}) (given: {})",
                                             Self::MIN_POINTS,
                                             Self::MAX_POINTS,
                                             n)));
        }
        Ok(Symmetry::Points(n))
    }
}

#[derive(Clone, Copy)]
enum Decision {
    Bresenham,
    Midpoint,
}

// The decision variable is kept in i64; `2r` and `4x` overflow i32 for radii
// past a quarter of its range.
impl Decision {
    fn initial(self, r: i32) -> i64 {
        let r = r as i64;
        match self {
            Decision::Bresenham => 3 - 2 * r,
            Decision::Midpoint => 1 - r,
        }
    }

    // Advances one column; `y` drops when the midpoint falls outside the circle.
    fn step(self, p: &mut i64, x: &mut i32, y: &mut i32) {
        let (cx, cy) = (*x as i64, *y as i64);
        let (east, south_east) = match self {
            Decision::Bresenham => (4 * cx + 6, 4 * (cx - cy) + 10),
            Decision::Midpoint => (2 * cx + 3, 2 * (cx - cy) + 5),
        };
        if *p < 0 {
            *p += east;
        } else {
            *p += south_east;
            *y -= 1;
        }
        *x += 1;
    }
}

pub fn circle_bresenham<S: PixelSink + ?Sized>(center: Point, radius: i32, symmetry: Symmetry, sink: &mut S) {
    trace_circle(Decision::Bresenham, center, radius, symmetry, sink)
}

pub fn circle_midpoint<S: PixelSink + ?Sized>(center: Point, radius: i32, symmetry: Symmetry, sink: &mut S) {
    trace_circle(Decision::Midpoint, center, radius, symmetry, sink)
}

fn trace_circle<S: PixelSink + ?Sized>(rule: Decision, center: Point, r: i32, symmetry: Symmetry, sink: &mut S) {
    if r <= 0 {
        sink.put_pixel(center);
        return;
    }
    let (mut x, mut y) = (0, r);
    let mut p = rule.initial(r);
    match symmetry {
        Symmetry::Eight => {
            eight_points(center, x, y, sink);
            while y > x {
                rule.step(&mut p, &mut x, &mut y);
                eight_points(center, x, y, sink);
            }
        },
        Symmetry::Points(n) => {
            let sector_slope = (90.0 - 360.0 / n as f64).to_radians().tan();
            n_points(center, x, y, n, sink);
            loop {
                rule.step(&mut p, &mut x, &mut y);
                n_points(center, x, y, n, sink);
                if y as f64 / x as f64 <= sector_slope {
                    break;
                }
            }
        },
    }
}

fn eight_points<S: PixelSink + ?Sized>(c: Point, x: i32, y: i32, sink: &mut S) {
    for &(dx, dy) in [(x, y), (y, x)].iter() {
        sink.put_pixel(c.offset(dx, dy));
        sink.put_pixel(c.offset(-dx, dy));
        sink.put_pixel(c.offset(-dx, -dy));
        sink.put_pixel(c.offset(dx, -dy));
    }
}

// Each copy is the previous one reflected across an axis turned another
// `360/n` degrees, so the copies alternate between rotations of the offset
// and rotations of its mirror image.
fn n_points<S: PixelSink + ?Sized>(c: Point, x: i32, y: i32, n: u32, sink: &mut S) {
    let (mut nx, mut ny) = (x as f64, y as f64);
    sink.put_pixel(c.offset(x, y));

    let delta = 360.0 / n as f64;
    for k in 1..n {
        let (s, co) = (-(k as f64 * delta)).to_radians().sin_cos();
        // into the rotated frame
        let xd = nx * co + ny * s;
        let yd = -nx * s + ny * co;
        // mirror, then back out
        let (rx, ry) = (-xd, yd);
        let fx = rx * co - ry * s;
        let fy = rx * s + ry * co;
        sink.put_pixel(c.offset(fx.round() as i32, fy.round() as i32));
        nx = fx;
        ny = fy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    type CircleFn = fn(Point, i32, Symmetry, &mut Vec<Point>);

    fn point_set(f: CircleFn, c: (i32, i32), r: i32, sym: Symmetry) -> BTreeSet<(i32, i32)> {
        let mut pts = Vec::new();
        f(c.into(), r, sym, &mut pts);
        pts.into_iter().map(|p| (p.x, p.y)).collect()
    }

    fn mapped<F: Fn((i32, i32)) -> (i32, i32)>(set: &BTreeSet<(i32, i32)>, f: F) -> BTreeSet<(i32, i32)> {
        set.iter().cloned().map(f).collect()
    }

    #[test]
    fn bresenham_radius_five_is_eightfold_symmetric() {
        let set = point_set(circle_bresenham, (0, 0), 5, Symmetry::Eight);
        assert_eq!(mapped(&set, |(x, y)| (-x, y)), set);
        assert_eq!(mapped(&set, |(x, y)| (x, -y)), set);
        assert_eq!(mapped(&set, |(x, y)| (y, x)), set);
        assert!(set.contains(&(0, 5)));
        assert!(set.contains(&(5, 0)));
        assert!(set.contains(&(3, 4)));
    }

    #[test]
    fn midpoint_is_eightfold_symmetric_around_offset_centre() {
        let set = point_set(circle_midpoint, (4, -2), 7, Symmetry::Eight);
        let local = mapped(&set, |(x, y)| (x - 4, y + 2));
        assert_eq!(mapped(&local, |(x, y)| (y, x)), local);
        assert_eq!(mapped(&local, |(x, y)| (-x, -y)), local);
    }

    #[test]
    fn points_stay_near_radius() {
        let algos: [CircleFn; 2] = [circle_bresenham, circle_midpoint];
        for &f in algos.iter() {
            for &r in [1, 3, 10, 17].iter() {
                for &(x, y) in point_set(f, (0, 0), r, Symmetry::Eight).iter() {
                    let d = ((x * x + y * y) as f64).sqrt();
                    assert!((d - r as f64).abs() < 1.0, "({}, {}) off radius {}", x, y, r);
                }
            }
        }
    }

    #[test]
    fn zero_radius_plots_centre() {
        let set = point_set(circle_bresenham, (3, 3), 0, Symmetry::points(16).unwrap());
        assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![(3, 3)]);
    }

    #[test]
    fn four_points_are_half_turn_symmetric() {
        let set = point_set(circle_bresenham, (0, 0), 6, Symmetry::points(4).unwrap());
        assert_eq!(mapped(&set, |(x, y)| (-x, -y)), set);
        assert_eq!(mapped(&set, |(x, y)| (-x, y)), set);
    }

    #[test]
    fn eight_points_by_reflection_are_quarter_turn_symmetric() {
        let set = point_set(circle_bresenham, (0, 0), 9, Symmetry::points(8).unwrap());
        assert_eq!(mapped(&set, |(x, y)| (-y, x)), set);
        assert_eq!(mapped(&set, |(x, y)| (-x, y)), set);
    }

    #[test]
    fn many_points_stay_near_radius() {
        let set = point_set(circle_midpoint, (0, 0), 12, Symmetry::points(64).unwrap());
        assert!(set.len() > 40);
        for &(x, y) in set.iter() {
            let d = ((x * x + y * y) as f64).sqrt();
            assert!((d - 12.0).abs() < 1.5);
        }
    }

    #[test]
    fn huge_radius_decisions_do_not_overflow() {
        assert_eq!(Decision::Bresenham.initial(1_500_000_000), -2_999_999_997);
        assert_eq!(Decision::Midpoint.initial(i32::MAX), 1 - i32::MAX as i64);
        let (mut p, mut x, mut y) = (Decision::Bresenham.initial(1_500_000_000), 0, 1_500_000_000);
        Decision::Bresenham.step(&mut p, &mut x, &mut y);
        assert_eq!((p, x, y), (-2_999_999_991, 1, 1_500_000_000));
    }

    #[test]
    fn points_past_the_range_saturate() {
        let mut pts = Vec::new();
        circle_midpoint(Point::new(i32::MAX - 1, 0), 3, Symmetry::Eight, &mut pts);
        assert!(pts.contains(&Point::new(i32::MAX, 0)));
        assert!(pts.contains(&Point::new(i32::MAX - 4, 0)));
        assert!(pts.iter().all(|p| p.x >= i32::MAX - 4));
    }

    #[test]
    fn symmetry_validation() {
        assert_eq!(Symmetry::points(16).unwrap(), Symmetry::Points(16));
        assert!(Symmetry::points(2).is_err());
        assert!(Symmetry::points(12).is_err());
        assert!(Symmetry::points(512).is_err());
        assert!(Symmetry::points(256).is_ok());
    }
}
