//! Line clipping against an axis-aligned window.

use crate::error::{Error, Result};
use crate::raster::{PixelSink, Point};
use bitflags::bitflags;
use log::trace;

bitflags! {
    /// Cohen-Sutherland outcode.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub struct RegionCode: u8 {
        const LEFT = 1;
        const RIGHT = 1 << 1;
        const BOTTOM = 1 << 2;
        const TOP = 1 << 3;
    }
}

const BOTTOM_LEFT: &str = "┗━";
const BOTTOM_RIGHT: &str = "┛";
const TOP_LEFT: &str = "┏━";
const TOP_RIGHT: &str = "┓";
const VERTICAL: &str = "┃";
const HORIZONTAL: &str = "━━";

// Each pass moves one endpoint onto a boundary; more than this means the
// rounded intersections are oscillating outside the window.
const MAX_PASSES: usize = 8;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ClipRect {
    pub xmin: i32,
    pub ymin: i32,
    pub xmax: i32,
    pub ymax: i32,
}

impl ClipRect {
    pub fn new(bottom_left: Point, top_right: Point) -> Result<Self> {
        if bottom_left.x > top_right.x || bottom_left.y > top_right.y {
            return Err(Error::config(format!("clip window corners are inverted: bottom-left {} is not below and \
                                              left of top-right {}",
                                             bottom_left, top_right)));
        }
        Ok(ClipRect { xmin: bottom_left.x,
                      ymin: bottom_left.y,
                      xmax: top_right.x,
                      ymax: top_right.y })
    }

    pub fn classify(&self, p: Point) -> RegionCode {
        let mut code = RegionCode::empty();
        code.set(RegionCode::LEFT, p.x < self.xmin);
        code.set(RegionCode::RIGHT, p.x > self.xmax);
        code.set(RegionCode::BOTTOM, p.y < self.ymin);
        code.set(RegionCode::TOP, p.y > self.ymax);
        code
    }

    pub fn contains(&self, p: Point) -> bool {
        self.classify(p).is_empty()
    }

    /// Box-drawing outline. Corners go last so they are not overdrawn by the edges.
    pub fn draw<S: PixelSink + ?Sized>(&self, sink: &mut S) {
        for x in self.xmin..self.xmax {
            sink.set_pixel(Point::new(x, self.ymax), HORIZONTAL);
            sink.set_pixel(Point::new(x, self.ymin), HORIZONTAL);
        }
        for y in self.ymin..self.ymax {
            sink.set_pixel(Point::new(self.xmin, y), VERTICAL);
            sink.set_pixel(Point::new(self.xmax, y), VERTICAL);
        }
        sink.set_pixel(Point::new(self.xmin, self.ymin), BOTTOM_LEFT);
        sink.set_pixel(Point::new(self.xmin, self.ymax), TOP_LEFT);
        sink.set_pixel(Point::new(self.xmax, self.ymin), BOTTOM_RIGHT);
        sink.set_pixel(Point::new(self.xmax, self.ymax), TOP_RIGHT);
    }
}

/// Where a segment stands relative to a window before any clipping.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Placement {
    Inside,
    Outside,
    Crossing,
}

pub fn placement(from: Point, to: Point, rect: &ClipRect) -> Placement {
    let (c1, c2) = (rect.classify(from), rect.classify(to));
    if c1.is_empty() && c2.is_empty() {
        Placement::Inside
    } else if c1.intersects(c2) {
        Placement::Outside
    } else {
        Placement::Crossing
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ClipOutcome {
    Inside,
    Rejected,
    Clipped(Point, Point),
}

pub type Segment = (Point, Point);

fn round(v: f64) -> i32 {
    v.round() as i32
}

// Intersection of the unclipped line with the boundary named by `code`.
fn intersect(from: Point, to: Point, code: RegionCode, rect: &ClipRect) -> Point {
    let (x1, y1) = (from.x as f64, from.y as f64);
    let (dx, dy) = ((to.x - from.x) as f64, (to.y - from.y) as f64);
    if code.contains(RegionCode::TOP) {
        Point::new(round(x1 + dx * (rect.ymax as f64 - y1) / dy), rect.ymax)
    } else if code.contains(RegionCode::BOTTOM) {
        Point::new(round(x1 + dx * (rect.ymin as f64 - y1) / dy), rect.ymin)
    } else if code.contains(RegionCode::RIGHT) {
        Point::new(rect.xmax, round(y1 + dy * (rect.xmax as f64 - x1) / dx))
    } else {
        Point::new(rect.xmin, round(y1 + dy * (rect.xmin as f64 - x1) / dx))
    }
}

pub fn cohen_sutherland(from: Point, to: Point, rect: &ClipRect) -> ClipOutcome {
    let (mut p, mut q) = (from, to);
    for pass in 0..MAX_PASSES {
        let (cp, cq) = (rect.classify(p), rect.classify(q));
        if cp.is_empty() && cq.is_empty() {
            return if pass == 0 {
                ClipOutcome::Inside
            } else {
                ClipOutcome::Clipped(p, q)
            };
        }
        if cp.intersects(cq) {
            return ClipOutcome::Rejected;
        }
        // a code only has a bit set when dx or dy is nonzero along that axis
        if !cp.is_empty() {
            p = intersect(from, to, cp, rect);
            trace!("clipped start to {}", p);
        } else {
            q = intersect(from, to, cq, rect);
            trace!("clipped end to {}", q);
        }
    }
    ClipOutcome::Rejected
}

/// Recursive bisection. Pieces whose midpoint coincides with an endpoint are
/// too short to split further and are dropped.
pub fn midpoint_subdivision(from: Point, to: Point, rect: &ClipRect) -> Vec<Segment> {
    let mut out = Vec::new();
    subdivide(from, to, rect, &mut out);
    out
}

fn subdivide(from: Point, to: Point, rect: &ClipRect, out: &mut Vec<Segment>) {
    match placement(from, to, rect) {
        Placement::Inside => out.push((from, to)),
        Placement::Outside => {},
        Placement::Crossing => {
            let mid = from.midpoint(to);
            if mid == from || mid == to {
                return;
            }
            subdivide(from, mid, rect, out);
            subdivide(mid, to, rect, out);
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn window() -> ClipRect {
        ClipRect::new(Point::new(10, 10), Point::new(30, 20)).unwrap()
    }

    #[test]
    fn region_codes() {
        let r = window();
        assert_eq!(r.classify(Point::new(15, 15)), RegionCode::empty());
        assert_eq!(r.classify(Point::new(5, 15)), RegionCode::LEFT);
        assert_eq!(r.classify(Point::new(35, 25)), RegionCode::RIGHT | RegionCode::TOP);
        assert_eq!(r.classify(Point::new(5, 5)), RegionCode::LEFT | RegionCode::BOTTOM);
        assert_eq!(RegionCode::TOP.bits(), 8);
        assert!(r.contains(Point::new(30, 20)));
    }

    #[test]
    fn inverted_window_is_rejected() {
        assert!(ClipRect::new(Point::new(5, 5), Point::new(1, 9)).is_err());
        assert!(ClipRect::new(Point::new(5, 5), Point::new(9, 1)).is_err());
        assert!(ClipRect::new(Point::new(5, 5), Point::new(5, 5)).is_ok());
    }

    #[test]
    fn inside_segment_is_unchanged() {
        let r = window();
        assert_eq!(cohen_sutherland(Point::new(12, 12), Point::new(28, 18), &r), ClipOutcome::Inside);
        assert_eq!(midpoint_subdivision(Point::new(12, 12), Point::new(28, 18), &r),
                   vec![(Point::new(12, 12), Point::new(28, 18))]);
    }

    #[test]
    fn trivially_outside_is_rejected() {
        let r = window();
        let (a, b) = (Point::new(0, 25), Point::new(40, 28));
        assert_eq!(placement(a, b, &r), Placement::Outside);
        assert_eq!(cohen_sutherland(a, b, &r), ClipOutcome::Rejected);
        assert!(midpoint_subdivision(a, b, &r).is_empty());
    }

    #[test]
    fn crossing_outside_the_corner_is_rejected() {
        let r = window();
        assert_eq!(cohen_sutherland(Point::new(0, 18), Point::new(14, 32), &r), ClipOutcome::Rejected);
    }

    #[rstest]
    #[case::horizontal((0, 15), (40, 15), (10, 15), (30, 15))]
    #[case::vertical((20, 0), (20, 40), (20, 10), (20, 20))]
    #[case::diagonal((0, 5), (40, 25), (10, 10), (30, 20))]
    #[case::reversed((40, 25), (0, 5), (30, 20), (10, 10))]
    fn cohen_sutherland_clips_to_the_boundary(#[case] from: (i32, i32),
                                              #[case] to: (i32, i32),
                                              #[case] p: (i32, i32),
                                              #[case] q: (i32, i32)) {
        assert_eq!(cohen_sutherland(from.into(), to.into(), &window()),
                   ClipOutcome::Clipped(p.into(), q.into()));
    }

    #[test]
    fn one_endpoint_inside() {
        let r = window();
        match cohen_sutherland(Point::new(20, 15), Point::new(50, 15), &r) {
            ClipOutcome::Clipped(p, q) => {
                assert_eq!(p, Point::new(20, 15));
                assert_eq!(q, Point::new(30, 15));
            },
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn subdivision_pieces_lie_inside() {
        let r = window();
        let pieces = midpoint_subdivision(Point::new(0, 5), Point::new(40, 25), &r);
        assert!(!pieces.is_empty());
        for (a, b) in pieces.iter() {
            assert!(r.contains(*a) && r.contains(*b), "{} - {} leaves the window", a, b);
        }
    }

    #[test]
    fn outline_corners_win() {
        let mut sink = Recorder::default();
        ClipRect::new(Point::new(1, 1), Point::new(3, 2)).unwrap().draw(&mut sink);
        let last = |p: Point| sink.0.iter().rev().find(|(q, _)| *q == p).map(|(_, g)| g.clone());
        assert_eq!(last(Point::new(1, 1)).as_deref(), Some(BOTTOM_LEFT));
        assert_eq!(last(Point::new(3, 2)).as_deref(), Some(TOP_RIGHT));
        assert_eq!(last(Point::new(2, 1)).as_deref(), Some(HORIZONTAL));
        assert_eq!(last(Point::new(3, 1)).as_deref(), Some(BOTTOM_RIGHT));
    }

    #[derive(Default)]
    struct Recorder(Vec<(Point, String)>);

    impl PixelSink for Recorder {
        fn put_pixel(&mut self, p: Point) {
            self.0.push((p, String::new()))
        }

        fn set_pixel(&mut self, p: Point, glyph: &str) {
            self.0.push((p, glyph.to_owned()))
        }
    }
}
