use crate::clip::ClipRect;
use crate::error::{Error, Result};
use crate::raster::{Point, Symmetry};
use crate::session::{CircleAlgo, ClipAlgo, LineAlgo, Shape};
use clap::{Parser, ValueEnum};
use std::env;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Object {
    Line,
    Circle,
    Ellipse,
    Clip,
}

/// Draw lines, circles and ellipses on the terminal, then pan and zoom them.
///
/// Keys: arrows pan, z/x zoom in/out, q quits.
#[derive(Debug, Parser)]
#[command(name = "termraster", version)]
pub struct Cli {
    /// Object to draw
    #[arg(short = 'o', long = "object", value_enum)]
    pub object: Object,

    /// line: dda|bresenham|midpoint, circle: bresenham|midpoint, clip: cohen|midpoint
    #[arg(short = 'a', long = "algo")]
    pub algo: Option<String>,

    /// Start point of a line, or centre of a circle or ellipse (x,y)
    #[arg(short = 'x', long = "start", allow_hyphen_values = true)]
    pub start: Option<Point>,

    /// End point of a line (x,y)
    #[arg(short = 'y', long = "end", allow_hyphen_values = true)]
    pub end: Option<Point>,

    #[arg(short = 'r', long = "radius", allow_hyphen_values = true)]
    pub radius: Option<i32>,

    /// Power of two between 4 and 256
    #[arg(short = 's', long = "symmetry")]
    pub symmetry: Option<u32>,

    /// Semi-axis along x
    #[arg(short = 'm', long = "major", allow_hyphen_values = true)]
    pub major: Option<i32>,

    /// Semi-axis along y
    #[arg(short = 'n', long = "minor", allow_hyphen_values = true)]
    pub minor: Option<i32>,

    /// Bottom-left corner of the clip window (x,y)
    #[arg(short = 'b', long = "bottom", allow_hyphen_values = true)]
    pub bottom: Option<Point>,

    /// Top-right corner of the clip window (x,y)
    #[arg(short = 't', long = "top", allow_hyphen_values = true)]
    pub top: Option<Point>,

    /// Label the axes
    #[arg(short = 'g', long = "showgraph")]
    pub showgraph: bool,

    /// Render into memory and print the final screen instead of using the terminal
    #[arg(long)]
    pub headless: bool,

    /// Comma separated keys fed to the headless session, e.g. left,z,q
    #[arg(long, requires = "headless")]
    pub keys: Option<String>,

    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Write logs here; defaults to stderr when headless and to termraster.log in the temp dir otherwise
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Largest accepted coordinate magnitude, radius or semi-axis. Anything this
/// far out is already off every terminal.
pub const MAX_COORDINATE: i32 = 1_000_000;

fn required<T>(value: Option<T>, what: &str) -> Result<T> {
    value.ok_or_else(|| Error::config(format!("expected argument {}", what)))
}

fn pick<T: Copy>(algo: Option<&str>, choices: &[(&str, T)], object: &str) -> Result<T> {
    let names = choices.iter().map(|(n, _)| *n).collect::<Vec<_>>().join(", ");
    let algo = algo.ok_or_else(|| Error::config(format!("specify the algorithm to draw a {} with ({})", object, names)))?;
    choices.iter()
           .find(|(n, _)| n.eq_ignore_ascii_case(algo))
           .map(|(_, v)| *v)
           .ok_or_else(|| Error::config(format!("unknown {} algorithm '{}' (expected one of {})", object, algo, names)))
}

fn length(v: i32, what: &str) -> Result<i32> {
    if v < 0 {
        return Err(Error::config(format!("{} must not be negative (given: {})", what, v)));
    }
    if v > MAX_COORDINATE {
        return Err(Error::config(format!("{} must be at most {} (given: {})", what, MAX_COORDINATE, v)));
    }
    Ok(v)
}

fn point(p: Option<Point>, what: &str) -> Result<Point> {
    let p = required(p, what)?;
    let limit = MAX_COORDINATE as u32;
    if p.x.unsigned_abs() > limit || p.y.unsigned_abs() > limit {
        return Err(Error::config(format!("coordinates of {} must lie within ±{} (given: {})",
                                         what, MAX_COORDINATE, p)));
    }
    Ok(p)
}

impl Cli {
    /// The alternate screen owns the terminal while a session runs, so
    /// interactive runs log to a file unless told otherwise.
    pub fn log_target(&self) -> Option<PathBuf> {
        match &self.log_file {
            Some(path) => Some(path.clone()),
            None if !self.headless => Some(env::temp_dir().join("termraster.log")),
            None => None,
        }
    }

    pub fn shape(&self) -> Result<Shape> {
        let algo = self.algo.as_deref();
        match self.object {
            Object::Line => Ok(Shape::Line { algo: pick(algo,
                                                       &[("dda", LineAlgo::Dda),
                                                         ("bresenham", LineAlgo::Bresenham),
                                                         ("midpoint", LineAlgo::Midpoint)],
                                                       "line")?,
                                             from: point(self.start, "-x (starting point)")?,
                                             to: point(self.end, "-y (ending point)")? }),
            Object::Circle => {
                let symmetry = match self.symmetry {
                    Some(n) => Symmetry::points(n)?,
                    None => Symmetry::default(),
                };
                Ok(Shape::Circle { algo: pick(algo,
                                              &[("bresenham", CircleAlgo::Bresenham), ("midpoint", CircleAlgo::Midpoint)],
                                              "circle")?,
                                   center: point(self.start, "-x (centre)")?,
                                   radius: length(required(self.radius, "-r (radius)")?, "radius")?,
                                   symmetry })
            },
            Object::Ellipse => Ok(Shape::Ellipse { center: point(self.start, "-x (centre)")?,
                                                   major: length(required(self.major, "-m (major axis length)")?,
                                                                 "major axis")?,
                                                   minor: length(required(self.minor, "-n (minor axis length)")?,
                                                                 "minor axis")? }),
            Object::Clip => {
                let window = ClipRect::new(point(self.bottom, "-b (bottom left corner of the clip window)")?,
                                           point(self.top, "-t (top right corner of the clip window)")?)?;
                Ok(Shape::Clip { algo: pick(algo,
                                            &[("cohen", ClipAlgo::CohenSutherland),
                                              ("midpoint", ClipAlgo::MidpointSubdivision)],
                                            "clip")?,
                                 from: point(self.start, "-x (starting point of the line)")?,
                                 to: point(self.end, "-y (ending point of the line)")?,
                                 window })
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Shape> {
        let cli = Cli::try_parse_from(std::iter::once("termraster").chain(args.iter().cloned()))
            .map_err(|e| Error::config(e.to_string()))?;
        cli.shape()
    }

    #[test]
    fn line() {
        let shape = parse(&["-o", "line", "-a", "bresenham", "-x", "0,0", "-y", "5,-3"]).unwrap();
        assert_eq!(shape,
                   Shape::Line { algo: LineAlgo::Bresenham,
                                 from: Point::new(0, 0),
                                 to: Point::new(5, -3) });
    }

    #[test]
    fn circle_with_symmetry() {
        let shape = parse(&["-o", "circle", "-a", "midpoint", "-x", "20,20", "-r", "7", "-s", "16"]).unwrap();
        assert_eq!(shape,
                   Shape::Circle { algo: CircleAlgo::Midpoint,
                                   center: Point::new(20, 20),
                                   radius: 7,
                                   symmetry: Symmetry::Points(16) });
    }

    #[test]
    fn clip_window() {
        let shape = parse(&["-o", "clip", "-a", "cohen", "-x", "0,5", "-y", "40,25", "-b", "10,10", "-t", "30,20"]).unwrap();
        match shape {
            Shape::Clip { algo, window, .. } => {
                assert_eq!(algo, ClipAlgo::CohenSutherland);
                assert_eq!((window.xmin, window.ymax), (10, 20));
            },
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn rejected_input() {
        let bad: &[&[&str]] = &[&["-o", "line", "-a", "cohen", "-x", "0,0", "-y", "1,1"],
                                &["-o", "line", "-x", "0,0", "-y", "1,1"],
                                &["-o", "line", "-a", "dda", "-x", "0,0"],
                                &["-o", "line", "-a", "dda", "-x", "0;0", "-y", "1,1"],
                                &["-o", "circle", "-a", "bresenham", "-x", "0,0", "-r", "5", "-s", "12"],
                                &["-o", "circle", "-a", "bresenham", "-x", "0,0", "-r", "-5"],
                                &["-o", "circle", "-a", "bresenham", "-x", "0,0", "-r", "five"],
                                &["-o", "ellipse", "-x", "0,0", "-m", "4"],
                                &["-o", "clip", "-a", "midpoint", "-x", "0,0", "-y", "1,1", "-b", "9,9", "-t", "1,1"],
                                &["-o", "square"],
                                &["-o", "line", "-a", "dda", "-x=-2000000000,0", "-y", "2000000000,0"],
                                &["-o", "circle", "-a", "bresenham", "-x", "0,0", "-r", "1500000000"],
                                &["-o", "ellipse", "-x", "0,0", "-m", "4", "-n", "1000001"],
                                &["-o", "clip", "-a", "cohen", "-x", "0,0", "-y", "1,1", "-b", "0,0", "-t",
                                  "5,-2147483648"],
                                &["-o", "line", "-a", "dda", "-x", "0,-2147483648", "-y", "1,1"]];
        for args in bad.iter() {
            assert!(matches!(parse(args), Err(Error::Configuration(_))), "accepted {:?}", args);
        }
    }

    #[test]
    fn coordinates_up_to_the_limit_are_accepted() {
        let far = format!("{},-{}", MAX_COORDINATE, MAX_COORDINATE);
        let shape = parse(&["-o", "line", "-a", "dda", "-x", far.as_str(), "-y", "0,0"]).unwrap();
        assert_eq!(shape,
                   Shape::Line { algo: LineAlgo::Dda,
                                 from: Point::new(MAX_COORDINATE, -MAX_COORDINATE),
                                 to: Point::new(0, 0) });
        let r = MAX_COORDINATE.to_string();
        assert!(parse(&["-o", "circle", "-a", "midpoint", "-x", "0,0", "-r", r.as_str()]).is_ok());
    }

    #[test]
    fn interactive_runs_log_to_a_file() {
        let cli = Cli::try_parse_from(["termraster", "-o", "line"]).unwrap();
        assert_eq!(cli.log_target(), Some(env::temp_dir().join("termraster.log")));
        let cli = Cli::try_parse_from(["termraster", "-o", "line", "--headless"]).unwrap();
        assert_eq!(cli.log_target(), None);
        let cli = Cli::try_parse_from(["termraster", "-o", "line", "--headless", "--log-file", "run.log"]).unwrap();
        assert_eq!(cli.log_target(), Some(PathBuf::from("run.log")));
    }

    #[test]
    fn keys_need_headless() {
        assert!(Cli::try_parse_from(["termraster", "-o", "line", "--keys", "q"]).is_err());
        let cli = Cli::try_parse_from(["termraster", "-o", "line", "--headless", "--keys", "q"]).unwrap();
        assert_eq!(cli.keys.as_deref(), Some("q"));
    }
}
