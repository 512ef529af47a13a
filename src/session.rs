//! One drawing followed by the interactive transform loop.

use crate::canvas::Canvas;
use crate::clip::{cohen_sutherland, midpoint_subdivision, placement, ClipOutcome, ClipRect, Placement};
use crate::config::Config;
use crate::error::Result;
use crate::raster::{circle_bresenham, circle_midpoint, ellipse_midpoint, line_bresenham, line_dda, line_midpoint,
                    Point, Symmetry};
use crate::surface::Surface;
use crate::transform::Command;
use log::{debug, info};

pub const INSIDE_MSG: &str = "The line is completely inside the window! No need to clip!";
pub const OUTSIDE_MSG: &str = "The line is completely outside the window! No need to clip!";
pub const PROMPT_MSG: &str = "Press any key to clip!";
pub const CLIPPED_MSG: &str = "Clipped!";
pub const REJECTED_MSG: &str = "Nothing of the line is left inside the window!";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LineAlgo {
    Dda,
    Bresenham,
    Midpoint,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CircleAlgo {
    Bresenham,
    Midpoint,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ClipAlgo {
    CohenSutherland,
    MidpointSubdivision,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    Line {
        algo: LineAlgo,
        from: Point,
        to: Point,
    },
    Circle {
        algo: CircleAlgo,
        center: Point,
        radius: i32,
        symmetry: Symmetry,
    },
    Ellipse {
        center: Point,
        major: i32,
        minor: i32,
    },
    Clip {
        algo: ClipAlgo,
        from: Point,
        to: Point,
        window: ClipRect,
    },
}

impl Shape {
    /// Scale and rotate happen around this point. Clip drawings have none.
    pub fn pivot(&self) -> Option<Point> {
        match self {
            Shape::Line { from, to, .. } => Some(from.midpoint(*to)),
            Shape::Circle { center, .. } | Shape::Ellipse { center, .. } => Some(*center),
            Shape::Clip { .. } => None,
        }
    }
}

pub struct Session<S: Surface> {
    surface: S,
    canvas: Canvas,
    config: Config,
    transforms_enabled: bool,
    show_graph: bool,
}

impl<S: Surface> Session<S> {
    pub fn new(surface: S, config: Config) -> Self {
        let (rows, cols) = surface.size();
        let canvas = Canvas::new(rows, cols, &config.pixel_glyph);
        Self { surface,
               canvas,
               config,
               transforms_enabled: true,
               show_graph: false }
    }

    pub fn show_graph(mut self, show: bool) -> Self {
        self.show_graph = show;
        self
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn transforms_enabled(&self) -> bool {
        self.transforms_enabled
    }

    pub fn draw(&mut self, shape: &Shape) -> Result<()> {
        info!("drawing {:?}", shape);
        if let Some(p) = shape.pivot() {
            self.canvas.set_pivot(p);
        }
        if self.show_graph {
            self.draw_graph()?;
        }
        match *shape {
            Shape::Line { algo, from, to } => match algo {
                LineAlgo::Dda => line_dda(from, to, &mut self.canvas),
                LineAlgo::Bresenham => line_bresenham(from, to, &mut self.canvas),
                LineAlgo::Midpoint => line_midpoint(from, to, &mut self.canvas),
            },
            Shape::Circle { algo,
                            center,
                            radius,
                            symmetry, } => match algo {
                CircleAlgo::Bresenham => circle_bresenham(center, radius, symmetry, &mut self.canvas),
                CircleAlgo::Midpoint => circle_midpoint(center, radius, symmetry, &mut self.canvas),
            },
            Shape::Ellipse { center, major, minor } => ellipse_midpoint(center, major, minor, &mut self.canvas),
            Shape::Clip { algo, from, to, window } => return self.clip(algo, from, to, &window),
        }
        self.present()
    }

    fn clip(&mut self, algo: ClipAlgo, from: Point, to: Point, window: &ClipRect) -> Result<()> {
        self.transforms_enabled = false;
        line_bresenham(from, to, &mut self.canvas);
        window.draw(&mut self.canvas);
        self.present()?;

        match placement(from, to, window) {
            Placement::Inside => return self.message(INSIDE_MSG),
            Placement::Outside => return self.message(OUTSIDE_MSG),
            Placement::Crossing => {},
        }
        self.message(PROMPT_MSG)?;
        if self.surface.wait_for_input()?.is_none() {
            debug!("input closed at the clip prompt, clipping anyway");
        }

        self.canvas.clear();
        self.surface.clear()?;
        if self.show_graph {
            self.draw_graph()?;
        }
        let kept = match algo {
            ClipAlgo::CohenSutherland => match cohen_sutherland(from, to, window) {
                ClipOutcome::Inside => {
                    line_bresenham(from, to, &mut self.canvas);
                    true
                },
                ClipOutcome::Clipped(p, q) => {
                    debug!("cohen-sutherland kept {} - {}", p, q);
                    line_bresenham(p, q, &mut self.canvas);
                    true
                },
                ClipOutcome::Rejected => false,
            },
            ClipAlgo::MidpointSubdivision => {
                let pieces = midpoint_subdivision(from, to, window);
                debug!("midpoint subdivision kept {} pieces", pieces.len());
                for &(p, q) in pieces.iter() {
                    line_bresenham(p, q, &mut self.canvas);
                }
                !pieces.is_empty()
            },
        };
        window.draw(&mut self.canvas);
        self.present()?;
        self.message(if kept { CLIPPED_MSG } else { REJECTED_MSG })
    }

    /// Reads keys until quit or until the input runs out.
    pub fn run(&mut self) -> Result<()> {
        while let Some(event) = self.surface.wait_for_input()? {
            match Command::from_event(&event) {
                Some(Command::Quit) => {
                    info!("quit");
                    return Ok(());
                },
                Some(cmd) if self.transforms_enabled => self.apply(cmd)?,
                Some(cmd) => debug!("transforms are disabled, ignoring {}", cmd.describe()),
                None => debug!("unbound key {:?}", event),
            }
        }
        debug!("input exhausted");
        Ok(())
    }

    pub fn apply(&mut self, cmd: Command) -> Result<()> {
        if let Some((m, mode)) = cmd.transform(&self.config) {
            info!("{}", cmd.describe());
            self.canvas.transform(&m, mode)?;
            self.redraw()?;
            self.message(cmd.describe())?;
        }
        Ok(())
    }

    fn message(&mut self, msg: &str) -> Result<()> {
        self.surface.show_message(msg)?;
        self.surface.flush()
    }

    fn present(&mut self) -> Result<()> {
        for cell in self.canvas.take_pending() {
            self.surface.draw(cell.row, cell.col, &cell.glyph)?;
        }
        self.surface.flush()
    }

    fn redraw(&mut self) -> Result<()> {
        self.surface.clear()?;
        if self.show_graph {
            self.draw_graph()?;
        }
        for cell in self.canvas.frame() {
            self.surface.draw(cell.row, cell.col, &cell.glyph)?;
        }
        self.surface.flush()
    }

    /// Row numbers down the left edge and column numbers along the bottom,
    /// both in logical units.
    pub fn draw_graph(&mut self) -> Result<()> {
        let (rows, cols) = self.surface.size();
        if rows == 0 || cols == 0 {
            return Ok(());
        }
        for row in 0..rows - 1 {
            self.surface.draw(row, 0, &format!("{:2}", rows - row - 1))?;
        }
        for col in (0..cols - 1).step_by(2) {
            self.surface.draw(rows - 1, col, &format!("{:2}", col / 2))?;
        }
        Ok(())
    }
}
