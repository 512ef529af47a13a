#[macro_use]
extern crate lazy_static;

pub mod canvas;
pub mod cli;
pub mod clip;
pub mod config;
mod core;
pub mod error;
pub mod events;
pub mod matrix;
pub mod raster;
pub mod session;
pub mod surface;
pub mod terminal;
pub mod transform;

pub use canvas::{Canvas, PivotMode};
pub use clip::{ClipOutcome, ClipRect, RegionCode};
pub use config::Config;
pub use error::{Error, Result};
pub use events::{Direction, Event, Input};
pub use matrix::Matrix;
pub use raster::{PixelSink, Point, Symmetry};
pub use session::{Session, Shape};
pub use surface::{HeadlessSurface, Surface};
pub use terminal::Term;
pub use transform::Command;
