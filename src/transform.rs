//! Homogeneous 2D transforms and the key bindings that drive them.

use crate::canvas::PivotMode;
use crate::config::Config;
use crate::events::{Direction, Event, Input};
use crate::matrix::Matrix;

pub fn translate(tx: f64, ty: f64) -> Matrix {
    Matrix::from_rows([[1.0, 0.0, tx], [0.0, 1.0, ty], [0.0, 0.0, 1.0]])
}

pub fn scale(sx: f64, sy: f64) -> Matrix {
    Matrix::from_rows([[sx, 0.0, 0.0], [0.0, sy, 0.0], [0.0, 0.0, 1.0]])
}

/// Counter-clockwise by `degrees` in a y-up frame.
pub fn rotate(degrees: f64) -> Matrix {
    let (s, c) = degrees.to_radians().sin_cos();
    Matrix::from_rows([[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]])
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Command {
    Pan(Direction),
    ZoomIn,
    ZoomOut,
    RotateCcw,
    RotateCw,
    Quit,
}

impl Command {
    pub fn from_event(event: &Event) -> Option<Command> {
        match event {
            Event::Raw(Input::Arrow(d)) => Some(Command::Pan(*d)),
            Event::Raw(Input::Chars(s)) => match s.as_str() {
                "z" | "Z" => Some(Command::ZoomIn),
                "x" | "X" => Some(Command::ZoomOut),
                #[cfg(feature = "rotation")]
                "a" | "A" => Some(Command::RotateCcw),
                #[cfg(feature = "rotation")]
                "s" | "S" => Some(Command::RotateCw),
                "q" | "Q" => Some(Command::Quit),
                _ => None,
            },
            _ => None,
        }
    }

    /// Matrix and pivot handling for this command, or `None` for quit.
    /// Pan steps are in device cells, so Up lowers the row.
    pub fn transform(self, config: &Config) -> Option<(Matrix, PivotMode)> {
        let step = config.pan_step;
        let m = match self {
            Command::Pan(Direction::Up) => return Some((translate(0.0, -step), PivotMode::Carry)),
            Command::Pan(Direction::Down) => return Some((translate(0.0, step), PivotMode::Carry)),
            Command::Pan(Direction::Left) => return Some((translate(-step, 0.0), PivotMode::Carry)),
            Command::Pan(Direction::Right) => return Some((translate(step, 0.0), PivotMode::Carry)),
            Command::ZoomIn => scale(config.zoom_in, config.zoom_in),
            Command::ZoomOut => scale(config.zoom_out, config.zoom_out),
            Command::RotateCcw => rotate(config.rotation_step),
            Command::RotateCw => rotate(-config.rotation_step),
            Command::Quit => return None,
        };
        Some((m, PivotMode::Relative))
    }

    pub fn describe(self) -> &'static str {
        match self {
            Command::Pan(Direction::Up) => "pan up",
            Command::Pan(Direction::Down) => "pan down",
            Command::Pan(Direction::Left) => "pan left",
            Command::Pan(Direction::Right) => "pan right",
            Command::ZoomIn => "zoom in",
            Command::ZoomOut => "zoom out",
            Command::RotateCcw => "rotate counter-clockwise",
            Command::RotateCw => "rotate clockwise",
            Command::Quit => "quit",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(m: &Matrix, x: f64, y: f64) -> (f64, f64) {
        let p = m.multiply(&Matrix::from_rows([[x], [y], [1.0]])).unwrap();
        (p.get(0, 0), p.get(1, 0))
    }

    fn key(s: &str) -> Event {
        Event::Raw(Input::Chars(s.into()))
    }

    #[test]
    fn builders() {
        assert_eq!(apply(&translate(2.0, -3.0), 1.0, 1.0), (3.0, -2.0));
        assert_eq!(apply(&scale(1.5, 2.0), 2.0, 3.0), (3.0, 6.0));
        let (x, y) = apply(&rotate(90.0), 1.0, 0.0);
        assert!(x.abs() < 1e-12 && (y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn key_bindings() {
        assert_eq!(Command::from_event(&key("z")), Some(Command::ZoomIn));
        assert_eq!(Command::from_event(&key("X")), Some(Command::ZoomOut));
        assert_eq!(Command::from_event(&key("Q")), Some(Command::Quit));
        assert_eq!(Command::from_event(&Event::Raw(Input::Arrow(Direction::Left))),
                   Some(Command::Pan(Direction::Left)));
        assert_eq!(Command::from_event(&Event::Ctrl(Input::Arrow(Direction::Left))), None);
        assert_eq!(Command::from_event(&key("k")), None);
    }

    #[cfg(feature = "rotation")]
    #[test]
    fn rotation_bindings() {
        assert_eq!(Command::from_event(&key("a")), Some(Command::RotateCcw));
        assert_eq!(Command::from_event(&key("S")), Some(Command::RotateCw));
    }

    #[cfg(not(feature = "rotation"))]
    #[test]
    fn rotation_keys_are_unbound() {
        assert_eq!(Command::from_event(&key("a")), None);
        assert_eq!(Command::from_event(&key("s")), None);
    }

    #[test]
    fn pan_up_moves_towards_row_zero() {
        let config = Config::default();
        let (m, mode) = Command::Pan(Direction::Up).transform(&config).unwrap();
        assert_eq!(mode, PivotMode::Carry);
        assert_eq!(apply(&m, 4.0, 4.0), (4.0, 3.0));
        let (m, mode) = Command::ZoomIn.transform(&config).unwrap();
        assert_eq!(mode, PivotMode::Relative);
        assert_eq!(apply(&m, 2.0, 2.0), (3.0, 3.0));
        assert!(Command::Quit.transform(&config).is_none());
    }
}
