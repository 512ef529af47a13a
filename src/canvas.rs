//! The lit-pixel bitmap and the pivot it is transformed around.
//!
//! Drawing goes through [`PixelSink`] in logical coordinates (origin
//! bottom-left). Each logical pixel lands on device cell
//! `(rows - y - 1, 2x + 1)`; cells outside the viewport are dropped.
//! Glyphs are queued until the owner presents them to a surface.

use crate::error::Result;
use crate::matrix::Matrix;
use crate::raster::{PixelSink, Point};
use log::{debug, trace};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub glyph: String,
}

/// How a transform treats the pivot.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PivotMode {
    /// `M·(P − F) + F`; the pivot stays put (scale, rotate).
    Relative,
    /// `M·P`; the pivot is carried along as `M·F` (pan).
    Carry,
}

#[derive(Clone, Debug)]
pub struct Canvas {
    rows: usize,
    cols: usize,
    lit: Vec<bool>,
    pivot: (f64, f64),
    pixel_glyph: String,
    pending: Vec<Cell>,
}

impl Canvas {
    pub fn new(rows: usize, cols: usize, pixel_glyph: &str) -> Self {
        Self { rows,
               cols,
               lit: vec![false; rows * cols],
               pivot: (0.0, 0.0),
               pixel_glyph: pixel_glyph.to_owned(),
               pending: Vec::new() }
    }

    /// Device cell `(row, col)` of a logical point, if it is on screen.
    pub fn to_device(&self, p: Point) -> Option<(usize, usize)> {
        let (col, row) = self.device_coords(p);
        self.checked(col, row)
    }

    fn device_coords(&self, p: Point) -> (i64, i64) {
        (2 * p.x as i64 + 1, self.rows as i64 - p.y as i64 - 1)
    }

    fn checked(&self, col: i64, row: i64) -> Option<(usize, usize)> {
        if row < 0 || col < 0 || row >= self.rows as i64 || col >= self.cols as i64 {
            None
        } else {
            Some((row as usize, col as usize))
        }
    }

    /// Sets the pivot from a logical point; it may lie off screen.
    pub fn set_pivot(&mut self, p: Point) {
        let (col, row) = self.device_coords(p);
        self.pivot = (col as f64, row as f64);
        debug!("pivot set to {} (device col {}, row {})", p, col, row);
    }

    /// Pivot in device space as `(col, row)`.
    pub fn pivot(&self) -> (f64, f64) {
        self.pivot
    }

    pub fn is_lit(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && self.lit[row * self.cols + col]
    }

    pub fn lit_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let cols = self.cols;
        self.lit.iter().enumerate().filter(|(_, on)| **on).map(move |(k, _)| (k / cols, k % cols))
    }

    pub fn lit_count(&self) -> usize {
        self.lit.iter().filter(|&&on| on).count()
    }

    pub fn clear(&mut self) {
        self.lit.iter_mut().for_each(|on| *on = false);
        self.pending.clear();
    }

    /// Glyph draws queued since the last call.
    pub fn take_pending(&mut self) -> Vec<Cell> {
        std::mem::replace(&mut self.pending, Vec::new())
    }

    /// Every lit cell drawn with the pixel glyph, for a full redraw.
    pub fn frame(&self) -> Vec<Cell> {
        self.lit_cells()
            .map(|(row, col)| Cell { row,
                                     col,
                                     glyph: self.pixel_glyph.clone() })
            .collect()
    }

    /// Re-projects every lit cell through `m` and replaces the bitmap.
    /// Cells that land outside the viewport are gone for good.
    pub fn transform(&mut self, m: &Matrix, mode: PivotMode) -> Result<()> {
        let pivot = Matrix::from_rows([[self.pivot.0], [self.pivot.1], [1.0]]);
        let mut next = vec![false; self.rows * self.cols];
        let (mut kept, mut dropped) = (0usize, 0usize);

        for (row, col) in self.lit_cells() {
            let point = Matrix::from_rows([[col as f64], [row as f64], [1.0]]);
            let moved = match mode {
                PivotMode::Relative => m.multiply(&point.subtract(&pivot)?)?.add(&pivot)?,
                PivotMode::Carry => m.multiply(&point)?,
            };
            let (x, y) = (moved.get(0, 0).floor() as i64, moved.get(1, 0).floor() as i64);
            match self.checked(x, y) {
                Some((r, c)) => {
                    next[r * self.cols + c] = true;
                    kept += 1;
                },
                None => {
                    trace!("cell ({}, {}) left the viewport at ({}, {})", row, col, y, x);
                    dropped += 1;
                },
            }
        }

        if mode == PivotMode::Carry {
            let moved = m.multiply(&pivot)?;
            self.pivot = (moved.get(0, 0), moved.get(1, 0));
        }
        self.lit = next;
        debug!("transform kept {} cells, dropped {}", kept, dropped);
        Ok(())
    }

    fn light(&mut self, p: Point, glyph: String) {
        match self.to_device(p) {
            Some((row, col)) => {
                self.lit[row * self.cols + col] = true;
                self.pending.push(Cell { row, col, glyph });
            },
            None => trace!("pixel {} is off screen", p),
        }
    }
}

impl PixelSink for Canvas {
    fn put_pixel(&mut self, p: Point) {
        let glyph = self.pixel_glyph.clone();
        self.light(p, glyph)
    }

    fn set_pixel(&mut self, p: Point, glyph: &str) {
        self.light(p, glyph.to_owned())
    }
}
