//! Device-cell display backends.
//!
//! A [`Surface`] knows nothing about logical coordinates or the lit-pixel
//! bitmap; it draws glyphs into `(row, col)` cells with row 0 at the top.

mod headless;

pub use self::headless::HeadlessSurface;

use crate::error::Result;
use crate::events::Event;
use unicode_width::UnicodeWidthChar;

pub trait Surface {
    /// `(rows, cols)`, fixed for the lifetime of the surface.
    fn size(&self) -> (usize, usize);

    fn draw(&mut self, row: usize, col: usize, glyph: &str) -> Result<()>;

    fn clear(&mut self) -> Result<()>;

    /// Writes a status line at the top-left corner.
    fn show_message(&mut self, msg: &str) -> Result<()>;

    /// Blocks until a key arrives. `None` means the input source is exhausted.
    fn wait_for_input(&mut self) -> Result<Option<Event>>;

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

pub fn width_char(c: char, cjk: bool) -> usize {
    if cjk {
        UnicodeWidthChar::width_cjk(c).unwrap_or_default()
    } else {
        UnicodeWidthChar::width(c).unwrap_or_default()
    }
}

pub fn width_str(s: &str, cjk: bool) -> usize {
    s.chars().map(|c| width_char(c, cjk)).sum()
}
