use super::{width_char, Surface};
use crate::error::Result;
use crate::events::Event;
use std::collections::VecDeque;

const BLANK: char = ' ';
// second half of a wide glyph
const WIDE_TAIL: char = '\0';

/// In-memory surface with a scripted key queue.
#[derive(Clone, Debug)]
pub struct HeadlessSurface {
    rows: usize,
    cols: usize,
    cells: Vec<char>,
    keys: VecDeque<Event>,
    messages: Vec<String>,
    cjk: bool,
}

impl HeadlessSurface {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows,
               cols,
               cells: vec![BLANK; rows * cols],
               keys: VecDeque::new(),
               messages: Vec::new(),
               cjk: false }
    }

    pub fn with_keys<I: IntoIterator<Item = Event>>(rows: usize, cols: usize, keys: I) -> Self {
        let mut s = Self::new(rows, cols);
        s.keys.extend(keys);
        s
    }

    pub fn cjk(mut self, cjk: bool) -> Self {
        self.cjk = cjk;
        self
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<char> {
        if row < self.rows && col < self.cols {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn pending_keys(&self) -> usize {
        self.keys.len()
    }

    pub fn render(&self) -> String {
        self.cells
            .chunks(self.cols)
            .map(|line| {
                let s: String = line.iter().filter(|&&c| c != WIDE_TAIL).collect();
                s.trim_end().to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn put_str(&mut self, row: usize, mut col: usize, s: &str) {
        if row >= self.rows {
            return;
        }
        for c in s.chars() {
            let w = width_char(c, self.cjk);
            if w == 0 {
                continue;
            }
            if col + w > self.cols {
                break;
            }
            let base = row * self.cols + col;
            self.cells[base] = c;
            for k in 1..w {
                self.cells[base + k] = WIDE_TAIL;
            }
            col += w;
        }
    }
}

impl Surface for HeadlessSurface {
    fn size(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    fn draw(&mut self, row: usize, col: usize, glyph: &str) -> Result<()> {
        self.put_str(row, col, glyph);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.cells.iter_mut().for_each(|c| *c = BLANK);
        Ok(())
    }

    fn show_message(&mut self, msg: &str) -> Result<()> {
        self.put_str(0, 0, msg);
        self.messages.push(msg.to_owned());
        Ok(())
    }

    fn wait_for_input(&mut self) -> Result<Option<Event>> {
        Ok(self.keys.pop_front())
    }
}
