use crate::core::TermInfo;
use crate::error::{Error, Result};
use std::io::{stdout, BufWriter, Stdout, Write};

#[derive(Clone, Debug)]
struct CursorCommand {
    pub address: String,
    pub clear: String,
}

impl CursorCommand {
    pub fn from_terminfo(terminfo: &TermInfo) -> Result<Self> {
        let get = |cap: &str| {
            terminfo.get_string(cap)
                    .ok_or_else(|| Error::Terminal(format!("missing capability '{}'", cap)))
        };
        Ok(CursorCommand { address: get("cup")?,
                           clear: get("clear")? })
    }
}

/// Buffered cursor-addressed writer on stdout. Nothing reaches the terminal until `flush`.
pub struct Cursor {
    commands: CursorCommand,
    out: BufWriter<Stdout>,
}

impl Cursor {
    pub fn new(terminfo: &TermInfo) -> Result<Self> {
        Ok(Cursor { commands: CursorCommand::from_terminfo(terminfo)?,
                    out: BufWriter::new(stdout()) })
    }

    pub fn clear(&mut self) -> Result<()> {
        Ok(self.out.write_all(self.commands.clear.as_bytes())?)
    }

    pub fn move_to(&mut self, row: usize, col: usize) -> Result<()> {
        let s = TermInfo::format(&self.commands.address, &[row, col]);
        self.write_raw(&s)
    }

    pub fn write_raw(&mut self, s: &str) -> Result<()> {
        Ok(self.out.write_all(s.as_bytes())?)
    }

    pub fn flush(&mut self) -> Result<()> {
        Ok(self.out.flush()?)
    }
}
