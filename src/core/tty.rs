use std::fs::{File, OpenOptions};
use std::io::{Error, Read};
use std::os::unix::io::{AsRawFd, RawFd};

#[derive(Debug)]
pub struct Tty {
    file: File,
}

impl Tty {
    pub fn new() -> Result<Self, Error> {
        Ok(Tty { file: OpenOptions::new().write(true).read(true).open("/dev/tty")? })
    }

    /// Second handle on the same terminal, closed independently of this one.
    pub fn try_clone(&self) -> Result<Self, Error> {
        Ok(Tty { file: self.file.try_clone()? })
    }

    /// Reads whatever is buffered; relies on the non-canonical `VMIN = 0` mode set by `TermiosCond`.
    pub fn read_available(&mut self, buf: &mut Vec<u8>) -> Result<usize, Error> {
        self.file.read_to_end(buf)
    }
}

impl AsRawFd for Tty {
    fn as_raw_fd(&self) -> RawFd {
        self.file.as_raw_fd()
    }
}
