use crate::core::Tty;
use libc;
use std::io::Error;
use std::mem;
use std::os::unix::io::AsRawFd;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TermSize {
    pub rows: usize,
    pub cols: usize,
}

impl TermSize {
    pub fn from_tty(tty: &Tty) -> Result<TermSize, Error> {
        let mut ws: libc::winsize = unsafe { mem::zeroed() };
        let res = unsafe { libc::ioctl(tty.as_raw_fd(), libc::TIOCGWINSZ, &mut ws) };
        if res != 0 {
            return Err(Error::last_os_error());
        }
        Ok(TermSize { rows: ws.ws_row as usize,
                      cols: ws.ws_col as usize })
    }
}
