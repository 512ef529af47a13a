use crate::core::{Cursor, TermInfo, TermSize, TermiosCond, Tty};
use crate::error::{Error, Result};
use crate::events::{pattern_dict, Event, KeyDecoder};
use crate::surface::{width_char, width_str, Surface};
use colored::Colorize;
use log::{debug, trace, warn};
use std::io::{self, ErrorKind};
use std::mem;
use std::os::unix::io::AsRawFd;
use std::ptr;
use std::time::Duration;

// How long a lone prefix such as ESC may wait for the rest of its sequence.
const SEQUENCE_TIMEOUT: Duration = Duration::from_millis(10);

/// Interactive surface on the controlling terminal: raw mode, alternate screen, hidden cursor.
pub struct Term {
    cursor: Cursor,
    terminfo: TermInfo,
    decoder: KeyDecoder,
    size: TermSize,
    cjk: bool,
    _termioscond: TermiosCond,
    tty: Tty,
}

impl Term {
    pub fn new(cjk: bool) -> Result<Self> {
        let terminfo = TermInfo::new();
        let tty = Tty::new().map_err(|e| Error::Terminal(format!("cannot open /dev/tty: {}", e)))?;
        let size = TermSize::from_tty(&tty)?;
        if size.rows == 0 || size.cols == 0 {
            return Err(Error::Terminal(format!("unusable window size {}x{}", size.rows, size.cols)));
        }
        let termioscond = TermiosCond::from_tty(&tty)?;
        let decoder = KeyDecoder::new(pattern_dict(terminfo.key_strings()));
        let mut term = Term { cursor: Cursor::new(&terminfo)?,
                              terminfo,
                              decoder,
                              size,
                              cjk,
                              _termioscond: termioscond,
                              tty };
        term.write_command("smcup")?;
        term.write_command("civis")?;
        term.cursor.clear()?;
        term.cursor.flush()?;
        debug!("terminal ready: {}x{}", size.rows, size.cols);
        Ok(term)
    }

    fn write_command(&mut self, command: &str) -> Result<()> {
        match self.terminfo.get_string(command) {
            Some(s) => self.cursor.write_raw(&s),
            None => {
                warn!("terminal has no '{}' capability", command);
                Ok(())
            },
        }
    }

    fn limit_string(&self, s: &str, limit: usize) -> String {
        let mut w = 0;
        s.chars()
         .take_while(|c| {
             let cw = width_char(*c, self.cjk);
             if w + cw > limit {
                 return false;
             }
             w += cw;
             true
         })
         .collect()
    }

    fn print_at(&mut self, row: usize, col: usize, s: &str, bold: bool) -> Result<()> {
        if row >= self.size.rows || col >= self.size.cols {
            return Ok(());
        }
        let s = if width_str(s, self.cjk) > self.size.cols - col {
            self.limit_string(s, self.size.cols - col)
        } else {
            s.to_owned()
        };
        let s = if bold { format!("{}", s.as_str().bold()) } else { s };
        self.cursor.move_to(row, col)?;
        self.cursor.write_raw(&s)
    }

    /// Waits until the tty is readable. `None` blocks indefinitely.
    fn select(&self, timeout: Option<Duration>) -> Result<bool> {
        let rawfd = self.tty.as_raw_fd();
        loop {
            let mut readfds: libc::fd_set = unsafe { mem::zeroed() };
            unsafe { libc::FD_SET(rawfd, &mut readfds) };
            let mut tv = timeout.map(|to| libc::timeval { tv_sec: to.as_secs() as libc::time_t,
                                                          tv_usec: to.subsec_micros() as libc::suseconds_t });
            let tvp = match tv.as_mut() {
                Some(tv) => tv as *mut libc::timeval,
                None => ptr::null_mut(),
            };
            match unsafe { libc::select(rawfd + 1, &mut readfds, ptr::null_mut(), ptr::null_mut(), tvp) } {
                -1 => {
                    let err = io::Error::last_os_error();
                    match err.kind() {
                        ErrorKind::Interrupted => continue,
                        _ => return Err(err.into()),
                    }
                },
                0 => return Ok(false),
                _ => return Ok(true),
            }
        }
    }
}

impl Surface for Term {
    fn size(&self) -> (usize, usize) {
        (self.size.rows, self.size.cols)
    }

    fn draw(&mut self, row: usize, col: usize, glyph: &str) -> Result<()> {
        self.print_at(row, col, glyph, false)
    }

    fn clear(&mut self) -> Result<()> {
        self.cursor.clear()
    }

    fn show_message(&mut self, msg: &str) -> Result<()> {
        self.print_at(0, 0, msg, true)
    }

    fn wait_for_input(&mut self) -> Result<Option<Event>> {
        self.cursor.flush()?;
        loop {
            if let Some(e) = self.decoder.next_event() {
                trace!("key {:?}", e);
                return Ok(Some(e));
            }
            let timeout = if self.decoder.is_pending() { Some(SEQUENCE_TIMEOUT) } else { None };
            if self.select(timeout)? {
                let mut buf = Vec::new();
                if self.tty.read_available(&mut buf)? == 0 {
                    debug!("tty closed");
                    return Ok(None);
                }
                self.decoder.feed(&buf);
            } else {
                self.decoder.flush();
            }
        }
    }

    fn flush(&mut self) -> Result<()> {
        self.cursor.flush()
    }
}

impl Drop for Term {
    fn drop(&mut self) {
        let restored = self.write_command("cnorm")
                           .and_then(|_| self.write_command("rmcup"))
                           .and_then(|_| self.cursor.flush());
        if let Err(e) = restored {
            warn!("failed to restore the screen: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termios::Termios;

    fn tty_modes() -> Termios {
        let tty = Tty::new().unwrap();
        Termios::from_fd(tty.as_raw_fd()).unwrap()
    }

    // needs a controlling terminal: cargo test -- --ignored
    #[test]
    #[ignore]
    fn dropping_term_restores_the_tty_mode() {
        let before = tty_modes();
        let term = Term::new(false).unwrap();
        let raw = tty_modes();
        assert_eq!(raw.c_lflag & termios::ICANON, 0);
        drop(term);
        let after = tty_modes();
        assert_eq!(after.c_lflag, before.c_lflag);
        assert_eq!(after.c_iflag, before.c_iflag);
        assert_eq!(after.c_oflag, before.c_oflag);
    }

    #[test]
    #[ignore]
    fn raw_mode_outlives_the_tty_it_came_from() {
        let before = tty_modes();
        let tty = Tty::new().unwrap();
        let cond = TermiosCond::from_tty(&tty).unwrap();
        drop(tty);
        drop(cond);
        assert_eq!(tty_modes().c_lflag, before.c_lflag);
    }
}
