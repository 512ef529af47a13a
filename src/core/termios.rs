use crate::core::Tty;
use std::io::Error;
use std::os::unix::io::AsRawFd;
use termios::*;

/// Raw mode for the lifetime of the value; the original settings come back on drop.
/// It keeps its own handle on the tty, so the restore works whatever else was closed first.
pub struct TermiosCond {
    tty: Tty,
    original_termios: Termios,
}

impl TermiosCond {
    pub fn from_tty(tty: &Tty) -> Result<Self, Error> {
        let tty = tty.try_clone()?;
        let fd = tty.as_raw_fd();
        let mut termios = Termios::from_fd(fd)?;
        let termioscond = TermiosCond { tty,
                                        original_termios: termios };
        termios.c_cflag &= !(CSIZE | PARENB);
        termios.c_cflag |= CS8;
        termios.c_lflag &= !(ICANON | ECHO | ECHOE | ECHOK | ECHONL | ISIG | IEXTEN);
        termios.c_oflag &= !OPOST;
        termios.c_iflag &= !(IGNBRK | BRKINT | PARMRK | ISTRIP | INLCR | IGNCR | ICRNL | IXON);
        termios.c_cc[VMIN] = 0;
        termios.c_cc[VTIME] = 0;
        tcsetattr(fd, TCSANOW, &termios)?;
        Ok(termioscond)
    }
}

impl Drop for TermiosCond {
    fn drop(&mut self) {
        if let Err(e) = tcsetattr(self.tty.as_raw_fd(), TCSANOW, &self.original_termios) {
            log::warn!("failed to restore terminal mode: {}", e);
        }
    }
}
