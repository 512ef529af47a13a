mod cursor;
mod size;
mod terminfo;
mod termios;
mod tty;

pub use crate::core::cursor::*;
pub use crate::core::size::*;
pub use crate::core::terminfo::*;
pub use crate::core::termios::*;
pub use crate::core::tty::*;
