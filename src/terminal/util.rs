//! Terminal utilities

use crate::{Result, SelectorError};
use nix::libc;
use std::os::unix::io::RawFd;

/// Switch to the alternate screen and hide the cursor
pub const ENTER_SCREEN: &str = "\x1b[?1049h\x1b[?25l";

/// Show the cursor and return to the main screen
pub const LEAVE_SCREEN: &str = "\x1b[?25h\x1b[?1049l";

/// Check whether a file descriptor is an interactive terminal
pub fn is_tty(fd: RawFd) -> bool {
    unsafe { libc::isatty(fd) != 0 }
}

/// Get the terminal size for the given file descriptor
///
/// Falls back to 80x24 when the size cannot be queried.
pub fn get_terminal_size(fd: RawFd) -> Result<(u16, u16)> {
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };

    let result = unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, &mut ws) };

    if result == 0 && ws.ws_col > 0 && ws.ws_row > 0 {
        Ok((ws.ws_col, ws.ws_row))
    } else {
        Ok((80, 24))
    }
}

/// Set raw mode on a terminal file descriptor
///
/// Raw mode delivers every keypress immediately, including control
/// characters and escape sequences.
pub fn set_raw_mode(fd: RawFd) -> Result<libc::termios> {
    let original_termios = unsafe {
        let mut termios: libc::termios = std::mem::zeroed();
        if libc::tcgetattr(fd, &mut termios) != 0 {
            return Err(SelectorError::Terminal(format!(
                "tcgetattr failed: {}",
                std::io::Error::last_os_error()
            )));
        }
        termios
    };

    let mut raw_termios = original_termios;

    unsafe {
        libc::cfmakeraw(&mut raw_termios);
        if libc::tcsetattr(fd, libc::TCSANOW, &raw_termios) != 0 {
            return Err(SelectorError::Terminal(format!(
                "tcsetattr failed: {}",
                std::io::Error::last_os_error()
            )));
        }
    }

    Ok(original_termios)
}

/// Restore terminal attributes
///
/// Called on exit to return the terminal to its normal state
pub fn restore_termios(fd: RawFd, termios: &libc::termios) {
    unsafe {
        libc::tcsetattr(fd, libc::TCSANOW, termios);
    }
}
