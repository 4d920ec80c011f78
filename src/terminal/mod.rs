//! Terminal control and frame rendering

pub mod render;
pub mod util;

pub use render::render_frame;
pub use util::{get_terminal_size, is_tty, restore_termios, set_raw_mode};
