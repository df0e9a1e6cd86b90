//! Box file codec.
//!
//! Translates between box file text and `BoxDocument`. Both directions need
//! the pixel height of every page image to flip between file space (origin
//! bottom-left) and display space (origin top-left).

pub mod format;
pub mod lines;
pub mod parse;

pub use format::{format, format_with};
pub use parse::parse;
