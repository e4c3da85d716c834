//! Text helpers for drawing untrusted strings into the terminal.
//!
//! - **Sanitizing**: [`strip_control_chars`] removes escape sequences
//! - **Measuring**: [`display_width`] and [`truncate_to_width`] are
//!   Unicode-width aware so CJK and emoji don't break layouts

mod text;

pub use text::{display_width, strip_control_chars, truncate_to_width};
