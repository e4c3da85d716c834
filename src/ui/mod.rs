//! Terminal User Interface module.
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard input handling
//! - `events` - Fetch settlement processing
//! - `render` - Page layout and content-state dispatch
//! - `helpers` - Fetch task spawning
//! - `filter` - Category selector widget
//! - `articles` - Article card widget
//! - `pagination` - Previous/Next bar
//! - `status` - Loading and error banners
//! - `hints` - Key hint bar
//! - `help` - Keybinding overlay

mod articles;
mod events;
mod filter;
mod help;
mod helpers;
mod hints;
mod input;
mod loop_runner;
mod pagination;
mod render;
mod status;

pub use events::handle_app_event;
pub use helpers::spawn_fetch;
pub use input::handle_input;
pub use loop_runner::{run, Action};
pub use render::draw;
