//! Single-page article browser for the terminal.
//!
//! A category filter, a paginated list of article cards and the loading and
//! error states around each fetch, driven by a pluggable [`source::ArticleSource`].

pub mod app;
pub mod config;
pub mod keybindings;
pub mod source;
pub mod theme;
pub mod ui;
pub mod util;
