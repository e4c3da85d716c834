//! Theme system for the TUI.
//!
//! Provides semantic color roles that map to ratatui `Style` values.
//! The `ThemeVariant` enum selects between Dark and Light palettes,
//! and `StyleMap` resolves role names to concrete styles.

use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

// ============================================================================
// Theme Variant
// ============================================================================

/// Available theme variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name from a string (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    /// Build the `ColorPalette` for this variant.
    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }

    /// Cycle to the next variant: Dark → Light → Dark.
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Human-readable name for status display.
    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

// ============================================================================
// Color Palette: semantic roles to Style
// ============================================================================

/// A complete color palette mapping every semantic UI role to a `Style`.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Category selector --
    pub filter_normal: Style,
    pub filter_cursor: Style,
    pub filter_applied: Style,

    // -- Article cards --
    pub card_border: Style,
    pub card_title: Style,
    pub card_summary: Style,
    pub card_image: Style,

    // -- Pagination --
    pub pagination_enabled: Style,
    pub pagination_disabled: Style,
    pub pagination_label: Style,

    // -- Status views --
    pub status_loading: Style,
    pub status_error: Style,

    // -- Chrome --
    pub hint_bar: Style,
    pub panel_border: Style,
    pub panel_border_focused: Style,
    pub help_heading: Style,
    pub help_body: Style,
    pub help_hint: Style,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            filter_normal: Style::default(),
            filter_cursor: Style::default().bg(Color::DarkGray).fg(Color::White),
            filter_applied: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),

            card_border: Style::default().fg(Color::DarkGray),
            card_title: Style::default().add_modifier(Modifier::BOLD),
            card_summary: Style::default(),
            card_image: Style::default().fg(Color::Blue),

            pagination_enabled: Style::default().fg(Color::White),
            pagination_disabled: Style::default().fg(Color::DarkGray),
            pagination_label: Style::default().add_modifier(Modifier::BOLD),

            status_loading: Style::default().fg(Color::Yellow),
            status_error: Style::default().fg(Color::Red),

            hint_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            panel_border: Style::default(),
            panel_border_focused: Style::default().fg(Color::Cyan),
            help_heading: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            help_body: Style::default(),
            help_hint: Style::default().fg(Color::DarkGray),
        }
    }

    /// Light palette, adapted for light terminal backgrounds.
    fn light() -> Self {
        Self {
            filter_normal: Style::default().fg(Color::Black),
            filter_cursor: Style::default().bg(Color::Blue).fg(Color::White),
            filter_applied: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),

            card_border: Style::default().fg(Color::Gray),
            card_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            card_summary: Style::default().fg(Color::Black),
            card_image: Style::default().fg(Color::Magenta),

            pagination_enabled: Style::default().fg(Color::Black),
            pagination_disabled: Style::default().fg(Color::Gray),
            pagination_label: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            status_loading: Style::default().fg(Color::Magenta),
            status_error: Style::default().fg(Color::Red),

            hint_bar: Style::default().bg(Color::White).fg(Color::Black),
            panel_border: Style::default().fg(Color::DarkGray),
            panel_border_focused: Style::default().fg(Color::Blue),
            help_heading: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            help_body: Style::default().fg(Color::Black),
            help_hint: Style::default().fg(Color::DarkGray),
        }
    }
}

// ============================================================================
// Style Map: string-keyed lookup
// ============================================================================

/// String-keyed style lookup.
///
/// Built from a `ColorPalette`, this allows resolving role names (e.g.
/// `"card_title"`) to their concrete `Style` at runtime.
#[derive(Debug, Clone)]
pub struct StyleMap {
    map: HashMap<&'static str, Style>,
}

/// All semantic role names, in declaration order.
const ROLE_NAMES: [&str; 18] = [
    "filter_normal",
    "filter_cursor",
    "filter_applied",
    "card_border",
    "card_title",
    "card_summary",
    "card_image",
    "pagination_enabled",
    "pagination_disabled",
    "pagination_label",
    "status_loading",
    "status_error",
    "hint_bar",
    "panel_border",
    "panel_border_focused",
    "help_heading",
    "help_body",
    "help_hint",
];

impl StyleMap {
    /// Build a `StyleMap` from a `ColorPalette`.
    pub fn from_palette(p: &ColorPalette) -> Self {
        let styles: [Style; 18] = [
            p.filter_normal,
            p.filter_cursor,
            p.filter_applied,
            p.card_border,
            p.card_title,
            p.card_summary,
            p.card_image,
            p.pagination_enabled,
            p.pagination_disabled,
            p.pagination_label,
            p.status_loading,
            p.status_error,
            p.hint_bar,
            p.panel_border,
            p.panel_border_focused,
            p.help_heading,
            p.help_body,
            p.help_hint,
        ];

        let map = ROLE_NAMES.iter().copied().zip(styles).collect();
        Self { map }
    }

    /// Resolve a role name to its `Style`. Returns `Style::default()` for unknown roles.
    pub fn resolve(&self, role: &str) -> Style {
        self.map.get(role).copied().unwrap_or_default()
    }
}

// ============================================================================
// Tests
// ============================================================================
