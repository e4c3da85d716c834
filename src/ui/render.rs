//! Render functions for the TUI.
//!
//! Lays out the filter panel, the content area and the hint bar, and picks
//! what the content area shows from the controller's current state.

use crate::app::{App, ContentView};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    widgets::Paragraph,
    Frame,
};

use super::{articles, filter, help, hints, pagination, status};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 50;
pub(super) const MIN_HEIGHT: u16 = 12;

/// Width of the category filter column.
const FILTER_WIDTH: u16 = 24;

/// Rows taken by the pagination bar.
const PAGINATION_HEIGHT: u16 = 3;

/// Draw the whole page into `f`.
pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();

    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    render_main_panels(f, app, rows[0]);
    hints::render(f, app, rows[1]);

    if app.show_help {
        help::render(f, app);
    }
}

/// Filter column on the left, content on the right.
fn render_main_panels(f: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(FILTER_WIDTH), Constraint::Min(0)])
        .split(area);

    filter::render(f, app, columns[0]);
    render_content(f, app, columns[1]);
}

/// Exactly one of loading, error, or articles with pagination.
fn render_content(f: &mut Frame, app: &App, area: Rect) {
    match app.content_view() {
        ContentView::Loading => status::render_loading(f, app, area),
        ContentView::Error(message) => status::render_error(f, app, area, message),
        ContentView::Articles { articles, page } => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(PAGINATION_HEIGHT)])
                .split(area);

            articles::render(f, app, chunks[0], articles);
            pagination::render(f, app, chunks[1], page);
        }
    }
}
