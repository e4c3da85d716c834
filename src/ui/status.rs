use crate::app::App;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub(super) const LOADING_TEXT: &str = "Loading...";

/// Braille spinner frames, advanced by the event loop tick.
pub(super) const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Text of the error banner.
pub(super) fn error_text(message: &str) -> String {
    format!("Error: {}", message)
}

/// Render the loading indicator in place of the article list.
pub fn render_loading(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let spinner = SPINNER_FRAMES[app.spinner_frame % SPINNER_FRAMES.len()];
    let line = Line::from(vec![
        Span::styled(spinner, app.style("status_loading")),
        Span::raw(" "),
        Span::styled(LOADING_TEXT, app.style("status_loading")),
    ]);

    let paragraph = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(panel(app));
    f.render_widget(paragraph, area);
}

/// Render the error banner in place of the article list and pagination.
pub fn render_error(f: &mut Frame, app: &App, area: Rect, message: &str) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let paragraph = Paragraph::new(error_text(message))
        .style(app.style("status_error"))
        .wrap(Wrap { trim: true })
        .block(panel(app));
    f.render_widget(paragraph, area);
}

fn panel(app: &App) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(app.style("panel_border"))
        .title(" Articles ")
}
