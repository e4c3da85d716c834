use crate::app::App;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub(super) const PREVIOUS_LABEL: &str = "[ Previous ]";
pub(super) const NEXT_LABEL: &str = "[ Next ]";

/// What the pagination bar shows for a given page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct PaginationView {
    pub page: u32,
    /// Target of "Previous"; `None` renders the control disabled.
    pub previous: Option<u32>,
    /// Target of "Next". The total page count is unknown, so it is always enabled.
    pub next: u32,
}

impl PaginationView {
    pub fn new(page: u32) -> Self {
        Self {
            page,
            previous: (page > 1).then(|| page - 1),
            next: page.saturating_add(1),
        }
    }

    pub fn label(&self) -> String {
        format!("Page {}", self.page)
    }
}

/// Render the pagination bar below the article cards.
pub fn render(f: &mut Frame, app: &App, area: Rect, page: u32) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let view = PaginationView::new(page);
    let previous_style = if view.previous.is_some() {
        app.style("pagination_enabled")
    } else {
        app.style("pagination_disabled")
    };

    let line = Line::from(vec![
        Span::styled(PREVIOUS_LABEL, previous_style),
        Span::raw("   "),
        Span::styled(view.label(), app.style("pagination_label")),
        Span::raw("   "),
        Span::styled(NEXT_LABEL, app.style("pagination_enabled")),
    ]);

    let paragraph = Paragraph::new(line).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(app.style("panel_border")),
    );
    f.render_widget(paragraph, area);
}
