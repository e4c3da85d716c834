use crate::app::{App, Focus, ALL_CATEGORIES_LABEL};
use crate::util::{strip_control_chars, truncate_to_width};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Selector options as `(label, value)` pairs.
///
/// "All Categories" comes first with the empty value, then one entry per
/// category in source order.
pub(super) fn options(categories: &[String]) -> Vec<(&str, &str)> {
    std::iter::once((ALL_CATEGORIES_LABEL, ""))
        .chain(categories.iter().map(|c| (c.as_str(), c.as_str())))
        .collect()
}

/// Render the category selector panel.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let is_focused = app.focus == Focus::Filter;
    let applied = app.applied_filter_index();
    // Room for borders and the two-column marker
    let label_width = area.width.saturating_sub(4) as usize;

    let items: Vec<ListItem> = options(&app.categories)
        .into_iter()
        .enumerate()
        .map(|(i, (label, _))| {
            let is_applied = applied == Some(i);
            let style = if is_focused && i == app.filter_cursor {
                app.style("filter_cursor")
            } else if is_applied {
                app.style("filter_applied")
            } else {
                app.style("filter_normal")
            };

            let marker = if is_applied { "● " } else { "  " };
            let label = strip_control_chars(label);
            let label = truncate_to_width(&label, label_width).into_owned();

            ListItem::new(Line::from(vec![
                Span::styled(marker, style),
                Span::styled(label, style),
            ]))
        })
        .collect();

    let border_style = if is_focused {
        app.style("panel_border_focused")
    } else {
        app.style("panel_border")
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(" Category "),
        )
        .highlight_style(Style::default());

    let mut state = ListState::default().with_selected(Some(app.filter_cursor));
    f.render_stateful_widget(list, area, &mut state);
}
