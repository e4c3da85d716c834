//! Help overlay listing the active keybindings.
//!
//! Shows user overrides from config, not just the defaults.

use crate::app::App;
use crate::keybindings::Context;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table},
    Frame,
};

/// Display order and section labels.
const CONTEXT_ORDER: [(Context, &str); 2] = [
    (Context::Global, "General"),
    (Context::Filter, "Category"),
];

/// Rows of the help table, grouped by context.
pub(super) fn help_rows(app: &App) -> Vec<(Option<&'static str>, String, String)> {
    let bindings = app.keybindings.all_bindings();
    let mut rows = Vec::new();

    for (ctx, label) in &CONTEXT_ORDER {
        let mut section: Vec<_> = bindings
            .iter()
            .filter(|(c, _, _, _)| c == ctx)
            .map(|(_, key, _, description)| (None, key.clone(), description.to_string()))
            .collect();
        if section.is_empty() {
            continue;
        }
        if !rows.is_empty() {
            rows.push((None, String::new(), String::new()));
        }
        rows.push((Some(*label), String::new(), String::new()));
        rows.append(&mut section);
    }

    rows
}

/// Render the help overlay on top of the page.
pub fn render(f: &mut Frame, app: &App) {
    let overlay = centered_rect(70, 80, f.area());
    if overlay.width < 20 || overlay.height < 6 {
        return;
    }

    f.render_widget(Clear, overlay);

    let rows: Vec<Row> = help_rows(app)
        .into_iter()
        .map(|(heading, key, description)| match heading {
            Some(label) => Row::new(vec![
                Line::from(Span::styled(
                    format!("-- {} --", label),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
            ])
            .style(app.style("help_heading")),
            None => Row::new(vec![format!("  {}", key), description]),
        })
        .collect();

    let total_rows = rows.len();
    // Borders plus the header row
    let visible_height = overlay.height.saturating_sub(3) as usize;
    let max_scroll = total_rows.saturating_sub(visible_height);
    let scroll = app.help_scroll_offset.min(max_scroll);
    let visible_rows: Vec<Row> = rows.into_iter().skip(scroll).take(visible_height).collect();

    let title = if max_scroll > 0 {
        format!(
            " Help ({}/{}) ",
            scroll.saturating_add(1),
            max_scroll.saturating_add(1)
        )
    } else {
        " Help (? to close) ".to_string()
    };

    let widths = [Constraint::Length(14), Constraint::Min(20)];
    let table = Table::new(visible_rows, widths)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.style("panel_border_focused"))
                .title(title),
        )
        .header(
            Row::new(vec!["Key", "Action"])
                .style(Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED)),
        )
        .style(app.style("help_body"));

    f.render_widget(table, overlay);

    if max_scroll > 0 && scroll < max_scroll {
        let hint = Line::from(Span::styled(
            " j/k to scroll, ? or Esc to close ",
            app.style("help_hint"),
        ));
        let hint_area = Rect {
            x: overlay.x + 1,
            y: overlay.y + overlay.height.saturating_sub(1),
            width: overlay.width.saturating_sub(2),
            height: 1,
        };
        f.render_widget(Paragraph::new(hint), hint_area);
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = percent_of(area.width, percent_x);
    let height = percent_of(area.height, percent_y);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// `value * percent / 100` without overflowing u16 on very large terminals.
fn percent_of(value: u16, percent: u16) -> u16 {
    let scaled = u32::from(value) * u32::from(percent.min(100)) / 100;
    u16::try_from(scaled).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::source::StubSource;
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn test_help_rows_group_by_context() {
        let app = App::new(Arc::new(StubSource::new(Duration::ZERO)), &Config::default());
        let rows = help_rows(&app);

        let headings: Vec<_> = rows.iter().filter_map(|(h, _, _)| *h).collect();
        assert_eq!(headings, vec!["General", "Category"]);
        assert!(rows
            .iter()
            .any(|(_, key, description)| key == "q" && description == "Quit application"));
    }

    #[test]
    fn test_centered_rect_stays_inside() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(70, 80, area);
        assert_eq!(rect, Rect::new(15, 4, 70, 32));
    }

    #[test]
    fn test_centered_rect_on_very_wide_terminal() {
        // 1000 * 70 does not fit in a u16
        let area = Rect::new(0, 0, 1000, 50);
        let rect = centered_rect(70, 80, area);
        assert_eq!(rect, Rect::new(150, 5, 700, 40));
    }
}
