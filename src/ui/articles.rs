use crate::app::{App, Focus};
use crate::source::Article;
use crate::util::{strip_control_chars, truncate_to_width};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::ops::Range;

/// Rows per card: top border, image, title, summary, bottom border.
pub(super) const CARD_HEIGHT: u16 = 5;

/// Indices of the cards that fit in `height` rows starting at `scroll`.
///
/// Only these cards are built, so image references of off-screen cards are
/// never touched until the user scrolls to them.
pub(super) fn visible_cards(count: usize, scroll: usize, height: u16) -> Range<usize> {
    let start = scroll.min(count);
    let fits = (height / CARD_HEIGHT) as usize;
    start..(start + fits).min(count)
}

/// Image placeholder line for a card.
pub(super) fn image_line(image: &str) -> String {
    format!("[img] {}", strip_control_chars(image))
}

/// Render the article cards in source order.
pub fn render(f: &mut Frame, app: &App, area: Rect, articles: &[Article]) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let is_focused = app.focus == Focus::Articles;
    let border_style = if is_focused {
        app.style("panel_border_focused")
    } else {
        app.style("panel_border")
    };

    let title = if articles.is_empty() {
        " Articles ".to_string()
    } else {
        let range = visible_cards(
            articles.len(),
            app.article_scroll,
            area.height.saturating_sub(2),
        );
        format!(
            " Articles {}-{} of {} ",
            range.start + 1,
            range.end.max(range.start + 1),
            articles.len()
        )
    };

    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    if articles.is_empty() {
        f.render_widget(Paragraph::new("No articles"), inner);
        return;
    }

    let text_width = inner.width.saturating_sub(2) as usize;
    let range = visible_cards(articles.len(), app.article_scroll, inner.height);

    for (slot, article) in articles[range].iter().enumerate() {
        let card_area = Rect {
            x: inner.x,
            y: inner.y + slot as u16 * CARD_HEIGHT,
            width: inner.width,
            height: CARD_HEIGHT,
        };
        render_card(f, app, card_area, article, text_width);
    }
}

fn render_card(f: &mut Frame, app: &App, area: Rect, article: &Article, text_width: usize) {
    let title = strip_control_chars(&article.title);
    let summary = strip_control_chars(&article.summary);
    let image = image_line(&article.image);

    let lines = vec![
        Line::from(Span::styled(
            truncate_to_width(&image, text_width).into_owned(),
            app.style("card_image"),
        )),
        Line::from(Span::styled(
            truncate_to_width(&title, text_width).into_owned(),
            app.style("card_title"),
        )),
        Line::from(Span::styled(
            truncate_to_width(&summary, text_width).into_owned(),
            app.style("card_summary"),
        )),
    ];

    let card = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(app.style("card_border")),
    );
    f.render_widget(card, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_cards_fills_viewport() {
        assert_eq!(visible_cards(4, 0, 20), 0..4);
        assert_eq!(visible_cards(4, 0, 12), 0..2);
        assert_eq!(visible_cards(4, 1, 10), 1..3);
    }

    #[test]
    fn test_visible_cards_tiny_viewport_builds_nothing() {
        assert_eq!(visible_cards(4, 0, 4), 0..0);
    }

    #[test]
    fn test_visible_cards_scroll_past_end() {
        assert_eq!(visible_cards(4, 9, 20), 4..4);
        assert_eq!(visible_cards(0, 0, 20), 0..0);
    }

    #[test]
    fn test_image_line_sanitizes_reference() {
        assert_eq!(image_line("image1.jpg"), "[img] image1.jpg");
        assert_eq!(image_line("evil\x1b[2J.png"), "[img] evil.png");
    }
}
