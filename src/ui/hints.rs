use crate::app::{App, Focus};
use ratatui::{layout::Rect, widgets::Paragraph, Frame};
use std::borrow::Cow;

const FILTER_HINTS: &str = "[j/k]move [Enter]apply [Tab]articles [n/p]page [T]heme [?]help [q]uit";
const ARTICLE_HINTS: &str = "[j/k]scroll [n]ext [p]revious [Tab]filter [T]heme [?]help [q]uit";

/// Render the one-line hint bar.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let text: Cow<'_, str> = if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(msg.as_ref())
    } else {
        match app.focus {
            Focus::Filter => Cow::Borrowed(FILTER_HINTS),
            Focus::Articles => Cow::Borrowed(ARTICLE_HINTS),
        }
    };

    f.render_widget(Paragraph::new(text).style(app.style("hint_bar")), area);
}
