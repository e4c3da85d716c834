//! Input handling for the TUI.
//!
//! Maps key presses to keybinding actions and dispatches them to the
//! controller, spawning fetches when a filter or page change calls for one.

use crate::app::{App, AppEvent, ContentView, Focus};
use crate::keybindings::{Action as KbAction, Context as KbContext};
use crossterm::event::{KeyCode, KeyModifiers};
use tokio::sync::mpsc;

use super::helpers::spawn_fetch;
use super::pagination::PaginationView;
use super::Action;

/// Map the focused panel to a keybinding context.
fn focus_to_context(focus: Focus) -> KbContext {
    match focus {
        Focus::Filter => KbContext::Filter,
        Focus::Articles => KbContext::Articles,
    }
}

/// Main input dispatch function.
pub fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Action {
    // Help overlay captures all keys while visible
    if app.show_help {
        return handle_help_input(app, code);
    }

    let context = focus_to_context(app.focus);
    let Some(action) = app.keybindings.action_for_key(code, modifiers, context) else {
        return Action::Continue;
    };

    match action {
        KbAction::Quit => return Action::Quit,
        KbAction::Back => {
            if app.status_message.is_some() {
                app.status_message = None;
            } else {
                app.focus = Focus::Filter;
            }
        }
        KbAction::NavDown => match app.focus {
            Focus::Filter => app.filter_cursor_down(),
            Focus::Articles => app.scroll_articles_down(),
        },
        KbAction::NavUp => match app.focus {
            Focus::Filter => app.filter_cursor_up(),
            Focus::Articles => app.scroll_articles_up(),
        },
        KbAction::CycleFocus => app.cycle_focus(),
        KbAction::ApplyFilter => {
            let value = app.filter_value_at_cursor().to_string();
            if let Some(ticket) = app.handle_category_change(&value) {
                spawn_fetch(app, ticket, event_tx);
            }
        }
        KbAction::NextPage => {
            if let Some(view) = pagination_view(app) {
                if let Some(ticket) = app.handle_page_change(view.next) {
                    spawn_fetch(app, ticket, event_tx);
                }
            }
        }
        KbAction::PreviousPage => {
            if let Some(view) = pagination_view(app) {
                match view.previous {
                    Some(page) => {
                        if let Some(ticket) = app.handle_page_change(page) {
                            spawn_fetch(app, ticket, event_tx);
                        }
                    }
                    None => app.set_status("Already on the first page"),
                }
            }
        }
        KbAction::CycleTheme => app.cycle_theme(),
        KbAction::ShowHelp => {
            app.show_help = true;
            app.help_scroll_offset = 0;
        }
    }

    app.needs_redraw = true;
    Action::Continue
}

/// Pagination controls exist only while a page of articles is shown.
fn pagination_view(app: &App) -> Option<PaginationView> {
    match app.content_view() {
        ContentView::Articles { page, .. } => Some(PaginationView::new(page)),
        ContentView::Loading | ContentView::Error(_) => {
            tracing::debug!("Ignoring page change while pagination is hidden");
            None
        }
    }
}

/// Handle input while the help overlay is visible.
///
/// j/k/Up/Down scroll, Esc/q/? dismiss.
fn handle_help_input(app: &mut App, code: KeyCode) -> Action {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            app.show_help = false;
            app.help_scroll_offset = 0;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_sub(1);
        }
        _ => {}
    }
    app.needs_redraw = true;
    Action::Continue
}
