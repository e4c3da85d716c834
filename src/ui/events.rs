//! Application event handling.
//!
//! Applies background task results to the controller.

use crate::app::{App, AppEvent, Focus};

/// Handle an event posted by a background task.
pub fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::PageLoaded { generation, result } => {
            let failed = result.is_err();
            if app.apply_page_loaded(generation, result) && failed {
                // Retrying means picking a filter
                app.focus = Focus::Filter;
            }
        }
    }
    app.needs_redraw = true;
}
