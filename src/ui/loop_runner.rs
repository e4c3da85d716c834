//! Main event loop for the TUI.
//!
//! Multiplexes terminal input, fetch settlements and a periodic tick.

use crate::app::{App, AppEvent};
use anyhow::Result;
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;

#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};

use super::events::handle_app_event;
use super::helpers::spawn_fetch;
use super::input::handle_input;
use super::render::draw;
use super::status::SPINNER_FRAMES;

/// Tick period for spinner animation and status expiry.
const TICK: Duration = Duration::from_millis(250);

/// Result of handling a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Keep running.
    Continue,
    /// Exit and restore the terminal.
    Quit,
}

/// Run the page until the user quits or a termination signal arrives.
///
/// Mounts the controller (issuing the first fetch), then uses
/// `tokio::select!` over:
/// - **Signals**: SIGTERM/SIGINT end the loop
/// - **Terminal input**: key presses from crossterm's async event stream
/// - **Fetch settlements**: `AppEvent`s from spawned fetch tasks
/// - **Tick**: spinner animation and status expiry
///
/// The controller is disposed on every exit path that reaches the end of
/// the loop, so a fetch still in flight is aborted and never applied.
///
/// # Panic Safety
///
/// Installs a panic hook that restores terminal state before unwinding.
pub async fn run(
    app: &mut App,
    event_tx: mpsc::Sender<AppEvent>,
    mut event_rx: mpsc::Receiver<AppEvent>,
) -> Result<()> {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let mut terminal = setup_terminal()?;
    let mut event_stream = crossterm::event::EventStream::new();
    let mut tick_interval = tokio::time::interval(TICK);

    #[cfg(unix)]
    let mut sigterm = signal(SignalKind::terminate())?;
    #[cfg(unix)]
    let mut sigint = signal(SignalKind::interrupt())?;

    let ticket = app.mount();
    spawn_fetch(app, ticket, &event_tx);

    loop {
        if app.needs_redraw {
            terminal.draw(|f| draw(f, app))?;
            app.needs_redraw = false;
        }

        // Settlements first so a burst of key presses cannot starve them
        while let Ok(event) = event_rx.try_recv() {
            handle_app_event(app, event);
        }

        #[cfg(unix)]
        let sigterm_fut = sigterm.recv();
        #[cfg(not(unix))]
        let sigterm_fut = std::future::pending::<Option<()>>();

        #[cfg(unix)]
        let sigint_fut = sigint.recv();
        #[cfg(not(unix))]
        let sigint_fut = std::future::pending::<Option<()>>();

        tokio::select! {
            biased;

            _ = sigterm_fut => {
                tracing::info!("Received SIGTERM, shutting down gracefully");
                break;
            }

            _ = sigint_fut => {
                tracing::info!("Received SIGINT, shutting down gracefully");
                break;
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) => {
                        if handle_input(app, key.code, key.modifiers, &event_tx) == Action::Quit {
                            break;
                        }
                    }
                    Some(Ok(Event::Resize(..))) => app.needs_redraw = true,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::warn!(error = %e, "Terminal event stream error");
                    }
                    None => {
                        tracing::info!("Terminal event stream closed");
                        break;
                    }
                }
            }

            Some(event) = event_rx.recv() => {
                handle_app_event(app, event);
            }

            _ = tick_interval.tick() => {
                handle_tick(app);
            }
        }
    }

    app.dispose();
    restore_terminal(terminal)?;
    Ok(())
}

/// Advance the spinner while loading and drop expired status messages.
fn handle_tick(app: &mut App) {
    if app.loading {
        app.spinner_frame = (app.spinner_frame + 1) % SPINNER_FRAMES.len();
        app.needs_redraw = true;
    }

    if app.clear_expired_status() {
        app.needs_redraw = true;
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::source::StubSource;
    use std::sync::Arc;

    fn test_app() -> App {
        App::new(Arc::new(StubSource::new(Duration::ZERO)), &Config::default())
    }

    #[test]
    fn test_tick_advances_spinner_only_while_loading() {
        let mut app = test_app();
        app.mount();
        app.needs_redraw = false;

        handle_tick(&mut app);
        assert_eq!(app.spinner_frame, 1);
        assert!(app.needs_redraw);

        let generation = app.fetch_generation;
        app.apply_page_loaded(generation, Ok(StubSource::fixed_page()));
        app.needs_redraw = false;

        handle_tick(&mut app);
        assert_eq!(app.spinner_frame, 1);
        assert!(!app.needs_redraw);
    }

    #[test]
    fn test_spinner_wraps() {
        let mut app = test_app();
        app.mount();
        for _ in 0..SPINNER_FRAMES.len() {
            handle_tick(&mut app);
        }
        assert_eq!(app.spinner_frame, 0);
    }
}
