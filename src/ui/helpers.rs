//! Helper functions for UI operations.
//!
//! Background fetch spawning and panic containment for spawned tasks.

use crate::app::{App, AppEvent, FetchTicket};
use crate::source::SourceError;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use tokio::sync::mpsc;

/// Wraps a future to catch panics and convert them to errors.
///
/// A panic inside a spawned task would otherwise vanish into the runtime and
/// leave the controller waiting forever. Converting it to `Err(message)` lets
/// the task still report back.
///
/// # Returns
///
/// - `Ok(result)` if the future completes normally
/// - `Err(panic_message)` if the future panics
pub(super) async fn catch_task_panic<F, T>(future: F) -> Result<T, String>
where
    F: std::future::Future<Output = T>,
{
    AssertUnwindSafe(future)
        .catch_unwind()
        .await
        .map_err(|panic| {
            if let Some(s) = panic.downcast_ref::<&'static str>() {
                s.to_string()
            } else if let Some(s) = panic.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic payload".to_string()
            }
        })
}

/// Spawn a background fetch for the given ticket.
///
/// Any previous fetch task is aborted first; its settlement could not be
/// applied anyway because the generation moved on. The task always sends
/// exactly one `AppEvent::PageLoaded`, including on timeout or panic.
pub fn spawn_fetch(app: &mut App, ticket: FetchTicket, event_tx: &mpsc::Sender<AppEvent>) {
    if let Some(handle) = app.fetch_handle.take() {
        handle.abort();
        tracing::debug!("Aborted previous fetch task");
    }

    let source = app.source.clone();
    let timeout = app.fetch_timeout;
    let tx = event_tx.clone();
    let FetchTicket { generation, query } = ticket;

    tracing::debug!(generation, page = query.page, "Spawning fetch task");

    app.fetch_handle = Some(tokio::spawn(async move {
        let fetch = async {
            match timeout {
                Some(limit) => tokio::time::timeout(limit, source.fetch(&query))
                    .await
                    .unwrap_or(Err(SourceError::Timeout(limit))),
                None => source.fetch(&query).await,
            }
        };

        let result = match catch_task_panic(fetch).await {
            Ok(result) => result,
            Err(panic_msg) => {
                tracing::error!(generation, error = %panic_msg, "Fetch task panicked");
                Err(SourceError::TaskPanicked(panic_msg))
            }
        };

        let event = AppEvent::PageLoaded { generation, result };
        if let Err(e) = tx.send(event).await {
            tracing::warn!(error = %e, "Failed to send fetch result (receiver dropped)");
        }
    }));
}
