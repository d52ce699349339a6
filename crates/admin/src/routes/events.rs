//! Live change feed for open back-office pages.

use std::convert::Infallible;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};

use alraqi_store::ChangeFeed;

use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// One SSE frame per store change; the event name is the changed
/// collection (`products`, `orders`, ... or `resync`).
pub async fn stream(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Sse<impl futures::Stream<Item = Result<Event, Infallible>>> {
    let mut subscription = state.store().subscribe();

    let events = async_stream::stream! {
        while let Some(change) = subscription.recv().await {
            tracing::debug!(collection = change.as_str(), "Forwarding store change");
            yield Ok(Event::default().event(change.as_str()).data(change.as_str()));
        }
    };

    Sse::new(events).keep_alive(KeepAlive::default())
}
