//! Cross-process change feed over `LISTEN`/`NOTIFY`.
//!
//! Payloads are `<instance uuid>:<event>`.

use std::sync::Arc;

use sqlx::PgPool;
use sqlx::postgres::PgListener;
use uuid::Uuid;

use super::CHANGES_CHANNEL;
use crate::events::{EventBus, StoreEvent};

pub(super) fn encode(instance: Uuid, event: StoreEvent) -> String {
    format!("{instance}:{}", event.as_str())
}

/// Split a payload into sender and event. `None` for anything malformed.
pub(super) fn decode(payload: &str) -> Option<(Uuid, StoreEvent)> {
    let (instance, event) = payload.split_once(':')?;
    Some((instance.parse().ok()?, event.parse().ok()?))
}

pub(super) async fn spawn(
    pool: &PgPool,
    bus: Arc<EventBus>,
    instance: Uuid,
) -> Result<tokio::task::JoinHandle<()>, sqlx::Error> {
    let mut listener = PgListener::connect_with(pool).await?;
    listener.listen(CHANGES_CHANNEL).await?;
    tracing::info!(channel = CHANGES_CHANNEL, "Listening for store changes");

    Ok(tokio::spawn(async move {
        loop {
            match listener.recv().await {
                Ok(notification) => match decode(notification.payload()) {
                    Some((sender, _)) if sender == instance => {}
                    Some((_, event)) => {
                        tracing::debug!(event = event.as_str(), "Remote store change");
                        bus.publish(event);
                    }
                    None => {
                        tracing::warn!(payload = notification.payload(), "Ignoring malformed change notification");
                    }
                },
                Err(e) => {
                    // PgListener reconnects on the next recv; anything sent
                    // in between is lost.
                    tracing::warn!(error = %e, "Change listener connection lost");
                    bus.publish(StoreEvent::Resync);
                }
            }
        }
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_payload() {
        let instance = Uuid::new_v4();
        let payload = encode(instance, StoreEvent::Categories);
        assert_eq!(decode(&payload), Some((instance, StoreEvent::Categories)));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert_eq!(decode("products"), None);
        assert_eq!(decode("not-a-uuid:products"), None);
        assert_eq!(decode(&format!("{}:bogus", Uuid::new_v4())), None);
    }
}
