//! Change notifications using tokio broadcast channels.
//!
//! Consumers replace their view of a collection wholesale when its event
//! arrives; events carry no payload beyond the collection name.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Default channel capacity.
pub const DEFAULT_CAPACITY: usize = 256;

/// Which collection changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreEvent {
    Products,
    Categories,
    Orders,
    Settings,
    Customers,
    /// Events were dropped; reload everything.
    Resync,
}

impl StoreEvent {
    /// Wire name used in notifications and SSE frames.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Categories => "categories",
            Self::Orders => "orders",
            Self::Settings => "settings",
            Self::Customers => "customers",
            Self::Resync => "resync",
        }
    }

    /// Whether a consumer caching the catalog must reload.
    #[must_use]
    pub const fn affects_catalog(self) -> bool {
        matches!(
            self,
            Self::Products | Self::Categories | Self::Settings | Self::Resync
        )
    }
}

impl FromStr for StoreEvent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "products" => Ok(Self::Products),
            "categories" => Ok(Self::Categories),
            "orders" => Ok(Self::Orders),
            "settings" => Ok(Self::Settings),
            "customers" => Ok(Self::Customers),
            "resync" => Ok(Self::Resync),
            _ => Err(format!("unknown store event: {s}")),
        }
    }
}

/// In-process pub/sub for store events.
#[derive(Debug)]
pub struct EventBus {
    sender: broadcast::Sender<StoreEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl EventBus {
    /// Create a bus with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event. Returns how many subscribers received it.
    pub fn publish(&self, event: StoreEvent) -> usize {
        // No receivers is not an error for us
        self.sender.send(event).unwrap_or(0)
    }

    /// Subscribe to future events.
    #[must_use]
    pub fn subscribe(&self) -> ChangeSubscription {
        ChangeSubscription {
            receiver: self.sender.subscribe(),
        }
    }
}

/// A live subscription to store events.
#[derive(Debug)]
pub struct ChangeSubscription {
    receiver: broadcast::Receiver<StoreEvent>,
}

impl ChangeSubscription {
    /// Wait for the next event.
    ///
    /// A lagging subscriber gets [`StoreEvent::Resync`] in place of the
    /// events it missed. Returns `None` once the store is dropped.
    pub async fn recv(&mut self) -> Option<StoreEvent> {
        match self.receiver.recv().await {
            Ok(event) => Some(event),
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Store event subscriber lagged, requesting resync");
                Some(StoreEvent::Resync)
            }
            Err(broadcast::error::RecvError::Closed) => None,
        }
    }

    /// Take an event if one is queued.
    pub fn try_recv(&mut self) -> Option<StoreEvent> {
        match self.receiver.try_recv() {
            Ok(event) => Some(event),
            Err(broadcast::error::TryRecvError::Lagged(_)) => Some(StoreEvent::Resync),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_reaches_every_subscriber() {
        let bus = EventBus::new(8);
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();

        assert_eq!(bus.publish(StoreEvent::Orders), 2);
        assert_eq!(first.recv().await, Some(StoreEvent::Orders));
        assert_eq!(second.try_recv(), Some(StoreEvent::Orders));
    }

    #[test]
    fn test_publish_without_subscribers() {
        let bus = EventBus::new(8);
        assert_eq!(bus.publish(StoreEvent::Products), 0);
    }

    #[tokio::test]
    async fn test_lagging_subscriber_gets_resync() {
        let bus = EventBus::new(2);
        let mut sub = bus.subscribe();
        for _ in 0..5 {
            bus.publish(StoreEvent::Products);
        }
        assert_eq!(sub.recv().await, Some(StoreEvent::Resync));
    }

    #[test]
    fn test_wire_names_round_trip() {
        for event in [
            StoreEvent::Products,
            StoreEvent::Categories,
            StoreEvent::Orders,
            StoreEvent::Settings,
            StoreEvent::Customers,
            StoreEvent::Resync,
        ] {
            assert_eq!(event.as_str().parse::<StoreEvent>(), Ok(event));
        }
    }

    #[test]
    fn test_orders_do_not_touch_catalog() {
        assert!(!StoreEvent::Orders.affects_catalog());
        assert!(StoreEvent::Categories.affects_catalog());
    }
}
