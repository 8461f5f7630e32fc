//! Store and transport seams.
//!
//! The drainer and dispatch loop receive these as parameters instead of
//! reaching for process-wide handles, so both can be exercised against
//! in-memory fakes.

use async_trait::async_trait;

use crate::types::{Forecast, QueueItem, Subscriber};
use crate::Result;

/// Full-collection access to the subscriber store.
#[async_trait]
pub trait SubscriberStore {
    async fn list_subscribers(&self) -> Result<Vec<Subscriber>>;
}

/// The outbound mail queue: list everything pending, delete by id.
#[async_trait]
pub trait QueueStore {
    async fn list_queue_items(&self) -> Result<Vec<QueueItem>>;
    async fn delete_queue_item(&self, id: &str) -> Result<()>;
}

/// A forecast source for one coordinate pair.
#[async_trait]
pub trait ForecastProvider {
    async fn fetch_forecast(&self, latitude: f64, longitude: f64) -> Result<Forecast>;
}

/// The mail transport primitive: deliver one plaintext message.
#[async_trait]
pub trait Mailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()>;
}
