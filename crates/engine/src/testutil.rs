//! In-memory fakes for the store and transport seams.

use std::sync::Mutex;

use async_trait::async_trait;

use common::{
    Error, Forecast, ForecastProvider, Mailer, QueueItem, QueueStore, Result, Subscriber,
    SubscriberStore,
};

/// Queue store backed by a Vec; deletes remove items so a second drain
/// sees the shrunken snapshot.
#[derive(Default)]
pub struct FakeQueue {
    items: Mutex<Vec<QueueItem>>,
}

impl FakeQueue {
    pub fn with_items(items: Vec<QueueItem>) -> Self {
        Self {
            items: Mutex::new(items),
        }
    }

    pub fn items(&self) -> Vec<QueueItem> {
        self.items.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueueStore for FakeQueue {
    async fn list_queue_items(&self) -> Result<Vec<QueueItem>> {
        Ok(self.items.lock().unwrap().clone())
    }

    async fn delete_queue_item(&self, id: &str) -> Result<()> {
        self.items.lock().unwrap().retain(|item| item.id != id);
        Ok(())
    }
}

/// Subscriber store returning a fixed list.
pub struct FakeSubscribers {
    subscribers: Vec<Subscriber>,
}

impl FakeSubscribers {
    pub fn with(subscribers: Vec<Subscriber>) -> Self {
        Self { subscribers }
    }
}

#[async_trait]
impl SubscriberStore for FakeSubscribers {
    async fn list_subscribers(&self) -> Result<Vec<Subscriber>> {
        Ok(self.subscribers.clone())
    }
}

/// Mail transport that records sends and can fail for chosen recipients.
#[derive(Default)]
pub struct FakeMailer {
    sent: Mutex<Vec<(String, String, String)>>,
    fail_for: Option<String>,
}

impl FakeMailer {
    pub fn failing_for(recipient: &str) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_for: Some(recipient.to_string()),
        }
    }

    pub fn sent(&self) -> Vec<(String, String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for FakeMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        if self.fail_for.as_deref() == Some(to) {
            return Err(Error::Smtp(format!("simulated failure for {to}")));
        }
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), subject.to_string(), body.to_string()));
        Ok(())
    }
}

/// Forecast provider returning one canned forecast, or failing outright.
pub struct FakeForecasts {
    forecast: Option<Forecast>,
    calls: Mutex<usize>,
}

impl FakeForecasts {
    pub fn with(forecast: Forecast) -> Self {
        Self {
            forecast: Some(forecast),
            calls: Mutex::new(0),
        }
    }

    pub fn unreachable_provider() -> Self {
        Self {
            forecast: None,
            calls: Mutex::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl ForecastProvider for FakeForecasts {
    async fn fetch_forecast(&self, _latitude: f64, _longitude: f64) -> Result<Forecast> {
        *self.calls.lock().unwrap() += 1;
        self.forecast
            .clone()
            .ok_or_else(|| Error::OpenMeteo("provider unreachable".into()))
    }
}
