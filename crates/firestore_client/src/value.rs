//! Firestore typed-value decoding.
//!
//! The REST API wraps every field in a type tag (`{"stringValue": "x"}`,
//! `{"integerValue": "42"}`, ...). Decoding is deliberately lenient: a
//! missing or differently-typed field falls back to its default instead
//! of failing the whole document.

use std::collections::HashMap;

use serde::Deserialize;

use common::types::DEFAULT_CITY_LABEL;
use common::{CountdownEvent, QueueItem, Subscriber, SubscriberDefaults};

/// Name given to events stored without one.
const UNTITLED_EVENT: &str = "untitled event";

/// A Firestore document as returned by the list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    /// Full resource name:
    /// `projects/{p}/databases/(default)/documents/{collection}/{id}`.
    pub name: String,
    #[serde(default)]
    pub fields: HashMap<String, Value>,
}

/// One typed field value. Integer values arrive as JSON strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Value {
    StringValue(String),
    IntegerValue(String),
    DoubleValue(f64),
    BooleanValue(bool),
    TimestampValue(String),
    ReferenceValue(String),
    NullValue(()),
    BytesValue(String),
    GeoPointValue(serde_json::Value),
    ArrayValue(ArrayValue),
    MapValue(MapValue),
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArrayValue {
    #[serde(default)]
    pub values: Vec<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MapValue {
    #[serde(default)]
    pub fields: HashMap<String, Value>,
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::StringValue(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view: doubles directly, integers parsed from their string
    /// encoding.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::DoubleValue(v) => Some(*v),
            Value::IntegerValue(raw) => raw.parse().ok(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::BooleanValue(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::ArrayValue(a) => Some(&a.values),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Value::MapValue(m) => Some(&m.fields),
            _ => None,
        }
    }
}

impl Document {
    /// The bare document id (last path segment of the resource name).
    pub fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    pub fn f64_field(&self, key: &str) -> Option<f64> {
        self.fields.get(key).and_then(Value::as_f64)
    }

    pub fn bool_field(&self, key: &str) -> Option<bool> {
        self.fields.get(key).and_then(Value::as_bool)
    }

    pub fn array_field(&self, key: &str) -> Option<&[Value]> {
        self.fields.get(key).and_then(Value::as_array)
    }
}

/// Decode a `users` document into a normalized [`Subscriber`].
///
/// The legacy single-event form (`targetDate`/`targetName`) is folded into
/// a one-element `events` list here, once, so the evaluators never branch
/// on it.
pub fn decode_subscriber(doc: &Document, defaults: &SubscriberDefaults) -> Subscriber {
    let email = doc
        .str_field("emailAddress")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned);

    let mut events: Vec<CountdownEvent> = doc
        .array_field("events")
        .map(|values| values.iter().filter_map(decode_event).collect())
        .unwrap_or_default();

    if events.is_empty() {
        if let Some(date) = doc.str_field("targetDate") {
            let name = doc.str_field("targetName").unwrap_or(UNTITLED_EVENT);
            events.push(CountdownEvent {
                name: name.to_owned(),
                date: date.to_owned(),
            });
        }
    }

    Subscriber {
        id: doc.id().to_owned(),
        email,
        email_alerts_enabled: doc.bool_field("emailAlerts").unwrap_or(true),
        high_temp_threshold: doc
            .f64_field("tempHighThreshold")
            .unwrap_or(defaults.high_temp_threshold),
        low_temp_threshold: doc
            .f64_field("tempLowThreshold")
            .unwrap_or(defaults.low_temp_threshold),
        latitude: doc.f64_field("latitude"),
        longitude: doc.f64_field("longitude"),
        city: doc
            .str_field("city")
            .unwrap_or(DEFAULT_CITY_LABEL)
            .to_owned(),
        events,
    }
}

/// An event needs at least a date to mean anything; unnamed events get a
/// placeholder label.
fn decode_event(value: &Value) -> Option<CountdownEvent> {
    let fields = value.as_map()?;
    let date = fields.get("date")?.as_str()?;
    let name = fields
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or(UNTITLED_EVENT);

    Some(CountdownEvent {
        name: name.to_owned(),
        date: date.to_owned(),
    })
}

/// Decode a `mail_queue` document. Missing fields decode to empty strings
/// so the drainer can classify the item as structurally invalid instead of
/// the decode failing.
pub fn decode_queue_item(doc: &Document) -> QueueItem {
    QueueItem {
        id: doc.id().to_owned(),
        to: doc.str_field("to").unwrap_or_default().to_owned(),
        subject: doc
            .str_field("subject")
            .unwrap_or("(no subject)")
            .to_owned(),
        content: doc.str_field("content").unwrap_or_default().to_owned(),
    }
}
