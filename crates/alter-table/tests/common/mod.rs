#![allow(dead_code)]

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::{Arc, Mutex};

use alter_table::prelude::*;
use async_trait::async_trait;
use tracing::field::{Field, Visit};
use tracing::subscriber::DefaultGuard;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// One call that reached the adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Execute(String),
    IndexExists { table: String, index: String },
}

/// Adapter that records every call and serves index metadata from memory.
///
/// Uses the trait's ANSI defaults for quoting and type mapping.
#[derive(Debug)]
pub struct RecordingAdapter {
    calls: Mutex<Vec<Call>>,
    indexes: Mutex<HashSet<(String, String)>>,
    max_index_name_length: usize,
    fail_execute: Option<String>,
}

impl RecordingAdapter {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            indexes: Mutex::new(HashSet::new()),
            max_index_name_length: 64,
            fail_execute: None,
        }
    }

    pub fn with_index(self, table: &str, index: &str) -> Self {
        self.add_existing_index(table, index);
        self
    }

    pub fn with_max_index_name_length(mut self, length: usize) -> Self {
        self.max_index_name_length = length;
        self
    }

    /// Makes every `execute` fail with a database error.
    pub fn failing(mut self, message: &str) -> Self {
        self.fail_execute = Some(message.to_string());
        self
    }

    pub fn add_existing_index(&self, table: &str, index: &str) {
        self.indexes
            .lock()
            .unwrap()
            .insert((table.to_string(), index.to_string()));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn executed(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Execute(sql) => Some(sql),
                Call::IndexExists { .. } => None,
            })
            .collect()
    }
}

#[async_trait]
impl SchemaAdapter for RecordingAdapter {
    async fn execute(&self, sql: &str) -> Result<StatementOutcome> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::Execute(sql.to_string()));
        match &self.fail_execute {
            Some(message) => Err(sqlx::Error::Protocol(message.clone()).into()),
            None => Ok(StatementOutcome { rows_affected: 0 }),
        }
    }

    async fn index_exists(&self, table: &str, index_name: &str, _fallback: bool) -> Result<bool> {
        self.calls.lock().unwrap().push(Call::IndexExists {
            table: table.to_string(),
            index: index_name.to_string(),
        });
        Ok(self
            .indexes
            .lock()
            .unwrap()
            .contains(&(table.to_string(), index_name.to_string())))
    }

    fn max_index_name_length(&self) -> usize {
        self.max_index_name_length
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// A log event with its fields rendered as strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedEvent {
    pub level: Level,
    pub fields: BTreeMap<String, String>,
}

impl CapturedEvent {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

#[derive(Default)]
struct FieldVisitor(BTreeMap<String, String>);

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{value:?}"));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.0.insert(field.name().to_string(), value.to_string());
    }
}

/// Layer collecting every event emitted while it is installed.
#[derive(Debug, Clone, Default)]
pub struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl EventCapture {
    pub fn warnings(&self) -> Vec<CapturedEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|event| event.level == Level::WARN)
            .cloned()
            .collect()
    }
}

impl<S: Subscriber> Layer<S> for EventCapture {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            fields: visitor.0,
        });
    }
}

/// Installs an [`EventCapture`] for the current thread until the guard drops.
///
/// `#[tokio::test]` runs on a current-thread runtime, so events from the
/// awaited alteration land here.
pub fn capture_events() -> (EventCapture, DefaultGuard) {
    let capture = EventCapture::default();
    let guard =
        tracing::subscriber::set_default(tracing_subscriber::registry().with(capture.clone()));
    (capture, guard)
}
