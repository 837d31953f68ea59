use crate::tracking::PurchaseEvent;
use async_trait::async_trait;
use std::sync::Mutex;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("Failed to serialize purchase event: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Analytics sink unavailable: {0}")]
    Unavailable(String),
}

/// Destination for purchase events (the page's analytics queue, a collector, a log)
#[async_trait]
pub trait PurchaseEventSink: Send + Sync {
    async fn emit(&self, event: &PurchaseEvent) -> Result<(), SinkError>;
}

/// Writes each event to the log as JSON
#[derive(Debug, Default)]
pub struct TracingSink;

#[async_trait]
impl PurchaseEventSink for TracingSink {
    async fn emit(&self, event: &PurchaseEvent) -> Result<(), SinkError> {
        let payload = serde_json::to_string(event)?;
        info!(
            event_id = %event.event_id,
            products = event.products.len(),
            payload = %payload,
            "Purchase event emitted"
        );
        Ok(())
    }
}

/// Keeps emitted events in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<PurchaseEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<PurchaseEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl PurchaseEventSink for MemorySink {
    async fn emit(&self, event: &PurchaseEvent) -> Result<(), SinkError> {
        let mut events = self
            .events
            .lock()
            .map_err(|_| SinkError::Unavailable("memory sink lock poisoned".to_string()))?;
        events.push(event.clone());
        Ok(())
    }
}
