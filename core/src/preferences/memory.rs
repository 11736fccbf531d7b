use std::collections::HashMap;
use std::sync::PoisonError;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::broadcast;
use tracing::debug;

use super::PreferenceChange;
use super::PreferenceStore;

const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// In-process preference store with change broadcasting.
pub struct MemoryPreferenceStore {
    values: RwLock<HashMap<String, Value>>,
    changes: broadcast::Sender<PreferenceChange>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::with_values(HashMap::new())
    }

    pub fn with_values(values: HashMap<String, Value>) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            values: RwLock::new(values),
            changes,
        }
    }

    /// Copy of every stored value, for persistence.
    pub fn values(&self) -> HashMap<String, Value> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Store `value` and notify subscribers. Returns the previous value.
    pub fn set(&self, key: &str, value: Value) -> Option<Value> {
        let previous = self
            .values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.clone());
        self.notify(key, Some(value));
        previous
    }

    pub fn remove(&self, key: &str) -> Option<Value> {
        let previous = self
            .values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        if previous.is_some() {
            self.notify(key, None);
        }
        previous
    }

    pub fn subscriber_count(&self) -> usize {
        self.changes.receiver_count()
    }

    fn notify(&self, key: &str, new_value: Option<Value>) {
        let change = PreferenceChange {
            key: key.to_string(),
            new_value,
        };
        // No subscribers is not an error.
        if self.changes.send(change).is_err() {
            debug!("preference `{key}` changed with no subscribers");
        }
    }
}

impl Default for MemoryPreferenceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn subscribe(&self) -> broadcast::Receiver<PreferenceChange> {
        self.changes.subscribe()
    }

    async fn update_value(&self, key: &str, value: Value) -> anyhow::Result<()> {
        self.set(key, value);
        Ok(())
    }
}
