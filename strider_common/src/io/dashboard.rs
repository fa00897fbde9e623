//! Dashboard key-value store.
//!
//! Telemetry is written here every tick and the autonomous routine key is
//! read from here once at the start of autonomous. Reads never fail: a
//! missing or mistyped key yields the caller's default.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::warn;

/// A value stored under a dashboard key.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardValue {
    Number(f64),
    Bool(bool),
    Text(String),
    TextArray(Vec<String>),
}

/// Telemetry sink and string configuration source.
pub trait Dashboard: Send + Sync {
    /// Read a value.
    fn get(&self, key: &str) -> Option<DashboardValue>;

    /// Write a value, replacing any previous one.
    fn put(&self, key: &str, value: DashboardValue);

    fn get_string(&self, key: &str, default: &str) -> String {
        match self.get(key) {
            Some(DashboardValue::Text(s)) => s,
            Some(other) => {
                warn!(key, found = ?other, default, "dashboard value is not text, using default");
                default.to_string()
            }
            None => default.to_string(),
        }
    }

    fn get_number(&self, key: &str, default: f64) -> f64 {
        match self.get(key) {
            Some(DashboardValue::Number(n)) => n,
            Some(other) => {
                warn!(key, found = ?other, default, "dashboard value is not a number, using default");
                default
            }
            None => default,
        }
    }

    fn put_string(&self, key: &str, value: &str) {
        self.put(key, DashboardValue::Text(value.to_string()));
    }

    fn put_number(&self, key: &str, value: f64) {
        self.put(key, DashboardValue::Number(value));
    }

    fn put_bool(&self, key: &str, value: bool) {
        self.put(key, DashboardValue::Bool(value));
    }

    fn put_string_array(&self, key: &str, values: &[&str]) {
        self.put(
            key,
            DashboardValue::TextArray(values.iter().map(|v| v.to_string()).collect()),
        );
    }
}

/// In-process dashboard backed by a hash map.
#[derive(Debug, Default)]
pub struct MemoryDashboard {
    entries: RwLock<HashMap<String, DashboardValue>>,
}

impl MemoryDashboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Sorted snapshot of all entries.
    pub fn snapshot(&self) -> Vec<(String, DashboardValue)> {
        let mut entries: Vec<_> = self
            .entries
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}

impl Dashboard for MemoryDashboard {
    fn get(&self, key: &str) -> Option<DashboardValue> {
        self.entries.read().get(key).cloned()
    }

    fn put(&self, key: &str, value: DashboardValue) {
        self.entries.write().insert(key.to_string(), value);
    }
}
