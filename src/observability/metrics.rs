//! Request metrics.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::Duration;

use crate::errors::ErrorKind;

/// Sink for per-call metrics recorded by the client.
pub trait MetricsCollector: Send + Sync {
    /// Records a completed call (success or failure) of a command.
    fn record_request(&self, command: &str, duration: Duration, success: bool);

    /// Records a failed call.
    fn record_error(&self, command: &str, kind: ErrorKind);

    /// Records a retry of a command.
    fn record_retry(&self, command: &str, attempt: u32);

    /// Returns a snapshot.
    fn get_metrics(&self) -> ServiceMetrics;
}

/// Snapshot of aggregated metrics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServiceMetrics {
    /// Calls made.
    pub total_requests: u64,
    /// Calls that returned a value.
    pub successful_requests: u64,
    /// Calls that returned an error.
    pub failed_requests: u64,
    /// Retries issued.
    pub total_retries: u64,
    /// Mean call duration in milliseconds, retries included.
    pub avg_duration_ms: f64,
    /// Calls per command.
    pub requests_by_command: HashMap<String, u64>,
    /// Errors per kind.
    pub errors_by_kind: HashMap<String, u64>,
}

/// In-memory collector backed by atomic counters.
#[derive(Debug)]
pub struct DefaultMetricsCollector {
    total_requests: AtomicU64,
    successful_requests: AtomicU64,
    failed_requests: AtomicU64,
    total_retries: AtomicU64,
    total_duration_ms: AtomicU64,
    requests_by_command: RwLock<HashMap<String, u64>>,
    errors_by_kind: RwLock<HashMap<String, u64>>,
}

impl Default for DefaultMetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultMetricsCollector {
    /// Creates a collector with zeroed counters.
    pub fn new() -> Self {
        Self {
            total_requests: AtomicU64::new(0),
            successful_requests: AtomicU64::new(0),
            failed_requests: AtomicU64::new(0),
            total_retries: AtomicU64::new(0),
            total_duration_ms: AtomicU64::new(0),
            requests_by_command: RwLock::new(HashMap::new()),
            errors_by_kind: RwLock::new(HashMap::new()),
        }
    }

    /// Resets all counters.
    pub fn reset(&self) {
        self.total_requests.store(0, Ordering::SeqCst);
        self.successful_requests.store(0, Ordering::SeqCst);
        self.failed_requests.store(0, Ordering::SeqCst);
        self.total_retries.store(0, Ordering::SeqCst);
        self.total_duration_ms.store(0, Ordering::SeqCst);

        if let Ok(mut commands) = self.requests_by_command.write() {
            commands.clear();
        }
        if let Ok(mut errors) = self.errors_by_kind.write() {
            errors.clear();
        }
    }
}

impl MetricsCollector for DefaultMetricsCollector {
    fn record_request(&self, command: &str, duration: Duration, success: bool) {
        self.total_requests.fetch_add(1, Ordering::SeqCst);
        self.total_duration_ms
            .fetch_add(duration.as_millis() as u64, Ordering::SeqCst);

        if success {
            self.successful_requests.fetch_add(1, Ordering::SeqCst);
        } else {
            self.failed_requests.fetch_add(1, Ordering::SeqCst);
        }

        if let Ok(mut commands) = self.requests_by_command.write() {
            *commands.entry(command.to_string()).or_insert(0) += 1;
        }
    }

    fn record_error(&self, _command: &str, kind: ErrorKind) {
        if let Ok(mut errors) = self.errors_by_kind.write() {
            *errors.entry(kind.as_str().to_string()).or_insert(0) += 1;
        }
    }

    fn record_retry(&self, _command: &str, _attempt: u32) {
        self.total_retries.fetch_add(1, Ordering::SeqCst);
    }

    fn get_metrics(&self) -> ServiceMetrics {
        let total = self.total_requests.load(Ordering::SeqCst);
        let total_duration = self.total_duration_ms.load(Ordering::SeqCst);
        let avg_duration = if total > 0 {
            total_duration as f64 / total as f64
        } else {
            0.0
        };

        ServiceMetrics {
            total_requests: total,
            successful_requests: self.successful_requests.load(Ordering::SeqCst),
            failed_requests: self.failed_requests.load(Ordering::SeqCst),
            total_retries: self.total_retries.load(Ordering::SeqCst),
            avg_duration_ms: avg_duration,
            requests_by_command: self
                .requests_by_command
                .read()
                .map(|r| r.clone())
                .unwrap_or_default(),
            errors_by_kind: self
                .errors_by_kind
                .read()
                .map(|r| r.clone())
                .unwrap_or_default(),
        }
    }
}

/// Collector that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMetricsCollector;

impl MetricsCollector for NoopMetricsCollector {
    fn record_request(&self, _command: &str, _duration: Duration, _success: bool) {}
    fn record_error(&self, _command: &str, _kind: ErrorKind) {}
    fn record_retry(&self, _command: &str, _attempt: u32) {}
    fn get_metrics(&self) -> ServiceMetrics {
        ServiceMetrics::default()
    }
}
