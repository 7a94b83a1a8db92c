//! Structured logging setup and request metrics.

pub mod logging;
pub mod metrics;

pub use logging::{LogFormat, LogLevel, LoggingConfig};
pub use metrics::{DefaultMetricsCollector, MetricsCollector, NoopMetricsCollector, ServiceMetrics};
