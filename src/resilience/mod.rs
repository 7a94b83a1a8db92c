//! Resilience patterns for the Encosion client.
//!
//! The API signals transient overload with fault code 103. Calls that hit
//! it are re-issued immediately, up to a fixed bound; every other failure
//! propagates on the first occurrence.

mod retry;

pub use retry::{RetryConfig, RetryExecutor};
