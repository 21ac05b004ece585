//! # Observability
//!
//! Prometheus metrics for the controller. Structured logging lives with the
//! code that emits it; this module only owns the metric registry.

pub mod metrics;
