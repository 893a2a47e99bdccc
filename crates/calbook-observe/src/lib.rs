//! Observability setup for Calbook: structured logging via `tracing`, with
//! optional OpenTelemetry span export for local debugging.

pub mod tracing_setup;
