/// Pluggable key-value backends.
pub mod kv_store;
/// Persisted record definitions.
pub mod models;
/// Statistics and donation persistence.
pub mod stats;
/// Storage error types shared by every backend.
pub mod storage;
/// Built-in word catalogue and sampling.
pub mod words;
