//! Task-local trace id for the request currently being served.
//!
//! `RequestTrace` opens the scope; anything running inside the request
//! future (extractors, services, error rendering) can read the id back.

use tokio::task_local;

task_local! {
    static TRACE_ID: String;
}

const NO_TRACE: &str = "unknown";

/// Trace id of the current request, or `"unknown"` outside one.
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(Clone::clone)
        .unwrap_or_else(|_| NO_TRACE.to_string())
}

pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(trace_id, future).await
}
