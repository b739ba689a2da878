//! Shared response envelope for resource endpoints.
//!
//! Resource reads and writes answer with `{ "data": ... }`. The matching
//! endpoint is the exception: its body is the orchestrator's summary as-is.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
