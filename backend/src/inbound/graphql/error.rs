//! Conversion of domain errors into GraphQL response errors.

use async_graphql::{ErrorExtensions, Value};
use tracing::error;

use crate::domain::{Error, ErrorCode};

const REDACTED: &str = "Internal server error";

/// Convert a domain error into a GraphQL error.
///
/// The code lands in `extensions.code`, the trace id in
/// `extensions.traceId`, and structured details are merged into the
/// extensions. Internal and availability failures are logged and their
/// messages replaced with a generic one.
pub fn graphql_error(err: Error) -> async_graphql::Error {
    let message = match err.code() {
        ErrorCode::InternalError | ErrorCode::ServiceUnavailable => {
            error!(code = %err.code(), trace_id = err.trace_id(), error = %err, "request failed");
            REDACTED.to_owned()
        }
        _ => err.message().to_owned(),
    };
    async_graphql::Error::new(message).extend_with(|_, extensions| {
        if let Some(details) = err.details().and_then(|value| value.as_object()) {
            for (key, value) in details {
                if let Ok(value) = Value::from_json(value.clone()) {
                    extensions.set(key, value);
                }
            }
        }
        extensions.set("code", err.code().as_str().to_owned());
        if let Some(trace_id) = err.trace_id() {
            extensions.set("traceId", trace_id.to_owned());
        }
    })
}
