//! Operation execution policies.
//!
//! Every remote call goes through [`run`]: the caller's task suspends while
//! the request is in flight (nothing blocks the runtime) and any failure is
//! classified into the crate error taxonomy with the operation description
//! attached. [`envelope`] is the second policy: it converts any failure into
//! a failure envelope, so a service built on it never returns an error.

use std::future::Future;

use tracing::{debug, warn};

use crate::envelope::Envelope;
use crate::error::Error;

/// Raising policy: await the operation, classify failures, re-raise with
/// the operation description as context. `NotFound` passes through
/// unchanged so it stays distinguishable without message matching.
pub(crate) async fn run<T, F>(operation: F, description: &str) -> Result<T, Error>
where
    F: Future<Output = Result<T, Error>>,
{
    debug!("executing remote operation: {description}");

    match operation.await {
        Ok(value) => Ok(value),
        Err(Error::NotFound(message)) => {
            debug!("not found during '{description}': {message}");
            Err(Error::NotFound(message))
        }
        Err(Error::RemoteApi { status, message }) => {
            warn!("remote API error during '{description}': {status} {message}");
            Err(Error::RemoteApi {
                status,
                message: format!("{message} (during '{description}')"),
            })
        }
        // Local preconditions and guards keep their variant untouched.
        Err(err @ (Error::Validation(_) | Error::Conflict(_) | Error::Configuration(_))) => {
            Err(err)
        }
        Err(other) => {
            warn!("unexpected error during '{description}': {other}");
            Err(Error::unexpected(format!(
                "{other} (during '{description}')"
            )))
        }
    }
}

/// Envelope policy: same classification as [`run`], but the outcome is
/// always a terminating envelope with a displayable status and message.
pub(crate) async fn envelope<T, F>(operation: F) -> Envelope<T>
where
    F: Future<Output = Result<T, Error>>,
{
    Envelope::from_result(operation.await)
}
