//! # Errors
//!
//! Error taxonomy for the relying-party API. JSON endpoints surface these as
//! an HTTP status plus a plain-text body; browser-facing flows render an
//! outcome page instead wherever a template can be chosen.

use http::StatusCode;
use thiserror::Error;

/// Relying-party error codes.
#[derive(Error, Clone, Debug)]
pub enum Error {
    /// Malformed caller input, or the downstream verifier rejecting the
    /// submitted payload.
    #[error("{0}")]
    InvalidRequest(String),

    /// A failure on the server's own side: template loading, the transient
    /// store, or authorization-redirect construction.
    #[error("{0}")]
    ServerError(String),

    /// A correlation token with no matching transient-store entry.
    #[error("{0}")]
    NotFound(String),
}

impl Error {
    /// The HTTP status code this error maps to when surfaced directly.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::ServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast_ref::<Self>() {
            Some(Self::InvalidRequest(e)) => Self::InvalidRequest(format!("{err}: {e}")),
            Some(Self::ServerError(e)) => Self::ServerError(format!("{err}: {e}")),
            Some(Self::NotFound(e)) => Self::NotFound(format!("{err}: {e}")),
            None => {
                let stack = err.chain().fold(String::new(), |cause, e| format!("{cause} -> {e}"));
                let stack = stack.trim_start_matches(" -> ").to_string();
                Self::ServerError(stack)
            }
        }
    }
}

/// Construct an `Error::InvalidRequest` error from a string or existing error
/// value.
macro_rules! invalid {
    ($fmt:expr, $($arg:tt)*) => {
        $crate::Error::InvalidRequest(format!($fmt, $($arg)*))
    };
     ($err:expr $(,)?) => {
        $crate::Error::InvalidRequest(format!($err))
    };
}
pub(crate) use invalid;

/// Construct an `Error::ServerError` error from a string or existing error
/// value.
macro_rules! server {
    ($fmt:expr, $($arg:tt)*) => {
        $crate::Error::ServerError(format!($fmt, $($arg)*))
    };
     ($err:expr $(,)?) => {
        $crate::Error::ServerError(format!($err))
    };
}
pub(crate) use server;

#[cfg(test)]
mod test {
    use anyhow::{Context, Result, anyhow};
    use serde_json::Value;

    use super::*;

    // Test that error context is folded into the error text.
    #[test]
    fn invalid_context() {
        let result = Err::<(), Error>(Error::InvalidRequest("invalid request".to_string()))
            .context("request context");
        let err: Error = result.unwrap_err().into();

        assert_eq!(err.to_string(), "request context: invalid request");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn anyhow_context() {
        let result = Err::<(), anyhow::Error>(anyhow!("one-off error")).context("error context");
        let err: Error = result.unwrap_err().into();

        assert_eq!(err.to_string(), "error context -> one-off error");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn serde_context() {
        let result: Result<Value, anyhow::Error> =
            serde_json::from_str(r#"{"foo": "bar""#).context("error context");
        let err: Error = result.unwrap_err().into();

        assert_eq!(
            err.to_string(),
            "error context -> EOF while parsing an object at line 1 column 13"
        );
    }
}
