//! Uniform result envelope for callers that must never see an error escape.
//!
//! An envelope carries exactly one of data or failure, plus an integer
//! status classification and a message safe to display.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Integer classification of an envelope outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
pub enum Status {
    Ok = 0,
    Validation = 1,
    NotFound = 2,
    Conflict = 3,
    RemoteApi = 4,
    Unexpected = 5,
    Configuration = 6,
}

impl From<Status> for u16 {
    fn from(status: Status) -> Self {
        status as u16
    }
}

impl TryFrom<u16> for Status {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, String> {
        match value {
            0 => Ok(Status::Ok),
            1 => Ok(Status::Validation),
            2 => Ok(Status::NotFound),
            3 => Ok(Status::Conflict),
            4 => Ok(Status::RemoteApi),
            5 => Ok(Status::Unexpected),
            6 => Ok(Status::Configuration),
            other => Err(format!("unknown status code {other}")),
        }
    }
}

impl From<&Error> for Status {
    fn from(err: &Error) -> Self {
        match err {
            Error::Validation(_) => Status::Validation,
            Error::NotFound(_) => Status::NotFound,
            Error::Conflict(_) => Status::Conflict,
            Error::RemoteApi { .. } => Status::RemoteApi,
            Error::Unexpected(_) => Status::Unexpected,
            Error::Configuration(_) => Status::Configuration,
        }
    }
}

/// Result wrapper returned by the enveloped variant of every service
/// operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: Status,
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Wrap a successful result.
    pub fn ok(data: T) -> Self {
        Envelope {
            status: Status::Ok,
            success: true,
            message: "ok".to_string(),
            data: Some(data),
        }
    }

    /// Wrap a failure; the error's display form becomes the message.
    pub fn failure(err: &Error) -> Self {
        Envelope {
            status: Status::from(err),
            success: false,
            message: err.to_string(),
            data: None,
        }
    }

    /// Convert a throwing-variant result into an envelope.
    pub fn from_result(result: Result<T, Error>) -> Self {
        match result {
            Ok(data) => Envelope::ok(data),
            Err(err) => Envelope::failure(&err),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_carries_data_only() {
        let env = Envelope::ok(42);
        assert!(env.is_success());
        assert_eq!(env.status, Status::Ok);
        assert_eq!(env.data, Some(42));
    }

    #[test]
    fn test_failure_carries_no_data() {
        let env: Envelope<i64> = Envelope::failure(&Error::not_found("issue 5"));
        assert!(!env.is_success());
        assert_eq!(env.status, Status::NotFound);
        assert!(env.data.is_none());
        assert_eq!(env.message, "not found: issue 5");
    }

    #[test]
    fn test_from_result() {
        let env = Envelope::from_result(Ok("hello"));
        assert!(env.is_success());

        let env: Envelope<&str> =
            Envelope::from_result(Err(Error::conflict("already closed")));
        assert_eq!(env.status, Status::Conflict);
        assert!(!env.success);
    }

    #[test]
    fn test_status_roundtrips_as_integer() {
        let json = serde_json::to_string(&Status::Conflict).expect("serialize");
        assert_eq!(json, "3");
        let back: Status = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, Status::Conflict);
    }

    #[test]
    fn test_status_unknown_code_rejected() {
        let result: Result<Status, _> = serde_json::from_str("99");
        assert!(result.is_err());
    }
}
