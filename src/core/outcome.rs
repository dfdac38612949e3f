use crate::domain::model::RecordId;
use crate::utils::error::AdminError;

/// Result of one controller operation, before it is turned into a
/// user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Loaded { count: usize },
    LoadFailed { reason: String },
    Deleted { id: RecordId },
    DeleteFailed { id: RecordId, reason: String },
    FileSelected { file_name: String },
    /// Upload requested with nothing selected; no request was made.
    UploadSkipped,
    Uploaded { message: Option<String> },
    UploadFailed(UploadFailure),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            Outcome::Loaded { .. }
                | Outcome::Deleted { .. }
                | Outcome::FileSelected { .. }
                | Outcome::Uploaded { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadFailure {
    /// The backend answered with an error status.
    Server { status: u16, message: Option<String> },
    /// The request went out but no response came back.
    Connectivity,
    /// The request could not be built or sent.
    Request { message: String },
}

impl From<&AdminError> for UploadFailure {
    fn from(err: &AdminError) -> Self {
        match err {
            AdminError::ServerError { status, message } => UploadFailure::Server {
                status: *status,
                message: message.clone(),
            },
            AdminError::ConnectivityError { .. } => UploadFailure::Connectivity,
            other => UploadFailure::Request {
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_failure_classification() {
        let server = AdminError::ServerError {
            status: 500,
            message: Some("X".to_string()),
        };
        assert_eq!(
            UploadFailure::from(&server),
            UploadFailure::Server {
                status: 500,
                message: Some("X".to_string())
            }
        );

        let offline = AdminError::ConnectivityError {
            message: "connection refused".to_string(),
        };
        assert_eq!(UploadFailure::from(&offline), UploadFailure::Connectivity);

        let io = AdminError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no such file",
        ));
        match UploadFailure::from(&io) {
            UploadFailure::Request { message } => assert!(message.contains("no such file")),
            other => panic!("unexpected classification: {:?}", other),
        }
    }
}
