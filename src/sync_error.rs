use thiserror::Error;

pub(crate) type SyncResult<T> = Result<T, SyncError>;

#[derive(Debug, Error)]
pub(crate) enum SyncError {
    #[error("access to the photo source is denied: {0}")]
    SourceAccessDenied(String),

    #[error("access to the cloud disk is denied: {0}")]
    RemoteAccessDenied(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("upload of {name} failed with status {status}")]
    UploadFailed { name: String, status: u16 },

    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("cannot read env file: {0}")]
    EnvFile(#[from] dotenvy::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] json::Error),
}

impl SyncError {
    /// Either provider rejected the supplied credentials.
    pub(crate) fn is_access_denied(&self) -> bool {
        matches!(
            self,
            SyncError::SourceAccessDenied(_) | SyncError::RemoteAccessDenied(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn denial_kinds_are_grouped() {
        assert!(SyncError::SourceAccessDenied("x".into()).is_access_denied());
        assert!(SyncError::RemoteAccessDenied("x".into()).is_access_denied());
        assert!(!SyncError::InvalidInput("x".into()).is_access_denied());
    }

    #[test]
    fn upload_failure_names_the_file() {
        let err = SyncError::UploadFailed { name: "5.jpg".into(), status: 507 };
        assert_eq!(err.to_string(), "upload of 5.jpg failed with status 507");
    }
}
