use crate::service::ApiError;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("no file selected")]
    NoFileSelected,
    #[error("not an image")]
    NotAnImage,
}

/// Outcome of a failed flow. Each one has already been shown to the user
/// when it is returned.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    #[error(transparent)]
    Validation( #[from] ValidationError ),
    #[error("{0}")]
    Service(String),
    #[error("{context}: {description}")]
    Transport {
        context: &'static str,
        description: String,
    },
}

impl FlowError {
    /// Splits an api failure into the service's own message or a transport
    /// failure described under `context`.
    pub fn from_api(context: &'static str, err: ApiError) -> Self {
        match err {
            ApiError::ResponseError(message) => FlowError::Service(message),
            err => FlowError::Transport {
                context,
                description: err.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_message_is_verbatim() {
        let err = FlowError::from_api("Delete failed", ApiError::ResponseError("File not found".into()));
        assert_eq!(err.to_string(), "File not found");
    }

    #[test]
    fn transport_failure_is_prefixed() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
        let err = FlowError::from_api("Upload failed", ApiError::IoError(io));
        assert_eq!(err.to_string(), "Upload failed: connection refused");
    }
}
