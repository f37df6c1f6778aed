use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("{message}")]
    InvalidRequest { message: String },

    #[error("clustering failed: {message}")]
    Clustering { message: String },
}

impl PlanError {
    pub fn invalid<S: Into<String>>(message: S) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    pub fn clustering<S: Into<String>>(message: S) -> Self {
        Self::Clustering {
            message: message.into(),
        }
    }

    /// Short machine-readable code for response envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidRequest { .. } => "invalid_request",
            Self::Clustering { .. } => "clustering_failed",
        }
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidRequest { .. })
    }
}
