use thiserror::Error;

/// Failure of an upstream call, surfaced verbatim to subscribers.
///
/// The variants carry rendered messages rather than source errors so that a
/// value can be cloned into every observer of the error state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
    /// The request never produced a response (DNS, connect, TLS, timeout).
    #[error("transport error: {0}")]
    Transport(String),

    /// A response arrived but its body did not have the expected shape.
    #[error("decoding error: {0}")]
    Decoding(String),

    /// The service answered with a non-success status.
    #[error("upstream rejected request ({status}): {message}")]
    Rejection { status: u16, message: String },
}

impl UpstreamError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn decoding(message: impl Into<String>) -> Self {
        Self::Decoding(message.into())
    }

    pub fn rejection(status: u16, message: impl Into<String>) -> Self {
        Self::Rejection {
            status,
            message: message.into(),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    pub fn is_decoding(&self) -> bool {
        matches!(self, Self::Decoding(_))
    }

    /// HTTP status for rejections.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejection { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type UpstreamResult<T> = std::result::Result<T, UpstreamError>;
