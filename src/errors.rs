use std::net::SocketAddr;

/// All error types that can occur while exchanging commands with a bulb.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to serialize a [`crate::Command`] to JSON.
    #[error("failed to dump json: {0}")]
    Encode(serde_json::Error),

    /// A network socket operation failed while communicating with the bulb.
    #[error("socket {action} error: {err}")]
    Transport { action: String, err: std::io::Error },

    /// No reply arrived before the exchange timeout elapsed.
    #[error("timeout - could not reach bulb at {target}; check the IP address")]
    Timeout { target: SocketAddr },

    /// A reply arrived but was not valid JSON.
    #[error("malformed reply from bulb: {0}")]
    Decode(serde_json::Error),
}

/// Coarse failure class of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Timeout,
    Decode,
}

impl Error {
    /// Create a new transport error
    pub fn transport(action: &str, err: std::io::Error) -> Self {
        Error::Transport {
            action: action.to_string(),
            err,
        }
    }

    /// Create a new timeout error
    pub fn timeout(target: SocketAddr) -> Self {
        Error::Timeout { target }
    }

    /// Returns the failure class. Encoding failures count as transport
    /// failures since nothing was put on the wire.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Encode(_) | Error::Transport { .. } => ErrorKind::Transport,
            Error::Timeout { .. } => ErrorKind::Timeout,
            Error::Decode(_) => ErrorKind::Decode,
        }
    }
}

/// Hacky implementation of PartialEq for testing
#[cfg(test)]
impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}
