use thiserror::Error;

/// Errors raised while talking to a path server.
#[derive(Error, Debug)]
pub enum DriverError {
    /// Address resolution failed
    #[error("Resolve error: {0}")]
    ResolveError(String),
    /// Connection or I/O error
    #[error("Connection error: {0}")]
    ConnectionError(String),
    /// Protocol violation
    #[error("Protocol error: {0}")]
    ProtocolError(String),
    /// Message too large
    #[error("Message too large")]
    MessageTooLarge,
    /// The server answered with an error payload
    #[error("Server error: {0}")]
    ServerError(String),
}
