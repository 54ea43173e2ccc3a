use thiserror::Error;

/// Errors surfaced by the automation and ticketing collaborators.
///
/// None of these are fatal to an audit run: probes recover from them at
/// their own boundary and ticket creation isolates them per issue.
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("element not found: {0}")]
    ElementNotFound(String),

    #[error("automation backend error: {0}")]
    PlatformError(String),

    #[error("operation timed out: {0}")]
    Timeout(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("ticket creation failed: {0}")]
    TicketFailed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Serde(#[from] serde_json::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}
