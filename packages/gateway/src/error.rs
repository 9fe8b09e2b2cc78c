use thiserror::Error;

/// Errors surfaced by payment-gateway calls.
///
/// No distinction is made between transient and permanent failures; callers
/// treat every variant as a hard error.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The HTTP request itself failed (connect, timeout, TLS, decode).
    #[error("gateway transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The gateway answered with a non-success status.
    #[error("gateway rejected the request ({status}): {body}")]
    Api { status: u16, body: String },
}
