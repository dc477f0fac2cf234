use layers::LayerId;

/// Network or decode failure on a vector or bounds fetch.
///
/// Always caught at the owning layer's boundary; sibling layers proceed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Transport-level failure (connect, DNS, body read).
    Transport(String),
    /// Non-success HTTP status.
    Status(u16),
    /// Body received but not decodable as the expected document.
    Decode(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Transport(reason) => write!(f, "transport error: {reason}"),
            FetchError::Status(code) => write!(f, "unexpected status {code}"),
            FetchError::Decode(reason) => write!(f, "decode error: {reason}"),
        }
    }
}

impl std::error::Error for FetchError {}

/// Sequencing-invariant violations in the attachment path.
///
/// These indicate a controller bug, not a user-facing condition: the surface
/// must be ready before anything attaches, and no id may attach twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachError {
    SurfaceNotReady,
    DuplicateAttachment(LayerId),
}

impl std::fmt::Display for AttachError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttachError::SurfaceNotReady => write!(f, "rendering surface is not ready"),
            AttachError::DuplicateAttachment(id) => {
                write!(f, "layer {id} is already attached")
            }
        }
    }
}

impl std::error::Error for AttachError {}
