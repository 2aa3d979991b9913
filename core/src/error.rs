use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiskmanError {
    #[error("Disk not found: {0}")]
    DiskNotFound(String),

    #[error("Volume not found: {0}")]
    VolumeNotFound(String),

    #[error("No disk selected. Please select a disk first.")]
    NoDiskSelected,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Insufficient free space on disk. Required: {required_mb} MB, Available: {available_mb} MB.")]
    InsufficientSpace { required_mb: u64, available_mb: u64 },

    #[error("Platform not supported: {0}")]
    PlatformNotSupported(String),

    #[error("External tool missing: {0}")]
    ExternalToolMissing(String),

    #[error("External command failed: {0}")]
    External(String),

    #[error("{method} failed with code {code}: {reason}")]
    MethodFailed {
        method: String,
        code: u32,
        reason: String,
    },

    #[error("diskpart failed: {0}")]
    ToolFailed(String),

    #[error("Failed to {operation} using both WMI and diskpart")]
    FallbackFailed { operation: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Other error: {0}")]
    Other(String),
}

impl DiskmanError {
    /// Errors raised before the OS was asked to do anything.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DiskmanError::InvalidInput(_)
                | DiskmanError::InsufficientSpace { .. }
                | DiskmanError::NoDiskSelected
                | DiskmanError::DiskNotFound(_)
        )
    }
}
