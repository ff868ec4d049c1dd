use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] tasa_core::ConfigError),

    #[error("strict mode failed: {unavailable} source(s) unavailable")]
    StrictModeViolation { unavailable: usize },

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error("failed to format timestamp: {0}")]
    Timestamp(#[from] time::error::Format),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 2,
            Self::StrictModeViolation { .. } => 5,
            Self::Serialization(_) | Self::Timestamp(_) => 4,
            Self::Io(_) => 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_stable() {
        assert_eq!(CliError::Config(tasa_core::ConfigError::ZeroTimeout).exit_code(), 2);
        assert_eq!(CliError::StrictModeViolation { unavailable: 1 }.exit_code(), 5);
        assert_eq!(CliError::Io(std::io::Error::other("closed")).exit_code(), 10);
    }
}
