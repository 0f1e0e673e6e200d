//! Error types for mcprobe
//!
//! Every variant maps to one process exit code, so the binary can pick its
//! exit status from the error alone.

use std::time::Duration;
use thiserror::Error;

/// Exit code for a clean run, including a "down" result
pub const EXIT_OK: u8 = 0;

/// Exit code for anything without a dedicated code
pub const EXIT_FAILURE: u8 = 1;

/// Exit code for a wrong number of invocation parameters
pub const EXIT_INVALID_PARAMETERS: u8 = 3;

/// Exit code for a requested metric missing from the stats response
pub const EXIT_METRIC_NOT_FOUND: u8 = 8;

/// Exit code for an unknown or unreachable host
pub const EXIT_UNKNOWN_HOST: u8 = 28;

/// Main error type for mcprobe
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Wrong number of parameters: {0}")]
    InvalidParameters(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid port: {0:?}")]
    InvalidPort(String),

    #[error("Unknown host: {0}")]
    UnknownHost(String),

    #[error("Connection to {addr} failed: {source}")]
    Connection {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("No response within {0:?}")]
    Timeout(Duration),

    #[error("Connection closed before any response")]
    ConnectionClosed,

    #[error("Metric not found in stats response: {0}")]
    MetricNotFound(&'static str),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProbeError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidParameters(_) => EXIT_INVALID_PARAMETERS,
            Self::MetricNotFound(_) => EXIT_METRIC_NOT_FOUND,
            Self::UnknownHost(_)
            | Self::Connection { .. }
            | Self::Timeout(_)
            | Self::ConnectionClosed => EXIT_UNKNOWN_HOST,
            Self::InvalidArgument(_) | Self::InvalidPort(_) | Self::Config(_) | Self::Io(_) => {
                EXIT_FAILURE
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ProbeError>;
