//! Prelude module for common imports.
//!
//! # Usage
//!
//! ```ignore
//! use mcprobe::prelude::*;
//! ```

// Error types
pub use crate::error::{ProbeError, Result};

// Configuration
pub use crate::config::{Config, ProbeConfig};

// Catalog
pub use crate::catalog::{DEFAULT_PORT, Metric, MetricDefinition};

// Check
pub use crate::check::{CheckRequest, CheckSelection, ProbeTarget};

// Probe
pub use crate::probe::{ProbeOutcome, Prober, StatusResponse};

// Reporting
pub use crate::report::{MetricResult, ReportWriter};

// Common external crates
pub use tracing::{debug, error, info, trace, warn};
