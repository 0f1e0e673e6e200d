//! # mcprobe
//!
//! Single-shot availability probe for memcached-compatible cache servers.
//!
//! One run connects to the server, sends `stats`, and reports whether the
//! server answered, how long the first reply chunk took, and the server's
//! uptime. A server that cannot be reached is reported as down rather than
//! treated as a failure of the probe itself.
//!
//! ## Example
//!
//! ```ignore
//! use mcprobe::check::{self, CheckRequest};
//! use mcprobe::config::Config;
//! use mcprobe::report::ReportWriter;
//!
//! let request = CheckRequest::from_args(&["1,1,1", "127.0.0.1", ""])?;
//! let results = check::run(&request, &Config::default().probe).await?;
//!
//! let mut writer = ReportWriter::default();
//! writer.metrics(&results);
//! ```
//!
//! ## Output
//!
//! ```text
//! 1531:Status:9|1|
//! 1532:Response Time:4|3|
//! 1533:Uptime:4|12345|
//! ```

// Modules
pub mod catalog;
pub mod check;
pub mod config;
pub mod error;
pub mod prelude;
pub mod probe;
pub mod protocol;
pub mod report;

// Re-exports for convenience
pub use error::{ProbeError, Result};
