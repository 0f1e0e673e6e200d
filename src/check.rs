//! A single check: what to evaluate, where, and the run that ties the
//! probe to the reporter

use crate::catalog::{CATALOG_SIZE, DEFAULT_PORT, Metric};
use crate::config::ProbeConfig;
use crate::probe::{ProbeOutcome, Prober};
use crate::report::{self, MetricResult};
use crate::{ProbeError, Result};
use std::ffi::OsString;
use tracing::{debug, warn};

/// Number of positional invocation parameters
pub const PARAMETER_COUNT: usize = 3;

/// Which catalog metrics the caller wants, in catalog order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CheckSelection([bool; CATALOG_SIZE]);

impl CheckSelection {
    pub fn new(flags: [bool; CATALOG_SIZE]) -> Self {
        Self(flags)
    }

    /// Every metric selected
    pub fn all() -> Self {
        Self([true; CATALOG_SIZE])
    }

    /// Parse a comma separated list of `1`/`0` flags
    ///
    /// Surrounding double quotes are dropped. A flag is on only if it is
    /// exactly `1`; the flag count must match the catalog.
    pub fn parse(input: &str) -> Result<Self> {
        let tokens: Vec<&str> = input.trim_matches('"').split(',').collect();
        if tokens.len() != CATALOG_SIZE {
            return Err(ProbeError::InvalidParameters(format!(
                "expected {CATALOG_SIZE} metric flags, got {}",
                tokens.len()
            )));
        }

        let mut flags = [false; CATALOG_SIZE];
        for (flag, token) in flags.iter_mut().zip(tokens) {
            *flag = token == "1";
        }
        Ok(Self(flags))
    }

    pub fn is_selected(&self, metric: Metric) -> bool {
        self.0[metric.index()]
    }

    /// Selected metrics in catalog order
    pub fn selected(&self) -> impl Iterator<Item = Metric> + '_ {
        Metric::ALL.into_iter().filter(|m| self.is_selected(*m))
    }
}

/// Host and port to probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeTarget {
    pub host: String,
    pub port: u16,
}

impl ProbeTarget {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Build a target from raw arguments, an empty port means `11211`
    pub fn parse(host: &str, port: &str) -> Result<Self> {
        let port = if port.is_empty() {
            DEFAULT_PORT
        } else {
            match port.parse::<u16>() {
                Ok(p) if p != 0 => p,
                _ => return Err(ProbeError::InvalidPort(port.to_string())),
            }
        };

        Ok(Self::new(host, port))
    }

    /// `host:port` form used in log lines and errors
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// A complete check request built from the invocation parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRequest {
    pub selection: CheckSelection,
    pub target: ProbeTarget,
}

impl CheckRequest {
    /// Build a request from `<flags> <host> <port>`
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        check_arity(args.len())?;

        let selection = CheckSelection::parse(args[0].as_ref())?;
        let target = ProbeTarget::parse(args[1].as_ref(), args[2].as_ref())?;

        Ok(Self { selection, target })
    }

    /// Build a request from raw process arguments
    ///
    /// The count is checked before any argument is decoded, so a wrong
    /// count is reported as such even when an argument is not UTF-8.
    pub fn from_os_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = OsString>,
    {
        let args: Vec<OsString> = args.into_iter().collect();
        check_arity(args.len())?;

        let args = args
            .into_iter()
            .enumerate()
            .map(|(i, arg)| {
                arg.into_string().map_err(|raw| {
                    ProbeError::InvalidArgument(format!(
                        "argument {} is not valid UTF-8: {raw:?}",
                        i + 1
                    ))
                })
            })
            .collect::<Result<Vec<String>>>()?;

        Self::from_args(&args)
    }
}

fn check_arity(count: usize) -> Result<()> {
    if count == PARAMETER_COUNT {
        Ok(())
    } else {
        Err(ProbeError::InvalidParameters(format!(
            "expected {PARAMETER_COUNT}, got {count}"
        )))
    }
}

/// Run one check and return the results to report, in catalog order
///
/// A transport failure is not an error here: it becomes a "down" result.
/// The only error out of a probed run is a missing source field.
pub async fn run(request: &CheckRequest, config: &ProbeConfig) -> Result<Vec<MetricResult>> {
    let prober = Prober::new(config.clone());

    match prober.probe(&request.target).await {
        ProbeOutcome::Up(response) => {
            debug!(
                "{} answered in {:?} ({} bytes)",
                request.target.addr(),
                response.elapsed,
                response.payload.len()
            );
            report::collect_up(&request.selection, &response)
        }
        ProbeOutcome::Down(reason) => {
            warn!("{} is down: {}", request.target.addr(), reason);
            Ok(report::collect_down(&request.selection))
        }
    }
}
