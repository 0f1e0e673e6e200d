//! mcprobe - single-shot memcached availability probe
//!
//! Usage: `mcprobe <METRIC_STATE> <HOST> <PORT>`
//!
//! `METRIC_STATE` is a comma separated list of `1`/`0` flags for Status,
//! Response Time and Uptime, in that order. An empty `PORT` means 11211.
//! Results go to stdout, one `<id>|<value>|` line per metric; diagnostics
//! go to stderr.

use mcprobe::check;
use mcprobe::error::{EXIT_FAILURE, EXIT_OK};
use mcprobe::prelude::*;
use std::io::Write;
use std::process::ExitCode;
use tokio::runtime::Builder;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Initialize tracing; stdout is reserved for results
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match try_main() {
        Ok(()) => ExitCode::from(EXIT_OK),
        Err(e) => {
            let code = e
                .downcast_ref::<ProbeError>()
                .map_or(EXIT_FAILURE, ProbeError::exit_code);
            error!("{:#}", e);
            ExitCode::from(code)
        }
    }
}

fn try_main() -> anyhow::Result<()> {
    // Validated before anything touches the network
    let request = CheckRequest::from_os_args(std::env::args_os().skip(1))?;
    debug!("Check request: {:?}", request);

    let config = Config::load()?;
    debug!("Configuration: {:?}", config);

    let runtime = Builder::new_current_thread().enable_all().build()?;
    let results = runtime.block_on(check::run(&request, &config.probe))?;

    let mut writer = ReportWriter::default();
    writer.metrics(&results);

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(writer.buffer())?;
    stdout.flush()?;

    Ok(())
}
