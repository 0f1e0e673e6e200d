//! Metric derivation and the pipe-delimited result writer

use crate::catalog::Metric;
use crate::check::CheckSelection;
use crate::probe::StatusResponse;
use crate::protocol::parse_stats;
use crate::{ProbeError, Result};
use bytes::BytesMut;
use itoa::Buffer;

/// Status value for a server that answered
pub const STATUS_UP: &str = "1";

/// Status value for a server that could not be reached
pub const STATUS_DOWN: &str = "0";

/// One evaluated metric
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricResult {
    pub metric: Metric,
    pub value: String,
}

impl MetricResult {
    pub fn new(metric: Metric, value: impl Into<String>) -> Self {
        Self {
            metric,
            value: value.into(),
        }
    }

    pub fn id(&self) -> &'static str {
        self.metric.id()
    }
}

/// Results for a server that answered
///
/// Fails with `MetricNotFound` when a selected metric's source field is
/// missing from the reply; nothing is returned for the run in that case.
pub fn collect_up(
    selection: &CheckSelection,
    response: &StatusResponse,
) -> Result<Vec<MetricResult>> {
    let mut results = Vec::with_capacity(Metric::ALL.len());
    let mut itoa_buf = Buffer::new();

    // Only parse when some selected metric reads from the reply
    let fields = selection
        .selected()
        .any(|m| m.source_key().is_some())
        .then(|| parse_stats(&response.text()));

    for metric in selection.selected() {
        // Metrics with a source key read it from the reply; the rest are
        // known as soon as the reply arrived
        let value = match metric.source_key() {
            Some(key) => fields
                .as_ref()
                .and_then(|f| f.get(key))
                .cloned()
                .ok_or(ProbeError::MetricNotFound(key))?,
            None if metric == Metric::ResponseTime => {
                itoa_buf.format(response.elapsed_ms()).to_string()
            }
            None => STATUS_UP.to_string(),
        };
        results.push(MetricResult::new(metric, value));
    }

    Ok(results)
}

/// Results for a server that could not be reached
///
/// Only Status is meaningful without a reply.
pub fn collect_down(selection: &CheckSelection) -> Vec<MetricResult> {
    if selection.is_selected(Metric::Status) {
        vec![MetricResult::new(Metric::Status, STATUS_DOWN)]
    } else {
        Vec::new()
    }
}

/// Writer for `<id>|<value>|` result lines
pub struct ReportWriter {
    buf: BytesMut,
}

impl ReportWriter {
    /// Create a new report writer with the given capacity
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    /// Get the internal buffer
    pub fn buffer(&self) -> &[u8] {
        &self.buf
    }

    /// Write one result line
    /// Format: <id>|<value>|\n
    pub fn metric(&mut self, result: &MetricResult) {
        self.buf.extend_from_slice(result.id().as_bytes());
        self.buf.extend_from_slice(b"|");
        self.buf.extend_from_slice(result.value.as_bytes());
        self.buf.extend_from_slice(b"|\n");
    }

    /// Write every result, in the order given
    pub fn metrics(&mut self, results: &[MetricResult]) {
        for result in results {
            self.metric(result);
        }
    }
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self::new(256)
    }
}
