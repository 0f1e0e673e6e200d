//! Static catalog of checkable metrics
//!
//! The catalog order is part of the invocation contract: the n-th flag of
//! the selection argument refers to the n-th entry here.

/// Port used when the caller passes an empty port
pub const DEFAULT_PORT: u16 = 11211;

/// Number of entries in the catalog
pub const CATALOG_SIZE: usize = 3;

/// Definition of one checkable metric
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricDefinition {
    /// Catalog name
    pub name: &'static str,
    /// Opaque identifier written in front of the value
    pub id: &'static str,
    /// Field of the stats response backing this metric, if any
    pub source_key: Option<&'static str>,
}

/// Catalog entries, in catalog order
pub static CATALOG: [MetricDefinition; CATALOG_SIZE] = [
    MetricDefinition {
        name: "Status",
        id: "1531:Status:9",
        source_key: None,
    },
    MetricDefinition {
        name: "ResponseTime",
        id: "1532:Response Time:4",
        source_key: None,
    },
    MetricDefinition {
        name: "Uptime",
        id: "1533:Uptime:4",
        source_key: Some("uptime"),
    },
];

/// A checkable metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Metric {
    Status,
    ResponseTime,
    Uptime,
}

impl Metric {
    /// All metrics in catalog order
    pub const ALL: [Metric; CATALOG_SIZE] = [Metric::Status, Metric::ResponseTime, Metric::Uptime];

    /// Position in the catalog
    pub const fn index(self) -> usize {
        match self {
            Metric::Status => 0,
            Metric::ResponseTime => 1,
            Metric::Uptime => 2,
        }
    }

    pub fn definition(self) -> &'static MetricDefinition {
        &CATALOG[self.index()]
    }

    pub fn id(self) -> &'static str {
        self.definition().id
    }

    pub fn source_key(self) -> Option<&'static str> {
        self.definition().source_key
    }

    /// Look up a metric by its catalog name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.definition().name == name)
    }
}
