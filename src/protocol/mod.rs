//! Memcached ASCII `stats` exchange

pub mod command;
pub mod parser;

pub use command::{STATS_COMMAND, is_complete};
pub use parser::{StatsMap, parse_stats};
