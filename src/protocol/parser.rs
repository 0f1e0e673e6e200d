//! `stats` response parser
//!
//! Informational lines look like `STAT <name> <value>`. Any line that does
//! not split into exactly three single-space separated tokens is ignored,
//! which covers the `END` terminator and truncated fragments.

use std::collections::HashMap;

/// Field name to field value, last occurrence wins
pub type StatsMap = HashMap<String, String>;

/// Parse a raw `stats` payload into a field map
pub fn parse_stats(payload: &str) -> StatsMap {
    let mut fields = StatsMap::new();

    for line in payload.split('\n') {
        let mut tokens = line.trim().split(' ');
        if let (Some(_tag), Some(name), Some(value), None) =
            (tokens.next(), tokens.next(), tokens.next(), tokens.next())
        {
            fields.insert(name.to_string(), value.to_string());
        }
    }

    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stats() {
        let payload = "STAT pid 4242\r\nSTAT uptime 12345\r\nSTAT version 1.6.21\r\nEND\r\n";
        let fields = parse_stats(payload);

        assert_eq!(fields.len(), 3);
        assert_eq!(fields.get("pid").map(String::as_str), Some("4242"));
        assert_eq!(fields.get("uptime").map(String::as_str), Some("12345"));
        assert_eq!(fields.get("version").map(String::as_str), Some("1.6.21"));
    }

    #[test]
    fn test_parse_ignores_malformed_lines() {
        let payload = "END\r\n\
                       STAT lonely\r\n\
                       STAT too many tokens\r\n\
                       STAT  double_space 1\r\n\
                       \r\n\
                       garbage\n";
        assert!(parse_stats(payload).is_empty());
    }

    #[test]
    fn test_parse_duplicate_keys_last_wins() {
        let payload = "STAT uptime 1\nSTAT uptime 2\nSTAT uptime 3\n";
        let fields = parse_stats(payload);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields["uptime"], "3");
    }

    #[test]
    fn test_parse_trims_surrounding_whitespace() {
        let fields = parse_stats("   STAT uptime 99 \t\r\n");
        assert_eq!(fields["uptime"], "99");
    }

    #[test]
    fn test_parse_any_tag() {
        // Only the token count matters, not the leading tag
        let fields = parse_stats("ITEM curr_items 7\n");
        assert_eq!(fields["curr_items"], "7");
    }

    #[test]
    fn test_parse_partial_payload() {
        let fields = parse_stats("STAT pid 1\r\nSTAT upti");
        assert_eq!(fields.len(), 1);
        assert!(!fields.contains_key("uptime"));
    }
}
