//! The `stats` command and its response framing

/// Status query sent to the server
pub const STATS_COMMAND: &[u8] = b"stats\n";

/// Terminator of a successful `stats` response
const END: &[u8] = b"END";

/// Generic error reply (unknown command)
const ERROR: &[u8] = b"ERROR";

/// Returns true once `buf` ends with a line that terminates a `stats` reply
///
/// A reply ends with `END`, or with one of the protocol error lines when
/// the server rejects the command.
pub fn is_complete(buf: &[u8]) -> bool {
    let Some(body) = buf.strip_suffix(b"\n") else {
        return false;
    };

    let start = memchr::memrchr(b'\n', body).map_or(0, |i| i + 1);
    let line = &body[start..];
    let line = line.strip_suffix(b"\r").unwrap_or(line);

    line == END
        || line == ERROR
        || line.starts_with(b"CLIENT_ERROR ")
        || line.starts_with(b"SERVER_ERROR ")
}
