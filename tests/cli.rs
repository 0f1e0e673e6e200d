//! End-to-end runs of the mcprobe binary against a mock memcached

use std::ffi::OsString;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::process::{Command, Output};
use std::thread::{self, JoinHandle};

/// Serve a single connection: read the request up to the client's
/// half-close, answer with `reply`, return what was received
fn mock_memcached(reply: &'static [u8]) -> (u16, JoinHandle<Vec<u8>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    let handle = thread::spawn(move || {
        let (mut stream, _): (TcpStream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        stream.read_to_end(&mut request).unwrap();
        stream.write_all(reply).unwrap();
        request
    });

    (port, handle)
}

fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

fn mcprobe(args: &[&str]) -> Output {
    let args: Vec<OsString> = args.iter().map(OsString::from).collect();
    mcprobe_os(&args)
}

fn mcprobe_os(args: &[OsString]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mcprobe"))
        .args(args)
        .env_remove("MCPROBE_CONFIG")
        .env("MCPROBE_TIMEOUT_MS", "5000")
        .output()
        .unwrap()
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8(output.stdout.clone())
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

/// `<id>|<value>|` with no pipe inside either field
fn is_result_line(line: &str) -> bool {
    let Some(body) = line.strip_suffix('|') else {
        return false;
    };
    match body.split_once('|') {
        Some((id, value)) => !id.is_empty() && !value.contains('|'),
        None => false,
    }
}

#[test]
fn test_all_metrics_up() {
    let (port, server) = mock_memcached(b"STAT pid 4242\r\nSTAT uptime 12345\r\nEND\r\n");
    let output = mcprobe(&["1,1,1", "127.0.0.1", &port.to_string()]);

    assert_eq!(output.status.code(), Some(0));
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "1531:Status:9|1|");
    assert!(lines[1].starts_with("1532:Response Time:4|"));
    let elapsed = lines[1]
        .trim_start_matches("1532:Response Time:4|")
        .trim_end_matches('|');
    assert!(elapsed.parse::<u64>().is_ok(), "elapsed was {elapsed:?}");
    assert_eq!(lines[2], "1533:Uptime:4|12345|");
    assert!(lines.iter().all(|l| is_result_line(l)));

    assert_eq!(server.join().unwrap(), b"stats\n");
}

#[test]
fn test_selected_subset_keeps_catalog_order() {
    let (port, _server) = mock_memcached(b"STAT uptime 77\r\nEND\r\n");
    let output = mcprobe(&["\"1,0,1\"", "127.0.0.1", &port.to_string()]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout_lines(&output),
        vec!["1531:Status:9|1|", "1533:Uptime:4|77|"]
    );
}

#[test]
fn test_down_reports_status_zero() {
    let output = mcprobe(&["1,1,1", "127.0.0.1", &closed_port().to_string()]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_lines(&output), vec!["1531:Status:9|0|"]);
}

#[test]
fn test_down_without_status_prints_nothing() {
    let output = mcprobe(&["0,1,1", "127.0.0.1", &closed_port().to_string()]);

    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_missing_uptime_exits_8() {
    let (port, _server) = mock_memcached(b"STAT pid 1\r\nEND\r\n");
    let output = mcprobe(&["1,0,1", "127.0.0.1", &port.to_string()]);

    assert_eq!(output.status.code(), Some(8));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_wrong_parameter_count_exits_3() {
    for args in [
        vec![],
        vec!["1,1,1"],
        vec!["1,1,1", "127.0.0.1"],
        vec!["1,1,1", "127.0.0.1", "11211", "extra"],
    ] {
        let output = mcprobe(&args);
        assert_eq!(output.status.code(), Some(3), "args {args:?}");
        assert!(output.stdout.is_empty());
    }
}

#[test]
fn test_wrong_flag_count_exits_3() {
    for flags in ["1,1", ""] {
        let output = mcprobe(&[flags, "127.0.0.1", "11211"]);
        assert_eq!(output.status.code(), Some(3), "flags {flags:?}");
        assert!(output.stdout.is_empty());
    }
}

#[cfg(unix)]
#[test]
fn test_non_utf8_argument_does_not_panic() {
    use std::os::unix::ffi::OsStringExt;

    let bad = || OsString::from_vec(b"f\xffo".to_vec());

    // Wrong count wins over the undecodable argument
    let output = mcprobe_os(&[OsString::from("1,1,1"), bad()]);
    assert_eq!(output.status.code(), Some(3));
    assert!(output.stdout.is_empty());

    let output = mcprobe_os(&[OsString::from("1,1,1"), bad(), OsString::from("11211")]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(!String::from_utf8_lossy(&output.stderr).contains("panicked"));
}

#[test]
fn test_invalid_port_exits_1() {
    let output = mcprobe(&["1,0,0", "127.0.0.1", "not-a-port"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}
