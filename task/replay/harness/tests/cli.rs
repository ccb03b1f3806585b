use std::{
    io::{self, Write},
    net::TcpListener,
    process::{Command, Output},
};

fn snake_replay(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_snake-replay"))
        .args(args)
        .output()
        .unwrap()
}

fn closed_port() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port().to_string()
}

#[test]
fn missing_arguments_print_usage() {
    let output = snake_replay(&[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
    assert!(output.stdout.is_empty());
}

#[test]
fn non_numeric_turn_prints_usage() {
    let output = snake_replay(&["game.jsonl", "fifteen"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
    assert!(output.stdout.is_empty());
}

#[test]
fn usage_errors_make_no_requests() {
    let mut transcript = tempfile::NamedTempFile::new().unwrap();
    for turn in 0..30 {
        writeln!(transcript, r#"{{"game":{{"id":"g"}},"turn":{turn}}}"#).unwrap();
    }
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let port = listener.local_addr().unwrap().port().to_string();
    let path = transcript.path().to_str().unwrap();

    for args in [
        vec![path, "fifteen", "-a", "127.0.0.1", "-p", port.as_str(), "-d", "0"],
        vec!["-a", "127.0.0.1", "-p", port.as_str(), "-d", "0"],
    ] {
        let output = snake_replay(&args);
        assert_eq!(output.status.code(), Some(1));
        assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
    }

    let err = listener.accept().unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::WouldBlock);
}

#[test]
fn unreadable_transcript_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.jsonl");
    let output = snake_replay(&[path.to_str().unwrap(), "15"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to read transcript"));
    assert!(output.stdout.is_empty());
}

#[test]
fn unreachable_server_does_not_fail_the_run() {
    let mut transcript = tempfile::NamedTempFile::new().unwrap();
    for turn in 0..30 {
        writeln!(transcript, r#"{{"game":{{"id":"g"}},"turn":{turn}}}"#).unwrap();
    }
    let port = closed_port();

    let output = snake_replay(&[
        transcript.path().to_str().unwrap(),
        "15",
        "--address",
        "127.0.0.1",
        "--port",
        &port,
        "--delay-ms",
        "0",
        "--log-level",
        "0",
    ]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines = stdout.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 11);
    for (line, turn) in lines.iter().zip(5..=15) {
        assert!(
            line.starts_with(&format!("turn: {turn} move request failed: ")),
            "{line}"
        );
    }
}
