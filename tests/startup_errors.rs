//! Configuration failures of the binary.

use std::process::Command;

fn run_with_config(contents: &str) -> (std::process::Output, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("edge-proxy.json");
    std::fs::write(&config, contents).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_edge-proxy"))
        .arg("--config")
        .arg(&config)
        .env_remove("RUST_LOG")
        .output()
        .unwrap();
    (output, dir)
}

#[test]
fn invalid_location_is_written_to_the_log_file() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("edge-proxy.log");
    let config = format!(
        r#"{{
            "log": {log:?},
            "http": {{
                "serverHttp": {{
                    "port": 0,
                    "location": [
                        {{ "path": "/x/", "destination": "http://a", "root": "/srv" }}
                    ]
                }}
            }}
        }}"#,
        log = log.to_str().unwrap(),
    );

    let (output, _config_dir) = run_with_config(&config);

    assert!(!output.status.success());
    let logged = std::fs::read_to_string(&log).unwrap();
    assert!(logged.contains("Invalid configuration"), "log was: {logged}");
    assert!(
        logged.contains("location [/x/] sets both destination and root"),
        "log was: {logged}"
    );
}

#[test]
fn unreadable_config_fails_before_logging() {
    let output = Command::new(env!("CARGO_BIN_EXE_edge-proxy"))
        .arg("--config")
        .arg("/nonexistent/edge-proxy.conf")
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(!output.stderr.is_empty());
}
