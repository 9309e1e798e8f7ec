//! Integration tests for top-level CLI behavior.

use std::path::Path;
use std::process::Command;

fn run_berth(args: &[&str]) -> std::process::Output {
    let bin = env!("CARGO_BIN_EXE_berth");
    Command::new(bin).args(args).output().expect("failed to run berth binary")
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

#[test]
fn scan_missing_root_exits_with_typed_message() {
    let output = run_berth(&["scan", "/no/such/app/root"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("does not exist"));
}

#[test]
fn scan_classifies_an_express_tree() {
    let dir = std::env::temp_dir().join("berth_cli_scan_express");
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    write(&dir, "package.json", r#"{"dependencies": {"express": "^4.18.0"}}"#);
    write(&dir, "server.js", "app.get('/api/users', listUsers);\n");

    let output = run_berth(&["scan", dir.to_str().unwrap()]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains("express"));
    assert!(stdout.contains("api-server"));
    assert!(stdout.contains("1 routes"));
    assert!(dir.join(".berth/app_model.yaml").exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn generate_writes_artifacts_and_verifies_them() {
    let app = std::env::temp_dir().join("berth_cli_generate_app");
    let out = std::env::temp_dir().join("berth_cli_generate_out");
    let _ = std::fs::remove_dir_all(&app);
    let _ = std::fs::remove_dir_all(&out);
    std::fs::create_dir_all(&app).unwrap();
    write(&app, "package.json", r#"{"dependencies": {"next": "14.0.0", "react": "18.2.0"}}"#);
    write(&app, "next.config.js", "module.exports = {};\n");
    write(&app, "pages/index.js", "export default function Home() {}\n");

    let output = run_berth(&[
        "generate",
        app.to_str().unwrap(),
        "--output",
        out.to_str().unwrap(),
        "--auth",
        "--name",
        "Docs Site",
    ]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains("Generated"));
    assert!(stdout.contains("checks passed"));
    assert!(out.join("middleware/session.js").exists());
    assert!(out.join("routes/proxy.js").exists());
    // Unrequested conditional artifacts stay out.
    assert!(!out.join("lib/db.js").exists());

    let _ = std::fs::remove_dir_all(&app);
    let _ = std::fs::remove_dir_all(&out);
}

#[test]
fn rewrite_help_shows_preference_flags() {
    let output = run_berth(&["rewrite", "--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("--auth"));
    assert!(stdout.contains("--database"));
    assert!(stdout.contains("--branding"));
}

#[test]
fn scan_runs_entirely_from_a_replay_cassette() {
    use berth::cassette::format::{Cassette, Interaction};
    use chrono::Utc;
    use serde_json::json;

    let dir = std::env::temp_dir().join("berth_cli_replay");
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    let cassette_path = dir.join("scan.cassette.yaml");

    // The scanned root exists only inside the cassette.
    let cassette = Cassette {
        name: "cli-scan-replay".into(),
        recorded_at: Utc::now(),
        interactions: vec![
            Interaction {
                seq: 0,
                port: "fs".into(),
                method: "exists".into(),
                input: json!({"path": "/virtual/app"}),
                output: json!(true),
            },
            Interaction {
                seq: 1,
                port: "fs".into(),
                method: "walk".into(),
                input: json!({"root": "/virtual/app"}),
                output: json!({"ok": ["package.json"]}),
            },
            Interaction {
                seq: 2,
                port: "fs".into(),
                method: "read_to_string".into(),
                input: json!({"path": "/virtual/app/package.json"}),
                output: json!({"ok": "{\"dependencies\": {\"express\": \"^4.18.0\"}}"}),
            },
            Interaction {
                seq: 3,
                port: "clock".into(),
                method: "now".into(),
                input: json!({}),
                output: json!("2025-07-01T12:00:00Z"),
            },
            Interaction {
                seq: 4,
                port: "fs".into(),
                method: "write".into(),
                input: json!({"path": "/virtual/app/.berth/app_model.yaml"}),
                output: json!(null),
            },
        ],
    };
    std::fs::write(&cassette_path, serde_yaml::to_string(&cassette).unwrap()).unwrap();

    let bin = env!("CARGO_BIN_EXE_berth");
    let output = Command::new(bin)
        .args(["scan", "/virtual/app"])
        .env("BERTH_REPLAY", &cassette_path)
        .output()
        .expect("failed to run berth binary");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    // One dependency but no marker files in the walked tree: express
    // needs two of its four markers, so the framework stays unknown.
    assert!(stdout.contains("Dependencies: 1"));
    assert!(stdout.contains("Framework:    unknown"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn invalid_subcommand_exits_with_error() {
    let output = run_berth(&["nonsense"]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("unrecognized subcommand"));
}
