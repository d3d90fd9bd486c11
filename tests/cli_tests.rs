mod common;

use common::{run_debrief, TestEnv, ACTIONS_JSON, ANALYSIS_JSON, SUMMARY_JSON};
use mockito::{Matcher, Server};
use serde_json::{json, Value};

#[test]
fn debrief_help_shows_usage() {
    let output = run_debrief(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "--help should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("serve"));
    assert!(stdout.contains("analyze"));
}

#[test]
fn debrief_version_shows_version() {
    let output = run_debrief(&["--version"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("debrief "));
}

#[test]
fn completions_bash_outputs_script() {
    let output = run_debrief(&["completions", "bash"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "completions bash should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(
        stdout.contains("debrief"),
        "expected completion output to reference command name\nstdout:\n{}",
        stdout
    );
}

#[test]
fn config_show_redacts_api_key() {
    let env = TestEnv::new();
    env.write_config("[llm]\napi_key = \"super-secret\"\n");

    let output = env.run(&["config", "show"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "config show should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(stdout.contains("[server]"));
    assert!(stdout.contains("[llm]"));
    assert!(!stdout.contains("super-secret"));
}

#[test]
fn config_path_returns_valid_path() {
    let output = run_debrief(&["config", "path"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("config.toml"));
}

#[test]
fn config_init_refuses_to_overwrite() {
    let env = TestEnv::new();

    let first = env.run(&["config", "init"]);
    assert!(first.status.success());
    assert!(env.config_path().exists());

    let second = env.run(&["config", "init"]);
    assert!(!second.status.success());
    assert!(String::from_utf8_lossy(&second.stderr).contains("--force"));

    let forced = env.run(&["config", "init", "--force"]);
    assert!(forced.status.success());
}

#[test]
fn serve_fails_fast_without_api_key() {
    let output = run_debrief(&["serve", "--port", "0"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        !output.status.success(),
        "serve should refuse to start without credentials\nstderr:\n{}",
        stderr
    );
    assert!(stderr.contains("Gemini API key is missing"), "stderr:\n{}", stderr);
}

#[test]
fn doctor_reports_missing_api_key() {
    let output = run_debrief(&["doctor", "--json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(!output.status.success());

    let report: Value = serde_json::from_str(&stdout).expect("doctor prints JSON");
    let provider = report["checks"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["name"] == "provider")
        .expect("provider check present")
        .clone();
    assert_eq!(provider["status"], "error");
}

#[test]
fn analyze_rejects_invalid_transcript() {
    let env = TestEnv::new();
    env.write_config("[llm]\napi_key = \"test-key\"\n");
    let input = env.write_file("bad.json", r#"{"transcript": [["Alice"]]}"#);

    let output = env.run(&["analyze", input.to_str().unwrap(), "--compact"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(!output.status.success());

    let body: Value = serde_json::from_str(stdout.trim()).expect("error envelope on stdout");
    assert_eq!(body["status"], "error");
    assert_eq!(body["kind"], "invalid_transcript");
}

#[test]
fn analyze_fails_fast_without_api_key() {
    let env = TestEnv::new();
    let input = env.write_file("meeting.json", r#"[["Alice", "We should ship Friday."]]"#);

    let output = env.run(&["analyze", input.to_str().unwrap()]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stdout.trim().is_empty(), "stdout:\n{}", stdout);
    assert!(stderr.contains("Gemini API key is missing"), "stderr:\n{}", stderr);
}

#[test]
fn analyze_runs_all_stages_against_gemini() {
    let mut server = Server::new();
    let reply = |text: &str| {
        json!({"candidates": [{"content": {"parts": [{"text": text}]}}]}).to_string()
    };

    let stage_mocks = [
        ("outcome-focused summary", SUMMARY_JSON),
        ("Identify counterpoints", ANALYSIS_JSON),
        ("valid JSON array of action items", ACTIONS_JSON),
    ]
    .map(|(marker, text)| {
        server
            .mock("POST", "/models/gemini-test:generateContent")
            .match_header("x-goog-api-key", "test-key")
            .match_body(Matcher::Regex(marker.to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(reply(text))
            .expect(1)
            .create()
    });

    let env = TestEnv::new();
    env.write_config(&format!(
        "[llm]\napi_key = \"test-key\"\nmodel = \"gemini-test\"\nendpoint = \"{}\"\n",
        server.url()
    ));
    let input = env.write_file(
        "meeting.json",
        r#"[["Alice", "We should ship Friday."], ["Bob", "I disagree, too risky."]]"#,
    );

    let output = env.run(&["analyze", input.to_str().unwrap()]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "analyze should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );

    let body: Value = serde_json::from_str(&stdout).expect("success envelope on stdout");
    assert_eq!(body["status"], "success");
    assert_eq!(body["data"]["actions"][0]["DRI"], "Alice");
    assert_eq!(
        body["data"]["analysis"]["counterpoints"],
        json!(["Friday is too risky"])
    );

    for mock in &stage_mocks {
        mock.assert();
    }
}
