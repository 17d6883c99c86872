use std::process::Command;

fn run_list(args: &[&str]) -> std::process::Output {
    let exe = env!("CARGO_BIN_EXE_taskai");
    Command::new(exe)
        .arg("--dev")
        .arg("list")
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run list command")
}

#[test]
fn search_prints_only_the_matching_task() {
    let output = run_list(&["--search", "run"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("Go for a 5k run"));
    assert_eq!(lines[1], "1 remaining");
}

#[test]
fn default_list_shows_the_whole_seed() {
    let output = run_list(&[]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 8);
    assert!(stdout.contains("[x] #2 Review team presentations"));
    assert!(stdout.trim_end().ends_with("5 remaining"));
}

#[test]
fn json_output_parses() {
    let output = run_list(&["--status", "incomplete", "--category", "Personal", "--json"]);
    assert!(output.status.success());
    let tasks: Vec<serde_json::Value> =
        serde_json::from_slice(&output.stdout).expect("list --json should print JSON");
    let ids: Vec<i64> = tasks.iter().filter_map(|t| t["id"].as_i64()).collect();
    assert_eq!(ids, vec![3, 6]);
}

#[test]
fn unknown_status_fails() {
    let output = run_list(&["--status", "someday"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid status filter"));
}
