use std::fs;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tempfile::TempDir;

fn spawn_watch(dir: &TempDir, files: &[&str]) -> Child {
    Command::new(assert_cmd::cargo::cargo_bin!("dynpath"))
        .current_dir(dir.path())
        .args([
            "rewrite",
            "--watch",
            "--initializer",
            "setPath",
            "--entry-name",
            "checkout",
        ])
        .args(files)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to start watch mode")
}

fn wait_for(path: &Path, expected: &str, timeout: Duration) -> bool {
    let start = Instant::now();
    while start.elapsed() < timeout {
        if fs::read_to_string(path).map(|c| c == expected).unwrap_or(false) {
            return true;
        }
        thread::sleep(Duration::from_millis(50));
    }
    false
}

#[test]
fn test_watch_mode_performs_initial_rewrite() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("main.js"), r#"__webpack_require__.p = "/";"#).unwrap();

    let mut child = spawn_watch(&temp_dir, &["main.js"]);
    let rewritten = wait_for(
        &temp_dir.path().join("main.rewritten.js"),
        "__webpack_require__.p = setPath('checkout');\n",
        Duration::from_secs(5),
    );

    child.kill().expect("Failed to kill watch process");
    let output = child.wait_with_output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(rewritten);
    assert!(stdout.contains("Watching for changes"));
}

#[test]
fn test_watch_mode_keeps_running_after_failure() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("main.js");
    fs::write(&input, "__webpack_require__.p").unwrap();

    let mut child = spawn_watch(&temp_dir, &["main.js"]);
    thread::sleep(Duration::from_millis(800));

    assert!(child.try_wait().unwrap().is_none());

    fs::write(&input, r#"__webpack_require__.p = "/";"#).unwrap();
    let rewritten = wait_for(
        &temp_dir.path().join("main.rewritten.js"),
        "__webpack_require__.p = setPath('checkout');\n",
        Duration::from_secs(5),
    );

    child.kill().expect("Failed to kill watch process");
    let output = child.wait_with_output().unwrap();
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(rewritten);
    assert!(stderr.contains("Some files could not be rewritten"));
}
