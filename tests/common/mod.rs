// Shared helpers for integration tests: a fake crop executable and runners
// for the built binary.
#![allow(dead_code)]

use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tempfile::{NamedTempFile, TempDir};

pub fn binary_path() -> PathBuf {
    let path = PathBuf::from(env!("CARGO_BIN_EXE_crop-deploy-hook"));
    assert!(path.exists(), "binary not found at {}", path.display());
    path
}

/// A shell script standing in for crop.
///
/// Every invocation records its arguments, one per line, before running the
/// given script body.
pub struct FakeCrop {
    dir: TempDir,
    path: PathBuf,
}

impl FakeCrop {
    pub fn new(body: &str) -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let path = dir.path().join("crop");
        let args_file = dir.path().join("args");
        let script = format!(
            "#!/bin/sh\nfor a in \"$@\"; do printf '%s\\n' \"$a\"; done > '{}'\n{body}\n",
            args_file.display()
        );
        let mut file = std::fs::File::create(&path).expect("failed to create fake crop");
        file.write_all(script.as_bytes())
            .expect("failed to write fake crop");
        drop(file);
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("failed to chmod fake crop");
        FakeCrop { dir, path }
    }

    /// crop that prints `json` and exits 0.
    pub fn succeeding(json: &str) -> Self {
        Self::new(&format!("printf '%s\\n' '{json}'"))
    }

    /// crop that writes to both streams and exits with `code`.
    pub fn failing(code: i32, stderr: &str, stdout: &str) -> Self {
        Self::new(&format!(
            "printf '%s' '{stderr}' >&2\nprintf '%s' '{stdout}'\nexit {code}"
        ))
    }

    pub fn program(&self) -> &str {
        self.path.to_str().expect("temp path is UTF-8")
    }

    /// Arguments of the last invocation, or `None` if crop never ran.
    pub fn recorded_args(&self) -> Option<Vec<String>> {
        let content = std::fs::read_to_string(self.dir.path().join("args")).ok()?;
        Some(content.lines().map(String::from).collect())
    }
}

pub fn write_settings(content: &str) -> NamedTempFile {
    let mut tmpfile = NamedTempFile::new().expect("failed to create temp config");
    tmpfile
        .write_all(content.as_bytes())
        .expect("failed to write config");
    tmpfile
}

/// Runs the binary with the given args and stdin.
/// Returns (stdout, stderr, exit_code).
pub fn run_binary(args: &[&str], stdin_input: &str) -> (String, String, i32) {
    let output = Command::new(binary_path())
        .args(args)
        .env_remove("CROP_PROGRAM")
        .env("CROP_HOOK_LOG", "info")
        .env("NO_COLOR", "1")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .and_then(|mut child| {
            use std::io::ErrorKind;
            let write_result = child
                .stdin
                .take()
                .unwrap()
                .write_all(stdin_input.as_bytes());
            if let Err(e) = write_result {
                if e.kind() != ErrorKind::BrokenPipe {
                    return Err(e);
                }
            }
            child.wait_with_output()
        })
        .expect("failed to execute binary");

    let stdout = String::from_utf8(output.stdout).expect("stdout not valid UTF-8");
    let stderr = String::from_utf8(output.stderr).expect("stderr not valid UTF-8");
    let exit_code = output.status.code().unwrap_or(-1);
    (stdout, stderr, exit_code)
}

/// Runs `hook` against a fake crop with optional settings file content.
pub fn run_hook(
    crop: &FakeCrop,
    settings: Option<&str>,
    stdin_input: &str,
) -> (String, String, i32) {
    let settings_file = settings.map(write_settings);
    let mut args = vec!["hook", "--program", crop.program()];
    let settings_path;
    if let Some(file) = &settings_file {
        settings_path = file.path().to_str().unwrap().to_string();
        args.extend(["--config", settings_path.as_str()]);
    }
    run_binary(&args, stdin_input)
}

pub fn hook_input_json(
    event: &str,
    variables: serde_json::Value,
    options: serde_json::Value,
) -> String {
    serde_json::json!({
        "event": event,
        "variables": variables,
        "options": options,
    })
    .to_string()
}

pub fn crop_variables(config: &str) -> serde_json::Value {
    serde_json::json!({"service": {"name": "svc", "custom": {"crop": {"config": config}}}})
}

pub fn parse_output(stdout: &str) -> serde_json::Value {
    serde_json::from_str(stdout.trim()).expect("stdout should be valid JSON")
}
