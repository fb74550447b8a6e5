// Contract tests: assert only durable external invariants of the hook
// binary, such as JSON shape on stdout and the exit-code policy.
#![cfg(unix)]

mod common;

use common::{
    crop_variables, hook_input_json, parse_output, run_binary, run_hook, FakeCrop,
};
use serde_json::json;

const EVENT: &str = "before:deploy:deploy";

fn before_deploy() -> String {
    hook_input_json(EVENT, crop_variables("crop.yml"), json!({"version": "1.0.0"}))
}

// ---- JSON shape invariants ----

#[test]
fn contract_output_is_valid_json_on_success() {
    let crop = FakeCrop::succeeding(r#"{"id":42}"#);
    let (stdout, _, _) = run_hook(&crop, None, &before_deploy());
    let value = parse_output(&stdout);
    assert!(value.get("outcome").is_some());
    assert!(value.get("result").is_some());
}

#[test]
fn contract_output_is_valid_json_on_bad_input() {
    let crop = FakeCrop::succeeding("{}");
    let (stdout, _, _) = run_hook(&crop, None, "this is not json");
    let value = parse_output(&stdout);
    assert_eq!(value["outcome"], "error");
    assert_eq!(value["error"]["kind"], "input");
}

#[test]
fn contract_outcome_is_valid_enum() {
    let crop = FakeCrop::failing(2, "nope", "");
    let (stdout, _, _) = run_hook(&crop, None, &before_deploy());
    let outcome = parse_output(&stdout)["outcome"]
        .as_str()
        .expect("outcome must be a string")
        .to_string();
    assert!(
        ["succeeded", "failed", "skipped", "error"].contains(&outcome.as_str()),
        "unexpected outcome: {outcome}"
    );
}

#[test]
fn contract_result_is_empty_object_unless_succeeded() {
    let crop = FakeCrop::failing(1, "boom", "");
    let (stdout, _, _) = run_hook(&crop, None, &before_deploy());
    assert_eq!(parse_output(&stdout)["result"], json!({}));
}

// ---- Exit code invariants ----

#[test]
fn contract_exit_zero_on_success() {
    let crop = FakeCrop::succeeding(r#"{"id":42}"#);
    let (_, _, exit_code) = run_hook(&crop, None, &before_deploy());
    assert_eq!(exit_code, 0);
}

#[test]
fn contract_exit_zero_when_crop_reports_failure() {
    let crop = FakeCrop::failing(1, "boom", "");
    let (_, _, exit_code) = run_hook(&crop, None, &before_deploy());
    assert_eq!(exit_code, 0, "crop failures must not abort the deploy");
}

#[test]
fn contract_exit_zero_for_other_events() {
    let crop = FakeCrop::succeeding("{}");
    let input = hook_input_json("after:deploy:deploy", json!({}), json!({}));
    let (_, _, exit_code) = run_hook(&crop, None, &input);
    assert_eq!(exit_code, 0);
}

#[test]
fn contract_exit_one_on_malformed_input() {
    let crop = FakeCrop::succeeding("{}");
    let (_, _, exit_code) = run_hook(&crop, None, "");
    assert_eq!(exit_code, 1);
}

#[test]
fn contract_exit_one_when_crop_is_missing() {
    let (stdout, _, exit_code) = run_binary(
        &["hook", "--program", "/nonexistent/crop-12345"],
        &before_deploy(),
    );
    assert_eq!(exit_code, 1);
    assert_eq!(parse_output(&stdout)["error"]["kind"], "launch");
}

#[test]
fn contract_exit_one_on_invalid_json_from_crop() {
    let crop = FakeCrop::new("echo 'Uploaded!'");
    let (stdout, _, exit_code) = run_hook(&crop, None, &before_deploy());
    assert_eq!(exit_code, 1);
    assert_eq!(parse_output(&stdout)["error"]["kind"], "malformed-output");
}

#[test]
fn contract_exit_one_on_bad_settings() {
    let crop = FakeCrop::succeeding("{}");
    let (stdout, _, exit_code) =
        run_hook(&crop, Some("invalid {{ kdl {{ syntax"), &before_deploy());
    assert_eq!(exit_code, 1);
    assert_eq!(parse_output(&stdout)["error"]["kind"], "config");
    assert!(crop.recorded_args().is_none(), "crop must not run");
}

// ---- Stream separation ----

#[test]
fn contract_stdout_is_a_single_json_line() {
    let crop = FakeCrop::failing(1, "boom", "noise on stdout");
    let (stdout, _, _) = run_hook(&crop, None, &before_deploy());
    assert_eq!(stdout.trim().lines().count(), 1, "got: {stdout}");
}
