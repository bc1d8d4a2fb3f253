mod harness;

use std::process::Command;

use assert_cmd::prelude::*;
use capguard::testkit::config::{full, with_limits, MINIMAL};
use harness::temp_config::TempConfig;
use predicates::prelude::*;

fn capguard() -> Command {
    Command::cargo_bin("capguard").expect("capguard binary")
}

#[test]
fn cli_returns_nonzero_on_config_error() {
    let file = TempConfig::create(&format!(
        "{MINIMAL}\n[enforcement]\nrefresh_cooldown_ms = 5\n"
    ));

    capguard()
        .args(["config", "validate", "--config"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("enforcement.refresh_cooldown_ms"));
}

#[test]
fn validate_reports_summary_as_json() {
    let file = TempConfig::create(&full());

    capguard()
        .args(["--json", "config", "validate", "-c"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""valid":true"#))
        .stdout(predicate::str::contains(r#""banned":1"#))
        .stdout(predicate::str::contains(r#""remediation":"discard""#));
}

#[test]
fn config_init_writes_a_valid_template() {
    let file = TempConfig::create(MINIMAL);
    let target = file.dir().join("nested").join("capguard.toml");

    capguard()
        .args(["config", "init"])
        .arg(&target)
        .assert()
        .success();
    assert!(target.exists());

    capguard()
        .args(["config", "validate", "-c"])
        .arg(&target)
        .assert()
        .success();

    // A second init refuses to clobber
    capguard()
        .args(["config", "init"])
        .arg(&target)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    capguard()
        .args(["config", "init", "--force"])
        .arg(&target)
        .assert()
        .success();
}

#[test]
fn limits_lists_caps_as_json() {
    let file = TempConfig::create(&with_limits(&[("ender_pearl", 16), ("TNT", 0)]));

    capguard()
        .args(["limits", "--json", "-c"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""item":"ENDER_PEARL""#))
        .stdout(predicate::str::contains(r#""name":"Ender Pearl""#))
        .stdout(predicate::str::contains(r#""limit":0"#));
}

#[test]
fn limits_table_marks_banned_goods() {
    let file = TempConfig::create(&with_limits(&[("TNT", 0)]));

    capguard()
        .args(["limits", "-c"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("banned"));
}

const PARTIAL_PICKUP: &str = r#"{
  "steps": [
    { "action": "join", "actor": "alex" },
    { "action": "give", "actor": "alex", "item": "ENDER_PEARL", "quantity": 7 },
    { "action": "spawn", "item": "ENDER_PEARL", "quantity": 5 },
    { "action": "pick_up", "actor": "alex", "item": "ENDER_PEARL" },
    { "action": "spawn", "item": "TNT", "quantity": 1 },
    { "action": "pick_up", "actor": "alex", "item": "TNT" },
    { "action": "tick", "count": 2 }
  ]
}"#;

#[test]
fn simulate_replays_scenario() {
    let file = TempConfig::create(&with_limits(&[("ENDER_PEARL", 10), ("TNT", 0)]));
    let scenario = file.write("scenario.json", PARTIAL_PICKUP);

    capguard()
        .args(["--json", "simulate"])
        .arg(&scenario)
        .arg("-c")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""outcome":"trim 3/2""#))
        .stdout(predicate::str::contains(r#""outcome":"cancel""#))
        .stdout(predicate::str::contains(r#""kind":"pickup_blocked""#))
        .stdout(predicate::str::contains(r#""held":10"#));
}

#[test]
fn simulate_rejects_unknown_actor() {
    let file = TempConfig::create(&with_limits(&[("TNT", 0)]));
    let scenario = file.write(
        "scenario.json",
        r#"{ "steps": [ { "action": "swap_hands", "actor": "ghost" } ] }"#,
    );

    capguard()
        .args(["simulate"])
        .arg(&scenario)
        .arg("-c")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("scenario step 1"));
}
