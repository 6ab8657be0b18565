use assert_cmd::Command;

#[test]
fn help_lists_options() {
    let out = Command::cargo_bin("typesprint")
        .unwrap()
        .arg("--help")
        .output()
        .unwrap();

    assert!(out.status.success());
    let text = String::from_utf8_lossy(&out.stdout);
    assert!(text.contains("--secs"));
    assert!(text.contains("--log-file"));
    assert!(text.contains("--dark"));
}

#[test]
fn version_flag() {
    Command::cargo_bin("typesprint")
        .unwrap()
        .arg("--version")
        .assert()
        .success();
}

#[test]
fn unsupported_duration_is_rejected() {
    let out = Command::cargo_bin("typesprint")
        .unwrap()
        .args(["--secs", "45"])
        .output()
        .unwrap();

    assert!(!out.status.success());
    let err = String::from_utf8_lossy(&out.stderr);
    assert!(err.contains("unsupported test duration"));
}

#[test]
fn refuses_to_run_without_tty() {
    Command::cargo_bin("typesprint")
        .unwrap()
        .write_stdin("")
        .assert()
        .failure();
}
