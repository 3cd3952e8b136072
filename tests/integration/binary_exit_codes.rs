use std::process::{Command, Output};

use crate::support::FakeMachine;

fn bootfxd(machine: &FakeMachine, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_bootfxd"))
        .args(args)
        .env("HOME", machine.temp.path())
        .env("XDG_CONFIG_HOME", machine.temp.path().join("config"))
        .env_remove("BOOTFXD_LOG")
        .env("BOOTFXD_LOG_OUTPUT", "stderr")
        .current_dir(machine.temp.path())
        .output()
        .unwrap()
}

fn status_of(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8(output.stdout.clone()).unwrap();
    let line = stdout.lines().next().expect("one status line");
    serde_json::from_str(line).unwrap()
}

#[test]
fn legacy_flags_capture_and_scan() {
    let machine = FakeMachine::uefi();
    let root = machine.root();
    let root = root.to_str().unwrap();

    let init = bootfxd(&machine, &["--init", "--root", root]);
    assert_eq!(init.status.code(), Some(0));
    assert_eq!(status_of(&init)["status"], "baseline_created");
    // Default baseline location is relative to the working directory.
    assert!(machine.baseline_path().exists());

    let scan = bootfxd(&machine, &["--scan", "--root", root]);
    assert_eq!(scan.status.code(), Some(0));
    assert_eq!(status_of(&scan)["status"], "clean");

    machine.write("boot/efi/EFI/ubuntu/grubx64.efi", b"patched");
    let scan = bootfxd(&machine, &["rescan", "--root", root]);
    assert_eq!(scan.status.code(), Some(2));
    assert_eq!(status_of(&scan)["status"], "tampered");
}

#[test]
fn missing_baseline_exits_one() {
    let machine = FakeMachine::uefi();
    let root = machine.root();
    let output = bootfxd(&machine, &["scan", "--root", root.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(status_of(&output)["message"], "baseline_missing");
}

#[test]
fn bad_invocations_exit_one() {
    let machine = FakeMachine::uefi();

    let none = bootfxd(&machine, &[]);
    assert_eq!(none.status.code(), Some(1));
    assert_eq!(status_of(&none)["message"], "invalid_args");

    let unknown = bootfxd(&machine, &["--frobnicate"]);
    assert_eq!(unknown.status.code(), Some(1));
    assert_eq!(status_of(&unknown)["message"], "unknown_arg");

    let both = bootfxd(&machine, &["--init", "--scan"]);
    assert_eq!(both.status.code(), Some(1));
    assert_eq!(status_of(&both)["status"], "error");
}
