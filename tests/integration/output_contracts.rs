use bootfxd::config::BootfxdConfig;
use bootfxd::tooling::report::{EXIT_ERROR, EXIT_OK, EXIT_TAMPERED};
use bootfxd::tooling::{render, CliContext, Commands, OutputFormat, StatusLine};

use crate::support::FakeMachine;

fn context_for(machine: &FakeMachine) -> CliContext {
    let mut config = BootfxdConfig::default();
    config.scan.root = machine.root();
    config.baseline.path = machine.baseline_path();
    CliContext::new(&config)
}

fn run(cli: &CliContext, command: Commands) -> (serde_json::Value, i32) {
    let status = StatusLine::from_result(&cli.execute(command));
    let line = render(&status, OutputFormat::Json);
    assert!(!line.contains('\n'), "status must be a single line: {line}");
    (serde_json::from_str(&line).unwrap(), status.exit_code())
}

#[test]
fn capture_json_contract() {
    let machine = FakeMachine::uefi();
    let cli = context_for(&machine);

    let (parsed, code) = run(&cli, Commands::Capture);
    assert_eq!(code, EXIT_OK);
    assert_eq!(parsed["status"], "baseline_created");
    assert_eq!(parsed["entries"].as_u64(), Some(2));
}

#[test]
fn rescan_clean_json_contract() {
    let machine = FakeMachine::uefi();
    let cli = context_for(&machine);
    run(&cli, Commands::Capture);

    let (parsed, code) = run(&cli, Commands::Rescan);
    assert_eq!(code, EXIT_OK);
    assert_eq!(parsed, serde_json::json!({ "status": "clean" }));
}

#[test]
fn rescan_tampered_json_contract() {
    let machine = FakeMachine::uefi();
    let cli = context_for(&machine);
    run(&cli, Commands::Capture);
    machine.write("boot/grub/grub.cfg", b"set default=evil");

    let (parsed, code) = run(&cli, Commands::Rescan);
    assert_eq!(code, EXIT_TAMPERED);
    assert_eq!(parsed["status"], "tampered");
    let modified = parsed["modified"].as_array().expect("modified array");
    assert_eq!(modified.len(), 1);
    assert!(modified[0].as_str().unwrap().starts_with("BOOT:"));
    assert!(modified[0].as_str().unwrap().ends_with("boot/grub/grub.cfg"));
    assert_eq!(parsed["added"], serde_json::json!([]));
    assert_eq!(parsed["removed"], serde_json::json!([]));
}

#[test]
fn rescan_without_baseline_json_contract() {
    let machine = FakeMachine::uefi();
    let cli = context_for(&machine);

    let (parsed, code) = run(&cli, Commands::Rescan);
    assert_eq!(code, EXIT_ERROR);
    assert_eq!(parsed["status"], "error");
    assert_eq!(parsed["message"], "baseline_missing");
}

#[test]
fn capture_without_surface_json_contract() {
    let machine = FakeMachine::uefi();
    std::fs::remove_dir_all(machine.root()).unwrap();
    let cli = context_for(&machine);

    let (parsed, code) = run(&cli, Commands::Capture);
    assert_eq!(code, EXIT_ERROR);
    assert_eq!(parsed["message"], "no_boot_surface");
    assert!(!machine.baseline_path().exists());
}
