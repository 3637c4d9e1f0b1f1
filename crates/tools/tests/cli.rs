use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

const LOCAL_MANIFEST: &str = r#"
solidity = "0.8.20"

[networks.local]
url = "http://127.0.0.1:8545"

[typechain]
outDir = "bindings"
target = "ethers-v6"
"#;

/// Run the binary inside `dir` with none of the variables it reads inherited
/// from the test environment.
fn toolchain(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_toolchain"));
    cmd.current_dir(dir)
        .env_remove("PRIVATE_KEY")
        .env_remove("TOOLCHAIN_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_validate_ok_with_key() {
    let dir = TempDir::new().unwrap();
    let output = toolchain(dir.path())
        .env("PRIVATE_KEY", KEY)
        .arg("validate")
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(stdout(&output).contains("Configuration OK: solc 0.8.9, 2 network(s), ethers-v5 bindings"));
}

#[test]
fn test_validate_exits_1_without_key() {
    let dir = TempDir::new().unwrap();
    let output = toolchain(dir.path()).arg("validate").output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("PRIVATE_KEY"));
}

#[test]
fn test_allow_missing_credentials_loads_read_only() {
    let dir = TempDir::new().unwrap();
    let output = toolchain(dir.path())
        .args(["--allow-missing-credentials", "networks"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let out = stdout(&output);
    assert_eq!(out.lines().count(), 2);
    assert!(out.lines().all(|line| line.ends_with("read-only")));
}

#[test]
fn test_networks_listed_in_declaration_order() {
    let dir = TempDir::new().unwrap();
    let output = toolchain(dir.path())
        .env("PRIVATE_KEY", KEY)
        .arg("networks")
        .output()
        .unwrap();

    assert!(output.status.success());
    let names: Vec<String> = stdout(&output)
        .lines()
        .filter_map(|line| line.split_whitespace().next().map(str::to_string))
        .collect();
    assert_eq!(names, vec!["hyperspace", "fuji"]);
    assert!(stdout(&output).lines().all(|line| line.ends_with("signing")));
}

#[test]
fn test_config_flag_overrides_env_path() {
    let dir = TempDir::new().unwrap();
    let manifest = dir.path().join("local.toml");
    std::fs::write(&manifest, LOCAL_MANIFEST).unwrap();

    let output = toolchain(dir.path())
        .env("TOOLCHAIN_CONFIG", dir.path().join("missing.toml"))
        .arg("--config")
        .arg(&manifest)
        .arg("networks")
        .output()
        .unwrap();

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.starts_with("local"));
    assert!(out.contains("http://127.0.0.1:8545"));
    assert!(!out.contains("hyperspace"));
}

#[test]
fn test_env_path_used_without_flag() {
    let dir = TempDir::new().unwrap();
    let output = toolchain(dir.path())
        .env("TOOLCHAIN_CONFIG", dir.path().join("missing.toml"))
        .arg("validate")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing.toml"));
}

#[test]
fn test_show_json_redacts_keys() {
    let dir = TempDir::new().unwrap();
    let output = toolchain(dir.path())
        .env("PRIVATE_KEY", KEY)
        .args(["show", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(!out.contains(KEY));
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["typechain"]["outDir"], "types");
    assert_eq!(value["networks"]["hyperspace"]["accounts"][0], "<redacted>");
}

#[test]
fn test_init_writes_manifest_and_refuses_overwrite() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("toolchain.toml");

    let first = toolchain(dir.path()).arg("init").output().unwrap();
    assert!(first.status.success());
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("solidity = \"0.8.9\""));

    std::fs::write(&path, LOCAL_MANIFEST).unwrap();
    let second = toolchain(dir.path()).arg("init").output().unwrap();
    assert_eq!(second.status.code(), Some(1));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), LOCAL_MANIFEST);

    let forced = toolchain(dir.path()).args(["init", "--force"]).output().unwrap();
    assert!(forced.status.success());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), written);
}

#[test]
fn test_written_manifest_is_picked_up_from_cwd() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("toolchain.toml"), LOCAL_MANIFEST).unwrap();

    let output = toolchain(dir.path()).arg("networks").output().unwrap();
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("local"));
}
