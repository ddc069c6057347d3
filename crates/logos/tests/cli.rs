// SPDX-FileCopyrightText: 2026 Logos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests driving the `logos` binary against a temporary database.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

struct Profile {
    dir: TempDir,
    config: PathBuf,
}

impl Profile {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("local_store.db");
        let config = dir.path().join("logos.toml");
        std::fs::write(
            &config,
            format!(
                "[storage]\ndatabase_path = {:?}\n\n[logging]\nlevel = \"warn\"\n",
                db.to_string_lossy()
            ),
        )
        .unwrap();
        Self { dir, config }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_logos"));
        cmd.current_dir(self.dir.path())
            .arg("--config")
            .arg(&self.config)
            .arg("--plain")
            .env_remove("LOGOS_API_KEY")
            .env_remove("RUST_LOG");
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        self.command().args(args).output().unwrap()
    }

    fn dir(&self) -> &Path {
        self.dir.path()
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn save_show_status_clear_round_trip() {
    let profile = Profile::new();

    let saved = profile
        .command()
        .env("LOGOS_API_KEY", "sk-abcdefgh12345678")
        .arg("save")
        .output()
        .unwrap();
    assert!(saved.status.success(), "save failed: {saved:?}");
    assert!(stdout(&saved).contains("sk-••••5678"));
    assert!(!stdout(&saved).contains("abcdefgh"));

    let shown = profile.run(&["show"]);
    assert!(shown.status.success());
    assert_eq!(stdout(&shown).trim(), "sk-••••5678");

    let revealed = profile.run(&["show", "--reveal"]);
    assert_eq!(stdout(&revealed).trim(), "sk-abcdefgh12345678");

    let status = profile.run(&["status", "--json"]);
    let json: serde_json::Value = serde_json::from_slice(&status.stdout).unwrap();
    assert_eq!(json["stored"], true);
    assert_eq!(json["verified"], true);
    assert_eq!(json["masked"], "sk-••••5678");
    assert_eq!(json["store_health"], "healthy");
    assert!(json["store_detail"].is_null());

    let cleared = profile.run(&["clear", "--yes"]);
    assert!(cleared.status.success());

    let status = profile.run(&["status", "--json"]);
    let json: serde_json::Value = serde_json::from_slice(&status.stdout).unwrap();
    assert_eq!(json["stored"], false);
    assert!(json["masked"].is_null());
}

#[test]
fn database_never_contains_the_plaintext_key() {
    let profile = Profile::new();
    let saved = profile
        .command()
        .env("LOGOS_API_KEY", "sk-needle-in-the-database")
        .arg("save")
        .output()
        .unwrap();
    assert!(saved.status.success());

    for entry in std::fs::read_dir(profile.dir()).unwrap() {
        let path = entry.unwrap().path();
        if path.extension().is_some_and(|ext| ext == "toml") {
            continue;
        }
        let bytes = std::fs::read(&path).unwrap();
        let haystack = String::from_utf8_lossy(&bytes);
        assert!(
            !haystack.contains("needle-in-the-database"),
            "{} holds the plaintext key",
            path.display()
        );
    }
}

#[test]
fn save_without_input_fails() {
    let profile = Profile::new();
    let output = profile.run(&["save"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("LOGOS_API_KEY"));
}

#[test]
fn clear_without_yes_refuses_non_interactively() {
    let profile = Profile::new();
    let output = profile.run(&["clear"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--yes"));
}

#[test]
fn show_on_empty_profile_says_nothing_stored() {
    let profile = Profile::new();
    let output = profile.run(&["show"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("No API key stored"));
}

#[test]
fn section_env_overrides_are_accepted() {
    let profile = Profile::new();
    let output = profile
        .command()
        .env("LOGOS_LOGGING_LEVEL", "debug")
        .env("LOGOS_GUARD_MIGRATE_LEGACY", "false")
        .args(["status", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success(), "status failed: {output:?}");
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["stored"], false);
    // The file says "warn"; the env override lets info events through.
    assert!(String::from_utf8_lossy(&output.stderr).contains("local store opened"));
}

#[test]
fn invalid_config_exits_with_error() {
    let profile = Profile::new();
    std::fs::write(&profile.config, "[storage]\ndatabse_path = \"/tmp/x.db\"\n").unwrap();

    let output = profile.run(&["status"]);
    assert!(!output.status.success());
}
