//! Configuration integration tests.
//!
//! End-to-end checks that config files drive the changelog commands:
//! which discovered file wins, how the `[changelog]` table and its
//! section map flow through to inference, and how CLI flags interact
//! with configured values. Loaded values are asserted through
//! `info --json` rather than just exit codes.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Returns a Command configured to run our binary.
#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap()
}

/// Run `info --json` from `dir` and parse the output.
fn info_json(dir: &Path) -> serde_json::Value {
    let output = cmd()
        .args(["-C", dir.to_str().unwrap(), "info", "--json"])
        .assert()
        .success();
    serde_json::from_slice(&output.get_output().stdout)
        .expect("info --json should output valid JSON")
}

// =============================================================================
// Defaults & Discovery
// =============================================================================

#[test]
fn defaults_apply_without_config_file() {
    let tmp = TempDir::new().unwrap();

    let json = info_json(tmp.path());
    assert_eq!(json["config"]["changelog_enabled"], false);
    assert_eq!(json["config"]["changelog_path"], "CHANGELOG.md");
    assert_eq!(json["config"]["changelog_format"], "keepachangelog");
}

#[test]
fn discovered_config_sets_changelog_table() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".bumplog.toml"),
        r#"
[changelog]
enabled = true
path = "HISTORY.md"
format = "grouped"
"#,
    )
    .unwrap();

    let json = info_json(tmp.path());
    assert_eq!(json["config"]["changelog_enabled"], true);
    assert_eq!(json["config"]["changelog_path"], "HISTORY.md");
    assert_eq!(json["config"]["changelog_format"], "grouped");
}

#[test]
fn dotfile_wins_over_regular_name() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".bumplog.toml"),
        "[changelog]\nformat = \"minimal\"\n",
    )
    .unwrap();
    fs::write(
        tmp.path().join("bumplog.toml"),
        "[changelog]\nformat = \"github\"\n",
    )
    .unwrap();

    let json = info_json(tmp.path());
    assert_eq!(json["config"]["changelog_format"], "minimal");
}

#[test]
fn parent_config_found_from_nested_directory() {
    let tmp = TempDir::new().unwrap();
    let nested = tmp.path().join("a").join("b");
    fs::create_dir_all(&nested).unwrap();
    fs::write(
        tmp.path().join(".bumplog.toml"),
        "[changelog]\npath = \"NEWS.md\"\n",
    )
    .unwrap();

    let json = info_json(&nested);
    assert_eq!(json["config"]["changelog_path"], "NEWS.md");
}

#[test]
fn closer_config_shadows_parent() {
    let tmp = TempDir::new().unwrap();
    let child = tmp.path().join("project");
    fs::create_dir_all(&child).unwrap();
    fs::write(
        tmp.path().join(".bumplog.toml"),
        "[changelog]\nformat = \"github\"\n",
    )
    .unwrap();
    fs::write(
        child.join(".bumplog.toml"),
        "[changelog]\nformat = \"grouped\"\n",
    )
    .unwrap();

    let json = info_json(&child);
    assert_eq!(json["config"]["changelog_format"], "grouped");
}

#[test]
fn explicit_config_flag_wins_over_discovered() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".bumplog.toml"),
        "[changelog]\nformat = \"minimal\"\n",
    )
    .unwrap();
    let explicit = tmp.path().join("release.toml");
    fs::write(&explicit, "[changelog]\nformat = \"github\"\n").unwrap();

    let output = cmd()
        .args([
            "-C",
            tmp.path().to_str().unwrap(),
            "--config",
            explicit.to_str().unwrap(),
            "info",
            "--json",
        ])
        .assert()
        .success();
    let json: serde_json::Value =
        serde_json::from_slice(&output.get_output().stdout).unwrap();
    assert_eq!(json["config"]["changelog_format"], "github");
}

// =============================================================================
// Config Formats
// =============================================================================

#[test]
fn yaml_changelog_table_is_parsed() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".bumplog.yaml"),
        "changelog:\n  enabled: true\n  format: auto\n",
    )
    .unwrap();

    let json = info_json(tmp.path());
    assert_eq!(json["config"]["changelog_enabled"], true);
    assert_eq!(json["config"]["changelog_format"], "auto");
}

#[test]
fn json_changelog_table_is_parsed() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".bumplog.json"),
        r#"{"changelog": {"path": "docs/CHANGES.md"}}"#,
    )
    .unwrap();

    let json = info_json(tmp.path());
    assert_eq!(json["config"]["changelog_path"], "docs/CHANGES.md");
}

// =============================================================================
// Config Driving Inference
// =============================================================================

#[test]
fn configured_path_and_format_drive_infer() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".bumplog.toml"),
        "[changelog]\npath = \"NEWS.md\"\nformat = \"minimal\"\n",
    )
    .unwrap();
    fs::write(tmp.path().join("NEWS.md"), "## v1.0.0\n\n- [Breaking] Gone\n").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "infer"])
        .assert()
        .success()
        .stdout(predicate::str::contains("major"));
}

#[test]
fn configured_section_map_reclassifies_grouped_sections() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".bumplog.toml"),
        r#"
[changelog]
format = "grouped"

[changelog.grouped_section_map]
"Internals" = "Added"
"#,
    )
    .unwrap();
    fs::write(
        tmp.path().join("CHANGELOG.md"),
        "## v1.0.0\n\n### Internals\n\n- rewired everything\n",
    )
    .unwrap();

    // Without the mapping "Internals" is unclassified and yields no bump.
    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "infer"])
        .assert()
        .success()
        .stdout(predicate::str::contains("minor"));
}

#[test]
fn format_flag_overrides_configured_format() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".bumplog.toml"),
        "[changelog]\nformat = \"minimal\"\n",
    )
    .unwrap();
    // Keep a Changelog content: unparseable as minimal (no bare version
    // header), so success proves the flag replaced the configured format.
    fs::write(
        tmp.path().join("CHANGELOG.md"),
        "## [Unreleased]\n\n### Added\n\n- thing\n",
    )
    .unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "infer"])
        .assert()
        .failure();

    cmd()
        .args([
            "-C",
            tmp.path().to_str().unwrap(),
            "infer",
            "--format",
            "keepachangelog",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("minor"));
}

#[test]
fn unknown_configured_format_fails_at_use() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".bumplog.toml"),
        "[changelog]\nformat = \"sgml\"\n",
    )
    .unwrap();
    fs::write(tmp.path().join("CHANGELOG.md"), "## [Unreleased]\n").unwrap();

    // Config loads fine; the bad format surfaces when infer builds a parser.
    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "info"])
        .assert()
        .success();
    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "infer"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown changelog format: sgml"));
}

// =============================================================================
// Boundary Marker
// =============================================================================

#[test]
fn git_boundary_hides_outer_config() {
    let tmp = TempDir::new().unwrap();
    let repo = tmp.path().join("repo");
    let src = repo.join("src");
    fs::create_dir_all(&src).unwrap();
    fs::create_dir(repo.join(".git")).unwrap();

    // Config above the repo boundary must not leak in.
    fs::write(
        tmp.path().join(".bumplog.toml"),
        "[changelog]\nformat = \"minimal\"\n",
    )
    .unwrap();

    let json = info_json(&src);
    assert_eq!(json["config"]["changelog_format"], "keepachangelog");
}

#[test]
fn config_beside_git_marker_is_found() {
    let tmp = TempDir::new().unwrap();
    let repo = tmp.path().join("repo");
    let src = repo.join("src");
    fs::create_dir_all(&src).unwrap();
    fs::create_dir(repo.join(".git")).unwrap();
    fs::write(
        repo.join(".bumplog.toml"),
        "[changelog]\nformat = \"grouped\"\n",
    )
    .unwrap();

    let json = info_json(&src);
    assert_eq!(json["config"]["changelog_format"], "grouped");
}

// =============================================================================
// Error Cases
// =============================================================================

#[test]
fn invalid_toml_config_shows_error() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".bumplog.toml"), "this is not valid toml [[[").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration").or(predicate::str::contains("config")));
}

#[test]
fn wrong_value_type_in_changelog_table_shows_error() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".bumplog.toml"),
        "[changelog]\nenabled = \"yes please\"\n",
    )
    .unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "info"])
        .assert()
        .failure();
}

#[test]
fn unknown_top_level_field_is_ignored() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".bumplog.toml"),
        "leftover_setting = true\n\n[changelog]\nformat = \"auto\"\n",
    )
    .unwrap();

    let json = info_json(tmp.path());
    assert_eq!(json["config"]["changelog_format"], "auto");
}
