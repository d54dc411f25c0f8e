//! Binary-level tests for the gempack CLI.

#![cfg(unix)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

const STUB_GEM_TOOL: &str = r#"#!/bin/sh
spec="$2"
name=$(sed -n "s/^  s\.name = '\(.*\)'$/\1/p" "$spec")
version=$(sed -n "s/^  s\.version = '\(.*\)'$/\1/p" "$spec")
platform=$(sed -n "s/^  s\.platform = '\(.*\)'$/\1/p" "$spec")
out="${name}-${version}"
if [ -n "$platform" ]; then out="${out}-${platform}"; fi
printf 'gem-archive' > "${out}.gem"
"#;

/// Installs the stub tool as `gem` in its own directory and returns a PATH
/// value with that directory first.
fn stub_tool_path(dir: &Path) -> String {
    let bin_dir = dir.join("stub-bin");
    std::fs::create_dir_all(&bin_dir).expect("mkdir stub bin");
    let tool = bin_dir.join("gem");
    std::fs::write(&tool, STUB_GEM_TOOL).expect("write stub tool");
    std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).expect("chmod");

    let current = std::env::var("PATH").unwrap_or_default();
    format!("{}:{}", bin_dir.display(), current)
}

#[test]
fn packages_a_project_manifest_end_to_end() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path_var = stub_tool_path(dir.path());

    let project = dir.path().join("project");
    std::fs::create_dir_all(project.join("lib")).expect("mkdir lib");
    std::fs::write(project.join("lib/sample.rb"), b"puts 'sample'\n").expect("write lib");
    let manifest = project.join("gempack.toml");
    std::fs::write(
        &manifest,
        "[project]\ngroup = \"rubygems\"\nartifact = \"sample-lib\"\nversion = \"1.2.0\"\n",
    )
    .expect("write manifest");

    let output = dir.path().join("out/sample-lib-1.2.0.gem");

    Command::cargo_bin("gempack")
        .expect("binary")
        .env("PATH", &path_var)
        .arg("--project")
        .arg(&manifest)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("sample-lib-1.2.0.gem"))
        .stdout(predicate::str::contains("sha256:"));

    assert!(output.is_file());
}

#[test]
fn manifest_gem_hook_names_the_shim_load_target() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path_var = stub_tool_path(dir.path());

    let project = dir.path().join("project");
    std::fs::create_dir_all(project.join("target")).expect("mkdir target");
    std::fs::write(project.join("target/sample-lib.jar"), b"jar").expect("write jar");
    let manifest = project.join("gempack.toml");
    std::fs::write(
        &manifest,
        "[project]\n\
         group = \"rubygems\"\n\
         artifact = \"sample-lib\"\n\
         version = \"1.2.0\"\n\
         jar = \"target/sample-lib.jar\"\n\
         packaging = \"java-gem\"\n\
         gem_hook = \"post_install.rb\"\n",
    )
    .expect("write manifest");

    Command::cargo_bin("gempack")
        .expect("binary")
        .env("PATH", &path_var)
        .arg("--project")
        .arg(&manifest)
        .assert()
        .success()
        .stdout(predicate::str::contains("sample-lib-1.2.0-java.gem"));

    let shim = std::fs::read_to_string(project.join("target/sample-lib/lib/sample-lib.rb"))
        .expect("read shim");
    assert!(shim.contains("'/post_install.rb'"));
    assert!(!shim.contains("gem_hook.rb"));
}

#[test]
fn missing_manifest_fails_with_guidance() {
    let dir = tempfile::tempdir().expect("tempdir");

    Command::cargo_bin("gempack")
        .expect("binary")
        .arg("--project")
        .arg(dir.path().join("no-such-manifest.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Project manifest not found"));
}

#[test]
fn include_dependencies_requires_a_local_repository() {
    let dir = tempfile::tempdir().expect("tempdir");
    let manifest = dir.path().join("gempack.toml");
    std::fs::write(
        &manifest,
        "[project]\ngroup = \"rubygems\"\nartifact = \"sample-lib\"\nversion = \"1.2.0\"\n",
    )
    .expect("write manifest");

    Command::cargo_bin("gempack")
        .expect("binary")
        .arg("--project")
        .arg(&manifest)
        .arg("--include-dependencies")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--local-repository"));
}
