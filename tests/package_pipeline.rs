//! End-to-end packaging pipeline tests using a stub `gem` tool.
//!
//! The stub shell script reads name/version/platform from the gemspec it is
//! handed and creates the correspondingly named archive in its working
//! directory, standing in for `gem build`.

#![cfg(unix)]

use gempack::packager::{
    Error, LocalRepositoryResolver, PackagingKind, Packager, ProjectArtifact, ProjectDependency,
    Scope, SettingsBuilder,
};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

const STUB_GEM_TOOL: &str = r#"#!/bin/sh
spec="$2"
name=$(sed -n "s/^  s\.name = '\(.*\)'$/\1/p" "$spec")
version=$(sed -n "s/^  s\.version = '\(.*\)'$/\1/p" "$spec")
platform=$(sed -n "s/^  s\.platform = '\(.*\)'$/\1/p" "$spec")
out="${name}-${version}"
if [ -n "$platform" ]; then out="${out}-${platform}"; fi
printf 'gem-archive' > "${out}.gem"
"#;

fn write_stub_tool(dir: &Path) -> PathBuf {
    let tool = dir.join("stub-gem");
    std::fs::write(&tool, STUB_GEM_TOOL).expect("write stub tool");
    std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).expect("chmod");
    tool
}

fn sample_project(dir: &Path) -> PathBuf {
    let base = dir.join("project");
    std::fs::create_dir_all(base.join("lib")).expect("mkdir lib");
    std::fs::write(base.join("lib/sample.rb"), b"puts 'sample'\n").expect("write lib");
    base
}

fn gem_dep(name: &str, version: &str, scope: &str) -> ProjectDependency {
    ProjectDependency {
        group: "rubygems".into(),
        name: name.into(),
        version: version.into(),
        scope: Scope::parse(scope),
        kind: "gem".into(),
        optional: false,
    }
}

#[tokio::test]
async fn pure_gem_pipeline_produces_the_expected_archive() {
    let dir = tempfile::tempdir().expect("tempdir");
    let base = sample_project(dir.path());
    let build = base.join("target");
    let tool = write_stub_tool(dir.path());

    let settings = SettingsBuilder::new()
        .artifact(ProjectArtifact::new(
            "rubygems",
            "sample-lib",
            "1.2.0",
            None,
            PackagingKind::Gem,
        ))
        .base_dir(&base)
        .build_dir(&build)
        .gem_command(&tool)
        .build()
        .expect("settings");

    let packager = Packager::new(settings, LocalRepositoryResolver::new("."));
    let gem = packager.package().await.expect("package");

    assert_eq!(gem.path, build.join("sample-lib-1.2.0.gem"));
    assert!(gem.path.is_file());
    assert_eq!(gem.checksum.len(), 64);

    // gemspec synthesized in the staging directory
    let gemspec = build.join("sample-lib/sample-lib.gemspec");
    let document = std::fs::read_to_string(&gemspec).expect("read gemspec");
    assert!(document.contains("s.name = 'sample-lib'"));
    assert!(document.contains("s.version = '1.2.0'"));
    assert!(document.contains("s.require_paths = ['lib']"));
    assert!(document.contains("'lib/sample.rb'"));
    assert!(!document.contains("s.platform"));
    assert!(!document.contains("add_dependency"));

    // project files staged next to the gemspec
    assert!(build.join("sample-lib/lib/sample.rb").is_file());
}

#[tokio::test]
async fn non_reserved_group_prefixes_the_archive_name() {
    let dir = tempfile::tempdir().expect("tempdir");
    let base = sample_project(dir.path());
    let build = base.join("target");
    let tool = write_stub_tool(dir.path());

    let settings = SettingsBuilder::new()
        .artifact(ProjectArtifact::new(
            "acme",
            "sample-lib",
            "1.2.0",
            None,
            PackagingKind::Gem,
        ))
        .base_dir(&base)
        .build_dir(&build)
        .gem_command(&tool)
        .build()
        .expect("settings");

    let packager = Packager::new(settings, LocalRepositoryResolver::new("."));
    let gem = packager.package().await.expect("package");

    assert_eq!(gem.path, build.join("acme.sample-lib-1.2.0.gem"));
    assert!(gem.path.is_file());
}

#[tokio::test]
async fn jar_gem_embeds_payloads_and_generates_the_shim() {
    let dir = tempfile::tempdir().expect("tempdir");
    let base = sample_project(dir.path());
    let build = base.join("target");
    let tool = write_stub_tool(dir.path());

    // compiled artifact payload
    std::fs::create_dir_all(&build).expect("mkdir build");
    let jar = build.join("sample-lib-1.2.0.jar");
    std::fs::write(&jar, b"root jar").expect("write jar");

    // local repository with one resolvable runtime jar
    let repo = dir.path().join("repository");
    let widget_dir = repo.join("org/acme/widget/2.1");
    std::fs::create_dir_all(&widget_dir).expect("mkdir repo");
    std::fs::write(widget_dir.join("widget-2.1.jar"), b"widget jar").expect("write dep jar");

    let dependencies = vec![
        ProjectDependency {
            group: "org.acme".into(),
            name: "widget".into(),
            version: "2.1".into(),
            scope: Scope::Runtime,
            kind: "jar".into(),
            optional: false,
        },
        gem_dep("rake", ">= 0.8.7", "compile"),
        gem_dep("rspec", "", "test"),
        gem_dep("obscure", "1.0", "system"),
    ];

    let settings = SettingsBuilder::new()
        .artifact(ProjectArtifact::new(
            "rubygems",
            "sample-lib",
            "1.2.0",
            Some(jar),
            PackagingKind::JavaGem,
        ))
        .dependencies(dependencies)
        .base_dir(&base)
        .build_dir(&build)
        .gem_command(&tool)
        .include_dependencies(true)
        .build()
        .expect("settings");

    let packager = Packager::new(settings, LocalRepositoryResolver::new(&repo));
    let gem = packager.package().await.expect("package");

    // java platform suffix in the archive name
    assert_eq!(gem.path, build.join("sample-lib-1.2.0-java.gem"));

    let staging = build.join("sample-lib");
    let document =
        std::fs::read_to_string(staging.join("sample-lib.gemspec")).expect("read gemspec");
    assert!(document.contains("s.platform = 'java'"));
    assert!(document.contains("'lib/sample-lib-1.2.0.jar'"));
    assert!(document.contains("'lib/widget-2.1.jar'"));
    assert!(document.contains("s.add_dependency 'rake', '>= 0.8.7'"));
    assert!(document.contains("s.add_development_dependency 'rspec', '>= 0'"));
    assert!(!document.contains("obscure"));

    // payloads staged under lib/
    assert!(staging.join("lib/sample-lib-1.2.0.jar").is_file());
    assert!(staging.join("lib/widget-2.1.jar").is_file());

    // loader shim generated with both requires
    let shim = std::fs::read_to_string(staging.join("lib/sample-lib.rb")).expect("read shim");
    assert!(shim.contains("module SampleLib"));
    assert!(shim.contains("require File.dirname(__FILE__) + '/sample-lib-1.2.0.jar'"));
    assert!(shim.contains("require File.dirname(__FILE__) + '/widget-2.1.jar'"));
}

#[tokio::test]
async fn gemspec_overwrite_refreshes_the_launch_directory_copy() {
    let dir = tempfile::tempdir().expect("tempdir");
    let base = sample_project(dir.path());
    let build = base.join("target");
    let tool = write_stub_tool(dir.path());

    let stale = base.join("sample-lib.gemspec");
    std::fs::write(&stale, b"# stale\n").expect("write stale gemspec");

    let settings = SettingsBuilder::new()
        .artifact(ProjectArtifact::new(
            "rubygems",
            "sample-lib",
            "1.2.0",
            None,
            PackagingKind::Gem,
        ))
        .base_dir(&base)
        .build_dir(&build)
        .gem_command(&tool)
        .gemspec_overwrite(true)
        .build()
        .expect("settings");

    let packager = Packager::new(settings, LocalRepositoryResolver::new("."));
    packager.package().await.expect("package");

    let refreshed = std::fs::read(&stale).expect("read refreshed gemspec");
    let synthesized =
        std::fs::read(build.join("sample-lib/sample-lib.gemspec")).expect("read synthesized");
    assert_eq!(refreshed, synthesized);
}

#[tokio::test]
async fn supplied_gemspec_builds_in_its_own_directory() {
    let dir = tempfile::tempdir().expect("tempdir");
    let tool = write_stub_tool(dir.path());

    let gem_dir = dir.path().join("existing");
    std::fs::create_dir_all(&gem_dir).expect("mkdir");
    let gemspec = gem_dir.join("handmade.gemspec");
    std::fs::write(
        &gemspec,
        "  s.name = 'handmade'\n  s.version = '0.3.1'\n",
    )
    .expect("write gemspec");

    let output = dir.path().join("out/handmade.gem");
    let settings = SettingsBuilder::new()
        .artifact(ProjectArtifact::new(
            "rubygems",
            "handmade",
            "0.3.1",
            None,
            PackagingKind::Gem,
        ))
        .base_dir(dir.path().join("nonexistent"))
        .build_dir(dir.path().join("build"))
        .launch_dir(&gem_dir)
        .gemspec(&gemspec)
        .gem_command(&tool)
        .output_path(&output)
        .build()
        .expect("settings");

    let packager = Packager::new(settings, LocalRepositoryResolver::new("."));
    let gem = packager.package().await.expect("package");

    assert_eq!(gem.path, output);
    assert!(output.is_file());
    // archive produced by the tool stays in the gemspec directory
    assert!(gem_dir.join("handmade-0.3.1.gem").is_file());
}

#[tokio::test]
async fn missing_gemspec_is_a_configuration_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let empty = dir.path().join("empty");
    std::fs::create_dir_all(&empty).expect("mkdir");

    let settings = SettingsBuilder::new()
        .artifact(ProjectArtifact::new(
            "rubygems",
            "sample-lib",
            "1.2.0",
            None,
            PackagingKind::Gem,
        ))
        .base_dir(dir.path().join("nonexistent"))
        .build_dir(dir.path().join("build"))
        .launch_dir(&empty)
        .build()
        .expect("settings");

    let packager = Packager::new(settings, LocalRepositoryResolver::new("."));
    let err = packager.package().await.expect_err("must fail");
    assert!(matches!(err, Error::GemspecNotFound { .. }));
}

#[tokio::test]
async fn ambiguous_gemspecs_are_a_configuration_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let launch = dir.path().join("launch");
    std::fs::create_dir_all(&launch).expect("mkdir");
    std::fs::write(launch.join("a.gemspec"), b"a").expect("write");
    std::fs::write(launch.join("b.gemspec"), b"b").expect("write");

    let settings = SettingsBuilder::new()
        .artifact(ProjectArtifact::new(
            "rubygems",
            "sample-lib",
            "1.2.0",
            None,
            PackagingKind::Gem,
        ))
        .base_dir(dir.path().join("nonexistent"))
        .build_dir(dir.path().join("build"))
        .launch_dir(&launch)
        .build()
        .expect("settings");

    let packager = Packager::new(settings, LocalRepositoryResolver::new("."));
    let err = packager.package().await.expect_err("must fail");
    assert!(matches!(err, Error::AmbiguousGemspec { count: 2, .. }));
}

#[tokio::test]
async fn failed_tool_leaves_no_archive_at_the_output_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let base = sample_project(dir.path());
    let build = base.join("target");

    let tool = dir.path().join("failing-gem");
    std::fs::write(&tool, "#!/bin/sh\nexit 1\n").expect("write tool");
    std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).expect("chmod");

    let output = dir.path().join("out/sample-lib-1.2.0.gem");
    let settings = SettingsBuilder::new()
        .artifact(ProjectArtifact::new(
            "rubygems",
            "sample-lib",
            "1.2.0",
            None,
            PackagingKind::Gem,
        ))
        .base_dir(&base)
        .build_dir(&build)
        .gem_command(&tool)
        .output_path(&output)
        .build()
        .expect("settings");

    let packager = Packager::new(settings, LocalRepositoryResolver::new("."));
    let err = packager.package().await.expect_err("must fail");
    assert!(matches!(err, Error::ToolFailed { .. }));
    assert!(!output.exists());
}
