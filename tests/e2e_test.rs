/// End-to-end tests for the CLI
///
/// Every run works against temporary directories: packaged descriptors under
/// a resource root and a `file://` Maven repository, so no network is used.
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use reqwest::Url;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let fixture = Self {
            dir: TempDir::new().unwrap(),
        };
        fs::create_dir_all(fixture.resources()).unwrap();
        fs::create_dir_all(fixture.remote()).unwrap();
        fixture
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn resources(&self) -> PathBuf {
        self.path().join("resources")
    }

    fn remote(&self) -> PathBuf {
        self.path().join("remote")
    }

    fn local(&self) -> PathBuf {
        self.path().join("local")
    }

    fn remote_url(&self) -> String {
        Url::from_directory_path(self.remote()).unwrap().to_string()
    }

    /// Publishes a fake jar into the remote repository
    fn publish(&self, group: &str, artifact: &str, version: &str) {
        let dir = group
            .split('.')
            .fold(self.remote(), |path, segment| path.join(segment))
            .join(artifact)
            .join(version);
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join(format!("{}-{}.jar", artifact, version)),
            format!("{}:{}:{}", group, artifact, version),
        )
        .unwrap();
    }

    fn package(&self, group: &str, artifact: &str, contents: &str) {
        let dir = self
            .resources()
            .join("META-INF/gradle")
            .join(group)
            .join(artifact);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("build.gradle"), contents).unwrap();
    }

    fn descriptor_for(&self, notation: &str) -> String {
        format!(
            "apply plugin: 'java'\nrepositories {{ maven {{ url '{}' }} }}\ndependencies {{ runtime '{}' }}\n",
            self.remote_url(),
            notation
        )
    }

    fn local_jar(&self, group: &str, artifact: &str, version: &str) -> PathBuf {
        group
            .split('.')
            .fold(self.local(), |path, segment| path.join(segment))
            .join(artifact)
            .join(version)
            .join(format!("{}-{}.jar", artifact, version))
    }

    fn command(&self) -> assert_cmd::Command {
        let mut cmd = cargo_bin_cmd!("gradle-dependency-runtime");
        cmd.current_dir(self.path()).args([
            "-r",
            self.resources().to_str().unwrap(),
            "-l",
            self.local().to_str().unwrap(),
        ]);
        cmd
    }
}

// Exit code tests for CLI
mod exit_code_tests {
    use super::*;

    /// Exit code 0: --help should return success
    #[test]
    fn test_exit_code_help() {
        cargo_bin_cmd!("gradle-dependency-runtime")
            .arg("--help")
            .assert()
            .code(0)
            .stdout(predicate::str::contains("--resources"));
    }

    /// Exit code 0: --version should return success
    #[test]
    fn test_exit_code_version() {
        cargo_bin_cmd!("gradle-dependency-runtime")
            .arg("--version")
            .assert()
            .code(0)
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    /// Exit code 0: nothing packaged is not an error
    #[test]
    fn test_exit_code_success_without_descriptors() {
        let fixture = Fixture::new();
        fixture
            .command()
            .assert()
            .code(0)
            .stdout(predicate::str::is_empty());
    }

    /// Exit code 2: Invalid arguments
    #[test]
    fn test_exit_code_invalid_argument() {
        cargo_bin_cmd!("gradle-dependency-runtime")
            .arg("--invalid-option")
            .assert()
            .code(2);
    }

    /// Exit code 2: Invalid scope value
    #[test]
    fn test_exit_code_invalid_scope() {
        cargo_bin_cmd!("gradle-dependency-runtime")
            .args(["-s", "everything"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("Invalid scope"));
    }

    /// Exit code 2: Invalid format value
    #[test]
    fn test_exit_code_invalid_format() {
        cargo_bin_cmd!("gradle-dependency-runtime")
            .args(["-f", "json"])
            .assert()
            .code(2);
    }

    /// Exit code 3: Application error - descriptor file does not exist
    #[test]
    fn test_exit_code_missing_descriptor() {
        let fixture = Fixture::new();
        fixture
            .command()
            .args(["-d", "does-not-exist/build.gradle"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Build descriptor not found"));
    }

    /// Exit code 3: Application error - artifact not found in any repository
    #[test]
    fn test_exit_code_unresolvable_dependency() {
        let fixture = Fixture::new();
        fixture.package("com.acme", "widget", &fixture.descriptor_for("com.acme:missing:1.0"));
        fixture
            .command()
            .assert()
            .code(3)
            .stderr(predicate::str::contains("Failed to resolve dependency"))
            .stderr(predicate::str::contains("com.acme:missing:1.0"));
    }
}

#[test]
fn test_e2e_downloads_packaged_runtime_dependencies() {
    let fixture = Fixture::new();
    fixture.publish("com.acme", "widget", "1.2.0");
    fixture.publish("org.example", "gizmo", "3.1");
    fixture.package("com.acme", "widget", &fixture.descriptor_for("com.acme:widget:1.2.0"));
    fixture.package("org.example", "gizmo", &fixture.descriptor_for("org.example:gizmo:3.1"));

    let output = fixture.command().output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    let widget = fixture.local_jar("com.acme", "widget", "1.2.0");
    let gizmo = fixture.local_jar("org.example", "gizmo", "3.1");
    assert_eq!(
        lines,
        vec![widget.to_str().unwrap(), gizmo.to_str().unwrap()]
    );
    assert_eq!(
        fs::read_to_string(&widget).unwrap(),
        "com.acme:widget:1.2.0"
    );
}

#[test]
fn test_e2e_duplicate_declarations_are_printed_once() {
    let fixture = Fixture::new();
    fixture.publish("com.acme", "widget", "1.2.0");
    fixture.package("com.acme", "widget", &fixture.descriptor_for("com.acme:widget:1.2.0"));
    fixture.package("org.example", "app", &fixture.descriptor_for("com.acme:widget:1.2.0"));

    let output = fixture.command().output().unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).lines().count(), 1);
}

#[test]
fn test_e2e_classpath_format() {
    let fixture = Fixture::new();
    fixture.publish("com.acme", "widget", "1.2.0");
    fixture.publish("com.acme", "core", "2.0");
    fixture.package(
        "com.acme",
        "widget",
        &format!(
            "apply plugin: 'java'\nrepositories {{ maven {{ url '{}' }} }}\ndependencies {{\n    compile 'com.acme:core:2.0'\n    runtime 'com.acme:widget:1.2.0'\n}}\n",
            fixture.remote_url()
        ),
    );

    let output = fixture.command().args(["-f", "classpath"]).output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let separator = if cfg!(windows) { ";" } else { ":" };
    let expected = format!(
        "{}{}{}",
        fixture.local_jar("com.acme", "core", "2.0").display(),
        separator,
        fixture.local_jar("com.acme", "widget", "1.2.0").display()
    );
    assert_eq!(stdout.trim_end(), expected);
}

#[test]
fn test_e2e_single_artifact_selection() {
    let fixture = Fixture::new();
    fixture.publish("com.acme", "widget", "1.2.0");
    fixture.package("com.acme", "widget", &fixture.descriptor_for("com.acme:widget:1.2.0"));
    fixture.package("org.example", "broken", "apply plugin: 'java'\nrepositories {\n");

    fixture
        .command()
        .args(["--group", "com.acme", "--artifact", "widget"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("widget-1.2.0.jar"));
}

#[test]
fn test_e2e_descriptor_file() {
    let fixture = Fixture::new();
    fixture.publish("com.acme", "widget", "1.2.0");
    let descriptor = fixture.path().join("build.gradle");
    fs::write(&descriptor, fixture.descriptor_for("com.acme:widget:1.2.0")).unwrap();

    fixture
        .command()
        .args(["-d", "build.gradle"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("widget-1.2.0.jar"));
}

#[test]
fn test_e2e_compile_scope_only_resolves_nothing() {
    let fixture = Fixture::new();
    fixture.package("com.acme", "widget", &fixture.descriptor_for("com.acme:missing:1.0"));

    fixture
        .command()
        .args(["-s", "compile"])
        .assert()
        .code(0)
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_e2e_malformed_descriptor_reports_error_chain() {
    let fixture = Fixture::new();
    fixture.package(
        "com.acme",
        "broken",
        "apply plugin: 'java'\ndependencies { runtiem 'com.acme:widget:1.2.0' }\n",
    );

    fixture
        .command()
        .assert()
        .code(3)
        .stderr(predicate::str::contains("com.acme/broken"))
        .stderr(predicate::str::contains("Caused by:"))
        .stderr(predicate::str::contains("runtiem"));
}

#[test]
fn test_e2e_quiet_suppresses_progress() {
    let fixture = Fixture::new();
    fixture.publish("com.acme", "widget", "1.2.0");
    fixture.package("com.acme", "widget", &fixture.descriptor_for("com.acme:widget:1.2.0"));

    fixture
        .command()
        .arg("--quiet")
        .assert()
        .code(0)
        .stderr(predicate::str::contains("Evaluating").not());
}

#[test]
fn test_e2e_settings_come_from_flags_only() {
    let fixture = Fixture::new();
    fixture.publish("com.acme", "widget", "1.2.0");
    fixture.package("com.acme", "widget", &fixture.descriptor_for("com.acme:widget:1.2.0"));
    fs::write(
        fixture.path().join("gradle-dependency-runtime.config.yml"),
        "scopes: [test]\nresource_roots: [elsewhere]\n",
    )
    .unwrap();

    fixture
        .command()
        .arg("--quiet")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("widget-1.2.0.jar"))
        .stderr(predicate::str::is_empty());
}
