use konfig_core::project::TaskKind;
use konfig_core::settings::Settings;
use std::io::Write;
use tempfile::NamedTempFile;

fn parse(content: &str) -> miette::Result<Settings> {
    let mut tmp = NamedTempFile::new().unwrap();
    write!(tmp, "{content}").unwrap();
    tmp.flush().unwrap();
    Settings::load(tmp.path())
}

const FULL_MANIFEST: &str = r#"
[build]
name = "mobile-android"
output-dir = "../../build"

[toolchain]
properties-file = "local.properties"
property = "flutter.sdk"
env = "FLUTTER_ROOT"

[[plugin]]
id = "dev.flutter.flutter-plugin-loader"
version = "1.0.0"

[[plugin]]
id = "com.android.application"
version = "8.7.2"
apply = false

[force]
"org.jetbrains.kotlin" = "1.9.24"

[options]
jvm-target = "17"
language-version = "1.9"
api-version = "1.9"
all-warnings-as-errors = false
free-args = ["-Xjdk-release=17"]

[[module]]
name = "app"
dependencies = ["org.jetbrains.kotlin:kotlin-stdlib:1.8.22"]

[[module]]
name = "path_provider"
evaluation-depends-on = ["app"]
tasks = [
    { name = "compileReleaseKotlin", kind = "kotlin" },
    { name = "compileReleaseJavaWithJavac", kind = "java" },
]

[module.options]
jvm-target = "11"
"#;

#[test]
fn parses_full_manifest() {
    let settings = parse(FULL_MANIFEST).unwrap();

    assert_eq!(settings.build.name, "mobile-android");
    assert_eq!(settings.build.output_dir, "../../build");
    assert_eq!(settings.toolchain.property, "flutter.sdk");
    assert_eq!(settings.toolchain.env, "FLUTTER_ROOT");

    assert_eq!(settings.plugins.len(), 2);
    assert!(settings.plugins[0].apply, "apply defaults to true");
    assert!(!settings.plugins[1].apply);

    assert_eq!(
        settings.force.get("org.jetbrains.kotlin"),
        Some(&"1.9.24".to_string())
    );

    assert_eq!(settings.options.jvm_target.as_deref(), Some("17"));
    assert_eq!(settings.options.all_warnings_as_errors, Some(false));
    assert_eq!(settings.options.free_args, vec!["-Xjdk-release=17"]);

    assert_eq!(settings.modules.len(), 2);
    assert_eq!(settings.modules[0].name, "app");
    assert!(settings.modules[0].tasks.is_none());
    assert_eq!(settings.modules[1].evaluation_depends_on, vec!["app"]);

    let tasks = settings.modules[1].tasks.as_ref().unwrap();
    assert_eq!(tasks[0].kind, TaskKind::KotlinCompile);
    assert_eq!(tasks[1].kind, TaskKind::JavaCompile);

    let local = settings.modules[1].options.as_ref().unwrap();
    assert_eq!(local.jvm_target.as_deref(), Some("11"));
    assert!(local.language_version.is_none());
}

#[test]
fn minimal_manifest_uses_defaults() {
    let settings = parse(
        r#"
[build]
name = "demo"

[toolchain]
property = "sdk.home"
env = "SDK_HOME"
"#,
    )
    .unwrap();

    assert_eq!(settings.build.output_dir, "build");
    assert_eq!(settings.toolchain.properties_file, "local.properties");
    assert!(settings.plugins.is_empty());
    assert!(settings.force.is_empty());
    assert!(settings.options.is_empty());
    assert!(settings.modules.is_empty());
}

#[test]
fn missing_build_section_is_an_error() {
    let err = parse("[toolchain]\nproperty = \"p\"\nenv = \"E\"\n").unwrap_err();
    assert!(err.to_string().contains("Failed to parse"), "got: {err}");
}

#[test]
fn unknown_option_key_is_an_error() {
    let err = parse(
        r#"
[build]
name = "demo"

[toolchain]
property = "sdk.home"
env = "SDK_HOME"

[options]
jvmTarget = "17"
"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("Failed to parse"), "got: {err}");
}

#[test]
fn load_missing_file_is_an_error() {
    let err = Settings::load(std::path::Path::new("/nonexistent/Konfig.toml")).unwrap_err();
    assert!(err.to_string().contains("Failed to read"), "got: {err}");
}
