use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const TEMPLATE: &str = r#"
ServerAdmin {{ server_admin }}
DocumentRoot {{ app_root }}/{{ web_directory }}
FPMSocket {{ fpm_socket }}
DisableHTTPSRedirect {{ disable_https_redirect }}
{% if user_include != "" %}
IncludeOptional {{ user_include }}
{%- endif %}
"#;

fn httpdconf() -> Command {
    let mut cmd = Command::cargo_bin("httpdconf").unwrap();
    cmd.env_clear();
    cmd
}

fn write_template(cnb: &Path, source: &str) -> std::path::PathBuf {
    fs::create_dir_all(cnb.join("config")).unwrap();
    let path = cnb.join("config").join("httpd.conf");
    fs::write(&path, source).unwrap();
    path
}

#[test]
fn detect_passes_for_httpd() {
    httpdconf()
        .env("BP_PHP_SERVER", "httpd")
        .arg("detect")
        .assert()
        .success()
        .stdout(predicate::str::contains("php-httpd-config"));
}

#[test]
fn detect_skips_with_code_100() {
    httpdconf()
        .env("BP_PHP_SERVER", "nginx")
        .arg("detect")
        .assert()
        .code(100)
        .stderr(predicate::str::contains("BP_PHP_SERVER is not set to 'httpd'"));
}

#[test]
fn render_with_env_overrides() {
    let cnb = TempDir::new().unwrap();
    let template = write_template(cnb.path(), TEMPLATE);
    let working = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();

    httpdconf()
        .env("BP_PHP_SERVER_ADMIN", "ops@example.com")
        .env("BP_PHP_WEB_DIR", "public")
        .env("BP_PHP_ENABLE_HTTPS_REDIRECT", "false")
        .arg("render")
        .arg("--working-dir")
        .arg(working.path())
        .arg("--template")
        .arg(&template)
        .arg("--output-dir")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("httpd.conf"));

    let contents = fs::read_to_string(out.path().join("httpd.conf")).unwrap();
    assert!(contents.contains("ServerAdmin ops@example.com"));
    assert!(contents.contains(&format!("DocumentRoot {}/public", working.path().display())));
    assert!(contents.contains("DisableHTTPSRedirect true"));
    assert!(!contents.contains("IncludeOptional"));
}

#[test]
fn render_defaults_to_absolute_current_dir() {
    let cnb = TempDir::new().unwrap();
    let template = write_template(cnb.path(), TEMPLATE);
    let working = TempDir::new().unwrap();
    fs::create_dir(working.path().join(".httpd.conf.d")).unwrap();
    let out = TempDir::new().unwrap();

    httpdconf()
        .current_dir(working.path())
        .arg("render")
        .arg("--template")
        .arg(&template)
        .arg("-o")
        .arg(out.path())
        .assert()
        .success();

    let contents = fs::read_to_string(out.path().join("httpd.conf")).unwrap();
    let root = fs::canonicalize(working.path()).unwrap();
    assert!(!contents.contains("DocumentRoot ./"));
    assert!(contents.contains(&format!("DocumentRoot {}/htdocs", root.display())));
    assert!(contents.contains(&format!(
        "IncludeOptional {}/.httpd.conf.d/*.conf",
        root.display()
    )));
}

#[test]
fn invalid_redirect_flag_fails_without_writing() {
    let cnb = TempDir::new().unwrap();
    let template = write_template(cnb.path(), TEMPLATE);
    let working = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();

    httpdconf()
        .env("BP_PHP_ENABLE_HTTPS_REDIRECT", "not-a-bool")
        .arg("render")
        .arg("--working-dir")
        .arg(working.path())
        .arg("--template")
        .arg(&template)
        .arg("-o")
        .arg(out.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("BP_PHP_ENABLE_HTTPS_REDIRECT"))
        .stderr(predicate::str::contains("not-a-bool"));

    assert!(!out.path().join("httpd.conf").exists());
}

#[test]
fn cli_flag_beats_env() {
    let working = TempDir::new().unwrap();

    httpdconf()
        .env("BP_PHP_WEB_DIR", "public")
        .arg("resolve")
        .arg("--working-dir")
        .arg(working.path())
        .arg("--web-dir")
        .arg("web")
        .assert()
        .success()
        .stdout(predicate::str::contains("web_directory = web"));
}

#[test]
fn resolve_json_reports_include_glob() {
    let working = TempDir::new().unwrap();
    fs::create_dir(working.path().join(".httpd.conf.d")).unwrap();

    let output = httpdconf()
        .arg("resolve")
        .arg("--json")
        .arg("--working-dir")
        .arg(working.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        value["user_include"],
        format!("{}/.httpd.conf.d/*.conf", working.path().display())
    );
    assert_eq!(value["fpm_socket"], "127.0.0.1:9000");
}

#[test]
fn build_publishes_config_path() {
    let cnb = TempDir::new().unwrap();
    write_template(cnb.path(), TEMPLATE);
    let working = TempDir::new().unwrap();
    let layers = TempDir::new().unwrap();
    let plan = layers.path().join("plan.toml");
    fs::write(
        &plan,
        "[[entries]]\nname = \"php-httpd-config\"\n[entries.metadata]\nlaunch = true\n",
    )
    .unwrap();

    let config_path = layers.path().join("php-httpd-config").join("httpd.conf");
    httpdconf()
        .arg("build")
        .arg("--layers")
        .arg(layers.path())
        .arg("--plan")
        .arg(&plan)
        .arg("--working-dir")
        .arg(working.path())
        .arg("--cnb-path")
        .arg(cnb.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "PHP_HTTPD_PATH={}",
            config_path.display()
        )));

    assert!(config_path.is_file());
    let metadata = fs::read_to_string(layers.path().join("php-httpd-config.toml")).unwrap();
    assert!(metadata.contains("launch = true"));
    let env = fs::read_to_string(
        layers
            .path()
            .join("php-httpd-config")
            .join("env")
            .join("PHP_HTTPD_PATH.default"),
    )
    .unwrap();
    assert_eq!(env, config_path.display().to_string());
}

#[test]
fn bundled_template_renders() {
    let template = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("config")
        .join("httpd.conf");
    let working = TempDir::new().unwrap();
    fs::create_dir(working.path().join(".httpd.conf.d")).unwrap();
    let out = TempDir::new().unwrap();

    httpdconf()
        .arg("render")
        .arg("--working-dir")
        .arg(working.path())
        .arg("--template")
        .arg(&template)
        .arg("-o")
        .arg(out.path())
        .assert()
        .success();

    let contents = fs::read_to_string(out.path().join("httpd.conf")).unwrap();
    assert!(contents.contains("ServerAdmin \"admin@localhost\""));
    assert!(contents.contains(&format!(
        "DocumentRoot \"{}/htdocs\"",
        working.path().display()
    )));
    assert!(contents.contains("SetHandler proxy:fcgi://127.0.0.1:9000"));
    assert!(contents.contains("RewriteEngine On"));
    assert!(contents.contains(&format!(
        "IncludeOptional {}/.httpd.conf.d/*.conf",
        working.path().display()
    )));
}

#[test]
fn defaults_lists_settings() {
    httpdconf()
        .arg("defaults")
        .assert()
        .success()
        .stdout(predicate::str::contains("admin@localhost"))
        .stdout(predicate::str::contains("enable_https_redirect"));
}
