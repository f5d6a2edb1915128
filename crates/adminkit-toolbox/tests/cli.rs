use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn adminkit(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_adminkit"))
        .args(args)
        .env_remove("ADMINKIT_CMD")
        .env_remove("ADMINKIT_CONFIG")
        .env_remove("ADMINKIT_LOG")
        .output()
        .unwrap()
}

fn temp_conf(contents: &str) -> (tempfile::TempDir, PathBuf) {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("app.conf");
    std::fs::write(&path, contents).unwrap();
    (tmp, path)
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_update_property_replaces_value() {
    let (_tmp, path) = temp_conf("# comment\nport=80\n");

    let out = adminkit(&["update_property", arg(&path), "port", "8080"]);

    assert_eq!(out.status.code(), Some(0));
    assert!(out.stdout.is_empty());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "# comment\nport=8080\n");
}

#[test]
fn test_update_property_echo() {
    let (_tmp, path) = temp_conf("mykey=old\n");

    let out = adminkit(&["update_property", "-e", "-q", arg(&path), "mykey", "new value"]);

    assert_eq!(out.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&out.stdout), "mykey=\"new value\"\n");
}

#[test]
fn test_update_property_echo_non_utf8() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("app.properties");
    std::fs::write(&path, b"# caf\xe9\nname=J\xfcr\n").unwrap();

    let out = adminkit(&["update_property", "-e", "-a", arg(&path), "name", "gen"]);

    assert_eq!(out.status.code(), Some(0));
    assert_eq!(out.stdout, b"name=J\xfcrgen\n");
    assert_eq!(std::fs::read(&path).unwrap(), b"# caf\xe9\nname=J\xfcrgen\n");
}

#[test]
fn test_update_property_missing_key() {
    let (_tmp, path) = temp_conf("foo=bar\n");

    let out = adminkit(&["update_property", arg(&path), "baz", "qux"]);

    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("baz"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "foo=bar\n");
}

#[test]
fn test_update_property_force_insert() {
    let (_tmp, path) = temp_conf("foo=bar\n");

    let out = adminkit(&["update_property", "-f", arg(&path), "baz", "qux"]);

    assert_eq!(out.status.code(), Some(0));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "foo=bar\nbaz=qux\n");
}

#[test]
fn test_update_property_space_delimiter() {
    let (_tmp, path) = temp_conf("remote 1194\n");

    let out = adminkit(&[
        "update_property",
        "-d",
        " ",
        arg(&path),
        "remote",
        "my-server-1 1194",
    ]);

    assert_eq!(out.status.code(), Some(0));
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "remote my-server-1 1194\n"
    );
}

#[test]
fn test_update_property_missing_file() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("missing.conf");

    let out = adminkit(&["update_property", arg(&path), "a", "b"]);

    assert_eq!(out.status.code(), Some(1));
    assert!(!path.exists());
}

#[test]
fn test_update_property_usage() {
    let out = adminkit(&["update_property", "only-a-file"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Usage"));

    let out = adminkit(&["update_property", "-z", "f", "k", "v"]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn test_dispatch_via_env() {
    let (_tmp, path) = temp_conf("a=1\n");

    let out = Command::new(env!("CARGO_BIN_EXE_adminkit"))
        .args([arg(&path), "a", "2"])
        .env("ADMINKIT_CMD", "update_property")
        .env_remove("ADMINKIT_CONFIG")
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(0));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "a=2\n");
}

#[test]
fn test_config_default_delimiter() {
    let (tmp, path) = temp_conf("a:1\n");
    let config = tmp.path().join("adminkit.toml");
    std::fs::write(&config, "default_delimiter = \":\"\n").unwrap();

    let out = Command::new(env!("CARGO_BIN_EXE_adminkit"))
        .args(["update_property", arg(&path), "a", "2"])
        .env_remove("ADMINKIT_CMD")
        .env("ADMINKIT_CONFIG", &config)
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(0));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "a:2\n");
}

#[test]
fn test_invalid_config_fails() {
    let (tmp, path) = temp_conf("a=1\n");
    let config = tmp.path().join("adminkit.toml");
    std::fs::write(&config, "bigfiles = 5\n").unwrap();

    let out = Command::new(env!("CARGO_BIN_EXE_adminkit"))
        .args(["update_property", arg(&path), "a", "2"])
        .env_remove("ADMINKIT_CMD")
        .env("ADMINKIT_CONFIG", &config)
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(1));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "a=1\n");
}

#[test]
fn test_unknown_command() {
    let out = adminkit(&["frobnicate"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("update_property"));
}

#[test]
fn test_bigfiles() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("small"), vec![b'x'; 10]).unwrap();
    std::fs::write(tmp.path().join("large"), vec![b'x'; 4096]).unwrap();

    let out = adminkit(&["bigfiles", "-b", "-n", "1", arg(tmp.path())]);

    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout.lines().count(), 1);
    assert!(stdout.starts_with("4096\t"));
    assert!(stdout.trim_end().ends_with("large"));
}

#[test]
fn test_search() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("hosts"), "127.0.0.1 localhost\n").unwrap();

    let out = adminkit(&["search", "-n", "localhost", arg(tmp.path())]);
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).contains(":1:127.0.0.1 localhost"));

    let out = adminkit(&["search", "nothing-here", arg(tmp.path())]);
    assert_eq!(out.status.code(), Some(1));

    let out = adminkit(&["search", "(", arg(tmp.path())]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn test_search_files_with_matches_listed_once() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("hosts"), "127.0.0.1 localhost\n::1 localhost\n").unwrap();

    let out = adminkit(&["search", "-l", "localhost", arg(tmp.path()), arg(tmp.path())]);

    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout.lines().count(), 1);
    assert!(stdout.trim_end().ends_with("hosts"));
}

#[test]
fn test_search_double_dash_ends_options() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("jvm.conf"), "opts=-Xmx1g\nname=app\n").unwrap();

    let out = adminkit(&["search", "--", "-Xmx", arg(tmp.path())]);

    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout.lines().count(), 1);
    assert!(stdout.contains("opts=-Xmx1g"));
}

#[test]
fn test_lines() {
    let tmp = tempfile::tempdir().unwrap();
    let file = tmp.path().join("notes.txt");
    std::fs::write(&file, "a\nBEGIN\nb\nEND\nc\n").unwrap();

    let out = adminkit(&["lines", "/BEGIN/,/END/", arg(&file)]);
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&out.stdout), "BEGIN\nb\nEND\n");

    let out = adminkit(&["lines", "-n", "5", arg(&file)]);
    assert_eq!(String::from_utf8_lossy(&out.stdout), "5:c\n");

    let out = adminkit(&["lines", "0,3", arg(&file)]);
    assert_eq!(out.status.code(), Some(1));
}
