#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;
use std::time::Duration;
use std::time::Instant;

use batshim::launch_console;
use batshim::launch_hidden;
use batshim::CommandLauncher;
use batshim::LaunchError;
use batshim::ScriptPath;
use uuid::Uuid;

// writing an executable while another test forks can fail the exec with ETXTBSY
static SPAWN_LOCK: Mutex<()> = Mutex::new(());

fn serial() -> MutexGuard<'static, ()> {
    SPAWN_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

fn scratch_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("batshim-{}", Uuid::new_v4()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_script(dir: &Path, name: &str, body: &str) {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
}

fn resolve(dir: &Path, executable: &str) -> ScriptPath {
    ScriptPath::resolve(&dir.join(executable).to_string_lossy())
}

#[test]
fn hidden_launch_blocks_until_the_script_exits() {
    let _serial = serial();
    let dir = scratch_dir();
    let marker = dir.join("marker");
    write_script(
        &dir,
        "app.bat",
        &format!("sleep 1\necho done > '{}'", marker.display()),
    );

    let started = Instant::now();
    launch_hidden(&CommandLauncher, &resolve(&dir, "app.exe")).unwrap();

    assert!(started.elapsed() >= Duration::from_secs(1));
    assert_eq!(fs::read_to_string(&marker).unwrap().trim(), "done");

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn hidden_launch_ignores_the_script_exit_code() {
    let _serial = serial();
    let dir = scratch_dir();
    write_script(&dir, "failing.bat", "exit 3");

    assert!(launch_hidden(&CommandLauncher, &resolve(&dir, "failing.exe")).is_ok());

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn hidden_launch_of_a_missing_script_reports_the_os_error_code() {
    let _serial = serial();
    let dir = scratch_dir();

    let error = launch_hidden(&CommandLauncher, &resolve(&dir, "missing.exe")).unwrap_err();

    // ENOENT
    assert!(matches!(error, LaunchError::CreateProcess { code: 2 }));
    assert_eq!(error.to_string(), "Error creating process: 2");

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn hidden_launch_runs_the_script_named_after_everything_before_the_last_dot() {
    let _serial = serial();
    let dir = scratch_dir();
    let marker = dir.join("marker");
    write_script(
        &dir,
        "app.v2.bat",
        &format!("echo v2 > '{}'", marker.display()),
    );

    launch_hidden(&CommandLauncher, &resolve(&dir, "app.v2.exe")).unwrap();

    assert_eq!(fs::read_to_string(&marker).unwrap().trim(), "v2");

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn console_launch_lasts_as_long_as_the_shell_command() {
    let _serial = serial();
    let dir = scratch_dir();
    let marker = dir.join("marker");
    write_script(
        &dir,
        "console.bat",
        &format!("sleep 1\necho done > '{}'", marker.display()),
    );

    let started = Instant::now();
    launch_console(&resolve(&dir, "console.exe"));

    assert!(started.elapsed() >= Duration::from_secs(1));
    assert_eq!(fs::read_to_string(&marker).unwrap().trim(), "done");

    fs::remove_dir_all(dir).unwrap();
}

#[test]
fn console_launch_absorbs_a_missing_script() {
    let _serial = serial();
    let dir = scratch_dir();

    launch_console(&resolve(&dir, "missing.exe"));

    fs::remove_dir_all(dir).unwrap();
}
