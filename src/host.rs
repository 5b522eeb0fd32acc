//! Services pyskel needs from the machine it runs on: opening a file in the
//! user's editor, probing for commands on `PATH`, and the user's identity.
//!
//! Generators reach them through the [`Host`] trait so tests can substitute
//! a fake host.

use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Context};
use log::{debug, warn};

use crate::error::Result;

pub trait Host {
    /// Opens `path` with the user's editor or the associated application.
    /// Returns the exit code when `block` is set, `0` otherwise, and `-1` if
    /// no application could be launched.
    fn open(&self, path: &Path, block: bool) -> i32;

    /// Whether an executable named `name` is reachable through `PATH`.
    fn has_command(&self, name: &str) -> bool;

    fn user_name(&self) -> String;

    fn user_email(&self) -> String;
}

/// The real machine.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHost;

impl SystemHost {
    pub fn new() -> Self {
        Self
    }
}

impl Host for SystemHost {
    fn open(&self, path: &Path, block: bool) -> i32 {
        open_with_associated_application(path, block)
    }

    fn has_command(&self, name: &str) -> bool {
        has_command(name)
    }

    fn user_name(&self) -> String {
        git_identity("user.name").unwrap_or_else(login_name)
    }

    fn user_email(&self) -> String {
        git_identity("user.email").unwrap_or_else(|| format!("{}@localhost", login_name()))
    }
}

/// Reads a value from the user's git configuration.
pub fn git_config_value(key: &str) -> Result<Option<String>> {
    let config = git2::Config::open_default()?;
    match config.get_string(key) {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn git_identity(key: &str) -> Option<String> {
    match git_config_value(key) {
        Ok(value) => value.filter(|v| !v.trim().is_empty()),
        Err(e) => {
            debug!("Cannot read '{key}' from git config: {e}");
            None
        }
    }
}

fn login_name() -> String {
    env::var("USER")
        .or_else(|_| env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string())
}

fn executable_candidates(dir: &Path, name: &str) -> Vec<PathBuf> {
    let mut candidates = vec![dir.join(name)];
    if cfg!(windows) {
        let exts = env::var("PATHEXT").unwrap_or_else(|_| ".COM;.EXE;.BAT;.CMD".to_string());
        candidates.extend(exts.split(';').filter(|e| !e.is_empty()).map(|ext| dir.join(format!("{name}{ext}"))));
    }
    candidates
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Whether `name` resolves to an executable through `PATH`.
pub fn has_command(name: &str) -> bool {
    let Some(paths) = env::var_os("PATH") else {
        return false;
    };
    env::split_paths(&paths)
        .flat_map(|dir| executable_candidates(&dir, name))
        .any(|candidate| is_executable(&candidate))
}

/// Program and arguments used to open a file: `$VISUAL`, `$EDITOR`, then the
/// platform's opener.
fn resolve_opener(block: bool) -> anyhow::Result<(String, Vec<String>)> {
    if let Ok(editor) = env::var("VISUAL").or_else(|_| env::var("EDITOR")) {
        let mut parts = editor.split_whitespace().map(str::to_string);
        if let Some(program) = parts.next() {
            return Ok((program, parts.collect()));
        }
        bail!("$EDITOR is set but empty");
    }

    let (program, mut args) = if cfg!(windows) {
        ("cmd", vec!["/C", "start"])
    } else if cfg!(target_os = "macos") {
        ("open", vec!["-t"])
    } else {
        ("xdg-open", vec![])
    };
    if block && cfg!(windows) {
        args.push("/WAIT");
    } else if block && cfg!(target_os = "macos") {
        args.insert(0, "-W");
    }
    if cfg!(windows) {
        // window title
        args.push("");
    }
    if !has_command(program) {
        bail!("No editor configured and '{program}' is not available. Set $EDITOR or $VISUAL.");
    }
    Ok((program.to_string(), args.into_iter().map(str::to_string).collect()))
}

fn launch(path: &Path, block: bool) -> anyhow::Result<i32> {
    let (program, args) = resolve_opener(block)?;
    debug!("Opening '{}' with '{program}'", path.display());

    let mut command = Command::new(&program);
    command.args(&args).arg(path);
    if block {
        let status = command
            .status()
            .with_context(|| format!("Failed to launch '{program}'"))?;
        Ok(status.code().unwrap_or(-1))
    } else {
        command
            .spawn()
            .with_context(|| format!("Failed to launch '{program}'"))?;
        Ok(0)
    }
}

/// Opens `path` with the associated application; `-1` if nothing could be
/// launched.
pub fn open_with_associated_application(path: &Path, block: bool) -> i32 {
    match launch(path, block) {
        Ok(code) => code,
        Err(e) => {
            warn!("{e:#}");
            -1
        }
    }
}
