//! Privilege re-invocation
//!
//! Files written by containerized converters are often owned by root. With
//! `--sudo` the tool re-runs its own command line under the configured
//! elevation command (default `sudo -E`) and exits with the child's status.

use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

/// Whether the current process already runs as root (effective UID 0)
///
/// Always false on non-Unix platforms.
pub fn is_elevated() -> bool {
    #[cfg(unix)]
    {
        // SAFETY: geteuid has no preconditions and cannot fail
        unsafe { libc::geteuid() == 0 }
    }

    #[cfg(not(unix))]
    {
        false
    }
}

/// Full argv of the elevated invocation: `<prefix...> <exe> <args...>`
pub fn elevated_argv(prefix: &[String], exe: &Path, args: &[OsString]) -> Vec<OsString> {
    prefix
        .iter()
        .map(OsString::from)
        .chain(std::iter::once(exe.as_os_str().to_os_string()))
        .chain(args.iter().cloned())
        .collect()
}

/// Re-run the current command line elevated, if needed
///
/// Returns `Ok(None)` when no re-invocation is needed (already root, or not
/// a Unix platform) and `Ok(Some(code))` with the child's exit code otherwise.
pub fn reexec_elevated(prefix: &[String]) -> io::Result<Option<i32>> {
    if !cfg!(unix) {
        debug!("Privilege elevation is not supported on this platform; continuing");
        return Ok(None);
    }
    if is_elevated() {
        debug!("Already running as root; not re-invoking");
        return Ok(None);
    }

    let exe = std::env::current_exe()?;
    let args: Vec<OsString> = std::env::args_os().skip(1).collect();
    let argv = elevated_argv(prefix, &exe, &args);
    info!(
        "Re-running with elevated privileges: {}",
        argv.iter()
            .map(|a| a.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    );

    run_elevated(&argv).map(Some)
}

/// Run `argv` to completion and return its exit code
///
/// A child killed by a signal reports code 1.
pub fn run_elevated(argv: &[OsString]) -> io::Result<i32> {
    let Some((program, rest)) = argv.split_first() else {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "empty elevation command",
        ));
    };
    let status = Command::new(program).args(rest).status()?;
    Ok(status.code().unwrap_or(1))
}
