//! Package queries and installs through the host package manager.

use anyhow::{Context, Result};
use duct::cmd;
use sudo::RunningAs;

use super::PackageManager;

/// Ask the package database whether `package` is installed.
///
/// A non-zero exit means "not installed". An `Err` means the query tool
/// itself could not be run.
pub fn is_installed(manager: PackageManager, package: &str) -> Result<bool> {
    let (program, base_args) = manager.query_command();
    let mut args: Vec<&str> = base_args.to_vec();
    args.push(package);

    let output = cmd(program, &args)
        .stdout_null()
        .stderr_null()
        .unchecked()
        .run()
        .with_context(|| format!("Failed to run {} to query {}", program, package))?;

    Ok(output.status.success())
}

/// Install `package`, blocking until the installer exits.
///
/// Runs through pkexec unless the process is already root.
pub fn install_package(manager: PackageManager, package: &str) -> Result<()> {
    let (program, args) = elevated_install_args(manager, package, sudo::check());

    cmd(program.as_str(), &args)
        .run()
        .with_context(|| format!("Failed to install {} with {}", package, manager))?;

    Ok(())
}

fn elevated_install_args(
    manager: PackageManager,
    package: &str,
    running_as: RunningAs,
) -> (String, Vec<String>) {
    let (program, base_args) = manager.install_command();
    let mut args: Vec<String> = base_args.iter().map(|a| a.to_string()).collect();
    args.push(package.to_string());

    match running_as {
        RunningAs::Root => (program.to_string(), args),
        _ => {
            args.insert(0, program.to_string());
            ("pkexec".to_string(), args)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_install_goes_through_pkexec() {
        let (program, args) =
            elevated_install_args(PackageManager::Apt, "konsole", RunningAs::User);
        assert_eq!(program, "pkexec");
        assert_eq!(args, vec!["apt-get", "install", "-y", "konsole"]);
    }

    #[test]
    fn test_root_install_runs_directly() {
        let (program, args) =
            elevated_install_args(PackageManager::Pacman, "konsole", RunningAs::Root);
        assert_eq!(program, "pacman");
        assert_eq!(args, vec!["-S", "--noconfirm", "konsole"]);
    }
}
