//! Package manager enum and related functionality.

/// Native package manager of the host distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageManager {
    /// APT/dpkg - Debian family (the Radxa images)
    Apt,
    /// Pacman - Arch Linux family
    Pacman,
    /// DNF/rpm - Fedora family
    Dnf,
}

impl PackageManager {
    /// Detect the native package manager by probing for its database tool.
    ///
    /// Probed in order: dpkg, pacman, rpm.
    pub fn detect() -> Option<Self> {
        Self::detect_with(|program| which::which(program).is_ok())
    }

    pub fn detect_with(available: impl Fn(&str) -> bool) -> Option<Self> {
        [Self::Apt, Self::Pacman, Self::Dnf]
            .into_iter()
            .find(|manager| available(manager.query_command().0))
    }

    /// Command and base arguments that exit zero iff a package is installed.
    pub fn query_command(&self) -> (&'static str, &'static [&'static str]) {
        match self {
            Self::Apt => ("dpkg", &["-s"]),
            Self::Pacman => ("pacman", &["-Q"]),
            Self::Dnf => ("rpm", &["-q"]),
        }
    }

    /// Get the install command prefix for this package manager.
    ///
    /// Privilege escalation is added by the installer, not here.
    pub fn install_command(&self) -> (&'static str, &'static [&'static str]) {
        match self {
            Self::Apt => ("apt-get", &["install", "-y"]),
            Self::Pacman => ("pacman", &["-S", "--noconfirm"]),
            Self::Dnf => ("dnf", &["install", "-y"]),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Apt => "APT",
            Self::Pacman => "Pacman",
            Self::Dnf => "DNF",
        }
    }
}

impl std::fmt::Display for PackageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_prefers_dpkg() {
        let detected = PackageManager::detect_with(|p| p == "dpkg" || p == "pacman");
        assert_eq!(detected, Some(PackageManager::Apt));
    }

    #[test]
    fn test_detect_falls_through() {
        assert_eq!(
            PackageManager::detect_with(|p| p == "rpm"),
            Some(PackageManager::Dnf)
        );
        assert_eq!(PackageManager::detect_with(|_| false), None);
    }

    #[test]
    fn test_commands() {
        assert_eq!(PackageManager::Apt.query_command(), ("dpkg", &["-s"][..]));
        assert_eq!(
            PackageManager::Apt.install_command(),
            ("apt-get", &["install", "-y"][..])
        );
        assert_eq!(PackageManager::Pacman.to_string(), "Pacman");
    }
}
