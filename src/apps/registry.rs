//! Known implementations for each kind of desktop utility.

use std::fmt;
use std::str::FromStr;

use super::ResolveError;

/// One concrete application that can fill a [`Category`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub display_name: &'static str,
    pub package: &'static str,
    /// Desktop entry id passed to the launcher
    pub exec: &'static str,
}

impl Candidate {
    const fn new(display_name: &'static str, package: &'static str, exec: &'static str) -> Self {
        Self {
            display_name,
            package,
            exec,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Settings,
    Terminal,
    SoftwareCenter,
    TaskManager,
}

const SETTINGS: &[Candidate] = &[
    Candidate::new(
        "Gnome Settings",
        "gnome-control-center",
        "org.gnome.Settings",
    ),
    Candidate::new("KDE settings", "systemsettings", "kdesystemsettings"),
    Candidate::new(
        "XFCE Settings",
        "xfce4-settings-manager",
        "xfce4-settings-manager",
    ),
    Candidate::new(
        "Cinnamon Settings",
        "cinnamon-settings",
        "cinnamon-settings",
    ),
];

const TERMINAL: &[Candidate] = &[
    Candidate::new("Gnome Terminal", "gnome-terminal", "org.gnome.Terminal"),
    Candidate::new("Konsole", "konsole", "org.kde.konsole"),
    Candidate::new("XFCE4 Terminal", "xfce4-terminal", "xfce4-terminal"),
];

const SOFTWARE_CENTER: &[Candidate] = &[
    Candidate::new("Gnome Software", "gnome-software", "org.gnome.Software"),
    Candidate::new("Discover (KDE)", "plasma-discover", "org.kde.discover"),
];

const TASK_MANAGER: &[Candidate] = &[
    Candidate::new(
        "Gnome System Monitor",
        "gnome-system-monitor",
        "gnome-system-monitor",
    ),
    Candidate::new(
        "KDE System Monitor",
        "plasma-systemmonitor",
        "org.kde.plasma-systemmonitor",
    ),
    Candidate::new(
        "XFCE Task Manager",
        "xfce4-taskmanager",
        "xfce4-taskmanager",
    ),
];

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Settings,
        Category::Terminal,
        Category::SoftwareCenter,
        Category::TaskManager,
    ];

    /// Candidates in preference order; the first installed one wins.
    pub fn candidates(self) -> &'static [Candidate] {
        match self {
            Category::Settings => SETTINGS,
            Category::Terminal => TERMINAL,
            Category::SoftwareCenter => SOFTWARE_CENTER,
            Category::TaskManager => TASK_MANAGER,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Category::Settings => "settings",
            Category::Terminal => "terminal",
            Category::SoftwareCenter => "software_center",
            Category::TaskManager => "task_manager",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Settings => "Settings",
            Category::Terminal => "Terminal",
            Category::SoftwareCenter => "Software Center",
            Category::TaskManager => "Task Manager",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.key() == s)
            .ok_or_else(|| ResolveError::UnknownCategory(s.to_string()))
    }
}
