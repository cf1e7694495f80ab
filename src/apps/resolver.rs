use std::sync::Arc;

use super::registry::{Candidate, Category};
use super::{AppLauncher, InstallPrompt, PackageBackend, ResolveError};
use crate::logging::Logger;

/// Outcome of [`AppResolver::resolve_and_launch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// An installed candidate was started
    Launched(Candidate),
    /// Nothing was installed; the user was asked. `installed` is the
    /// candidate that got installed and launched, if any.
    PromptedForInstall { installed: Option<Candidate> },
}

pub struct AppResolver<P, L> {
    packages: P,
    launcher: L,
    logger: Arc<Logger>,
}

impl<P: PackageBackend, L: AppLauncher> AppResolver<P, L> {
    pub fn new(packages: P, launcher: L, logger: Arc<Logger>) -> Self {
        Self {
            packages,
            launcher,
            logger,
        }
    }

    pub fn resolve_and_launch(
        &self,
        category: &str,
        prompt: &dyn InstallPrompt,
    ) -> Result<Resolution, ResolveError> {
        let category: Category = category.parse()?;
        self.resolve(category, prompt)
    }

    pub fn resolve(
        &self,
        category: Category,
        prompt: &dyn InstallPrompt,
    ) -> Result<Resolution, ResolveError> {
        let candidates = category.candidates();

        for candidate in candidates {
            if self.is_installed(candidate) {
                self.launch(candidate.exec)?;
                return Ok(Resolution::Launched(*candidate));
            }
        }

        self.logger.info(
            "apps.prompt",
            &format!(
                "No {} installed, asking which one to install",
                category.label()
            ),
        );
        let Some(index) = prompt.choose(category, candidates)? else {
            return Ok(Resolution::PromptedForInstall { installed: None });
        };
        let Some(candidate) = candidates.get(index) else {
            return Ok(Resolution::PromptedForInstall { installed: None });
        };

        self.logger.info(
            "apps.install",
            &format!(
                "Installing {} ({})",
                candidate.display_name, candidate.package
            ),
        );
        // The launch is attempted even when the installer reports a failure
        if let Err(e) = self.packages.install(candidate.package) {
            self.logger.error(
                "apps.install.error",
                &format!("Failed to install {}: {:#}", candidate.package, e),
            );
        }
        self.launch(candidate.exec)?;

        Ok(Resolution::PromptedForInstall {
            installed: Some(*candidate),
        })
    }

    /// Start a fixed tool by desktop id, bypassing the registry.
    pub fn launch_direct(&self, exec: &str) -> Result<(), ResolveError> {
        self.launch(exec)
    }

    fn is_installed(&self, candidate: &Candidate) -> bool {
        self.logger.debug(
            "apps.query",
            &format!("Checking if {} is installed..", candidate.package),
        );
        match self.packages.is_installed(candidate.package) {
            Ok(installed) => installed,
            Err(e) => {
                self.logger.warn(
                    "apps.query.error",
                    &format!("Could not query {}: {:#}", candidate.package, e),
                );
                false
            }
        }
    }

    fn launch(&self, exec: &str) -> Result<(), ResolveError> {
        self.logger.info("apps.launch", &format!("Launching {}", exec));
        self.launcher
            .launch(exec)
            .map_err(|source| ResolveError::Launch {
                exec: exec.to_string(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, anyhow};
    use std::cell::{Cell, RefCell};
    use std::collections::HashSet;

    #[derive(Default)]
    struct FakePackages {
        installed: RefCell<HashSet<&'static str>>,
        broken: HashSet<&'static str>,
        fail_install: bool,
        installs: RefCell<Vec<String>>,
    }

    impl FakePackages {
        fn with(installed: &[&'static str]) -> Self {
            Self {
                installed: RefCell::new(installed.iter().copied().collect()),
                ..Self::default()
            }
        }
    }

    impl PackageBackend for FakePackages {
        fn is_installed(&self, package: &str) -> Result<bool> {
            if self.broken.contains(package) {
                return Err(anyhow!("database locked"));
            }
            Ok(self.installed.borrow().contains(package))
        }

        fn install(&self, package: &str) -> Result<()> {
            self.installs.borrow_mut().push(package.to_string());
            if self.fail_install {
                return Err(anyhow!("exit status 100"));
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeLauncher {
        launched: RefCell<Vec<String>>,
    }

    impl AppLauncher for FakeLauncher {
        fn launch(&self, exec: &str) -> Result<()> {
            self.launched.borrow_mut().push(exec.to_string());
            Ok(())
        }
    }

    struct FakePrompt {
        answer: Option<usize>,
        shown: Cell<usize>,
        listed: RefCell<Vec<&'static str>>,
    }

    impl FakePrompt {
        fn answering(answer: Option<usize>) -> Self {
            Self {
                answer,
                shown: Cell::new(0),
                listed: RefCell::new(Vec::new()),
            }
        }
    }

    impl InstallPrompt for FakePrompt {
        fn choose(&self, _category: Category, candidates: &[Candidate]) -> Result<Option<usize>> {
            self.shown.set(self.shown.get() + 1);
            *self.listed.borrow_mut() = candidates.iter().map(|c| c.display_name).collect();
            Ok(self.answer)
        }
    }

    fn resolver(packages: FakePackages) -> AppResolver<FakePackages, FakeLauncher> {
        AppResolver::new(
            packages,
            FakeLauncher::default(),
            Arc::new(Logger::console()),
        )
    }

    #[test]
    fn test_first_installed_candidate_is_launched() {
        // Gnome Terminal missing, Konsole present
        let resolver = resolver(FakePackages::with(&["konsole", "xfce4-terminal"]));
        let prompt = FakePrompt::answering(Some(0));

        let result = resolver.resolve_and_launch("terminal", &prompt).unwrap();

        assert!(matches!(result, Resolution::Launched(c) if c.package == "konsole"));
        assert_eq!(
            *resolver.launcher.launched.borrow(),
            vec!["org.kde.konsole"]
        );
        assert!(resolver.packages.installs.borrow().is_empty());
        assert_eq!(prompt.shown.get(), 0);
    }

    #[test]
    fn test_nothing_installed_prompts_once() {
        let resolver = resolver(FakePackages::default());
        let prompt = FakePrompt::answering(None);

        let result = resolver
            .resolve_and_launch("software_center", &prompt)
            .unwrap();

        assert_eq!(result, Resolution::PromptedForInstall { installed: None });
        assert_eq!(prompt.shown.get(), 1);
        assert_eq!(
            *prompt.listed.borrow(),
            vec!["Gnome Software", "Discover (KDE)"]
        );
        assert!(resolver.packages.installs.borrow().is_empty());
        assert!(resolver.launcher.launched.borrow().is_empty());
    }

    #[test]
    fn test_confirmed_choice_is_installed_then_launched() {
        let resolver = resolver(FakePackages::default());
        let prompt = FakePrompt::answering(Some(1));

        let result = resolver
            .resolve_and_launch("task_manager", &prompt)
            .unwrap();

        let Resolution::PromptedForInstall {
            installed: Some(candidate),
        } = result
        else {
            panic!("expected an install, got {:?}", result);
        };
        assert_eq!(candidate.package, "plasma-systemmonitor");
        assert_eq!(
            *resolver.packages.installs.borrow(),
            vec!["plasma-systemmonitor"]
        );
        assert_eq!(
            *resolver.launcher.launched.borrow(),
            vec!["org.kde.plasma-systemmonitor"]
        );
    }

    #[test]
    fn test_failed_install_still_launches() {
        let resolver = resolver(FakePackages {
            fail_install: true,
            ..FakePackages::default()
        });
        let prompt = FakePrompt::answering(Some(0));

        let result = resolver.resolve_and_launch("terminal", &prompt).unwrap();

        assert!(matches!(
            result,
            Resolution::PromptedForInstall { installed: Some(c) } if c.package == "gnome-terminal"
        ));
        assert_eq!(*resolver.packages.installs.borrow(), vec!["gnome-terminal"]);
        assert_eq!(
            *resolver.launcher.launched.borrow(),
            vec!["org.gnome.Terminal"]
        );
    }

    #[test]
    fn test_query_failure_counts_as_not_installed() {
        let mut packages = FakePackages::with(&["konsole"]);
        packages.broken.insert("gnome-terminal");
        let resolver = resolver(packages);
        let prompt = FakePrompt::answering(None);

        let result = resolver.resolve(Category::Terminal, &prompt).unwrap();
        assert!(matches!(result, Resolution::Launched(c) if c.exec == "org.kde.konsole"));
    }

    #[test]
    fn test_unknown_category_has_no_side_effects() {
        let resolver = resolver(FakePackages::with(&["konsole"]));
        let prompt = FakePrompt::answering(Some(0));

        let err = resolver.resolve_and_launch("bogus", &prompt).unwrap_err();

        assert!(matches!(err, ResolveError::UnknownCategory(ref c) if c == "bogus"));
        assert_eq!(prompt.shown.get(), 0);
        assert!(resolver.packages.installs.borrow().is_empty());
        assert!(resolver.launcher.launched.borrow().is_empty());
    }

    #[test]
    fn test_out_of_range_choice_is_a_cancel() {
        let resolver = resolver(FakePackages::default());
        let prompt = FakePrompt::answering(Some(42));

        let result = resolver.resolve(Category::Terminal, &prompt).unwrap();
        assert_eq!(result, Resolution::PromptedForInstall { installed: None });
        assert!(resolver.packages.installs.borrow().is_empty());
    }
}
