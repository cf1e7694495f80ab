//! Host package manager access.
//!
//! - [`PackageManager`]: which native manager the distribution uses
//! - [`install::is_installed`] / [`install::install_package`]: query and
//!   elevated install, shelling out through `duct`

pub mod install;
mod manager;

pub use manager::PackageManager;
