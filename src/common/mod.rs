pub mod package;
pub mod paths;

pub use paths::AppPaths;
