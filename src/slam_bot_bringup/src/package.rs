//! Package location resolution against the ament resource index

use crate::config::BringupConfig;
use crate::error::{LaunchError, Result};
use std::path::{Path, PathBuf};

const PACKAGE_MARKER_DIR: &str = "share/ament_index/resource_index/packages";

/// Ordered list of install prefixes searched for packages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackageIndex {
    prefixes: Vec<PathBuf>,
}

impl PackageIndex {
    pub fn new(prefixes: Vec<PathBuf>) -> Self {
        Self { prefixes }
    }

    /// Build the index from `AMENT_PREFIX_PATH`. An unset variable yields an
    /// empty index, so every lookup fails with `PathResolution`.
    pub fn from_env() -> Self {
        let prefixes = std::env::var("AMENT_PREFIX_PATH")
            .map(|value| Self::split_prefix_path(&value))
            .unwrap_or_default();
        log::debug!("Package index prefixes: {:?}", prefixes);
        Self { prefixes }
    }

    fn split_prefix_path(value: &str) -> Vec<PathBuf> {
        value
            .split(':')
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .collect()
    }

    pub fn prefixes(&self) -> &[PathBuf] {
        &self.prefixes
    }

    /// Find the install prefix a package was registered under.
    pub fn find_prefix(&self, package: &str) -> Option<&Path> {
        self.prefixes
            .iter()
            .find(|prefix| prefix.join(PACKAGE_MARKER_DIR).join(package).is_file())
            .map(PathBuf::as_path)
    }

    /// `<prefix>/share/<package>` for the first prefix that registers `package`.
    pub fn find_share(&self, package: &str) -> Result<PathBuf> {
        match self.find_prefix(package) {
            Some(prefix) => {
                let share = prefix.join("share").join(package);
                log::debug!("Resolved package {} -> {}", package, share.display());
                Ok(share)
            }
            None => Err(LaunchError::PathResolution {
                package: package.to_string(),
                searched: self.searched(),
            }),
        }
    }

    /// `<prefix>/lib/<package>/<executable>`, if the package is indexed.
    pub fn find_executable(&self, package: &str, executable: &str) -> Option<PathBuf> {
        self.find_prefix(package)
            .map(|prefix| prefix.join("lib").join(package).join(executable))
    }

    fn searched(&self) -> String {
        if self.prefixes.is_empty() {
            return "<empty AMENT_PREFIX_PATH>".to_string();
        }
        self.prefixes
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(":")
    }
}

/// Share directories of the three packages the bringup reads from.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageLocations {
    pub bringup: PathBuf,
    pub description: PathBuf,
    pub simulator: PathBuf,
}

impl PackageLocations {
    pub fn resolve(config: &BringupConfig, index: &PackageIndex) -> Result<Self> {
        Ok(Self {
            bringup: index.find_share(&config.bringup_package)?,
            description: index.find_share(&config.description_package)?,
            simulator: index.find_share(&config.simulator_package)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn register(prefix: &Path, package: &str) {
        let marker_dir = prefix.join(PACKAGE_MARKER_DIR);
        std::fs::create_dir_all(&marker_dir).unwrap();
        std::fs::write(marker_dir.join(package), "").unwrap();
        std::fs::create_dir_all(prefix.join("share").join(package)).unwrap();
    }

    #[test]
    fn test_split_prefix_path() {
        let prefixes = PackageIndex::split_prefix_path("/ws/install/a::/opt/ros/jazzy");
        assert_eq!(
            prefixes,
            vec![PathBuf::from("/ws/install/a"), PathBuf::from("/opt/ros/jazzy")]
        );
    }

    #[test]
    fn test_find_share_first_prefix_wins() {
        let overlay = TempDir::new().unwrap();
        let underlay = TempDir::new().unwrap();
        register(overlay.path(), "ros_gz_sim");
        register(underlay.path(), "ros_gz_sim");

        let index = PackageIndex::new(vec![
            overlay.path().to_path_buf(),
            underlay.path().to_path_buf(),
        ]);
        assert_eq!(
            index.find_share("ros_gz_sim").unwrap(),
            overlay.path().join("share/ros_gz_sim")
        );
    }

    #[test]
    fn test_share_dir_without_marker_is_not_a_package() {
        let prefix = TempDir::new().unwrap();
        std::fs::create_dir_all(prefix.path().join("share/slam_bot_bringup")).unwrap();

        let index = PackageIndex::new(vec![prefix.path().to_path_buf()]);
        let err = index.find_share("slam_bot_bringup").unwrap_err();
        assert!(matches!(err, LaunchError::PathResolution { ref package, .. } if package == "slam_bot_bringup"));
    }

    #[test]
    fn test_empty_index() {
        let index = PackageIndex::default();
        let err = index.find_share("rviz2").unwrap_err();
        assert!(err.to_string().contains("<empty AMENT_PREFIX_PATH>"));
    }

    #[test]
    fn test_find_executable() {
        let prefix = TempDir::new().unwrap();
        register(prefix.path(), "rviz2");

        let index = PackageIndex::new(vec![prefix.path().to_path_buf()]);
        assert_eq!(
            index.find_executable("rviz2", "rviz2"),
            Some(prefix.path().join("lib/rviz2/rviz2"))
        );
        assert_eq!(index.find_executable("missing_pkg", "node"), None);
    }

    #[test]
    fn test_resolve_locations_fails_on_missing_package() {
        let prefix = TempDir::new().unwrap();
        register(prefix.path(), "slam_bot_bringup");
        register(prefix.path(), "slam_bot_description");

        let index = PackageIndex::new(vec![prefix.path().to_path_buf()]);
        let err = PackageLocations::resolve(&BringupConfig::default(), &index).unwrap_err();
        assert!(matches!(err, LaunchError::PathResolution { ref package, .. } if package == "ros_gz_sim"));
    }
}
