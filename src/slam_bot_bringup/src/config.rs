//! Bringup configuration
//!
//! Every constant the launch plan depends on lives here, so a deployment can
//! override package names, model paths and the `rviz` default from a YAML
//! file instead of editing the builder.

use crate::error::{LaunchError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BringupConfig {
    /// Package holding the bridge config and the RViz layout.
    pub bringup_package: String,
    /// Package holding the robot model.
    pub description_package: String,
    /// Package providing the Gazebo launch file and the `create` spawner.
    pub simulator_package: String,

    /// Model path relative to the description package share directory.
    pub model_file: PathBuf,
    /// Absolute path to the robot description. Takes precedence over
    /// `model_file` when set.
    pub robot_description: Option<PathBuf>,

    /// Simulator launch file relative to the simulator package.
    pub simulator_launch_file: PathBuf,
    pub gz_args: String,

    pub entity_name: String,
    pub allow_renaming: bool,
    pub use_sim_time: bool,

    /// Bridge topic mapping, relative to the bringup package.
    pub bridge_config: PathBuf,
    /// RViz layout, relative to the bringup package.
    pub rviz_config: PathBuf,
    /// Default for the `rviz` launch argument.
    #[serde(deserialize_with = "bool_or_string")]
    pub rviz: String,
}

impl Default for BringupConfig {
    fn default() -> Self {
        Self {
            bringup_package: "slam_bot_bringup".to_string(),
            description_package: "slam_bot_description".to_string(),
            simulator_package: "ros_gz_sim".to_string(),
            model_file: PathBuf::from("models/slam_bot/model.sdf"),
            robot_description: None,
            simulator_launch_file: PathBuf::from("launch/gz_sim.launch.py"),
            gz_args: "-r -v 4 empty.sdf".to_string(),
            entity_name: "slam_bot".to_string(),
            allow_renaming: true,
            use_sim_time: true,
            bridge_config: PathBuf::from("config/slam_bot_bridge.yaml"),
            rviz_config: PathBuf::from("config/slam_bot.rviz"),
            rviz: "true".to_string(),
        }
    }
}

impl BringupConfig {
    /// Load a configuration from YAML. Keys that are left out keep their defaults.
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| LaunchError::file_access(path, e))?;
        let config = Self::from_yaml_str(&content)?;
        log::debug!("Loaded bringup configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        // An empty document means "all defaults"
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| LaunchError::InvalidConfig(format!("YAML parse error: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let names = [
            ("bringup_package", self.bringup_package.as_str()),
            ("description_package", self.description_package.as_str()),
            ("simulator_package", self.simulator_package.as_str()),
            ("entity_name", self.entity_name.as_str()),
        ];
        for (key, value) in names {
            if value.trim().is_empty() {
                return Err(LaunchError::InvalidConfig(format!("'{}' is empty", key)));
            }
        }

        let relative = [
            ("model_file", &self.model_file),
            ("simulator_launch_file", &self.simulator_launch_file),
            ("bridge_config", &self.bridge_config),
            ("rviz_config", &self.rviz_config),
        ];
        for (key, path) in relative {
            if path.as_os_str().is_empty() {
                return Err(LaunchError::InvalidConfig(format!("'{}' is empty", key)));
            }
            if path.is_absolute() {
                return Err(LaunchError::InvalidConfig(format!(
                    "'{}' must be relative to its package, got {}",
                    key,
                    path.display()
                )));
            }
        }

        if let Some(path) = &self.robot_description {
            if !path.is_absolute() {
                return Err(LaunchError::InvalidConfig(format!(
                    "'robot_description' must be an absolute path, got {}",
                    path.display()
                )));
            }
        }

        Ok(())
    }
}

/// Accept `rviz: false` and `rviz: "false"`; a null value keeps the default.
fn bool_or_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    Ok(match Option::<BoolOrString>::deserialize(deserializer)? {
        Some(BoolOrString::Bool(b)) => b.to_string(),
        Some(BoolOrString::String(s)) => s,
        None => BringupConfig::default().rviz,
    })
}
