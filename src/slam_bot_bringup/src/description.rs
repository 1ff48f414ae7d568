//! Robot description document loading

use crate::error::{LaunchError, Result};
use std::path::Path;

/// The SDF model of the robot, kept exactly as it was read from disk.
///
/// The same text is handed to the spawner and to the state publisher, so it
/// is never trimmed or re-serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotDescription {
    content: String,
}

impl RobotDescription {
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| LaunchError::file_access(path, e))?;
        log::debug!(
            "Loaded robot description {} ({} bytes)",
            path.display(),
            content.len()
        );
        Ok(Self { content })
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }
}
