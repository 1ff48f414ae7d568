//! Command-line and record generation

use crate::error::Result;
use crate::package::PackageIndex;
use crate::plan::NodeDescriptor;
use crate::record::types::NodeRecord;
use crate::substitution::LaunchContext;

/// Turns node descriptors into the records the launch executor consumes.
pub struct CommandGenerator<'a> {
    index: &'a PackageIndex,
}

impl<'a> CommandGenerator<'a> {
    pub fn new(index: &'a PackageIndex) -> Self {
        Self { index }
    }

    pub fn generate_node_record(
        &self,
        node: &NodeDescriptor,
        context: &LaunchContext,
    ) -> Result<NodeRecord> {
        let name = node
            .name
            .clone()
            .unwrap_or_else(|| node.executable.clone());

        let args = node
            .arguments
            .iter()
            .map(|a| a.resolve(context))
            .collect::<Result<Vec<_>>>()?;

        let params: Vec<(String, String)> = node
            .parameters
            .iter()
            .map(|p| (p.name.clone(), p.value.to_ros_arg()))
            .collect();

        let cmd = self.generate_node_command(node, &name, &args, &params);

        Ok(NodeRecord {
            executable: node.executable.clone(),
            package: node.package.clone(),
            name,
            namespace: "/".to_string(),
            output: node.output.map(|o| o.as_str().to_string()),
            params,
            args: if args.is_empty() { None } else { Some(args) },
            cmd,
        })
    }

    fn generate_node_command(
        &self,
        node: &NodeDescriptor,
        name: &str,
        args: &[String],
        params: &[(String, String)],
    ) -> Vec<String> {
        let mut cmd = Vec::new();

        // 1. Executable path
        cmd.push(self.resolve_executable_path(&node.package, &node.executable));

        // 2. User arguments precede the ROS arguments
        cmd.extend(args.iter().cloned());

        // 3. ROS args delimiter, node name and namespace
        cmd.push("--ros-args".to_string());
        cmd.push("-r".to_string());
        cmd.push(format!("__node:={}", name));
        cmd.push("-r".to_string());
        cmd.push("__ns:=/".to_string());

        // 4. Parameters
        for (param, value) in params {
            cmd.push("-p".to_string());
            cmd.push(format!("{}:={}", param, value));
        }

        cmd
    }

    fn resolve_executable_path(&self, package: &str, executable: &str) -> String {
        match self.index.find_executable(package, executable) {
            Some(path) => path.display().to_string(),
            None => {
                log::warn!(
                    "Package {} not in index, leaving executable {} to PATH lookup",
                    package,
                    executable
                );
                executable.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LaunchError;
    use crate::plan::{OutputPolicy, ParamValue};
    use crate::substitution::Expr;

    #[test]
    fn test_generate_simple_command() {
        let index = PackageIndex::default();
        let node = NodeDescriptor::new("rviz2", "rviz2").args(["-d", "/cfg/slam_bot.rviz"]);

        let record = CommandGenerator::new(&index)
            .generate_node_record(&node, &LaunchContext::new())
            .unwrap();

        assert_eq!(record.name, "rviz2");
        assert_eq!(record.namespace, "/");
        assert_eq!(record.output, None);
        assert_eq!(
            record.cmd,
            vec![
                "rviz2",
                "-d",
                "/cfg/slam_bot.rviz",
                "--ros-args",
                "-r",
                "__node:=rviz2",
                "-r",
                "__ns:=/"
            ]
        );
    }

    #[test]
    fn test_generate_command_with_params() {
        let index = PackageIndex::default();
        let node = NodeDescriptor::new("robot_state_publisher", "robot_state_publisher")
            .name("robot_state_publisher")
            .param("use_sim_time", ParamValue::Bool(true))
            .param("robot_description", ParamValue::String("<robot/>".to_string()))
            .output(OutputPolicy::Both);

        let record = CommandGenerator::new(&index)
            .generate_node_record(&node, &LaunchContext::new())
            .unwrap();

        assert_eq!(record.args, None);
        assert_eq!(record.output.as_deref(), Some("both"));
        assert_eq!(
            record.params,
            vec![
                ("use_sim_time".to_string(), "true".to_string()),
                ("robot_description".to_string(), "<robot/>".to_string()),
            ]
        );
        assert!(record.cmd.contains(&"use_sim_time:=true".to_string()));
        assert!(record.cmd.contains(&"robot_description:=<robot/>".to_string()));
    }

    #[test]
    fn test_resolves_argument_references() {
        let index = PackageIndex::default();
        let node = NodeDescriptor::new("demo", "node").args([Expr::var("world")]);

        let mut context = LaunchContext::new();
        context.set_configuration("world".to_string(), "empty.sdf".to_string());
        let record = CommandGenerator::new(&index)
            .generate_node_record(&node, &context)
            .unwrap();
        assert_eq!(record.args, Some(vec!["empty.sdf".to_string()]));

        let err = CommandGenerator::new(&index)
            .generate_node_record(&node, &LaunchContext::new())
            .unwrap_err();
        assert!(matches!(err, LaunchError::UndefinedArgument(_)));
    }

    #[test]
    fn test_indexed_executable_path() {
        let prefix = tempfile::TempDir::new().unwrap();
        let marker_dir = prefix
            .path()
            .join("share/ament_index/resource_index/packages");
        std::fs::create_dir_all(&marker_dir).unwrap();
        std::fs::write(marker_dir.join("ros_gz_bridge"), "").unwrap();

        let index = PackageIndex::new(vec![prefix.path().to_path_buf()]);
        let node = NodeDescriptor::new("ros_gz_bridge", "parameter_bridge");
        let record = CommandGenerator::new(&index)
            .generate_node_record(&node, &LaunchContext::new())
            .unwrap();

        assert_eq!(
            record.cmd[0],
            prefix
                .path()
                .join("lib/ros_gz_bridge/parameter_bridge")
                .display()
                .to_string()
        );
    }
}
