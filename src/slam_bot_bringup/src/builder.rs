//! Launch plan builder for the slam_bot simulation

use crate::{
    condition::Condition,
    config::BringupConfig,
    description::RobotDescription,
    error::Result,
    package::PackageLocations,
    plan::{Action, ActionKind, IncludeArg, LaunchPlan, NodeDescriptor, OutputPolicy, ParamValue},
    substitution::Expr,
};
use std::path::PathBuf;

pub const RVIZ_ARG: &str = "rviz";

/// Assembles the bringup launch plan from resolved package locations.
///
/// Building reads the robot description once and never starts a process.
/// Either the whole plan is returned or an error is, never a partial plan.
pub struct LaunchPlanBuilder<'a> {
    config: &'a BringupConfig,
    locations: &'a PackageLocations,
}

impl<'a> LaunchPlanBuilder<'a> {
    pub fn new(config: &'a BringupConfig, locations: &'a PackageLocations) -> Self {
        Self { config, locations }
    }

    /// Path the robot description is read from.
    pub fn robot_description_path(&self) -> PathBuf {
        match &self.config.robot_description {
            Some(path) => path.clone(),
            None => self.locations.description.join(&self.config.model_file),
        }
    }

    pub fn build(&self) -> Result<LaunchPlan> {
        let robot_desc = RobotDescription::load(&self.robot_description_path())?;

        let entries = vec![
            self.rviz_argument(),
            self.simulator(),
            self.bridge(),
            self.spawn_robot(&robot_desc),
            self.robot_state_publisher(&robot_desc),
            self.rviz(),
        ];

        let plan = LaunchPlan::new(entries);
        log::info!(
            "Built launch plan: {} arguments, {} includes, {} nodes",
            plan.arguments().len(),
            plan.includes().len(),
            plan.nodes().len()
        );
        Ok(plan)
    }

    fn rviz_argument(&self) -> Action {
        Action::new(ActionKind::DeclareArgument {
            name: RVIZ_ARG.to_string(),
            default: Some(Expr::literal(self.config.rviz.clone())),
            description: Some("Open RViz.".to_string()),
            choices: None,
        })
    }

    fn simulator(&self) -> Action {
        let file = self
            .locations
            .simulator
            .join(&self.config.simulator_launch_file);
        Action::new(ActionKind::Include {
            file,
            args: vec![IncludeArg {
                name: "gz_args".to_string(),
                value: Expr::literal(self.config.gz_args.clone()),
            }],
        })
    }

    fn bridge(&self) -> Action {
        let config_file = self.locations.bringup.join(&self.config.bridge_config);
        let node = NodeDescriptor::new("ros_gz_bridge", "parameter_bridge")
            .name("parameter_bridge")
            .args([
                "--ros-args".to_string(),
                "-p".to_string(),
                format!("config_file:={}", config_file.display()),
            ])
            .output(OutputPolicy::Screen);
        Action::new(ActionKind::SpawnNode(node))
    }

    fn spawn_robot(&self, robot_desc: &RobotDescription) -> Action {
        let node = NodeDescriptor::new("ros_gz_sim", "create")
            .args([
                "-string".to_string(),
                robot_desc.as_str().to_string(),
                "-name".to_string(),
                self.config.entity_name.clone(),
                "-allow_renaming".to_string(),
                self.config.allow_renaming.to_string(),
            ])
            .output(OutputPolicy::Screen);
        Action::new(ActionKind::SpawnNode(node))
    }

    fn robot_state_publisher(&self, robot_desc: &RobotDescription) -> Action {
        let node = NodeDescriptor::new("robot_state_publisher", "robot_state_publisher")
            .name("robot_state_publisher")
            .param("use_sim_time", ParamValue::Bool(self.config.use_sim_time))
            .param(
                "robot_description",
                ParamValue::String(robot_desc.as_str().to_string()),
            )
            .output(OutputPolicy::Both);
        Action::new(ActionKind::SpawnNode(node))
    }

    fn rviz(&self) -> Action {
        let layout = self.locations.bringup.join(&self.config.rviz_config);
        let node = NodeDescriptor::new("rviz2", "rviz2")
            .args(["-d".to_string(), layout.display().to_string()]);
        Action::new(ActionKind::SpawnNode(node)).with_condition(Condition::If(Expr::var(RVIZ_ARG)))
    }
}
