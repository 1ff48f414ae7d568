//! slam_bot bringup: launch plan for the Gazebo simulation of slam_bot

pub mod builder;
pub mod condition;
pub mod config;
pub mod description;
pub mod error;
pub mod evaluator;
pub mod package;
pub mod plan;
pub mod record;
pub mod substitution;

use builder::LaunchPlanBuilder;
use config::BringupConfig;
use error::Result;
use evaluator::PlanEvaluator;
use package::{PackageIndex, PackageLocations};
use plan::LaunchPlan;
use record::RecordJson;
use std::collections::HashMap;

/// Resolve the bringup packages and build the launch plan.
pub fn build_launch_plan(config: &BringupConfig, index: &PackageIndex) -> Result<LaunchPlan> {
    config.validate()?;
    let locations = PackageLocations::resolve(config, index)?;
    LaunchPlanBuilder::new(config, &locations).build()
}

/// Evaluate a plan with `name:=value` overrides into the executor's record.
pub fn evaluate_launch_plan(
    plan: &LaunchPlan,
    index: &PackageIndex,
    cli_args: HashMap<String, String>,
) -> Result<RecordJson> {
    PlanEvaluator::new(index, cli_args).evaluate(plan)
}
