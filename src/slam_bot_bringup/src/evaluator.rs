//! Plan evaluator: resolves a `LaunchPlan` against launch arguments and produces records.

use crate::{
    error::{LaunchError, Result},
    package::PackageIndex,
    plan::{Action, ActionKind, IncludeArg, LaunchPlan},
    record::{CommandGenerator, IncludeRecord, RecordJson},
    substitution::{ArgumentMetadata, LaunchContext},
};
use std::collections::HashMap;
use std::path::Path;

pub struct PlanEvaluator<'a> {
    context: LaunchContext,
    generator: CommandGenerator<'a>,
    record: RecordJson,
}

impl<'a> PlanEvaluator<'a> {
    /// `cli_args` are the user's `name:=value` overrides.
    pub fn new(index: &'a PackageIndex, cli_args: HashMap<String, String>) -> Self {
        Self {
            context: LaunchContext::with_arguments(cli_args),
            generator: CommandGenerator::new(index),
            record: RecordJson::new(),
        }
    }

    pub fn evaluate(mut self, plan: &LaunchPlan) -> Result<RecordJson> {
        for action in &plan.entries {
            self.evaluate_action(action)?;
        }

        for name in self.context.configurations().keys() {
            if !self.context.is_declared(name) {
                log::warn!("Launch argument '{}' is not declared by the plan", name);
            }
        }

        log::info!(
            "Evaluated launch plan: {} nodes, {} includes",
            self.record.node.len(),
            self.record.include.len()
        );
        Ok(self.record)
    }

    /// Apply only the plan's argument declarations and return their metadata.
    pub fn declared_arguments(mut self, plan: &LaunchPlan) -> Result<Vec<ArgumentMetadata>> {
        for action in &plan.entries {
            if matches!(action.kind, ActionKind::DeclareArgument { .. }) {
                self.evaluate_action(action)?;
            }
        }
        Ok(self.context.declared_arguments().to_vec())
    }

    fn evaluate_action(&mut self, action: &Action) -> Result<()> {
        if let Some(ref condition) = action.condition {
            if !condition.evaluate(&self.context)? {
                log::debug!("Skipping {} due to condition", describe(&action.kind));
                return Ok(());
            }
        }

        match &action.kind {
            ActionKind::DeclareArgument {
                name,
                default,
                description,
                choices,
            } => {
                let resolved_default = default
                    .as_ref()
                    .map(|expr| expr.resolve(&self.context))
                    .transpose()?;

                // If arg not yet set, apply the default
                if self.context.get_configuration(name).is_none() {
                    if let Some(value) = &resolved_default {
                        self.context.set_configuration(name.clone(), value.clone());
                    }
                }

                if let (Some(choices), Some(value)) =
                    (choices, self.context.get_configuration(name))
                {
                    if !choices.contains(&value) {
                        return Err(LaunchError::InvalidChoice {
                            name: name.clone(),
                            value,
                            choices: choices.clone(),
                        });
                    }
                }

                self.context.declare_argument(ArgumentMetadata {
                    name: name.clone(),
                    default: resolved_default,
                    description: description.clone(),
                    choices: choices.clone(),
                });
            }

            ActionKind::Include { file, args } => {
                self.evaluate_include(file, args)?;
            }

            ActionKind::SpawnNode(node) => {
                let record = self.generator.generate_node_record(node, &self.context)?;
                self.record.node.push(record);
            }
        }

        Ok(())
    }

    fn evaluate_include(&mut self, file: &Path, args: &[IncludeArg]) -> Result<()> {
        let args = args
            .iter()
            .map(|arg| -> Result<(String, String)> {
                Ok((arg.name.clone(), arg.value.resolve(&self.context)?))
            })
            .collect::<Result<Vec<_>>>()?;

        log::debug!(
            "Deferring include {} to the launch executor",
            file.display()
        );
        self.record.include.push(IncludeRecord {
            file: file.display().to_string(),
            args,
        });
        Ok(())
    }
}

fn describe(kind: &ActionKind) -> String {
    match kind {
        ActionKind::DeclareArgument { name, .. } => format!("argument {}", name),
        ActionKind::Include { file, .. } => format!("include {}", file.display()),
        ActionKind::SpawnNode(node) => format!("node {}/{}", node.package, node.executable),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Condition;
    use crate::plan::NodeDescriptor;
    use crate::substitution::Expr;

    fn conditional_plan() -> LaunchPlan {
        LaunchPlan::new(vec![
            Action::new(ActionKind::DeclareArgument {
                name: "rviz".to_string(),
                default: Some(Expr::literal("true")),
                description: Some("Open RViz.".to_string()),
                choices: Some(vec!["true".to_string(), "false".to_string()]),
            }),
            Action::new(ActionKind::Include {
                file: "/share/ros_gz_sim/launch/gz_sim.launch.py".into(),
                args: vec![IncludeArg {
                    name: "gz_args".to_string(),
                    value: Expr::literal("-r -v 4 empty.sdf"),
                }],
            }),
            Action::new(ActionKind::SpawnNode(NodeDescriptor::new("rviz2", "rviz2")))
                .with_condition(Condition::If(Expr::var("rviz"))),
        ])
    }

    fn args(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_default_activates_rviz() {
        let index = PackageIndex::default();
        let record = PlanEvaluator::new(&index, HashMap::new())
            .evaluate(&conditional_plan())
            .unwrap();
        assert_eq!(record.node.len(), 1);
        assert_eq!(record.node[0].executable, "rviz2");
    }

    #[test]
    fn test_override_disables_rviz() {
        let index = PackageIndex::default();
        let record = PlanEvaluator::new(&index, args(&[("rviz", "false")]))
            .evaluate(&conditional_plan())
            .unwrap();
        assert!(record.node.is_empty());
        assert_eq!(record.include.len(), 1);
    }

    #[test]
    fn test_invalid_choice() {
        let index = PackageIndex::default();
        let err = PlanEvaluator::new(&index, args(&[("rviz", "maybe")]))
            .evaluate(&conditional_plan())
            .unwrap_err();
        assert!(matches!(err, LaunchError::InvalidChoice { ref value, .. } if value == "maybe"));
    }

    #[test]
    fn test_include_args_resolved() {
        let index = PackageIndex::default();
        let record = PlanEvaluator::new(&index, HashMap::new())
            .evaluate(&conditional_plan())
            .unwrap();
        assert_eq!(
            record.include[0],
            IncludeRecord {
                file: "/share/ros_gz_sim/launch/gz_sim.launch.py".to_string(),
                args: vec![("gz_args".to_string(), "-r -v 4 empty.sdf".to_string())],
            }
        );
    }

    #[test]
    fn test_undeclared_cli_argument_kept() {
        let mut plan = conditional_plan();
        plan.entries.push(
            Action::new(ActionKind::SpawnNode(NodeDescriptor::new("demo", "foo_off")))
                .with_condition(Condition::Unless(Expr::var("foo"))),
        );

        let index = PackageIndex::default();
        let baseline = PlanEvaluator::new(&index, args(&[("rviz", "false"), ("foo", "true")]))
            .evaluate(&plan)
            .unwrap();
        assert!(baseline.node.is_empty());

        // "bar" is falsy, so only the Unless-gated node is spawned
        let record = PlanEvaluator::new(&index, args(&[("foo", "bar"), ("rviz", "false")]))
            .evaluate(&plan)
            .unwrap();
        assert_eq!(record.node.len(), 1);
        assert_eq!(record.node[0].executable, "foo_off");
        assert_eq!(record.include, baseline.include);
    }

    #[test]
    fn test_undeclared_cli_argument_leaves_record_unchanged() {
        let index = PackageIndex::default();
        let without = PlanEvaluator::new(&index, args(&[("rviz", "false")]))
            .evaluate(&conditional_plan())
            .unwrap();
        let with = PlanEvaluator::new(&index, args(&[("foo", "bar"), ("rviz", "false")]))
            .evaluate(&conditional_plan())
            .unwrap();
        assert_eq!(with, without);
    }

    #[test]
    fn test_declared_arguments() {
        let index = PackageIndex::default();
        let declared = PlanEvaluator::new(&index, args(&[("rviz", "false")]))
            .declared_arguments(&conditional_plan())
            .unwrap();
        assert_eq!(declared.len(), 1);
        assert_eq!(declared[0].name, "rviz");
        assert_eq!(declared[0].default.as_deref(), Some("true"));
        assert_eq!(declared[0].description.as_deref(), Some("Open RViz."));
    }

    #[test]
    fn test_undeclared_condition_argument() {
        let plan = LaunchPlan::new(vec![Action::new(ActionKind::SpawnNode(
            NodeDescriptor::new("rviz2", "rviz2"),
        ))
        .with_condition(Condition::If(Expr::var("rviz")))]);

        let index = PackageIndex::default();
        let err = PlanEvaluator::new(&index, HashMap::new())
            .evaluate(&plan)
            .unwrap_err();
        assert!(matches!(err, LaunchError::UndefinedArgument(ref name) if name == "rviz"));
    }
}
