//! Launch plan
//!
//! The ordered, unevaluated list of actions handed to the launch executor.
//! Argument references and conditions stay symbolic; they are resolved by
//! [`crate::evaluator::PlanEvaluator`] or by the executor itself.

use crate::condition::Condition;
use crate::substitution::Expr;
use serde::Serialize;
use std::path::PathBuf;

/// A single action with an optional activation condition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Action {
    pub kind: ActionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
}

impl Action {
    pub fn new(kind: ActionKind) -> Self {
        Self {
            kind,
            condition: None,
        }
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ActionKind {
    /// Declares a user-overridable launch argument.
    DeclareArgument {
        name: String,
        default: Option<Expr>,
        description: Option<String>,
        choices: Option<Vec<String>>,
    },

    /// Includes another launch description, passing it arguments.
    Include {
        file: PathBuf,
        args: Vec<IncludeArg>,
    },

    /// Spawns a ROS 2 node.
    SpawnNode(NodeDescriptor),
}

/// An argument passed to an included launch description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncludeArg {
    pub name: String,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeDescriptor {
    pub package: String,
    pub executable: String,
    pub name: Option<String>,
    /// Command-line arguments, in order.
    pub arguments: Vec<Expr>,
    pub parameters: Vec<ParamDecl>,
    pub output: Option<OutputPolicy>,
}

impl NodeDescriptor {
    pub fn new(package: impl Into<String>, executable: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            executable: executable.into(),
            name: None,
            arguments: Vec::new(),
            parameters: Vec::new(),
            output: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn args<I, E>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Expr>,
    {
        self.arguments.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn param(mut self, name: impl Into<String>, value: ParamValue) -> Self {
        self.parameters.push(ParamDecl {
            name: name.into(),
            value,
        });
        self
    }

    pub fn output(mut self, output: OutputPolicy) -> Self {
        self.output = Some(output);
        self
    }

    /// Value of an inline parameter, if declared.
    pub fn parameter(&self, name: &str) -> Option<&ParamValue> {
        self.parameters
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.value)
    }
}

/// Where a node's stdout/stderr goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputPolicy {
    Screen,
    Log,
    Both,
}

impl OutputPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputPolicy::Screen => "screen",
            OutputPolicy::Log => "log",
            OutputPolicy::Both => "both",
        }
    }
}

/// An inline node parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamDecl {
    pub name: String,
    pub value: ParamValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    String(String),
}

impl ParamValue {
    /// Render as it appears after `-p name:=` on a ROS command line.
    pub fn to_ros_arg(&self) -> String {
        match self {
            ParamValue::Bool(b) => b.to_string(),
            ParamValue::String(s) => s.clone(),
        }
    }
}

/// The complete, ordered launch plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LaunchPlan {
    pub entries: Vec<Action>,
}

impl LaunchPlan {
    pub fn new(entries: Vec<Action>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Declared argument names, in declaration order.
    pub fn arguments(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter_map(|a| match &a.kind {
                ActionKind::DeclareArgument { name, .. } => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Node-spawning actions, in order.
    pub fn nodes(&self) -> Vec<&Action> {
        self.entries
            .iter()
            .filter(|a| matches!(a.kind, ActionKind::SpawnNode(_)))
            .collect()
    }

    /// First node spawned from `package`/`executable`.
    pub fn find_node(&self, package: &str, executable: &str) -> Option<&Action> {
        self.entries.iter().find(|a| match &a.kind {
            ActionKind::SpawnNode(node) => node.package == package && node.executable == executable,
            _ => false,
        })
    }

    pub fn includes(&self) -> Vec<&Action> {
        self.entries
            .iter()
            .filter(|a| matches!(a.kind, ActionKind::Include { .. }))
            .collect()
    }

    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
