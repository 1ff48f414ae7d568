//! Substitution types

use crate::error::LaunchError;
use crate::substitution::context::LaunchContext;
use serde::Serialize;

/// A single piece of a launch-time string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Substitution {
    /// Plain text (no substitution)
    Text(String),
    /// $(var name) - Launch configuration variable
    LaunchConfiguration(String),
}

impl Substitution {
    /// Resolve substitution to string value
    pub fn resolve(&self, context: &LaunchContext) -> Result<String, LaunchError> {
        match self {
            Substitution::Text(s) => Ok(s.clone()),
            Substitution::LaunchConfiguration(name) => context
                .get_configuration(name)
                .ok_or_else(|| LaunchError::UndefinedArgument(name.clone())),
        }
    }
}

/// Resolve list of substitutions to single string
pub fn resolve_substitutions(
    subs: &[Substitution],
    context: &LaunchContext,
) -> Result<String, LaunchError> {
    let mut result = String::new();
    for sub in subs {
        result.push_str(&sub.resolve(context)?);
    }
    Ok(result)
}

/// A lazy string expression, resolved only when the plan is interpreted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Expr(pub Vec<Substitution>);

impl Expr {
    pub fn literal(s: impl Into<String>) -> Self {
        Expr(vec![Substitution::Text(s.into())])
    }

    /// `$(var name)`
    pub fn var(name: impl Into<String>) -> Self {
        Expr(vec![Substitution::LaunchConfiguration(name.into())])
    }

    /// If this expression is a single literal, return its value.
    pub fn as_literal(&self) -> Option<&str> {
        match self.0.as_slice() {
            [Substitution::Text(s)] => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn resolve(&self, context: &LaunchContext) -> Result<String, LaunchError> {
        resolve_substitutions(&self.0, context)
    }
}

impl From<&str> for Expr {
    fn from(s: &str) -> Self {
        Expr::literal(s)
    }
}

impl From<String> for Expr {
    fn from(s: String) -> Self {
        Expr::literal(s)
    }
}

impl From<Vec<Substitution>> for Expr {
    fn from(subs: Vec<Substitution>) -> Self {
        Expr(subs)
    }
}
