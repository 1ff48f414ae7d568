//! Activation conditions for launch actions

use crate::{
    error::Result,
    substitution::{Expr, LaunchContext},
};
use serde::Serialize;

/// Predicate gating an action, evaluated when the plan is interpreted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Active when the expression is truthy.
    If(Expr),
    /// Active when the expression is falsy.
    Unless(Expr),
}

impl Condition {
    pub fn evaluate(&self, context: &LaunchContext) -> Result<bool> {
        match self {
            Condition::If(expr) => Ok(is_truthy(&expr.resolve(context)?)),
            Condition::Unless(expr) => Ok(!is_truthy(&expr.resolve(context)?)),
        }
    }
}

/// Determine if a string value is "truthy"
pub fn is_truthy(value: &str) -> bool {
    let normalized = value.trim().to_lowercase();
    matches!(
        normalized.as_str(),
        "true" | "1" | "yes" | "y" | "on" | "enabled"
    )
}
