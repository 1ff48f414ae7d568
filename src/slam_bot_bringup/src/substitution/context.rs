//! Launch context for managing configurations

use std::collections::HashMap;

/// Metadata recorded for a declared launch argument.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentMetadata {
    pub name: String,
    pub default: Option<String>,
    pub description: Option<String>,
    pub choices: Option<Vec<String>>,
}

/// Launch context holding argument values and declarations
#[derive(Debug, Clone, Default)]
pub struct LaunchContext {
    configurations: HashMap<String, String>,
    declared_arguments: Vec<ArgumentMetadata>,
}

impl LaunchContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the context with user-supplied `name:=value` arguments.
    pub fn with_arguments(args: HashMap<String, String>) -> Self {
        Self {
            configurations: args,
            declared_arguments: Vec::new(),
        }
    }

    pub fn set_configuration(&mut self, name: String, value: String) {
        self.configurations.insert(name, value);
    }

    pub fn get_configuration(&self, name: &str) -> Option<String> {
        self.configurations.get(name).cloned()
    }

    pub fn configurations(&self) -> &HashMap<String, String> {
        &self.configurations
    }

    pub fn declare_argument(&mut self, metadata: ArgumentMetadata) {
        // Redeclaration replaces the earlier metadata
        self.declared_arguments.retain(|a| a.name != metadata.name);
        self.declared_arguments.push(metadata);
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.declared_arguments.iter().any(|a| a.name == name)
    }

    pub fn declared_arguments(&self) -> &[ArgumentMetadata] {
        &self.declared_arguments
    }
}
