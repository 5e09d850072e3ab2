//! Variable interpolation for step commands.
//!
//! # Syntax
//!
//! - `${variable_name}` - replaced with the variable value
//! - `$${escaped}` - produces literal `${escaped}` in output
//!
//! ```yaml
//! command: "rm -rf ${bridge}/build/macos"
//! # With bridge="bridge", produces: rm -rf bridge/build/macos
//! ```

use crate::error::{BuildseqError, Result};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// A segment of an interpolated string.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Literal text
    Literal(String),
    /// Variable reference: ${name}
    Variable(String),
}

/// Parse a string containing `${var}` interpolations into segments.
///
/// # Errors
///
/// Returns `ConfigValidationError` if a `${` is never closed.
pub fn parse_interpolation(input: &str) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut chars = input.chars().peekable();
    let mut literal = String::new();

    while let Some(c) = chars.next() {
        if c != '$' {
            literal.push(c);
            continue;
        }

        match chars.peek() {
            Some('$') => {
                chars.next();
                if chars.peek() == Some(&'{') {
                    // $${...} -> literal ${...}
                    chars.next();
                    literal.push_str("${");
                    for c in chars.by_ref() {
                        literal.push(c);
                        if c == '}' {
                            break;
                        }
                    }
                } else {
                    literal.push('$');
                }
            }
            Some('{') => {
                chars.next();
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }

                let mut name = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    name.push(c);
                }
                if !closed {
                    return Err(BuildseqError::ConfigValidationError {
                        message: format!("Unterminated variable reference in '{}'", input),
                    });
                }
                segments.push(Segment::Variable(name));
            }
            _ => literal.push(c),
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }

    Ok(segments)
}

/// Extract all variable names from an interpolated string.
pub fn extract_variables(input: &str) -> Result<HashSet<String>> {
    Ok(parse_interpolation(input)?
        .into_iter()
        .filter_map(|seg| match seg {
            Segment::Variable(name) => Some(name),
            Segment::Literal(_) => None,
        })
        .collect())
}

/// Context for variable resolution.
///
/// Variables are resolved in priority order:
/// 1. Config `vars`
/// 2. Environment variables
/// 3. Built-in variables (`project_root`, `buildseq_version`)
#[derive(Debug, Default)]
pub struct InterpolationContext {
    /// Variables declared in the config file
    pub vars: HashMap<String, String>,

    /// Environment variables
    pub env: HashMap<String, String>,

    /// Built-in variables
    pub builtins: HashMap<String, String>,
}

impl InterpolationContext {
    /// Create a new context with built-in variables.
    pub fn new() -> Self {
        let mut builtins = HashMap::new();
        builtins.insert(
            "buildseq_version".to_string(),
            env!("CARGO_PKG_VERSION").to_string(),
        );

        Self {
            builtins,
            ..Default::default()
        }
    }

    /// Add the project root to builtins.
    pub fn with_project_root(mut self, root: &Path) -> Self {
        self.builtins
            .insert("project_root".to_string(), root.display().to_string());
        self
    }

    /// Set config-declared variables.
    pub fn with_vars(mut self, vars: HashMap<String, String>) -> Self {
        self.vars = vars;
        self
    }

    /// Set environment variables.
    pub fn with_env(mut self, env: HashMap<String, String>) -> Self {
        self.env = env;
        self
    }

    /// Resolve a variable name to its value.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.vars
            .get(name)
            .or_else(|| self.env.get(name))
            .or_else(|| self.builtins.get(name))
            .map(String::as_str)
    }
}

/// Resolve all variables in an interpolated string.
///
/// # Errors
///
/// Returns `ConfigValidationError` if any variable is not found in the context
/// or a `${` is never closed.
pub fn resolve_string(input: &str, context: &InterpolationContext) -> Result<String> {
    let mut result = String::new();

    for segment in parse_interpolation(input)? {
        match segment {
            Segment::Literal(text) => result.push_str(&text),
            Segment::Variable(name) => {
                let value =
                    context
                        .resolve(&name)
                        .ok_or_else(|| BuildseqError::ConfigValidationError {
                            message: format!("Unresolved variable: ${{{}}}", name),
                        })?;
                result.push_str(value);
            }
        }
    }

    Ok(result)
}
