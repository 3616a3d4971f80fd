//! Compile expressions against a registry description

use serde_json::json;

use super::CliError;
use crate::{QueryBuilder, RegistryConfig, check_syntax, es::Query, lexer::Lexer, to_postfix};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The filter expression to compile
    pub expression: String,
    /// Field registry description
    pub registry: Option<RegistryConfig>,
    /// Only validate syntax, don't compile
    pub syntax_only: bool,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Expression compiled; holds `{"query": ..., "fields": [...]}`
    Success(serde_json::Value),
}

/// Execute an esfilter check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let expression = options.expression.trim();
    if expression.is_empty() {
        return Err(CliError::NoInput);
    }

    if options.syntax_only {
        let tokens = Lexer::new(expression).tokenize().map_err(crate::Error::from)?;
        check_syntax(&tokens).map_err(crate::Error::from)?;
        to_postfix(tokens).map_err(crate::Error::from)?;
        return Ok(CheckResult::SyntaxValid);
    }

    let description = options.registry.clone().ok_or(CliError::NoRegistry)?;
    let registry = description.into_registry()?;

    let builder = QueryBuilder::<Query>::new(expression, &registry)?;
    let (query, fields) = builder.build()?;

    Ok(CheckResult::Success(json!({
        "query": query.to_json(),
        "fields": fields,
    })))
}
