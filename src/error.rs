use std::fmt;

use thiserror::Error;

use crate::{
    config::ConfigError, evaluator::BuildError, lexer::LexError, parser::ParseError,
    syntax::SyntaxError,
};

/// Any failure while compiling an expression. The first stage to fail
/// aborts the pipeline.
#[derive(Debug, Error)]
pub enum Error {
    #[error("lexical error: {0}")]
    Lex(#[from] LexError),

    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("build error: {0}")]
    Build(#[from] BuildError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unrecognized character, bad escape, unterminated string
    Lexical,
    /// Illegal token order, undefined function, unexpected end
    Syntax,
    /// Unbalanced parentheses
    Grouping,
    /// Operator symbol missing from the symbol tables
    OperatorResolution,
    /// Operand of the wrong shape beside an operator
    OperandType,
    /// Field or operator unknown to the registry
    FieldResolution,
    /// Too few operands, or not exactly one result
    StackIntegrity,
    Configuration,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Lex(_) => ErrorKind::Lexical,
            Error::Syntax(_) => ErrorKind::Syntax,
            Error::Parse(ParseError::ClauseMismatch | ParseError::MismatchedParentheses) => {
                ErrorKind::Grouping
            }
            Error::Parse(ParseError::NotAnOperator(_) | ParseError::UnknownOperator(_)) => {
                ErrorKind::OperatorResolution
            }
            Error::Build(err) => match err {
                BuildError::MissingOperands | BuildError::QueryBuildFailed { .. } => {
                    ErrorKind::StackIntegrity
                }
                BuildError::FieldOrValueInvalid
                | BuildError::NonLiteralOperand(_)
                | BuildError::NonQueryOperand(_)
                | BuildError::InvalidPrefix { .. } => ErrorKind::OperandType,
                BuildError::FieldNotSupported(_) | BuildError::OperatorNotSupported { .. } => {
                    ErrorKind::FieldResolution
                }
                BuildError::UnknownOperator(_) | BuildError::UnsupportedLogical(_) => {
                    ErrorKind::OperatorResolution
                }
            },
            Error::Config(_) => ErrorKind::Configuration,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Lexical => "lexical",
            ErrorKind::Syntax => "syntax",
            ErrorKind::Grouping => "grouping",
            ErrorKind::OperatorResolution => "operator resolution",
            ErrorKind::OperandType => "operand type",
            ErrorKind::FieldResolution => "field resolution",
            ErrorKind::StackIntegrity => "stack integrity",
            ErrorKind::Configuration => "configuration",
        };
        f.write_str(name)
    }
}
