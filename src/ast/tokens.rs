use std::fmt;

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;

use crate::value::Value;

/// Kind of a lexical token.
///
/// `Unknown` never appears on a scanned token; it names the state the
/// syntax checker starts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Unknown,
    Prefix,
    Numeric,
    Boolean,
    String,
    Time,
    Variable,
    Comparator,
    Logical,
    Clause,
    ClauseClose,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Unknown => "unknown",
            TokenKind::Prefix => "prefix",
            TokenKind::Numeric => "numeric",
            TokenKind::Boolean => "boolean",
            TokenKind::String => "string",
            TokenKind::Time => "time",
            TokenKind::Variable => "variable",
            TokenKind::Comparator => "comparator",
            TokenKind::Logical => "logical",
            TokenKind::Clause => "clause",
            TokenKind::ClauseClose => "clause_close",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Unary prefix operator
    ///
    /// # Examples
    /// ```text
    /// -1
    /// !(status == "up")
    /// ~7
    /// ```
    Prefix(String),

    /// Decimal number
    ///
    /// # Examples
    /// ```text
    /// 42
    /// 3.14
    /// ```
    Numeric(Decimal),

    /// Boolean values
    ///
    /// # Examples
    /// ```text
    /// true
    /// false
    /// ```
    Boolean(bool),

    /// Quoted string literal, single or double quotes
    ///
    /// # Examples
    /// ```text
    /// "1.1.1.1"
    /// '登录'
    /// ```
    String(String),

    /// Quoted string whose content is a date or timestamp
    ///
    /// # Examples
    /// ```text
    /// "2024-03-01"
    /// "2024-03-01T08:00:00+08:00"
    /// ```
    Time {
        at: DateTime<FixedOffset>,
        /// Spelling inside the quotes
        text: String,
    },

    /// Field reference
    ///
    /// Bare identifiers may contain dots for nested paths. Field names with
    /// other characters can be written in brackets.
    ///
    /// # Examples
    /// ```text
    /// ip
    /// nest.port
    /// [http status]
    /// ```
    Variable(String),

    /// Comparison operator: `==`, `!=`, `>`, `<`, `>=`, `<=`
    Comparator(String),

    /// Logical operator: `&&`, `||`
    Logical(String),

    /// Opening parenthesis
    Clause,

    /// Closing parenthesis
    ClauseClose,
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Prefix(_) => TokenKind::Prefix,
            Token::Numeric(_) => TokenKind::Numeric,
            Token::Boolean(_) => TokenKind::Boolean,
            Token::String(_) => TokenKind::String,
            Token::Time { .. } => TokenKind::Time,
            Token::Variable(_) => TokenKind::Variable,
            Token::Comparator(_) => TokenKind::Comparator,
            Token::Logical(_) => TokenKind::Logical,
            Token::Clause => TokenKind::Clause,
            Token::ClauseClose => TokenKind::ClauseClose,
        }
    }

    /// Comparators, logical operators and parentheses are operators;
    /// everything else, prefixes included, is an operand.
    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            Token::Comparator(_) | Token::Logical(_) | Token::Clause | Token::ClauseClose
        )
    }

    /// Whether the token carries a payload. Only parentheses do not.
    pub fn has_value(&self) -> bool {
        !matches!(self, Token::Clause | Token::ClauseClose)
    }

    /// Raw symbol text of an operator or prefix token.
    pub fn symbol(&self) -> Option<&str> {
        match self {
            Token::Prefix(s) | Token::Comparator(s) | Token::Logical(s) => Some(s),
            _ => None,
        }
    }

    /// Literal payload of a numeric, boolean, string or time token.
    pub fn literal(&self) -> Option<Value> {
        match self {
            Token::Numeric(n) => Some(Value::Numeric(*n)),
            Token::Boolean(b) => Some(Value::Boolean(*b)),
            Token::String(s) => Some(Value::String(s.clone())),
            Token::Time { at, text } => Some(Value::Time {
                at: *at,
                text: text.clone(),
            }),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Prefix(s) | Token::Comparator(s) | Token::Logical(s) => f.write_str(s),
            Token::Numeric(n) => write!(f, "{n}"),
            Token::Boolean(b) => write!(f, "{b}"),
            Token::String(s) => write!(f, "{s:?}"),
            Token::Time { text, .. } => write!(f, "{text:?}"),
            Token::Variable(name) => f.write_str(name),
            Token::Clause => f.write_str("("),
            Token::ClauseClose => f.write_str(")"),
        }
    }
}
