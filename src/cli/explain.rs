//! Show how an expression is tokenized and reordered

use std::fmt;

use super::CliError;
use crate::{Token, TokenKind, check_syntax, lexer::Lexer, to_postfix};

/// Token and postfix views of a valid expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Explanation {
    pub tokens: Vec<Token>,
    pub postfix: Vec<Token>,
}

impl Explanation {
    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens.iter().map(Token::kind).collect()
    }
}

impl fmt::Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "tokens:")?;
        for token in &self.tokens {
            writeln!(f, "  {:<12} {}", token.kind().to_string(), token)?;
        }
        let postfix: Vec<String> = self.postfix.iter().map(Token::to_string).collect();
        writeln!(f, "postfix:")?;
        writeln!(f, "  {}", postfix.join(" "))
    }
}

/// Scan, check and reorder `expression` without compiling it.
pub fn explain(expression: &str) -> Result<Explanation, CliError> {
    let tokens = Lexer::new(expression).tokenize().map_err(crate::Error::from)?;
    check_syntax(&tokens).map_err(crate::Error::from)?;
    let postfix = to_postfix(tokens.clone()).map_err(crate::Error::from)?;
    Ok(Explanation { tokens, postfix })
}
