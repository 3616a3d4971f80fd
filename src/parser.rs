use thiserror::Error;

use crate::ast::{OPERATOR_SYMBOLS, Operator, PREFIX_SYMBOLS, Token, TokenKind};

/// Errors raised while reordering tokens into postfix form.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// A `)` with no `(` before it
    #[error("clause mismatch: `)` has no matching `(`")]
    ClauseMismatch,

    /// A `(` still open at the end of the expression
    #[error("mismatched parentheses found")]
    MismatchedParentheses,

    #[error("token of kind `{0}` carries no operator symbol")]
    NotAnOperator(TokenKind),

    #[error("unknown operator `{0}`")]
    UnknownOperator(String),
}

fn resolve(token: &Token) -> Result<Operator, ParseError> {
    let symbol = token
        .symbol()
        .ok_or_else(|| ParseError::NotAnOperator(token.kind()))?;
    let symbols = match token {
        Token::Prefix(_) => &*PREFIX_SYMBOLS,
        _ => &*OPERATOR_SYMBOLS,
    };
    symbols
        .get(symbol)
        .copied()
        .ok_or_else(|| ParseError::UnknownOperator(symbol.to_string()))
}

/// Reorders an infix token sequence into postfix (reverse Polish) order.
///
/// Operands go straight to the output. Operators wait on a stack until an
/// operator of lower precedence arrives; operators of equal precedence pop
/// first, so `a && b && c` groups from the left. A prefix waits on the same
/// stack and is emitted after the operand or group it precedes, so
/// `!(a == 1 && b == 2)` yields `a 1 == b 2 == && !`.
///
/// # Examples
///
/// ```
/// use esfilter::{Lexer, parser::to_postfix};
///
/// let tokens = Lexer::new("a == 1 || b == 2 && c == 3").tokenize().unwrap();
/// let postfix = to_postfix(tokens).unwrap();
/// let text: Vec<String> = postfix.iter().map(|t| t.to_string()).collect();
/// assert_eq!(text, ["a", "1", "==", "b", "2", "==", "c", "3", "==", "&&", "||"]);
/// ```
pub fn to_postfix(tokens: Vec<Token>) -> Result<Vec<Token>, ParseError> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut operators: Vec<Token> = Vec::new();

    for token in tokens {
        if let Token::Prefix(_) = token {
            operators.push(token);
            continue;
        }
        if !token.is_operator() {
            output.push(token);
            continue;
        }

        match token {
            Token::Clause => operators.push(token),
            Token::ClauseClose => loop {
                match operators.pop() {
                    Some(Token::Clause) => break,
                    Some(op) => output.push(op),
                    None => return Err(ParseError::ClauseMismatch),
                }
            },
            _ => {
                let precedence = resolve(&token)?.precedence();

                while let Some(top) = operators.last() {
                    if matches!(top, Token::Clause) || resolve(top)?.precedence() < precedence {
                        break;
                    }
                    if let Some(top) = operators.pop() {
                        output.push(top);
                    }
                }
                operators.push(token);
            }
        }
    }

    while let Some(op) = operators.pop() {
        if matches!(op, Token::Clause) {
            return Err(ParseError::MismatchedParentheses);
        }
        output.push(op);
    }

    tracing::debug!(len = output.len(), "converted expression to postfix");
    Ok(output)
}
