//! Token-sequence grammar check.
//!
//! A fixed state machine over [`TokenKind`]s decides whether each token may
//! follow the previous one and whether the expression may end where it does.
//! It runs before the precedence parser so malformed input never reaches it.

use thiserror::Error;

use crate::ast::{Token, TokenKind};

use TokenKind as K;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyntaxError {
    #[error("undefined function `{0}`")]
    UndefinedFunction(String),

    #[error("cannot transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("token kind `{0}` cannot have an empty value")]
    NilValue(TokenKind),

    #[error("unexpected end of expression")]
    UnexpectedEnd,
}

/// What may follow a token of `kind`, and whether an expression may stop there.
#[derive(Debug)]
pub struct LexerState {
    pub kind: TokenKind,
    pub is_eof: bool,
    pub is_nullable: bool,
    pub valid_next_kinds: &'static [TokenKind],
}

impl LexerState {
    pub fn can_transition_to(&self, kind: TokenKind) -> bool {
        self.valid_next_kinds.contains(&kind)
    }
}

const VALUE_STARTS: &[TokenKind] = &[
    K::Prefix,
    K::Numeric,
    K::Boolean,
    K::Variable,
    K::String,
    K::Time,
    K::Clause,
];
const AFTER_OPERATOR: &[TokenKind] = &[
    K::Prefix,
    K::Numeric,
    K::Boolean,
    K::Variable,
    K::String,
    K::Time,
    K::Clause,
    K::ClauseClose,
];
const AFTER_VALUE: &[TokenKind] = &[K::Comparator, K::Logical, K::ClauseClose];

/// The transition table. The first entry is the start state.
pub static LEXER_STATES: [LexerState; 11] = [
    LexerState {
        kind: K::Unknown,
        is_eof: false,
        is_nullable: true,
        valid_next_kinds: VALUE_STARTS,
    },
    LexerState {
        kind: K::Clause,
        is_eof: false,
        is_nullable: true,
        valid_next_kinds: AFTER_OPERATOR,
    },
    LexerState {
        kind: K::ClauseClose,
        is_eof: true,
        is_nullable: true,
        valid_next_kinds: &[
            K::Comparator,
            K::Numeric,
            K::Boolean,
            K::Variable,
            K::String,
            K::Time,
            K::Clause,
            K::ClauseClose,
            K::Logical,
        ],
    },
    LexerState {
        kind: K::Numeric,
        is_eof: true,
        is_nullable: false,
        valid_next_kinds: AFTER_VALUE,
    },
    LexerState {
        kind: K::Boolean,
        is_eof: true,
        is_nullable: false,
        valid_next_kinds: AFTER_VALUE,
    },
    LexerState {
        kind: K::String,
        is_eof: true,
        is_nullable: false,
        valid_next_kinds: AFTER_VALUE,
    },
    LexerState {
        kind: K::Time,
        is_eof: true,
        is_nullable: false,
        valid_next_kinds: AFTER_VALUE,
    },
    LexerState {
        kind: K::Variable,
        is_eof: true,
        is_nullable: false,
        valid_next_kinds: AFTER_VALUE,
    },
    LexerState {
        kind: K::Comparator,
        is_eof: false,
        is_nullable: false,
        valid_next_kinds: AFTER_OPERATOR,
    },
    LexerState {
        kind: K::Logical,
        is_eof: false,
        is_nullable: false,
        valid_next_kinds: AFTER_OPERATOR,
    },
    LexerState {
        kind: K::Prefix,
        is_eof: false,
        is_nullable: false,
        valid_next_kinds: &[K::Numeric, K::Boolean, K::Variable, K::Clause, K::ClauseClose],
    },
];

/// Looks up the state entered after reading a token of `kind`.
pub fn state_for(kind: TokenKind) -> &'static LexerState {
    LEXER_STATES
        .iter()
        .find(|state| state.kind == kind)
        .unwrap_or(&LEXER_STATES[0])
}

/// Rejects token sequences the grammar does not allow.
pub fn check_syntax(tokens: &[Token]) -> Result<(), SyntaxError> {
    let mut state = &LEXER_STATES[0];
    let mut last: Option<&Token> = None;

    for token in tokens {
        let kind = token.kind();

        if !state.can_transition_to(kind) {
            // `name(` reads like a call, which the language has no notion of
            if let (Some(Token::Variable(name)), TokenKind::Clause) = (last, kind) {
                return Err(SyntaxError::UndefinedFunction(name.clone()));
            }

            let from = match last {
                Some(prev) => format!("{} [{}]", state.kind, prev),
                None => format!("{} []", state.kind),
            };
            return Err(SyntaxError::InvalidTransition {
                from,
                to: format!("{kind} [{token}]"),
            });
        }

        state = state_for(kind);

        if !state.is_nullable && !token.has_value() {
            return Err(SyntaxError::NilValue(kind));
        }

        last = Some(token);
    }

    if !state.is_eof {
        return Err(SyntaxError::UnexpectedEnd);
    }

    Ok(())
}
