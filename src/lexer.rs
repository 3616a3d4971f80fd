use std::{str::FromStr, sync::LazyLock};

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::{ast::Token, stream::CharStream};

/// Errors raised while scanning an expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("unexpected character '{ch}' at position {position}")]
    UnexpectedCharacter { ch: char, position: usize },

    #[error("unexpected '{ch}' at position {position} (did you mean '{hint}'?)")]
    IncompleteOperator {
        ch: char,
        position: usize,
        hint: &'static str,
    },

    #[error("unterminated string starting at position {position}")]
    UnterminatedString { position: usize },

    #[error("unterminated field reference starting at position {position}")]
    UnterminatedField { position: usize },

    #[error("invalid escape sequence '\\{ch}' at position {position}")]
    InvalidEscape { ch: char, position: usize },

    #[error("invalid numeric literal '{literal}'")]
    InvalidNumber { literal: String },
}

static TIME_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\d{4}-\d{2}-\d{2}(?:[T ]\d{2}:\d{2}:\d{2}(?:\.\d+)?(?:Z|z|[+-]\d{2}:\d{2})?)?$",
    )
    .expect("time literal pattern is valid")
});

/// Turns filter-expression source into tokens.
pub struct Lexer {
    stream: CharStream,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            stream: CharStream::new(input),
        }
    }

    /// Scans the whole input.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        tracing::debug!(count = tokens.len(), "scanned expression");
        Ok(tokens)
    }

    /// Returns the next token, or `None` once the input is exhausted.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        self.skip_whitespace();

        if !self.stream.can_read() {
            return Ok(None);
        }

        let start = self.stream.position();
        let ch = self.stream.read_character();

        let token = match ch {
            '(' => Token::Clause,
            ')' => Token::ClauseClose,
            '"' | '\'' => self.read_string(ch, start)?,
            '[' => Token::Variable(self.read_bracketed_field(start)?),
            '=' => {
                if self.accept('=') {
                    Token::Comparator("==".to_string())
                } else {
                    return Err(LexError::IncompleteOperator {
                        ch,
                        position: start,
                        hint: "==",
                    });
                }
            }
            '!' => {
                if self.accept('=') {
                    Token::Comparator("!=".to_string())
                } else {
                    Token::Prefix("!".to_string())
                }
            }
            '>' => {
                if self.accept('=') {
                    Token::Comparator(">=".to_string())
                } else {
                    Token::Comparator(">".to_string())
                }
            }
            '<' => {
                if self.accept('=') {
                    Token::Comparator("<=".to_string())
                } else {
                    Token::Comparator("<".to_string())
                }
            }
            '&' => {
                if self.accept('&') {
                    Token::Logical("&&".to_string())
                } else {
                    return Err(LexError::IncompleteOperator {
                        ch,
                        position: start,
                        hint: "&&",
                    });
                }
            }
            '|' => {
                if self.accept('|') {
                    Token::Logical("||".to_string())
                } else {
                    return Err(LexError::IncompleteOperator {
                        ch,
                        position: start,
                        hint: "||",
                    });
                }
            }
            '-' | '~' => Token::Prefix(ch.to_string()),
            c if c.is_ascii_digit() => {
                self.stream.rewind(1);
                self.read_number()?
            }
            c if c.is_alphabetic() || c == '_' => {
                self.stream.rewind(1);
                let ident = self.read_identifier();
                match ident.as_str() {
                    "true" => Token::Boolean(true),
                    "false" => Token::Boolean(false),
                    _ => Token::Variable(ident),
                }
            }
            c => {
                return Err(LexError::UnexpectedCharacter {
                    ch: c,
                    position: start,
                });
            }
        };

        tracing::trace!(%token, position = start, "token");
        Ok(Some(token))
    }

    fn skip_whitespace(&mut self) {
        while self.stream.can_read() {
            if !self.stream.read_character().is_whitespace() {
                self.stream.rewind(1);
                break;
            }
        }
    }

    /// Consumes `expected` if it is the next character.
    fn accept(&mut self, expected: char) -> bool {
        if !self.stream.can_read() {
            return false;
        }
        if self.stream.read_character() == expected {
            true
        } else {
            self.stream.rewind(1);
            false
        }
    }

    fn peek(&mut self) -> Option<char> {
        if !self.stream.can_read() {
            return None;
        }
        let ch = self.stream.read_character();
        self.stream.rewind(1);
        Some(ch)
    }

    fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_alphanumeric() || ch == '_' || ch == '.' {
                result.push(ch);
                self.stream.read_character();
            } else {
                break;
            }
        }
        result
    }

    fn read_number(&mut self) -> Result<Token, LexError> {
        let mut number = String::new();
        let mut seen_dot = false;

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                number.push(ch);
                self.stream.read_character();
            } else if ch == '.' && !seen_dot {
                // only a decimal point when a digit follows
                self.stream.read_character();
                match self.peek() {
                    Some(next) if next.is_ascii_digit() => {
                        seen_dot = true;
                        number.push('.');
                    }
                    _ => {
                        self.stream.rewind(1);
                        break;
                    }
                }
            } else {
                break;
            }
        }

        Decimal::from_str(&number)
            .map(Token::Numeric)
            .map_err(|_| LexError::InvalidNumber { literal: number })
    }

    /// Reads a quoted literal; the opening quote is already consumed.
    fn read_string(&mut self, quote: char, start: usize) -> Result<Token, LexError> {
        let mut result = String::new();

        loop {
            if !self.stream.can_read() {
                return Err(LexError::UnterminatedString { position: start });
            }
            match self.stream.read_character() {
                c if c == quote => break,
                '\\' => {
                    if !self.stream.can_read() {
                        return Err(LexError::UnterminatedString { position: start });
                    }
                    let position = self.stream.position();
                    match self.stream.read_character() {
                        'n' => result.push('\n'),
                        't' => result.push('\t'),
                        'r' => result.push('\r'),
                        '"' => result.push('"'),
                        '\'' => result.push('\''),
                        '\\' => result.push('\\'),
                        ch => return Err(LexError::InvalidEscape { ch, position }),
                    }
                }
                ch => result.push(ch),
            }
        }

        let time = parse_time(&result);
        Ok(match time {
            Some(at) => Token::Time { at, text: result },
            None => Token::String(result),
        })
    }

    /// Reads `[field name]`; the opening bracket is already consumed.
    fn read_bracketed_field(&mut self, start: usize) -> Result<String, LexError> {
        let mut name = String::new();
        loop {
            if !self.stream.can_read() {
                return Err(LexError::UnterminatedField { position: start });
            }
            match self.stream.read_character() {
                ']' => return Ok(name),
                ch => name.push(ch),
            }
        }
    }
}

/// Recognizes the time literal forms: RFC 3339, `YYYY-MM-DD HH:MM:SS[.f][offset]`,
/// offset-less timestamps (taken as UTC) and bare dates (midnight UTC).
pub fn parse_time(text: &str) -> Option<DateTime<FixedOffset>> {
    if !TIME_SHAPE.is_match(text) {
        return None;
    }

    if let Ok(time) = DateTime::parse_from_rfc3339(text) {
        return Some(time);
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.fZ"] {
        if let Ok(time) = DateTime::parse_from_str(text, format) {
            return Some(time);
        }
    }

    let utc = FixedOffset::east_opt(0)?;
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| utc.from_utc_datetime(&naive))
}

#[test]
fn test_comparator_lookahead() {
    let tokens = Lexer::new(">= > <= < == !=").tokenize().unwrap();
    let symbols: Vec<_> = tokens.iter().filter_map(Token::symbol).collect();
    assert_eq!(symbols, vec![">=", ">", "<=", "<", "==", "!="]);
}

#[test]
fn test_bang_without_equals_is_prefix() {
    let mut lexer = Lexer::new("!(");
    assert_eq!(lexer.next_token().unwrap(), Some(Token::Prefix("!".to_string())));
    assert_eq!(lexer.next_token().unwrap(), Some(Token::Clause));
    assert_eq!(lexer.next_token().unwrap(), None);
}
