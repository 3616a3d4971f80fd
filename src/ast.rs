//! # Filter Expression Language - Tokens and Operators
//!
//! This module defines the lexical model shared by every stage of the
//! compilation pipeline.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Tokens produced by the scanner, tagged by kind
//! - **[operators]** - Operator taxonomy, precedence classes and symbol tables
//!
//! ## Quick Start
//!
//! ```text
//! ip != "1.1.1.1" || ("2.2.2.2" > ip && "x" == title)
//! ```
//!
//! This expression keeps documents whose `ip` is not `1.1.1.1`, or whose `ip`
//! is below `2.2.2.2` and whose title matches `x`.
//!
//! ## Core Concepts
//!
//! ### Comparisons
//!
//! Every comparison puts a field reference on one side and a literal on the
//! other. The field may appear on either side; `5 < port` reads as
//! `port > 5`.
//!
//! ### Precedence
//!
//! From weakest to strongest: `||`, `&&`, comparators, prefixes, values.
//! Parentheses group as usual.
//!
//! ### Literals
//!
//! - **Numeric** - `42`, `3.5`
//! - **Boolean** - `true`, `false`
//! - **String** - `"text"` or `'text'`
//! - **Time** - a quoted date or timestamp, e.g. `"2024-03-01T08:00:00Z"`
pub mod operators;
pub mod tokens;

pub use operators::{
    COMPARATOR_SYMBOLS, LOGICAL_SYMBOLS, OPERATOR_SYMBOLS, Operator, PREFIX_SYMBOLS, Precedence,
};
pub use tokens::{Token, TokenKind};
