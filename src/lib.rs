//! Compiles boolean filter expressions into search-engine query trees.
//!
//! ```
//! use esfilter::{Operator, QueryRegistry, compile, es};
//!
//! let registry = QueryRegistry::new()
//!     .with_field("ip", es::range_generators())
//!     .with_generator("title", Operator::Eq, es::match_generator());
//!
//! let (query, fields) = compile(r#"ip != "1.1.1.1" || ("2.2.2.2" > ip && "x" == title)"#, &registry).unwrap();
//! assert_eq!(fields.into_iter().collect::<Vec<_>>(), ["ip", "title"]);
//! let body = esfilter::output::search_body(&query);
//! assert!(body["query"]["bool"]["should"].is_array());
//! ```
pub mod ast;
pub mod cli;
pub mod config;
pub mod error;
pub mod es;
pub mod evaluator;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod query;
pub mod stream;
pub mod syntax;
pub mod value;

pub use ast::{Operator, Token, TokenKind};
pub use config::{ConfigError, RegistryConfig};
pub use error::{Error, ErrorKind};
pub use evaluator::{BuildError, QueryBuilder, compile};
pub use lexer::{LexError, Lexer};
pub use parser::{ParseError, to_postfix};
pub use query::{QueryGenerator, QueryNode, QueryRegistry};
pub use syntax::{SyntaxError, check_syntax};
pub use value::Value;
