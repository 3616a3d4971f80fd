//! Registry descriptions loaded from JSON.
//!
//! ```json
//! {
//!   "fields": {
//!     "ip":           { "type": "range", "target": "nest.ip", "nested": "nest" },
//!     "title":        { "type": "match" },
//!     "organization": { "type": "term", "target": "org", "operators": ["==", "!="] }
//!   }
//! }
//! ```
//!
//! `match`, `match_phrase` and `term` fields register `==`. `range` fields
//! register `==`, `<`, `<=`, `>` and `>=`. `operators` narrows a field to the
//! listed comparators. Whenever `==` is registered, `!=` is derived from it
//! at compile time.

use std::{collections::BTreeMap, fs, io, path::Path};

use serde::Deserialize;
use thiserror::Error;

use crate::{
    ast::{COMPARATOR_SYMBOLS, Operator},
    es::{self, Query},
    query::{FieldGenerators, QueryRegistry},
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read registry file: {0}")]
    Io(#[from] io::Error),

    #[error("invalid registry description: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown comparator `{symbol}` for field `{field}`")]
    UnknownOperator { field: String, symbol: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Match,
    MatchPhrase,
    Term,
    Range,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldConfig {
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Backend field name, when it differs from the expression name
    #[serde(default)]
    pub target: Option<String>,

    /// Nested document path
    #[serde(default)]
    pub nested: Option<String>,

    /// Comparator symbols to register; all the type supports when absent
    #[serde(default)]
    pub operators: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    #[serde(default)]
    pub fields: BTreeMap<String, FieldConfig>,
}

impl RegistryConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading registry description");
        Self::from_json(&text)
    }

    /// Builds the generator registry these settings describe.
    pub fn into_registry(self) -> Result<QueryRegistry<Query>, ConfigError> {
        let mut registry = QueryRegistry::new();
        for (name, field) in self.fields {
            let generators = field.generators(&name)?;
            registry = registry.with_field(name, generators);
        }
        Ok(registry)
    }
}

impl FieldConfig {
    fn generators(&self, name: &str) -> Result<FieldGenerators<Query>, ConfigError> {
        let mut generators = match self.field_type {
            FieldType::Range => es::range_generators(),
            FieldType::Match => FieldGenerators::from([(Operator::Eq, es::match_generator())]),
            FieldType::MatchPhrase => {
                FieldGenerators::from([(Operator::Eq, es::match_phrase_generator())])
            }
            FieldType::Term => FieldGenerators::from([(Operator::Eq, es::term_generator())]),
        };

        if let Some(symbols) = &self.operators {
            let mut allowed = Vec::with_capacity(symbols.len());
            for symbol in symbols {
                let op = COMPARATOR_SYMBOLS.get(symbol.as_str()).copied().ok_or_else(|| {
                    ConfigError::UnknownOperator {
                        field: name.to_string(),
                        symbol: symbol.clone(),
                    }
                })?;
                allowed.push(op);
            }
            // `!=` is only ever derived from `==`
            if allowed.contains(&Operator::Neq) && !allowed.contains(&Operator::Eq) {
                tracing::warn!(field = name, "`!=` allowed without `==`; it cannot be derived");
            }
            generators.retain(|op, _| allowed.contains(op));
        }

        Ok(es::configure(
            generators,
            self.target.as_deref(),
            self.nested.as_deref(),
        ))
    }
}
