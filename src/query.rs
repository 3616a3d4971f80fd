//! Query nodes and the per-field generator registry.
//!
//! The compiler never looks inside a query node. It only builds nodes through
//! generators supplied by the caller and combines them with the small set of
//! combinators on [`QueryNode`].

use std::{
    collections::{HashMap, hash_map},
    fmt,
    sync::Arc,
};

use crate::{ast::Operator, value::Value};

/// Combinators the compiler needs from a backend query type.
pub trait QueryNode: Sized {
    /// Both sub-queries must match.
    fn must(left: Self, right: Self) -> Self;

    /// At least one sub-query must match.
    fn should(left: Self, right: Self) -> Self;

    /// The sub-query must not match.
    fn must_not(query: Self) -> Self;

    /// Matches documents that have a value for `field`.
    fn exists(field: &str) -> Self;

    /// Scopes `query` to the sub-documents under `path`.
    fn nested(path: &str, query: Self) -> Self;
}

pub type QueryFactory<Q> = Arc<dyn Fn(&str, &Value) -> Q + Send + Sync>;

/// Builds the backend query for one (field, comparator) pair.
pub struct QueryGenerator<Q> {
    factory: QueryFactory<Q>,
    field: Option<String>,
    nest_path: Option<String>,
}

impl<Q> QueryGenerator<Q> {
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn(&str, &Value) -> Q + Send + Sync + 'static,
    {
        QueryGenerator {
            factory: Arc::new(factory),
            field: None,
            nest_path: None,
        }
    }

    /// Queries `field` in the backend instead of the name used in expressions.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Marks the field as living inside nested documents under `path`.
    pub fn nested(mut self, path: impl Into<String>) -> Self {
        self.nest_path = Some(path.into());
        self
    }

    pub fn is_nested(&self) -> bool {
        self.nest_path.is_some()
    }

    pub fn nest_path(&self) -> Option<&str> {
        self.nest_path.as_deref()
    }

    /// Backend field name for an expression field.
    pub fn target<'a>(&'a self, field: &'a str) -> &'a str {
        self.field.as_deref().unwrap_or(field)
    }

    pub fn generate(&self, field: &str, value: &Value) -> Q {
        (self.factory)(self.target(field), value)
    }

    /// A generator sharing this one's target and nesting, with a new factory.
    fn derive<F>(&self, factory: F) -> Self
    where
        F: Fn(&str, &Value) -> Q + Send + Sync + 'static,
    {
        QueryGenerator {
            factory: Arc::new(factory),
            field: self.field.clone(),
            nest_path: self.nest_path.clone(),
        }
    }
}

impl<Q> Clone for QueryGenerator<Q> {
    fn clone(&self) -> Self {
        QueryGenerator {
            factory: Arc::clone(&self.factory),
            field: self.field.clone(),
            nest_path: self.nest_path.clone(),
        }
    }
}

impl<Q> fmt::Debug for QueryGenerator<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryGenerator")
            .field("field", &self.field)
            .field("nest_path", &self.nest_path)
            .finish_non_exhaustive()
    }
}

pub type FieldGenerators<Q> = HashMap<Operator, QueryGenerator<Q>>;

/// Maps each field name to the generators of the comparators it supports.
///
/// # Examples
///
/// ```
/// use esfilter::{Operator, QueryGenerator, QueryRegistry, es::Query};
///
/// let registry = QueryRegistry::new()
///     .with_generator("title", Operator::Eq, QueryGenerator::new(|field, value| {
///         Query::Match { field: field.to_string(), value: value.clone() }
///     }));
///
/// assert!(registry.generator("title", Operator::Eq).is_some());
/// assert!(registry.generator("title", Operator::Neq).is_none());
/// assert!(registry.with_derived_negations().generator("title", Operator::Neq).is_some());
/// ```
pub struct QueryRegistry<Q> {
    fields: HashMap<String, FieldGenerators<Q>>,
}

impl<Q> QueryRegistry<Q> {
    pub fn new() -> Self {
        QueryRegistry {
            fields: HashMap::new(),
        }
    }

    /// Registers all of `generators` for `field`, replacing existing entries
    /// for the same operators.
    pub fn with_field(mut self, field: impl Into<String>, generators: FieldGenerators<Q>) -> Self {
        self.fields.entry(field.into()).or_default().extend(generators);
        self
    }

    pub fn with_generator(
        mut self,
        field: impl Into<String>,
        op: Operator,
        generator: QueryGenerator<Q>,
    ) -> Self {
        self.insert(field, op, generator);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, op: Operator, generator: QueryGenerator<Q>) {
        self.fields
            .entry(field.into())
            .or_default()
            .insert(op, generator);
    }

    pub fn field(&self, field: &str) -> Option<&FieldGenerators<Q>> {
        self.fields.get(field)
    }

    pub fn generator(&self, field: &str, op: Operator) -> Option<&QueryGenerator<Q>> {
        self.fields.get(field)?.get(&op)
    }
}

impl<Q: QueryNode + 'static> QueryRegistry<Q> {
    /// Returns a copy in which every field with an `==` generator but no `!=`
    /// generator gains one that negates the `==` query. `self` is untouched.
    pub fn with_derived_negations(&self) -> Self {
        let mut copy = self.clone();

        for (field, generators) in copy.fields.iter_mut() {
            let hash_map::Entry::Vacant(slot) = generators.entry(Operator::Neq) else {
                continue;
            };
            let Some(eq) = self.generator(field, Operator::Eq) else {
                continue;
            };

            let factory = Arc::clone(&eq.factory);
            tracing::trace!(field = %field, "derived != generator from ==");
            slot.insert(eq.derive(move |target, value| Q::must_not(factory(target, value))));
        }

        copy
    }
}

impl<Q> Clone for QueryRegistry<Q> {
    fn clone(&self) -> Self {
        QueryRegistry {
            fields: self.fields.clone(),
        }
    }
}

impl<Q> Default for QueryRegistry<Q> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Q> fmt::Debug for QueryRegistry<Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.fields.iter()).finish()
    }
}
