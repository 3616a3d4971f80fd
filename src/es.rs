//! Elasticsearch-style query DSL.
//!
//! [`Query`] is the concrete node type the CLI compiles to. It implements
//! [`QueryNode`] and renders to the JSON body a search backend expects.

use serde_json::{Map, json};

use crate::{
    ast::Operator,
    query::{FieldGenerators, QueryGenerator, QueryNode},
    value::Value,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// Boolean combination of sub-queries
    Bool {
        must: Vec<Query>,
        should: Vec<Query>,
        must_not: Vec<Query>,
    },

    /// Documents with any value for `field`
    Exists { field: String },

    /// Full-text match
    Match { field: String, value: Value },

    /// Full-text phrase match
    MatchPhrase { field: String, value: Value },

    /// Exact value
    Term { field: String, value: Value },

    /// Bounded range; absent bounds are open
    Range {
        field: String,
        gt: Option<Value>,
        gte: Option<Value>,
        lt: Option<Value>,
        lte: Option<Value>,
    },

    /// Query scoped to nested documents under `path`
    Nested { path: String, query: Box<Query> },
}

impl Query {
    fn boolean(must: Vec<Query>, should: Vec<Query>, must_not: Vec<Query>) -> Self {
        Query::Bool {
            must,
            should,
            must_not,
        }
    }

    /// Renders the query as a DSL JSON object.
    ///
    /// # Examples
    ///
    /// ```
    /// use esfilter::{Value, es::Query};
    ///
    /// let query = Query::Term { field: "org".into(), value: Value::String("baidu".into()) };
    /// assert_eq!(query.to_json(), serde_json::json!({"term": {"org": "baidu"}}));
    /// ```
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Query::Bool {
                must,
                should,
                must_not,
            } => {
                let mut body = Map::new();
                for (key, clauses) in [("must", must), ("should", should), ("must_not", must_not)] {
                    if !clauses.is_empty() {
                        body.insert(
                            key.to_string(),
                            clauses.iter().map(Query::to_json).collect(),
                        );
                    }
                }
                json!({ "bool": body })
            }
            Query::Exists { field } => json!({ "exists": { "field": field } }),
            Query::Match { field, value } => {
                json!({ "match": { field.as_str(): { "query": value.to_json() } } })
            }
            Query::MatchPhrase { field, value } => {
                json!({ "match_phrase": { field.as_str(): { "query": value.to_json() } } })
            }
            Query::Term { field, value } => json!({ "term": { field.as_str(): value.to_json() } }),
            Query::Range {
                field,
                gt,
                gte,
                lt,
                lte,
            } => {
                let mut bounds = Map::new();
                for (key, bound) in [("gt", gt), ("gte", gte), ("lt", lt), ("lte", lte)] {
                    if let Some(value) = bound {
                        bounds.insert(key.to_string(), value.to_json());
                    }
                }
                json!({ "range": { field.as_str(): bounds } })
            }
            Query::Nested { path, query } => {
                json!({ "nested": { "path": path, "query": query.to_json() } })
            }
        }
    }
}

impl QueryNode for Query {
    fn must(left: Self, right: Self) -> Self {
        Query::boolean(vec![left, right], vec![], vec![])
    }

    fn should(left: Self, right: Self) -> Self {
        Query::boolean(vec![], vec![left, right], vec![])
    }

    fn must_not(query: Self) -> Self {
        Query::boolean(vec![], vec![], vec![query])
    }

    fn exists(field: &str) -> Self {
        Query::Exists {
            field: field.to_string(),
        }
    }

    fn nested(path: &str, query: Self) -> Self {
        Query::Nested {
            path: path.to_string(),
            query: Box::new(query),
        }
    }
}

pub fn match_generator() -> QueryGenerator<Query> {
    QueryGenerator::new(|field, value| Query::Match {
        field: field.to_string(),
        value: value.clone(),
    })
}

pub fn match_phrase_generator() -> QueryGenerator<Query> {
    QueryGenerator::new(|field, value| Query::MatchPhrase {
        field: field.to_string(),
        value: value.clone(),
    })
}

pub fn term_generator() -> QueryGenerator<Query> {
    QueryGenerator::new(|field, value| Query::Term {
        field: field.to_string(),
        value: value.clone(),
    })
}

/// Generators for `==`, `<`, `<=`, `>` and `>=` over a range query.
/// Equality is the closed range `[value, value]`.
pub fn range_generators() -> FieldGenerators<Query> {
    fn bounded(op: Operator) -> QueryGenerator<Query> {
        QueryGenerator::new(move |field, value| {
            let bound = || Some(value.clone());
            let (gt, gte, lt, lte) = match op {
                Operator::Gt => (bound(), None, None, None),
                Operator::Gte => (None, bound(), None, None),
                Operator::Lt => (None, None, bound(), None),
                Operator::Lte => (None, None, None, bound()),
                _ => (None, bound(), None, bound()),
            };
            Query::Range {
                field: field.to_string(),
                gt,
                gte,
                lt,
                lte,
            }
        })
    }

    [
        Operator::Eq,
        Operator::Lt,
        Operator::Lte,
        Operator::Gt,
        Operator::Gte,
    ]
    .into_iter()
    .map(|op| (op, bounded(op)))
    .collect()
}

/// Applies a backend field name and nesting to every generator of a field.
pub fn configure(
    generators: FieldGenerators<Query>,
    target: Option<&str>,
    nest_path: Option<&str>,
) -> FieldGenerators<Query> {
    generators
        .into_iter()
        .map(|(op, generator)| {
            let generator = match target {
                Some(target) => generator.with_field(target),
                None => generator,
            };
            let generator = match nest_path {
                Some(path) => generator.nested(path),
                None => generator,
            };
            (op, generator)
        })
        .collect()
}
