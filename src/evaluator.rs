use std::collections::BTreeSet;

use thiserror::Error;

use crate::{
    Error,
    ast::{COMPARATOR_SYMBOLS, LOGICAL_SYMBOLS, Operator, PREFIX_SYMBOLS, Token},
    lexer::Lexer,
    parser::to_postfix,
    query::{QueryNode, QueryRegistry},
    syntax::check_syntax,
    value::Value,
};

/// Errors raised while reducing a postfix sequence into a query.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    /// An operator found fewer operands on the stack than it takes
    #[error("missing operands")]
    MissingOperands,

    /// The stack did not reduce to a single query
    #[error("query build failed: {remaining} item(s) left on the stack")]
    QueryBuildFailed { remaining: usize },

    /// Neither or both sides of a comparison are field references
    #[error("field or value invalid")]
    FieldOrValueInvalid,

    #[error("value beside `{0}` should be a literal")]
    NonLiteralOperand(Operator),

    #[error("operand beside `{0}` should be a boolean expression")]
    NonQueryOperand(Operator),

    #[error("prefix `{op}` cannot apply to a {operand} operand")]
    InvalidPrefix { op: Operator, operand: String },

    #[error("field `{0}` not supported")]
    FieldNotSupported(String),

    #[error("operator `{op}` not supported for field `{field}`")]
    OperatorNotSupported { field: String, op: Operator },

    #[error("operator `{0}` not supported by query builder")]
    UnknownOperator(String),

    #[error("cannot combine sub queries with `{0}`")]
    UnsupportedLogical(Operator),
}

/// An entry on the evaluation stack.
enum Operand<Q> {
    Literal(Value),
    Field(String),
    Query(Q),
}

impl<Q> Operand<Q> {
    fn describe(&self) -> &'static str {
        match self {
            Operand::Literal(value) => value.type_name(),
            Operand::Field(_) => "field reference",
            Operand::Query(_) => "boolean expression",
        }
    }
}

/// Compiles a filter expression into a backend query.
///
/// Construction scans, checks and reorders the expression once and takes a
/// private copy of the registry with `!=` generators derived from `==` ones.
/// [`QueryBuilder::build`] then evaluates the postfix sequence.
///
/// # Examples
///
/// ```
/// use esfilter::{Operator, QueryBuilder, QueryRegistry, es};
///
/// let registry = QueryRegistry::new()
///     .with_field("port", es::range_generators())
///     .with_generator("title", Operator::Eq, es::match_generator());
///
/// let builder = QueryBuilder::new(r#"port >= 443 && title != "login""#, &registry).unwrap();
/// let (query, fields) = builder.build().unwrap();
///
/// assert!(fields.contains("port") && fields.contains("title"));
/// println!("{}", esfilter::output::to_json(&query));
/// ```
pub struct QueryBuilder<Q> {
    postfix: Vec<Token>,
    registry: QueryRegistry<Q>,
}

impl<Q: QueryNode + 'static> QueryBuilder<Q> {
    pub fn new(expression: &str, registry: &QueryRegistry<Q>) -> Result<Self, Error> {
        let registry = registry.with_derived_negations();

        let tokens = Lexer::new(expression).tokenize()?;
        check_syntax(&tokens)?;
        let postfix = to_postfix(tokens)?;

        Ok(QueryBuilder { postfix, registry })
    }

    /// The expression in postfix order.
    pub fn postfix(&self) -> &[Token] {
        &self.postfix
    }

    /// Evaluates the expression, returning the query and the names of the
    /// fields it compares.
    pub fn build(&self) -> Result<(Q, BTreeSet<String>), Error> {
        let mut stack: Vec<Operand<Q>> = Vec::new();
        let mut fields = BTreeSet::new();

        for token in &self.postfix {
            let operand = match token {
                Token::Variable(name) => Operand::Field(name.clone()),
                Token::Prefix(symbol) => {
                    let op = PREFIX_SYMBOLS
                        .get(symbol.as_str())
                        .copied()
                        .ok_or_else(|| BuildError::UnknownOperator(symbol.clone()))?;
                    let operand = stack.pop().ok_or(BuildError::MissingOperands)?;
                    apply_prefix(op, operand)?
                }
                Token::Comparator(symbol) => {
                    let op = COMPARATOR_SYMBOLS
                        .get(symbol.as_str())
                        .copied()
                        .ok_or_else(|| BuildError::UnknownOperator(symbol.clone()))?;
                    let (left, right) = pop_pair(&mut stack)?;
                    Operand::Query(self.compare(left, right, op, &mut fields)?)
                }
                Token::Logical(symbol) => {
                    let op = LOGICAL_SYMBOLS
                        .get(symbol.as_str())
                        .copied()
                        .ok_or_else(|| BuildError::UnknownOperator(symbol.clone()))?;
                    let (left, right) = pop_pair(&mut stack)?;
                    Operand::Query(combine(left, right, op)?)
                }
                other => match other.literal() {
                    Some(value) => Operand::Literal(value),
                    None => return Err(BuildError::UnknownOperator(other.to_string()).into()),
                },
            };
            stack.push(operand);
        }

        let remaining = stack.len();
        match (stack.pop(), remaining) {
            (Some(Operand::Query(query)), 1) => {
                tracing::debug!(?fields, "built query");
                Ok((query, fields))
            }
            _ => Err(BuildError::QueryBuildFailed { remaining }.into()),
        }
    }

    fn compare(
        &self,
        left: Operand<Q>,
        right: Operand<Q>,
        op: Operator,
        fields: &mut BTreeSet<String>,
    ) -> Result<Q, BuildError> {
        let (field, other, op) = match (left, right) {
            (Operand::Field(_), Operand::Field(_)) => return Err(BuildError::FieldOrValueInvalid),
            (Operand::Field(field), other) => (field, other, op),
            // `5 < x` reads as `x > 5`
            (other, Operand::Field(field)) => (field, other, op.flip()),
            _ => return Err(BuildError::FieldOrValueInvalid),
        };
        let Operand::Literal(value) = other else {
            return Err(BuildError::NonLiteralOperand(op));
        };

        let generators = self
            .registry
            .field(&field)
            .ok_or_else(|| BuildError::FieldNotSupported(field.clone()))?;
        let generator = generators
            .get(&op)
            .ok_or_else(|| BuildError::OperatorNotSupported {
                field: field.clone(),
                op,
            })?;

        let base = generator.generate(&field, &value);
        // a document without the field is not excluded by the comparison
        let query = Q::should(base, Q::must_not(Q::exists(generator.target(&field))));
        let query = match generator.nest_path() {
            Some(path) => Q::nested(path, query),
            None => query,
        };

        fields.insert(field);
        Ok(query)
    }
}

/// Pops the right operand, then the left one.
fn pop_pair<Q>(stack: &mut Vec<Operand<Q>>) -> Result<(Operand<Q>, Operand<Q>), BuildError> {
    match (stack.pop(), stack.pop()) {
        (Some(right), Some(left)) => Ok((left, right)),
        _ => Err(BuildError::MissingOperands),
    }
}

fn apply_prefix<Q: QueryNode>(op: Operator, operand: Operand<Q>) -> Result<Operand<Q>, BuildError> {
    match (op, operand) {
        (op, Operand::Literal(value)) => value.apply_prefix(op).map(Operand::Literal),
        (Operator::Invert, Operand::Query(query)) => Ok(Operand::Query(Q::must_not(query))),
        (op, other) => Err(BuildError::InvalidPrefix {
            op,
            operand: other.describe().to_string(),
        }),
    }
}

fn combine<Q: QueryNode>(left: Operand<Q>, right: Operand<Q>, op: Operator) -> Result<Q, BuildError> {
    let (Operand::Query(left), Operand::Query(right)) = (left, right) else {
        return Err(BuildError::NonQueryOperand(op));
    };
    match op {
        Operator::And => Ok(Q::must(left, right)),
        Operator::Or => Ok(Q::should(left, right)),
        other => Err(BuildError::UnsupportedLogical(other)),
    }
}

/// Compiles `expression` against `registry` in one step.
pub fn compile<Q: QueryNode + 'static>(
    expression: &str,
    registry: &QueryRegistry<Q>,
) -> Result<(Q, BTreeSet<String>), Error> {
    QueryBuilder::new(expression, registry)?.build()
}
